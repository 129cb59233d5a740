//! Rebuilding an automaton from a retained subset of an existing one.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::automaton::ExtendedPrefixAutomaton;
use crate::error::{EpaError, Result};
use crate::models::{Activity, Event, State, StateId, Transition, ROOT};

/// Rebuilds an automaton from a subset of an existing one's states.
///
/// This is the workhorse behind every filter: given the states a filter wants
/// to keep, it restricts transitions to retained endpoints, optionally prunes
/// everything no longer reachable from the root (so the orphan-free invariant
/// holds transitively, not just one level deep), re-conses the arena with
/// fresh ids, and restricts the partition, sequence, and activity tables.
/// Partition ids are inherited from the source, never recomputed.
#[derive(Debug)]
pub struct EpaComponentsBuilder<'a, T> {
    source: &'a ExtendedPrefixAutomaton<T>,
    log_name: Option<String>,
    retained: HashSet<StateId>,
    prune_unreachable: bool,
}

impl<'a, T: Ord + Clone> EpaComponentsBuilder<'a, T> {
    /// Start from an existing automaton, retaining all of its states.
    pub fn from_existing(source: &'a ExtendedPrefixAutomaton<T>) -> Self {
        Self {
            source,
            log_name: None,
            retained: source.state_ids().collect(),
            prune_unreachable: true,
        }
    }

    /// Replace the retained state set. Ids refer to the source automaton.
    pub fn retain_states(mut self, retained: HashSet<StateId>) -> Self {
        self.retained = retained;
        self
    }

    /// Override the event log name; defaults to the source's.
    pub fn with_log_name(mut self, name: impl Into<String>) -> Self {
        self.log_name = Some(name.into());
        self
    }

    /// Whether to drop retained states that lost their connection to the
    /// root. Enabled by default; disabling requires the retained set to be
    /// closed under predecessors, otherwise [`build`](Self::build) fails.
    pub fn prune_unreachable(mut self, value: bool) -> Self {
        self.prune_unreachable = value;
        self
    }

    /// Rebuild the automaton over the retained states.
    pub fn build(self) -> Result<ExtendedPrefixAutomaton<T>> {
        if !self.retained.contains(&ROOT) {
            return Err(EpaError::InvalidComponents(
                "root state must be retained".to_string(),
            ));
        }

        let kept = if self.prune_unreachable {
            self.reachable_subset()
        } else {
            self.closed_subset()?
        };

        // Old arena ids are topologically ordered (predecessors first), so an
        // ascending re-numbering keeps the arena well-formed and the output
        // deterministic.
        let mut old_to_new: HashMap<StateId, StateId> = HashMap::with_capacity(kept.len());
        let mut states: Vec<State> = Vec::with_capacity(kept.len());
        let mut partition_by_state = Vec::with_capacity(kept.len());
        let mut sequence_by_state: Vec<Vec<Event<T>>> = Vec::with_capacity(kept.len());
        let mut activities: Vec<Activity> = Vec::new();

        for old in self.source.state_ids().filter(|id| kept.contains(id)) {
            let new_id = StateId::from_index(states.len());
            let state = match self.source.state(old)? {
                State::Root => State::Root,
                State::Prefix { from, via } => {
                    activities.push(via.clone());
                    State::Prefix {
                        from: old_to_new[from],
                        via: via.clone(),
                    }
                }
            };
            states.push(state);
            partition_by_state.push(self.source.partition(old)?);
            sequence_by_state.push(self.source.sequence(old)?.to_vec());
            old_to_new.insert(old, new_id);
        }

        let transitions: Vec<Transition> = self
            .source
            .transitions()
            .iter()
            .filter(|t| kept.contains(&t.start) && kept.contains(&t.end))
            .map(|t| Transition::new(old_to_new[&t.start], t.activity.clone(), old_to_new[&t.end]))
            .collect();

        let log_name = self
            .log_name
            .unwrap_or_else(|| self.source.log_name().to_string());

        Ok(ExtendedPrefixAutomaton::from_parts(
            log_name,
            states,
            activities,
            transitions,
            partition_by_state,
            sequence_by_state,
        ))
    }

    /// States reachable from the root through transitions whose endpoints
    /// are both retained. Iterative, so chain length never matters.
    fn reachable_subset(&self) -> HashSet<StateId> {
        let mut adjacency: HashMap<StateId, Vec<StateId>> = HashMap::new();
        for transition in self.source.transitions() {
            if self.retained.contains(&transition.start) && self.retained.contains(&transition.end)
            {
                adjacency
                    .entry(transition.start)
                    .or_default()
                    .push(transition.end);
            }
        }

        let mut reachable = HashSet::with_capacity(self.retained.len());
        reachable.insert(ROOT);
        let mut queue = VecDeque::from([ROOT]);
        while let Some(state) = queue.pop_front() {
            if let Some(children) = adjacency.get(&state) {
                for &child in children {
                    if reachable.insert(child) {
                        queue.push_back(child);
                    }
                }
            }
        }
        reachable
    }

    /// Verify the retained set is closed under predecessors and return it.
    fn closed_subset(&self) -> Result<HashSet<StateId>> {
        for &id in &self.retained {
            if let State::Prefix { from, .. } = self.source.state(id)? {
                if !self.retained.contains(from) {
                    return Err(EpaError::InvalidComponents(format!(
                        "retained state {id:?} misses its predecessor {from:?}"
                    )));
                }
            }
        }
        Ok(self.retained.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::construction::ExtendedPrefixAutomatonBuilder;
    use crate::models::Activity;

    fn chain_epa() -> ExtendedPrefixAutomaton<u64> {
        // Single case: a -> b -> c.
        ExtendedPrefixAutomatonBuilder::new()
            .with_log_name("chain")
            .with_events(vec![
                Event::new(Activity::new("a"), 1, "A"),
                Event::new(Activity::new("b"), 2, "A"),
                Event::new(Activity::new("c"), 3, "A"),
            ])
            .build()
            .unwrap()
    }

    #[test]
    fn test_identity_rebuild() {
        let epa = chain_epa();
        let rebuilt = EpaComponentsBuilder::from_existing(&epa).build().unwrap();
        assert_eq!(rebuilt, epa);
    }

    #[test]
    fn test_root_must_be_retained() {
        let epa = chain_epa();
        let result = EpaComponentsBuilder::from_existing(&epa)
            .retain_states(HashSet::new())
            .build();
        assert!(matches!(result, Err(EpaError::InvalidComponents(_))));
    }

    #[test]
    fn test_pruning_removes_multi_level_dangling_chains() {
        let epa = chain_epa();
        let a = Activity::new("a");
        let s_a = epa.resolve(ROOT, &a).unwrap();
        let s_ab = epa.resolve(s_a, &Activity::new("b")).unwrap();
        let s_abc = epa.resolve(s_ab, &Activity::new("c")).unwrap();

        // Drop the chain's first link; both descendants must go as well.
        let retained = HashSet::from([ROOT, s_ab, s_abc]);
        let rebuilt = EpaComponentsBuilder::from_existing(&epa)
            .retain_states(retained)
            .build()
            .unwrap();

        assert_eq!(rebuilt.state_count(), 1);
        assert!(rebuilt.transitions().is_empty());
        assert!(rebuilt.activities().is_empty());
    }

    #[test]
    fn test_unpruned_requires_predecessor_closure() {
        let epa = chain_epa();
        let a = Activity::new("a");
        let s_a = epa.resolve(ROOT, &a).unwrap();
        let s_ab = epa.resolve(s_a, &Activity::new("b")).unwrap();

        let result = EpaComponentsBuilder::from_existing(&epa)
            .retain_states(HashSet::from([ROOT, s_ab]))
            .prune_unreachable(false)
            .build();
        assert!(matches!(result, Err(EpaError::InvalidComponents(_))));
    }

    #[test]
    fn test_partitions_are_inherited_not_recomputed() {
        // Branch: a -> {b, c}; dropping the c branch must keep partitions.
        let epa = ExtendedPrefixAutomatonBuilder::new()
            .with_log_name("branch")
            .with_events(vec![
                Event::new(Activity::new("a"), 1, "A"),
                Event::new(Activity::new("a"), 2, "B"),
                Event::new(Activity::new("b"), 3, "A"),
                Event::new(Activity::new("c"), 4, "B"),
            ])
            .build()
            .unwrap();

        let s_a = epa.resolve(ROOT, &Activity::new("a")).unwrap();
        let s_ac = epa.resolve(s_a, &Activity::new("c")).unwrap();
        assert_eq!(epa.partition(s_ac).unwrap(), 2);

        let rebuilt = EpaComponentsBuilder::from_existing(&epa)
            .retain_states(HashSet::from([ROOT, s_a, s_ac]))
            .build()
            .unwrap();

        let r_a = rebuilt.resolve(ROOT, &Activity::new("a")).unwrap();
        let r_ac = rebuilt.resolve(r_a, &Activity::new("c")).unwrap();
        assert_eq!(rebuilt.state_count(), 3);
        assert_eq!(rebuilt.partition(r_a).unwrap(), 1);
        assert_eq!(rebuilt.partition(r_ac).unwrap(), 2);
        assert!(rebuilt.state(StateId::from_index(5)).is_err());
    }
}
