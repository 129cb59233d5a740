//! Filtering by activity alphabet.

use std::collections::{HashMap, HashSet};

use crate::automaton::ExtendedPrefixAutomaton;
use crate::construction::EpaComponentsBuilder;
use crate::error::Result;
use crate::features::filter::EpaFilter;
use crate::models::{Activity, State, StateId};

/// Keeps only the states whose entire prefix is spelled from a retained
/// activity set.
///
/// A prefix with a single disallowed activity anywhere in it is dropped as a
/// whole; the surviving states always form a subtree rooted at the root.
#[derive(Debug, Clone)]
pub struct ActivityFilter {
    retained: HashSet<Activity>,
}

impl ActivityFilter {
    /// Keep only prefixes built from the given activities.
    pub fn new(retained: impl IntoIterator<Item = Activity>) -> Self {
        Self {
            retained: retained.into_iter().collect(),
        }
    }

    /// Whether a state's whole prefix is spelled from retained activities.
    ///
    /// Walks predecessor links iteratively and memoizes per state, so the
    /// pass over all states stays linear and trace length never threatens
    /// the call stack.
    fn prefix_is_retained<T: Ord>(
        &self,
        epa: &ExtendedPrefixAutomaton<T>,
        id: StateId,
        memo: &mut HashMap<StateId, bool>,
    ) -> Result<bool> {
        let mut pending = Vec::new();
        let mut current = id;
        let verdict = loop {
            if let Some(&known) = memo.get(&current) {
                break known;
            }
            match epa.state(current)? {
                State::Root => break true,
                State::Prefix { from, via } => {
                    if !self.retained.contains(via) {
                        break false;
                    }
                    pending.push(current);
                    current = *from;
                }
            }
        };

        // Everything on the walked path shares the verdict: a retained chain
        // stays retained all the way down, a broken one is broken below the
        // break as well.
        memo.insert(current, verdict);
        for state in pending {
            memo.insert(state, verdict);
        }
        Ok(verdict)
    }
}

impl<T: Ord + Clone> EpaFilter<T> for ActivityFilter {
    fn name(&self) -> &str {
        "activity"
    }

    fn apply(&self, epa: &ExtendedPrefixAutomaton<T>) -> Result<ExtendedPrefixAutomaton<T>> {
        let mut memo = HashMap::with_capacity(epa.state_count());
        let mut kept = HashSet::new();
        for id in epa.state_ids() {
            if self.prefix_is_retained(epa, id, &mut memo)? {
                kept.insert(id);
            }
        }

        EpaComponentsBuilder::from_existing(epa)
            .retain_states(kept)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::construction::ExtendedPrefixAutomatonBuilder;
    use crate::models::{Event, ROOT};

    fn two_case_epa() -> ExtendedPrefixAutomaton<u64> {
        // Case A = [a, b, c], case B = [a, b, d].
        ExtendedPrefixAutomatonBuilder::new()
            .with_log_name("two-cases")
            .with_events(vec![
                Event::new(Activity::new("a"), 1, "A"),
                Event::new(Activity::new("a"), 2, "B"),
                Event::new(Activity::new("b"), 3, "A"),
                Event::new(Activity::new("b"), 4, "B"),
                Event::new(Activity::new("c"), 5, "A"),
                Event::new(Activity::new("d"), 6, "B"),
            ])
            .build()
            .unwrap()
    }

    #[test]
    fn test_disallowed_activity_cuts_the_whole_subtree() {
        let epa = two_case_epa();
        let filtered = ActivityFilter::new(vec![
            Activity::new("a"),
            Activity::new("c"),
            Activity::new("d"),
        ])
        .apply(&epa)
        .unwrap();

        // "b" is disallowed, so "ab", "abc" and "abd" all go.
        assert_eq!(filtered.state_count(), 2);
        let s_a = filtered.resolve(ROOT, &Activity::new("a")).unwrap();
        assert!(filtered.outgoing(s_a).unwrap().next().is_none());
        assert_eq!(filtered.activities(), &[Activity::new("a")]);
    }

    #[test]
    fn test_full_alphabet_is_the_identity() {
        let epa = two_case_epa();
        let filtered = ActivityFilter::new(epa.activities().to_vec())
            .apply(&epa)
            .unwrap();
        assert_eq!(filtered, epa);
    }

    #[test]
    fn test_empty_alphabet_keeps_only_the_root() {
        let epa = two_case_epa();
        let filtered = ActivityFilter::new(vec![]).apply(&epa).unwrap();
        assert_eq!(filtered.state_count(), 1);
        assert!(filtered.transitions().is_empty());
        assert_eq!(filtered.partition(ROOT).unwrap(), 0);
    }

    #[test]
    fn test_surviving_partitions_are_inherited() {
        let epa = two_case_epa();
        let filtered = ActivityFilter::new(vec![
            Activity::new("a"),
            Activity::new("b"),
            Activity::new("d"),
        ])
        .apply(&epa)
        .unwrap();

        let s_a = filtered.resolve(ROOT, &Activity::new("a")).unwrap();
        let s_ab = filtered.resolve(s_a, &Activity::new("b")).unwrap();
        let s_abd = filtered.resolve(s_ab, &Activity::new("d")).unwrap();
        assert_eq!(filtered.partition(s_a).unwrap(), 1);
        assert_eq!(filtered.partition(s_ab).unwrap(), 1);
        assert_eq!(filtered.partition(s_abd).unwrap(), 2);
    }
}
