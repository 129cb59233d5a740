//! Collapsing non-branching runs into single states.

use std::collections::HashMap;

use crate::automaton::ExtendedPrefixAutomaton;
use crate::error::{EpaError, Result};
use crate::features::filter::EpaFilter;
use crate::models::{Activity, Event, State, StateId, Transition};

/// Splices every maximal non-branching run of states into one synthetic
/// state.
///
/// A run starts at a state with exactly one outgoing transition whose
/// predecessor is not itself part of a run, follows the unique transitions
/// downwards, and ends at the first state that branches or terminates. The
/// synthetic state is labeled with the concatenated activity names of the
/// run, keeps the run head's partition, and holds the union of all run
/// members' events, so the automaton's total event count is unchanged. The
/// end state's branches hang below the synthetic state afterwards.
///
/// When a run's combined label coincides with a sibling activity under the
/// same predecessor, the synthetic state and the sibling merge into one
/// state holding both event sets; (predecessor, activity) stays a unique
/// key of the rebuilt arena.
#[derive(Debug, Default, Clone, Copy)]
pub struct CompressionFilter;

impl CompressionFilter {
    /// Create the compression filter.
    pub fn new() -> Self {
        Self
    }

    /// Map every run member to its run head, with the run's combined label
    /// stored under the head.
    fn detect_runs<T: Ord>(
        epa: &ExtendedPrefixAutomaton<T>,
        child_count: &[usize],
    ) -> Result<(HashMap<StateId, StateId>, HashMap<StateId, String>)> {
        let mut head_of = HashMap::new();
        let mut label_of = HashMap::new();

        for id in epa.state_ids() {
            let via = match epa.state(id)? {
                State::Root => continue,
                State::Prefix { from, via } => {
                    // Mid-run states are picked up by the walk from their head.
                    let parent_is_run = matches!(epa.state(*from)?, State::Prefix { .. })
                        && child_count[from.index()] == 1;
                    if child_count[id.index()] != 1 || parent_is_run {
                        continue;
                    }
                    via
                }
            };

            let mut label = via.name().to_string();
            head_of.insert(id, id);
            let mut current = id;
            while child_count[current.index()] == 1 {
                // The counts come from the same transition table the index
                // is built from, so the unique child is always present.
                let next = epa
                    .outgoing(current)?
                    .next()
                    .map(|t| t.end)
                    .ok_or(EpaError::StateNotFound(current))?;
                if let State::Prefix { via, .. } = epa.state(next)? {
                    label.push_str(via.name());
                }
                head_of.insert(next, id);
                current = next;
            }
            label_of.insert(id, label);
        }

        Ok((head_of, label_of))
    }
}

impl<T: Ord + Clone> EpaFilter<T> for CompressionFilter {
    fn name(&self) -> &str {
        "compression"
    }

    fn apply(&self, epa: &ExtendedPrefixAutomaton<T>) -> Result<ExtendedPrefixAutomaton<T>> {
        let mut child_count = vec![0usize; epa.state_count()];
        for transition in epa.transitions() {
            child_count[transition.start.index()] += 1;
        }

        let (head_of, label_of) = Self::detect_runs(epa, &child_count)?;

        let mut old_to_new: HashMap<StateId, StateId> = HashMap::with_capacity(epa.state_count());
        // Hash-consing index of the new arena. A run's combined label can
        // collide with a sibling under the same predecessor; such states
        // merge into one, their event sets unioned, instead of producing two
        // arena slots with the same (predecessor, activity) pair.
        let mut consed: HashMap<(StateId, Activity), StateId> = HashMap::new();
        let mut states: Vec<State> = Vec::new();
        let mut partition_by_state: Vec<u32> = Vec::new();
        let mut sequence_by_state: Vec<Vec<Event<T>>> = Vec::new();
        let mut activities: Vec<Activity> = Vec::new();

        // Old ids are topologically ordered, so a run's head is rebuilt
        // before its members and every predecessor before its successors.
        for old in epa.state_ids() {
            let (parent, via) = match epa.state(old)? {
                State::Root => {
                    old_to_new.insert(old, StateId::from_index(states.len()));
                    states.push(State::Root);
                    partition_by_state.push(epa.partition(old)?);
                    sequence_by_state.push(epa.sequence(old)?.to_vec());
                    continue;
                }
                State::Prefix { from, via } => match head_of.get(&old) {
                    Some(&head) if head != old => {
                        // Mid-run: fold the events into the synthetic state.
                        let target = old_to_new[&head];
                        sequence_by_state[target.index()]
                            .extend(epa.sequence(old)?.iter().cloned());
                        old_to_new.insert(old, target);
                        continue;
                    }
                    Some(_) => (
                        old_to_new[from],
                        Activity::new(label_of[&old].as_str()),
                    ),
                    None => (old_to_new[from], via.clone()),
                },
            };

            let target = match consed.get(&(parent, via.clone())) {
                Some(&existing) => {
                    sequence_by_state[existing.index()]
                        .extend(epa.sequence(old)?.iter().cloned());
                    existing
                }
                None => {
                    let id = StateId::from_index(states.len());
                    consed.insert((parent, via.clone()), id);
                    activities.push(via.clone());
                    states.push(State::Prefix { from: parent, via });
                    partition_by_state.push(epa.partition(old)?);
                    sequence_by_state.push(epa.sequence(old)?.to_vec());
                    id
                }
            };
            old_to_new.insert(old, target);
        }

        // With runs spliced out, every surviving prefix state has exactly one
        // incoming transition, so the table falls out of the arena.
        let transitions: Vec<Transition> = states
            .iter()
            .enumerate()
            .filter_map(|(index, state)| match state {
                State::Root => None,
                State::Prefix { from, via } => Some(Transition::new(
                    *from,
                    via.clone(),
                    StateId::from_index(index),
                )),
            })
            .collect();

        Ok(ExtendedPrefixAutomaton::from_parts(
            epa.log_name().to_string(),
            states,
            activities,
            transitions,
            partition_by_state,
            sequence_by_state,
        ))
    }
}
