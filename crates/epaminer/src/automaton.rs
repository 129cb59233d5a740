//! The Extended Prefix Automaton container and its traversal drivers.

use std::collections::HashMap;
use std::ops::ControlFlow;

use once_cell::sync::OnceCell;

use crate::error::{EpaError, Result};
use crate::models::{Activity, Event, State, StateId, Transition, ROOT};
use crate::visitor::AutomatonVisitor;

/// An immutable, trie-shaped automaton over activity prefixes.
///
/// States live in an arena indexed by [`StateId`]; a hash-consing map from
/// `(predecessor, activity)` to id guarantees that equal prefixes share one
/// state. The partition and event-sequence tables are total over the arena.
/// Once built, an automaton is only ever read or rewritten wholesale by a
/// filter; reading from multiple threads is safe as long as each traversal
/// uses its own visitor. The transitions-by-source index is memoized on first
/// traversal; force one traversal before fanning out across threads.
#[derive(Debug, Clone)]
pub struct ExtendedPrefixAutomaton<T> {
    log_name: String,
    states: Vec<State>,
    prefix_index: HashMap<(StateId, Activity), StateId>,
    activities: Vec<Activity>,
    transitions: Vec<Transition>,
    partition_by_state: Vec<u32>,
    sequence_by_state: Vec<Vec<Event<T>>>,
    outgoing: OnceCell<Vec<Vec<usize>>>,
}

impl<T: Ord> ExtendedPrefixAutomaton<T> {
    /// Assemble an automaton from finished parts.
    ///
    /// Callers (the builders and filters) must hand over parts that satisfy
    /// the structural invariants: the arena starts with the root, every
    /// prefix state's predecessor precedes it in the arena, and the partition
    /// and sequence tables are parallel to the arena. Activity and sequence
    /// order is normalized here so traversal order is deterministic.
    pub(crate) fn from_parts(
        log_name: String,
        states: Vec<State>,
        activities: Vec<Activity>,
        transitions: Vec<Transition>,
        partition_by_state: Vec<u32>,
        mut sequence_by_state: Vec<Vec<Event<T>>>,
    ) -> Self {
        debug_assert_eq!(states.len(), partition_by_state.len());
        debug_assert_eq!(states.len(), sequence_by_state.len());
        debug_assert!(matches!(states.first(), Some(State::Root)));

        let mut prefix_index = HashMap::with_capacity(states.len());
        for (index, state) in states.iter().enumerate() {
            if let State::Prefix { from, via } = state {
                prefix_index.insert((*from, via.clone()), StateId::from_index(index));
            }
        }

        let mut activities = activities;
        activities.sort();
        activities.dedup();

        for sequence in &mut sequence_by_state {
            sequence.sort_by(|a, b| {
                a.timestamp
                    .cmp(&b.timestamp)
                    .then_with(|| a.case_id.cmp(&b.case_id))
            });
        }

        Self {
            log_name,
            states,
            prefix_index,
            activities,
            transitions,
            partition_by_state,
            sequence_by_state,
            outgoing: OnceCell::new(),
        }
    }

    /// Name of the event log this automaton was built from.
    pub fn log_name(&self) -> &str {
        &self.log_name
    }

    /// Number of states, root included.
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// All state ids, root first.
    pub fn state_ids(&self) -> impl Iterator<Item = StateId> {
        (0..self.states.len()).map(StateId::from_index)
    }

    /// Look up a state by id.
    pub fn state(&self, id: StateId) -> Result<&State> {
        self.states.get(id.index()).ok_or(EpaError::StateNotFound(id))
    }

    /// The activity alphabet, sorted by name.
    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    /// All transitions.
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// The partition id assigned to a state. The root is always partition 0.
    pub fn partition(&self, id: StateId) -> Result<u32> {
        self.partition_by_state
            .get(id.index())
            .copied()
            .ok_or(EpaError::StateNotFound(id))
    }

    /// The events that terminated at a state, sorted by timestamp then case.
    pub fn sequence(&self, id: StateId) -> Result<&[Event<T>]> {
        self.sequence_by_state
            .get(id.index())
            .map(Vec::as_slice)
            .ok_or(EpaError::StateNotFound(id))
    }

    /// All distinct partition ids, ascending.
    pub fn all_partitions(&self) -> Vec<u32> {
        let mut partitions = self.partition_by_state.clone();
        partitions.sort_unstable();
        partitions.dedup();
        partitions
    }

    /// Total number of events across all states.
    pub fn total_events(&self) -> usize {
        self.sequence_by_state.iter().map(Vec::len).sum()
    }

    /// The state reached by taking `via` from `from`, if that prefix exists.
    pub fn resolve(&self, from: StateId, via: &Activity) -> Option<StateId> {
        self.prefix_index.get(&(from, via.clone())).copied()
    }

    /// Outgoing transitions of a state, sorted by activity name.
    pub fn outgoing(&self, id: StateId) -> Result<impl Iterator<Item = &Transition>> {
        let index = self.outgoing_index();
        let slots = index.get(id.index()).ok_or(EpaError::StateNotFound(id))?;
        Ok(slots.iter().map(move |&slot| &self.transitions[slot]))
    }

    /// The chain from `id` up to the root, both ends included.
    ///
    /// Walks the predecessor links iteratively, so arbitrarily long traces
    /// cannot exhaust the stack.
    pub fn path_to_root(&self, id: StateId) -> Result<Vec<StateId>> {
        let mut path = vec![id];
        let mut current = id;
        while let State::Prefix { from, .. } = self.state(current)? {
            path.push(*from);
            current = *from;
        }
        Ok(path)
    }

    /// Length of a state's prefix, i.e. its depth below the root.
    pub fn depth(&self, id: StateId) -> Result<usize> {
        Ok(self.path_to_root(id)?.len() - 1)
    }

    /// Traverse depth-first in pre-order, feeding the visitor.
    ///
    /// Per state the order is: the state, its events, then for each outgoing
    /// transition the transition followed by its whole subtree. The driver
    /// uses an explicit stack, so traversal depth is not bounded by the call
    /// stack. Returns [`ControlFlow::Break`] if the visitor's progress
    /// callback cancelled the traversal; `on_end` only fires on completion.
    pub fn accept_depth_first<V: AutomatonVisitor<T>>(&self, visitor: &mut V) -> ControlFlow<()> {
        enum Task {
            Enter(StateId, usize),
            Edge(usize, usize),
        }

        visitor.on_start(self);

        let total = self.states.len() as u64;
        let mut visited = 0u64;
        let mut stack = vec![Task::Enter(ROOT, 0)];

        while let Some(task) = stack.pop() {
            match task {
                Task::Enter(state, depth) => {
                    visitor.visit_state(self, state, depth);
                    visited += 1;
                    visitor.on_progress(visited, total)?;

                    for event in &self.sequence_by_state[state.index()] {
                        visitor.visit_event(self, event, depth);
                    }
                    // Reverse push so the lexicographically first edge is
                    // expanded first, matching recursive pre-order.
                    for &slot in self.outgoing_index()[state.index()].iter().rev() {
                        stack.push(Task::Edge(slot, depth));
                    }
                }
                Task::Edge(slot, depth) => {
                    let transition = &self.transitions[slot];
                    visitor.visit_transition(self, transition, depth);
                    stack.push(Task::Enter(transition.end, depth + 1));
                }
            }
        }

        visitor.on_end(self);
        ControlFlow::Continue(())
    }

    /// Traverse breadth-first, feeding the visitor.
    ///
    /// Per dequeued state the visit order matches the depth-first driver:
    /// state, events, transitions; children are enqueued at depth + 1.
    pub fn accept_breadth_first<V: AutomatonVisitor<T>>(&self, visitor: &mut V) -> ControlFlow<()> {
        use std::collections::VecDeque;

        visitor.on_start(self);

        let total = self.states.len() as u64;
        let mut visited = 0u64;
        let mut queue = VecDeque::with_capacity(self.states.len() / 2 + 1);
        queue.push_back((ROOT, 0usize));

        while let Some((state, depth)) = queue.pop_front() {
            visitor.visit_state(self, state, depth);
            visited += 1;
            visitor.on_progress(visited, total)?;

            for event in &self.sequence_by_state[state.index()] {
                visitor.visit_event(self, event, depth);
            }
            for &slot in &self.outgoing_index()[state.index()] {
                let transition = &self.transitions[slot];
                visitor.visit_transition(self, transition, depth);
                queue.push_back((transition.end, depth + 1));
            }
        }

        visitor.on_end(self);
        ControlFlow::Continue(())
    }

    /// Transitions grouped by source state, built on first use.
    fn outgoing_index(&self) -> &Vec<Vec<usize>> {
        self.outgoing.get_or_init(|| {
            let mut index = vec![Vec::new(); self.states.len()];
            for (slot, transition) in self.transitions.iter().enumerate() {
                index[transition.start.index()].push(slot);
            }
            for slots in &mut index {
                slots.sort_by(|&a, &b| {
                    self.transitions[a]
                        .activity
                        .name()
                        .cmp(self.transitions[b].activity.name())
                });
            }
            index
        })
    }
}

impl<T: PartialEq> PartialEq for ExtendedPrefixAutomaton<T> {
    fn eq(&self, other: &Self) -> bool {
        // The memoized outgoing index is derived data and excluded.
        self.log_name == other.log_name
            && self.states == other.states
            && self.activities == other.activities
            && self.transitions == other.transitions
            && self.partition_by_state == other.partition_by_state
            && self.sequence_by_state == other.sequence_by_state
    }
}

impl<T: Eq> Eq for ExtendedPrefixAutomaton<T> {}
