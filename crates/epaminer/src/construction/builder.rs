//! Single-pass construction of an automaton from a sorted event stream.

use std::collections::HashMap;

use crate::automaton::ExtendedPrefixAutomaton;
use crate::error::{EpaError, Result};
use crate::models::{Activity, Event, State, StateId, Transition, ROOT};

use super::EventLogMapper;

/// Builds an [`ExtendedPrefixAutomaton`] from a chronologically sorted event
/// stream in one forward pass.
///
/// The input must be sorted globally by timestamp with per-case order
/// non-decreasing; that contract belongs to the [`EventLogMapper`] and is not
/// re-checked here. Configuration is validated before any event is consumed.
#[derive(Debug, Default)]
pub struct ExtendedPrefixAutomatonBuilder<T> {
    log_name: Option<String>,
    events: Option<Vec<Event<T>>>,
}

/// All bookkeeping of the single pass, in one place.
///
/// `prefix_index` doubles as the transition dedup key: a `(state, activity)`
/// pair has a transition exactly when it has a hash-consed successor state.
struct BuilderState<T> {
    states: Vec<State>,
    activities: Vec<Activity>,
    transitions: Vec<Transition>,
    partition_by_state: Vec<u32>,
    sequence_by_state: Vec<Vec<Event<T>>>,
    prefix_index: HashMap<(StateId, Activity), StateId>,
    has_outgoing: Vec<bool>,
    last_state_by_case: HashMap<String, StateId>,
    next_partition: u32,
}

impl<T> BuilderState<T> {
    fn new() -> Self {
        Self {
            states: vec![State::Root],
            activities: Vec::new(),
            transitions: Vec::new(),
            partition_by_state: vec![0],
            sequence_by_state: vec![Vec::new()],
            prefix_index: HashMap::new(),
            has_outgoing: vec![false],
            last_state_by_case: HashMap::new(),
            next_partition: 1,
        }
    }

    /// Mint a new state and transition for a prefix never seen before.
    fn extend(&mut self, predecessor: StateId, activity: Activity) -> StateId {
        let partition = if self.has_outgoing[predecessor.index()] {
            // The predecessor branches: every branch beyond the first opens
            // a fresh, globally unique partition.
            self.next_partition += 1;
            self.next_partition
        } else if predecessor == ROOT {
            1
        } else {
            self.partition_by_state[predecessor.index()]
        };

        let id = StateId::from_index(self.states.len());
        self.states.push(State::Prefix {
            from: predecessor,
            via: activity.clone(),
        });
        self.partition_by_state.push(partition);
        self.sequence_by_state.push(Vec::new());
        self.has_outgoing.push(false);
        self.has_outgoing[predecessor.index()] = true;
        self.transitions
            .push(Transition::new(predecessor, activity.clone(), id));
        self.prefix_index.insert((predecessor, activity.clone()), id);
        self.activities.push(activity);
        id
    }
}

impl<T: Ord> ExtendedPrefixAutomatonBuilder<T> {
    /// Create an unconfigured builder.
    pub fn new() -> Self {
        Self {
            log_name: None,
            events: None,
        }
    }

    /// Set the event log name.
    pub fn with_log_name(mut self, name: impl Into<String>) -> Self {
        self.log_name = Some(name.into());
        self
    }

    /// Set the pre-mapped, chronologically sorted event stream.
    pub fn with_events(mut self, events: Vec<Event<T>>) -> Self {
        self.events = Some(events);
        self
    }

    /// Pull events from a mapper. The mapper's name becomes the log name
    /// unless one was set explicitly.
    pub fn with_mapper(mut self, mapper: &mut dyn EventLogMapper<T>) -> Result<Self> {
        if self.log_name.is_none() {
            self.log_name = Some(mapper.name().to_string());
        }
        self.events = Some(mapper.events()?);
        Ok(self)
    }

    /// Run the single pass and return the finished automaton.
    ///
    /// Fails with [`EpaError::MissingConfiguration`] before consuming any
    /// event if the log name or the event stream is unset.
    pub fn build(self) -> Result<ExtendedPrefixAutomaton<T>> {
        let log_name = self
            .log_name
            .ok_or(EpaError::MissingConfiguration("log name"))?;
        let events = self
            .events
            .ok_or(EpaError::MissingConfiguration("events"))?;

        let event_count = events.len();
        let mut state = BuilderState::new();
        for event in events {
            let predecessor = state
                .last_state_by_case
                .get(&event.case_id)
                .copied()
                .unwrap_or(ROOT);

            let key = (predecessor, event.activity.clone());
            let current = match state.prefix_index.get(&key) {
                // Prefix sharing: another case already walked this edge.
                Some(&existing) => existing,
                None => state.extend(predecessor, event.activity.clone()),
            };

            let case_id = event.case_id.clone();
            state.sequence_by_state[current.index()].push(event);
            state.last_state_by_case.insert(case_id, current);
        }

        let partitions = state.partition_by_state.iter().copied().max().unwrap_or(0);
        log::info!(
            "built automaton '{}': {} events, {} states, {} transitions, {} partitions",
            log_name,
            event_count,
            state.states.len(),
            state.transitions.len(),
            partitions,
        );

        Ok(ExtendedPrefixAutomaton::from_parts(
            log_name,
            state.states,
            state.activities,
            state.transitions,
            state.partition_by_state,
            state.sequence_by_state,
        ))
    }
}
