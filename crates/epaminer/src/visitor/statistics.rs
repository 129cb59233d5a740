//! Aggregate statistics over an automaton.

use std::collections::{HashMap, HashSet};
use std::fmt::Write as _;

use crate::automaton::ExtendedPrefixAutomaton;
use crate::error::{EpaError, Result};
use crate::models::{Activity, Event, StateId, Transition};
use crate::visitor::AutomatonVisitor;

/// Aggregated counts and frequencies of one automaton.
#[derive(Debug, Clone)]
pub struct Statistics<T> {
    /// Total number of events.
    pub event_count: usize,
    /// Number of distinct cases.
    pub case_count: usize,
    /// Number of distinct activities observed in events.
    pub activity_count: usize,
    /// Number of states, root included.
    pub state_count: usize,
    /// Number of transitions.
    pub transition_count: usize,
    /// Number of partitions, the root partition excluded.
    pub partition_count: usize,
    /// Event count per activity.
    pub activity_frequency: HashMap<Activity, usize>,
    /// Earliest and latest event timestamp, if any events exist.
    pub interval: Option<(T, T)>,
}

impl<T> Statistics<T> {
    /// A human-readable summary, activities sorted by descending frequency.
    pub fn report(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Automaton statistics:");
        let _ = writeln!(out, "  Events:      {}", self.event_count);
        let _ = writeln!(out, "  Cases:       {}", self.case_count);
        let _ = writeln!(out, "  Activities:  {}", self.activity_count);
        let _ = writeln!(out, "  Partitions:  {}", self.partition_count);
        let _ = writeln!(out, "  States:      {}", self.state_count);
        let _ = writeln!(out, "  Transitions: {}", self.transition_count);

        let mut by_frequency: Vec<(&Activity, usize)> = self
            .activity_frequency
            .iter()
            .map(|(a, &n)| (a, n))
            .collect();
        by_frequency.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

        let _ = writeln!(out, "  Activity frequency:");
        for (activity, count) in by_frequency {
            let share = if self.event_count == 0 {
                0.0
            } else {
                count as f64 / self.event_count as f64 * 100.0
            };
            let _ = writeln!(out, "    {}: {:.1}% ({})", activity.name(), share, count);
        }
        out
    }
}

/// Collects [`Statistics`] in one full traversal.
#[derive(Debug, Default)]
pub struct StatisticsVisitor<T> {
    visited_states: HashSet<StateId>,
    transition_count: usize,
    event_count: usize,
    cases: HashSet<String>,
    activity_frequency: HashMap<Activity, usize>,
    partition_count: usize,
    first: Option<T>,
    last: Option<T>,
    finished: bool,
}

impl<T: Ord + Clone> StatisticsVisitor<T> {
    /// Create an unused visitor.
    pub fn new() -> Self {
        Self {
            visited_states: HashSet::new(),
            transition_count: 0,
            event_count: 0,
            cases: HashSet::new(),
            activity_frequency: HashMap::new(),
            partition_count: 0,
            first: None,
            last: None,
            finished: false,
        }
    }

    /// Consume the visitor into the collected statistics.
    ///
    /// Fails with [`EpaError::AnalysisIncomplete`] if no traversal ran to
    /// completion.
    pub fn build(self) -> Result<Statistics<T>> {
        if !self.finished {
            return Err(EpaError::AnalysisIncomplete);
        }

        Ok(Statistics {
            event_count: self.event_count,
            case_count: self.cases.len(),
            activity_count: self.activity_frequency.len(),
            state_count: self.visited_states.len(),
            transition_count: self.transition_count,
            partition_count: self.partition_count,
            activity_frequency: self.activity_frequency,
            interval: self.first.zip(self.last),
        })
    }
}

impl<T: Ord + Clone> AutomatonVisitor<T> for StatisticsVisitor<T> {
    fn visit_state(&mut self, _epa: &ExtendedPrefixAutomaton<T>, state: StateId, _depth: usize) {
        self.visited_states.insert(state);
    }

    fn visit_transition(
        &mut self,
        _epa: &ExtendedPrefixAutomaton<T>,
        _transition: &Transition,
        _depth: usize,
    ) {
        self.transition_count += 1;
    }

    fn visit_event(&mut self, _epa: &ExtendedPrefixAutomaton<T>, event: &Event<T>, _depth: usize) {
        self.event_count += 1;
        self.cases.insert(event.case_id.clone());
        *self
            .activity_frequency
            .entry(event.activity.clone())
            .or_insert(0) += 1;

        match &self.first {
            Some(first) if *first <= event.timestamp => {}
            _ => self.first = Some(event.timestamp.clone()),
        }
        match &self.last {
            Some(last) if *last >= event.timestamp => {}
            _ => self.last = Some(event.timestamp.clone()),
        }
    }

    fn on_end(&mut self, epa: &ExtendedPrefixAutomaton<T>) {
        // Partition 0 holds only the root and is not counted.
        self.partition_count = epa.all_partitions().len().saturating_sub(1);
        self.finished = true;
    }
}
