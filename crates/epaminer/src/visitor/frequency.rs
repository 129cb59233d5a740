//! Normalized event-frequency analyzers for states and partitions.

use std::collections::HashMap;

use crate::automaton::ExtendedPrefixAutomaton;
use crate::error::{EpaError, Result};
use crate::models::StateId;
use crate::visitor::AutomatonVisitor;

/// Normalized per-state event frequencies of one automaton.
#[derive(Debug, Clone)]
pub struct NormalizedStateFrequency {
    frequency_by_state: HashMap<StateId, f64>,
}

impl NormalizedStateFrequency {
    /// The normalized frequency of a state, in `[0.0, 1.0]`.
    pub fn frequency(&self, state: StateId) -> Result<f64> {
        self.frequency_by_state
            .get(&state)
            .copied()
            .ok_or(EpaError::StateNotFound(state))
    }

    /// Minimum frequency across all states.
    pub fn min(&self) -> f64 {
        self.frequency_by_state
            .values()
            .copied()
            .fold(f64::INFINITY, f64::min)
    }

    /// Maximum frequency across all states.
    pub fn max(&self) -> f64 {
        self.frequency_by_state
            .values()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }
}

/// Computes the normalized event frequency of every state in one traversal.
///
/// A state's frequency is the number of events terminating at it divided by
/// the total event count; the root is fixed at 1.0. The visitor must complete
/// one full traversal before [`build`](Self::build) succeeds.
#[derive(Debug, Default)]
pub struct NormalizedStateFrequencyVisitor {
    events_by_state: HashMap<StateId, usize>,
    finished: bool,
}

impl NormalizedStateFrequencyVisitor {
    /// Create an unused visitor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the visitor into the frequency lookup.
    ///
    /// Fails with [`EpaError::AnalysisIncomplete`] if no traversal ran to
    /// completion.
    pub fn build(self) -> Result<NormalizedStateFrequency> {
        if !self.finished {
            return Err(EpaError::AnalysisIncomplete);
        }

        let total: usize = self.events_by_state.values().sum();
        let frequency_by_state = self
            .events_by_state
            .iter()
            .map(|(&state, &count)| {
                let frequency = if state.is_root() {
                    1.0
                } else if total == 0 {
                    0.0
                } else {
                    count as f64 / total as f64
                };
                (state, frequency)
            })
            .collect();

        Ok(NormalizedStateFrequency { frequency_by_state })
    }
}

impl<T: Ord> AutomatonVisitor<T> for NormalizedStateFrequencyVisitor {
    fn visit_state(&mut self, epa: &ExtendedPrefixAutomaton<T>, state: StateId, _depth: usize) {
        let count = epa.sequence(state).map(<[_]>::len).unwrap_or(0);
        self.events_by_state.insert(state, count);
    }

    fn on_end(&mut self, _epa: &ExtendedPrefixAutomaton<T>) {
        self.finished = true;
    }
}

/// Normalized per-partition event frequencies of one automaton.
#[derive(Debug, Clone)]
pub struct NormalizedPartitionFrequency {
    frequency_by_partition: HashMap<u32, f64>,
}

impl NormalizedPartitionFrequency {
    /// The normalized frequency of a partition, in `[0.0, 1.0]`.
    pub fn frequency(&self, partition: u32) -> Result<f64> {
        self.frequency_by_partition
            .get(&partition)
            .copied()
            .ok_or(EpaError::PartitionNotFound(partition))
    }

    /// Minimum frequency across all partitions.
    pub fn min(&self) -> f64 {
        self.frequency_by_partition
            .values()
            .copied()
            .fold(f64::INFINITY, f64::min)
    }

    /// Maximum frequency across all partitions.
    pub fn max(&self) -> f64 {
        self.frequency_by_partition
            .values()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Partition ids ordered from highest to lowest frequency.
    pub fn sorted_descending(&self) -> Vec<u32> {
        let mut partitions: Vec<(u32, f64)> = self
            .frequency_by_partition
            .iter()
            .map(|(&p, &f)| (p, f))
            .collect();
        partitions.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        partitions.into_iter().map(|(p, _)| p).collect()
    }
}

/// Computes the normalized event frequency of every partition in one
/// traversal: the events of all states sharing a partition, divided by the
/// total event count.
#[derive(Debug, Default)]
pub struct NormalizedPartitionFrequencyVisitor {
    events_by_partition: HashMap<u32, usize>,
    total_events: usize,
    finished: bool,
}

impl NormalizedPartitionFrequencyVisitor {
    /// Create an unused visitor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the visitor into the frequency lookup.
    ///
    /// Fails with [`EpaError::AnalysisIncomplete`] if no traversal ran to
    /// completion.
    pub fn build(self) -> Result<NormalizedPartitionFrequency> {
        if !self.finished {
            return Err(EpaError::AnalysisIncomplete);
        }

        let total = self.total_events;
        let frequency_by_partition = self
            .events_by_partition
            .iter()
            .map(|(&partition, &count)| {
                let frequency = if total == 0 {
                    0.0
                } else {
                    count as f64 / total as f64
                };
                (partition, frequency)
            })
            .collect();

        Ok(NormalizedPartitionFrequency {
            frequency_by_partition,
        })
    }
}

impl<T: Ord> AutomatonVisitor<T> for NormalizedPartitionFrequencyVisitor {
    fn visit_state(&mut self, epa: &ExtendedPrefixAutomaton<T>, state: StateId, _depth: usize) {
        let count = epa.sequence(state).map(<[_]>::len).unwrap_or(0);
        if let Ok(partition) = epa.partition(state) {
            *self.events_by_partition.entry(partition).or_insert(0) += count;
            self.total_events += count;
        }
    }

    fn on_end(&mut self, _epa: &ExtendedPrefixAutomaton<T>) {
        self.finished = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::construction::ExtendedPrefixAutomatonBuilder;
    use crate::models::{Activity, Event, ROOT};

    fn two_case_epa() -> ExtendedPrefixAutomaton<u64> {
        let a = Activity::new("a");
        let b = Activity::new("b");
        ExtendedPrefixAutomatonBuilder::new()
            .with_log_name("two-cases")
            .with_events(vec![
                Event::new(a.clone(), 1, "A"),
                Event::new(a, 2, "B"),
                Event::new(b.clone(), 3, "A"),
                Event::new(b, 4, "B"),
                Event::new(Activity::new("c"), 5, "A"),
                Event::new(Activity::new("d"), 6, "B"),
            ])
            .build()
            .unwrap()
    }

    #[test]
    fn test_state_frequencies_of_worked_example() {
        let epa = two_case_epa();
        let mut visitor = NormalizedStateFrequencyVisitor::new();
        let _ = epa.accept_depth_first(&mut visitor);
        let frequency = visitor.build().unwrap();

        let s_a = epa.resolve(ROOT, &Activity::new("a")).unwrap();
        let s_ab = epa.resolve(s_a, &Activity::new("b")).unwrap();
        let s_abc = epa.resolve(s_ab, &Activity::new("c")).unwrap();

        assert_eq!(frequency.frequency(ROOT).unwrap(), 1.0);
        assert!((frequency.frequency(s_a).unwrap() - 2.0 / 6.0).abs() < 1e-12);
        assert!((frequency.frequency(s_abc).unwrap() - 1.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_partition_frequencies_of_worked_example() {
        let epa = two_case_epa();
        let mut visitor = NormalizedPartitionFrequencyVisitor::new();
        let _ = epa.accept_depth_first(&mut visitor);
        let frequency = visitor.build().unwrap();

        assert!((frequency.frequency(1).unwrap() - 5.0 / 6.0).abs() < 1e-12);
        assert!((frequency.frequency(2).unwrap() - 1.0 / 6.0).abs() < 1e-12);
        assert_eq!(frequency.frequency(0).unwrap(), 0.0);
        assert_eq!(frequency.sorted_descending(), vec![1, 2, 0]);
    }

    #[test]
    fn test_query_before_traversal_is_a_usage_error() {
        let visitor = NormalizedStateFrequencyVisitor::new();
        assert!(matches!(
            visitor.build(),
            Err(EpaError::AnalysisIncomplete)
        ));

        let visitor = NormalizedPartitionFrequencyVisitor::new();
        assert!(matches!(
            visitor.build(),
            Err(EpaError::AnalysisIncomplete)
        ));
    }

    #[test]
    fn test_unknown_partition_lookup_fails() {
        let epa = two_case_epa();
        let mut visitor = NormalizedPartitionFrequencyVisitor::new();
        let _ = epa.accept_breadth_first(&mut visitor);
        let frequency = visitor.build().unwrap();
        assert!(matches!(
            frequency.frequency(99),
            Err(EpaError::PartitionNotFound(99))
        ));
    }
}
