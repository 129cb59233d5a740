//! Filtering by normalized event frequency.

use std::collections::HashSet;

use crate::automaton::ExtendedPrefixAutomaton;
use crate::construction::EpaComponentsBuilder;
use crate::error::Result;
use crate::features::filter::EpaFilter;
use crate::models::StateId;
use crate::visitor::{NormalizedPartitionFrequencyVisitor, NormalizedStateFrequencyVisitor};

/// Keeps the states whose normalized event frequency reaches a threshold.
///
/// Frequencies are measured on the input automaton. The root is always kept;
/// states that pass the threshold but lose their connection to the root are
/// pruned with their whole dangling subtree.
#[derive(Debug, Clone)]
pub struct StateFrequencyFilter {
    threshold: f64,
}

impl StateFrequencyFilter {
    /// Keep states with frequency of at least `threshold`, in `[0.0, 1.0]`.
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }
}

impl<T: Ord + Clone> EpaFilter<T> for StateFrequencyFilter {
    fn name(&self) -> &str {
        "state-frequency"
    }

    fn apply(&self, epa: &ExtendedPrefixAutomaton<T>) -> Result<ExtendedPrefixAutomaton<T>> {
        let mut visitor = NormalizedStateFrequencyVisitor::new();
        let _ = epa.accept_depth_first(&mut visitor);
        let frequency = visitor.build()?;

        let mut kept = HashSet::new();
        for id in epa.state_ids() {
            if id.is_root() || frequency.frequency(id)? >= self.threshold {
                kept.insert(id);
            }
        }

        EpaComponentsBuilder::from_existing(epa)
            .retain_states(kept)
            .build()
    }
}

/// Keeps the states of partitions whose normalized event frequency reaches a
/// threshold.
///
/// A partition's frequency is the sum over its states. The root partition is
/// always kept; dangling subtrees of surviving partitions are pruned.
#[derive(Debug, Clone)]
pub struct PartitionFrequencyFilter {
    threshold: f64,
}

impl PartitionFrequencyFilter {
    /// Keep partitions with frequency of at least `threshold`, in
    /// `[0.0, 1.0]`.
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }
}

impl<T: Ord + Clone> EpaFilter<T> for PartitionFrequencyFilter {
    fn name(&self) -> &str {
        "partition-frequency"
    }

    fn apply(&self, epa: &ExtendedPrefixAutomaton<T>) -> Result<ExtendedPrefixAutomaton<T>> {
        let mut visitor = NormalizedPartitionFrequencyVisitor::new();
        let _ = epa.accept_depth_first(&mut visitor);
        let frequency = visitor.build()?;

        let mut kept: HashSet<StateId> = HashSet::new();
        for id in epa.state_ids() {
            let partition = epa.partition(id)?;
            if partition == 0 || frequency.frequency(partition)? >= self.threshold {
                kept.insert(id);
            }
        }

        EpaComponentsBuilder::from_existing(epa)
            .retain_states(kept)
            .build()
    }
}
