//! Partition spread per tree depth.

use std::collections::{BTreeMap, HashSet};

use crate::automaton::ExtendedPrefixAutomaton;
use crate::error::{EpaError, Result};
use crate::models::StateId;
use crate::visitor::AutomatonVisitor;

/// Counts the distinct partitions present at every depth of the prefix tree.
///
/// Useful to gauge how quickly an automaton fans out: a depth with many
/// partitions is dominated by branch points.
#[derive(Debug, Default)]
pub struct PartitionsAtDepthVisitor {
    partitions_by_depth: BTreeMap<usize, HashSet<u32>>,
    finished: bool,
}

impl PartitionsAtDepthVisitor {
    /// Create an unused visitor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the visitor into a depth-to-partition-count map.
    ///
    /// Fails with [`EpaError::AnalysisIncomplete`] if no traversal ran to
    /// completion.
    pub fn build(self) -> Result<BTreeMap<usize, usize>> {
        if !self.finished {
            return Err(EpaError::AnalysisIncomplete);
        }
        Ok(self
            .partitions_by_depth
            .into_iter()
            .map(|(depth, partitions)| (depth, partitions.len()))
            .collect())
    }
}

impl<T: Ord> AutomatonVisitor<T> for PartitionsAtDepthVisitor {
    fn visit_state(&mut self, epa: &ExtendedPrefixAutomaton<T>, state: StateId, depth: usize) {
        if let Ok(partition) = epa.partition(state) {
            self.partitions_by_depth
                .entry(depth)
                .or_default()
                .insert(partition);
        }
    }

    fn on_end(&mut self, _epa: &ExtendedPrefixAutomaton<T>) {
        self.finished = true;
    }
}

/// State and distinct-partition counts of one tree depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthCounts {
    /// Number of states at this depth.
    pub states: usize,
    /// Number of distinct partitions present at this depth.
    pub partitions: usize,
}

/// Counts states and distinct partitions per depth in one traversal.
///
/// The widening of the state count against the partition count shows where
/// the prefix tree fans out inside existing runs versus where it opens new
/// branches.
#[derive(Debug, Default)]
pub struct StatesAndPartitionsByDepthVisitor {
    states_by_depth: BTreeMap<usize, usize>,
    partitions_by_depth: BTreeMap<usize, HashSet<u32>>,
    finished: bool,
}

impl StatesAndPartitionsByDepthVisitor {
    /// Create an unused visitor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the visitor into a depth-to-counts map.
    ///
    /// Fails with [`EpaError::AnalysisIncomplete`] if no traversal ran to
    /// completion.
    pub fn build(self) -> Result<BTreeMap<usize, DepthCounts>> {
        if !self.finished {
            return Err(EpaError::AnalysisIncomplete);
        }
        let partitions_by_depth = self.partitions_by_depth;
        Ok(self
            .states_by_depth
            .into_iter()
            .map(|(depth, states)| {
                let partitions = partitions_by_depth
                    .get(&depth)
                    .map(HashSet::len)
                    .unwrap_or(0);
                (depth, DepthCounts { states, partitions })
            })
            .collect())
    }
}

impl<T: Ord> AutomatonVisitor<T> for StatesAndPartitionsByDepthVisitor {
    fn visit_state(&mut self, epa: &ExtendedPrefixAutomaton<T>, state: StateId, depth: usize) {
        *self.states_by_depth.entry(depth).or_insert(0) += 1;
        if let Ok(partition) = epa.partition(state) {
            self.partitions_by_depth
                .entry(depth)
                .or_default()
                .insert(partition);
        }
    }

    fn on_end(&mut self, _epa: &ExtendedPrefixAutomaton<T>) {
        self.finished = true;
    }
}
