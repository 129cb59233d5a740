//! High-level entry points combining construction, filtering, and analysis.

use crate::automaton::ExtendedPrefixAutomaton;
use crate::error::Result;
use crate::features::filter::EpaFilter;
use crate::visitor::{
    NormalizedPartitionFrequency, NormalizedPartitionFrequencyVisitor, NormalizedStateFrequency,
    NormalizedStateFrequencyVisitor, Statistics, StatisticsVisitor,
};

/// Facade over the common build-filter-analyze workflows.
///
/// Stateless; every method takes the automaton it operates on.
#[derive(Debug, Default, Clone, Copy)]
pub struct EpaService;

impl EpaService {
    /// Create the service.
    pub fn new() -> Self {
        Self
    }

    /// Apply filters left to right, logging each step.
    pub fn apply_filters<T: Ord + Clone>(
        &self,
        epa: &ExtendedPrefixAutomaton<T>,
        filters: &[Box<dyn EpaFilter<T>>],
    ) -> Result<ExtendedPrefixAutomaton<T>> {
        let mut current = epa.clone();
        for filter in filters {
            let before = current.state_count();
            current = filter.apply(&current)?;
            log::info!(
                "filter '{}' on '{}': {} -> {} states",
                filter.name(),
                current.log_name(),
                before,
                current.state_count()
            );
        }
        Ok(current)
    }

    /// Collect summary statistics in one depth-first traversal.
    pub fn statistics<T: Ord + Clone>(
        &self,
        epa: &ExtendedPrefixAutomaton<T>,
    ) -> Result<Statistics<T>> {
        let mut visitor = StatisticsVisitor::new();
        let _ = epa.accept_depth_first(&mut visitor);
        visitor.build()
    }

    /// Compute normalized per-state event frequencies.
    pub fn state_frequency<T: Ord>(
        &self,
        epa: &ExtendedPrefixAutomaton<T>,
    ) -> Result<NormalizedStateFrequency> {
        let mut visitor = NormalizedStateFrequencyVisitor::new();
        let _ = epa.accept_depth_first(&mut visitor);
        visitor.build()
    }

    /// Compute normalized per-partition event frequencies.
    pub fn partition_frequency<T: Ord>(
        &self,
        epa: &ExtendedPrefixAutomaton<T>,
    ) -> Result<NormalizedPartitionFrequency> {
        let mut visitor = NormalizedPartitionFrequencyVisitor::new();
        let _ = epa.accept_depth_first(&mut visitor);
        visitor.build()
    }
}
