//! The identity filter.

use crate::automaton::ExtendedPrefixAutomaton;
use crate::error::Result;
use crate::features::filter::EpaFilter;

/// Returns the automaton unchanged.
///
/// Useful as a default in pipelines where the filter slot is mandatory.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpFilter;

impl NoOpFilter {
    /// Create the identity filter.
    pub fn new() -> Self {
        Self
    }
}

impl<T: Ord + Clone> EpaFilter<T> for NoOpFilter {
    fn name(&self) -> &str {
        "noop"
    }

    fn apply(&self, epa: &ExtendedPrefixAutomaton<T>) -> Result<ExtendedPrefixAutomaton<T>> {
        Ok(epa.clone())
    }
}
