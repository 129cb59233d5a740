//! Left-to-right filter composition.

use crate::automaton::ExtendedPrefixAutomaton;
use crate::error::Result;
use crate::features::filter::EpaFilter;

/// Applies a sequence of filters left to right.
///
/// Composition is not commutative: a frequency filter sees the frequencies of
/// whatever automaton the previous filter produced, not of the original.
pub struct CombinedFilter<T: Ord + Clone> {
    filters: Vec<Box<dyn EpaFilter<T>>>,
}

impl<T: Ord + Clone> CombinedFilter<T> {
    /// Compose the given filters in order.
    pub fn new(filters: Vec<Box<dyn EpaFilter<T>>>) -> Self {
        Self { filters }
    }
}

impl<T: Ord + Clone> EpaFilter<T> for CombinedFilter<T> {
    fn name(&self) -> &str {
        "combined"
    }

    fn apply(&self, epa: &ExtendedPrefixAutomaton<T>) -> Result<ExtendedPrefixAutomaton<T>> {
        let mut current = epa.clone();
        for filter in &self.filters {
            log::debug!("applying filter '{}'", filter.name());
            current = filter.apply(&current)?;
        }
        Ok(current)
    }
}

/// Compose filters left to right. Shorthand for [`CombinedFilter::new`].
pub fn combine<T: Ord + Clone>(filters: Vec<Box<dyn EpaFilter<T>>>) -> CombinedFilter<T> {
    CombinedFilter::new(filters)
}
