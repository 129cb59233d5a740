//! Composable automaton filters.
//!
//! A filter is a pure function from one automaton to a new one; the input is
//! never mutated. Every filter preserves the structural invariants via
//! [`EpaComponentsBuilder`](crate::construction::EpaComponentsBuilder): the
//! root survives, no state is left without its predecessor chain, and
//! partition ids are inherited rather than recomputed. Filters compose with
//! [`combine`]; composition is ordinary function composition and therefore
//! order-sensitive.

mod activity;
mod combined;
mod compression;
mod frequency;
mod noop;

pub use activity::ActivityFilter;
pub use combined::{combine, CombinedFilter};
pub use compression::CompressionFilter;
pub use frequency::{PartitionFrequencyFilter, StateFrequencyFilter};
pub use noop::NoOpFilter;

use crate::automaton::ExtendedPrefixAutomaton;
use crate::error::Result;

/// A pure automaton-to-automaton transformation.
pub trait EpaFilter<T: Ord + Clone> {
    /// Human-readable name, used in log output.
    fn name(&self) -> &str;

    /// Produce the filtered automaton. The input is left untouched.
    fn apply(&self, epa: &ExtendedPrefixAutomaton<T>) -> Result<ExtendedPrefixAutomaton<T>>;
}
