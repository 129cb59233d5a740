//! Error types for automaton construction, traversal, and filtering.

use crate::models::StateId;
use thiserror::Error;

/// Result type for automaton operations.
pub type Result<T> = std::result::Result<T, EpaError>;

/// Errors that can occur while building, querying, or filtering an
/// Extended Prefix Automaton.
#[derive(Error, Debug)]
pub enum EpaError {
    /// A builder was asked to build before all required configuration was set.
    #[error("builder configuration incomplete: {0} missing")]
    MissingConfiguration(&'static str),

    /// A state id was looked up that is not part of this automaton. States
    /// from one automaton are not valid in another; filters hand out fresh ids.
    #[error("state {0:?} is not part of this automaton")]
    StateNotFound(StateId),

    /// A partition id was looked up that no state of this automaton carries.
    #[error("partition {0} is not part of this automaton")]
    PartitionNotFound(u32),

    /// An analyzer was queried before its traversal completed.
    #[error("analysis queried before the traversal finished")]
    AnalysisIncomplete,

    /// A component set handed to the components builder cannot form a valid
    /// automaton (root missing, or a retained state misses its predecessor).
    #[error("invalid component set: {0}")]
    InvalidComponents(String),
}
