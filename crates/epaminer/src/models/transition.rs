//! Transitions between states.

use super::{Activity, StateId};

/// A directed, activity-labeled edge of the automaton.
///
/// `end` is always the prefix state whose predecessor is `start` and whose
/// extending activity is `activity`; a transition carries no information of
/// its own beyond making the edge set explicit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// Origin state.
    pub start: StateId,
    /// Activity label of the edge.
    pub activity: Activity,
    /// Destination state.
    pub end: StateId,
}

impl Transition {
    /// Create a transition.
    pub fn new(start: StateId, activity: Activity, end: StateId) -> Self {
        Self {
            start,
            activity,
            end,
        }
    }
}
