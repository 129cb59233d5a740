//! Visitor protocol for automaton traversal, and the analyzers built on it.
//!
//! A visitor receives the automaton's states, events, and transitions in the
//! canonical order of [`ExtendedPrefixAutomaton::accept_depth_first`] or
//! [`ExtendedPrefixAutomaton::accept_breadth_first`]. Visitors are stateful,
//! single-use, and not thread-safe; run one visitor per traversal.

mod depth;
mod frequency;
mod statistics;

pub use depth::{DepthCounts, PartitionsAtDepthVisitor, StatesAndPartitionsByDepthVisitor};
pub use frequency::{
    NormalizedPartitionFrequency, NormalizedPartitionFrequencyVisitor, NormalizedStateFrequency,
    NormalizedStateFrequencyVisitor,
};
pub use statistics::{Statistics, StatisticsVisitor};

use std::ops::ControlFlow;

use crate::automaton::ExtendedPrefixAutomaton;
use crate::models::{Event, StateId, Transition};

/// Callbacks invoked by the traversal drivers.
///
/// All methods are optional. Per state the drivers call [`visit_state`],
/// then [`visit_event`] for each of the state's events, then
/// [`visit_transition`] for each outgoing transition before descending or
/// enqueuing its end state.
///
/// [`visit_state`]: AutomatonVisitor::visit_state
/// [`visit_event`]: AutomatonVisitor::visit_event
/// [`visit_transition`]: AutomatonVisitor::visit_transition
pub trait AutomatonVisitor<T: Ord> {
    /// Called once before the traversal starts.
    fn on_start(&mut self, _epa: &ExtendedPrefixAutomaton<T>) {}

    /// Called once after the traversal completed. Not called if the
    /// traversal was cancelled through [`on_progress`].
    ///
    /// [`on_progress`]: AutomatonVisitor::on_progress
    fn on_end(&mut self, _epa: &ExtendedPrefixAutomaton<T>) {}

    /// Called for every state.
    fn visit_state(&mut self, _epa: &ExtendedPrefixAutomaton<T>, _state: StateId, _depth: usize) {}

    /// Called for every outgoing transition of the current state.
    fn visit_transition(
        &mut self,
        _epa: &ExtendedPrefixAutomaton<T>,
        _transition: &Transition,
        _depth: usize,
    ) {
    }

    /// Called for every event terminating at the current state.
    fn visit_event(&mut self, _epa: &ExtendedPrefixAutomaton<T>, _event: &Event<T>, _depth: usize) {
    }

    /// Progress report, once per visited state, as (visited, total states).
    ///
    /// Returning [`ControlFlow::Break`] cancels the traversal cooperatively;
    /// the driver stops without calling [`on_end`].
    ///
    /// [`on_end`]: AutomatonVisitor::on_end
    fn on_progress(&mut self, _current: u64, _total: u64) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}
