//! The event-log mapper boundary.

use crate::error::Result;
use crate::models::Event;

/// Source of pre-mapped events for the automaton builder.
///
/// Parsing a raw log format into [`Event`]s is not the engine's concern; a
/// mapper owns it. The contract a mapper must fulfill: the returned events
/// are sorted globally by timestamp, and within every case the timestamps
/// are non-decreasing. The builder does not re-validate this at runtime;
/// out-of-order input produces a structurally valid but semantically wrong
/// automaton.
pub trait EventLogMapper<T: Ord> {
    /// Mapper name, used for diagnostics and as the default log name.
    fn name(&self) -> &str;

    /// Produce the mapped, chronologically sorted event list.
    fn events(&mut self) -> Result<Vec<Event<T>>>;
}

/// Sort events globally by timestamp, breaking ties by case id.
///
/// Stable helper for mappers whose raw source is grouped per case: after
/// per-case mapping, one global sort establishes the order the builder
/// expects.
pub fn sorted_by_timestamp<T: Ord>(mut events: Vec<Event<T>>) -> Vec<Event<T>> {
    events.sort_by(|a, b| {
        a.timestamp
            .cmp(&b.timestamp)
            .then_with(|| a.case_id.cmp(&b.case_id))
    });
    events
}
