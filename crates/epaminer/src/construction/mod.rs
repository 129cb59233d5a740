//! Automaton construction: the single-pass log builder, the components
//! builder used by filters, and the event-log mapper boundary.

mod builder;
mod components;
mod mapper;

pub use builder::ExtendedPrefixAutomatonBuilder;
pub use components::EpaComponentsBuilder;
pub use mapper::{sorted_by_timestamp, EventLogMapper};
