//! Domain primitives of the Extended Prefix Automaton.
//!
//! Value types with structural equality and no behavior beyond identity and
//! comparison: activity labels, raw log events, arena-resident states, and
//! the transitions connecting them.

mod activity;
mod event;
mod state;
mod transition;

pub use activity::Activity;
pub use event::Event;
pub use state::{State, StateId, ROOT};
pub use transition::Transition;
