//! # epaminer
//!
//! An Extended Prefix Automaton (EPA) engine for process mining.
//!
//! The engine folds a chronologically ordered stream of per-case events into a
//! trie-shaped automaton in which every state represents a distinct activity
//! prefix observed in the log. Each state carries the set of raw events that
//! terminated at it and a partition id grouping maximal non-branching runs of
//! the prefix tree. The automaton is then reshaped by composable,
//! invariant-preserving filters.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────┐     ┌───────────────────┐     ┌─────────────────┐
//! │  Event Log       │────▶│  Builder          │────▶│  Automaton      │
//! │  (mapper SPI)    │     │  (single pass)    │     │  (immutable)    │
//! └──────────────────┘     └───────────────────┘     └─────────────────┘
//!                                                             │
//!                          ┌───────────────────┐              ▼
//!                          │  Filters          │     ┌─────────────────┐
//!                          │  activity / freq  │◀────│  Traversal      │
//!                          │  compression      │     │  (visitor SPI)  │
//!                          └───────────────────┘     └─────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use epaminer::prelude::*;
//!
//! let a = Activity::new("register");
//! let b = Activity::new("review");
//!
//! let epa = ExtendedPrefixAutomatonBuilder::new()
//!     .with_log_name("demo")
//!     .with_events(vec![
//!         Event::new(a.clone(), 1u64, "case-1"),
//!         Event::new(b.clone(), 2u64, "case-1"),
//!     ])
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(epa.state_count(), 3);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod api;
pub mod automaton;
pub mod construction;
pub mod error;
pub mod features;
pub mod models;
pub mod visitor;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::api::EpaService;
    pub use crate::automaton::ExtendedPrefixAutomaton;
    pub use crate::construction::{
        sorted_by_timestamp, EpaComponentsBuilder, EventLogMapper, ExtendedPrefixAutomatonBuilder,
    };
    pub use crate::error::{EpaError, Result};
    pub use crate::features::filter::{
        combine, ActivityFilter, CombinedFilter, CompressionFilter, EpaFilter, NoOpFilter,
        PartitionFrequencyFilter, StateFrequencyFilter,
    };
    pub use crate::models::{Activity, Event, State, StateId, Transition, ROOT};
    pub use crate::visitor::{
        AutomatonVisitor, DepthCounts, NormalizedPartitionFrequency,
        NormalizedPartitionFrequencyVisitor, NormalizedStateFrequency,
        NormalizedStateFrequencyVisitor, PartitionsAtDepthVisitor,
        StatesAndPartitionsByDepthVisitor, Statistics, StatisticsVisitor,
    };
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
