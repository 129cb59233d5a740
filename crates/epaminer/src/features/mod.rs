//! Higher-level features built on top of the core automaton.

pub mod filter;
