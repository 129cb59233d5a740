//! Automaton states.

use super::Activity;

/// Handle to a state within one automaton's arena.
///
/// Ids are only meaningful for the automaton that issued them. Because states
/// are hash-consed on `(predecessor, activity)`, id equality is structural
/// prefix equality in O(1), with no recursive comparison along the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(u32);

/// The root state's id in every automaton.
pub const ROOT: StateId = StateId(0);

impl StateId {
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }

    /// Whether this id denotes the root state.
    pub fn is_root(self) -> bool {
        self == ROOT
    }
}

/// A state of the Extended Prefix Automaton.
///
/// The root represents the empty prefix; every other state represents the
/// prefix reached by taking `via` from `from`. Following `from` repeatedly
/// always reaches the root in finitely many steps: the state graph is an
/// arborescence rooted at [`ROOT`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum State {
    /// The unique state with the empty prefix.
    Root,
    /// The prefix reached by taking `via` from `from`.
    Prefix {
        /// The predecessor state in the prefix path.
        from: StateId,
        /// The activity that extends the predecessor's prefix.
        via: Activity,
    },
}

impl State {
    /// Human-readable name: the last activity of the prefix, or `"root"`.
    pub fn name(&self) -> &str {
        match self {
            State::Root => "root",
            State::Prefix { via, .. } => via.name(),
        }
    }

    /// The predecessor state, if this is not the root.
    pub fn from(&self) -> Option<StateId> {
        match self {
            State::Root => None,
            State::Prefix { from, .. } => Some(*from),
        }
    }

    /// The activity that leads into this state, if this is not the root.
    pub fn via(&self) -> Option<&Activity> {
        match self {
            State::Root => None,
            State::Prefix { via, .. } => Some(via),
        }
    }
}
