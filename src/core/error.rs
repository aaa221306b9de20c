//! Caller-input error taxonomy.
//!
//! Every variant is surfaced synchronously to whoever invoked
//! `start`/`reset`/`build`; none is retryable. Narrator failures never
//! appear here - the collaborator boundary absorbs them into a fallback
//! string. Stale timer events are silently discarded, not errors.

/// Errors raised by round construction and difficulty lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameError {
    /// `build(pair_count)` called with zero pairs or more pairs than the
    /// symbol catalog can supply.
    InvalidPairCount {
        /// Pairs requested.
        requested: usize,
        /// Distinct symbols available.
        capacity: usize,
    },
    /// A symbol draw asked for more distinct symbols than the pool holds.
    InsufficientSymbols {
        /// Symbols requested.
        requested: usize,
        /// Symbols in the pool.
        available: usize,
    },
    /// `start`/`reset` named a difficulty missing from the catalog.
    UnknownDifficulty {
        /// The name that failed to resolve.
        name: String,
    },
}

impl std::fmt::Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameError::InvalidPairCount { requested, capacity } => {
                write!(f, "invalid pair count {requested} (catalog holds {capacity} symbols)")
            }
            GameError::InsufficientSymbols { requested, available } => {
                write!(f, "requested {requested} symbols but only {available} are available")
            }
            GameError::UnknownDifficulty { name } => {
                write!(f, "unknown difficulty '{name}'")
            }
        }
    }
}

impl std::error::Error for GameError {}
