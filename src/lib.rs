//! # memory-match
//!
//! A tile-matching memory game engine built around a deterministic round
//! state machine.
//!
//! ## Design Principles
//!
//! 1. **Core Over Chrome**: The engine owns deck construction, reveal
//!    sequencing, match evaluation, timing, and win detection. Rendering,
//!    input devices, and styling are host concerns fed by read-only
//!    snapshots.
//!
//! 2. **Injectable Randomness**: Symbol draws, shuffles, and feedback
//!    picks all flow through one seeded `GameRng`, so tests replay exact
//!    rounds instead of fighting entropy.
//!
//! 3. **Generation-Guarded Time**: Clock ticks and settle callbacks are
//!    events stamped with the round's generation id. A reset invalidates
//!    everything still in flight; a stale callback can never mutate a
//!    newer round.
//!
//! ## Architecture
//!
//! - **Externally-Serialized Mutation**: All state changes go through
//!   `&mut GameSession`. Timer threads only post events; `pump` applies
//!   them in call order.
//!
//! - **Absorbing Collaborators**: The victory narrator is a trait
//!   boundary that resolves to a displayable string even when the backing
//!   service is absent or broken - the round never waits on it and never
//!   sees its errors.
//!
//! ## Modules
//!
//! - `core`: Tile identity, RNG, difficulty configuration, errors
//! - `symbols`: The symbol catalog and random unique draws
//! - `deck`: Deck construction and tile storage
//! - `feedback`: Match/mismatch/round-start message selection
//! - `round`: The round state machine
//! - `narrator`: Victory narrator boundary and fallback
//! - `clock`: Per-second ticker and one-shot settle timers
//! - `session`: Host-facing commands over the current round
//! - `snapshot`: Read-only state for rendering

pub mod core;
pub mod symbols;
pub mod deck;
pub mod feedback;
pub mod round;
pub mod narrator;
pub mod clock;
pub mod session;
pub mod snapshot;

// Re-export commonly used types
pub use crate::core::{
    DifficultyCatalog, DifficultyConfig, GameError, GameRng, SettleTimings, Tile, TileId,
    MATCH_SETTLE_MS, MISMATCH_SETTLE_MS,
};

pub use crate::symbols::{SymbolPool, SYMBOL_CATALOG};

pub use crate::deck::{Deck, DeckBuilder};

pub use crate::feedback::{
    Feedback, FeedbackSelector, Polarity, NEUTRAL_MESSAGES, POSITIVE_MESSAGES,
    ROUND_START_MESSAGE,
};

pub use crate::round::{RevealOutcome, Round, RoundStats, RoundStatus, Settled};

pub use crate::narrator::{
    FallbackNarrator, NarrationTicket, VictoryNarrator, FALLBACK_VICTORY_MESSAGE,
};

pub use crate::clock::{schedule_settle, Clock, TimerEvent};

pub use crate::session::{GameSession, GameSessionBuilder};

pub use crate::snapshot::{
    DifficultySnapshot, FeedbackSnapshot, GameSnapshot, TileSnapshot, VictorySnapshot,
};
