//! Core engine types: tiles, RNG, configuration, errors.
//!
//! This module contains the fundamental building blocks that are
//! host-agnostic. Hosts configure these via `DifficultyCatalog` and
//! `SettleTimings` rather than modifying the core.

pub mod config;
pub mod error;
pub mod rng;
pub mod tile;

pub use config::{
    DifficultyCatalog, DifficultyConfig, SettleTimings, MATCH_SETTLE_MS, MISMATCH_SETTLE_MS,
};
pub use error::GameError;
pub use rng::GameRng;
pub use tile::{Tile, TileId};
