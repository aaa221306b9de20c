//! Game configuration types.
//!
//! Hosts configure the engine at startup by providing:
//! - `DifficultyCatalog`: the static table of selectable grids
//! - `SettleTimings`: how long a revealed pair stays visible before its
//!   outcome is applied
//!
//! The engine never hardcodes a grid - hosts enumerate difficulties and
//! refer to them by name.

use serde::{Deserialize, Serialize};

use super::error::GameError;

/// Default match settle delay in milliseconds.
pub const MATCH_SETTLE_MS: u64 = 500;

/// Default mismatch settle delay in milliseconds.
pub const MISMATCH_SETTLE_MS: u64 = 1000;

/// A selectable grid size.
///
/// `rows * cols` must be even (every symbol appears exactly twice) and at
/// least 4 (two pairs make the smallest interesting grid, one pair the
/// smallest legal one).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyConfig {
    /// Display name, also the lookup key (e.g. "Easy").
    pub name: String,
    /// Grid rows.
    pub rows: u8,
    /// Grid columns.
    pub cols: u8,
}

impl DifficultyConfig {
    /// Create a difficulty. Panics on an odd or too-small grid, which is a
    /// host configuration bug, not a runtime input.
    pub fn new(name: impl Into<String>, rows: u8, cols: u8) -> Self {
        let tiles = rows as usize * cols as usize;
        assert!(tiles % 2 == 0, "Grid must hold an even number of tiles");
        assert!(tiles >= 4, "Grid must hold at least 4 tiles");

        Self {
            name: name.into(),
            rows,
            cols,
        }
    }

    /// Number of tiles in the grid.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    /// Number of distinct symbols in a round of this difficulty.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.tile_count() / 2
    }
}

/// The static table of difficulties a host offers.
///
/// `standard()` reproduces the classic three-tier table; hosts with other
/// grids build their own.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyCatalog {
    difficulties: Vec<DifficultyConfig>,
}

impl DifficultyCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The classic table: Easy 3x4, Medium 4x4, Hard 6x6.
    #[must_use]
    pub fn standard() -> Self {
        Self::new()
            .with_difficulty(DifficultyConfig::new("Easy", 3, 4))
            .with_difficulty(DifficultyConfig::new("Medium", 4, 4))
            .with_difficulty(DifficultyConfig::new("Hard", 6, 6))
    }

    /// Add a difficulty.
    #[must_use]
    pub fn with_difficulty(mut self, config: DifficultyConfig) -> Self {
        self.difficulties.push(config);
        self
    }

    /// All difficulties, in insertion order.
    #[must_use]
    pub fn difficulties(&self) -> &[DifficultyConfig] {
        &self.difficulties
    }

    /// Look up a difficulty by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&DifficultyConfig> {
        self.difficulties.iter().find(|d| d.name == name)
    }

    /// Look up a difficulty by name, surfacing `UnknownDifficulty` on a miss.
    pub fn resolve(&self, name: &str) -> Result<&DifficultyConfig, GameError> {
        self.get(name).ok_or_else(|| GameError::UnknownDifficulty {
            name: name.to_string(),
        })
    }
}

/// How long a revealed pair stays visible before the outcome is applied.
///
/// These are UX observation delays, not correctness-critical values. Both
/// are independent tunables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettleTimings {
    /// Delay before a matched pair locks face-up.
    pub match_ms: u64,
    /// Delay before a mismatched pair flips back down.
    pub mismatch_ms: u64,
}

impl Default for SettleTimings {
    fn default() -> Self {
        Self {
            match_ms: MATCH_SETTLE_MS,
            mismatch_ms: MISMATCH_SETTLE_MS,
        }
    }
}

impl SettleTimings {
    /// Zero delays, useful for tests and headless drivers.
    #[must_use]
    pub const fn immediate() -> Self {
        Self {
            match_ms: 0,
            mismatch_ms: 0,
        }
    }
}
