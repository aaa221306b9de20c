//! Tile identity and per-tile state.
//!
//! Every tile in a deck has a unique `TileId`, allocated positionally when
//! the deck is built. The id is stable for the tile's lifetime and the
//! symbol never changes after creation; only the `revealed`/`matched` flags
//! mutate during play.
//!
//! ## Usage
//!
//! ```
//! use memory_match::core::{Tile, TileId};
//!
//! let mut tile = Tile::new(TileId::new(3), '🐶');
//! assert!(!tile.revealed);
//!
//! tile.flip_up();
//! tile.lock();
//!
//! // matched implies revealed
//! assert!(tile.matched && tile.revealed);
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a tile within a deck.
///
/// Ids are allocated as deck positions at build time, so duplicated symbols
/// still get distinguishing identities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileId(pub u32);

impl TileId {
    /// Create a new tile ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for TileId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tile({})", self.0)
    }
}

/// One face-down card in the grid.
///
/// Invariant: `matched` implies `revealed`. `lock` upholds it; nothing else
/// sets `matched`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// Stable identity within the deck.
    pub id: TileId,
    /// The hidden symbol. Exactly two tiles per deck share it.
    pub symbol: char,
    /// Face-up and awaiting (or past) evaluation.
    pub revealed: bool,
    /// Locked face-up as part of a found pair.
    pub matched: bool,
}

impl Tile {
    /// Create a face-down, unmatched tile.
    #[must_use]
    pub const fn new(id: TileId, symbol: char) -> Self {
        Self {
            id,
            symbol,
            revealed: false,
            matched: false,
        }
    }

    /// Turn the tile face-up.
    pub fn flip_up(&mut self) {
        self.revealed = true;
    }

    /// Turn the tile face-down again after a mismatch.
    ///
    /// Matched tiles stay face-up.
    pub fn flip_down(&mut self) {
        if !self.matched {
            self.revealed = false;
        }
    }

    /// Lock the tile face-up as part of a found pair.
    pub fn lock(&mut self) {
        self.revealed = true;
        self.matched = true;
    }

    /// Can this tile accept a reveal?
    #[must_use]
    pub fn is_selectable(&self) -> bool {
        !self.revealed && !self.matched
    }
}
