//! Symbol catalog and random unique draws.
//!
//! The pool is a fixed catalog of distinct glyphs. `draw(n)` hands out `n`
//! of them with no repeats, chosen by a fresh uniform permutation per call -
//! prior draws are never cached, so consecutive rounds are independent.

use crate::core::{GameError, GameRng};

/// The built-in catalog: 50 distinct animal glyphs.
///
/// Large enough for every standard difficulty (Hard needs 18 pairs).
pub const SYMBOL_CATALOG: [char; 50] = [
    '🐶', '🐱', '🐭', '🐹', '🐰', '🦊', '🐻', '🐼', '🐨', '🐯',
    '🦁', '🐮', '🐷', '🐸', '🐵', '🐔', '🐧', '🐦', '🐤', '🦆',
    '🦅', '🦉', '🦇', '🐺', '🐗', '🐴', '🦄', '🐝', '🐛', '🦋',
    '🐌', '🐞', '🐜', '🦟', '🦗', '🕷', '🦂', '🐢', '🐍', '🦎',
    '🦖', '🦕', '🐙', '🦑', '🦐', '🦞', '🦀', '🐡', '🐠', '🐟',
];

/// A fixed catalog of distinct symbols.
#[derive(Clone, Debug)]
pub struct SymbolPool {
    catalog: Vec<char>,
}

impl Default for SymbolPool {
    fn default() -> Self {
        Self {
            catalog: SYMBOL_CATALOG.to_vec(),
        }
    }
}

impl SymbolPool {
    /// The built-in animal catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A pool over a custom catalog. Panics on duplicate symbols, which is
    /// a host configuration bug.
    pub fn from_catalog(catalog: Vec<char>) -> Self {
        let mut seen = catalog.clone();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), catalog.len(), "Symbol catalog must not contain duplicates");

        Self { catalog }
    }

    /// Number of distinct symbols available.
    #[must_use]
    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    /// Is the catalog empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    /// Draw `n` distinct symbols uniformly at random.
    ///
    /// Each call shuffles the full catalog afresh and takes the prefix, so
    /// draws are independent across calls. Fails with `InsufficientSymbols`
    /// when `n` exceeds the catalog size.
    pub fn draw(&self, n: usize, rng: &mut GameRng) -> Result<Vec<char>, GameError> {
        if n > self.catalog.len() {
            return Err(GameError::InsufficientSymbols {
                requested: n,
                available: self.catalog.len(),
            });
        }

        let mut drawn = rng.shuffled(&self.catalog);
        drawn.truncate(n);
        Ok(drawn)
    }
}
