//! Deck construction and tile storage.
//!
//! `DeckBuilder::build(pair_count)` draws `pair_count` unique symbols from
//! the pool, duplicates them, shuffles the doubled list, and assigns each
//! element a positional `TileId`. The resulting `Deck` is fixed in length
//! and symbol content; only the reveal/match flags on its tiles mutate.

use rustc_hash::FxHashMap;

use crate::core::{GameError, GameRng, Tile, TileId};
use crate::symbols::SymbolPool;

/// An ordered sequence of tiles, every symbol appearing exactly twice.
///
/// Observers get the serializable view via the snapshot layer; the deck
/// itself stays an in-memory structure so the id index never goes stale.
#[derive(Clone, Debug)]
pub struct Deck {
    tiles: Vec<Tile>,
    /// TileId -> position, for O(1) lookup.
    index: FxHashMap<TileId, usize>,
    pair_count: usize,
}

impl Deck {
    fn new(tiles: Vec<Tile>, pair_count: usize) -> Self {
        let index = tiles
            .iter()
            .enumerate()
            .map(|(pos, tile)| (tile.id, pos))
            .collect();

        Self {
            tiles,
            index,
            pair_count,
        }
    }

    /// Number of tiles (always `2 * pair_count`).
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Is the deck empty? Never true for a built deck.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Number of distinct symbols.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.pair_count
    }

    /// All tiles in grid order.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Look up a tile by id.
    #[must_use]
    pub fn get(&self, id: TileId) -> Option<&Tile> {
        self.index.get(&id).map(|&pos| &self.tiles[pos])
    }

    /// Look up a tile mutably by id.
    pub fn get_mut(&mut self, id: TileId) -> Option<&mut Tile> {
        let pos = *self.index.get(&id)?;
        Some(&mut self.tiles[pos])
    }

    /// The symbol behind a tile, if the id exists.
    #[must_use]
    pub fn symbol_of(&self, id: TileId) -> Option<char> {
        self.get(id).map(|t| t.symbol)
    }

    /// Count of tiles locked as matched.
    #[must_use]
    pub fn matched_tiles(&self) -> usize {
        self.tiles.iter().filter(|t| t.matched).count()
    }
}

/// Builds decks from a symbol pool.
#[derive(Clone, Debug, Default)]
pub struct DeckBuilder {
    pool: SymbolPool,
}

impl DeckBuilder {
    /// A builder over the built-in symbol catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A builder over a custom pool.
    #[must_use]
    pub fn with_pool(pool: SymbolPool) -> Self {
        Self { pool }
    }

    /// Distinct symbols the pool can supply.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.pool.len()
    }

    /// Build a shuffled deck of `pair_count` symbol pairs.
    ///
    /// Fails with `InvalidPairCount` if `pair_count` is zero or exceeds the
    /// pool's catalog.
    pub fn build(&self, pair_count: usize, rng: &mut GameRng) -> Result<Deck, GameError> {
        if pair_count < 1 || pair_count > self.pool.len() {
            return Err(GameError::InvalidPairCount {
                requested: pair_count,
                capacity: self.pool.len(),
            });
        }

        let symbols = self.pool.draw(pair_count, rng)?;

        let mut doubled = Vec::with_capacity(pair_count * 2);
        doubled.extend_from_slice(&symbols);
        doubled.extend_from_slice(&symbols);
        rng.shuffle(&mut doubled);

        let tiles = doubled
            .into_iter()
            .enumerate()
            .map(|(pos, symbol)| Tile::new(TileId::new(pos as u32), symbol))
            .collect();

        let deck = Deck::new(tiles, pair_count);
        debug_assert!(deck_is_paired(&deck));
        Ok(deck)
    }
}

fn deck_is_paired(deck: &Deck) -> bool {
    let mut counts: FxHashMap<char, usize> = FxHashMap::default();
    for tile in deck.tiles() {
        *counts.entry(tile.symbol).or_insert(0) += 1;
    }
    counts.len() == deck.pair_count() && counts.values().all(|&n| n == 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_deck_shape() {
        let builder = DeckBuilder::new();
        let mut rng = GameRng::new(42);

        let deck = builder.build(6, &mut rng).unwrap();

        assert_eq!(deck.len(), 12);
        assert_eq!(deck.pair_count(), 6);
        assert!(deck_is_paired(&deck));
    }

    #[test]
    fn test_tile_ids_are_positions() {
        let builder = DeckBuilder::new();
        let mut rng = GameRng::new(42);

        let deck = builder.build(4, &mut rng).unwrap();

        for (pos, tile) in deck.tiles().iter().enumerate() {
            assert_eq!(tile.id, TileId::new(pos as u32));
            assert!(!tile.revealed);
            assert!(!tile.matched);
        }
    }

    #[test]
    fn test_lookup_by_id() {
        let builder = DeckBuilder::new();
        let mut rng = GameRng::new(42);

        let mut deck = builder.build(3, &mut rng).unwrap();
        let id = deck.tiles()[2].id;

        assert_eq!(deck.get(id).map(|t| t.id), Some(id));
        assert_eq!(deck.symbol_of(id), Some(deck.tiles()[2].symbol));

        deck.get_mut(id).unwrap().flip_up();
        assert!(deck.get(id).unwrap().revealed);

        assert!(deck.get(TileId::new(999)).is_none());
        assert!(deck.symbol_of(TileId::new(999)).is_none());
    }

    #[test]
    fn test_single_pair_deck() {
        let builder = DeckBuilder::new();
        let mut rng = GameRng::new(42);

        let deck = builder.build(1, &mut rng).unwrap();

        assert_eq!(deck.len(), 2);
        assert_eq!(deck.tiles()[0].symbol, deck.tiles()[1].symbol);
        assert_ne!(deck.tiles()[0].id, deck.tiles()[1].id);
    }

    #[test]
    fn test_zero_pairs_rejected() {
        let builder = DeckBuilder::new();
        let mut rng = GameRng::new(42);

        let err = builder.build(0, &mut rng).unwrap_err();
        assert_eq!(
            err,
            GameError::InvalidPairCount {
                requested: 0,
                capacity: 50,
            }
        );
    }

    #[test]
    fn test_over_capacity_rejected() {
        let builder = DeckBuilder::new();
        let mut rng = GameRng::new(42);

        let err = builder.build(51, &mut rng).unwrap_err();
        assert_eq!(
            err,
            GameError::InvalidPairCount {
                requested: 51,
                capacity: 50,
            }
        );
    }

    #[test]
    fn test_successive_builds_are_independent() {
        let builder = DeckBuilder::new();
        let mut rng = GameRng::new(42);

        let first = builder.build(18, &mut rng).unwrap();
        let second = builder.build(18, &mut rng).unwrap();

        let order = |deck: &Deck| deck.tiles().iter().map(|t| t.symbol).collect::<Vec<_>>();
        assert_ne!(order(&first), order(&second));

        assert!(deck_is_paired(&first));
        assert!(deck_is_paired(&second));
    }

    #[test]
    fn test_small_pool_build() {
        let builder = DeckBuilder::with_pool(SymbolPool::from_catalog(vec!['A', 'B']));
        let mut rng = GameRng::new(42);

        let deck = builder.build(2, &mut rng).unwrap();
        assert_eq!(deck.len(), 4);

        let err = builder.build(3, &mut rng).unwrap_err();
        assert_eq!(
            err,
            GameError::InvalidPairCount {
                requested: 3,
                capacity: 2,
            }
        );
    }
}
