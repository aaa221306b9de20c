//! The round state machine.
//!
//! ## States
//!
//! `Playing` -> `Evaluating` (two unresolved tiles face-up) -> back to
//! `Playing`, or -> `Won` (terminal). `Idle` is reported by the session
//! when no round exists; a `Round` value is always in one of the other
//! three states.
//!
//! ## Operations
//!
//! - `reveal` flips a tile face-up; the second accepted reveal counts a
//!   move, computes the outcome, and enters `Evaluating`. Everything else
//!   (unknown id, already face-up, matched, mid-evaluation) is a silent
//!   no-op - the caller may be acting on stale UI state.
//! - `settle` applies the computed outcome after the observation delay has
//!   passed. The delay itself lives outside the machine: `reveal` reports
//!   how long to wait and the driver schedules the callback.
//! - `tick` advances the display timer one second; frozen once `Won`.
//!
//! Invariants: at most two pending reveals, `matches` only grows and is
//! bounded by the pair count, `Won` exactly when every pair is found, and a
//! matched tile never re-enters the pending set.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{DifficultyConfig, GameError, GameRng, SettleTimings, TileId};
use crate::deck::{Deck, DeckBuilder};
use crate::feedback::{Feedback, FeedbackSelector};

/// Where a round (or the session around it) currently stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundStatus {
    /// No round active (menu). Reported by the session, never held by a
    /// live `Round`.
    Idle,
    /// Accepting reveals, clock running.
    Playing,
    /// Two tiles face-up, outcome scheduled; reveals are rejected, not
    /// queued.
    Evaluating,
    /// All pairs found. Terminal.
    Won,
}

/// What a `reveal` call did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    /// Input was rejected (wrong state, unknown id, tile not selectable).
    Ignored,
    /// First tile of a move turned face-up.
    Revealed,
    /// Second tile turned face-up; outcome computed and awaiting settle.
    Evaluating {
        /// How long the driver should wait before calling `settle`.
        settle_ms: u64,
    },
}

/// What `settle` applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Settled {
    /// Pair locked face-up. `won` is set when it was the last pair.
    Matched { won: bool },
    /// Pair flipped back face-down.
    Mismatched,
}

/// Final stats handed to the victory narrator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundStats {
    pub moves: u32,
    pub elapsed_seconds: u32,
    pub difficulty: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ResolutionKind {
    Match,
    Mismatch,
}

/// Outcome computed at the second reveal, applied at settle time.
#[derive(Clone, Copy, Debug)]
struct PendingResolution {
    first: TileId,
    second: TileId,
    kind: ResolutionKind,
}

/// A single round of the memory game.
#[derive(Clone, Debug)]
pub struct Round {
    difficulty: DifficultyConfig,
    deck: Deck,
    pending: SmallVec<[TileId; 2]>,
    resolution: Option<PendingResolution>,
    moves: u32,
    matches: u32,
    elapsed_seconds: u32,
    status: RoundStatus,
    feedback: Feedback,
    timings: SettleTimings,
    selector: FeedbackSelector,
    rng: GameRng,
}

impl Round {
    /// Start a fresh round: build the deck, zero the counters, greet the
    /// player.
    ///
    /// The RNG should be a fork of the session RNG so consecutive rounds
    /// shuffle independently.
    pub fn start(
        difficulty: DifficultyConfig,
        builder: &DeckBuilder,
        timings: SettleTimings,
        mut rng: GameRng,
    ) -> Result<Self, GameError> {
        let deck = builder.build(difficulty.pair_count(), &mut rng)?;
        Ok(Self::with_deck(difficulty, deck, timings, rng))
    }

    /// Start a round over a prebuilt deck.
    ///
    /// The deck defines the win condition (`matches == deck.pair_count()`);
    /// the difficulty is the label reported in stats and snapshots. `start`
    /// is the normal path and keeps the two consistent.
    #[must_use]
    pub fn with_deck(
        difficulty: DifficultyConfig,
        deck: Deck,
        timings: SettleTimings,
        rng: GameRng,
    ) -> Self {
        let selector = FeedbackSelector::new();
        let feedback = selector.round_start();

        Self {
            difficulty,
            deck,
            pending: SmallVec::new(),
            resolution: None,
            moves: 0,
            matches: 0,
            elapsed_seconds: 0,
            status: RoundStatus::Playing,
            feedback,
            timings,
            selector,
            rng,
        }
    }

    // === Operations ===

    /// Flip a tile face-up.
    ///
    /// Rejected inputs (not `Playing`, unknown id, tile already face-up or
    /// matched, two reveals pending) return `Ignored` and leave the round
    /// untouched. The second accepted reveal counts the move, computes the
    /// outcome, and reports the settle delay for the driver to schedule.
    pub fn reveal(&mut self, id: TileId) -> RevealOutcome {
        if self.status != RoundStatus::Playing || self.pending.len() >= 2 {
            return RevealOutcome::Ignored;
        }

        let Some(tile) = self.deck.get_mut(id) else {
            return RevealOutcome::Ignored;
        };
        if !tile.is_selectable() {
            return RevealOutcome::Ignored;
        }

        tile.flip_up();
        self.pending.push(id);

        if self.pending.len() < 2 {
            return RevealOutcome::Revealed;
        }

        self.moves += 1;
        self.status = RoundStatus::Evaluating;

        let (first, second) = (self.pending[0], self.pending[1]);
        let kind = if self.deck.symbol_of(first) == self.deck.symbol_of(second) {
            ResolutionKind::Match
        } else {
            ResolutionKind::Mismatch
        };
        self.resolution = Some(PendingResolution { first, second, kind });

        let settle_ms = match kind {
            ResolutionKind::Match => self.timings.match_ms,
            ResolutionKind::Mismatch => self.timings.mismatch_ms,
        };
        RevealOutcome::Evaluating { settle_ms }
    }

    /// Apply the pending outcome.
    ///
    /// Returns `None` when nothing is pending (already settled, or the
    /// round never reached `Evaluating`). On a match both tiles lock
    /// face-up and `matches` grows; the last pair flips the round to `Won`.
    /// On a mismatch both tiles turn back face-down. Either way the pending
    /// set clears and play resumes.
    pub fn settle(&mut self) -> Option<Settled> {
        let resolution = self.resolution.take()?;
        debug_assert_eq!(self.status, RoundStatus::Evaluating);

        self.pending.clear();

        match resolution.kind {
            ResolutionKind::Match => {
                if let Some(tile) = self.deck.get_mut(resolution.first) {
                    tile.lock();
                }
                if let Some(tile) = self.deck.get_mut(resolution.second) {
                    tile.lock();
                }
                self.matches += 1;
                self.feedback = self.selector.positive(&mut self.rng);

                if self.matches as usize == self.deck.pair_count() {
                    self.status = RoundStatus::Won;
                    Some(Settled::Matched { won: true })
                } else {
                    self.status = RoundStatus::Playing;
                    Some(Settled::Matched { won: false })
                }
            }
            ResolutionKind::Mismatch => {
                if let Some(tile) = self.deck.get_mut(resolution.first) {
                    tile.flip_down();
                }
                if let Some(tile) = self.deck.get_mut(resolution.second) {
                    tile.flip_down();
                }
                self.feedback = self.selector.neutral(&mut self.rng);
                self.status = RoundStatus::Playing;
                Some(Settled::Mismatched)
            }
        }
    }

    /// Advance the display timer one second.
    ///
    /// Counts only while `Playing` or `Evaluating`; frozen once `Won`.
    pub fn tick(&mut self) {
        if matches!(self.status, RoundStatus::Playing | RoundStatus::Evaluating) {
            self.elapsed_seconds += 1;
        }
    }

    // === Observation ===

    /// Current status. Never `Idle` for a live round.
    #[must_use]
    pub fn status(&self) -> RoundStatus {
        self.status
    }

    /// Completed reveal pairs so far.
    #[must_use]
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Pairs found so far.
    #[must_use]
    pub fn matches(&self) -> u32 {
        self.matches
    }

    /// Seconds elapsed since the round started.
    #[must_use]
    pub fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    /// Tiles revealed but not yet resolved, in reveal order.
    #[must_use]
    pub fn pending(&self) -> &[TileId] {
        &self.pending
    }

    /// The deck being played.
    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// The difficulty this round was started with.
    #[must_use]
    pub fn difficulty(&self) -> &DifficultyConfig {
        &self.difficulty
    }

    /// Latest feedback line.
    #[must_use]
    pub fn feedback(&self) -> &Feedback {
        &self.feedback
    }

    /// Has every pair been found?
    #[must_use]
    pub fn is_won(&self) -> bool {
        self.status == RoundStatus::Won
    }

    /// Final stats for the narrator.
    #[must_use]
    pub fn stats(&self) -> RoundStats {
        RoundStats {
            moves: self.moves,
            elapsed_seconds: self.elapsed_seconds,
            difficulty: self.difficulty.name.clone(),
        }
    }
}
