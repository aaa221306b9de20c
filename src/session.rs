//! The host-facing command boundary.
//!
//! A [`GameSession`] owns the current round, the generation counter, the
//! clock, and the narration in flight. Hosts issue commands
//! (`start_round`, `reveal_tile`, `restart_round`, `return_to_menu`),
//! call [`pump`](GameSession::pump) from their loop to apply timer and
//! narration events, and render the returned [`GameSnapshot`]s.
//!
//! ## Serialization of mutation
//!
//! Every state change goes through `&mut self`. Timer threads never touch
//! the session; they post [`TimerEvent`]s onto an internal channel which
//! `pump` drains. A host running the session across threads wraps it in
//! one mutex - operations are small and total ordering is required, so no
//! finer locking exists.
//!
//! ## Generations
//!
//! Each `start`/`reset` bumps the generation id and stamps it into the
//! clock and every scheduled settle. `pump` discards events from older
//! generations, so a settle scheduled in round N can never mutate round
//! N+1 no matter when it fires.

use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use crate::clock::{schedule_settle, Clock, TimerEvent};
use crate::core::{DifficultyCatalog, DifficultyConfig, GameError, GameRng, SettleTimings, TileId};
use crate::deck::DeckBuilder;
use crate::narrator::{FallbackNarrator, NarrationTicket, VictoryNarrator};
use crate::round::{RevealOutcome, Round, Settled};
use crate::snapshot::{GameSnapshot, VictorySnapshot};
use crate::symbols::SymbolPool;

/// Builder for a [`GameSession`].
///
/// Defaults: the standard difficulty table, the built-in symbol catalog,
/// stock settle timings, a once-per-second clock, and the fallback
/// narrator.
pub struct GameSessionBuilder {
    catalog: DifficultyCatalog,
    pool: SymbolPool,
    timings: SettleTimings,
    clock_period: Duration,
    narrator: Box<dyn VictoryNarrator>,
}

impl Default for GameSessionBuilder {
    fn default() -> Self {
        Self {
            catalog: DifficultyCatalog::standard(),
            pool: SymbolPool::new(),
            timings: SettleTimings::default(),
            clock_period: Clock::TICK_INTERVAL,
            narrator: Box::new(FallbackNarrator),
        }
    }
}

impl GameSessionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a custom difficulty table.
    #[must_use]
    pub fn catalog(mut self, catalog: DifficultyCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Draw tiles from a custom symbol pool.
    #[must_use]
    pub fn pool(mut self, pool: SymbolPool) -> Self {
        self.pool = pool;
        self
    }

    /// Override the settle delays.
    #[must_use]
    pub fn timings(mut self, timings: SettleTimings) -> Self {
        self.timings = timings;
        self
    }

    /// Override the clock period. Tests use short periods so a display
    /// "second" elapses quickly.
    #[must_use]
    pub fn clock_period(mut self, period: Duration) -> Self {
        self.clock_period = period;
        self
    }

    /// Install a victory narrator.
    #[must_use]
    pub fn narrator(mut self, narrator: impl VictoryNarrator + 'static) -> Self {
        self.narrator = Box::new(narrator);
        self
    }

    /// Build the session. The seed drives every shuffle and feedback draw.
    #[must_use]
    pub fn build(self, seed: u64) -> GameSession {
        let (events_tx, events) = mpsc::channel();

        GameSession {
            catalog: self.catalog,
            deck_builder: DeckBuilder::with_pool(self.pool),
            timings: self.timings,
            clock_period: self.clock_period,
            narrator: self.narrator,
            rng: GameRng::new(seed),
            round: None,
            generation: 0,
            clock: None,
            events_tx,
            events,
            victory_message: None,
            narration: None,
        }
    }
}

/// One player's game session: menu, rounds, restarts.
pub struct GameSession {
    catalog: DifficultyCatalog,
    deck_builder: DeckBuilder,
    timings: SettleTimings,
    clock_period: Duration,
    narrator: Box<dyn VictoryNarrator>,
    rng: GameRng,
    round: Option<Round>,
    generation: u64,
    clock: Option<Clock>,
    events_tx: Sender<TimerEvent>,
    events: Receiver<TimerEvent>,
    victory_message: Option<String>,
    narration: Option<NarrationTicket>,
}

impl GameSession {
    /// A session with all defaults.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        GameSessionBuilder::new().build(seed)
    }

    // === Commands ===

    /// Start a round at the named difficulty.
    ///
    /// Fails with `UnknownDifficulty` for names missing from the catalog
    /// (and `InvalidPairCount` if the pool cannot cover the grid); the
    /// current state is untouched on failure.
    pub fn start_round(&mut self, difficulty: &str) -> Result<GameSnapshot, GameError> {
        let config = self.catalog.resolve(difficulty)?.clone();
        self.begin(config)
    }

    /// Reveal a tile. Rejected inputs (menu, unknown id, tile face-up,
    /// evaluation in progress) are silent no-ops.
    pub fn reveal_tile(&mut self, id: TileId) -> GameSnapshot {
        if let Some(round) = &mut self.round {
            if let RevealOutcome::Evaluating { settle_ms } = round.reveal(id) {
                schedule_settle(
                    self.events_tx.clone(),
                    Duration::from_millis(settle_ms),
                    self.generation,
                );
            }
        }
        self.snapshot()
    }

    /// Start over at the current difficulty. A no-op on the menu.
    pub fn restart_round(&mut self) -> GameSnapshot {
        let Some(config) = self.round.as_ref().map(|r| r.difficulty().clone()) else {
            return self.snapshot();
        };
        // The config came from a round that already built once; failure here
        // would need the pool to have shrunk mid-session, which it cannot.
        self.begin(config).unwrap_or_else(|_| self.snapshot())
    }

    /// Abandon the round and go back to the menu.
    pub fn return_to_menu(&mut self) -> GameSnapshot {
        self.invalidate();
        self.round = None;
        self.victory_message = None;
        self.narration = None;
        self.snapshot()
    }

    /// Apply pending timer and narration events, then report state.
    ///
    /// Host loops call this each frame (or on channel readiness). Events
    /// stamped with an older generation are discarded here.
    pub fn pump(&mut self) -> GameSnapshot {
        while let Ok(event) = self.events.try_recv() {
            match event {
                TimerEvent::Tick { generation } if generation == self.generation => {
                    if let Some(round) = &mut self.round {
                        round.tick();
                    }
                }
                TimerEvent::Settle { generation } if generation == self.generation => {
                    self.apply_settle();
                }
                // Stale generation: a cancelled timer firing late.
                TimerEvent::Tick { .. } | TimerEvent::Settle { .. } => {}
            }
        }

        self.poll_narration();
        self.snapshot()
    }

    // === Observation ===

    /// Current observable state.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        match &self.round {
            Some(round) => GameSnapshot::of_round(
                round,
                self.generation,
                VictorySnapshot {
                    message: self.victory_message.clone(),
                    loading: self.narration.is_some(),
                },
            ),
            None => GameSnapshot::idle(self.generation),
        }
    }

    /// The difficulty table offered to players.
    #[must_use]
    pub fn catalog(&self) -> &DifficultyCatalog {
        &self.catalog
    }

    /// Current round generation. Bumps on every start/reset.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    // === Internals ===

    /// Tear down the previous round's timers and invalidate everything
    /// still in flight.
    fn invalidate(&mut self) {
        if let Some(clock) = &self.clock {
            clock.stop();
        }
        self.clock = None;
        self.generation += 1;
        while self.events.try_recv().is_ok() {}
    }

    /// Swap in a fresh round for `config`.
    fn begin(&mut self, config: DifficultyConfig) -> Result<GameSnapshot, GameError> {
        // Build first so a failure leaves the current round playable.
        let round = Round::start(config, &self.deck_builder, self.timings, self.rng.fork())?;

        self.invalidate();
        self.round = Some(round);
        self.victory_message = None;
        self.narration = None;
        self.clock = Some(Clock::with_period(
            self.events_tx.clone(),
            self.generation,
            self.clock_period,
        ));

        Ok(self.snapshot())
    }

    fn apply_settle(&mut self) {
        let Some(round) = &mut self.round else {
            return;
        };

        if round.settle() == Some(Settled::Matched { won: true }) {
            if let Some(clock) = &self.clock {
                clock.stop();
            }
            self.clock = None;

            let stats = round.stats();
            self.victory_message = None;
            self.narration = Some(self.narrator.narrate(&stats));
        }
    }

    fn poll_narration(&mut self) {
        if let Some(ticket) = &mut self.narration {
            if let Some(text) = ticket.try_take() {
                self.victory_message = Some(text);
                self.narration = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::round::RoundStatus;

    fn quick_session(seed: u64) -> GameSession {
        GameSessionBuilder::new()
            .timings(SettleTimings::immediate())
            .clock_period(Duration::from_millis(5))
            .build(seed)
    }

    /// Pump until `pred` holds or a generous deadline passes.
    fn pump_until(
        session: &mut GameSession,
        pred: impl Fn(&GameSnapshot) -> bool,
    ) -> GameSnapshot {
        let deadline = std::time::Instant::now() + Duration::from_secs(5);
        loop {
            let snap = session.pump();
            if pred(&snap) {
                return snap;
            }
            assert!(
                std::time::Instant::now() < deadline,
                "timed out waiting for state change"
            );
            std::thread::sleep(Duration::from_millis(2));
        }
    }

    #[test]
    fn test_session_starts_idle() {
        let session = GameSession::new(42);
        let snap = session.snapshot();

        assert_eq!(snap.status, RoundStatus::Idle);
        assert_eq!(snap.generation, 0);
        assert!(snap.tiles.is_empty());
    }

    #[test]
    fn test_start_round() {
        let mut session = quick_session(42);
        let snap = session.start_round("Easy").unwrap();

        assert_eq!(snap.status, RoundStatus::Playing);
        assert_eq!(snap.generation, 1);
        assert_eq!(snap.tiles.len(), 12);
        assert_eq!(snap.feedback.unwrap().text, "Good Luck!");
    }

    #[test]
    fn test_start_unknown_difficulty() {
        let mut session = quick_session(42);

        let err = session.start_round("Nightmare").unwrap_err();
        assert_eq!(
            err,
            GameError::UnknownDifficulty {
                name: "Nightmare".to_string()
            }
        );
        assert_eq!(session.snapshot().status, RoundStatus::Idle);
    }

    #[test]
    fn test_reveal_on_menu_is_noop() {
        let mut session = quick_session(42);
        let snap = session.reveal_tile(TileId::new(0));

        assert_eq!(snap.status, RoundStatus::Idle);
        assert!(snap.pending.is_empty());
    }

    #[test]
    fn test_mismatch_settles_through_pump() {
        let mut session = quick_session(42);
        let snap = session.start_round("Easy").unwrap();

        let first = snap.tiles[0];
        let second = snap
            .tiles
            .iter()
            .find(|t| t.symbol != first.symbol)
            .copied()
            .unwrap();

        session.reveal_tile(first.id);
        let snap = session.reveal_tile(second.id);
        assert_eq!(snap.status, RoundStatus::Evaluating);
        assert_eq!(snap.moves, 1);

        let snap = pump_until(&mut session, |s| s.status == RoundStatus::Playing);
        assert_eq!(snap.matches, 0);
        assert!(snap.pending.is_empty());
        assert!(snap.tiles.iter().all(|t| !t.matched));
        assert!(!snap.tiles.iter().any(|t| t.revealed));
    }

    #[test]
    fn test_match_settles_through_pump() {
        let mut session = quick_session(42);
        let snap = session.start_round("Easy").unwrap();

        let first = snap.tiles[0];
        let partner = snap
            .tiles
            .iter()
            .find(|t| t.symbol == first.symbol && t.id != first.id)
            .copied()
            .unwrap();

        session.reveal_tile(first.id);
        session.reveal_tile(partner.id);

        let snap = pump_until(&mut session, |s| s.matches == 1);
        assert_eq!(snap.status, RoundStatus::Playing);
        let locked: Vec<_> = snap.tiles.iter().filter(|t| t.matched).collect();
        assert_eq!(locked.len(), 2);
        assert!(locked.iter().all(|t| t.revealed));
    }

    #[test]
    fn test_restart_is_a_fresh_round() {
        let mut session = quick_session(42);
        let snap = session.start_round("Medium").unwrap();
        let first_generation = snap.generation;

        session.reveal_tile(snap.tiles[0].id);

        let snap = session.restart_round();
        assert_eq!(snap.generation, first_generation + 1);
        assert_eq!(snap.status, RoundStatus::Playing);
        assert_eq!(snap.moves, 0);
        assert!(snap.pending.is_empty());
        assert!(!snap.tiles.iter().any(|t| t.revealed));
        assert_eq!(snap.difficulty.unwrap().name, "Medium");
    }

    #[test]
    fn test_restart_on_menu_is_noop() {
        let mut session = quick_session(42);
        let snap = session.restart_round();

        assert_eq!(snap.status, RoundStatus::Idle);
        assert_eq!(snap.generation, 0);
    }

    #[test]
    fn test_return_to_menu() {
        let mut session = quick_session(42);
        session.start_round("Easy").unwrap();

        let snap = session.return_to_menu();
        assert_eq!(snap.status, RoundStatus::Idle);
        assert!(snap.tiles.is_empty());
        assert!(snap.victory.message.is_none());
    }

    #[test]
    fn test_clock_drives_elapsed_time() {
        let mut session = quick_session(42);
        session.start_round("Easy").unwrap();

        let snap = pump_until(&mut session, |s| s.elapsed_seconds >= 2);
        assert!(snap.elapsed_seconds >= 2);
    }

    #[test]
    fn test_stale_settle_cannot_touch_new_round() {
        let mut session = quick_session(42);
        let snap = session.start_round("Easy").unwrap();

        // Schedule a match settle, then immediately restart.
        let first = snap.tiles[0];
        let partner = snap
            .tiles
            .iter()
            .find(|t| t.symbol == first.symbol && t.id != first.id)
            .copied()
            .unwrap();
        session.reveal_tile(first.id);
        session.reveal_tile(partner.id);

        let snap = session.restart_round();
        let generation = snap.generation;

        // Give the stale settle ample time to fire, then apply events.
        std::thread::sleep(Duration::from_millis(100));
        let snap = session.pump();

        assert_eq!(snap.generation, generation);
        assert_eq!(snap.moves, 0);
        assert_eq!(snap.matches, 0);
        assert!(snap.tiles.iter().all(|t| !t.matched && !t.revealed));
    }
}
