//! Read-only state snapshots for rendering.
//!
//! Every host command returns a [`GameSnapshot`]: plain serializable data,
//! detached from the live round. Derived presentation state (grid CSS,
//! disabled flags, formatted timers) is host territory; the snapshot only
//! carries the fields such things derive from.

use serde::{Deserialize, Serialize};

use crate::core::{DifficultyConfig, TileId};
use crate::feedback::{Feedback, Polarity};
use crate::round::{Round, RoundStatus};

/// One tile as the renderer sees it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileSnapshot {
    pub id: TileId,
    pub symbol: char,
    pub revealed: bool,
    pub matched: bool,
}

/// The grid being played.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultySnapshot {
    pub name: String,
    pub rows: u8,
    pub cols: u8,
}

impl From<&DifficultyConfig> for DifficultySnapshot {
    fn from(config: &DifficultyConfig) -> Self {
        Self {
            name: config.name.clone(),
            rows: config.rows,
            cols: config.cols,
        }
    }
}

/// Latest feedback line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackSnapshot {
    pub text: String,
    pub polarity: Polarity,
}

impl From<&Feedback> for FeedbackSnapshot {
    fn from(feedback: &Feedback) -> Self {
        Self {
            text: feedback.text.clone(),
            polarity: feedback.polarity,
        }
    }
}

/// Victory-message display state.
///
/// `loading` is true from the win until the narrator resolves.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VictorySnapshot {
    pub message: Option<String>,
    pub loading: bool,
}

/// Complete observable state of the session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub status: RoundStatus,
    /// Round instance tag; bumps on every start/reset.
    pub generation: u64,
    /// `None` on the menu.
    pub difficulty: Option<DifficultySnapshot>,
    /// Empty on the menu; grid order otherwise.
    pub tiles: Vec<TileSnapshot>,
    /// Revealed-unresolved tile ids, in reveal order.
    pub pending: Vec<TileId>,
    pub moves: u32,
    pub matches: u32,
    pub elapsed_seconds: u32,
    /// `None` on the menu.
    pub feedback: Option<FeedbackSnapshot>,
    pub victory: VictorySnapshot,
}

impl GameSnapshot {
    /// The menu snapshot: no round, everything zeroed.
    #[must_use]
    pub fn idle(generation: u64) -> Self {
        Self {
            status: RoundStatus::Idle,
            generation,
            difficulty: None,
            tiles: Vec::new(),
            pending: Vec::new(),
            moves: 0,
            matches: 0,
            elapsed_seconds: 0,
            feedback: None,
            victory: VictorySnapshot::default(),
        }
    }

    /// Capture a live round.
    #[must_use]
    pub fn of_round(round: &Round, generation: u64, victory: VictorySnapshot) -> Self {
        Self {
            status: round.status(),
            generation,
            difficulty: Some(round.difficulty().into()),
            tiles: round
                .deck()
                .tiles()
                .iter()
                .map(|t| TileSnapshot {
                    id: t.id,
                    symbol: t.symbol,
                    revealed: t.revealed,
                    matched: t.matched,
                })
                .collect(),
            pending: round.pending().to_vec(),
            moves: round.moves(),
            matches: round.matches(),
            elapsed_seconds: round.elapsed_seconds(),
            feedback: Some(round.feedback().into()),
            victory,
        }
    }

    /// Is a round in progress (reveals might be accepted)?
    #[must_use]
    pub fn in_round(&self) -> bool {
        matches!(self.status, RoundStatus::Playing | RoundStatus::Evaluating)
    }
}
