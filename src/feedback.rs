//! Round-event feedback messages.
//!
//! Maps round events to a randomly chosen line from a fixed pool:
//! a positive pool for matches, a neutral pool for mismatches, and a fixed
//! greeting at round start. Draws are uniform and independent - repeats
//! across consecutive calls are allowed.

use serde::{Deserialize, Serialize};

use crate::core::GameRng;

/// Shown when a round starts.
pub const ROUND_START_MESSAGE: &str = "Good Luck!";

/// Lines for a found pair.
pub const POSITIVE_MESSAGES: [&str; 7] = [
    "Match Found!",
    "Great Memory!",
    "Nice One!",
    "You Got It!",
    "Impressive!",
    "Brilliant!",
    "Keep Going!",
];

/// Lines for a missed pair.
pub const NEUTRAL_MESSAGES: [&str; 5] = [
    "Try Again!",
    "Not Quite!",
    "Almost Got It!",
    "Whoops!",
    "Keep Looking!",
];

/// Tone of a feedback line, so renderers can style it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Polarity {
    /// Match / round start.
    Positive,
    /// Mismatch.
    Neutral,
}

/// A feedback line plus its tone.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub text: String,
    pub polarity: Polarity,
}

impl Feedback {
    fn new(text: &str, polarity: Polarity) -> Self {
        Self {
            text: text.to_string(),
            polarity,
        }
    }
}

/// Selects feedback lines from fixed pools.
#[derive(Clone, Debug)]
pub struct FeedbackSelector {
    positive: &'static [&'static str],
    neutral: &'static [&'static str],
}

impl Default for FeedbackSelector {
    fn default() -> Self {
        Self {
            positive: &POSITIVE_MESSAGES,
            neutral: &NEUTRAL_MESSAGES,
        }
    }
}

impl FeedbackSelector {
    /// Selector over the built-in pools.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selector over custom pools. Panics on an empty pool, which is a host
    /// configuration bug.
    pub fn with_pools(
        positive: &'static [&'static str],
        neutral: &'static [&'static str],
    ) -> Self {
        assert!(!positive.is_empty(), "Positive pool must not be empty");
        assert!(!neutral.is_empty(), "Neutral pool must not be empty");

        Self { positive, neutral }
    }

    /// The fixed round-start greeting.
    #[must_use]
    pub fn round_start(&self) -> Feedback {
        Feedback::new(ROUND_START_MESSAGE, Polarity::Positive)
    }

    /// A uniformly chosen positive line.
    #[must_use]
    pub fn positive(&self, rng: &mut GameRng) -> Feedback {
        // Pools are never empty, but stay total anyway.
        let text = rng.choose(self.positive).copied().unwrap_or(ROUND_START_MESSAGE);
        Feedback::new(text, Polarity::Positive)
    }

    /// A uniformly chosen neutral line.
    #[must_use]
    pub fn neutral(&self, rng: &mut GameRng) -> Feedback {
        let text = rng.choose(self.neutral).copied().unwrap_or(ROUND_START_MESSAGE);
        Feedback::new(text, Polarity::Neutral)
    }
}
