//! Victory narrator boundary.
//!
//! On a win the session hands the final [`RoundStats`] to a
//! [`VictoryNarrator`] and keeps playing; the narration arrives later as a
//! plain displayable string. Implementations absorb their own failures -
//! a narrator that cannot produce anything (no service, timeout, malformed
//! response) still yields the fixed fallback line, so the session never
//! handles narrator errors.
//!
//! The engine ships [`FallbackNarrator`], which resolves immediately with
//! the fallback. Hosts wanting a text-generation service implement the
//! trait, spawn their own worker, and send the result through the ticket's
//! channel.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use crate::round::RoundStats;

/// Shown when the narrator cannot produce a message.
pub const FALLBACK_VICTORY_MESSAGE: &str =
    "Amazing performance! You have the memory of an elephant!";

/// A deferred narration result.
///
/// Poll with [`try_take`](NarrationTicket::try_take); a producer that went
/// away without delivering resolves to the fallback line, never an error.
#[derive(Debug)]
pub struct NarrationTicket {
    rx: Receiver<String>,
}

impl NarrationTicket {
    /// A ticket plus the sender an asynchronous narrator delivers through.
    ///
    /// Dropping the sender without sending resolves the ticket to the
    /// fallback.
    #[must_use]
    pub fn channel() -> (Sender<String>, Self) {
        let (tx, rx) = mpsc::channel();
        (tx, Self { rx })
    }

    /// A ticket already holding its message.
    #[must_use]
    pub fn resolved(text: impl Into<String>) -> Self {
        let (tx, ticket) = Self::channel();
        // Receiver is held by the ticket, the send cannot fail.
        let _ = tx.send(text.into());
        ticket
    }

    /// Take the narration if it has arrived.
    ///
    /// Returns `None` while still pending. A disconnected producer yields
    /// the fallback line.
    pub fn try_take(&mut self) -> Option<String> {
        match self.rx.try_recv() {
            Ok(text) => Some(text),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(FALLBACK_VICTORY_MESSAGE.to_string()),
        }
    }
}

/// The external celebratory-message collaborator.
///
/// `narrate` must not block; slow work belongs on the implementation's own
/// thread, delivering through the ticket.
pub trait VictoryNarrator: Send {
    /// Begin producing a message for the given final stats.
    fn narrate(&self, stats: &RoundStats) -> NarrationTicket;
}

/// Narrator used when no external service is configured.
///
/// Resolves immediately with the fallback line.
#[derive(Clone, Copy, Debug, Default)]
pub struct FallbackNarrator;

impl VictoryNarrator for FallbackNarrator {
    fn narrate(&self, _stats: &RoundStats) -> NarrationTicket {
        NarrationTicket::resolved(FALLBACK_VICTORY_MESSAGE)
    }
}
