//! Real-time drivers: the per-second clock and one-shot settle timers.
//!
//! Both post [`TimerEvent`]s onto the session's channel instead of mutating
//! state directly, so all mutation stays behind one `&mut GameSession`
//! boundary. Every event carries the generation id it was scheduled under;
//! the session discards events whose generation no longer matches, which is
//! how a reset cancels everything still in flight.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Events posted by timers, applied by `GameSession::pump`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerEvent {
    /// One display-timer second elapsed.
    Tick {
        /// Round generation the clock was started under.
        generation: u64,
    },
    /// A settle delay expired.
    Settle {
        /// Round generation the settle was scheduled under.
        generation: u64,
    },
}

/// Elapsed-time ticker: one `Tick` per second while running.
///
/// `stop` is idempotent; a stopped clock posts nothing further. The session
/// additionally generation-guards delivery, so even an event already in the
/// channel when `stop` lands is harmless.
#[derive(Debug)]
pub struct Clock {
    stopped: Arc<AtomicBool>,
}

impl Clock {
    /// Interval between ticks.
    pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

    /// Start ticking once per second.
    #[must_use]
    pub fn start(events: Sender<TimerEvent>, generation: u64) -> Self {
        Self::with_period(events, generation, Self::TICK_INTERVAL)
    }

    /// Start ticking with a custom period. Tests use short periods to avoid
    /// real-time waits.
    #[must_use]
    pub fn with_period(events: Sender<TimerEvent>, generation: u64, period: Duration) -> Self {
        let stopped = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stopped);

        thread::spawn(move || loop {
            thread::sleep(period);
            if flag.load(Ordering::Acquire) {
                break;
            }
            if events.send(TimerEvent::Tick { generation }).is_err() {
                break;
            }
        });

        Self { stopped }
    }

    /// Stop ticking. Safe to call any number of times.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::Release);
    }

    /// Has `stop` been called?
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }
}

impl Drop for Clock {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Post `Settle { generation }` after `delay`.
///
/// Fire-and-forget on purpose: cancellation happens at delivery, where the
/// session compares generations. A receiver that went away is ignored.
pub fn schedule_settle(events: Sender<TimerEvent>, delay: Duration, generation: u64) {
    thread::spawn(move || {
        if !delay.is_zero() {
            thread::sleep(delay);
        }
        let _ = events.send(TimerEvent::Settle { generation });
    });
}
