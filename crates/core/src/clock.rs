//! Time sources and the display interval timer.
//!
//! The controller never reads the wall clock directly: it asks an injected
//! [`Clock`] for monotonic milliseconds. [`DisplayTimer`] models the
//! one-second "interval" that refreshes the elapsed-time readout; it is polled
//! from the game loop rather than calling back.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

use crate::types::TIMER_INTERVAL_MS;

/// Monotonic millisecond time source.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Real clock, measured from construction.
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Hand-driven clock for tests and replays.
///
/// Clones share the same time, so a test can keep one handle and give another
/// to the controller.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_ms)),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get().saturating_add(ms));
    }

    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

/// Repeating one-second timer that drives the elapsed-time readout.
#[derive(Debug, Clone, Default)]
pub struct DisplayTimer {
    started_at: Option<u64>,
    next_fire: u64,
}

impl DisplayTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start ticking from `now`. The first tick fires one interval later.
    pub fn start(&mut self, now_ms: u64) {
        self.started_at = Some(now_ms);
        self.next_fire = now_ms + TIMER_INTERVAL_MS as u64;
    }

    pub fn stop(&mut self) {
        self.started_at = None;
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    /// Returns whole elapsed seconds when at least one interval boundary has
    /// passed since the last poll. Missed ticks collapse into one.
    pub fn poll(&mut self, now_ms: u64) -> Option<u32> {
        let started = self.started_at?;
        if now_ms < self.next_fire {
            return None;
        }
        let interval = TIMER_INTERVAL_MS as u64;
        let missed = (now_ms - self.next_fire) / interval;
        self.next_fire += (missed + 1) * interval;
        Some(elapsed_secs(started, now_ms))
    }
}

/// `floor((now - started) / 1000)`, saturating at zero.
pub fn elapsed_secs(started_ms: u64, now_ms: u64) -> u32 {
    (now_ms.saturating_sub(started_ms) / 1000) as u32
}
