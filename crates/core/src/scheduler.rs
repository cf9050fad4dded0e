//! Delayed transitions.
//!
//! Match confirmation, mismatch flip-back and the win summary all happen some
//! milliseconds after the triggering input. They are queued here with a due
//! time and fired by the controller's `tick`. `cancel_all` drops everything
//! when a new game is dealt.

use arrayvec::ArrayVec;

/// A transition waiting for its delay to elapse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScheduledEvent {
    /// Mark both cards matched.
    ConfirmMatch { first: u8, second: u8 },
    /// Turn both cards face-down.
    RevertMismatch { first: u8, second: u8 },
    /// Show the win summary overlay.
    ShowWinSummary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Entry {
    due_ms: u64,
    event: ScheduledEvent,
}

// At most one pending evaluation plus the win summary can be in flight.
const QUEUE_CAPACITY: usize = 4;

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    queue: ArrayVec<Entry, QUEUE_CAPACITY>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `event` to fire `delay_ms` after `now_ms`.
    ///
    /// Returns false if the queue is full (the event is dropped).
    pub fn schedule(&mut self, now_ms: u64, delay_ms: u32, event: ScheduledEvent) -> bool {
        self.queue
            .try_push(Entry {
                due_ms: now_ms + delay_ms as u64,
                event,
            })
            .is_ok()
    }

    /// Remove and return the earliest event due at `now_ms`.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<ScheduledEvent> {
        let idx = self
            .queue
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due_ms <= now_ms)
            .min_by_key(|(_, e)| e.due_ms)
            .map(|(i, _)| i)?;
        Some(self.queue.remove(idx).event)
    }

    /// Due time of the next pending event.
    pub fn next_due(&self) -> Option<u64> {
        self.queue.iter().map(|e| e.due_ms).min()
    }

    pub fn cancel_all(&mut self) {
        self.queue.clear();
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
