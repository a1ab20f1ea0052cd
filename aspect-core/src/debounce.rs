//! Single-slot trailing-edge debounce.
//!
//! Every new trigger replaces the pending value and pushes the deadline
//! back. Only the most recent value survives to the deadline.

use std::time::Duration;

use tokio::time::Instant;

/// A pending value and the instant it becomes due.
#[derive(Debug)]
pub struct PendingSlot<T> {
    pending: Option<(T, Instant)>,
}

impl<T> PendingSlot<T> {
    /// Create an empty slot.
    #[must_use]
    pub const fn new() -> Self {
        Self { pending: None }
    }

    /// Store `value`, due at `now + delay`.
    ///
    /// Returns `true` if a previously pending value was superseded.
    pub fn schedule(&mut self, value: T, now: Instant, delay: Duration) -> bool {
        self.pending.replace((value, now + delay)).is_some()
    }

    /// Deadline of the pending value, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    /// Whether a value is waiting.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the value if its deadline has passed.
    pub fn take_due(&mut self, now: Instant) -> Option<T> {
        match self.pending {
            Some((_, deadline)) if deadline <= now => self.take(),
            _ => None,
        }
    }

    /// Take the value regardless of its deadline.
    pub fn take(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    /// Drop any pending value.
    pub fn clear(&mut self) {
        self.pending = None;
    }
}

impl<T> Default for PendingSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}
