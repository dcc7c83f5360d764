//! Trailing-edge debouncer
//!
//! Holds at most one pending value. Scheduling replaces whatever was pending
//! and restarts the quiet period, so only the most recent value ever fires.
//! Time is supplied by the caller, which keeps the event loop in charge of
//! suspension and lets tests drive the clock.

use std::time::{Duration, Instant};

/// Default quiet period before a scheduled value fires
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

#[derive(Debug, Clone)]
struct Pending<T> {
    value: T,
    deadline: Instant,
}

#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule `value` to fire once `delay` has passed since `now`.
    /// Any previously pending value is dropped.
    pub fn schedule(&mut self, value: T, now: Instant) {
        self.pending = Some(Pending {
            value,
            deadline: now + self.delay,
        });
    }

    /// Drop the pending value. Returns true if something was pending.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending value will fire, if any
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    /// Take the pending value if its quiet period has elapsed at `now`
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some(p) if now >= p.deadline => self.pending.take().map(|p| p.value),
            _ => None,
        }
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE_MS)
    }
}

#[cfg(test)]
#[path = "debouncer_tests.rs"]
mod debouncer_tests;
