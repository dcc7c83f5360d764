//! Debounced query dispatcher
//!
//! Turns every input-change notification into at most one outbound query per
//! quiet period. Queries shorter than the minimum length never schedule a
//! fetch; they cancel whatever was pending and tell the caller to clear.

use std::time::Instant;

use super::debouncer::Debouncer;

/// Minimum query length (in characters) that triggers a fetch
pub const DEFAULT_MIN_QUERY_LEN: usize = 2;

/// What the dispatcher did with a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// A fetch is scheduled for when the quiet period ends
    Scheduled,
    /// Query is below the threshold; pending work was cancelled
    Cleared,
}

#[derive(Debug, Clone)]
pub struct QueryDispatcher {
    debouncer: Debouncer<String>,
    min_len: usize,
}

impl QueryDispatcher {
    pub fn new(debounce_ms: u64, min_len: usize) -> Self {
        Self {
            debouncer: Debouncer::new(debounce_ms),
            min_len,
        }
    }

    pub fn min_len(&self) -> usize {
        self.min_len
    }

    pub fn meets_threshold(&self, query: &str) -> bool {
        query.chars().count() >= self.min_len
    }

    /// Handle an input-change notification
    pub fn notify(&mut self, query: &str, now: Instant) -> Dispatch {
        if !self.meets_threshold(query) {
            if self.debouncer.cancel() {
                log::debug!("Cancelled pending query, input below threshold");
            }
            return Dispatch::Cleared;
        }

        self.debouncer.schedule(query.to_string(), now);
        Dispatch::Scheduled
    }

    /// Query whose quiet period has elapsed, if any
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        self.debouncer.poll(now)
    }

    pub fn cancel(&mut self) -> bool {
        self.debouncer.cancel()
    }

    pub fn has_pending(&self) -> bool {
        self.debouncer.has_pending()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }
}

impl Default for QueryDispatcher {
    fn default() -> Self {
        Self::new(super::debouncer::DEFAULT_DEBOUNCE_MS, DEFAULT_MIN_QUERY_LEN)
    }
}

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod dispatcher_tests;
