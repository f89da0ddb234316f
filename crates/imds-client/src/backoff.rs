//! # Fibonacci Backoff
//!
//! Progressive delay between IMDS retry attempts. Grows more slowly than exponential
//! backoff, which keeps a short retry budget from spending most of its time asleep.
//!
//! Sequence with a 100ms minimum: 100ms, 100ms, 200ms, 300ms, 500ms, ... capped at `max`.

use std::time::Duration;

/// Fibonacci backoff calculator
///
/// Each delay is the sum of the previous two, starting from `min` twice.
#[derive(Debug, Clone)]
pub struct FibonacciBackoff {
    prev: Duration,
    current: Duration,
    max: Duration,
}

impl FibonacciBackoff {
    /// Create a new Fibonacci backoff between `min` and `max`
    #[must_use]
    pub fn new(min: Duration, max: Duration) -> Self {
        Self {
            prev: Duration::ZERO,
            current: min,
            max,
        }
    }

    /// Get the next delay and advance the sequence
    pub fn next_backoff(&mut self) -> Duration {
        let result = self.current;
        let next = self.prev.saturating_add(self.current);
        self.prev = self.current;
        self.current = std::cmp::min(next, self.max);
        result
    }
}
