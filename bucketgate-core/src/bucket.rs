// bucketgate-core/src/bucket.rs
//! The per-key token bucket.
//!
//! Each bucket owns its own lock. Refill is computed lazily inside
//! [`TokenBucket::try_consume`] from a monotonic clock, so no background task
//! or timer is ever needed.

use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::time::Instant;

use crate::config::BucketConfig;

/// A thread-safe token bucket holding one key's admission budget.
#[derive(Debug)]
pub struct TokenBucket {
    capacity: f64,
    refill_rate: f64, // tokens per second
    state: Mutex<BucketState>,
}

#[derive(Debug)]
struct BucketState {
    tokens: f64,
    last_refill: Instant,
}

impl TokenBucket {
    /// Creates a full bucket whose refill clock starts now.
    pub fn new(config: &BucketConfig) -> Self {
        Self {
            capacity: config.capacity(),
            refill_rate: config.refill_rate(),
            state: Mutex::new(BucketState {
                tokens: config.capacity(),
                last_refill: Instant::now(),
            }),
        }
    }

    /// Attempts to consume a single token. Returns true if permitted.
    ///
    /// The refill, the availability check and the decrement all happen under
    /// this bucket's lock, so concurrent callers never both spend the same token.
    pub fn try_consume(&self) -> bool {
        let mut state = self.lock();
        self.refill(&mut state);

        if state.tokens >= 1.0 {
            state.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    fn refill(&self, state: &mut BucketState) {
        let now = Instant::now();
        // Saturates to zero if `now` were ever behind `last_refill`.
        let elapsed = now.saturating_duration_since(state.last_refill).as_secs_f64();

        if elapsed > 0.0 {
            state.tokens = (state.tokens + elapsed * self.refill_rate).min(self.capacity);
            state.last_refill = now;
        }
    }

    /// Token level as of the last refill. Does not refill.
    pub fn tokens(&self) -> f64 {
        self.lock().tokens
    }

    /// Maximum level this bucket refills to.
    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    /// Tokens added per second of elapsed time.
    pub fn refill_rate(&self) -> f64 {
        self.refill_rate
    }

    // No code path can panic while holding the lock, and every write leaves
    // `tokens` within bounds, so a poisoned guard still holds valid state.
    fn lock(&self) -> MutexGuard<'_, BucketState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
