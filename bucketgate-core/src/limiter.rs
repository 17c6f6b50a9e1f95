// bucketgate-core/src/limiter.rs
//! Defines the `RateLimiter` trait and the keyed token-bucket registry behind it.
//!
//! `TokenBucketLimiter` maps each key to its own [`TokenBucket`]. The registry is
//! a sharded `DashMap`: lookups for existing keys take a shared read on one shard
//! and release it before the bucket is locked, and a brand-new key holds a shard
//! write lock only long enough to insert. Two keys never share a bucket lock.
//!
//! Buckets are never evicted. A process that sees an unbounded number of
//! distinct keys grows without bound.
//!
//! License: MIT OR APACHE 2.0

use dashmap::DashMap;
use log::debug;
use std::sync::Arc;

use crate::bucket::TokenBucket;
use crate::config::BucketConfig;
use crate::errors::BucketgateError;
use crate::observer::{AdmissionObserver, LogObserver};

/// A per-key admission check.
///
/// Hosts (HTTP middleware, CLIs, test harnesses) hold a `dyn RateLimiter` and
/// translate `false` into whatever "throttled" means for them.
pub trait RateLimiter: Send + Sync {
    /// Returns true if `key` is allowed under the current limits, false if throttled.
    fn allow(&self, key: &str) -> bool;
}

/// An in-memory token-bucket limiter keyed by string identifiers.
pub struct TokenBucketLimiter {
    config: BucketConfig,
    buckets: DashMap<String, Arc<TokenBucket>>,
    observer: Arc<dyn AdmissionObserver>,
}

impl TokenBucketLimiter {
    /// Creates a limiter that logs decisions through [`LogObserver`].
    ///
    /// Fails with [`BucketgateError::InvalidConfiguration`] if either value is
    /// not strictly positive.
    pub fn new(capacity: f64, refill_rate: f64) -> Result<Self, BucketgateError> {
        Ok(Self::with_config(BucketConfig::new(capacity, refill_rate)?))
    }

    /// Creates a limiter from an already validated configuration.
    pub fn with_config(config: BucketConfig) -> Self {
        Self::with_observer(config, Arc::new(LogObserver))
    }

    /// Creates a limiter that reports decisions to `observer`.
    pub fn with_observer(config: BucketConfig, observer: Arc<dyn AdmissionObserver>) -> Self {
        Self {
            config,
            buckets: DashMap::new(),
            observer,
        }
    }

    /// Checks and consumes one token for `key`, creating its bucket on first use.
    pub fn allow(&self, key: &str) -> bool {
        let bucket = self.bucket_for(key);
        let allowed = bucket.try_consume();

        if allowed {
            self.observer.admitted(key);
        } else {
            self.observer.denied(key);
        }

        allowed
    }

    /// Returns the bucket for `key`, inserting a full one if none exists.
    ///
    /// The map guard is dropped before returning so `try_consume` never runs
    /// while a shard lock is held.
    fn bucket_for(&self, key: &str) -> Arc<TokenBucket> {
        if let Some(existing) = self.buckets.get(key) {
            return Arc::clone(existing.value());
        }

        let entry = self.buckets.entry(key.to_owned()).or_insert_with(|| {
            debug!("Creating token bucket for key '{}'", key);
            Arc::new(TokenBucket::new(&self.config))
        });
        Arc::clone(entry.value())
    }

    /// The configuration shared by every bucket.
    pub fn config(&self) -> &BucketConfig {
        &self.config
    }

    /// Number of distinct keys seen so far.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// True until the first key has been checked.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Whether `key` already has a bucket. Does not create one.
    pub fn contains_key(&self, key: &str) -> bool {
        self.buckets.contains_key(key)
    }

    /// Token level of `key`'s bucket as of its last refill, if it exists.
    pub fn tokens(&self, key: &str) -> Option<f64> {
        let bucket = self.buckets.get(key).map(|entry| Arc::clone(entry.value()))?;
        Some(bucket.tokens())
    }
}

impl RateLimiter for TokenBucketLimiter {
    fn allow(&self, key: &str) -> bool {
        TokenBucketLimiter::allow(self, key)
    }
}

impl std::fmt::Debug for TokenBucketLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenBucketLimiter")
            .field("config", &self.config)
            .field("buckets", &self.buckets.len())
            .finish()
    }
}
