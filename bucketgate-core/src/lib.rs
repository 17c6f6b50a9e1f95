// bucketgate-core/src/lib.rs
//! # bucketgate Core Library
//!
//! `bucketgate-core` is an in-process, per-key rate limiter built on the token-bucket
//! algorithm. Each key (a user id, a client id, an IP rendered as text) gets its own
//! bucket with a shared capacity and refill rate. A call to `allow` lazily refills that
//! bucket from a monotonic clock and then spends one token if one is available.
//!
//! There is no networking, persistence, or background work. Hosts such as HTTP
//! middleware call [`RateLimiter::allow`] and decide what a denial means for them.
//!
//! ## Modules
//!
//! * `config`: [`BucketConfig`], validated capacity and refill rate, with YAML loading.
//! * `bucket`: [`TokenBucket`], the per-key state machine and its lock.
//! * `limiter`: [`TokenBucketLimiter`], the key-to-bucket registry, and the [`RateLimiter`] trait.
//! * `observer`: [`AdmissionObserver`], the injectable sink for admit/deny events.
//! * `errors`: [`BucketgateError`].
//!
//! ## Usage Example
//!
//! ```rust
//! use bucketgate_core::{BucketgateError, TokenBucketLimiter};
//!
//! fn main() -> Result<(), BucketgateError> {
//!     // Burst of 5, refilling at 2 tokens per second.
//!     let limiter = TokenBucketLimiter::new(5.0, 2.0)?;
//!
//!     for _ in 0..5 {
//!         assert!(limiter.allow("user-42"));
//!     }
//!     // Other keys are unaffected by user-42 running dry.
//!     assert!(limiter.allow("user-7"));
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Construction is the only fallible step: a non-positive capacity or refill rate yields
//! [`BucketgateError::InvalidConfiguration`]. `allow` never fails; `false` is an ordinary
//! answer. File loading returns `anyhow::Result` with context attached.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod bucket;
pub mod config;
pub mod errors;
pub mod limiter;
pub mod observer;

/// Re-exports the configuration type and its defaults.
pub use config::{BucketConfig, DEFAULT_CAPACITY, DEFAULT_REFILL_RATE};

/// Re-exports the custom error type for clear error reporting.
pub use errors::BucketgateError;

pub use bucket::TokenBucket;
pub use limiter::{RateLimiter, TokenBucketLimiter};
pub use observer::{AdmissionObserver, LogObserver, NoopObserver};
