//! errors.rs - Custom error types for the bucketgate-core library.
//!
//! The limiter has exactly one failure mode: being built with parameters that
//! can never describe a working bucket. Everything after construction is total.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// Errors raised while building a limiter or its [`BucketConfig`](crate::BucketConfig).
///
/// Only construction can fail. `allow` has no error path, so nothing here is
/// ever returned once a limiter exists.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum BucketgateError {
    /// Capacity or refill rate was zero, negative, or not a finite number.
    #[error("Invalid configuration: capacity ({capacity}) and refill rate ({refill_rate}) must both be finite and greater than 0")]
    InvalidConfiguration { capacity: f64, refill_rate: f64 },
}
