//! Configuration management for `bucketgate-core`.
//!
//! This module defines [`BucketConfig`], the pair of numbers every bucket in a
//! limiter shares: the burst capacity and the refill rate in tokens per second.
//! A `BucketConfig` can only exist in a valid state. Construction, deserialization
//! and YAML loading all funnel through the same validation.
//!
//! License: MIT OR Apache-2.0

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::errors::BucketgateError;

/// Burst size used when no capacity is configured anywhere.
pub const DEFAULT_CAPACITY: f64 = 10.0;

/// Tokens per second used when no refill rate is configured anywhere.
pub const DEFAULT_REFILL_RATE: f64 = 1.0;

/// Shared, immutable settings for every bucket owned by a limiter.
///
/// Both values are finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBucketConfig")]
pub struct BucketConfig {
    capacity: f64,
    refill_rate: f64,
}

/// Unvalidated shape of a configuration file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawBucketConfig {
    capacity: f64,
    refill_rate: f64,
}

impl TryFrom<RawBucketConfig> for BucketConfig {
    type Error = BucketgateError;

    fn try_from(raw: RawBucketConfig) -> std::result::Result<Self, Self::Error> {
        BucketConfig::new(raw.capacity, raw.refill_rate)
    }
}

fn is_positive_finite(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

impl BucketConfig {
    /// Builds a configuration, rejecting non-positive or non-finite values.
    ///
    /// Values are never clamped: a bad capacity is an error even when the
    /// refill rate is fine, and vice versa.
    pub fn new(capacity: f64, refill_rate: f64) -> std::result::Result<Self, BucketgateError> {
        if !is_positive_finite(capacity) || !is_positive_finite(refill_rate) {
            return Err(BucketgateError::InvalidConfiguration {
                capacity,
                refill_rate,
            });
        }
        Ok(Self {
            capacity,
            refill_rate,
        })
    }

    /// Maximum number of tokens a bucket can hold.
    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    /// Tokens added per second of elapsed time.
    pub fn refill_rate(&self) -> f64 {
        self.refill_rate
    }

    /// Parses a YAML document with `capacity` and `refill_rate` keys.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: BucketConfig =
            serde_yml::from_str(yaml).context("Failed to parse bucket configuration YAML")?;
        debug!(
            "Parsed bucket configuration: capacity={}, refill_rate={}",
            config.capacity, config.refill_rate
        );
        Ok(config)
    }

    /// Loads and validates a YAML configuration file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading bucket configuration from: {}", path.display());
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_yaml_str(&text)
            .with_context(|| format!("Invalid bucket configuration in {}", path.display()))
    }

    /// Serializes the configuration back to YAML.
    pub fn to_yaml_string(&self) -> Result<String> {
        serde_yml::to_string(self).context("Failed to serialize bucket configuration")
    }
}

impl Default for BucketConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            refill_rate: DEFAULT_REFILL_RATE,
        }
    }
}
