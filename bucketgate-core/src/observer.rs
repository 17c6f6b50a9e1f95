// bucketgate-core/src/observer.rs
//! Admission observers.
//!
//! The limiter reports every decision to an [`AdmissionObserver`]. Hosts inject
//! whatever sink they want (logs, counters, nothing at all) without the limiter
//! depending on a global.
//!
//! License: MIT OR APACHE 2.0

use log::info;

/// Receives exactly one event per `allow` call.
pub trait AdmissionObserver: Send + Sync {
    /// A token was available and consumed for `key`.
    fn admitted(&self, key: &str);

    /// No token was available for `key`.
    fn denied(&self, key: &str);
}

/// Writes each decision to the `log` facade at `info` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl AdmissionObserver for LogObserver {
    fn admitted(&self, key: &str) {
        info!("Request admitted for key '{}'", key);
    }

    fn denied(&self, key: &str) {
        info!("Request denied for key '{}'", key);
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl AdmissionObserver for NoopObserver {
    fn admitted(&self, _key: &str) {}

    fn denied(&self, _key: &str) {}
}
