// bucketgate/src/logger.rs
//! Logger bootstrap for the bucketgate binary.
//!
//! All log records go to stderr so stdout carries only verdicts.

use env_logger::{Builder, Env, Target};
use log::LevelFilter;

/// Installs `env_logger`.
///
/// With `None`, `RUST_LOG` decides and defaults to `warn`. An explicit level
/// overrides `RUST_LOG` entirely. Calling this twice is harmless.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = match level {
        Some(level) => {
            let mut builder = Builder::new();
            builder.filter_level(level);
            builder
        }
        None => Builder::from_env(Env::default().default_filter_or("warn")),
    };
    builder.target(Target::Stderr);

    let _ = builder.try_init();
}
