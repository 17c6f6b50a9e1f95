// bucketgate/src/lib.rs
//! # bucketgate CLI Application
//!
//! This crate provides the command-line host for the `bucketgate-core` limiter. It
//! resolves configuration, installs logging, and answers each input key with a verdict.

pub mod cli;
pub mod commands;
pub mod logger;

pub use commands::check::{run_check, write_summary, CheckSummary};
pub use commands::config::resolve_config;
