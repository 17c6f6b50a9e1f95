// bucketgate/src/cli.rs
//! This file defines the command-line interface (CLI) for the bucketgate application,
//! including all available commands and their arguments.
//! License: MIT OR Apache-2.0

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "bucketgate",
    author = "Obscura Team (Relay)",
    version = env!("CARGO_PKG_VERSION"),
    about = "Per-key token-bucket admission checks",
    long_about = "bucketgate feeds identifiers (user ids, client ids, addresses) through an in-process token-bucket rate limiter. Every key gets its own bucket with a shared burst capacity and refill rate, and each line of input is answered with ALLOW or DENY.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', global = true, help = "Suppress all log output.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, short = 'd', global = true, conflicts_with = "quiet", help = "Enable debug logging.")]
    pub debug: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `bucketgate` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Reads one key per line and prints an admission verdict for each.
    #[command(about = "Reads one key per line and prints ALLOW or DENY for each.")]
    Check(CheckCommand),

    /// Prints the resolved limiter configuration.
    #[command(about = "Prints the resolved limiter configuration as YAML.")]
    Config(LimitArgs),
}

/// Where the bucket parameters come from.
///
/// Flags (or their environment variables) override values from `--config`
/// field by field; anything still unset falls back to the built-in defaults.
#[derive(Args, Debug, Clone, Default)]
pub struct LimitArgs {
    /// Path to a YAML file with `capacity` and `refill_rate`.
    #[arg(long = "config", value_name = "FILE", help = "Path to a YAML limiter configuration file.")]
    pub config: Option<PathBuf>,

    /// Maximum tokens per key (burst size).
    #[arg(long, short = 'c', value_name = "TOKENS", env = "BUCKETGATE_CAPACITY", help = "Maximum tokens per key (burst size).")]
    pub capacity: Option<f64>,

    /// Tokens added per second.
    #[arg(long = "refill-rate", short = 'r', value_name = "PER_SEC", env = "BUCKETGATE_REFILL_RATE", help = "Tokens added to each bucket per second.")]
    pub refill_rate: Option<f64>,
}

/// Arguments for the `check` command.
#[derive(Parser, Debug)]
pub struct CheckCommand {
    #[command(flatten)]
    pub limits: LimitArgs,

    /// Path to an input file (reads from stdin if not provided).
    #[arg(long, short = 'i', value_name = "FILE", help = "Read keys from a specified file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    /// Print admitted/denied totals as JSON after the verdicts.
    #[arg(long = "summary", help = "Print admitted/denied totals as a JSON line after the verdicts.")]
    pub summary: bool,

    /// Exit with a non-zero code if any key was denied.
    #[arg(long = "fail-on-deny", help = "Exit with code 2 if any key was denied.")]
    pub fail_on_deny: bool,
}
