// bucketgate/src/main.rs
//! bucketgate entry point.
//!
//! Resolves the limiter configuration and dispatches to the selected command.

use anyhow::{Context, Result};
use bucketgate::cli::{Cli, Commands};
use bucketgate::commands::{check, config};
use bucketgate::logger;
use bucketgate_core::TokenBucketLimiter;
use clap::Parser;
use is_terminal::IsTerminal;
use std::fs::File;
use std::io::{self, BufReader};

fn main() -> Result<()> {
    // Must run before parsing so clap's `env` fallbacks can see `.env` values.
    let _ = dotenvy::dotenv();
    let args = Cli::parse();

    if args.quiet {
        logger::init_logger(Some(log::LevelFilter::Off));
    } else if args.debug {
        logger::init_logger(Some(log::LevelFilter::Debug));
    } else {
        logger::init_logger(None);
    }

    match args.command {
        Commands::Check(cmd) => {
            let settings = config::resolve_config(&cmd.limits)?;
            let limiter = TokenBucketLimiter::with_config(settings);

            let stdout = io::stdout();
            let color = stdout.is_terminal();
            let mut writer = stdout.lock();

            let summary = match &cmd.input_file {
                Some(path) => {
                    let file = File::open(path)
                        .with_context(|| format!("Failed to open input file: {}", path.display()))?;
                    check::run_check(&limiter, BufReader::new(file), &mut writer, color)?
                }
                None => check::run_check(&limiter, io::stdin().lock(), &mut writer, color)?,
            };

            if cmd.summary {
                check::write_summary(&summary, &mut writer)?;
            }

            if cmd.fail_on_deny && summary.denied > 0 {
                log::warn!("{} key(s) denied; exiting with failure status.", summary.denied);
                std::process::exit(2);
            }
        }
        Commands::Config(limits) => {
            config::run_show_config(&limits, &mut io::stdout().lock())?;
        }
    }

    Ok(())
}
