// bucketgate/src/commands/config.rs
//! Resolves limiter settings from a config file, flags, environment and defaults.

use anyhow::{Context, Result};
use log::debug;
use std::io::Write;

use bucketgate_core::BucketConfig;

use crate::cli::LimitArgs;

/// Builds a validated [`BucketConfig`].
///
/// Precedence per field: flag or environment variable, then `--config` file,
/// then [`BucketConfig::default`].
pub fn resolve_config(args: &LimitArgs) -> Result<BucketConfig> {
    let base = match &args.config {
        Some(path) => BucketConfig::load_from_file(path)?,
        None => BucketConfig::default(),
    };

    let capacity = args.capacity.unwrap_or(base.capacity());
    let refill_rate = args.refill_rate.unwrap_or(base.refill_rate());
    debug!("Resolved limiter settings: capacity={}, refill_rate={}", capacity, refill_rate);

    BucketConfig::new(capacity, refill_rate).context("Invalid limiter settings")
}

/// Writes the resolved configuration as YAML.
pub fn run_show_config<W: Write>(args: &LimitArgs, writer: &mut W) -> Result<()> {
    let config = resolve_config(args)?;
    write!(writer, "{}", config.to_yaml_string()?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_defaults_when_nothing_given() {
        let config = resolve_config(&LimitArgs::default()).unwrap();
        assert_eq!(config, BucketConfig::default());
    }

    #[test]
    fn test_flags_override_defaults() {
        let args = LimitArgs {
            capacity: Some(3.0),
            ..LimitArgs::default()
        };
        let config = resolve_config(&args).unwrap();
        assert_eq!(config.capacity(), 3.0);
        assert_eq!(config.refill_rate(), BucketConfig::default().refill_rate());
    }

    #[test]
    fn test_invalid_flag_is_rejected() {
        let args = LimitArgs {
            refill_rate: Some(0.0),
            ..LimitArgs::default()
        };
        let err = resolve_config(&args).unwrap_err();
        assert!(format!("{:#}", err).contains("Invalid limiter settings"));
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let args = LimitArgs {
            config: Some(PathBuf::from("/no/such/bucketgate.yaml")),
            ..LimitArgs::default()
        };
        assert!(resolve_config(&args).is_err());
    }
}
