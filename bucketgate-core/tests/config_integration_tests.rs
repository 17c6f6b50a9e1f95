// bucketgate-core/tests/config_integration_tests.rs
use anyhow::Result;
use std::io::Write;
use tempfile::NamedTempFile;

use bucketgate_core::config::{BucketConfig, DEFAULT_CAPACITY, DEFAULT_REFILL_RATE};
use bucketgate_core::TokenBucketLimiter;

#[test]
fn test_load_from_file() -> Result<()> {
    let yaml_content = r#"
capacity: 20
refill_rate: 0.5
"#;
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml_content.as_bytes())?;

    let config = BucketConfig::load_from_file(file.path())?;
    assert_eq!(config.capacity(), 20.0);
    assert_eq!(config.refill_rate(), 0.5);

    let limiter = TokenBucketLimiter::with_config(config);
    assert_eq!(limiter.config(), &config);
    Ok(())
}

#[test]
fn test_load_from_file_rejects_invalid_values() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    file.write_all(b"capacity: 10\nrefill_rate: -3\n")?;

    let err = BucketConfig::load_from_file(file.path()).unwrap_err();
    let chain = format!("{:#}", err);
    assert!(chain.contains("Invalid bucket configuration"), "{}", chain);
    assert!(chain.contains("refill rate (-3)"), "{}", chain);
    Ok(())
}

#[test]
fn test_load_from_file_missing_field() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    file.write_all(b"capacity: 10\n")?;

    assert!(BucketConfig::load_from_file(file.path()).is_err());
    Ok(())
}

#[test]
fn test_load_from_missing_file() {
    let err = BucketConfig::load_from_file("/definitely/not/here/bucketgate.yaml").unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to read config file"));
}

#[test]
fn test_defaults() {
    let config = BucketConfig::default();
    assert_eq!(config.capacity(), DEFAULT_CAPACITY);
    assert_eq!(config.refill_rate(), DEFAULT_REFILL_RATE);
}
