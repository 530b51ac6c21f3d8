//! Configuration file loading tests.

use std::io::Write;

use vcu_common::config::VcuConfig;
use vcu_common::error::ConfigError;

#[test]
fn load_missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("does_not_exist.toml");

    let config = VcuConfig::load(&path).unwrap();
    assert_eq!(config.control_period_ms, 20);
    assert_eq!(config.log_period_ms, 500);
}

#[test]
fn load_reads_and_validates_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vcu.toml");
    let mut f = std::fs::File::create(&path).unwrap();
    writeln!(f, "control_period_ms = 40").unwrap();
    writeln!(f, "log_period_ms = 250").unwrap();
    writeln!(f, "request_realtime = false").unwrap();

    let config = VcuConfig::load(&path).unwrap();
    assert_eq!(config.control_period_ms, 40);
    assert_eq!(config.log_period_ms, 250);
    assert!(!config.request_realtime);
    // Untouched fields keep their compiled defaults.
    assert_eq!(config.sensor_period_ms, 20);
}

#[test]
fn load_rejects_malformed_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vcu.toml");
    std::fs::write(&path, "control_period_ms = \"fast\"").unwrap();

    let err = VcuConfig::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn load_rejects_out_of_bounds_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vcu.toml");
    std::fs::write(&path, "log_period_ms = 100000").unwrap();

    let err = VcuConfig::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(_)));
}
