//! Runtime configuration, loaded from TOML at startup.
//!
//! Every field has a compiled default from [`crate::consts`], so an
//! absent file or an empty table yields a fully valid configuration and
//! the executable needs no flags. Numeric parameters are bounds-checked
//! by [`VcuConfig::validate`] before any thread is started.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{
    COMM_PERIOD_MS, CONTROL_PERIOD_MS, INPUT_PERIOD_MS, LOG_PERIOD_MS, PERIOD_MS_MAX,
    PERIOD_MS_MIN, SENSOR_PERIOD_MS,
};
use crate::error::ConfigError;

/// Top-level VCU configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VcuConfig {
    /// Sensor acquisition period [ms].
    #[serde(default = "default_sensor_period")]
    pub sensor_period_ms: u64,

    /// Joystick acquisition period [ms].
    #[serde(default = "default_input_period")]
    pub input_period_ms: u64,

    /// Control pipeline period [ms].
    #[serde(default = "default_control_period")]
    pub control_period_ms: u64,

    /// Command egress period [ms].
    #[serde(default = "default_comm_period")]
    pub comm_period_ms: u64,

    /// Supervisor status-line period [ms].
    #[serde(default = "default_log_period")]
    pub log_period_ms: u64,

    /// Request SCHED_FIFO priorities and memory locking at startup.
    /// Failure to obtain them is a warning, never fatal.
    #[serde(default = "default_request_realtime")]
    pub request_realtime: bool,
}

fn default_sensor_period() -> u64 {
    SENSOR_PERIOD_MS
}
fn default_input_period() -> u64 {
    INPUT_PERIOD_MS
}
fn default_control_period() -> u64 {
    CONTROL_PERIOD_MS
}
fn default_comm_period() -> u64 {
    COMM_PERIOD_MS
}
fn default_log_period() -> u64 {
    LOG_PERIOD_MS
}
fn default_request_realtime() -> bool {
    true
}

impl Default for VcuConfig {
    fn default() -> Self {
        Self {
            sensor_period_ms: SENSOR_PERIOD_MS,
            input_period_ms: INPUT_PERIOD_MS,
            control_period_ms: CONTROL_PERIOD_MS,
            comm_period_ms: COMM_PERIOD_MS,
            log_period_ms: LOG_PERIOD_MS,
            request_realtime: true,
        }
    }
}

impl VcuConfig {
    /// Parse a configuration from TOML text and validate it.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("failed to read {}: {e}", path.display())))?;
        Self::from_toml(&text)
    }

    /// Bounds-check every numeric parameter.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("sensor_period_ms", self.sensor_period_ms),
            ("input_period_ms", self.input_period_ms),
            ("control_period_ms", self.control_period_ms),
            ("comm_period_ms", self.comm_period_ms),
            ("log_period_ms", self.log_period_ms),
        ] {
            if !(PERIOD_MS_MIN..=PERIOD_MS_MAX).contains(&value) {
                return Err(ConfigError::Validation(format!(
                    "{name} = {value} outside [{PERIOD_MS_MIN}, {PERIOD_MS_MAX}]"
                )));
            }
        }
        Ok(())
    }

    /// Maximum tolerated per-channel sensor age [µs], as used by the
    /// parking system's freshness gate.
    #[inline]
    pub const fn max_sample_age_us(&self) -> u64 {
        crate::consts::APS_MAX_SAMPLE_AGE_CYCLES * self.sensor_period_ms * 1_000
    }
}
