//! Error types shared across the VCU workspace.
//!
//! Nothing in the control path propagates these as panics; fallible
//! operations return them and callers fall back to a safe-state command
//! or log and continue.

use thiserror::Error;

use crate::sensor::DistanceChannel;

/// Configuration loading/validation error.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read.
    #[error("config I/O error: {0}")]
    Io(String),

    /// TOML syntax or schema error.
    #[error("config parse error: {0}")]
    Parse(String),

    /// A value is outside its permitted bounds.
    #[error("config validation: {0}")]
    Validation(String),
}

/// Sensor or joystick device error.
///
/// Device reads must not block longer than half the acquisition period;
/// a timeout surfaces here and the channel is published as unavailable.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// A ranging channel did not answer in time.
    #[error("{channel:?} channel read timed out")]
    Timeout {
        /// The channel that timed out.
        channel: DistanceChannel,
    },

    /// The device is not attached.
    #[error("device not connected: {0}")]
    NotConnected(&'static str),

    /// Transport-level failure.
    #[error("device I/O error: {0}")]
    Io(String),
}

/// Downstream actuator dispatch failure.
///
/// Egress logs these and keeps its previous-command cache untouched so
/// the same request is retried on the next cycle.
#[derive(Debug, Error)]
pub enum EgressError {
    /// The request could not be enqueued towards a downstream service.
    #[error("{service} dispatch failed: {reason}")]
    Dispatch {
        /// Downstream service name.
        service: &'static str,
        /// Transport-provided failure description.
        reason: String,
    },
}
