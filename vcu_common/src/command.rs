//! Actuator command published by the control pipeline.
//!
//! The command is the single output of one control cycle. Lighting is
//! encoded as one boolean per logical LED so the egress task can diff and
//! emit each LED independently without decoding anything.

use serde::{Deserialize, Serialize};

use crate::consts::{ALERT_OFF_MS, STEER_LIMIT, THROTTLE_LIMIT};

/// The three logical LEDs addressed by the downstream lighting service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum LedChannel {
    /// Rear warning lamp.
    Rear = 0,
    /// Front low beam.
    FrontLow = 1,
    /// Front high beam.
    FrontHigh = 2,
}

/// Complete actuator command for one control cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActuatorCommand {
    /// Motor throttle [−100..=100, %]. Negative is reverse/brake.
    pub throttle: i32,
    /// Steering [−100..=100, %]. Negative is left.
    pub steer: i32,
    /// Front low beam state.
    pub low_beam_on: bool,
    /// Front high beam state.
    pub high_beam_on: bool,
    /// Rear warning lamp state.
    pub rear_alert_on: bool,
    /// Audible warning state.
    pub buzzer_on: bool,
    /// Audible warning tone [Hz], meaningful while `buzzer_on`.
    pub buzzer_frequency_hz: i32,
    /// Emergency-alert cadence [ms]: −1 off, 0 solid, >0 toggle period.
    pub alert_interval_ms: i32,
    /// Set when the emergency brake overrode the motor command.
    pub aeb_brake: bool,
    /// Publication timestamp [ms, monotonic].
    pub ts_ms: u64,
}

impl ActuatorCommand {
    /// The null command: motors stopped, everything dark and silent.
    pub const fn null(ts_ms: u64) -> Self {
        Self {
            throttle: 0,
            steer: 0,
            low_beam_on: false,
            high_beam_on: false,
            rear_alert_on: false,
            buzzer_on: false,
            buzzer_frequency_hz: 0,
            alert_interval_ms: ALERT_OFF_MS,
            aeb_brake: false,
            ts_ms,
        }
    }

    /// Whether the motor command respects its magnitude limits.
    #[inline]
    pub const fn motor_within_limits(&self) -> bool {
        self.throttle.unsigned_abs() <= THROTTLE_LIMIT as u32
            && self.steer.unsigned_abs() <= STEER_LIMIT as u32
    }

    /// Whether this equals the null command, ignoring `ts_ms`.
    pub fn is_null(&self) -> bool {
        let mut probe = *self;
        probe.ts_ms = 0;
        probe == Self::null(0)
    }
}

impl Default for ActuatorCommand {
    fn default() -> Self {
        Self::null(0)
    }
}
