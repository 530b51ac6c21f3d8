//! Control mode selection.
//!
//! The mode is pushed onto the store by the diagnostic bridge (external
//! collaborator) and consumed by the control pipeline once per cycle.

use serde::{Deserialize, Serialize};

/// Operator-selected driving mode.
///
/// `#[repr(u8)]` so the diagnostic bridge can transport the raw value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ControlMode {
    /// Joystick mapped straight through to the motors.
    Manual = 0,
    /// Joystick with steering authority reduced.
    Assist = 1,
    /// Automatic parking system drives the vehicle.
    Auto = 2,
}

impl ControlMode {
    /// Convert from raw `u8`. Returns `None` for invalid values.
    #[inline]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Manual),
            1 => Some(Self::Assist),
            2 => Some(Self::Auto),
            _ => None,
        }
    }
}

impl Default for ControlMode {
    fn default() -> Self {
        Self::Assist
    }
}
