//! Device source traits and simulated implementations.
//!
//! Hardware sensor and joystick drivers are external collaborators; the
//! acquisition tasks only see these traits. A read must return within
//! half the acquisition period — a slow or absent device surfaces as a
//! timeout and the affected channels are published as unavailable.

use vcu::error::DeviceError;

pub mod simulation;

/// Raw readings of one sensor poll.
///
/// Distances are in the unit the physical sensor reports: the
/// time-of-flight channel in millimeters, the ultrasonic channels in
/// millimeters except the legacy front fallback, which reports
/// centimeters. Negative means the channel produced nothing this poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorReadings {
    /// Raw ambient-light value. Lower is darker.
    pub ambient_lux: i32,
    /// Forward time-of-flight distance [mm].
    pub front_tof_mm: i32,
    /// Forward ultrasonic fallback distance [cm].
    pub front_ultra_cm: i32,
    /// Left ultrasonic distance [mm].
    pub left_ultra_mm: i32,
    /// Right ultrasonic distance [mm].
    pub right_ultra_mm: i32,
    /// Rear ultrasonic distance [mm].
    pub rear_ultra_mm: i32,
}

impl SensorReadings {
    /// A poll in which every channel failed.
    pub const fn unavailable() -> Self {
        Self {
            ambient_lux: 0,
            front_tof_mm: -1,
            front_ultra_cm: -1,
            left_ultra_mm: -1,
            right_ultra_mm: -1,
            rear_ultra_mm: -1,
        }
    }
}

/// Pluggable source of proximity/ambient readings.
pub trait SensorSource: Send {
    /// The source's identifier, for logs.
    fn name(&self) -> &'static str;

    /// Poll every channel once.
    ///
    /// Individual channel failures are reported in-band as negative
    /// distances; an `Err` means the device as a whole was unreachable
    /// this cycle.
    fn sample(&mut self) -> Result<SensorReadings, DeviceError>;
}

/// Pluggable source of operator joystick coordinates.
pub trait JoystickSource: Send {
    /// The source's identifier, for logs.
    fn name(&self) -> &'static str;

    /// Poll the stick once. `Ok(None)` means no device is attached and
    /// the acquisition task substitutes the neutral position.
    fn poll(&mut self) -> Result<Option<(i32, i32)>, DeviceError>;
}
