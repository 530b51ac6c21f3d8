//! Simulated devices for development and testing without hardware.
//!
//! The sensor waveform deliberately provokes the assistance algorithms:
//! the forward distance collapses into braking range twice per 20 s
//! sweep, the ambient light drops into darkness for the second half, and
//! the left wall opens into a parkable gap once per sweep.

use vcu::error::DeviceError;

use crate::clock::MonotonicClock;
use crate::devices::{JoystickSource, SensorReadings, SensorSource};

/// Phase-driven synthetic sensor suite.
pub struct SimulatedSensors {
    clock: MonotonicClock,
}

impl SimulatedSensors {
    pub fn new(clock: MonotonicClock) -> Self {
        Self { clock }
    }

    /// Readings for a given phase second within the 20 s sweep.
    fn readings_at(phase_s: u64) -> SensorReadings {
        let front_tof_mm = match phase_s {
            5..=7 => 150,
            12..=15 => 300,
            _ => 1_000,
        };
        // The left wall opens between seconds 8 and 11 (a 3 s gap at the
        // 0.5 cm/ms model speed measures far beyond the minimum space).
        let left_ultra_mm = match phase_s {
            8..=11 => 1_200,
            _ => 400,
        };
        let ambient_lux = if phase_s < 10 { 200 } else { 5 };

        SensorReadings {
            ambient_lux,
            front_tof_mm,
            front_ultra_cm: -1,
            left_ultra_mm,
            right_ultra_mm: 600,
            rear_ultra_mm: 800,
        }
    }
}

impl SensorSource for SimulatedSensors {
    fn name(&self) -> &'static str {
        "simulation"
    }

    fn sample(&mut self) -> Result<SensorReadings, DeviceError> {
        let phase_s = (self.clock.now_ms() / 1_000) % 20;
        Ok(Self::readings_at(phase_s))
    }
}

/// Joystick stand-in that reports no attached device.
pub struct SimulatedJoystick;

impl JoystickSource for SimulatedJoystick {
    fn name(&self) -> &'static str {
        "simulation"
    }

    fn poll(&mut self) -> Result<Option<(i32, i32)>, DeviceError> {
        Ok(None)
    }
}
