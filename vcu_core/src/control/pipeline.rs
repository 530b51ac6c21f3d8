//! Per-cycle control pipeline.
//!
//! Order within one tick: engine gate, High-Beam Assist, driving command
//! (operator law or the parking system), then Automatic Emergency
//! Braking, which may override the motor command. The pipeline owns the
//! only instances of the stateful assistance algorithms.

use vcu::command::ActuatorCommand;
use vcu::mode::ControlMode;
use vcu::sensor::DistanceChannel;

use crate::control::aeb::{AebPredictor, AebState, emergency_override};
use crate::control::aps::{ApsPhase, ParkingSystem, joystick_to_motor};
use crate::control::{drive, hba};
use crate::store::InputSnapshot;

/// The control pipeline state carried across cycles.
#[derive(Debug)]
pub struct ControlPipeline {
    aeb: AebPredictor,
    aps: ParkingSystem,
    max_sample_age_us: u64,
}

impl ControlPipeline {
    /// `max_sample_age_us` bounds the per-channel sensor age the parking
    /// system will still act on.
    pub fn new(max_sample_age_us: u64) -> Self {
        Self {
            aeb: AebPredictor::new(),
            aps: ParkingSystem::new(),
            max_sample_age_us,
        }
    }

    /// Braking decision state after the last tick.
    #[inline]
    pub const fn aeb_state(&self) -> AebState {
        self.aeb.state()
    }

    /// Parking phase after the last tick.
    #[inline]
    pub const fn aps_phase(&self) -> ApsPhase {
        self.aps.phase()
    }

    /// Run one control cycle over a consistent input snapshot.
    pub fn tick(&mut self, snap: &InputSnapshot, now_ms: u64, now_us: u64) -> ActuatorCommand {
        if !snap.engine_on {
            // Engine off: everything idle, and an interrupted maneuver
            // must not resume mid-way when the engine returns.
            self.aps.stop();
            return ActuatorCommand::null(now_ms);
        }

        let mut cmd = ActuatorCommand::null(0);
        cmd.low_beam_on = true;
        cmd.high_beam_on = hba::high_beam_engaged(snap.sensor.ambient_lux);

        match snap.mode {
            ControlMode::Manual | ControlMode::Assist => {
                self.aps.stop();
                let (throttle, steer) = drive::drive_command(&snap.joy, snap.mode);
                cmd.throttle = throttle;
                cmd.steer = steer;
            }
            ControlMode::Auto => {
                if !self.aps.is_active() {
                    self.aps.start();
                }
                let (x_raw, y_raw) = self.aps.tick(&snap.sensor, now_us, self.max_sample_age_us);
                cmd.steer = joystick_to_motor(x_raw);
                cmd.throttle = joystick_to_motor(y_raw);
            }
        }

        // A front reading older than the permitted age is no evidence of
        // an obstacle, exactly like a missing one.
        let front_mm = if snap.sensor.is_available(DistanceChannel::Front)
            && snap
                .sensor
                .is_fresh(DistanceChannel::Front, now_us, self.max_sample_age_us)
        {
            snap.sensor.front_tof_mm
        } else {
            -1
        };

        let forward_speed = cmd.throttle.max(0);
        if self.aeb.evaluate(front_mm, forward_speed) {
            emergency_override(&mut cmd);
        }

        cmd.ts_ms = now_ms;
        cmd
    }
}
