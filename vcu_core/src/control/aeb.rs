//! Automatic Emergency Braking.
//!
//! Predicts the braking distance for the current forward speed from a
//! calibrated empirical model and forces a full brake when the forward
//! obstacle is inside it. A close-range check brakes unconditionally
//! regardless of speed. An unavailable front channel (negative distance)
//! is treated as "no evidence of an obstacle" — braking on missing data
//! would make every sensor dropout an emergency stop.

use vcu::command::ActuatorCommand;
use vcu::consts::{
    AEB_BUZZER_HZ, AEB_CLOSE_RANGE_MM, AEB_CLOSE_TOLERANCE_MM, AEB_PLANNING_MARGIN_MM,
    AEB_POLY_A, AEB_POLY_B, AEB_POLY_C, AEB_POLY_SCALE, ALERT_EMERGENCY_INTERVAL_MS,
    THROTTLE_LIMIT,
};

/// Braking decision state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AebState {
    /// No braking required.
    Normal,
    /// Emergency brake engaged this cycle.
    Emergency,
}

impl Default for AebState {
    fn default() -> Self {
        Self::Normal
    }
}

/// Predicted braking distance [mm] for a forward speed in percent.
///
/// `num = −27·v² + 6496·v − 112642`, floored at zero, then divided by
/// 1000 in integer arithmetic. The coefficients are the calibrated
/// empirical brake-distance model of the vehicle; do not retune them
/// without a new measurement campaign.
pub fn braking_distance_mm(forward_speed: i32) -> i32 {
    let v = forward_speed as i64;
    let num = AEB_POLY_A * v * v + AEB_POLY_B * v + AEB_POLY_C;
    (num.max(0) / AEB_POLY_SCALE) as i32
}

/// The emergency-braking predictor.
#[derive(Debug, Default)]
pub struct AebPredictor {
    state: AebState,
}

impl AebPredictor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decision state after the last evaluation.
    #[inline]
    pub const fn state(&self) -> AebState {
        self.state
    }

    /// Evaluate one cycle.
    ///
    /// `distance_mm` is the forward obstacle distance (−1 when the
    /// channel is unavailable); `forward_speed` is the non-negative part
    /// of the commanded throttle. Returns `true` when the emergency
    /// brake must override the motor command.
    pub fn evaluate(&mut self, distance_mm: i32, forward_speed: i32) -> bool {
        if distance_mm < 0 {
            // No evidence of an obstacle.
            self.state = AebState::Normal;
            return false;
        }

        if distance_mm <= AEB_CLOSE_RANGE_MM + AEB_CLOSE_TOLERANCE_MM {
            // Inside the unconditional close-range band.
            self.state = AebState::Emergency;
            return true;
        }

        if forward_speed <= 0 {
            self.state = AebState::Normal;
            return false;
        }

        let d_brake = braking_distance_mm(forward_speed);
        if distance_mm <= d_brake + AEB_PLANNING_MARGIN_MM {
            self.state = AebState::Emergency;
            true
        } else {
            self.state = AebState::Normal;
            false
        }
    }
}

/// Apply the emergency override to a command.
///
/// Full reverse throttle, rear warning lamp, buzzer at the emergency
/// tone, alert cadence on, and the informational `aeb_brake` flag.
pub fn emergency_override(cmd: &mut ActuatorCommand) {
    cmd.throttle = -THROTTLE_LIMIT;
    cmd.rear_alert_on = true;
    cmd.buzzer_on = true;
    cmd.buzzer_frequency_hz = AEB_BUZZER_HZ;
    cmd.alert_interval_ms = ALERT_EMERGENCY_INTERVAL_MS;
    cmd.aeb_brake = true;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_front_channel_never_brakes() {
        let mut aeb = AebPredictor::new();
        assert!(!aeb.evaluate(-1, 100));
        assert_eq!(aeb.state(), AebState::Normal);
    }

    #[test]
    fn close_range_brakes_regardless_of_speed() {
        let mut aeb = AebPredictor::new();
        // At rest, inside the 100+5 mm band.
        assert!(aeb.evaluate(80, 0));
        assert_eq!(aeb.state(), AebState::Emergency);
        assert!(aeb.evaluate(105, 0));
        // Just outside the band at rest: no braking.
        assert!(!aeb.evaluate(106, 0));
        assert_eq!(aeb.state(), AebState::Normal);
    }

    #[test]
    fn stationary_vehicle_ignores_distant_obstacles() {
        let mut aeb = AebPredictor::new();
        assert!(!aeb.evaluate(500, 0));
        assert!(!aeb.evaluate(500, -40));
    }

    #[test]
    fn model_boundary_at_sixty_percent() {
        // v = 60: num = −27·3600 + 6496·60 − 112642 = 179918 → 179 mm,
        // threshold 279 mm.
        assert_eq!(braking_distance_mm(60), 179);

        let mut aeb = AebPredictor::new();
        assert!(!aeb.evaluate(300, 60));
        assert!(aeb.evaluate(270, 60));
    }

    #[test]
    fn model_floors_at_zero_for_low_speeds() {
        // The polynomial is negative below its first root; the predicted
        // distance must never be negative.
        for v in 1..=17 {
            assert_eq!(braking_distance_mm(v), 0, "v={v}");
        }
        assert!(braking_distance_mm(18) >= 0);
        assert!(braking_distance_mm(100) > 0);
    }

    #[test]
    fn override_forces_full_brake_and_warnings() {
        let mut cmd = ActuatorCommand::default();
        cmd.throttle = 80;
        cmd.steer = 20;
        emergency_override(&mut cmd);
        assert_eq!(cmd.throttle, -100);
        assert_eq!(cmd.steer, 20); // steering authority is not touched
        assert!(cmd.rear_alert_on);
        assert!(cmd.buzzer_on);
        assert_eq!(cmd.buzzer_frequency_hz, 500);
        assert_eq!(cmd.alert_interval_ms, 500);
        assert!(cmd.aeb_brake);
    }
}
