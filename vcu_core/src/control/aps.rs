//! Automatic Parking System.
//!
//! A three-phase parallel-parking state machine, active only in Auto
//! mode. The vehicle creeps forward along the left-hand wall while a
//! gap detector watches the left ultrasonic channel; once a gap long
//! enough to park in has been measured, the vehicle reverses in, rotates
//! for a fixed number of cycles, and backs up until the rear channel
//! reports the space behind is used up.
//!
//! Commands are produced in raw joystick space `(x, y) ∈ [0,99]²` and
//! mapped to motor percent at the pipeline boundary, so the maneuver
//! tables read in the same units the operator's stick produces.
//!
//! Stale or missing ranging data neutralizes the output for that cycle
//! and freezes the phase; the maneuver resumes when fresh samples return.

use vcu::consts::{
    APS_MIN_SPACE_CM, APS_MODEL_SPEED_CM_PER_MS, APS_REAR_SAFETY_MM, APS_ROTATE_LIMIT,
    APS_WALL_THRESHOLD_MM, JOY_MAX,
};
use vcu::sensor::{DistanceChannel, SensorSample};

/// Neutral command in raw joystick space.
pub const NEUTRAL: (i32, i32) = (50, 50);

/// Creep forward along the wall while measuring.
const DETECT_FORWARD: (i32, i32) = (50, 70);

/// Reverse straight (align with the gap, and final back-up).
const REVERSE_STRAIGHT: (i32, i32) = (50, 35);

/// Reverse while steering into the gap.
const ROTATE_IN: (i32, i32) = (64, 45);

/// Map one raw joystick coordinate onto motor percent.
#[inline]
pub fn joystick_to_motor(v: i32) -> i32 {
    (v.clamp(0, JOY_MAX) * 200 / JOY_MAX) - 100
}

/// Maneuver phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApsPhase {
    /// Driving forward, measuring gaps along the left wall.
    SpaceDetection,
    /// Reversing into the detected space.
    ParkingExecution,
    /// Parked; holding neutral.
    Completed,
}

/// Sub-state of the execution phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExecStep {
    /// Reverse straight until the left channel sees the gap again.
    Align,
    /// Steer into the gap, then back straight up to the rear margin.
    RotateIn,
}

/// What the left-wall gap detector saw this cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GapEvent {
    None,
    /// Left distance jumped beyond the wall reference: a gap starts.
    Opened,
    /// Back at the wall; the gap that just ended measured this long.
    Closed {
        length_cm: i64,
    },
}

/// Edge detector over the left ultrasonic channel.
///
/// Keeps a monotonically minimized wall reference (the closest wall ever
/// seen) and signals when the reading departs from or returns to it.
#[derive(Debug, Default)]
struct GapDetector {
    wall_reference_mm: Option<i32>,
    in_gap: bool,
    opened_at_us: u64,
}

impl GapDetector {
    fn reset(&mut self) {
        *self = Self::default();
    }

    fn observe(&mut self, left_mm: i32, now_us: u64) -> GapEvent {
        let reference = match self.wall_reference_mm {
            Some(r) => r.min(left_mm),
            None => left_mm,
        };
        self.wall_reference_mm = Some(reference);

        if !self.in_gap && left_mm > reference + APS_WALL_THRESHOLD_MM {
            self.in_gap = true;
            self.opened_at_us = now_us;
            return GapEvent::Opened;
        }
        if self.in_gap && left_mm <= reference + APS_WALL_THRESHOLD_MM {
            self.in_gap = false;
            let elapsed_ms = now_us.saturating_sub(self.opened_at_us) / 1_000;
            let length_cm = (elapsed_ms as f64 * APS_MODEL_SPEED_CM_PER_MS) as i64;
            return GapEvent::Closed { length_cm };
        }
        GapEvent::None
    }
}

/// The parking state machine.
#[derive(Debug)]
pub struct ParkingSystem {
    active: bool,
    phase: ApsPhase,
    detector: GapDetector,
    step: ExecStep,
    rotate_cycles: u32,
    completed: bool,
}

impl ParkingSystem {
    pub fn new() -> Self {
        Self {
            active: false,
            phase: ApsPhase::SpaceDetection,
            detector: GapDetector::default(),
            step: ExecStep::Align,
            rotate_cycles: 0,
            completed: false,
        }
    }

    /// Begin a maneuver from scratch.
    pub fn start(&mut self) {
        *self = Self::new();
        self.active = true;
    }

    /// Abort and return to the post-construction state.
    pub fn stop(&mut self) {
        *self = Self::new();
    }

    #[inline]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    #[inline]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    #[inline]
    pub const fn phase(&self) -> ApsPhase {
        self.phase
    }

    /// Whether this cycle's sample is usable for the maneuver.
    ///
    /// The left and rear channels must have produced a reading, and no
    /// channel that has produced one may be older than `max_age_us`.
    fn inputs_usable(sensor: &SensorSample, now_us: u64, max_age_us: u64) -> bool {
        if !sensor.is_available(DistanceChannel::Left)
            || !sensor.is_available(DistanceChannel::Rear)
        {
            return false;
        }
        DistanceChannel::ALL
            .into_iter()
            .filter(|&ch| sensor.is_available(ch))
            .all(|ch| sensor.is_fresh(ch, now_us, max_age_us))
    }

    /// Advance one cycle; returns the command in raw joystick space.
    pub fn tick(&mut self, sensor: &SensorSample, now_us: u64, max_age_us: u64) -> (i32, i32) {
        if !self.active {
            return NEUTRAL;
        }
        if !Self::inputs_usable(sensor, now_us, max_age_us) {
            // Hold position; the phase does not advance on bad data.
            return NEUTRAL;
        }

        let left_mm = sensor.distance_mm(DistanceChannel::Left);
        let rear_mm = sensor.distance_mm(DistanceChannel::Rear);

        match self.phase {
            ApsPhase::SpaceDetection => {
                if let GapEvent::Closed { length_cm } = self.detector.observe(left_mm, now_us) {
                    if length_cm >= APS_MIN_SPACE_CM {
                        self.phase = ApsPhase::ParkingExecution;
                        self.step = ExecStep::Align;
                        self.detector.reset();
                        return REVERSE_STRAIGHT;
                    }
                }
                DETECT_FORWARD
            }

            ApsPhase::ParkingExecution => match self.step {
                ExecStep::Align => {
                    if self.detector.observe(left_mm, now_us) == GapEvent::Opened {
                        // The gap is beside us again; straighten out once
                        // before rotating in.
                        self.step = ExecStep::RotateIn;
                        self.rotate_cycles = 0;
                        return NEUTRAL;
                    }
                    REVERSE_STRAIGHT
                }
                ExecStep::RotateIn => {
                    if self.rotate_cycles < APS_ROTATE_LIMIT {
                        self.rotate_cycles += 1;
                        return ROTATE_IN;
                    }
                    if (0..=APS_REAR_SAFETY_MM).contains(&rear_mm) {
                        self.phase = ApsPhase::Completed;
                        self.completed = true;
                        return NEUTRAL;
                    }
                    REVERSE_STRAIGHT
                }
            },

            ApsPhase::Completed => NEUTRAL,
        }
    }
}

impl Default for ParkingSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AGE_LIMIT_US: u64 = 100_000; // 5 × 20 ms

    /// Sample with every channel fresh at `now_us`.
    fn sample(left: i32, rear: i32, now_us: u64) -> SensorSample {
        SensorSample {
            ambient_lux: 200,
            front_tof_mm: 2_000,
            left_ultra_mm: left,
            right_ultra_mm: 600,
            rear_ultra_mm: rear,
            ts_ms: now_us / 1_000,
            channel_ts_us: [now_us; 4],
        }
    }

    #[test]
    fn joystick_to_motor_mapping() {
        assert_eq!(joystick_to_motor(0), -100);
        assert_eq!(joystick_to_motor(99), 100);
        assert_eq!(joystick_to_motor(50), 1);
        assert_eq!(joystick_to_motor(70), 41);
        assert_eq!(joystick_to_motor(35), -30);
        assert_eq!(joystick_to_motor(64), 29);
        // Out-of-range raw values are clamped first.
        assert_eq!(joystick_to_motor(-10), -100);
        assert_eq!(joystick_to_motor(150), 100);
    }

    #[test]
    fn inactive_system_holds_neutral() {
        let mut aps = ParkingSystem::new();
        assert_eq!(aps.tick(&sample(400, 800, 0), 0, AGE_LIMIT_US), NEUTRAL);
        assert!(!aps.is_active());
    }

    #[test]
    fn detection_drives_forward_along_wall() {
        let mut aps = ParkingSystem::new();
        aps.start();
        assert_eq!(
            aps.tick(&sample(400, 800, 1_000), 1_000, AGE_LIMIT_US),
            DETECT_FORWARD
        );
        assert_eq!(aps.phase(), ApsPhase::SpaceDetection);
    }

    #[test]
    fn missing_left_or_rear_neutralizes_without_advancing() {
        let mut aps = ParkingSystem::new();
        aps.start();

        let mut s = sample(400, 800, 1_000);
        s.left_ultra_mm = -1;
        assert_eq!(aps.tick(&s, 1_000, AGE_LIMIT_US), NEUTRAL);

        let mut s = sample(400, 800, 1_000);
        s.rear_ultra_mm = -1;
        assert_eq!(aps.tick(&s, 1_000, AGE_LIMIT_US), NEUTRAL);

        assert_eq!(aps.phase(), ApsPhase::SpaceDetection);
    }

    #[test]
    fn stale_channel_neutralizes_without_advancing() {
        let mut aps = ParkingSystem::new();
        aps.start();

        let mut s = sample(400, 800, 1_000);
        // Rear reading is far older than the permitted age.
        s.channel_ts_us[DistanceChannel::Rear.index()] = 1_000;
        let now = 1_000 + AGE_LIMIT_US + 1;
        assert_eq!(aps.tick(&s, now, AGE_LIMIT_US), NEUTRAL);
        assert_eq!(aps.phase(), ApsPhase::SpaceDetection);
    }

    #[test]
    fn short_gap_is_rejected() {
        let mut aps = ParkingSystem::new();
        aps.start();

        let mut now = 0u64;
        let mut tick = |aps: &mut ParkingSystem, left: i32| {
            now += 20_000;
            aps.tick(&sample(left, 800, now), now, AGE_LIMIT_US)
        };

        tick(&mut aps, 400); // establish the wall reference
        tick(&mut aps, 400);
        tick(&mut aps, 1_200); // gap opens
        // Open for 120 ms in total → 60 cm, far below the 150 cm minimum.
        for _ in 0..5 {
            tick(&mut aps, 1_200);
        }
        tick(&mut aps, 400); // gap closes
        assert_eq!(aps.phase(), ApsPhase::SpaceDetection);
    }

    #[test]
    fn full_parking_sequence_reaches_completed() {
        let mut aps = ParkingSystem::new();
        aps.start();

        let mut now = 0u64;
        let mut tick = |aps: &mut ParkingSystem, left: i32, rear: i32| {
            now += 20_000; // one 20 ms sensor period per cycle
            aps.tick(&sample(left, rear, now), now, AGE_LIMIT_US)
        };

        // ── Space detection ──
        assert_eq!(tick(&mut aps, 400, 800), DETECT_FORWARD);
        assert_eq!(tick(&mut aps, 400, 800), DETECT_FORWARD);
        // Gap opens and stays open for 400 ms → 0.5 cm/ms × 400 ms = 200 cm.
        assert_eq!(tick(&mut aps, 1_200, 800), DETECT_FORWARD);
        for _ in 0..19 {
            assert_eq!(tick(&mut aps, 1_200, 800), DETECT_FORWARD);
        }
        // Wall again: the measured space is accepted and the vehicle
        // starts reversing.
        assert_eq!(tick(&mut aps, 400, 800), REVERSE_STRAIGHT);
        assert_eq!(aps.phase(), ApsPhase::ParkingExecution);

        // ── Align: reverse until the gap is beside us again ──
        assert_eq!(tick(&mut aps, 400, 800), REVERSE_STRAIGHT);
        assert_eq!(tick(&mut aps, 400, 800), REVERSE_STRAIGHT);
        assert_eq!(tick(&mut aps, 1_200, 800), NEUTRAL); // gap found: straighten
        // ── Rotate in for exactly the configured number of cycles ──
        for _ in 0..APS_ROTATE_LIMIT {
            assert_eq!(tick(&mut aps, 1_200, 800), ROTATE_IN);
        }
        // ── Back up straight until the rear margin is reached ──
        assert_eq!(tick(&mut aps, 1_200, 400), REVERSE_STRAIGHT);
        assert_eq!(tick(&mut aps, 1_200, 200), REVERSE_STRAIGHT);
        assert_eq!(tick(&mut aps, 1_200, 90), NEUTRAL);
        assert_eq!(aps.phase(), ApsPhase::Completed);
        assert!(aps.is_completed());

        // Completed holds neutral forever.
        assert_eq!(tick(&mut aps, 1_200, 90), NEUTRAL);
    }

    #[test]
    fn stop_returns_to_post_construction_state() {
        let mut aps = ParkingSystem::new();
        aps.start();

        let mut now = 0u64;
        for left in [400, 400, 1_200, 1_200] {
            now += 20_000;
            aps.tick(&sample(left, 800, now), now, AGE_LIMIT_US);
        }
        aps.stop();
        assert!(!aps.is_active());
        assert!(!aps.is_completed());
        assert_eq!(aps.phase(), ApsPhase::SpaceDetection);
        // The wall reference must not survive a stop.
        assert!(aps.detector.wall_reference_mm.is_none());
    }

    #[test]
    fn wall_reference_is_monotonically_minimized() {
        let mut det = GapDetector::default();
        det.observe(500, 0);
        det.observe(380, 1_000);
        det.observe(450, 2_000);
        assert_eq!(det.wall_reference_mm, Some(380));
        // 450 ≤ 380 + 100, so no gap was signaled.
        assert!(!det.in_gap);
        // 481 > 380 + 100 opens a gap.
        assert_eq!(det.observe(481, 3_000), GapEvent::Opened);
    }
}
