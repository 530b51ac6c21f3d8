//! System-wide constants for the VCU workspace.
//!
//! Single source of truth for all cadences, thresholds and calibration
//! values. Imported by all crates — no duplication permitted.

use static_assertions::const_assert;

// ─── Task cadences ──────────────────────────────────────────────────

/// Sensor acquisition period [ms].
pub const SENSOR_PERIOD_MS: u64 = 20;

/// Joystick acquisition period [ms].
pub const INPUT_PERIOD_MS: u64 = 20;

/// Control pipeline period [ms].
pub const CONTROL_PERIOD_MS: u64 = 20;

/// Command egress period [ms].
pub const COMM_PERIOD_MS: u64 = 20;

/// Supervisor status-line period [ms].
pub const LOG_PERIOD_MS: u64 = 500;

/// Minimum allowed periodic-task period [ms] for runtime config.
pub const PERIOD_MS_MIN: u64 = 1;

/// Maximum allowed periodic-task period [ms] for runtime config.
pub const PERIOD_MS_MAX: u64 = 1_000;

// ─── Joystick space ─────────────────────────────────────────────────

/// Maximum raw joystick coordinate (range is `0..=JOY_MAX`).
pub const JOY_MAX: i32 = 99;

/// Neutral raw joystick coordinate on both axes.
pub const JOY_NEUTRAL: i32 = 50;

// ─── Motor command space ────────────────────────────────────────────

/// Throttle magnitude limit [%].
pub const THROTTLE_LIMIT: i32 = 100;

/// Steering magnitude limit [%].
pub const STEER_LIMIT: i32 = 100;

/// Steering magnitude limit in Assist mode [%].
pub const ASSIST_STEER_LIMIT: i32 = 80;

// ─── High-Beam Assist ───────────────────────────────────────────────

/// Ambient-light threshold below which the high beam engages.
///
/// Convention: the raw ambient value is *lower* in darkness, so a reading
/// below this threshold means "dark".
pub const HBA_DARK_THRESHOLD_LUX: i32 = 50;

// ─── Automatic Emergency Braking ────────────────────────────────────

/// Unconditional close-range braking distance [mm].
pub const AEB_CLOSE_RANGE_MM: i32 = 100;

/// Measurement tolerance added to the close-range check [mm].
pub const AEB_CLOSE_TOLERANCE_MM: i32 = 5;

/// Safety margin added to the predicted braking distance [mm].
pub const AEB_PLANNING_MARGIN_MM: i32 = 100;

/// Quadratic coefficient of the empirical brake-distance model.
pub const AEB_POLY_A: i64 = -27;

/// Linear coefficient of the empirical brake-distance model.
pub const AEB_POLY_B: i64 = 6_496;

/// Constant coefficient of the empirical brake-distance model.
pub const AEB_POLY_C: i64 = -112_642;

/// Divisor applied to the polynomial to obtain millimeters.
pub const AEB_POLY_SCALE: i64 = 1_000;

/// Buzzer tone while an emergency brake is active [Hz].
pub const AEB_BUZZER_HZ: i32 = 500;

// ─── Audible warning ────────────────────────────────────────────────

/// Minimum commandable buzzer frequency [Hz].
pub const BUZZER_MIN_HZ: i32 = 250;

/// Maximum commandable buzzer frequency [Hz].
pub const BUZZER_MAX_HZ: i32 = 1_000;

// ─── Emergency-alert cadence ────────────────────────────────────────

/// Alert cadence value meaning "off".
pub const ALERT_OFF_MS: i32 = -1;

/// Alert toggle period while an emergency brake is active [ms].
pub const ALERT_EMERGENCY_INTERVAL_MS: i32 = 500;

// ─── Automatic Parking System ───────────────────────────────────────

/// Left-distance increase over the wall reference that signals a gap [mm].
pub const APS_WALL_THRESHOLD_MM: i32 = 100;

/// Minimum gap length accepted as a parking space [cm].
pub const APS_MIN_SPACE_CM: i64 = 150;

/// Assumed forward speed of the vehicle model during detection [cm/ms].
pub const APS_MODEL_SPEED_CM_PER_MS: f64 = 0.5;

/// Rear distance at or below which the rotate-in maneuver completes [mm].
pub const APS_REAR_SAFETY_MM: i32 = 100;

/// Number of cycles spent steering into the space before straightening.
pub const APS_ROTATE_LIMIT: u32 = 30;

/// Maximum tolerated per-channel sample age, in sensor periods.
pub const APS_MAX_SAMPLE_AGE_CYCLES: u64 = 5;

// ─── Thread priorities (SCHED_FIFO, descending) ─────────────────────

/// Control pipeline thread priority.
pub const PRIO_CONTROL: i32 = 80;

/// Sensor acquisition thread priority.
pub const PRIO_SENSOR: i32 = 70;

/// Input acquisition thread priority.
pub const PRIO_INPUT: i32 = 60;

/// Command egress thread priority.
pub const PRIO_COMM: i32 = 50;

/// Supervisor thread priority.
pub const PRIO_SUPERVISOR: i32 = 40;

// ─── Compile-time sanity ────────────────────────────────────────────

const_assert!(AEB_BUZZER_HZ >= BUZZER_MIN_HZ && AEB_BUZZER_HZ <= BUZZER_MAX_HZ);
const_assert!(ASSIST_STEER_LIMIT <= STEER_LIMIT);
const_assert!(JOY_NEUTRAL <= JOY_MAX);
const_assert!(APS_ROTATE_LIMIT > 0);
const_assert!(PRIO_CONTROL > PRIO_SENSOR);
const_assert!(PRIO_SENSOR > PRIO_INPUT);
const_assert!(PRIO_INPUT > PRIO_COMM);
const_assert!(PRIO_COMM > PRIO_SUPERVISOR);
