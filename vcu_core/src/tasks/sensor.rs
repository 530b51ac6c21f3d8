//! Sensor acquisition task.
//!
//! Polls the sensor source once per period and overwrites the store's
//! sample. The front channel prefers the time-of-flight reading and
//! falls back to the ultrasonic one (reported in centimeters). A channel
//! that produced nothing publishes −1 and keeps its previous per-channel
//! timestamp, so consumers see its age keep growing.

use std::time::Duration;

use tracing::{info, warn};

use vcu::config::VcuConfig;
use vcu::consts::PRIO_SENSOR;
use vcu::sensor::{DistanceChannel, SensorSample};

use crate::clock::MonotonicClock;
use crate::devices::{SensorReadings, SensorSource};
use crate::store::Store;
use crate::tasks::{Ticker, escalate_priority, log_stats};

/// Fuse one poll into a publishable sample.
///
/// `prev_ts_us` carries the per-channel timestamps of the previous
/// sample; channels that read successfully are restamped with `now_us`.
pub fn fuse_readings(
    readings: &SensorReadings,
    prev_ts_us: [u64; 4],
    now_ms: u64,
    now_us: u64,
) -> SensorSample {
    let front_mm = if readings.front_tof_mm >= 0 {
        readings.front_tof_mm
    } else if readings.front_ultra_cm >= 0 {
        readings.front_ultra_cm * 10
    } else {
        -1
    };

    let mut sample = SensorSample {
        ambient_lux: readings.ambient_lux,
        front_tof_mm: front_mm,
        left_ultra_mm: readings.left_ultra_mm,
        right_ultra_mm: readings.right_ultra_mm,
        rear_ultra_mm: readings.rear_ultra_mm,
        ts_ms: now_ms,
        channel_ts_us: prev_ts_us,
    };
    for ch in DistanceChannel::ALL {
        if sample.is_available(ch) {
            sample.channel_ts_us[ch.index()] = now_us;
        }
    }
    sample
}

/// Run the acquisition loop until shutdown is requested.
pub fn run(
    store: &Store,
    clock: MonotonicClock,
    config: &VcuConfig,
    mut source: Box<dyn SensorSource>,
) {
    escalate_priority("sensor", PRIO_SENSOR, config.request_realtime);
    info!(source = source.name(), period_ms = config.sensor_period_ms, "sensor task up");

    let mut ticker = Ticker::new(Duration::from_millis(config.sensor_period_ms));
    let mut prev_ts_us = [0u64; 4];

    while store.observe_running() {
        ticker.wait();

        let readings = match source.sample() {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "sensor poll failed, publishing unavailable channels");
                SensorReadings::unavailable()
            }
        };

        let sample = fuse_readings(&readings, prev_ts_us, clock.now_ms(), clock.now_us());
        prev_ts_us = sample.channel_ts_us;
        store.set_sensor(sample);
    }

    log_stats("sensor", &ticker.stats);
}
