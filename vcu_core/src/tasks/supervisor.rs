//! Supervisor loop.
//!
//! Runs on the main thread at the lowest priority. Emits a periodic
//! status line summarizing the latest snapshot, and exits as soon as the
//! shutdown flag goes down so the caller can join the periodic tasks.

use std::time::Duration;

use tracing::info;

use vcu::config::VcuConfig;
use vcu::consts::PRIO_SUPERVISOR;

use crate::store::Store;
use crate::tasks::{Ticker, escalate_priority, log_stats};

/// Run the status loop until shutdown is requested.
pub fn run(store: &Store, config: &VcuConfig) {
    escalate_priority("supervisor", PRIO_SUPERVISOR, config.request_realtime);

    let mut ticker = Ticker::new(Duration::from_millis(config.log_period_ms));

    while store.observe_running() {
        ticker.wait();

        let inputs = store.snapshot_inputs();
        let output = store.snapshot_output();
        let sensor = &inputs.sensor;
        let out = &output.out;

        info!(
            lux = sensor.ambient_lux,
            front_mm = sensor.front_tof_mm,
            left_mm = sensor.left_ultra_mm,
            right_mm = sensor.right_ultra_mm,
            rear_mm = sensor.rear_ultra_mm,
            mode = ?inputs.mode,
            engine = inputs.engine_on,
            throttle = out.throttle,
            steer = out.steer,
            low_beam = out.low_beam_on,
            high_beam = out.high_beam_on,
            rear_alert = out.rear_alert_on,
            buzzer = out.buzzer_on,
            aeb = out.aeb_brake,
            "status"
        );
    }

    log_stats("supervisor", &ticker.stats);
}
