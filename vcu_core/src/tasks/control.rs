//! Control pipeline task.
//!
//! Highest-priority loop: copy the input snapshot under one lock
//! acquisition, run the assistance pipeline with the lock released, and
//! publish the resulting command under a second acquisition.

use std::time::Duration;

use tracing::info;

use vcu::config::VcuConfig;
use vcu::consts::PRIO_CONTROL;

use crate::clock::MonotonicClock;
use crate::control::pipeline::ControlPipeline;
use crate::store::Store;
use crate::tasks::{Ticker, escalate_priority, log_stats};

/// Run the control loop until shutdown is requested.
pub fn run(store: &Store, clock: MonotonicClock, config: &VcuConfig) {
    escalate_priority("control", PRIO_CONTROL, config.request_realtime);
    info!(period_ms = config.control_period_ms, "control task up");

    let mut pipeline = ControlPipeline::new(config.max_sample_age_us());
    let mut ticker = Ticker::new(Duration::from_millis(config.control_period_ms));

    while store.observe_running() {
        ticker.wait();

        let snap = store.snapshot_inputs();
        let cmd = pipeline.tick(&snap, clock.now_ms(), clock.now_us());
        store.publish_command(cmd);
    }

    log_stats("control", &ticker.stats);
}
