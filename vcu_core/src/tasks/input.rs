//! Joystick acquisition task.
//!
//! Polls the operator joystick once per period. Device absence or a
//! failed read publishes the neutral position, so losing the stick can
//! never leave a stale motion command in the store.

use std::time::Duration;

use tracing::{info, warn};

use vcu::config::VcuConfig;
use vcu::consts::PRIO_INPUT;
use vcu::input::JoystickInput;

use crate::clock::MonotonicClock;
use crate::devices::JoystickSource;
use crate::store::Store;
use crate::tasks::{Ticker, escalate_priority, log_stats};

/// Run the acquisition loop until shutdown is requested.
pub fn run(
    store: &Store,
    clock: MonotonicClock,
    config: &VcuConfig,
    mut source: Box<dyn JoystickSource>,
) {
    escalate_priority("input", PRIO_INPUT, config.request_realtime);
    info!(source = source.name(), period_ms = config.input_period_ms, "input task up");

    let mut ticker = Ticker::new(Duration::from_millis(config.input_period_ms));

    while store.observe_running() {
        ticker.wait();
        let now_ms = clock.now_ms();

        let joy = match source.poll() {
            Ok(Some((x, y))) => JoystickInput::new(x, y, now_ms),
            Ok(None) => JoystickInput::neutral(now_ms),
            Err(e) => {
                warn!(error = %e, "joystick poll failed, holding neutral");
                JoystickInput::neutral(now_ms)
            }
        };
        store.set_joystick(joy);
    }

    log_stats("input", &ticker.stats);
}
