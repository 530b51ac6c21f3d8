//! Command egress task.
//!
//! Edge-triggered bridge from the store to the downstream actuator
//! services: each independent actuator group is emitted only when one of
//! its fields differs from the last value successfully sent. While the
//! engine is off, all emission is suppressed and the cache is left
//! alone. A failed dispatch keeps the cache untouched so the same
//! request goes out again on the next differing cycle.

use std::time::Duration;

use tracing::{info, warn};

use vcu::command::{ActuatorCommand, LedChannel};
use vcu::config::VcuConfig;
use vcu::consts::PRIO_COMM;

use crate::egress::ActuatorBus;
use crate::store::{OutputSnapshot, Store};
use crate::tasks::{Ticker, escalate_priority, log_stats};

/// Edge-triggered emitter with its previous-command cache.
pub struct CommandEgress<B> {
    bus: B,
    prev: ActuatorCommand,
}

impl<B: ActuatorBus> CommandEgress<B> {
    /// The cache starts at the null command, so the first non-null
    /// output after power-on emits every group that differs from idle.
    pub fn new(bus: B) -> Self {
        Self {
            bus,
            prev: ActuatorCommand::null(0),
        }
    }

    /// Consume the bus back (test support).
    pub fn into_bus(self) -> B {
        self.bus
    }

    /// Emit whatever changed since the last successful emissions.
    pub fn tick(&mut self, snap: &OutputSnapshot) {
        if !snap.engine_on {
            return;
        }
        let out = &snap.out;

        if out.buzzer_on != self.prev.buzzer_on
            || out.buzzer_frequency_hz != self.prev.buzzer_frequency_hz
        {
            match self.bus.buzzer_control(out.buzzer_on, out.buzzer_frequency_hz) {
                Ok(()) => {
                    self.prev.buzzer_on = out.buzzer_on;
                    self.prev.buzzer_frequency_hz = out.buzzer_frequency_hz;
                }
                Err(e) => warn!(error = %e, "buzzer dispatch failed"),
            }
        }

        if out.rear_alert_on != self.prev.rear_alert_on {
            match self.bus.led_control(LedChannel::Rear, out.rear_alert_on) {
                Ok(()) => self.prev.rear_alert_on = out.rear_alert_on,
                Err(e) => warn!(error = %e, "rear led dispatch failed"),
            }
        }

        if out.low_beam_on != self.prev.low_beam_on {
            match self.bus.led_control(LedChannel::FrontLow, out.low_beam_on) {
                Ok(()) => self.prev.low_beam_on = out.low_beam_on,
                Err(e) => warn!(error = %e, "low beam dispatch failed"),
            }
        }

        if out.high_beam_on != self.prev.high_beam_on {
            match self.bus.led_control(LedChannel::FrontHigh, out.high_beam_on) {
                Ok(()) => self.prev.high_beam_on = out.high_beam_on,
                Err(e) => warn!(error = %e, "high beam dispatch failed"),
            }
        }

        if out.alert_interval_ms != self.prev.alert_interval_ms {
            match self.bus.alert_control(out.alert_interval_ms) {
                Ok(()) => self.prev.alert_interval_ms = out.alert_interval_ms,
                Err(e) => warn!(error = %e, "alert dispatch failed"),
            }
        }

        if out.throttle != self.prev.throttle || out.steer != self.prev.steer {
            match self.bus.motor_control(out.throttle, out.steer) {
                Ok(()) => {
                    self.prev.throttle = out.throttle;
                    self.prev.steer = out.steer;
                }
                Err(e) => warn!(error = %e, "motor dispatch failed"),
            }
        }
    }
}

/// Run the egress loop until shutdown is requested.
pub fn run(store: &Store, config: &VcuConfig, bus: Box<dyn ActuatorBus>) {
    escalate_priority("comm", PRIO_COMM, config.request_realtime);
    info!(period_ms = config.comm_period_ms, "comm task up");

    let mut egress = CommandEgress::new(bus);
    let mut ticker = Ticker::new(Duration::from_millis(config.comm_period_ms));

    while store.observe_running() {
        ticker.wait();
        let snap = store.snapshot_output();
        egress.tick(&snap);
    }

    log_stats("comm", &ticker.stats);
}

#[cfg(test)]
mod tests {
    use super::*;
    use vcu::error::EgressError;

    /// What one recorded request looked like.
    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Request {
        Buzzer(bool, i32),
        Led(LedChannel, bool),
        Alert(i32),
        Motor(i32, i32),
    }

    /// Bus that records requests and can be told to refuse them.
    #[derive(Default)]
    struct RecordingBus {
        requests: Vec<Request>,
        fail_motor: bool,
    }

    impl ActuatorBus for RecordingBus {
        fn buzzer_control(&mut self, on: bool, hz: i32) -> Result<(), EgressError> {
            self.requests.push(Request::Buzzer(on, hz));
            Ok(())
        }
        fn led_control(&mut self, channel: LedChannel, on: bool) -> Result<(), EgressError> {
            self.requests.push(Request::Led(channel, on));
            Ok(())
        }
        fn alert_control(&mut self, interval_ms: i32) -> Result<(), EgressError> {
            self.requests.push(Request::Alert(interval_ms));
            Ok(())
        }
        fn motor_control(&mut self, throttle: i32, steer: i32) -> Result<(), EgressError> {
            if self.fail_motor {
                return Err(EgressError::Dispatch {
                    service: "motor_control",
                    reason: "queue full".into(),
                });
            }
            self.requests.push(Request::Motor(throttle, steer));
            Ok(())
        }
    }

    fn snap(out: ActuatorCommand, engine_on: bool) -> OutputSnapshot {
        OutputSnapshot { out, engine_on }
    }

    #[test]
    fn engine_off_suppresses_all_emission() {
        let mut egress = CommandEgress::new(RecordingBus::default());
        let mut out = ActuatorCommand::null(0);
        out.throttle = 40;
        out.high_beam_on = true;
        egress.tick(&snap(out, false));
        assert!(egress.into_bus().requests.is_empty());
    }

    #[test]
    fn identical_cycles_emit_once() {
        let mut egress = CommandEgress::new(RecordingBus::default());
        let mut out = ActuatorCommand::null(0);
        out.throttle = 40;
        out.steer = 10;

        egress.tick(&snap(out, true));
        egress.tick(&snap(out, true));

        let requests = egress.into_bus().requests;
        assert_eq!(requests, vec![Request::Motor(40, 10)]);
    }

    #[test]
    fn only_the_changed_group_is_emitted() {
        let mut egress = CommandEgress::new(RecordingBus::default());
        let mut out = ActuatorCommand::null(0);
        out.throttle = 40;
        egress.tick(&snap(out, true));

        // Change only the throttle: exactly one motor request follows.
        out.throttle = 60;
        egress.tick(&snap(out, true));

        let requests = egress.into_bus().requests;
        assert_eq!(
            requests,
            vec![Request::Motor(40, 0), Request::Motor(60, 0)]
        );
    }

    #[test]
    fn each_led_diffs_independently() {
        let mut egress = CommandEgress::new(RecordingBus::default());
        let mut out = ActuatorCommand::null(0);
        out.low_beam_on = true;
        egress.tick(&snap(out, true));

        out.high_beam_on = true;
        egress.tick(&snap(out, true));

        let requests = egress.into_bus().requests;
        assert_eq!(
            requests,
            vec![
                Request::Led(LedChannel::FrontLow, true),
                Request::Led(LedChannel::FrontHigh, true),
            ]
        );
    }

    #[test]
    fn emergency_command_emits_every_affected_group() {
        let mut egress = CommandEgress::new(RecordingBus::default());
        let mut out = ActuatorCommand::null(0);
        out.throttle = -100;
        out.buzzer_on = true;
        out.buzzer_frequency_hz = 500;
        out.rear_alert_on = true;
        out.alert_interval_ms = 500;
        egress.tick(&snap(out, true));

        let requests = egress.into_bus().requests;
        assert_eq!(
            requests,
            vec![
                Request::Buzzer(true, 500),
                Request::Led(LedChannel::Rear, true),
                Request::Alert(500),
                Request::Motor(-100, 0),
            ]
        );
    }

    #[test]
    fn failed_dispatch_keeps_cache_and_retries() {
        let mut bus = RecordingBus::default();
        bus.fail_motor = true;
        let mut egress = CommandEgress::new(bus);

        let mut out = ActuatorCommand::null(0);
        out.throttle = 40;
        egress.tick(&snap(out, true));
        // Nothing recorded; the cache still holds the null command.
        assert!(egress.bus.requests.is_empty());

        // Next cycle the bus recovers and the same request goes out,
        // even though the command did not change again.
        egress.bus.fail_motor = false;
        egress.tick(&snap(out, true));
        assert_eq!(egress.into_bus().requests, vec![Request::Motor(40, 0)]);
    }

    #[test]
    fn buzzer_diffs_on_frequency_alone() {
        let mut egress = CommandEgress::new(RecordingBus::default());
        let mut out = ActuatorCommand::null(0);
        out.buzzer_on = true;
        out.buzzer_frequency_hz = 500;
        egress.tick(&snap(out, true));

        out.buzzer_frequency_hz = 600;
        egress.tick(&snap(out, true));

        let requests = egress.into_bus().requests;
        assert_eq!(
            requests,
            vec![Request::Buzzer(true, 500), Request::Buzzer(true, 600)]
        );
    }
}
