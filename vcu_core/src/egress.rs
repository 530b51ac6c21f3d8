//! Downstream actuator services.
//!
//! The egress task talks to four idempotent request operations on the
//! outbound messaging stack (an external collaborator). Delivery is
//! best-effort: an error here is logged by the caller and the request is
//! naturally retried because the previous-command cache is only updated
//! after a successful enqueue.

use tracing::debug;

use vcu::command::LedChannel;
use vcu::error::EgressError;

/// The four downstream actuator request operations.
pub trait ActuatorBus: Send {
    /// Audible warning on/off with tone.
    fn buzzer_control(&mut self, on: bool, frequency_hz: i32) -> Result<(), EgressError>;

    /// One logical LED on/off.
    fn led_control(&mut self, channel: LedChannel, on: bool) -> Result<(), EgressError>;

    /// Emergency-alert cadence: −1 off, 0 solid, >0 toggle period [ms].
    fn alert_control(&mut self, interval_ms: i32) -> Result<(), EgressError>;

    /// Motor throttle and steering [%].
    fn motor_control(&mut self, throttle: i32, steer: i32) -> Result<(), EgressError>;
}

impl<T: ActuatorBus + ?Sized> ActuatorBus for Box<T> {
    fn buzzer_control(&mut self, on: bool, frequency_hz: i32) -> Result<(), EgressError> {
        (**self).buzzer_control(on, frequency_hz)
    }

    fn led_control(&mut self, channel: LedChannel, on: bool) -> Result<(), EgressError> {
        (**self).led_control(channel, on)
    }

    fn alert_control(&mut self, interval_ms: i32) -> Result<(), EgressError> {
        (**self).alert_control(interval_ms)
    }

    fn motor_control(&mut self, throttle: i32, steer: i32) -> Result<(), EgressError> {
        (**self).motor_control(throttle, steer)
    }
}

/// Development bus that logs each request instead of transmitting it.
///
/// Stands in for the SOME/IP client in builds without the messaging
/// stack attached.
#[derive(Debug, Default)]
pub struct LoggingActuatorBus;

impl ActuatorBus for LoggingActuatorBus {
    fn buzzer_control(&mut self, on: bool, frequency_hz: i32) -> Result<(), EgressError> {
        debug!(on, frequency_hz, "request buzzer control");
        Ok(())
    }

    fn led_control(&mut self, channel: LedChannel, on: bool) -> Result<(), EgressError> {
        debug!(?channel, on, "request led control");
        Ok(())
    }

    fn alert_control(&mut self, interval_ms: i32) -> Result<(), EgressError> {
        debug!(interval_ms, "request alert control");
        Ok(())
    }

    fn motor_control(&mut self, throttle: i32, steer: i32) -> Result<(), EgressError> {
        debug!(throttle, steer, "request motor control");
        Ok(())
    }
}
