//! Shared state store — the single rendezvous between tasks.
//!
//! One mutex serializes every read and write of composite state; the
//! only atomic is the `running` flag, which the signal handler and the
//! supervisor may touch without taking the lock. Tasks take the lock
//! once per cycle to copy their inputs, release it while computing, and
//! reacquire it once to publish, which keeps every critical section to
//! a handful of copies.

use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use vcu::command::ActuatorCommand;
use vcu::input::JoystickInput;
use vcu::mode::ControlMode;
use vcu::sensor::SensorSample;

/// Everything the tasks exchange, guarded by one mutex.
#[derive(Debug, Default, Clone)]
struct World {
    engine_on: bool,
    mode: ControlMode,
    joy: JoystickInput,
    sensor: SensorSample,
    out: ActuatorCommand,
}

/// Consistent copy of the control pipeline's inputs,
/// taken under a single lock acquisition.
#[derive(Debug, Clone, Copy)]
pub struct InputSnapshot {
    pub joy: JoystickInput,
    pub sensor: SensorSample,
    pub mode: ControlMode,
    pub engine_on: bool,
}

/// Consistent copy of the egress task's inputs.
#[derive(Debug, Clone, Copy)]
pub struct OutputSnapshot {
    pub out: ActuatorCommand,
    pub engine_on: bool,
}

/// The shared state store.
///
/// Initialized to safe defaults: engine off, mode Assist, an empty
/// sensor sample (all distances unavailable) and the null command.
#[derive(Debug)]
pub struct Store {
    world: Mutex<World>,
    running: AtomicBool,
}

impl Store {
    pub fn new() -> Self {
        Self {
            world: Mutex::new(World::default()),
            running: AtomicBool::new(true),
        }
    }

    // ── Producer side ──

    /// Overwrite the sensor sample.
    pub fn set_sensor(&self, sample: SensorSample) {
        self.world.lock().sensor = sample;
    }

    /// Overwrite the joystick sample.
    pub fn set_joystick(&self, joy: JoystickInput) {
        self.world.lock().joy = joy;
    }

    /// Set the driving mode (diagnostic bridge contract).
    pub fn set_mode(&self, mode: ControlMode) {
        self.world.lock().mode = mode;
    }

    /// Set the engine enable (diagnostic bridge contract).
    pub fn set_engine(&self, on: bool) {
        self.world.lock().engine_on = on;
    }

    // ── Consumer side ──

    /// Copy the control pipeline's inputs under one lock acquisition.
    pub fn snapshot_inputs(&self) -> InputSnapshot {
        let world = self.world.lock();
        InputSnapshot {
            joy: world.joy,
            sensor: world.sensor,
            mode: world.mode,
            engine_on: world.engine_on,
        }
    }

    /// Publish the actuator command.
    pub fn publish_command(&self, out: ActuatorCommand) {
        self.world.lock().out = out;
    }

    /// Copy the egress task's inputs under one lock acquisition.
    pub fn snapshot_output(&self) -> OutputSnapshot {
        let world = self.world.lock();
        OutputSnapshot {
            out: world.out,
            engine_on: world.engine_on,
        }
    }

    // ── Lifecycle ──

    /// Whether periodic tasks should keep cycling.
    #[inline]
    pub fn observe_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Request cooperative shutdown. Idempotent, signal-safe.
    #[inline]
    pub fn request_stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}
