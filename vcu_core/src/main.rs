//! # VCU Core Binary
//!
//! Single executable for the vehicle control unit core. Spawns one
//! thread per periodic activity, runs the supervisor on the main thread,
//! and terminates cleanly on the standard termination signal.
//!
//! # Usage
//!
//! ```bash
//! # Run with compiled defaults and simulated devices
//! vcu_core
//!
//! # Explicit config file, verbose logging
//! vcu_core -c /etc/vcu/vcu.toml -v
//!
//! # Development: enable the engine at startup so the pipeline drives
//! vcu_core --engine-on
//! ```

#![deny(warnings)]

use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use vcu::config::VcuConfig;

use vcu_core::clock::MonotonicClock;
use vcu_core::devices::simulation::{SimulatedJoystick, SimulatedSensors};
use vcu_core::egress::LoggingActuatorBus;
use vcu_core::store::Store;
use vcu_core::{rt, tasks};

/// VCU Core - realtime control pipeline for the experimental vehicle
#[derive(Parser, Debug)]
#[command(name = "vcu_core")]
#[command(version)]
#[command(about = "Vehicle control unit core: sensors + joystick → actuator commands")]
#[command(long_about = None)]
struct Args {
    /// Path to the configuration file (missing file means defaults)
    #[arg(short, long, default_value = "/etc/vcu/vcu.toml")]
    config: PathBuf,

    /// Enable the engine at startup (normally done by the diagnostic bridge)
    #[arg(long)]
    engine_on: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long)]
    json: bool,
}

fn main() {
    if let Err(e) = run() {
        error!("VCU startup failed: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    setup_tracing(&args);

    info!("VCU Core v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = VcuConfig::load(&args.config)?;
    info!(config = ?args.config, "configuration loaded");

    let store = Arc::new(Store::new());
    let clock = MonotonicClock::new();

    // The signal handler only flips the atomic flag; the supervisor does
    // the actual teardown outside signal context.
    let signal_store = Arc::clone(&store);
    ctrlc::set_handler(move || {
        signal_store.request_stop();
    })?;

    if config.request_realtime {
        if let Err(e) = rt::lock_memory() {
            warn!(error = %e, "memory locking unavailable, continuing without it");
        }
    }

    if args.engine_on {
        info!("development switch: engine enabled at startup");
        store.set_engine(true);
    }

    // One thread per periodic activity; the supervisor keeps the main
    // thread. Device drivers are external collaborators — the simulated
    // sources stand in for them here.
    let mut handles = Vec::with_capacity(4);
    handles.push(spawn("sensor", {
        let store = Arc::clone(&store);
        let config = config.clone();
        move || {
            let source = Box::new(SimulatedSensors::new(clock));
            tasks::sensor::run(&store, clock, &config, source);
        }
    })?);
    handles.push(spawn("input", {
        let store = Arc::clone(&store);
        let config = config.clone();
        move || {
            let source = Box::new(SimulatedJoystick);
            tasks::input::run(&store, clock, &config, source);
        }
    })?);
    handles.push(spawn("control", {
        let store = Arc::clone(&store);
        let config = config.clone();
        move || tasks::control::run(&store, clock, &config)
    })?);
    handles.push(spawn("comm", {
        let store = Arc::clone(&store);
        let config = config.clone();
        move || tasks::comm::run(&store, &config, Box::new(LoggingActuatorBus))
    })?);

    tasks::supervisor::run(&store, &config);

    info!("shutdown requested, joining periodic tasks");
    for handle in handles {
        if handle.join().is_err() {
            error!("a periodic task panicked during shutdown");
        }
    }

    info!("VCU Core shutdown complete");
    Ok(())
}

fn spawn(
    name: &str,
    body: impl FnOnce() + Send + 'static,
) -> std::io::Result<thread::JoinHandle<()>> {
    thread::Builder::new().name(name.to_string()).spawn(body)
}

fn setup_tracing(args: &Args) {
    let default_level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    if args.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_target(false)
            .with_env_filter(filter)
            .init();
    }
}
