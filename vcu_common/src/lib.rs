//! VCU Common Library
//!
//! Shared data model, constants and configuration loading for the VCU
//! workspace. Everything that crosses a thread or crate boundary lives
//! here: joystick and sensor samples, the actuator command, the control
//! mode, numeric limits, and the TOML runtime configuration.
//!
//! # Usage
//!
//! Add to your `Cargo.toml` with alias for shorter imports:
//! ```toml
//! [dependencies]
//! vcu = { package = "vcu_common", path = "../vcu_common" }
//! ```
//!
//! Then import:
//! ```rust,ignore
//! use vcu::consts::*;
//! use vcu::command::ActuatorCommand;
//! ```

pub mod command;
pub mod config;
pub mod consts;
pub mod error;
pub mod input;
pub mod mode;
pub mod sensor;
