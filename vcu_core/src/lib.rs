//! # VCU Core Library
//!
//! Realtime core of the vehicle control unit. Fuses operator input and
//! proximity/ambient sensors into actuator commands through a fixed set
//! of cooperating periodic tasks.
//!
//! ## Architecture
//!
//! Data flows strictly `(Sensor, Input) → Store → Control → Store →
//! Egress`. The [`store::Store`] is the only rendezvous between tasks:
//! one mutex serializes every composite read and write, and each task
//! holds it just long enough to copy its inputs or publish its result.
//! The driving-assistance algorithms ([`control::aeb`], [`control::aps`],
//! [`control::hba`]) are pure or self-contained state machines, so one
//! input stream always produces one command stream.

#![deny(clippy::disallowed_types)]

pub mod clock;
pub mod control;
pub mod devices;
pub mod egress;
pub mod rt;
pub mod store;
pub mod tasks;
