//! Driving-assistance algorithms and the per-cycle control pipeline.
//!
//! Everything in here is deterministic: pure functions (HBA, the drive
//! law) or self-contained state machines (AEB, APS) fed exclusively from
//! the input snapshot and the monotonic clock. Given one input stream,
//! the command stream is always the same.

pub mod aeb;
pub mod aps;
pub mod drive;
pub mod hba;
pub mod pipeline;
