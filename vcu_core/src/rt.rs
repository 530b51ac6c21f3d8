//! Realtime scheduling setup.
//!
//! Each periodic task requests an elevated fixed SCHED_FIFO priority at
//! startup, descending Control > Sensor > Input > Egress > Supervisor.
//! Failure to obtain realtime scheduling (no privilege, no PREEMPT_RT)
//! is a warning, never fatal — callers log and continue at normal
//! priority. Without the `rt` feature all calls are no-ops so tests and
//! development builds never need privileges.

/// Errors during realtime setup.
#[derive(Debug)]
pub enum RtError {
    /// `sched_setscheduler` failed.
    Sched(String),
    /// `mlockall` failed.
    MemLock(String),
}

impl std::fmt::Display for RtError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sched(msg) => write!(f, "RT scheduling: {msg}"),
            Self::MemLock(msg) => write!(f, "memory locking: {msg}"),
        }
    }
}

impl std::error::Error for RtError {}

/// Lock all current and future memory pages (prevent page faults in the
/// periodic loops). Call once from the main thread before spawning.
#[cfg(feature = "rt")]
pub fn lock_memory() -> Result<(), RtError> {
    use nix::sys::mman::{MlockAllFlags, mlockall};
    mlockall(MlockAllFlags::MCL_CURRENT | MlockAllFlags::MCL_FUTURE)
        .map_err(|e| RtError::MemLock(format!("mlockall failed: {e}")))
}

#[cfg(not(feature = "rt"))]
pub fn lock_memory() -> Result<(), RtError> {
    Ok(()) // No-op in development mode
}

/// Set SCHED_FIFO with the given priority for the calling thread.
#[cfg(feature = "rt")]
pub fn set_thread_priority(priority: i32) -> Result<(), RtError> {
    let param = libc::sched_param {
        sched_priority: priority,
    };
    let ret = unsafe { libc::sched_setscheduler(0, libc::SCHED_FIFO, &param) };
    if ret != 0 {
        let err = std::io::Error::last_os_error();
        return Err(RtError::Sched(format!(
            "sched_setscheduler(SCHED_FIFO, {priority}) failed: {err}"
        )));
    }
    Ok(())
}

#[cfg(not(feature = "rt"))]
pub fn set_thread_priority(_priority: i32) -> Result<(), RtError> {
    Ok(()) // No-op in development mode
}
