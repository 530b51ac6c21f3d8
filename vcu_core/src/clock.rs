//! Process-wide monotonic clock.
//!
//! Every timestamp in the system (`ts_ms`, per-channel `ts_us`) is taken
//! from one epoch fixed at startup, so producers and consumers agree on
//! age arithmetic and wall-clock jumps cannot fake freshness.

use std::time::Instant;

/// Monotonic clock anchored at process start.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    epoch: Instant,
}

impl MonotonicClock {
    /// Anchor a new clock at the current instant.
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }

    /// Milliseconds since the epoch.
    #[inline]
    pub fn now_ms(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }

    /// Microseconds since the epoch.
    #[inline]
    pub fn now_us(&self) -> u64 {
        self.epoch.elapsed().as_micros() as u64
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}
