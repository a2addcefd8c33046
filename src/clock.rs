//! Capture timestamp sources

use std::time::Instant;

/// Monotonic nanosecond clock read when stamping per-frame metadata.
pub trait TimestampSource {
    fn now_nanos(&self) -> i64;
}

/// Nanoseconds elapsed since the clock was created.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimestampSource for MonotonicClock {
    fn now_nanos(&self) -> i64 {
        // Saturates after ~292 years of uptime.
        i64::try_from(self.origin.elapsed().as_nanos()).unwrap_or(i64::MAX)
    }
}

/// Always returns the same timestamp. Useful for reproducible output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl TimestampSource for FixedClock {
    fn now_nanos(&self) -> i64 {
        self.0
    }
}

impl<T: TimestampSource + ?Sized> TimestampSource for &T {
    fn now_nanos(&self) -> i64 {
        (**self).now_nanos()
    }
}
