use std::time::Duration;

use tokio::time::Instant;

use crate::utils;

/// Period of every steady tick, for both drivers.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Wall-clock source a countdown measures its target against.
pub trait Clock {
    /// Milliseconds since the unix epoch.
    fn now_millis(&self) -> i64;
}

/// Reads the system clock on every call, so clock adjustments are picked up on
/// the next recompute.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        utils::timestamp_millis()
    }
}

/// Wall time read once at construction and advanced by the tokio clock.
///
/// Ignores system clock adjustments and follows paused tokio time.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    anchor_millis: i64,
    anchor: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            anchor_millis: utils::timestamp_millis(),
            anchor: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_millis(&self) -> i64 {
        let elapsed = i64::try_from(self.anchor.elapsed().as_millis()).unwrap_or(i64::MAX);
        self.anchor_millis.saturating_add(elapsed)
    }
}
