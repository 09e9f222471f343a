use crate::time::TimeSource;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

/// The host wall clock, read through [`SystemTime`] on every call.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn unix_nanos(&self) -> i64 {
        system_unix_nanos()
    }
}

/// A monotonic time source anchored to the wall clock once, at construction.
///
/// Subsequent readings advance by the elapsed [`Instant`] time, so NTP steps or
/// manual clock changes after startup never move IDs backward.
#[derive(Clone, Copy, Debug)]
pub struct MonotonicClock {
    anchor_nanos: i64,
    start: Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            anchor_nanos: system_unix_nanos(),
            start: Instant::now(),
        }
    }
}

impl TimeSource for MonotonicClock {
    fn unix_nanos(&self) -> i64 {
        let elapsed = i64::try_from(self.start.elapsed().as_nanos()).unwrap_or(i64::MAX);
        self.anchor_nanos.saturating_add(elapsed)
    }
}

fn system_unix_nanos() -> i64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(since) => i64::try_from(since.as_nanos()).unwrap_or(i64::MAX),
        // A clock set before 1970 reads as negative time
        Err(before) => i64::try_from(before.duration().as_nanos()).map_or(i64::MIN, |n| -n),
    }
}
