use core::time::Duration;

/// Default epoch: Friday, October 1, 2021 00:00:00 UTC
pub const DEFAULT_EPOCH: Duration = Duration::from_secs(1_633_046_400);

/// Resolution of the time field: one tick is 10 milliseconds.
pub const TIME_UNIT: Duration = Duration::from_millis(10);

/// [`TIME_UNIT`] in nanoseconds.
pub const TIME_UNIT_NANOS: i64 = TIME_UNIT.as_nanos() as i64;

/// A trait for time sources that return wall-clock time.
///
/// This abstraction allows you to plug in the system clock, a monotonic
/// variant of it, or a mocked time source in tests.
///
/// # Example
///
/// ```
/// use glflake::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn unix_nanos(&self) -> i64 {
///         1234
///     }
/// }
///
/// let time = FixedTime;
/// assert_eq!(time.unix_nanos(), 1234);
/// ```
pub trait TimeSource {
    /// Returns the current time in nanoseconds since the Unix epoch.
    fn unix_nanos(&self) -> i64;
}

/// Converts nanoseconds since the Unix epoch into 10ms ticks.
pub const fn to_ticks(unix_nanos: i64) -> i64 {
    unix_nanos / TIME_UNIT_NANOS
}
