use core::time::Duration;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    ConfigError, GlflakeGenerator, Id, Result, Settings, SleepProvider, SystemClock,
    TIME_UNIT, TIME_UNIT_NANOS, ThreadSleep, TimeSource,
    generator::{Mutex, MutexGuard},
    to_ticks,
};

/// Mutable generator state, only touched under the lock.
#[derive(Debug)]
struct State {
    /// Elapsed ticks of the most recent ID.
    elapsed: i64,
    sequence: u8,
}

/// A lock-based glflake generator suitable for multi-threaded environments.
///
/// Every call to [`Glflake::try_next_id`] runs under a single mutex, so one
/// instance can be shared freely (e.g. behind an [`Arc`]) and still emit
/// strictly increasing IDs.
///
/// When all 256 sequence numbers of a tick are used up, the next call advances
/// to the following tick and sleeps (while holding the lock) until the wall
/// clock reaches it, for at most one tick (10ms). If the clock has stepped
/// backward, the stored tick keeps advancing by one per exhausted sequence
/// instead of waiting out the gap; use [`MonotonicClock`] to avoid steps.
///
/// ## Features
/// - ✅ Thread-safe
/// - ✅ Pluggable [`TimeSource`] and [`SleepProvider`]
///
/// [`Arc`]: std::sync::Arc
/// [`MonotonicClock`]: crate::MonotonicClock
pub struct Glflake<T = SystemClock, S = ThreadSleep>
where
    T: TimeSource,
    S: SleepProvider,
{
    #[cfg(feature = "cache-padded")]
    state: crossbeam_utils::CachePadded<Mutex<State>>,
    #[cfg(not(feature = "cache-padded"))]
    state: Mutex<State>,
    start_time: Duration,
    /// Start time in ticks since the Unix epoch.
    start_ticks: i64,
    machine_id: u16,
    pub(crate) time: T,
    sleep: S,
}

impl Glflake {
    /// Creates a generator reading the system clock and sleeping the calling
    /// thread on sequence exhaustion.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the start time is ahead of now, or the
    /// machine ID cannot be resolved or fails validation.
    ///
    /// # Example
    /// ```
    /// use glflake::{Glflake, Settings};
    ///
    /// let generator = Glflake::new(Settings::new().with_machine_id(1)).unwrap();
    /// let a = generator.try_next_id().unwrap();
    /// let b = generator.try_next_id().unwrap();
    /// assert!(a < b);
    /// ```
    pub fn new(settings: Settings) -> Result<Self, ConfigError> {
        Self::with_sources(settings, SystemClock, ThreadSleep)
    }
}

impl<T, S> Glflake<T, S>
where
    T: TimeSource,
    S: SleepProvider,
{
    /// Creates a generator with an explicit time source and sleep provider.
    ///
    /// # Errors
    ///
    /// See [`Glflake::new`].
    pub fn with_sources(settings: Settings, time: T, sleep: S) -> Result<Self, ConfigError> {
        let resolved = settings.resolve(time.unix_nanos())?;
        let state = Mutex::new(State {
            elapsed: 0,
            // The first call always lands on a fresh tick and resets this to 0
            sequence: Id::MAX_SEQUENCE,
        });
        Ok(Self {
            #[cfg(feature = "cache-padded")]
            state: crossbeam_utils::CachePadded::new(state),
            #[cfg(not(feature = "cache-padded"))]
            state,
            start_time: resolved.start_time,
            start_ticks: to_ticks(resolved.start_nanos),
            machine_id: resolved.machine_id,
            time,
            sleep,
        })
    }

    /// The epoch elapsed time is counted from, as a duration since the Unix
    /// epoch.
    pub fn start_time(&self) -> Duration {
        self.start_time
    }

    /// The machine ID embedded in every ID.
    pub fn machine_id(&self) -> u16 {
        self.machine_id
    }

    /// Generates the next unique ID.
    ///
    /// # Errors
    ///
    /// - [`Error::TimeOverflow`] once the elapsed time reaches 2^39 ticks. The
    ///   generator is unusable from then on.
    /// - [`Error::LockPoisoned`] if another thread panicked while generating
    ///   (not emitted with `parking-lot`).
    ///
    /// [`Error::TimeOverflow`]: crate::Error::TimeOverflow
    /// [`Error::LockPoisoned`]: crate::Error::LockPoisoned
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn try_next_id(&self) -> Result<Id> {
        let mut state = self.lock()?;

        let current = self.current_elapsed();
        if state.elapsed < current {
            state.elapsed = current;
            state.sequence = 0;
        } else {
            state.sequence = state.sequence.wrapping_add(1);
            if state.sequence == 0 {
                state.elapsed += 1;
                let overtime = state.elapsed - current;
                self.cold_wait_for_tick(overtime);
            }
        }

        Id::try_from_parts(state.elapsed, self.machine_id, state.sequence)
    }

    fn current_elapsed(&self) -> i64 {
        to_ticks(self.time.unix_nanos()) - self.start_ticks
    }

    #[cold]
    #[inline(never)]
    fn cold_wait_for_tick(&self, overtime: i64) {
        let dur = sleep_time(overtime, self.time.unix_nanos());
        #[cfg(feature = "tracing")]
        tracing::trace!(overtime, ?dur, "sequence exhausted, waiting for next tick");
        self.sleep.sleep(dur);
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>> {
        #[cfg(feature = "parking-lot")]
        {
            Ok(self.state.lock())
        }
        #[cfg(not(feature = "parking-lot"))]
        {
            Ok(self.state.lock()?)
        }
    }
}

impl<T, S> GlflakeGenerator for Glflake<T, S>
where
    T: TimeSource,
    S: SleepProvider,
{
    fn try_next_id(&self) -> Result<Id> {
        self.try_next_id()
    }

    fn machine_id(&self) -> u16 {
        self.machine_id()
    }
}

/// Time left until `overtime` ticks past the tick containing `now_nanos`
/// begins, capped at one tick.
pub(crate) fn sleep_time(overtime: i64, now_nanos: i64) -> Duration {
    let nanos = overtime
        .saturating_mul(TIME_UNIT_NANOS)
        .saturating_sub(now_nanos.rem_euclid(TIME_UNIT_NANOS));
    Duration::from_nanos(u64::try_from(nanos).unwrap_or(0)).min(TIME_UNIT)
}
