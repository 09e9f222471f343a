use core::time::Duration;

/// A boxed error returned by a caller-supplied machine ID source.
pub type BoxError = Box<dyn core::error::Error + Send + Sync + 'static>;

/// A result type defaulting to this crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Reasons a [`Glflake`] could not be constructed.
///
/// None of these are recoverable by retrying: the [`Settings`] must be fixed
/// first.
///
/// [`Glflake`]: crate::Glflake
/// [`Settings`]: crate::Settings
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The configured start time is later than the current time.
    #[error("start time {start_time:?} since the unix epoch is ahead of the current time")]
    StartTimeAhead {
        /// The rejected start time.
        start_time: Duration,
    },

    /// The machine ID source reported an error.
    #[error("failed to resolve machine id")]
    MachineId(#[source] BoxError),

    /// The machine ID validator rejected the resolved machine ID.
    #[error("machine id {machine_id} was rejected by validation")]
    InvalidMachineId {
        /// The rejected machine ID.
        machine_id: u16,
    },
}

/// All errors a generator can emit.
///
/// When the `parking-lot` feature is enabled mutexes cannot poison, so the only
/// runtime failure left is [`Error::TimeOverflow`].
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Construction failed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The elapsed time no longer fits the 39-bit time field.
    ///
    /// This is terminal for the generator: a new one with a later start time
    /// must be provisioned.
    #[error("elapsed time {elapsed} is over the time limit")]
    TimeOverflow {
        /// Elapsed ticks since the start time that failed to fit.
        elapsed: i64,
    },

    /// The generator lock was poisoned by a panicking thread.
    #[cfg_attr(docsrs, doc(cfg(not(feature = "parking-lot"))))]
    #[cfg(not(feature = "parking-lot"))]
    #[error("generator lock poisoned")]
    LockPoisoned,
}

#[cfg(not(feature = "parking-lot"))]
use crate::generator::{MutexGuard, PoisonError};
#[cfg(not(feature = "parking-lot"))]
impl<T> From<PoisonError<MutexGuard<'_, T>>> for Error {
    fn from(_: PoisonError<MutexGuard<'_, T>>) -> Self {
        Self::LockPoisoned
    }
}
