use crate::{BoxError, ConfigError, DEFAULT_EPOCH, lower_16_bit_private_ip};
use core::{fmt, time::Duration};

type MachineIdFn = Box<dyn FnOnce() -> Result<u16, BoxError> + Send>;
type CheckMachineIdFn = Box<dyn FnOnce(u16) -> bool + Send>;

/// Configures a [`Glflake`].
///
/// - **start time**: the epoch from which elapsed time is counted, as a
///   duration since the Unix epoch. Defaults to [`DEFAULT_EPOCH`]. A start
///   time ahead of the current time is rejected.
/// - **machine ID**: a source for the 16-bit ID of this instance. Defaults to
///   the lower 16 bits of this host's private IPv4 address. An error from the
///   source is rejected.
/// - **machine ID check**: an optional validator, e.g. for uniqueness across
///   a fleet. If it returns `false` the machine ID is rejected.
///
/// ```
/// use glflake::{Glflake, Settings};
/// use std::time::{Duration, SystemTime, UNIX_EPOCH};
///
/// let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap();
/// let settings = Settings::new()
///     .with_start_time(now - Duration::from_secs(60))
///     .with_machine_id(42)
///     .with_check_machine_id(|id| id != 0);
///
/// let generator = Glflake::new(settings).unwrap();
/// assert_eq!(generator.machine_id(), 42);
/// ```
///
/// [`Glflake`]: crate::Glflake
#[derive(Default)]
pub struct Settings {
    start_time: Option<Duration>,
    machine_id: Option<MachineIdFn>,
    check_machine_id: Option<CheckMachineIdFn>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the epoch, as a duration since 1970-01-01 UTC.
    #[must_use]
    pub fn with_start_time(mut self, start_time: Duration) -> Self {
        self.start_time = Some(start_time);
        self
    }

    /// Uses a fixed machine ID.
    #[must_use]
    pub fn with_machine_id(self, machine_id: u16) -> Self {
        self.with_machine_id_fn(move || Ok::<_, BoxError>(machine_id))
    }

    /// Resolves the machine ID by calling `f` once during construction.
    #[must_use]
    pub fn with_machine_id_fn<F, E>(mut self, f: F) -> Self
    where
        F: FnOnce() -> Result<u16, E> + Send + 'static,
        E: Into<BoxError>,
    {
        self.machine_id = Some(Box::new(move || f().map_err(Into::into)));
        self
    }

    /// Validates the resolved machine ID during construction.
    #[must_use]
    pub fn with_check_machine_id<F>(mut self, f: F) -> Self
    where
        F: FnOnce(u16) -> bool + Send + 'static,
    {
        self.check_machine_id = Some(Box::new(f));
        self
    }

    /// The configured start time, or [`DEFAULT_EPOCH`].
    pub fn start_time(&self) -> Duration {
        self.start_time.unwrap_or(DEFAULT_EPOCH)
    }

    /// Validates the settings against `now_nanos` (nanoseconds since the Unix
    /// epoch) and resolves the machine ID.
    pub(crate) fn resolve(self, now_nanos: i64) -> Result<Resolved, ConfigError> {
        let start_time = self.start_time();
        let start_nanos = i64::try_from(start_time.as_nanos()).unwrap_or(i64::MAX);
        if start_nanos > now_nanos {
            return Err(ConfigError::StartTimeAhead { start_time });
        }

        let machine_id = match self.machine_id {
            Some(f) => f(),
            None => lower_16_bit_private_ip().map_err(Into::into),
        }
        .map_err(ConfigError::MachineId)?;

        if let Some(check) = self.check_machine_id {
            if !check(machine_id) {
                return Err(ConfigError::InvalidMachineId { machine_id });
            }
        }

        Ok(Resolved {
            start_time,
            start_nanos,
            machine_id,
        })
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("start_time", &self.start_time)
            .field("machine_id", &self.machine_id.as_ref().map(|_| ".."))
            .field("check_machine_id", &self.check_machine_id.as_ref().map(|_| ".."))
            .finish()
    }
}

/// Validated construction inputs.
pub(crate) struct Resolved {
    pub(crate) start_time: Duration,
    pub(crate) start_nanos: i64,
    pub(crate) machine_id: u16,
}
