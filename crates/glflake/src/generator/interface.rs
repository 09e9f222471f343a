use crate::{Id, Result};

/// A minimal interface for generating glflake IDs.
pub trait GlflakeGenerator {
    /// Generates the next ID, blocking for at most one tick if the sequence
    /// for the current tick is exhausted.
    ///
    /// # Errors
    ///
    /// - [`Error::TimeOverflow`] once the elapsed time no longer fits in 39
    ///   bits
    /// - [`Error::LockPoisoned`] if another thread panicked while generating
    ///   (not emitted with `parking-lot`)
    ///
    /// [`Error::TimeOverflow`]: crate::Error::TimeOverflow
    /// [`Error::LockPoisoned`]: crate::Error::LockPoisoned
    fn try_next_id(&self) -> Result<Id>;

    /// The machine ID embedded in every ID.
    fn machine_id(&self) -> u16;
}
