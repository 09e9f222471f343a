use core::time::Duration;

/// Blocks the calling thread while the generator waits out an exhausted tick.
///
/// The generator calls this while holding its lock, so implementations must
/// return once `dur` has passed and must not re-enter the generator.
pub trait SleepProvider {
    fn sleep(&self, dur: Duration);
}

/// Sleeps with [`std::thread::sleep`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadSleep;

impl SleepProvider for ThreadSleep {
    fn sleep(&self, dur: Duration) {
        std::thread::sleep(dur);
    }
}
