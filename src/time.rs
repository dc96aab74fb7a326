//! Monotonic time source used for pacing and debouncing.

use embassy_time::{Duration, Instant};

/// Source of monotonic time with a blocking pause
///
/// Modes never read the global clock directly, so the engine can be driven
/// by a simulated timebase on the host.
pub trait Timebase {
    /// Current instant
    fn now(&self) -> Instant;

    /// Block the caller for `duration`
    fn sleep(&mut self, duration: Duration);
}

/// Timebase backed by the `embassy-time` driver of the target
#[derive(Debug, Default, Clone, Copy)]
pub struct BlockingTimebase;

impl Timebase for BlockingTimebase {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&mut self, duration: Duration) {
        embassy_time::block_for(duration);
    }
}
