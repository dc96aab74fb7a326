//! Wall-clock access.
//!
//! Only the Berlin clock talks to the clock source. [`SoftClock`] stands in
//! for a real-time clock chip on boards that have none.

use embassy_time::Instant;

use crate::time::{BlockingTimebase, Timebase};

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Calendar date and time of day as stored by a real-time clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub weekday: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl DateTime {
    /// Date written back when the time is set by hand
    pub const PLACEHOLDER: Self = Self {
        year: 2021,
        month: 1,
        day: 1,
        weekday: 4,
        hour: 0,
        minute: 0,
        second: 0,
    };

    /// Replace the time of day, keeping the date
    ///
    /// Returns `None` if any field is out of range.
    pub const fn with_time(self, hour: u8, minute: u8, second: u8) -> Option<Self> {
        if hour >= 24 || minute >= 60 || second >= 60 {
            return None;
        }
        Some(Self {
            hour,
            minute,
            second,
            ..self
        })
    }

    /// Seconds elapsed since midnight
    pub const fn seconds_of_day(&self) -> u32 {
        self.hour as u32 * 3600 + self.minute as u32 * 60 + self.second as u32
    }
}

/// Abstract real-time clock
pub trait ClockSource {
    /// Read the current date and time
    fn read(&mut self) -> DateTime;

    /// Set the current date and time
    fn write(&mut self, value: DateTime);
}

impl<C: ClockSource + ?Sized> ClockSource for &mut C {
    fn read(&mut self) -> DateTime {
        (**self).read()
    }

    fn write(&mut self, value: DateTime) {
        (**self).write(value);
    }
}

/// Software clock counting from the moment it was last set
///
/// The time of day wraps at midnight, the date is kept as written. Time is
/// read from the same [`Timebase`] that paces the frames.
#[derive(Debug, Clone, Copy)]
pub struct SoftClock<T = BlockingTimebase> {
    base: DateTime,
    set_at: Instant,
    timebase: T,
}

impl SoftClock {
    /// Clock running on the target's `embassy-time` driver
    pub fn new(value: DateTime) -> Self {
        Self::with_timebase(value, BlockingTimebase)
    }
}

impl<T: Timebase> SoftClock<T> {
    /// Create a clock set to `value` now
    pub fn with_timebase(value: DateTime, timebase: T) -> Self {
        let set_at = timebase.now();
        Self::starting_at(value, set_at, timebase)
    }

    /// Create a clock that showed `value` at the instant `set_at`
    pub fn starting_at(value: DateTime, set_at: Instant, timebase: T) -> Self {
        Self {
            base: value,
            set_at,
            timebase,
        }
    }

    /// Date and time at the given instant
    #[allow(clippy::cast_possible_truncation)]
    pub fn at(&self, now: Instant) -> DateTime {
        let elapsed = now.saturating_duration_since(self.set_at).as_secs();
        let seconds = (u64::from(self.base.seconds_of_day()) + elapsed) % SECONDS_PER_DAY;
        DateTime {
            hour: (seconds / 3600) as u8,
            minute: (seconds % 3600 / 60) as u8,
            second: (seconds % 60) as u8,
            ..self.base
        }
    }

    pub fn timebase(&self) -> &T {
        &self.timebase
    }
}

impl<T: Timebase> ClockSource for SoftClock<T> {
    fn read(&mut self) -> DateTime {
        self.at(self.timebase.now())
    }

    fn write(&mut self, value: DateTime) {
        self.base = value;
        self.set_at = self.timebase.now();
    }
}
