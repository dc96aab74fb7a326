use embassy_time::{Duration, Instant};

/// Default minimum time between two honored presses
pub const DEFAULT_WINDOW: Duration = Duration::from_millis(250);

/// Turns a polled button level into rate-limited press events.
///
/// A press is honored when the button is held and at least `window` has
/// elapsed since the previous honored press. A held button thus repeats at a
/// fixed rate instead of firing on every poll.
#[derive(Debug, Clone, Copy)]
pub struct Debouncer {
    window: Duration,
    last_press: Option<Instant>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

impl Debouncer {
    pub const fn new(window: Duration) -> Self {
        Self {
            window,
            last_press: None,
        }
    }

    /// Feed the current level, returns `true` if this poll counts as a press
    pub fn poll(&mut self, held: bool, now: Instant) -> bool {
        if !held {
            return false;
        }
        if let Some(last) = self.last_press {
            // A clock that went backwards counts as "too soon"
            if now.saturating_duration_since(last) < self.window {
                return false;
            }
        }
        self.last_press = Some(now);
        true
    }

    /// Instant of the last honored press
    pub const fn last_press(&self) -> Option<Instant> {
        self.last_press
    }

    /// Forget the last honored press
    pub fn reset(&mut self) {
        self.last_press = None;
    }
}
