//! Frame scheduling and timing utilities.
//!
//! Provides portable frame pacing without async/await or platform-specific timers.
//! The caller is responsible for sleeping/waiting between frames.

use embassy_time::{Duration, Instant};

/// Result of a frame tick operation.
#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    /// The deadline for the next frame.
    pub next_deadline: Instant,
    /// How long to wait until the next frame (may be zero if behind schedule).
    pub sleep_duration: Duration,
}

/// Deadline-based frame pacer.
///
/// Each mode asks for its own frame duration every frame (the Pomodoro tick,
/// the fire frame, or nothing at all for the particle field). The scheduler
/// turns that into a sleep that absorbs the time spent rendering.
///
/// If we fall behind by more than two frames, the backlog is skipped instead
/// of being caught up in a burst.
///
/// # Usage
///
/// ```ignore
/// let mut scheduler = FrameScheduler::new(timebase.now());
///
/// loop {
///     let frame_duration = mode.frame(&mut ctx);
///     let result = scheduler.tick(timebase.now(), frame_duration);
///     timebase.sleep(result.sleep_duration);
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FrameScheduler {
    next_frame: Instant,
}

impl FrameScheduler {
    /// Create a scheduler whose first frame starts at `now`.
    pub const fn new(now: Instant) -> Self {
        Self { next_frame: now }
    }

    /// Restart pacing from `now`, dropping any pending deadline.
    pub fn reset(&mut self, now: Instant) {
        self.next_frame = now;
    }

    /// Account for one rendered frame and return timing information.
    ///
    /// `frame_duration` is the time the frame that was just rendered should
    /// stay on screen. A zero duration never sleeps.
    pub fn tick(&mut self, now: Instant, frame_duration: Duration) -> FrameResult {
        // Drift correction: if we've fallen too far behind, reset to now
        // This prevents catch-up bursts after long stalls
        let max_drift = frame_duration * 2;
        if now > self.next_frame + max_drift {
            self.next_frame = now;
        }

        // Calculate next frame deadline
        self.next_frame += frame_duration;

        // Calculate sleep duration (may be zero if we're behind)
        let sleep_duration = self.next_frame.saturating_duration_since(now);

        FrameResult {
            next_deadline: self.next_frame,
            sleep_duration,
        }
    }

    /// Deadline of the next frame.
    pub const fn next_deadline(&self) -> Instant {
        self.next_frame
    }
}
