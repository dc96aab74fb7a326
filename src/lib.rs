#![no_std]

pub mod clock;
pub mod color;
pub mod debounce;
pub mod dispatcher;
pub mod frame_buffer;
pub mod frame_scheduler;
pub mod grid;
pub mod input;
pub mod mode;
pub mod time;

pub use clock::{ClockSource, DateTime, SoftClock};
pub use color::Rgb;
pub use debounce::Debouncer;
pub use dispatcher::{Action, Binding, Dispatcher, DispatcherConfig, Profile};
pub use frame_buffer::{FrameBuffer, Layout, LedMatrix};
pub use frame_scheduler::FrameScheduler;
pub use input::{Button, InputSource, SharedButtons};
pub use mode::{FrameContext, ModeId, ModeSlot};
pub use time::{BlockingTimebase, Timebase};

pub use embassy_time::{Duration, Instant};

/// Abstract matrix driver trait
///
/// Implement this trait to support different hardware platforms.
/// Every mode is generic over this trait.
pub trait DisplaySink {
    /// Write one cell of the 16x7 grid
    fn set_pixel(&mut self, x: u8, y: u8, color: Rgb);

    /// Switch every cell off
    fn clear(&mut self) {
        for y in 0..grid::HEIGHT {
            for x in 0..grid::WIDTH {
                self.set_pixel(x, y, color::OFF);
            }
        }
    }

    /// Push the finished frame to the hardware
    ///
    /// Called once after every rendered frame and after an idle clear.
    /// Sinks that write through immediately keep the default no-op.
    fn present(&mut self) {}
}

impl<D: DisplaySink + ?Sized> DisplaySink for &mut D {
    fn set_pixel(&mut self, x: u8, y: u8, color: Rgb) {
        (**self).set_pixel(x, y, color);
    }

    fn clear(&mut self) {
        (**self).clear();
    }

    fn present(&mut self) {
        (**self).present();
    }
}
