//! Berlin clock
//!
//! Shows the time as rows of lamps: five-hour blocks, single hours,
//! five-minute blocks and single minutes, topped by a blinking seconds
//! strip. The time can be set in place with three debounced buttons.

use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use super::{FrameContext, Mode};
use crate::{
    ClockSource, DateTime, DisplaySink, InputSource,
    color::{Rgb, rgb_from_u32},
    debounce::{DEFAULT_WINDOW, Debouncer},
    grid::Lamp,
    input::Button,
};

/// Seconds value that marks an edited, not yet running time
pub const SECONDS_UNSET: u8 = 255;

pub const LAMP_HOUSING: Rgb = rgb_from_u32(0x0C0C0C);
pub const SECONDS_COLOR: Rgb = rgb_from_u32(0xFFC800);
pub const SECONDS_UNSET_COLOR: Rgb = rgb_from_u32(0x0078FF);
pub const HOURS_FIVE_COLOR: Rgb = rgb_from_u32(0xFF7800);
pub const HOURS_ONE_COLOR: Rgb = rgb_from_u32(0xFFBE3C);
pub const MINUTES_FIVE_COLOR: Rgb = rgb_from_u32(0xFFA000);
pub const QUARTER_COLOR: Rgb = rgb_from_u32(0xFF0000);
pub const MINUTES_ONE_COLOR: Rgb = rgb_from_u32(0x003CFF);

pub const SECONDS_LAMP: Lamp = Lamp::new(1, 0, 14, 1);

pub const HOURS_FIVE_LAMPS: [Lamp; 4] = quad_row(1, 1);
pub const HOURS_ONE_LAMPS: [Lamp; 4] = quad_row(2, 1);
pub const MINUTES_FIVE_LAMPS: [Lamp; 11] = minute_row(3);
pub const MINUTES_ONE_LAMPS: [Lamp; 4] = quad_row(5, 2);

const FRAME: Duration = Duration::from_millis(50);

/// Four 3-wide lamps spread over the grid
const fn quad_row(y: u8, height: u8) -> [Lamp; 4] {
    [
        Lamp::new(1, y, 3, height),
        Lamp::new(5, y, 3, height),
        Lamp::new(9, y, 3, height),
        Lamp::new(13, y, 3, height),
    ]
}

/// Eleven single-column lamps, two rows tall
#[allow(clippy::cast_possible_truncation)]
const fn minute_row(y: u8) -> [Lamp; 11] {
    let mut lamps = [Lamp::new(0, y, 1, 2); 11];
    let mut i = 0;
    while i < lamps.len() {
        lamps[i].x = 3 + i as u8;
        i += 1;
    }
    lamps
}

/// Every third five-minute lamp marks a quarter hour
pub const fn is_quarter_lamp(index: usize) -> bool {
    index % 3 == 2
}

fn render_row<D: DisplaySink>(
    display: &mut D,
    lamps: &[Lamp],
    lit: usize,
    color: impl Fn(usize) -> Rgb,
) {
    for (index, lamp) in lamps.iter().enumerate() {
        let shade = if index < lit { color(index) } else { LAMP_HOUSING };
        lamp.fill(display, shade);
    }
}

/// Draw a time of day
///
/// `seconds` only drives the blinking strip; pass [`SECONDS_UNSET`] to show
/// a steady strip while the time is being edited.
pub fn render_time<D: DisplaySink>(display: &mut D, hours: u8, minutes: u8, seconds: u8) {
    let hours = usize::from(hours);
    let minutes = usize::from(minutes);

    render_row(display, &HOURS_FIVE_LAMPS, hours / 5, |_| HOURS_FIVE_COLOR);
    render_row(display, &HOURS_ONE_LAMPS, hours % 5, |_| HOURS_ONE_COLOR);
    render_row(display, &MINUTES_FIVE_LAMPS, minutes / 5, |index| {
        if is_quarter_lamp(index) {
            QUARTER_COLOR
        } else {
            MINUTES_FIVE_COLOR
        }
    });
    render_row(display, &MINUTES_ONE_LAMPS, minutes % 5, |_| MINUTES_ONE_COLOR);

    let strip = if seconds == SECONDS_UNSET {
        SECONDS_UNSET_COLOR
    } else if seconds % 2 == 1 {
        SECONDS_COLOR
    } else {
        LAMP_HOUSING
    };
    SECONDS_LAMP.fill(display, strip);
}

#[derive(Debug, Clone, Copy)]
pub struct BerlinClockConfig {
    /// Switches between showing and setting the time
    pub toggle: Button,
    /// Advances the hour while setting
    pub hours: Button,
    /// Advances the minute while setting
    pub minutes: Button,
    pub debounce: Duration,
}

impl Default for BerlinClockConfig {
    fn default() -> Self {
        Self {
            toggle: Button::A,
            hours: Button::X,
            minutes: Button::B,
            debounce: DEFAULT_WINDOW,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    /// Showing the live time
    Run,
    /// Editing a time that is written back on leaving
    Set { hours: u8, minutes: u8 },
}

#[derive(Debug, Clone)]
pub struct BerlinClock {
    config: BerlinClockConfig,
    state: ClockState,
    toggle: Debouncer,
    hours: Debouncer,
    minutes: Debouncer,
    cleared: bool,
}

impl BerlinClock {
    pub const fn new(config: BerlinClockConfig) -> Self {
        Self {
            config,
            state: ClockState::Run,
            toggle: Debouncer::new(config.debounce),
            hours: Debouncer::new(config.debounce),
            minutes: Debouncer::new(config.debounce),
            cleared: false,
        }
    }

    pub const fn state(&self) -> ClockState {
        self.state
    }

    /// Handle button presses for this poll
    pub fn handle_input<I: InputSource, C: ClockSource>(
        &mut self,
        input: &I,
        clock: &mut C,
        now: Instant,
    ) {
        if self.toggle.poll(input.is_pressed(self.config.toggle), now) {
            self.state = match self.state {
                ClockState::Run => {
                    let current = clock.read();
                    ClockState::Set {
                        hours: current.hour,
                        minutes: current.minute,
                    }
                }
                ClockState::Set { hours, minutes } => {
                    Self::commit(clock, hours, minutes);
                    ClockState::Run
                }
            };
            // Edit buttons held together with the toggle count from the next poll
            return;
        }

        if let ClockState::Set { hours, minutes } = &mut self.state {
            if self.hours.poll(input.is_pressed(self.config.hours), now) {
                *hours = (*hours + 1) % 24;
            }
            if self.minutes.poll(input.is_pressed(self.config.minutes), now) {
                *minutes = (*minutes + 1) % 60;
            }
        }
    }

    fn commit<C: ClockSource>(clock: &mut C, hours: u8, minutes: u8) {
        if let Some(value) = DateTime::PLACEHOLDER.with_time(hours, minutes, 0) {
            #[cfg(feature = "esp32-log")]
            println!("berlin clock: set time to {:02}:{:02}", hours, minutes);
            clock.write(value);
        }
    }

    pub fn render<D: DisplaySink, C: ClockSource>(&mut self, display: &mut D, clock: &mut C) {
        if !self.cleared {
            // Cells between the lamps are never drawn
            display.clear();
            self.cleared = true;
        }
        match self.state {
            ClockState::Run => {
                let now = clock.read();
                render_time(display, now.hour, now.minute, now.second);
            }
            ClockState::Set { hours, minutes } => {
                render_time(display, hours, minutes, SECONDS_UNSET);
            }
        }
    }
}

impl Default for BerlinClock {
    fn default() -> Self {
        Self::new(BerlinClockConfig::default())
    }
}

impl Mode for BerlinClock {
    fn frame<D: DisplaySink, I: InputSource, C: ClockSource>(
        &mut self,
        ctx: &mut FrameContext<'_, D, I, C>,
    ) -> Duration {
        self.handle_input(ctx.input, ctx.clock, ctx.now);
        self.render(ctx.display, ctx.clock);
        FRAME
    }
}
