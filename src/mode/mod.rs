//! Mode system with compile-time known mode variants
//!
//! All modes are stored in an enum to avoid heap allocations.
//! Each mode implements the `Mode` trait.

pub mod berlin_clock;
pub mod fire;
pub mod particles;
pub mod pomodoro;

use embassy_time::{Duration, Instant};

pub use berlin_clock::{BerlinClock, BerlinClockConfig, ClockState, render_time};
pub use fire::FireSimulation;
pub use particles::ParticleField;
pub use pomodoro::{Phase, PomodoroConfig, PomodoroTimer, ScanOrder};

use crate::{ClockSource, DisplaySink, InputSource};

const MODE_NAME_POMODORO: &str = "pomodoro";
const MODE_NAME_SUPERCOMPUTER: &str = "supercomputer";
const MODE_NAME_FLAMES: &str = "flames";
const MODE_NAME_BERLIN_CLOCK: &str = "berlin_clock";

const MODE_ID_POMODORO: u8 = 0;
const MODE_ID_SUPERCOMPUTER: u8 = 1;
const MODE_ID_FLAMES: u8 = 2;
const MODE_ID_BERLIN_CLOCK: u8 = 3;

/// Everything a mode may touch while rendering one frame
pub struct FrameContext<'a, D, I, C> {
    pub display: &'a mut D,
    pub input: &'a I,
    pub clock: &'a mut C,
    /// Time at the start of the frame
    pub now: Instant,
}

pub trait Mode {
    /// Advance the simulation and draw a single frame
    ///
    /// Returns how long the frame should stay on screen before the next
    /// one. The cancel button is polled between frames, so this is also the
    /// worst-case exit latency of the mode.
    fn frame<D: DisplaySink, I: InputSource, C: ClockSource>(
        &mut self,
        ctx: &mut FrameContext<'_, D, I, C>,
    ) -> Duration;
}

/// Per-mode settings used when a mode is (re)started
#[derive(Debug, Clone, Copy, Default)]
pub struct ModeSettings {
    pub pomodoro: PomodoroConfig,
    pub berlin_clock: BerlinClockConfig,
}

/// Mode slot - enum containing all possible modes
#[derive(Debug, Clone)]
pub enum ModeSlot {
    /// Work/rest countdown
    Pomodoro(PomodoroTimer),
    /// Decaying particle field
    Supercomputer(ParticleField),
    /// Fire simulation
    Flames(FireSimulation),
    /// Berlin clock with time setting
    BerlinClock(BerlinClock),
}

/// Known mode ids that can be requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum ModeId {
    Pomodoro = MODE_ID_POMODORO,
    Supercomputer = MODE_ID_SUPERCOMPUTER,
    Flames = MODE_ID_FLAMES,
    BerlinClock = MODE_ID_BERLIN_CLOCK,
}

impl ModeId {
    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            MODE_ID_POMODORO => Self::Pomodoro,
            MODE_ID_SUPERCOMPUTER => Self::Supercomputer,
            MODE_ID_FLAMES => Self::Flames,
            MODE_ID_BERLIN_CLOCK => Self::BerlinClock,
            _ => return None,
        })
    }

    /// Build fresh state for the mode
    ///
    /// `seed` feeds the random generator of the modes that use one.
    pub fn to_slot(self, seed: u64, settings: &ModeSettings) -> ModeSlot {
        match self {
            Self::Pomodoro => ModeSlot::Pomodoro(PomodoroTimer::new(settings.pomodoro)),
            Self::Supercomputer => ModeSlot::Supercomputer(ParticleField::new(seed)),
            Self::Flames => ModeSlot::Flames(FireSimulation::new(seed)),
            Self::BerlinClock => {
                ModeSlot::BerlinClock(BerlinClock::new(settings.berlin_clock))
            }
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pomodoro => MODE_NAME_POMODORO,
            Self::Supercomputer => MODE_NAME_SUPERCOMPUTER,
            Self::Flames => MODE_NAME_FLAMES,
            Self::BerlinClock => MODE_NAME_BERLIN_CLOCK,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            MODE_NAME_POMODORO => Some(Self::Pomodoro),
            MODE_NAME_SUPERCOMPUTER => Some(Self::Supercomputer),
            MODE_NAME_FLAMES => Some(Self::Flames),
            MODE_NAME_BERLIN_CLOCK => Some(Self::BerlinClock),
            _ => None,
        }
    }
}

impl ModeSlot {
    /// Render the current mode
    pub fn frame<D: DisplaySink, I: InputSource, C: ClockSource>(
        &mut self,
        ctx: &mut FrameContext<'_, D, I, C>,
    ) -> Duration {
        match self {
            Self::Pomodoro(mode) => mode.frame(ctx),
            Self::Supercomputer(mode) => mode.frame(ctx),
            Self::Flames(mode) => mode.frame(ctx),
            Self::BerlinClock(mode) => mode.frame(ctx),
        }
    }

    /// Get the mode ID for external observation
    pub fn id(&self) -> ModeId {
        match self {
            Self::Pomodoro(_) => ModeId::Pomodoro,
            Self::Supercomputer(_) => ModeId::Supercomputer,
            Self::Flames(_) => ModeId::Flames,
            Self::BerlinClock(_) => ModeId::BerlinClock,
        }
    }
}
