//! Pomodoro countdown
//!
//! Floods the grid with the phase color, then switches cells off one at a
//! time. When the grid is dark the phase flips between work and rest.

use embassy_time::Duration;

use super::{FrameContext, Mode};
use crate::{
    ClockSource, DisplaySink, InputSource,
    color::{self, Rgb, rgb_from_u32},
    grid::{self, CELLS, HEIGHT},
};

const WORK_COLOR: Rgb = rgb_from_u32(0xFF4500);
const REST_COLOR: Rgb = rgb_from_u32(0x00FF00);

// 134 ticks per cell is ~25 minutes over the grid, 27 is ~5 minutes
const WORK_CYCLES: u16 = 134;
const REST_CYCLES: u16 = 27;

const TICK: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Work,
    Rest,
}

impl Phase {
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Work => Self::Rest,
            Self::Rest => Self::Work,
        }
    }
}

/// Order in which cells are switched off
///
/// Both orders start at the bottom-right cell and end at the top-left one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanOrder {
    /// Walk each row right to left, rows bottom to top
    #[default]
    RowMajor,
    /// Walk each column bottom to top, columns right to left
    ColumnMajor,
}

impl ScanOrder {
    /// Cell visited at `step` (0..112)
    #[allow(clippy::cast_possible_truncation)]
    pub const fn cell(self, step: usize) -> (u8, u8) {
        let step = CELLS - 1 - step;
        match self {
            Self::RowMajor => grid::coords_of(step),
            Self::ColumnMajor => {
                let x = (step / HEIGHT as usize) as u8;
                let y = (step % HEIGHT as usize) as u8;
                (x, y)
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PomodoroConfig {
    pub work_color: Rgb,
    pub rest_color: Rgb,
    /// Ticks each cell stays lit during work
    pub work_cycles: u16,
    /// Ticks each cell stays lit during rest
    pub rest_cycles: u16,
    pub tick: Duration,
    pub order: ScanOrder,
}

impl Default for PomodoroConfig {
    fn default() -> Self {
        Self {
            work_color: WORK_COLOR,
            rest_color: REST_COLOR,
            work_cycles: WORK_CYCLES,
            rest_cycles: REST_CYCLES,
            tick: TICK,
            order: ScanOrder::RowMajor,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PomodoroTimer {
    config: PomodoroConfig,
    phase: Phase,
    /// Cells switched off in the current phase
    step: usize,
    /// Ticks spent on the current cell
    ticks: u16,
    flooded: bool,
}

impl PomodoroTimer {
    pub const fn new(config: PomodoroConfig) -> Self {
        Self {
            config,
            phase: Phase::Work,
            step: 0,
            ticks: 0,
            flooded: false,
        }
    }

    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Number of cells already switched off in this phase
    pub const fn extinguished(&self) -> usize {
        self.step
    }

    /// Dwell of one cell in ticks
    pub const fn cycles(&self, phase: Phase) -> u16 {
        match phase {
            Phase::Work => self.config.work_cycles,
            Phase::Rest => self.config.rest_cycles,
        }
    }

    pub const fn color(&self, phase: Phase) -> Rgb {
        match phase {
            Phase::Work => self.config.work_color,
            Phase::Rest => self.config.rest_color,
        }
    }

    /// Advance by one step and draw
    ///
    /// A step is either one dwell tick (returns the tick length) or an
    /// instantaneous change of the grid (returns zero).
    pub fn step<D: DisplaySink>(&mut self, display: &mut D) -> Duration {
        if !self.flooded {
            grid::fill(display, self.color(self.phase));
            self.flooded = true;
        }

        if self.ticks < self.cycles(self.phase) {
            self.ticks += 1;
            return self.config.tick;
        }

        let (x, y) = self.config.order.cell(self.step);
        display.set_pixel(x, y, color::OFF);
        self.ticks = 0;
        self.step += 1;

        if self.step == CELLS {
            self.step = 0;
            self.flooded = false;
            self.phase = self.phase.next();
        }

        Duration::from_ticks(0)
    }
}

impl Default for PomodoroTimer {
    fn default() -> Self {
        Self::new(PomodoroConfig::default())
    }
}

impl Mode for PomodoroTimer {
    fn frame<D: DisplaySink, I: InputSource, C: ClockSource>(
        &mut self,
        ctx: &mut FrameContext<'_, D, I, C>,
    ) -> Duration {
        self.step(ctx.display)
    }
}
