//! Fire simulation
//!
//! Heat is seeded along the bottom edge and carried upwards by a damped
//! neighbourhood sum, then quantized into a five-color flame palette.

use embassy_time::Duration;

use super::{FrameContext, Mode};
use crate::{
    ClockSource, DisplaySink, InputSource,
    color::Rgb,
    grid::{HEIGHT, WIDTH},
};

/// Width of the heat field, one hidden column on each side
pub const FIELD_WIDTH: usize = WIDTH as usize + 2;
/// Height of the heat field, one hidden row below the grid
pub const FIELD_HEIGHT: usize = HEIGHT as usize + 1;

const SPAWNS: usize = 5;
const DAMPING: f32 = 0.8;
/// Five cells feed each new value
const FACTOR: f32 = DAMPING / 5.0;

const FRAME: Duration = Duration::from_millis(50);

const PALETTE: [Rgb; 5] = [
    Rgb { r: 0, g: 0, b: 0 },
    Rgb { r: 20, g: 20, b: 20 },
    Rgb { r: 180, g: 30, b: 0 },
    Rgb { r: 220, g: 160, b: 0 },
    Rgb { r: 255, g: 255, b: 180 },
];

/// Upper bounds of the first four palette entries
const THRESHOLDS: [f32; 4] = [0.15, 0.25, 0.35, 0.45];

/// Map a heat value to its palette color
pub fn quantize(heat: f32) -> Rgb {
    let level = THRESHOLDS
        .iter()
        .position(|threshold| heat < *threshold)
        .unwrap_or(THRESHOLDS.len());
    PALETTE[level]
}

#[derive(Debug, Clone)]
pub struct FireSimulation {
    /// Indexed `[x][y]`, y grows downwards
    heat: [[f32; FIELD_HEIGHT]; FIELD_WIDTH],
    rng: fastrand::Rng,
}

impl FireSimulation {
    pub fn new(seed: u64) -> Self {
        Self {
            heat: [[0.0; FIELD_HEIGHT]; FIELD_WIDTH],
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// Heat at a field coordinate, `None` outside the field
    pub fn heat(&self, x: usize, y: usize) -> Option<f32> {
        self.heat.get(x).and_then(|column| column.get(y)).copied()
    }

    /// Replace the two bottom rows with fresh embers
    pub fn reseed(&mut self) {
        for column in &mut self.heat {
            column[FIELD_HEIGHT - 1] = 0.0;
            column[FIELD_HEIGHT - 2] = 0.0;
        }

        for _ in 0..SPAWNS {
            let center = self.rng.usize(0..=FIELD_WIDTH - 4) + 2;
            for column in &mut self.heat[center - 1..=center + 1] {
                column[FIELD_HEIGHT - 1] = 1.0;
                column[FIELD_HEIGHT - 2] = 1.0;
            }
        }
    }

    /// Propagate heat upwards in a single sweep
    ///
    /// Rows are processed bottom to top, so every row already sees the
    /// updated values of the row below it.
    pub fn diffuse(&mut self) {
        for y in (0..FIELD_HEIGHT - 2).rev() {
            for x in 1..FIELD_WIDTH - 1 {
                let sum = self.heat[x][y]
                    + self.heat[x][y + 1]
                    + self.heat[x][y + 2]
                    + self.heat[x - 1][y + 1]
                    + self.heat[x + 1][y + 1];
                self.heat[x][y] = sum * FACTOR;
            }
        }
    }

    pub fn render<D: DisplaySink>(&self, display: &mut D) {
        for y in 0..HEIGHT {
            for x in 0..WIDTH {
                let heat = self.heat[usize::from(x) + 1][usize::from(y)];
                display.set_pixel(x, y, quantize(heat));
            }
        }
    }

    /// Reseed, diffuse and draw one frame
    pub fn step<D: DisplaySink>(&mut self, display: &mut D) {
        self.reseed();
        self.diffuse();
        self.render(display);
    }
}

impl Mode for FireSimulation {
    fn frame<D: DisplaySink, I: InputSource, C: ClockSource>(
        &mut self,
        ctx: &mut FrameContext<'_, D, I, C>,
    ) -> Duration {
        self.step(ctx.display);
        FRAME
    }
}
