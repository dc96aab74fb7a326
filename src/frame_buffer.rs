//! In-memory display sink.
//!
//! Keeps the 112 cells of the matrix and pushes them to a `smart-leds`
//! driver on [`FrameBuffer::flush`]. [`LedMatrix`] does that on every
//! presented frame.

use smart_leds::SmartLedsWrite;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::{
    DisplaySink,
    color::{self, Rgb},
    grid::{self, CELLS, HEIGHT, WIDTH},
};

/// Physical wiring of the LEDs behind the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// Every row is wired left to right
    #[default]
    RowMajor,
    /// Odd rows are wired right to left
    Serpentine,
}

impl Layout {
    /// Position of a cell in the LED chain
    pub const fn chain_index(self, x: u8, y: u8) -> usize {
        let row = y as usize * WIDTH as usize;
        match self {
            Self::RowMajor => row + x as usize,
            Self::Serpentine => {
                if y % 2 == 0 {
                    row + x as usize
                } else {
                    row + (WIDTH - 1 - x) as usize
                }
            }
        }
    }
}

/// Frame held in RAM, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    cells: [Rgb; CELLS],
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    pub const fn new() -> Self {
        Self {
            cells: [color::OFF; CELLS],
        }
    }

    /// Color of a cell, `None` outside the grid
    pub fn pixel(&self, x: u8, y: u8) -> Option<Rgb> {
        grid::index_of(x, y).map(|index| self.cells[index])
    }

    /// All cells in row-major order
    pub fn cells(&self) -> &[Rgb; CELLS] {
        &self.cells
    }

    /// Check if every cell is off
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|cell| *cell == color::OFF)
    }

    /// Number of cells showing exactly `color`
    pub fn count(&self, color: Rgb) -> usize {
        self.cells.iter().filter(|cell| **cell == color).count()
    }

    /// Write the frame to an LED chain
    pub fn flush<W>(&self, driver: &mut W, layout: Layout) -> Result<(), W::Error>
    where
        W: SmartLedsWrite<Color = Rgb>,
    {
        let mut chain = [color::OFF; CELLS];
        for y in 0..HEIGHT {
            for x in 0..WIDTH {
                if let Some(index) = grid::index_of(x, y) {
                    chain[layout.chain_index(x, y)] = self.cells[index];
                }
            }
        }
        driver.write(chain.iter().copied())
    }
}

impl DisplaySink for FrameBuffer {
    fn set_pixel(&mut self, x: u8, y: u8, color: Rgb) {
        debug_assert!(grid::contains(x, y), "pixel ({x}, {y}) is outside the grid");
        if let Some(index) = grid::index_of(x, y) {
            self.cells[index] = color;
        }
    }

    fn clear(&mut self) {
        self.cells = [color::OFF; CELLS];
    }
}

/// Display sink driving a physical LED chain
///
/// Frames are drawn into a [`FrameBuffer`] and written to the driver when
/// the dispatcher presents them.
pub struct LedMatrix<W> {
    frame: FrameBuffer,
    driver: W,
    layout: Layout,
    failed_writes: u32,
}

impl<W> LedMatrix<W>
where
    W: SmartLedsWrite<Color = Rgb>,
{
    pub const fn new(driver: W, layout: Layout) -> Self {
        Self {
            frame: FrameBuffer::new(),
            driver,
            layout,
            failed_writes: 0,
        }
    }

    /// Frame as it was last drawn
    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn driver(&self) -> &W {
        &self.driver
    }

    /// Number of presented frames the driver rejected
    pub const fn failed_writes(&self) -> u32 {
        self.failed_writes
    }

    /// Write the current frame to the driver
    pub fn flush(&mut self) -> Result<(), W::Error> {
        self.frame.flush(&mut self.driver, self.layout)
    }

    pub fn into_driver(self) -> W {
        self.driver
    }
}

impl<W> DisplaySink for LedMatrix<W>
where
    W: SmartLedsWrite<Color = Rgb>,
{
    fn set_pixel(&mut self, x: u8, y: u8, color: Rgb) {
        self.frame.set_pixel(x, y, color);
    }

    fn clear(&mut self) {
        self.frame.clear();
    }

    fn present(&mut self) {
        // The next frame is a full redraw, so a failed write is only counted
        if self.flush().is_err() {
            self.failed_writes = self.failed_writes.saturating_add(1);

            #[cfg(feature = "esp32-log")]
            println!("led matrix: driver rejected frame ({} so far)", self.failed_writes);
        }
    }
}
