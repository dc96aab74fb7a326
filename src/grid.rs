//! Grid geometry and lamp primitives shared by every mode.

use crate::{DisplaySink, color::Rgb};

/// Number of columns on the matrix
pub const WIDTH: u8 = 16;

/// Number of rows on the matrix
pub const HEIGHT: u8 = 7;

/// Number of cells on the matrix
pub const CELLS: usize = WIDTH as usize * HEIGHT as usize;

/// Check if a coordinate lies on the grid
pub const fn contains(x: u8, y: u8) -> bool {
    x < WIDTH && y < HEIGHT
}

/// Row-major index of a cell
///
/// Returns `None` for coordinates outside the grid.
pub const fn index_of(x: u8, y: u8) -> Option<usize> {
    if !contains(x, y) {
        return None;
    }
    Some(y as usize * WIDTH as usize + x as usize)
}

/// Coordinates of a row-major cell index
pub const fn coords_of(index: usize) -> (u8, u8) {
    #[allow(clippy::cast_possible_truncation)]
    let x = (index % WIDTH as usize) as u8;
    #[allow(clippy::cast_possible_truncation)]
    let y = (index / WIDTH as usize) as u8;
    (x, y)
}

/// Rectangular block of cells lit as one unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lamp {
    pub x: u8,
    pub y: u8,
    pub width: u8,
    pub height: u8,
}

impl Lamp {
    pub const fn new(x: u8, y: u8, width: u8, height: u8) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Check if the lamp covers the cell
    pub const fn covers(self, x: u8, y: u8) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }

    /// Flood-fill the lamp area
    pub fn fill<D: DisplaySink>(self, display: &mut D, color: Rgb) {
        debug_assert!(
            self.x + self.width <= WIDTH && self.y + self.height <= HEIGHT,
            "lamp exceeds grid"
        );
        for y in self.y..self.y + self.height {
            for x in self.x..self.x + self.width {
                display.set_pixel(x, y, color);
            }
        }
    }
}

/// Flood-fill the whole grid
pub fn fill<D: DisplaySink>(display: &mut D, color: Rgb) {
    Lamp::new(0, 0, WIDTH, HEIGHT).fill(display, color);
}
