mod utils;

use smart_leds::RGB8;

pub use utils::{clamp_channel, rgb_from_u32, scale};

pub type Rgb = RGB8;

/// Switched-off cell
pub const OFF: Rgb = Rgb { r: 0, g: 0, b: 0 };
