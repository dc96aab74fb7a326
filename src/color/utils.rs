use crate::color::Rgb;

/// Create an RGB color from a u32 value (0xRRGGBB format)
pub const fn rgb_from_u32(color: u32) -> Rgb {
    Rgb {
        r: ((color >> 16) & 0xFF) as u8,
        g: ((color >> 8) & 0xFF) as u8,
        b: (color & 0xFF) as u8,
    }
}

/// Convert a computed channel value to a displayable one
///
/// The fractional part is truncated, then the value is clamped to 0-255.
/// `NaN` maps to 0.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn clamp_channel(value: f32) -> u8 {
    let value = libm::truncf(value);
    if value.is_nan() || value <= 0.0 {
        0
    } else if value >= 255.0 {
        255
    } else {
        value as u8
    }
}

/// Multiply every channel by `factor`
///
/// The factor is not limited to 0.0-1.0; channels that overflow are
/// clamped to 255.
#[inline]
pub fn scale(color: Rgb, factor: f32) -> Rgb {
    Rgb {
        r: clamp_channel(factor * f32::from(color.r)),
        g: clamp_channel(factor * f32::from(color.g)),
        b: clamp_channel(factor * f32::from(color.b)),
    }
}
