//! Pure per-pixel color transforms.
//!
//! All functions here are total: every input bit pattern maps to a defined
//! output, so none of them return a `Result`.

/// Bit masks and per-channel maxima for the 5/6/5 packing.
///
/// Grouped per channel-width profile: the `*_MASK_888` constants select the
/// bits of an 8-bit channel that survive quantization to 5 or 6 bits, the
/// `*_MAX_565` constants are the largest value a packed channel can hold.
pub mod consts {
    /// Bits of an 8-bit red channel kept by RGB565 (top 5).
    pub const RED_MASK_888: u8 = 0b1111_1000;
    /// Bits of an 8-bit green channel kept by RGB565 (top 6).
    pub const GREEN_MASK_888: u8 = 0b1111_1100;
    /// Bits of an 8-bit blue channel kept by RGB565 (top 5).
    pub const BLUE_MASK_888: u8 = 0b1111_1000;

    /// Largest value of the packed 5-bit red channel.
    pub const RED_MAX_565: u8 = 0b0001_1111;
    /// Largest value of the packed 6-bit green channel.
    pub const GREEN_MAX_565: u8 = 0b0011_1111;
    /// Largest value of the packed 5-bit blue channel.
    pub const BLUE_MAX_565: u8 = 0b0001_1111;
}

use consts::*;

/// A 24-bit RGB pixel, one byte per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb888 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb888 {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Quantizes an RGB888 pixel into a packed RGB565 word.
///
/// The low bits of each channel are truncated, not rounded: red and blue keep
/// their top 5 bits, green its top 6.
#[inline]
pub const fn rgb888_to_rgb565(pixel: Rgb888) -> u16 {
    (((pixel.r & RED_MASK_888) as u16) << 8)
        + (((pixel.g & GREEN_MASK_888) as u16) << 3)
        + ((pixel.b >> 3) as u16)
}

/// Expands a packed RGB565 word into an RGB888 pixel.
///
/// Each 5/6-bit component is rescaled to the full 0..=255 range with
/// `round(component * 255 / component_max)`, so 0 maps to 0 and the packed
/// maximum maps to 255.
#[inline]
pub fn rgb565_to_rgb888(word: u16) -> Rgb888 {
    let r = ((word >> 11) as u8) & RED_MAX_565;
    let g = ((word >> 5) as u8) & GREEN_MAX_565;
    let b = (word as u8) & BLUE_MAX_565;

    Rgb888 {
        r: rescale(r, RED_MAX_565),
        g: rescale(g, GREEN_MAX_565),
        b: rescale(b, BLUE_MAX_565),
    }
}

/// Collapses an RGB888 pixel to an 8-bit grayscale value with the luminosity
/// method: `0.3 * red + 0.59 * green + 0.11 * blue`, rounded.
///
/// The weights sum to 1.0, so the result always fits in a byte.
#[inline]
pub fn rgb888_to_grayscale(pixel: Rgb888) -> u8 {
    round_u8(0.3 * pixel.r as f32 + 0.59 * pixel.g as f32 + 0.11 * pixel.b as f32)
}

/// Quantizes a packed `0x00RRGGBB` word into an RGB565 word.
///
/// Convenience for callers holding 32-bit packed pixels; equivalent to
/// unpacking the word and calling [`rgb888_to_rgb565`].
#[inline]
pub const fn rgb888_word_to_rgb565(word: u32) -> u16 {
    rgb888_to_rgb565(Rgb888::new(
        (word >> 16) as u8,
        (word >> 8) as u8,
        word as u8,
    ))
}

#[inline]
fn rescale(component: u8, max: u8) -> u8 {
    round_u8(component as f32 * 255.0 / max as f32)
}

// Inputs are never negative and never exceed 255.0, so truncation after the
// +0.5 shift matches round-half-away without needing `std::f32::round`.
#[inline]
fn round_u8(x: f32) -> u8 {
    (x + 0.5) as u8
}
