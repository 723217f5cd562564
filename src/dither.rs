//! Ordered Bayer 8x8 dithering: threshold matrix and per-pixel quantizers.
//! Integer-only, no_std.

use embedded_graphics::pixelcolor::BinaryColor;

use crate::palette::{nearest_binary, Rgb222};

/// 8x8 Bayer ordered dithering pattern, thresholds 0..=63.
/// Indexed as `BAYER_8X8[x & 7][y & 7]`.
#[rustfmt::skip]
pub const BAYER_8X8: [[u8; 8]; 8] = [
    [ 0, 32,  8, 40,  2, 34, 10, 42],
    [48, 16, 56, 24, 50, 18, 58, 26],
    [12, 44,  4, 36, 14, 46,  6, 38],
    [60, 28, 52, 20, 62, 30, 54, 22],
    [ 3, 35, 11, 43,  1, 33,  9, 41],
    [51, 19, 59, 27, 49, 17, 57, 25],
    [15, 47,  7, 39, 13, 45,  5, 37],
    [63, 31, 55, 23, 61, 29, 53, 21],
];

/// Number of distinct thresholds in the tile; residuals are scaled into `0..=MATRIX_RANGE`.
pub const MATRIX_RANGE: u16 = 64;

/// Width of one colour band: 4 levels per channel over 0..=255.
const COLOR_BAND: u16 = 85;

/// Highest level of a colour channel.
pub const COLOR_MAX_LEVEL: u8 = 3;

/// Threshold at screen position (x, y). Negative coordinates wrap like any other.
#[inline]
pub const fn threshold(x: i32, y: i32) -> u8 {
    BAYER_8X8[(x & 7) as usize][(y & 7) as usize]
}

/// Weighted luminance, red x3, green x4, blue x1, divided by 8.
#[inline]
pub const fn luminance(r: u8, g: u8, b: u8) -> u8 {
    ((3 * r as u16 + 4 * g as u16 + b as u16) >> 3) as u8
}

/// Rescale a 0..=255 luminance onto the matrix range 0..=64.
#[inline]
const fn mono_scaled(lum: u8) -> u8 {
    ((lum as u16 + 5) / 4 - 1) as u8
}

/// Quantize one channel to 0..=3 against threshold `d`.
#[inline]
pub const fn quantize_channel(v: u8, d: u8) -> u8 {
    let v = v as u16;
    let base = (v / COLOR_BAND) as u8;
    let scaled = MATRIX_RANGE * (v % COLOR_BAND) / COLOR_BAND;
    let q = if scaled > d as u16 { base + 1 } else { base };
    if q > COLOR_MAX_LEVEL {
        COLOR_MAX_LEVEL
    } else {
        q
    }
}

/// Quantize a luminance to off (0) or on (1) against threshold `d`.
#[inline]
pub const fn quantize_mono(lum: u8, d: u8) -> u8 {
    if mono_scaled(lum) > d {
        1
    } else {
        0
    }
}

/// Strategy trait for per-pixel mapping with spatial context.
///
/// `x,y` are absolute framebuffer coords; the tile is anchored at the screen origin.
pub trait DitherStrategy {
    /// Native colour produced by this strategy.
    type Output: Copy + PartialEq;

    /// Map an RGB triple at pixel (x,y) to a native colour.
    fn map(x: i32, y: i32, rgb: [u8; 3]) -> Self::Output;

    /// Dither a single 0..=255 intensity to an output level
    /// (0..=1 for monochrome, 0..=3 for a colour channel).
    fn intensity(x: i32, y: i32, intensity: u8) -> u8;

    /// Like [`map`](Self::map) but returns the packed storage value.
    fn value(x: i32, y: i32, rgb: [u8; 3]) -> u8;

    /// Closest native colour without dithering.
    fn nearest(rgb: [u8; 3]) -> Self::Output;
}

/// Two-level luminance dither for 1-bit panels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BayerMono;

impl DitherStrategy for BayerMono {
    type Output = BinaryColor;

    #[inline]
    fn map(x: i32, y: i32, rgb: [u8; 3]) -> BinaryColor {
        if Self::value(x, y, rgb) != 0 {
            BinaryColor::On
        } else {
            BinaryColor::Off
        }
    }

    #[inline]
    fn intensity(x: i32, y: i32, intensity: u8) -> u8 {
        quantize_mono(intensity, threshold(x, y))
    }

    #[inline]
    fn value(x: i32, y: i32, rgb: [u8; 3]) -> u8 {
        quantize_mono(luminance(rgb[0], rgb[1], rgb[2]), threshold(x, y))
    }

    fn nearest(rgb: [u8; 3]) -> BinaryColor {
        nearest_binary(rgb)
    }
}

/// Four levels per channel for 64-colour panels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BayerColor;

impl DitherStrategy for BayerColor {
    type Output = Rgb222;

    #[inline]
    fn map(x: i32, y: i32, rgb: [u8; 3]) -> Rgb222 {
        // One threshold shared by all three channels
        let d = threshold(x, y);
        Rgb222::new(
            quantize_channel(rgb[0], d),
            quantize_channel(rgb[1], d),
            quantize_channel(rgb[2], d),
        )
    }

    #[inline]
    fn intensity(x: i32, y: i32, intensity: u8) -> u8 {
        quantize_channel(intensity, threshold(x, y))
    }

    #[inline]
    fn value(x: i32, y: i32, rgb: [u8; 3]) -> u8 {
        Self::map(x, y, rgb).into_storage()
    }

    fn nearest(rgb: [u8; 3]) -> Rgb222 {
        Rgb222::nearest(rgb)
    }
}

/// Strategy for the format selected at build time.
pub type NativeDither = <crate::NativeFormat as crate::format::PixelFormat>::Dither;

/// Dither an intensity at (x, y) for the native display:
/// 0 or 1 (black, white) on monochrome, 0..=3 on colour.
///
/// On colour builds the level can be spread over channels, e.g. a gray is
/// `Rgb222::new(l, l, l)` and a red `Rgb222::new(l, 0, 0)`.
pub fn intensity_dithered(x: i32, y: i32, intensity: u8) -> u8 {
    <NativeDither as DitherStrategy>::intensity(x, y, intensity)
}

/// Dithered native colour for an RGB triple at (x, y).
pub fn color_dithered(x: i32, y: i32, r: u8, g: u8, b: u8) -> crate::NativeColor {
    <NativeDither as DitherStrategy>::map(x, y, [r, g, b])
}

/// Same as [`color_dithered`] but returns the packed storage value.
pub fn value_dithered(x: i32, y: i32, r: u8, g: u8, b: u8) -> u8 {
    <NativeDither as DitherStrategy>::value(x, y, [r, g, b])
}
