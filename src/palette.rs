//! Native colours: packed 6-bit `Rgb222` and monochrome helpers.
//! Works in no_std.

use embedded_graphics::pixelcolor::{
    raw::{RawData, RawU8},
    BinaryColor, PixelColor, Rgb888, RgbColor,
};

use crate::dither::{luminance, COLOR_MAX_LEVEL};

/// Marker bits that are always set in a stored colour byte.
pub const OPAQUE_BITS: u8 = 0b1100_0000;

/// Byte value of one channel step; level `n` corresponds to `n * LEVEL_STEP`.
pub const LEVEL_STEP: u8 = 85;

/// 64-colour pixel stored as `0b11rrggbb`, two bits per channel.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rgb222(u8);

impl Rgb222 {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(3, 3, 3);
    pub const RED: Self = Self::new(3, 0, 0);
    pub const GREEN: Self = Self::new(0, 3, 0);
    pub const BLUE: Self = Self::new(0, 0, 3);
    pub const OXFORD_BLUE: Self = Self::new(0, 0, 1);
    pub const CELESTE: Self = Self::new(2, 3, 3);

    /// Build from channel levels; each level is masked to 0..=3.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self(OPAQUE_BITS | (r & 3) << 4 | (g & 3) << 2 | (b & 3))
    }

    /// Reinterpret a stored byte as is.
    ///
    /// Bytes missing the marker bits stay distinct from the colour they
    /// would otherwise encode, so equality is equality of storage.
    #[inline]
    pub const fn from_storage(raw: u8) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn into_storage(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn r(self) -> u8 {
        (self.0 >> 4) & 3
    }

    #[inline]
    pub const fn g(self) -> u8 {
        (self.0 >> 2) & 3
    }

    #[inline]
    pub const fn b(self) -> u8 {
        self.0 & 3
    }

    /// RGB -> closest level per channel (no dither).
    #[inline]
    pub fn nearest(rgb: [u8; 3]) -> Self {
        Self::new(nearest_level(rgb[0]), nearest_level(rgb[1]), nearest_level(rgb[2]))
    }
}

#[inline]
fn nearest_level(v: u8) -> u8 {
    ((v as u16 + LEVEL_STEP as u16 / 2) / LEVEL_STEP as u16).min(COLOR_MAX_LEVEL as u16) as u8
}

impl PixelColor for Rgb222 {
    type Raw = RawU8;
}

impl From<RawU8> for Rgb222 {
    fn from(raw: RawU8) -> Self {
        Self::from_storage(raw.into_inner())
    }
}

impl From<Rgb222> for RawU8 {
    fn from(c: Rgb222) -> Self {
        RawU8::new(c.into_storage())
    }
}

impl From<Rgb888> for Rgb222 {
    fn from(c: Rgb888) -> Self {
        Self::nearest([c.r(), c.g(), c.b()])
    }
}

impl From<Rgb222> for Rgb888 {
    fn from(c: Rgb222) -> Self {
        Rgb888::new(c.r() * LEVEL_STEP, c.g() * LEVEL_STEP, c.b() * LEVEL_STEP)
    }
}

/// RGB -> black or white by luminance (no dither).
#[inline]
pub fn nearest_binary(rgb: [u8; 3]) -> BinaryColor {
    if luminance(rgb[0], rgb[1], rgb[2]) >= 128 {
        BinaryColor::On
    } else {
        BinaryColor::Off
    }
}
