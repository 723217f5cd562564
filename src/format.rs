//! Packed pixel formats: 1-bit monochrome and one-byte-per-pixel colour.

use embedded_graphics::pixelcolor::{BinaryColor, PixelColor};

use crate::dither::{BayerColor, BayerMono, DitherStrategy};
use crate::palette::Rgb222;

/// Storage layout of one framebuffer row plus the quantizer that feeds it.
///
/// `get`/`set` take `x` as a column index into `row`; callers clip to the
/// row's visible span first and must not pass columns beyond `stride`.
pub trait PixelFormat {
    /// Colour as stored in the framebuffer.
    type Color: PixelColor + Copy + PartialEq + core::fmt::Debug;
    /// Quantizer producing `Color`.
    type Dither: DitherStrategy<Output = Self::Color>;

    const BITS_PER_PIXEL: usize;
    /// Byte used to initialise fresh storage (black).
    const BLANK: u8;

    /// Bytes needed for one row of `width` pixels.
    fn stride(width: u32) -> usize {
        (width as usize * Self::BITS_PER_PIXEL).div_ceil(8)
    }

    fn get(row: &[u8], x: usize) -> Self::Color;

    fn set(row: &mut [u8], x: usize, color: Self::Color);
}

/// Location of one pixel in a 1-bit row.
///
/// Invariants: `byte == x / 8` and `bit == x % 8`, with bit 0 (LSB) holding
/// the leftmost pixel of the byte. Writes are read-modify-write and leave the
/// other seven pixels of the byte untouched.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BitAddr {
    pub byte: usize,
    pub bit: u8,
}

impl BitAddr {
    #[inline]
    pub const fn of(x: usize) -> Self {
        Self {
            byte: x / 8,
            bit: (x % 8) as u8,
        }
    }

    #[inline]
    pub const fn mask(self) -> u8 {
        1 << self.bit
    }

    #[inline]
    pub fn read(self, row: &[u8]) -> bool {
        row[self.byte] & self.mask() != 0
    }

    #[inline]
    pub fn write(self, row: &mut [u8], on: bool) {
        // Clear then set, like the panel's own blit
        let byte = row[self.byte] & !self.mask();
        row[self.byte] = byte | (on as u8) << self.bit;
    }
}

/// 1 bit per pixel, 8 pixels per byte, set bit = white.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Monochrome;

impl PixelFormat for Monochrome {
    type Color = BinaryColor;
    type Dither = BayerMono;

    const BITS_PER_PIXEL: usize = 1;
    const BLANK: u8 = 0x00;

    #[inline]
    fn get(row: &[u8], x: usize) -> BinaryColor {
        if BitAddr::of(x).read(row) {
            BinaryColor::On
        } else {
            BinaryColor::Off
        }
    }

    #[inline]
    fn set(row: &mut [u8], x: usize, color: BinaryColor) {
        BitAddr::of(x).write(row, color == BinaryColor::On);
    }
}

/// 1 byte per pixel, `0b11rrggbb`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Color64;

impl PixelFormat for Color64 {
    type Color = Rgb222;
    type Dither = BayerColor;

    const BITS_PER_PIXEL: usize = 8;
    const BLANK: u8 = Rgb222::BLACK.into_storage();

    #[inline]
    fn get(row: &[u8], x: usize) -> Rgb222 {
        Rgb222::from_storage(row[x])
    }

    #[inline]
    fn set(row: &mut [u8], x: usize, color: Rgb222) {
        row[x] = color.into_storage();
    }
}
