//! Ordered (Bayer 8x8) dithering straight into packed framebuffers.
//!
//! Continuous-tone RGB is rendered onto low bit-depth displays by comparing
//! each pixel's quantization residual against a fixed 8x8 threshold tile
//! anchored at the screen origin. Two storage formats are supported:
//!
//! - [`Monochrome`]: 1 bit per pixel, 8 pixels per byte, LSB leftmost.
//! - [`Color64`]: 1 byte per pixel, `0b11rrggbb` ([`Rgb222`]).
//!
//! ## Features
//! - `color` (default): the native format is [`Color64`].
//! - `bw`: the native format is [`Monochrome`]. Build with
//!   `--no-default-features --features bw`; the two are mutually exclusive.
//!
//! Both formats are always available by name; the features only pick
//! [`NativeFormat`] and the helpers that use it.
//!
//! ## Usage
//!
//! 1. Wrap the display's [`Framebuffer`] in a [`GraphicsContext`].
//! 2. Paint areas with [`fill_rect_dithered`].
//! 3. Draw text or shapes in a placeholder colour with `embedded-graphics`,
//!    then recolour them with [`replace_color_in_rect_with_dithered`].
//!
//! Both operations capture the framebuffer for their own duration and do
//! nothing when it is unavailable.
//!
//! ```
//! use bayer_fb::prelude::*;
//! use embedded_graphics::mono_font::{ascii::FONT_6X10, MonoTextStyle};
//! use embedded_graphics::text::{Baseline, Text};
//!
//! let mut ctx = GraphicsContext::new(Framebuffer::<Color64>::new(144, 168));
//!
//! // Dithered background, never contains pure white
//! let screen = Rectangle::new(Point::zero(), Size::new(144, 168));
//! fill_rect_dithered(&mut ctx, screen, 40, 40, 90);
//!
//! // Text drawn in the placeholder colour
//! let style = MonoTextStyle::new(&FONT_6X10, Rgb222::WHITE);
//! let label = Text::with_baseline("42", Point::new(60, 80), style, Baseline::Top);
//! let area = label.bounding_box();
//! if let Some(mut fb) = ctx.capture_framebuffer() {
//!     label.draw(&mut *fb).unwrap();
//! }
//!
//! // Recolour the glyphs only
//! replace_color_in_rect_with_dithered(&mut ctx, area, Replace::Only(Rgb222::WHITE), 200, 160, 40);
//! assert!(!ctx.is_captured());
//! ```

#![no_std]

extern crate alloc;

#[cfg(all(feature = "bw", feature = "color"))]
compile_error!("features `bw` and `color` are mutually exclusive; use --no-default-features --features bw");

#[cfg(not(any(feature = "bw", feature = "color")))]
compile_error!("enable exactly one of the `bw` or `color` features");

use core::fmt;

pub mod adapter;
pub mod clip;
pub mod context;
pub mod dither;
pub mod fill;
pub mod format;
pub mod framebuffer;
pub mod palette;

pub use adapter::DitherDrawTarget;
pub use context::{FramebufferCapture, GraphicsContext};
pub use dither::{
    color_dithered, intensity_dithered, threshold, value_dithered, BayerColor, BayerMono,
    DitherStrategy, BAYER_8X8,
};
pub use fill::{fill_rect_dithered, replace_color_in_rect_with_dithered, Replace};
pub use format::{BitAddr, Color64, Monochrome, PixelFormat};
pub use framebuffer::{Framebuffer, RowSpan};
pub use palette::Rgb222;

/// Pixel format of the display this build targets.
#[cfg(feature = "bw")]
pub type NativeFormat = format::Monochrome;
/// Pixel format of the display this build targets.
#[cfg(all(feature = "color", not(feature = "bw")))]
pub type NativeFormat = format::Color64;

/// Stored colour of [`NativeFormat`].
pub type NativeColor = <NativeFormat as PixelFormat>::Color;

/// Graphics context over the native framebuffer.
pub type NativeContext = GraphicsContext<NativeFormat>;

/// Error type for framebuffer construction.
///
/// Dithering itself never fails; see [`fill_rect_dithered`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Row stride shorter than one row of pixels.
    StrideTooSmall { needed: usize, actual: usize },
    /// Backing memory shorter than `stride * height`.
    BufferTooSmall { needed: usize, actual: usize },
    /// Number of row spans differs from the height.
    RowSpanCount { expected: usize, actual: usize },
    /// A non-empty row span reaches outside the row.
    RowSpanOutOfBounds { row: usize, span: RowSpan },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::StrideTooSmall { needed, actual } => {
                write!(f, "stride {} too small, need {}", actual, needed)
            }
            Error::BufferTooSmall { needed, actual } => {
                write!(f, "buffer of {} bytes too small, need {}", actual, needed)
            }
            Error::RowSpanCount { expected, actual } => {
                write!(f, "{} row spans given for {} rows", actual, expected)
            }
            Error::RowSpanOutOfBounds { row, span } => write!(
                f,
                "row {} span {}..={} outside the row",
                row, span.min_x, span.max_x
            ),
        }
    }
}

/// Prelude module for easy importing of common traits and types.
pub mod prelude {
    pub use embedded_graphics::prelude::*;
    pub use embedded_graphics::primitives::Rectangle;

    pub use super::{
        fill_rect_dithered, replace_color_in_rect_with_dithered, Color64, DitherDrawTarget,
        DitherStrategy, Error, Framebuffer, GraphicsContext, Monochrome, NativeColor,
        NativeContext, NativeFormat, PixelFormat, Replace, Rgb222, RowSpan,
    };
}
