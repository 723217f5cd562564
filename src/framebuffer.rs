//! Packed framebuffer with per-row visible spans.

use alloc::vec;
use alloc::vec::Vec;
use core::convert::Infallible;
use core::marker::PhantomData;

use embedded_graphics::{prelude::*, primitives::Rectangle};
use log::debug;

use crate::clip::{clip_columns, clip_rows};
use crate::format::PixelFormat;
use crate::Error;

/// Visible columns of one row, both ends inclusive.
///
/// A span with `min_x > max_x` is empty.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RowSpan {
    pub min_x: i32,
    pub max_x: i32,
}

impl RowSpan {
    pub const fn new(min_x: i32, max_x: i32) -> Self {
        Self { min_x, max_x }
    }

    /// Full-width span of a `width` pixel row.
    pub const fn full(width: u32) -> Self {
        Self::new(0, width as i32 - 1)
    }

    pub const fn is_empty(&self) -> bool {
        self.min_x > self.max_x
    }

    pub const fn contains(&self, x: i32) -> bool {
        x >= self.min_x && x <= self.max_x
    }
}

/// Framebuffer memory, owned by the display side.
///
/// Rows are `stride` bytes apart. Each row has a visible span; pixels
/// outside it are never read or written, which lets round panels share
/// the rectangular storage.
pub struct Framebuffer<F: PixelFormat> {
    data: Vec<u8>,
    width: u32,
    height: u32,
    stride: usize,
    spans: Vec<RowSpan>,
    _format: PhantomData<F>,
}

impl<F: PixelFormat> Framebuffer<F> {
    /// Rectangular framebuffer, every row fully visible, filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        let fb = Self::blank(width, height);
        debug!("framebuffer {}x{} allocated, stride {}", width, height, fb.stride);
        fb
    }

    /// Square framebuffer whose visible area is the inscribed circle.
    ///
    /// A pixel is visible when its centre lies inside the circle.
    pub fn round(diameter: u32) -> Self {
        let mut fb = Self::blank(diameter, diameter);
        let d = diameter as i64;
        for (y, span) in fb.spans.iter_mut().enumerate() {
            // Doubled coordinates keep pixel centres integral
            let dy = 2 * y as i64 + 1 - d;
            let k = (d * d - dy * dy).isqrt();
            let min_x = (d - k).div_euclid(2);
            let max_x = (d - 1 + k).div_euclid(2);
            *span = RowSpan::new(min_x as i32, max_x as i32);
        }
        debug!("round framebuffer {}x{} allocated, stride {}", diameter, diameter, fb.stride);
        fb
    }

    /// Framebuffer with caller-supplied visible spans, one per row.
    pub fn with_row_spans(width: u32, height: u32, spans: Vec<RowSpan>) -> Result<Self, Error> {
        check_spans(&spans, width, height)?;
        let mut fb = Self::blank(width, height);
        fb.spans = spans;
        debug!("framebuffer {}x{} allocated with row spans, stride {}", width, height, fb.stride);
        Ok(fb)
    }

    fn blank(width: u32, height: u32) -> Self {
        let stride = F::stride(width);
        Self {
            data: vec![F::BLANK; stride * height as usize],
            width,
            height,
            stride,
            spans: vec![RowSpan::full(width); height as usize],
            _format: PhantomData,
        }
    }

    /// Wrap existing framebuffer memory.
    ///
    /// `spans` defaults to full-width rows when `None`.
    pub fn from_raw(
        data: Vec<u8>,
        width: u32,
        height: u32,
        stride: usize,
        spans: Option<Vec<RowSpan>>,
    ) -> Result<Self, Error> {
        let min_stride = F::stride(width);
        if stride < min_stride {
            return Err(Error::StrideTooSmall {
                needed: min_stride,
                actual: stride,
            });
        }
        let needed = stride * height as usize;
        if data.len() < needed {
            return Err(Error::BufferTooSmall {
                needed,
                actual: data.len(),
            });
        }
        let spans = match spans {
            Some(spans) => {
                check_spans(&spans, width, height)?;
                spans
            }
            None => vec![RowSpan::full(width); height as usize],
        };
        debug!("framebuffer {}x{} wrapped, stride {}", width, height, stride);
        Ok(Self {
            data,
            width,
            height,
            stride,
            spans,
            _format: PhantomData,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Visible span of row `y`, `None` outside the buffer.
    pub fn row_span(&self, y: i32) -> Option<RowSpan> {
        usize::try_from(y).ok().and_then(|y| self.spans.get(y).copied())
    }

    /// Bytes of row `y` and its visible span.
    pub fn row(&self, y: i32) -> Option<(&[u8], RowSpan)> {
        let span = self.row_span(y)?;
        let start = y as usize * self.stride;
        Some((&self.data[start..start + self.stride], span))
    }

    /// Mutable bytes of row `y` and its visible span.
    pub fn row_mut(&mut self, y: i32) -> Option<(&mut [u8], RowSpan)> {
        let span = self.row_span(y)?;
        let start = y as usize * self.stride;
        Some((&mut self.data[start..start + self.stride], span))
    }

    /// Colour at (x, y), `None` when the pixel is not visible.
    pub fn pixel(&self, x: i32, y: i32) -> Option<F::Color> {
        let (row, span) = self.row(y)?;
        if !span.contains(x) {
            return None;
        }
        Some(F::get(row, x as usize))
    }

    /// Sets a pixel; invisible coordinates are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: F::Color) {
        if let Some((row, span)) = self.row_mut(y) {
            if span.contains(x) {
                F::set(row, x as usize, color);
            }
        }
    }

    /// Fill every visible pixel with `color`.
    pub fn clear_buffer(&mut self, color: F::Color) {
        let area = self.bounding_box();
        self.fill_visible(&area, color);
    }

    fn fill_visible(&mut self, area: &Rectangle, color: F::Color) {
        for y in clip_rows(area, self.height) {
            if let Some((row, span)) = self.row_mut(y) {
                for x in clip_columns(area, span) {
                    F::set(row, x as usize, color);
                }
            }
        }
    }
}

fn check_spans(spans: &[RowSpan], width: u32, height: u32) -> Result<(), Error> {
    if spans.len() != height as usize {
        return Err(Error::RowSpanCount {
            expected: height as usize,
            actual: spans.len(),
        });
    }
    for (y, span) in spans.iter().enumerate() {
        if span.is_empty() {
            continue;
        }
        if span.min_x < 0 || span.max_x >= width as i32 {
            return Err(Error::RowSpanOutOfBounds { row: y, span: *span });
        }
    }
    Ok(())
}

impl<F: PixelFormat> DrawTarget for Framebuffer<F> {
    type Color = F::Color;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels.into_iter() {
            self.set_pixel(coord.x, coord.y, color);
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        self.fill_visible(area, color);
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.clear_buffer(color);
        Ok(())
    }
}

impl<F: PixelFormat> OriginDimensions for Framebuffer<F> {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}
