//! Dithered area fill and selective colour replacement.
//!
//! Both entry points take `rect` in absolute screen coordinates; callers
//! drawing inside a nested layer translate their own coordinates first.
//! Neither reports failure: a refused capture or a rectangle clipped to
//! nothing simply leaves the framebuffer as it was.

use embedded_graphics::primitives::Rectangle;
use log::trace;

use crate::clip::{clip_columns, clip_rows};
use crate::context::GraphicsContext;
use crate::dither::DitherStrategy;
use crate::format::PixelFormat;

/// Which pixels a replacement may overwrite.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Replace<C> {
    /// Every pixel in the rectangle.
    Any,
    /// Only pixels currently storing exactly this colour.
    Only(C),
}

impl<C: PartialEq> Replace<C> {
    /// Whether a pixel storing `current` may be overwritten.
    #[inline]
    pub fn matches(&self, current: &C) -> bool {
        match self {
            Replace::Any => true,
            Replace::Only(c) => c == current,
        }
    }
}

impl<C> From<Option<C>> for Replace<C> {
    fn from(color: Option<C>) -> Self {
        match color {
            Some(c) => Replace::Only(c),
            None => Replace::Any,
        }
    }
}

/// Fill `rect` with `(r, g, b)` dithered against the Bayer tile.
///
/// Every visible pixel is overwritten; nothing is read first.
pub fn fill_rect_dithered<F: PixelFormat>(
    ctx: &mut GraphicsContext<F>,
    rect: Rectangle,
    r: u8,
    g: u8,
    b: u8,
) {
    dither_rect(ctx, &rect, Replace::Any, [r, g, b]);
}

/// Recolour the pixels of `rect` that match `replace` with `(r, g, b)`
/// dithered against the Bayer tile.
///
/// Typical use: draw text in a colour that appears nowhere else inside its
/// bounding box, then replace that colour here.
pub fn replace_color_in_rect_with_dithered<F: PixelFormat>(
    ctx: &mut GraphicsContext<F>,
    rect: Rectangle,
    replace: Replace<F::Color>,
    r: u8,
    g: u8,
    b: u8,
) {
    dither_rect(ctx, &rect, replace, [r, g, b]);
}

fn dither_rect<F: PixelFormat>(
    ctx: &mut GraphicsContext<F>,
    rect: &Rectangle,
    replace: Replace<F::Color>,
    rgb: [u8; 3],
) {
    let Some(mut fb) = ctx.capture_framebuffer() else {
        trace!("dither {:?} skipped: framebuffer unavailable", rect);
        return;
    };
    let rows = clip_rows(rect, fb.height());
    if rows.is_empty() {
        trace!("dither {:?} clipped to nothing", rect);
        return;
    }
    for y in rows {
        let Some((row, span)) = fb.row_mut(y) else {
            continue;
        };
        for x in clip_columns(rect, span) {
            let col = x as usize;
            // `Any` never reads the pixel
            if let Replace::Only(_) = replace {
                if !replace.matches(&F::get(row, col)) {
                    continue;
                }
            }
            F::set(row, col, <F::Dither as DitherStrategy>::map(x, y, rgb));
        }
    }
}
