//! Clipping of a requested rectangle against the framebuffer.
//!
//! Rows are clipped against the buffer height once; columns are clipped per
//! row against that row's visible span, which also bounds the left edge.

use core::ops::Range;

use embedded_graphics::primitives::Rectangle;

use crate::framebuffer::RowSpan;

/// Rows of `rect` that exist in a buffer of `height` rows.
pub fn clip_rows(rect: &Rectangle, height: u32) -> Range<i32> {
    let mut top = rect.top_left.y;
    let mut h = i32::try_from(rect.size.height).unwrap_or(i32::MAX);
    if top < 0 {
        h = h.saturating_add(top);
        top = 0;
    }
    let height = i32::try_from(height).unwrap_or(i32::MAX);
    if top.saturating_add(h) > height {
        h = height - top;
    }
    if h <= 0 {
        return 0..0;
    }
    top..top + h
}

/// Columns of `rect` that fall inside `span`. Empty when they don't meet.
pub fn clip_columns(rect: &Rectangle, span: RowSpan) -> Range<i32> {
    let w = i32::try_from(rect.size.width).unwrap_or(i32::MAX);
    let start = rect.top_left.x.max(span.min_x);
    let end = rect
        .top_left
        .x
        .saturating_add(w)
        .min(span.max_x.saturating_add(1));
    if end <= start {
        return 0..0;
    }
    start..end
}
