//! Graphics context and scoped framebuffer capture.

use core::ops::{Deref, DerefMut};

use log::debug;

use crate::format::PixelFormat;
use crate::framebuffer::Framebuffer;

/// Drawing context handed to redraw callbacks. Owns the framebuffer.
///
/// Direct framebuffer access goes through [`capture_framebuffer`], which
/// grants short-term exclusive use and releases it when the returned guard
/// is dropped.
///
/// [`capture_framebuffer`]: GraphicsContext::capture_framebuffer
pub struct GraphicsContext<F: PixelFormat> {
    framebuffer: Framebuffer<F>,
    captured: bool,
    suspended: bool,
}

impl<F: PixelFormat> GraphicsContext<F> {
    pub fn new(framebuffer: Framebuffer<F>) -> Self {
        Self {
            framebuffer,
            captured: false,
            suspended: false,
        }
    }

    /// Try to take the framebuffer for direct access.
    ///
    /// Returns `None` while rendering is suspended, or when an earlier
    /// capture was never released (its guard was leaked).
    pub fn capture_framebuffer(&mut self) -> Option<FramebufferCapture<'_, F>> {
        if self.suspended {
            debug!("framebuffer capture refused: rendering suspended");
            return None;
        }
        if self.captured {
            debug!("framebuffer capture refused: already captured");
            return None;
        }
        self.captured = true;
        Some(FramebufferCapture {
            framebuffer: &mut self.framebuffer,
            captured: &mut self.captured,
        })
    }

    /// True while a capture is outstanding.
    pub fn is_captured(&self) -> bool {
        self.captured
    }

    /// Refuse captures until [`resume_rendering`](Self::resume_rendering).
    pub fn suspend_rendering(&mut self) {
        self.suspended = true;
    }

    pub fn resume_rendering(&mut self) {
        self.suspended = false;
    }

    /// Read-only view for inspection outside a redraw.
    pub fn framebuffer(&self) -> &Framebuffer<F> {
        &self.framebuffer
    }

    pub fn into_framebuffer(self) -> Framebuffer<F> {
        self.framebuffer
    }
}

/// Exclusive framebuffer access for the duration of one operation.
///
/// Dropping the guard releases the capture.
pub struct FramebufferCapture<'a, F: PixelFormat> {
    framebuffer: &'a mut Framebuffer<F>,
    captured: &'a mut bool,
}

impl<F: PixelFormat> Deref for FramebufferCapture<'_, F> {
    type Target = Framebuffer<F>;

    fn deref(&self) -> &Framebuffer<F> {
        &*self.framebuffer
    }
}

impl<F: PixelFormat> DerefMut for FramebufferCapture<'_, F> {
    fn deref_mut(&mut self) -> &mut Framebuffer<F> {
        &mut *self.framebuffer
    }
}

impl<F: PixelFormat> Drop for FramebufferCapture<'_, F> {
    fn drop(&mut self) {
        *self.captured = false;
    }
}
