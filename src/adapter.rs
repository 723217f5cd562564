//! DitherDrawTarget adapter: draws Rgb888 into a native target through a dither strategy.

use core::marker::PhantomData;

use embedded_graphics::{
    pixelcolor::{Rgb888, RgbColor},
    prelude::*,
    primitives::{PointsIter, Rectangle},
};

use crate::dither::DitherStrategy;

/// Wrap an embedded-graphics DrawTarget to apply Bayer dither at draw time.
///
/// Pixels are dithered at their own coordinates, so shapes drawn through
/// the adapter line up with areas filled by
/// [`fill_rect_dithered`](crate::fill_rect_dithered).
pub struct DitherDrawTarget<T, S> {
    inner: T,
    _strat: PhantomData<S>,
}

impl<T, S> DitherDrawTarget<T, S> {
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            _strat: PhantomData,
        }
    }
    pub fn into_inner(self) -> T {
        self.inner
    }
    pub fn inner_mut(&mut self) -> &mut T {
        &mut self.inner
    }
}

impl<T, S, E> DrawTarget for DitherDrawTarget<T, S>
where
    T: DrawTarget<Color = S::Output, Error = E> + OriginDimensions,
    S: DitherStrategy,
    S::Output: PixelColor,
{
    type Color = Rgb888;
    type Error = E;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.inner.draw_iter(
            pixels
                .into_iter()
                .map(|Pixel(p, rgb)| Pixel(p, S::map(p.x, p.y, [rgb.r(), rgb.g(), rgb.b()]))),
        )
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let area = area.intersection(&self.inner.bounding_box());
        let rgb = [color.r(), color.g(), color.b()];
        self.inner
            .draw_iter(area.points().map(|p| Pixel(p, S::map(p.x, p.y, rgb))))
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.inner.clear(S::nearest([color.r(), color.g(), color.b()]))
    }
}

impl<T, S> OriginDimensions for DitherDrawTarget<T, S>
where
    T: OriginDimensions,
{
    fn size(&self) -> Size {
        self.inner.size()
    }
}
