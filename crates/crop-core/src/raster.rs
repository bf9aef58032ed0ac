//! Readable pixel sources with a bounding rectangle

use crate::geometry::{Point, Rectangle};
use image::{DynamicImage, GenericImageView, ImageBuffer, Pixel, Rgba};
use std::ops::Deref;

/// A readable pixel buffer positioned in a coordinate space
///
/// `pixel_at` takes coordinates in the same space as `bounds`, so for a
/// source whose bounds start at (10, 20) the first pixel is `pixel_at(10, 20)`.
/// Callers must stay inside `bounds`.
pub trait Raster {
    type Pixel: Pixel;

    /// Rectangle of valid pixel coordinates
    fn bounds(&self) -> Rectangle;

    /// Read the pixel at (x, y)
    fn pixel_at(&self, x: i32, y: i32) -> Self::Pixel;
}

/// Convert an image dimension into a coordinate, saturating at `i32::MAX`
pub(crate) fn coord(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

impl<P, C> Raster for ImageBuffer<P, C>
where
    P: Pixel,
    C: Deref<Target = [P::Subpixel]>,
{
    type Pixel = P;

    fn bounds(&self) -> Rectangle {
        Rectangle::new(0, 0, coord(self.width()), coord(self.height()))
    }

    fn pixel_at(&self, x: i32, y: i32) -> P {
        *self.get_pixel(x as u32, y as u32)
    }
}

impl Raster for DynamicImage {
    type Pixel = Rgba<u8>;

    fn bounds(&self) -> Rectangle {
        Rectangle::new(0, 0, coord(self.width()), coord(self.height()))
    }

    fn pixel_at(&self, x: i32, y: i32) -> Rgba<u8> {
        self.get_pixel(x as u32, y as u32)
    }
}

/// An image placed at a non-zero origin
///
/// Models a view cut out of a larger picture that keeps the parent's
/// coordinates: its bounds are `origin .. origin + (width, height)`.
#[derive(Debug, Clone)]
pub struct Placed<I> {
    image: I,
    origin: Point,
}

impl<I> Placed<I> {
    /// Place `image` so its top-left pixel sits at `origin`
    pub fn new(image: I, origin: Point) -> Self {
        Self { image, origin }
    }

    /// Coordinate of the top-left pixel
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// The wrapped image
    pub fn inner(&self) -> &I {
        &self.image
    }

    /// Unwrap the image, dropping its placement
    pub fn into_inner(self) -> I {
        self.image
    }
}

impl<I: GenericImageView> Raster for Placed<I> {
    type Pixel = I::Pixel;

    fn bounds(&self) -> Rectangle {
        let (width, height) = self.image.dimensions();
        Rectangle::from_size(self.origin, coord(width), coord(height))
    }

    fn pixel_at(&self, x: i32, y: i32) -> I::Pixel {
        self.image
            .get_pixel(x.abs_diff(self.origin.x), y.abs_diff(self.origin.y))
    }
}
