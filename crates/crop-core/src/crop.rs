//! Cropping operations
//!
//! Every operation resolves its arguments to a [`Rectangle`], clamps it to
//! the source bounds and copies that region into a freshly allocated
//! buffer. The source is only read. Geometry is never rejected: a request
//! that lands outside the image yields an empty (0 x 0, 0 x h or w x 0)
//! buffer.

use crate::anchor::Anchor;
use crate::directive::{CropDirective, Margins};
use crate::geometry::{Point, Rectangle};
use crate::raster::Raster;
use image::{ImageBuffer, Pixel};
use tracing::debug;

/// Buffer produced by a crop, with the same pixel type as its source
pub type Cropped<P> = ImageBuffer<P, Vec<<P as Pixel>::Subpixel>>;

/// Crop `source` to `rect`
///
/// Each edge of `rect` is clamped into `source.bounds()` on its own. The
/// output's pixel (0, 0) is the source pixel at the clamped `rect.min`.
///
/// # Arguments
/// * `source` - Image to read from
/// * `rect` - Region to keep, in the source's coordinates
pub fn crop_to_rectangle<R>(source: &R, rect: Rectangle) -> Cropped<R::Pixel>
where
    R: Raster + ?Sized,
{
    let clamped = rect.clamp_to(&source.bounds());
    let (width, height) = clamped.size();

    debug!(requested = %rect, clamped = %clamped, "crop.rectangle");

    // clamp_to guarantees min <= max, so both sizes are non-negative
    ImageBuffer::from_fn(width as u32, height as u32, |x, y| {
        source.pixel_at(clamped.min.x + x as i32, clamped.min.y + y as i32)
    })
}

/// Crop a `width` x `height` window positioned by `anchor`
///
/// The requested size is capped at the source size; negative sizes count
/// as 0. The anchor offset is measured from the source's top-left corner,
/// including when the bounds do not start at the origin.
pub fn crop_to_size<R>(source: &R, width: i32, height: i32, anchor: Anchor) -> Cropped<R::Pixel>
where
    R: Raster + ?Sized,
{
    let rect = anchored_rectangle(&source.bounds(), width, height, anchor);
    crop_to_rectangle(source, rect)
}

/// Crop the largest square that fits, positioned by `anchor`
pub fn crop_to_square<R>(source: &R, anchor: Anchor) -> Cropped<R::Pixel>
where
    R: Raster + ?Sized,
{
    let (width, height) = source.bounds().size();
    let side = width.min(height);
    crop_to_size(source, side, side, anchor)
}

/// Crop the largest centered square
pub fn crop_to_center_square<R>(source: &R) -> Cropped<R::Pixel>
where
    R: Raster + ?Sized,
{
    crop_to_square(source, Anchor::Center)
}

/// Trim the given thickness off each edge
///
/// Margins are not validated. If left + right exceeds the width (or
/// top + bottom the height) the result is empty; negative margins reach
/// past the edge and are clamped back to the bounds.
pub fn crop_by_margins<R>(
    source: &R,
    top: i32,
    right: i32,
    bottom: i32,
    left: i32,
) -> Cropped<R::Pixel>
where
    R: Raster + ?Sized,
{
    let margins = Margins::new(top, right, bottom, left);
    let rect = margin_rectangle(&source.bounds(), &margins);
    crop_to_rectangle(source, rect)
}

/// Resolve `directive` against `source` and crop
pub fn crop<R>(source: &R, directive: &CropDirective) -> Cropped<R::Pixel>
where
    R: Raster + ?Sized,
{
    let rect = directive.resolve(&source.bounds());
    crop_to_rectangle(source, rect)
}

/// Rectangle of a `width` x `height` window placed inside `bounds` by `anchor`
pub(crate) fn anchored_rectangle(
    bounds: &Rectangle,
    width: i32,
    height: i32,
    anchor: Anchor,
) -> Rectangle {
    let (src_width, src_height) = bounds.size();
    let width = width.clamp(0, src_width);
    let height = height.clamp(0, src_height);

    let offset = anchor.offset(src_width, src_height, width, height);
    Rectangle::from_size(bounds.min + offset, width, height)
}

/// Rectangle left after removing `margins` from `bounds`
pub(crate) fn margin_rectangle(bounds: &Rectangle, margins: &Margins) -> Rectangle {
    Rectangle {
        min: Point::new(
            bounds.min.x.saturating_add(margins.left),
            bounds.min.y.saturating_add(margins.top),
        ),
        max: Point::new(
            bounds.max.x.saturating_sub(margins.right),
            bounds.max.y.saturating_sub(margins.bottom),
        ),
    }
}
