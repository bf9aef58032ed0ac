//! Crop Core - Bounds-safe image cropping
//!
//! This crate provides:
//! - Cropping to an explicit rectangle, clamped to the image bounds
//! - Anchor-relative cropping to a target size
//! - Square and center-square cropping
//! - Margin trimming
//! - JPEG / PNG load and save helpers
//!
//! # Example
//!
//! ```ignore
//! use crop_core::{crop_to_size, load_and_crop, encode_jpeg, Anchor, Rectangle};
//!
//! let banner = load_and_crop("photo.jpg", Rectangle::new(0, 0, 1200, 400))?;
//! let avatar = crop_to_size(&banner, 256, 256, Anchor::Center);
//!
//! let mut out = std::fs::File::create("avatar.jpg")?;
//! encode_jpeg(avatar, &mut out, 90)?;
//! ```

mod anchor;
mod codec;
mod crop;
mod directive;
mod geometry;
mod raster;

pub use anchor::Anchor;
pub use codec::{
    decode, detect_format, encode, encode_jpeg, encode_png, load, load_and_crop, save,
    EncodeOptions, RasterFormat, DEFAULT_JPEG_QUALITY,
};
pub use crop::{
    crop, crop_by_margins, crop_to_center_square, crop_to_rectangle, crop_to_size, crop_to_square,
    Cropped,
};
pub use directive::{CropDirective, Margins};
pub use geometry::{Point, Rectangle};
pub use raster::{Placed, Raster};

use thiserror::Error;

/// Errors that can occur at the file and codec boundary
///
/// Crop geometry is never an error: degenerate rectangles are clamped
/// down to an empty image instead.
#[derive(Debug, Error)]
pub enum CropError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("Failed to encode image: {0}")]
    Encode(#[source] image::ImageError),

    #[error("Invalid crop directive: {0}")]
    Directive(#[from] serde_json::Error),
}

/// Result type for crop operations
pub type Result<T> = std::result::Result<T, CropError>;
