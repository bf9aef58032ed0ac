//! File and codec boundary: JPEG / PNG decode, encode, load and save

use crate::crop::crop_to_rectangle;
use crate::geometry::Rectangle;
use crate::{CropError, Result};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ImageError, ImageReader, RgbaImage};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Write};
use std::path::Path;
use tracing::{debug, warn};

/// JPEG quality used when the requested one is outside 1..=100
pub const DEFAULT_JPEG_QUALITY: u8 = 85;

/// Raster formats this crate reads and writes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RasterFormat {
    Jpeg,
    #[default]
    Png,
}

impl RasterFormat {
    /// Conventional file extension
    pub fn extension(self) -> &'static str {
        match self {
            RasterFormat::Jpeg => "jpg",
            RasterFormat::Png => "png",
        }
    }
}

/// Encoder settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeOptions {
    /// Output format
    pub format: RasterFormat,

    /// JPEG quality (1-100); anything else falls back to 85.
    /// Ignored for PNG.
    pub jpeg_quality: i32,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            format: RasterFormat::default(),
            jpeg_quality: DEFAULT_JPEG_QUALITY as i32,
        }
    }
}

impl EncodeOptions {
    /// PNG output, default JPEG quality
    pub fn new() -> Self {
        Self::default()
    }

    /// JPEG output at the given quality
    pub fn jpeg(quality: i32) -> Self {
        Self {
            format: RasterFormat::Jpeg,
            jpeg_quality: quality,
        }
    }

    pub fn with_format(mut self, format: RasterFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_jpeg_quality(mut self, quality: i32) -> Self {
        self.jpeg_quality = quality;
        self
    }
}

/// Detect JPEG or PNG from magic bytes
///
/// Returns `None` for anything else, including input too short to tell.
pub fn detect_format(data: &[u8]) -> Option<RasterFormat> {
    // JPEG starts with FF D8 FF
    if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return Some(RasterFormat::Jpeg);
    }

    // PNG starts with 89 50 4E 47 0D 0A 1A 0A
    if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
        return Some(RasterFormat::Png);
    }

    None
}

/// Split codec errors into sink/source IO failures and format failures
fn decode_error(err: ImageError) -> CropError {
    match err {
        ImageError::IoError(err) => CropError::Io(err),
        other => CropError::Decode(other),
    }
}

fn encode_error(err: ImageError) -> CropError {
    match err {
        ImageError::IoError(err) => CropError::Io(err),
        other => CropError::Encode(other),
    }
}

/// Decode an in-memory JPEG or PNG
pub fn decode(data: &[u8]) -> Result<DynamicImage> {
    debug!(len = data.len(), format = ?detect_format(data), "codec.decode");

    let reader = ImageReader::new(Cursor::new(data)).with_guessed_format()?;
    reader.decode().map_err(decode_error)
}

/// Open and decode an image file
///
/// The format is sniffed from the content, not the extension. The file
/// handle lives inside the reader and is closed when the reader is
/// consumed or dropped, whichever way this function returns.
pub fn load(path: impl AsRef<Path>) -> Result<DynamicImage> {
    let path = path.as_ref();
    debug!(path = %path.display(), "codec.load");

    let file = File::open(path)?;
    let reader = ImageReader::new(BufReader::new(file)).with_guessed_format()?;
    reader.decode().map_err(decode_error)
}

/// Open an image file and crop it to `rect`
///
/// # Errors
/// * [`CropError::Io`] if the file is missing or unreadable
/// * [`CropError::Decode`] if the content is not a supported image
///
/// Nothing is cropped unless decoding succeeds.
pub fn load_and_crop(path: impl AsRef<Path>, rect: Rectangle) -> Result<RgbaImage> {
    let source = load(path)?;
    Ok(crop_to_rectangle(&source, rect))
}

/// Clamp a requested JPEG quality into 1..=100
fn jpeg_quality(quality: i32) -> u8 {
    match u8::try_from(quality) {
        Ok(q) if (1..=100).contains(&q) => q,
        _ => {
            warn!(quality, fallback = DEFAULT_JPEG_QUALITY, "jpeg quality out of range");
            DEFAULT_JPEG_QUALITY
        }
    }
}

/// Encode `image` as JPEG into `sink`
///
/// Quality outside 1..=100 silently becomes 85. JPEG has no alpha
/// channel, so anything other than 8-bit gray or RGB is flattened to
/// 8-bit RGB first.
pub fn encode_jpeg<I, W>(image: I, sink: W, quality: i32) -> Result<()>
where
    I: Into<DynamicImage>,
    W: Write,
{
    let quality = jpeg_quality(quality);
    let image: DynamicImage = image.into();
    let image = match image {
        DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_) => image,
        other => DynamicImage::ImageRgb8(other.to_rgb8()),
    };

    debug!(
        width = image.width(),
        height = image.height(),
        quality,
        "codec.encode_jpeg"
    );

    image
        .write_with_encoder(JpegEncoder::new_with_quality(sink, quality))
        .map_err(encode_error)
}

/// Encode `image` as PNG into `sink`
pub fn encode_png<I, W>(image: I, sink: W) -> Result<()>
where
    I: Into<DynamicImage>,
    W: Write,
{
    let image: DynamicImage = image.into();
    let image = match image {
        // PNG stores integer samples only
        DynamicImage::ImageRgb32F(_) => DynamicImage::ImageRgb16(image.to_rgb16()),
        DynamicImage::ImageRgba32F(_) => DynamicImage::ImageRgba16(image.to_rgba16()),
        other => other,
    };

    debug!(
        width = image.width(),
        height = image.height(),
        "codec.encode_png"
    );

    image
        .write_with_encoder(PngEncoder::new(sink))
        .map_err(encode_error)
}

/// Encode `image` according to `options`
pub fn encode<I, W>(image: I, sink: W, options: &EncodeOptions) -> Result<()>
where
    I: Into<DynamicImage>,
    W: Write,
{
    match options.format {
        RasterFormat::Jpeg => encode_jpeg(image, sink, options.jpeg_quality),
        RasterFormat::Png => encode_png(image, sink),
    }
}

/// Encode `image` into a new file at `path`
pub fn save<I>(image: I, path: impl AsRef<Path>, options: &EncodeOptions) -> Result<()>
where
    I: Into<DynamicImage>,
{
    let path = path.as_ref();
    debug!(path = %path.display(), format = ?options.format, "codec.save");

    let mut writer = BufWriter::new(File::create(path)?);
    encode(image, &mut writer, options)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, RgbImage, Rgba};
    use pretty_assertions::assert_eq;

    struct BrokenSink;

    impl Write for BrokenSink {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "sink closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn sample_rgba() -> RgbaImage {
        RgbaImage::from_fn(8, 6, |x, y| Rgba([(x * 30) as u8, (y * 40) as u8, 90, 128]))
    }

    #[test]
    fn test_detect_jpeg() {
        let jpeg_header = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46];
        assert_eq!(detect_format(&jpeg_header), Some(RasterFormat::Jpeg));
    }

    #[test]
    fn test_detect_png() {
        let png_header = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        assert_eq!(detect_format(&png_header), Some(RasterFormat::Png));
    }

    #[test]
    fn test_detect_unknown() {
        assert_eq!(detect_format(&[0x00; 8]), None);
        assert_eq!(detect_format(&[0xFF, 0xD8]), None);
        assert_eq!(detect_format(&[0x89, 0x00, 0x00, 0x00]), None);
        assert_eq!(detect_format(&[]), None);
    }

    #[test]
    fn test_jpeg_quality_fallback() {
        assert_eq!(jpeg_quality(1), 1);
        assert_eq!(jpeg_quality(100), 100);
        assert_eq!(jpeg_quality(0), DEFAULT_JPEG_QUALITY);
        assert_eq!(jpeg_quality(-20), DEFAULT_JPEG_QUALITY);
        assert_eq!(jpeg_quality(101), DEFAULT_JPEG_QUALITY);
        assert_eq!(jpeg_quality(1000), DEFAULT_JPEG_QUALITY);
    }

    #[test]
    fn test_encode_png_lossless() {
        let img = sample_rgba();
        let mut buffer = Vec::new();
        encode_png(img.clone(), &mut buffer).unwrap();

        assert_eq!(detect_format(&buffer), Some(RasterFormat::Png));
        assert_eq!(decode(&buffer).unwrap().to_rgba8(), img);
    }

    #[test]
    fn test_encode_jpeg_flattens_alpha() {
        let mut buffer = Vec::new();
        encode_jpeg(sample_rgba(), &mut buffer, 90).unwrap();

        assert_eq!(detect_format(&buffer), Some(RasterFormat::Jpeg));
        let decoded = decode(&buffer).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (8, 6));
        assert!(!decoded.color().has_alpha());
    }

    #[test]
    fn test_encode_jpeg_out_of_range_quality_matches_default() {
        let img = RgbImage::from_fn(16, 16, |x, y| Rgb([(x * 16) as u8, (y * 16) as u8, 0]));

        let mut fallback = Vec::new();
        encode_jpeg(img.clone(), &mut fallback, 0).unwrap();
        let mut default = Vec::new();
        encode_jpeg(img, &mut default, DEFAULT_JPEG_QUALITY as i32).unwrap();

        assert_eq!(fallback, default);
    }

    #[test]
    fn test_encode_jpeg_keeps_gray() {
        let img = GrayImage::from_pixel(4, 4, Luma([77]));
        let mut buffer = Vec::new();
        encode_jpeg(img, &mut buffer, 100).unwrap();

        assert_eq!(decode(&buffer).unwrap().color(), image::ColorType::L8);
    }

    #[test]
    fn test_encode_write_failure_is_io() {
        let err = encode_png(sample_rgba(), BrokenSink).unwrap_err();
        assert!(matches!(err, CropError::Io(_)), "{err:?}");

        let err = encode_jpeg(sample_rgba(), BrokenSink, 85).unwrap_err();
        assert!(matches!(err, CropError::Io(_)), "{err:?}");
    }

    #[test]
    fn test_encode_with_options() {
        let mut png = Vec::new();
        encode(sample_rgba(), &mut png, &EncodeOptions::new()).unwrap();
        assert_eq!(detect_format(&png), Some(RasterFormat::Png));

        let mut jpeg = Vec::new();
        encode(sample_rgba(), &mut jpeg, &EncodeOptions::jpeg(70)).unwrap();
        assert_eq!(detect_format(&jpeg), Some(RasterFormat::Jpeg));
    }

    #[test]
    fn test_decode_garbage_is_decode_error() {
        let err = decode(b"definitely not an image").unwrap_err();
        assert!(matches!(err, CropError::Decode(_)), "{err:?}");
    }

    #[test]
    fn test_encode_options_default() {
        let options = EncodeOptions::default();
        assert_eq!(options.format, RasterFormat::Png);
        assert_eq!(options.jpeg_quality, 85);

        let options = EncodeOptions::new()
            .with_format(RasterFormat::Jpeg)
            .with_jpeg_quality(60);
        assert_eq!(options, EncodeOptions::jpeg(60));
    }

    #[test]
    fn test_encode_options_from_json() {
        let options: EncodeOptions = serde_json::from_str(r#"{ "format": "jpeg" }"#).unwrap();
        assert_eq!(options, EncodeOptions::jpeg(85));
    }

    #[test]
    fn test_extension() {
        assert_eq!(RasterFormat::Jpeg.extension(), "jpg");
        assert_eq!(RasterFormat::Png.extension(), "png");
    }
}
