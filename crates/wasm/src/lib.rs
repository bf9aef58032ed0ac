//! WASM bindings for cropkit
//!
//! This crate provides JavaScript-friendly API for:
//! - Decoding JPEG / PNG bytes
//! - Cropping by rectangle, size + anchor, square or margins
//! - Encoding the result back to JPEG / PNG
//!
//! # Example (JavaScript)
//!
//! ```javascript
//! import init, { Cropper, Anchors } from 'cropkit-wasm';
//!
//! await init();
//!
//! const image = Cropper.fromBytes(new Uint8Array(await file.arrayBuffer()));
//!
//! // Avatar
//! const avatar = image.centerSquare().encodeJpeg(90);
//!
//! // Banner, anchored by name
//! const banner = image.toSize(1200, 400, Anchors.fromName('top-left'));
//!
//! // Directive objects work too
//! const trimmed = image.apply({ kind: 'margins', top: 10, bottom: 10 });
//! ```

use crop_core::{
    crop, crop_by_margins, crop_to_center_square, crop_to_rectangle, crop_to_size,
    crop_to_square, Anchor, CropDirective, CropError, Rectangle,
};
use image::RgbaImage;
use wasm_bindgen::prelude::*;

// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn to_js_error(err: CropError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Anchor lookup for JavaScript callers
#[wasm_bindgen]
pub struct Anchors;

#[wasm_bindgen]
impl Anchors {
    /// Resolve an anchor name to the index expected by `toSize` / `toSquare`
    ///
    /// Unknown names resolve to top-left.
    ///
    /// @param name - "center", "top-left", "top-right", "bottom-left" or "bottom-right"
    /// @returns Anchor index (0-4)
    #[wasm_bindgen(js_name = fromName)]
    pub fn from_name(name: &str) -> i32 {
        Anchor::from_name(name).index()
    }
}

/// A decoded image that can be cropped and re-encoded
///
/// Every crop returns a new Cropper; the original is left as is.
#[wasm_bindgen]
pub struct Cropper {
    image: RgbaImage,
}

impl Cropper {
    fn wrap(image: RgbaImage) -> Cropper {
        Cropper { image }
    }
}

#[wasm_bindgen]
impl Cropper {
    /// Decode a JPEG or PNG
    ///
    /// @param data - Image file bytes (Uint8Array)
    /// @returns Cropper instance
    #[wasm_bindgen(js_name = fromBytes)]
    pub fn from_bytes(data: &[u8]) -> Result<Cropper, JsValue> {
        let image = crop_core::decode(data).map_err(to_js_error)?;
        Ok(Cropper::wrap(image.to_rgba8()))
    }

    /// Width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Raw RGBA pixels, row by row (suitable for ImageData)
    pub fn pixels(&self) -> Vec<u8> {
        self.image.as_raw().clone()
    }

    /// Crop to the rectangle (x0, y0)-(x1, y1), max corner exclusive
    #[wasm_bindgen(js_name = toRectangle)]
    pub fn to_rectangle(&self, x0: i32, y0: i32, x1: i32, y1: i32) -> Cropper {
        Cropper::wrap(crop_to_rectangle(&self.image, Rectangle::new(x0, y0, x1, y1)))
    }

    /// Crop a width x height window positioned by an anchor index
    ///
    /// @param anchor - 0 center, 1 top-left, 2 top-right, 3 bottom-left,
    ///   4 bottom-right; anything else is treated as top-left
    #[wasm_bindgen(js_name = toSize)]
    pub fn to_size(&self, width: i32, height: i32, anchor: i32) -> Cropper {
        Cropper::wrap(crop_to_size(
            &self.image,
            width,
            height,
            Anchor::from_index(anchor),
        ))
    }

    /// Crop the largest square positioned by an anchor index
    #[wasm_bindgen(js_name = toSquare)]
    pub fn to_square(&self, anchor: i32) -> Cropper {
        Cropper::wrap(crop_to_square(&self.image, Anchor::from_index(anchor)))
    }

    /// Crop the largest centered square
    #[wasm_bindgen(js_name = centerSquare)]
    pub fn center_square(&self) -> Cropper {
        Cropper::wrap(crop_to_center_square(&self.image))
    }

    /// Trim the given thickness off each edge
    #[wasm_bindgen(js_name = byMargins)]
    pub fn by_margins(&self, top: i32, right: i32, bottom: i32, left: i32) -> Cropper {
        Cropper::wrap(crop_by_margins(&self.image, top, right, bottom, left))
    }

    /// Crop with a directive object
    ///
    /// @param directive - e.g. `{ kind: "size_with_anchor", width: 64, height: 64, anchor: "center" }`
    pub fn apply(&self, directive: JsValue) -> Result<Cropper, JsValue> {
        let directive: CropDirective = serde_wasm_bindgen::from_value(directive)?;
        Ok(Cropper::wrap(crop(&self.image, &directive)))
    }

    /// Crop with a directive given as JSON text
    #[wasm_bindgen(js_name = applyJson)]
    pub fn apply_json(&self, json: &str) -> Result<Cropper, JsValue> {
        let directive = CropDirective::from_json(json).map_err(to_js_error)?;
        Ok(Cropper::wrap(crop(&self.image, &directive)))
    }

    /// Encode as JPEG
    ///
    /// @param quality - 1-100; anything else uses 85
    /// @returns JPEG bytes (Uint8Array)
    #[wasm_bindgen(js_name = encodeJpeg)]
    pub fn encode_jpeg(&self, quality: i32) -> Result<Vec<u8>, JsValue> {
        let mut buffer = Vec::new();
        crop_core::encode_jpeg(self.image.clone(), &mut buffer, quality).map_err(to_js_error)?;
        Ok(buffer)
    }

    /// Encode as PNG
    ///
    /// @returns PNG bytes (Uint8Array)
    #[wasm_bindgen(js_name = encodePng)]
    pub fn encode_png(&self) -> Result<Vec<u8>, JsValue> {
        let mut buffer = Vec::new();
        crop_core::encode_png(self.image.clone(), &mut buffer).map_err(to_js_error)?;
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use wasm_bindgen_test::*;

    fn sample_png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_fn(width, height, |x, y| Rgba([x as u8, y as u8, 0, 255]));
        let mut buffer = Vec::new();
        crop_core::encode_png(img, &mut buffer).unwrap();
        buffer
    }

    #[wasm_bindgen_test]
    fn test_anchor_names() {
        assert_eq!(Anchors::from_name("center"), 0);
        assert_eq!(Anchors::from_name("bottom-right"), 4);
        assert_eq!(Anchors::from_name("sideways"), 1);
    }

    #[wasm_bindgen_test]
    fn test_center_square() {
        let cropper = Cropper::from_bytes(&sample_png(50, 20)).unwrap();
        let square = cropper.center_square();

        assert_eq!((square.width(), square.height()), (20, 20));
        assert_eq!(&square.pixels()[..4], &[15, 0, 0, 255]);
    }

    #[wasm_bindgen_test]
    fn test_to_size_unknown_anchor() {
        let cropper = Cropper::from_bytes(&sample_png(50, 20)).unwrap();
        let window = cropper.to_size(10, 10, 42);

        assert_eq!(&window.pixels()[..4], &[0, 0, 0, 255]);
    }

    #[wasm_bindgen_test]
    fn test_apply_json_and_encode() {
        let cropper = Cropper::from_bytes(&sample_png(50, 20)).unwrap();
        let trimmed = cropper
            .apply_json(r#"{ "kind": "margins", "left": 10, "right": 10 }"#)
            .unwrap();

        assert_eq!((trimmed.width(), trimmed.height()), (30, 20));

        let png = trimmed.encode_png().unwrap();
        let reloaded = Cropper::from_bytes(&png).unwrap();
        assert_eq!(reloaded.pixels(), trimmed.pixels());
    }

    #[wasm_bindgen_test]
    fn test_to_rectangle_outside_is_empty() {
        let cropper = Cropper::from_bytes(&sample_png(50, 20)).unwrap();

        let inside = cropper.to_rectangle(5, 2, 15, 12);
        assert_eq!((inside.width(), inside.height()), (10, 10));
        assert_eq!(&inside.pixels()[..4], &[5, 2, 0, 255]);

        let outside = cropper.to_rectangle(100, 100, 200, 200);
        assert_eq!((outside.width(), outside.height()), (0, 0));
        assert!(outside.pixels().is_empty());
    }

    #[wasm_bindgen_test]
    fn test_to_square_and_by_margins() {
        let cropper = Cropper::from_bytes(&sample_png(50, 20)).unwrap();

        let square = cropper.to_square(Anchor::TopRight.index());
        assert_eq!((square.width(), square.height()), (20, 20));
        assert_eq!(&square.pixels()[..4], &[30, 0, 0, 255]);

        let trimmed = cropper.by_margins(2, 5, 3, 4);
        assert_eq!((trimmed.width(), trimmed.height()), (41, 15));
        assert_eq!(&trimmed.pixels()[..4], &[4, 2, 0, 255]);
    }

    #[wasm_bindgen_test]
    fn test_encode_jpeg_out_of_range_quality() {
        let cropper = Cropper::from_bytes(&sample_png(32, 16)).unwrap();
        let jpeg = cropper.encode_jpeg(0).unwrap();

        assert_eq!(&jpeg[..3], &[0xFF, 0xD8, 0xFF]);
        let reloaded = Cropper::from_bytes(&jpeg).unwrap();
        assert_eq!((reloaded.width(), reloaded.height()), (32, 16));
    }

    // JsValue conversions need a JS host
    #[cfg(target_arch = "wasm32")]
    #[wasm_bindgen_test]
    fn test_apply_directive_object() {
        let cropper = Cropper::from_bytes(&sample_png(50, 20)).unwrap();
        let directive = serde_wasm_bindgen::to_value(&CropDirective::SizeWithAnchor {
            width: 10,
            height: 8,
            anchor: Anchor::BottomRight,
        })
        .unwrap();

        let window = cropper.apply(directive).unwrap();
        assert_eq!((window.width(), window.height()), (10, 8));
        assert_eq!(&window.pixels()[..4], &[40, 12, 0, 255]);
    }

    #[cfg(target_arch = "wasm32")]
    #[wasm_bindgen_test]
    fn test_apply_rejects_bad_directives() {
        let cropper = Cropper::from_bytes(&sample_png(50, 20)).unwrap();

        assert!(cropper.apply_json(r#"{ "kind": "rotate" }"#).is_err());
        assert!(cropper.apply_json("not json").is_err());
        assert!(cropper.apply(JsValue::from_str("margins")).is_err());
    }
}
