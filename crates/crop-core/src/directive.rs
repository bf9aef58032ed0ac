//! Crop directives
//!
//! A directive describes what to cut without committing to pixel
//! coordinates; it is resolved against a source's bounds right before the
//! copy. Directives round-trip through JSON:
//!
//! ```json
//! { "kind": "size_with_anchor", "width": 256, "height": 256, "anchor": "center" }
//! { "kind": "margins", "top": 10, "bottom": 10 }
//! { "kind": "explicit_rectangle", "min": { "x": 0, "y": 0 }, "max": { "x": 64, "y": 64 } }
//! ```

use crate::anchor::Anchor;
use crate::crop::{anchored_rectangle, margin_rectangle};
use crate::geometry::Rectangle;
use crate::Result;
use serde::{Deserialize, Serialize};

/// Thickness to remove from each edge
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl Margins {
    /// Create margins in CSS order (top, right, bottom, left)
    pub const fn new(top: i32, right: i32, bottom: i32, left: i32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Same margin on every edge
    pub const fn uniform(margin: i32) -> Self {
        Self::new(margin, margin, margin, margin)
    }
}

fn default_anchor() -> Anchor {
    Anchor::Center
}

/// What to crop out of an image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CropDirective {
    /// Crop to a rectangle given in the source's coordinates
    ExplicitRectangle(Rectangle),

    /// Crop a `width` x `height` window positioned by `anchor`
    SizeWithAnchor {
        width: i32,
        height: i32,
        #[serde(default = "default_anchor")]
        anchor: Anchor,
    },

    /// Trim the given thickness off each edge
    Margins(Margins),
}

impl CropDirective {
    /// Parse a directive from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the directive to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Resolve to a rectangle in the coordinate space of `bounds`
    ///
    /// The result is not clamped yet; cropping clamps it.
    pub fn resolve(&self, bounds: &Rectangle) -> Rectangle {
        match *self {
            CropDirective::ExplicitRectangle(rect) => rect,
            CropDirective::SizeWithAnchor {
                width,
                height,
                anchor,
            } => anchored_rectangle(bounds, width, height, anchor),
            CropDirective::Margins(margins) => margin_rectangle(bounds, &margins),
        }
    }
}

impl From<Rectangle> for CropDirective {
    fn from(rect: Rectangle) -> Self {
        CropDirective::ExplicitRectangle(rect)
    }
}

impl From<Margins> for CropDirective {
    fn from(margins: Margins) -> Self {
        CropDirective::Margins(margins)
    }
}
