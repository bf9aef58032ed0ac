//! Anchor points for size-based cropping

use crate::geometry::Point;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// Reference point used to position a fixed-size crop window
///
/// Lenient parsing through [`Anchor::from_name`], [`Anchor::from_index`] or
/// serde never fails: an unrecognized value becomes [`Anchor::FALLBACK`]
/// (top-left) with a warning. Callers expecting a centered crop from a
/// misspelled anchor get a top-left crop instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", from = "String")]
pub enum Anchor {
    Center,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Anchor {
    /// All anchors, in index order
    pub const ALL: [Anchor; 5] = [
        Anchor::Center,
        Anchor::TopLeft,
        Anchor::TopRight,
        Anchor::BottomLeft,
        Anchor::BottomRight,
    ];

    /// Anchor used for any unrecognized name or index
    pub const FALLBACK: Anchor = Anchor::TopLeft;

    /// Parse an anchor from its index (0 = Center ... 4 = BottomRight)
    pub fn from_index(index: i32) -> Self {
        match usize::try_from(index).ok().and_then(|i| Self::ALL.get(i)) {
            Some(anchor) => *anchor,
            None => {
                warn!(index, fallback = %Self::FALLBACK, "unknown anchor index");
                Self::FALLBACK
            }
        }
    }

    /// Parse an anchor from its name
    ///
    /// Case-insensitive; words may be joined by `-`, `_`, a space or
    /// nothing ("top-left", "TopLeft", "top_left").
    pub fn from_name(name: &str) -> Self {
        let normalized: String = name
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "center" | "centre" => Anchor::Center,
            "topleft" => Anchor::TopLeft,
            "topright" => Anchor::TopRight,
            "bottomleft" => Anchor::BottomLeft,
            "bottomright" => Anchor::BottomRight,
            _ => {
                warn!(name, fallback = %Self::FALLBACK, "unknown anchor name");
                Self::FALLBACK
            }
        }
    }

    /// Index of this anchor in [`Anchor::ALL`]
    pub fn index(self) -> i32 {
        match self {
            Anchor::Center => 0,
            Anchor::TopLeft => 1,
            Anchor::TopRight => 2,
            Anchor::BottomLeft => 3,
            Anchor::BottomRight => 4,
        }
    }

    /// Kebab-case name, as used in JSON directives
    pub fn name(self) -> &'static str {
        match self {
            Anchor::Center => "center",
            Anchor::TopLeft => "top-left",
            Anchor::TopRight => "top-right",
            Anchor::BottomLeft => "bottom-left",
            Anchor::BottomRight => "bottom-right",
        }
    }

    /// Top-left offset of a `width` x `height` window inside a
    /// `src_width` x `src_height` area
    ///
    /// The window is expected to fit. Center uses truncating division, so
    /// an odd leftover pixel ends up on the right/bottom side.
    pub fn offset(self, src_width: i32, src_height: i32, width: i32, height: i32) -> Point {
        let spare_x = src_width - width;
        let spare_y = src_height - height;

        match self {
            Anchor::Center => Point::new(spare_x / 2, spare_y / 2),
            Anchor::TopLeft => Point::new(0, 0),
            Anchor::TopRight => Point::new(spare_x, 0),
            Anchor::BottomLeft => Point::new(0, spare_y),
            Anchor::BottomRight => Point::new(spare_x, spare_y),
        }
    }
}

impl From<String> for Anchor {
    fn from(name: String) -> Self {
        Anchor::from_name(&name)
    }
}

impl From<&str> for Anchor {
    fn from(name: &str) -> Self {
        Anchor::from_name(name)
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
