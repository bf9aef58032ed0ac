//! Integer rectangle arithmetic

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

/// A pixel coordinate
///
/// Arithmetic on points saturates at the `i32` range instead of wrapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Create a new point
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, other: Point) -> Point {
        Point::new(self.x.saturating_add(other.x), self.y.saturating_add(other.y))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// An axis-aligned rectangle
///
/// `min` is inclusive and `max` is exclusive, so a rectangle with
/// `min == max` on either axis covers no pixels. Corners are stored as
/// given: a rectangle with `min.x > max.x` is not reordered, it is simply
/// empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rectangle {
    pub min: Point,
    pub max: Point,
}

impl Rectangle {
    /// Create a rectangle from its corner coordinates
    ///
    /// # Arguments
    /// * `x0`, `y0` - Top-left corner (inclusive)
    /// * `x1`, `y1` - Bottom-right corner (exclusive)
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            min: Point::new(x0, y0),
            max: Point::new(x1, y1),
        }
    }

    /// Create a rectangle at `origin` spanning `width` x `height`
    ///
    /// The far corner saturates at `i32::MAX`, so a rectangle placed near
    /// the end of the coordinate space comes out narrower than requested.
    pub const fn from_size(origin: Point, width: i32, height: i32) -> Self {
        Self {
            min: origin,
            max: Point::new(origin.x.saturating_add(width), origin.y.saturating_add(height)),
        }
    }

    /// Width, or 0 when the corners are inverted
    pub fn dx(&self) -> i32 {
        self.max.x.saturating_sub(self.min.x).max(0)
    }

    /// Height, or 0 when the corners are inverted
    pub fn dy(&self) -> i32 {
        self.max.y.saturating_sub(self.min.y).max(0)
    }

    /// (width, height)
    pub fn size(&self) -> (i32, i32) {
        (self.dx(), self.dy())
    }

    /// True if the rectangle covers no pixels
    pub fn is_empty(&self) -> bool {
        self.dx() == 0 || self.dy() == 0
    }

    /// True if `other` lies entirely within this rectangle
    ///
    /// Empty rectangles are contained as long as their corners are.
    pub fn contains(&self, other: &Rectangle) -> bool {
        self.min.x <= other.min.x
            && self.min.y <= other.min.y
            && other.max.x <= self.max.x
            && other.max.y <= self.max.y
    }

    /// Shift the rectangle by `offset`
    pub fn translate(&self, offset: Point) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Clamp every edge independently into `bounds`
    ///
    /// Each coordinate is moved to the nearest edge of `bounds` when it
    /// falls outside. If that leaves a max below its min, the max is raised
    /// to the min, so the result is always contained in `bounds` and has
    /// `min <= max` on both axes.
    pub fn clamp_to(&self, bounds: &Rectangle) -> Self {
        let min_x = self.min.x.clamp(bounds.min.x, bounds.max.x.max(bounds.min.x));
        let min_y = self.min.y.clamp(bounds.min.y, bounds.max.y.max(bounds.min.y));
        let max_x = self.max.x.clamp(min_x, bounds.max.x.max(min_x));
        let max_y = self.max.y.clamp(min_y, bounds.max.y.max(min_y));

        Self::new(min_x, min_y, max_x, max_y)
    }
}

impl fmt::Display for Rectangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}
