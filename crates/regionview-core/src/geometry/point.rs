//! Point and size value types.

use super::parse_float;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in either image or screen space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Create a point from string coordinates, coercing unparseable values to 0.
    pub fn parse(x: &str, y: &str) -> Self {
        Self::new(parse_float(x), parse_float(y))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// A 2D extent.
///
/// Width and height may be negative while a rectangle is being dragged out;
/// normalize the owning rectangle before relying on area or containment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Create a new size.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Create a size from string extents, coercing unparseable values to 0.
    pub fn parse(width: &str, height: &str) -> Self {
        Self::new(parse_float(width), parse_float(height))
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
