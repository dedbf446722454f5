//! Axis-aligned rectangles.
//!
//! A [`Rectangle`] is an anchor point plus a size. While a rectangle is being
//! dragged out the size may be negative; [`Rectangle::normalize`] moves the
//! anchor to the minimum corner and makes both extents non-negative.
//!
//! # Intersections
//!
//! [`Rectangle::intersect`] always returns a rectangle. When the operands do
//! not overlap the result has a zero width and/or height, so its area is never
//! positive. Use [`Rectangle::is_empty`] or [`Rectangle::intersection`] to
//! test for that case explicitly.

use super::parse_float;
use super::point::{Point, Size};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rectangle {
    /// The whole image in normalized image space.
    pub const FULL_AREA: Rectangle = Rectangle {
        x: 0.0,
        y: 0.0,
        width: 1.0,
        height: 1.0,
    };

    /// Create a new rectangle.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from string components, coercing unparseable values to 0.
    pub fn parse(x: &str, y: &str, width: &str, height: &str) -> Self {
        Self::new(
            parse_float(x),
            parse_float(y),
            parse_float(width),
            parse_float(height),
        )
    }

    /// Create a rectangle from an anchor point and a size.
    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    /// Create the normalized rectangle spanned by two corner points.
    ///
    /// The points may be given in any order.
    pub fn from_points(p1: Point, p2: Point) -> Self {
        let mut rect = Self::new(p1.x, p1.y, p2.x - p1.x, p2.y - p1.y);
        rect.normalize();
        rect
    }

    /// The anchor (first corner).
    pub fn pt1(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// The corner opposite the anchor.
    pub fn pt2(&self) -> Point {
        Point::new(self.x + self.width, self.y + self.height)
    }

    /// Move the anchor to `pos`, keeping the opposite corner in place.
    pub fn set_pt1(&mut self, pos: Point) -> &mut Self {
        let pt2 = self.pt2();
        self.x = pos.x;
        self.y = pos.y;
        self.width = pt2.x - pos.x;
        self.height = pt2.y - pos.y;
        self
    }

    /// Move the opposite corner to `pos`, keeping the anchor in place.
    pub fn set_pt2(&mut self, pos: Point) -> &mut Self {
        self.width = pos.x - self.x;
        self.height = pos.y - self.y;
        self
    }

    /// The center point.
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Move the rectangle so its center lies at `pos`, keeping its size.
    pub fn set_center(&mut self, pos: Point) -> &mut Self {
        self.x = pos.x - self.width / 2.0;
        self.y = pos.y - self.height / 2.0;
        self
    }

    /// The size of the rectangle.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Width times height. Negative if exactly one extent is negative.
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Returns true if the rectangle covers no positive area.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Eliminate negative width and height in place.
    ///
    /// The anchor becomes the minimum corner. Idempotent.
    pub fn normalize(&mut self) -> &mut Self {
        let pt2 = self.pt2();
        self.x = self.x.min(pt2.x);
        self.y = self.y.min(pt2.y);
        self.width = self.width.abs();
        self.height = self.height.abs();
        self
    }

    /// Return a normalized copy.
    pub fn normalized(&self) -> Self {
        let mut rect = *self;
        rect.normalize();
        rect
    }

    /// Returns true if `pos` lies inside the rectangle, boundaries included.
    pub fn contains_position(&self, pos: Point) -> bool {
        pos.x >= self.x
            && pos.y >= self.y
            && pos.x <= self.x + self.width
            && pos.y <= self.y + self.height
    }

    /// Returns true if both corners of `rect` lie inside this rectangle.
    pub fn contains_rect(&self, rect: &Rectangle) -> bool {
        self.contains_position(rect.pt1()) && self.contains_position(rect.pt2())
    }

    /// Clamp both corners into `bound` in place.
    ///
    /// If the rectangle lies entirely outside `bound` the result is degenerate
    /// (zero or negative extent); check [`is_empty`](Self::is_empty) before
    /// treating it as visible.
    pub fn clip_to(&mut self, bound: &Rectangle) -> &mut Self {
        let b1 = bound.pt1();
        let b2 = bound.pt2();
        let own2 = self.pt2();
        self.set_pt1(Point::new(self.x.max(b1.x), self.y.max(b1.y)));
        self.set_pt2(Point::new(own2.x.min(b2.x), own2.y.min(b2.y)));
        self
    }

    /// Return the overlap of this rectangle and `other`.
    ///
    /// Without overlap the returned rectangle has zero width and/or height,
    /// so its area is never positive.
    pub fn intersect(&self, other: &Rectangle) -> Rectangle {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = (self.x + self.width).min(other.x + other.width);
        let bottom = (self.y + self.height).min(other.y + other.height);
        Rectangle::new(left, top, (right - left).max(0.0), (bottom - top).max(0.0))
    }

    /// Return the overlap of this rectangle and `other`, or `None` if they do
    /// not overlap.
    pub fn intersection(&self, other: &Rectangle) -> Option<Rectangle> {
        let sec = self.intersect(other);
        (!sec.is_empty()).then_some(sec)
    }

    /// Returns true if the rectangles share a region of positive area.
    pub fn overlaps_rect(&self, other: &Rectangle) -> bool {
        self.intersect(other).area() > 0.0
    }

    /// Return a copy of `other` moved (never resized) to lie inside this
    /// rectangle as far as possible, then intersected with it.
    ///
    /// Used to keep a zoom window inside the full image.
    pub fn fit(&self, other: &Rectangle) -> Rectangle {
        let mut sec = *other;
        sec.x = sec.x.max(self.x);
        sec.y = sec.y.max(self.y);
        if sec.x + sec.width > self.x + self.width {
            sec.x = self.x + self.width - sec.width;
        }
        if sec.y + sec.height > self.y + self.height {
            sec.y = self.y + self.height - sec.height;
        }
        self.intersect(&sec)
    }

    /// Move this rectangle in place so it stays inside `bound`, keeping its size.
    ///
    /// A rectangle larger than `bound` ends up aligned with its far edge.
    pub fn stay_inside(&mut self, bound: &Rectangle) -> &mut Self {
        if self.x < bound.x {
            self.x = bound.x;
        }
        if self.y < bound.y {
            self.y = bound.y;
        }
        if self.x + self.width > bound.x + bound.width {
            self.x = bound.x + bound.width - self.width;
        }
        if self.y + self.height > bound.y + bound.height {
            self.y = bound.y + bound.height - self.height;
        }
        self
    }
}

impl fmt::Display for Rectangle {
    /// Legacy textual form `WxH@x,y`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.size(), self.pt1())
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
