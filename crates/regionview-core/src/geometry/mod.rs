//! Affine geometry primitives for mapping between image and screen space.
//!
//! This module provides the value types used throughout regionview:
//! - [`Point`] and [`Size`] - 2D positions and extents
//! - [`Rectangle`] - axis-aligned boxes with clip/intersect/fit operators
//! - [`AffineTransform`] - 2D affine maps with composition and inversion
//!
//! # Coordinate Systems
//!
//! - Normalized image space spans (0.0, 0.0) top-left to (1.0, 1.0)
//!   bottom-right, independent of zoom, rotation and mirroring
//! - Screen space is measured in pixels
//!
//! # Mutation Discipline
//!
//! All types are `Copy`. Rectangle methods named as verbs (`normalize`,
//! `clip_to`, `stay_inside`, ...) modify the receiver and return `&mut Self`
//! for chaining. Everything else returns a new value.

mod point;
mod rect;
mod transform;

pub use point::{Point, Size};
pub use rect::Rectangle;
pub use transform::{image_transform, AffineTransform, MirrorAxis, TransformError};

/// Parse a float permissively, returning 0.0 when the input is not a number.
///
/// Leading and trailing whitespace is ignored. Non-finite results (`NaN`,
/// `inf`) also collapse to 0.0 so they never reach geometry code.
///
/// ```text
/// " 0.25 " -> 0.25
/// "abc"    -> 0.0
/// ```
pub fn parse_float(value: &str) -> f64 {
    match value.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}
