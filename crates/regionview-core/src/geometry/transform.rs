//! 2D affine transforms.
//!
//! An [`AffineTransform`] holds six coefficients `(a, b, c, d, e, f)` for the map
//!
//! ```text
//! x' = a*x + b*y + c
//! y' = d*x + e*y + f
//! ```
//!
//! which is a 3x3 matrix with the fixed bottom row `(0, 0, 1)`.
//!
//! # Composition Order
//!
//! `t1.compose(&t2)` is the matrix product `t2 * t1`: the result applies `t1`
//! first, then `t2`. Chains read left to right in application order:
//!
//! ```text
//! translation(..).compose(&scale(..)).compose(&rotation(..))
//! ```
//!
//! translates, then scales, then rotates.

use super::point::{Point, Size};
use super::rect::Rectangle;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for transform operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformError {
    /// The linear part has a zero determinant, so there is no inverse.
    #[error("Degenerate transform: determinant is zero")]
    Degenerate,

    /// A view transform was requested for a zoom area without extent.
    #[error("Zoom area has no extent: {0}")]
    EmptyZoomArea(Rectangle),
}

/// Axis flipped by [`AffineTransform::mirror`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MirrorAxis {
    /// Flip horizontally (negate x).
    X,
    /// Flip vertically (negate y).
    Y,
}

/// A 2D affine map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffineTransform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl AffineTransform {
    /// The identity transform.
    pub const IDENTITY: AffineTransform = AffineTransform {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 0.0,
        e: 1.0,
        f: 0.0,
    };

    /// Create a transform from its six coefficients.
    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    /// Rotation by `angle_degrees` around `pivot`.
    ///
    /// An angle of exactly 0 returns [`IDENTITY`](Self::IDENTITY) without
    /// touching any trigonometry.
    pub fn rotation(angle_degrees: f64, pivot: Point) -> Self {
        if angle_degrees == 0.0 {
            return Self::IDENTITY;
        }
        let (sin, cos) = angle_degrees.to_radians().sin_cos();
        Self {
            a: cos,
            b: -sin,
            c: pivot.x - pivot.x * cos + pivot.y * sin,
            d: sin,
            e: cos,
            f: pivot.y - pivot.x * sin - pivot.y * cos,
        }
    }

    /// Translation by `offset`.
    pub fn translation(offset: Point) -> Self {
        Self {
            c: offset.x,
            f: offset.y,
            ..Self::IDENTITY
        }
    }

    /// Scale by `factors` along each axis.
    pub fn scale(factors: Size) -> Self {
        Self {
            a: factors.width,
            e: factors.height,
            ..Self::IDENTITY
        }
    }

    /// Reflection across the origin along `axis`.
    pub fn mirror(axis: MirrorAxis) -> Self {
        match axis {
            MirrorAxis::X => Self {
                a: -1.0,
                ..Self::IDENTITY
            },
            MirrorAxis::Y => Self {
                e: -1.0,
                ..Self::IDENTITY
            },
        }
    }

    /// Returns a transform that applies `self` first, then `other`.
    pub fn compose(&self, other: &AffineTransform) -> AffineTransform {
        AffineTransform {
            a: other.a * self.a + other.b * self.d,
            b: other.a * self.b + other.b * self.e,
            c: other.a * self.c + other.b * self.f + other.c,
            d: other.d * self.a + other.e * self.d,
            e: other.d * self.b + other.e * self.e,
            f: other.d * self.c + other.e * self.f + other.f,
        }
    }

    /// Determinant of the linear part.
    #[inline]
    pub fn determinant(&self) -> f64 {
        self.a * self.e - self.b * self.d
    }

    /// Map a point forward.
    pub fn apply_point(&self, p: Point) -> Point {
        Point::new(
            self.a * p.x + self.b * p.y + self.c,
            self.d * p.x + self.e * p.y + self.f,
        )
    }

    /// Map a rectangle forward.
    ///
    /// The origin goes through the full map; the size only through the
    /// linear part, so translation never changes it. With rotation or
    /// mirroring the result may have negative extents.
    pub fn apply_rect(&self, r: &Rectangle) -> Rectangle {
        let origin = self.apply_point(r.pt1());
        Rectangle::new(
            origin.x,
            origin.y,
            self.a * r.width + self.b * r.height,
            self.d * r.width + self.e * r.height,
        )
    }

    /// Map a point through the inverse transform.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::Degenerate`] if the determinant is zero.
    pub fn invert_apply_point(&self, p: Point) -> Result<Point, TransformError> {
        let det = self.checked_determinant()?;
        let dx = p.x - self.c;
        let dy = p.y - self.f;
        Ok(Point::new(
            (self.e * dx - self.b * dy) / det,
            (-self.d * dx + self.a * dy) / det,
        ))
    }

    /// Map a rectangle through the inverse transform.
    ///
    /// Mirrors [`apply_rect`](Self::apply_rect): the origin goes through the
    /// full inverse, the size through the inverse linear part.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::Degenerate`] if the determinant is zero.
    pub fn invert_apply_rect(&self, r: &Rectangle) -> Result<Rectangle, TransformError> {
        let det = self.checked_determinant()?;
        let origin = self.invert_apply_point(r.pt1())?;
        Ok(Rectangle::new(
            origin.x,
            origin.y,
            (self.e * r.width - self.b * r.height) / det,
            (-self.d * r.width + self.a * r.height) / det,
        ))
    }

    /// Return the inverse transform.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::Degenerate`] if the determinant is zero.
    pub fn inverse(&self) -> Result<AffineTransform, TransformError> {
        let det = self.checked_determinant()?;
        let a = self.e / det;
        let b = -self.b / det;
        let d = -self.d / det;
        let e = self.a / det;
        Ok(AffineTransform {
            a,
            b,
            c: -(a * self.c + b * self.f),
            d,
            e,
            f: -(d * self.c + e * self.f),
        })
    }

    fn checked_determinant(&self) -> Result<f64, TransformError> {
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() {
            return Err(TransformError::Degenerate);
        }
        Ok(det)
    }
}

/// Build the forward transform from normalized image space to screen pixels.
///
/// The zoom area is stretched over the scaler rectangle. Rotation and
/// mirroring happen around the center of the zoom area:
///
/// 1. Translate the zoom area origin to (0, 0)
/// 2. Scale the zoom area to (1, 1)
/// 3. If rotated or mirrored: move (0.5, 0.5) to the origin, mirror x,
///    mirror y, rotate by `-rotation`, move back
/// 4. Scale to the scaler size
/// 5. Translate to the scaler position
///
/// # Arguments
///
/// * `scaler_rect` - Screen rectangle of the displayed image
/// * `zoom_area` - Visible window in normalized image space
/// * `rotation` - Angle in degrees (positive = counter-clockwise on screen)
/// * `h_mirror` - Flip horizontally
/// * `v_mirror` - Flip vertically
///
/// # Errors
///
/// Returns [`TransformError::EmptyZoomArea`] if the zoom area has no extent.
pub fn image_transform(
    scaler_rect: &Rectangle,
    zoom_area: &Rectangle,
    rotation: f64,
    h_mirror: bool,
    v_mirror: bool,
) -> Result<AffineTransform, TransformError> {
    if zoom_area.is_empty() {
        return Err(TransformError::EmptyZoomArea(*zoom_area));
    }

    let mut trafo = AffineTransform::translation(Point::new(-zoom_area.x, -zoom_area.y))
        .compose(&AffineTransform::scale(Size::new(
            1.0 / zoom_area.width,
            1.0 / zoom_area.height,
        )));

    if rotation != 0.0 || h_mirror || v_mirror {
        trafo = trafo.compose(&AffineTransform::translation(Point::new(-0.5, -0.5)));
        if h_mirror {
            trafo = trafo.compose(&AffineTransform::mirror(MirrorAxis::X));
        }
        if v_mirror {
            trafo = trafo.compose(&AffineTransform::mirror(MirrorAxis::Y));
        }
        trafo = trafo
            .compose(&AffineTransform::rotation(-rotation, Point::default()))
            .compose(&AffineTransform::translation(Point::new(0.5, 0.5)));
    }

    Ok(trafo
        .compose(&AffineTransform::scale(scaler_rect.size()))
        .compose(&AffineTransform::translation(scaler_rect.pt1())))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn assert_point_near(actual: Point, expected: Point) {
        assert!(
            (actual.x - expected.x).abs() < TOLERANCE && (actual.y - expected.y).abs() < TOLERANCE,
            "expected {:?}, got {:?}",
            expected,
            actual
        );
    }

    #[test]
    fn test_identity_leaves_points_unchanged() {
        let p = Point::new(3.5, -2.0);
        assert_eq!(AffineTransform::IDENTITY.apply_point(p), p);
        assert_eq!(AffineTransform::default(), AffineTransform::IDENTITY);
    }

    #[test]
    fn test_identity_is_neutral_for_compose() {
        let t = AffineTransform::new(2.0, 0.5, 3.0, -1.0, 4.0, 7.0);
        assert_eq!(t.compose(&AffineTransform::IDENTITY), t);
        assert_eq!(AffineTransform::IDENTITY.compose(&t), t);
    }

    #[test]
    fn test_compose_applies_receiver_first() {
        let translate = AffineTransform::translation(Point::new(1.0, 0.0));
        let scale = AffineTransform::scale(Size::new(2.0, 2.0));

        // Translate then scale: (0,0) -> (1,0) -> (2,0)
        let t = translate.compose(&scale);
        assert_eq!(t.apply_point(Point::new(0.0, 0.0)), Point::new(2.0, 0.0));

        // Scale then translate: (0,0) -> (0,0) -> (1,0)
        let t = scale.compose(&translate);
        assert_eq!(t.apply_point(Point::new(0.0, 0.0)), Point::new(1.0, 0.0));
    }

    #[test]
    fn test_rotation_zero_is_exact_identity() {
        let t = AffineTransform::rotation(0.0, Point::new(123.4, -56.7));
        assert_eq!(t, AffineTransform::IDENTITY);
    }

    #[test]
    fn test_rotation_90_degrees() {
        let t = AffineTransform::rotation(90.0, Point::default());
        assert_point_near(t.apply_point(Point::new(1.0, 0.0)), Point::new(0.0, 1.0));
    }

    #[test]
    fn test_rotation_keeps_pivot_fixed() {
        let pivot = Point::new(0.5, 0.5);
        let t = AffineTransform::rotation(37.0, pivot);
        assert_point_near(t.apply_point(pivot), pivot);
    }

    #[test]
    fn test_mirror() {
        let p = Point::new(2.0, 3.0);
        assert_eq!(AffineTransform::mirror(MirrorAxis::X).apply_point(p), Point::new(-2.0, 3.0));
        assert_eq!(AffineTransform::mirror(MirrorAxis::Y).apply_point(p), Point::new(2.0, -3.0));
    }

    #[test]
    fn test_apply_rect_excludes_translation_from_size() {
        let t = AffineTransform::translation(Point::new(10.0, 20.0))
            .compose(&AffineTransform::scale(Size::new(2.0, 3.0)));
        let r = t.apply_rect(&Rectangle::new(1.0, 1.0, 4.0, 5.0));
        assert_eq!(r, Rectangle::new(22.0, 63.0, 8.0, 15.0));
    }

    #[test]
    fn test_invert_apply_point() {
        let t = AffineTransform::scale(Size::new(2.0, 4.0))
            .compose(&AffineTransform::translation(Point::new(10.0, 10.0)));
        let p = t.invert_apply_point(Point::new(14.0, 18.0)).unwrap();
        assert_eq!(p, Point::new(2.0, 2.0));
    }

    #[test]
    fn test_invert_apply_degenerate() {
        let t = AffineTransform::scale(Size::new(0.0, 1.0));
        assert_eq!(
            t.invert_apply_point(Point::new(1.0, 1.0)),
            Err(TransformError::Degenerate)
        );
        assert!(t.inverse().is_err());
        assert!(t.invert_apply_rect(&Rectangle::FULL_AREA).is_err());
    }

    #[test]
    fn test_invert_apply_rect_undoes_apply_rect() {
        let t = AffineTransform::scale(Size::new(400.0, 300.0))
            .compose(&AffineTransform::translation(Point::new(100.0, 50.0)));
        let r = Rectangle::new(0.25, 0.5, 0.5, 0.25);
        let back = t.invert_apply_rect(&t.apply_rect(&r)).unwrap();
        assert_eq!(back, r);
    }

    #[test]
    fn test_inverse_composes_to_identity() {
        let t = AffineTransform::rotation(30.0, Point::new(1.0, 2.0))
            .compose(&AffineTransform::scale(Size::new(3.0, 0.5)));
        let round = t.compose(&t.inverse().unwrap());
        let p = Point::new(7.0, -3.0);
        assert_point_near(round.apply_point(p), p);
    }

    #[test]
    fn test_image_transform_full_area() {
        let scaler = Rectangle::new(100.0, 50.0, 400.0, 300.0);
        let t = image_transform(&scaler, &Rectangle::FULL_AREA, 0.0, false, false).unwrap();
        assert_eq!(t.apply_point(Point::new(0.0, 0.0)), Point::new(100.0, 50.0));
        assert_eq!(t.apply_point(Point::new(1.0, 1.0)), Point::new(500.0, 350.0));
        assert_eq!(t.apply_rect(&Rectangle::FULL_AREA), scaler);
    }

    #[test]
    fn test_image_transform_zoomed() {
        let scaler = Rectangle::new(100.0, 50.0, 400.0, 300.0);
        let zoom = Rectangle::new(0.5, 0.5, 0.5, 0.5);
        let t = image_transform(&scaler, &zoom, 0.0, false, false).unwrap();
        assert_eq!(t.apply_point(Point::new(0.5, 0.5)), Point::new(100.0, 50.0));
        assert_eq!(t.apply_point(Point::new(1.0, 1.0)), Point::new(500.0, 350.0));
    }

    #[test]
    fn test_image_transform_mirror() {
        let scaler = Rectangle::new(0.0, 0.0, 200.0, 100.0);
        let t = image_transform(&scaler, &Rectangle::FULL_AREA, 0.0, true, false).unwrap();
        assert_point_near(t.apply_point(Point::new(0.0, 0.0)), Point::new(200.0, 0.0));

        let t = image_transform(&scaler, &Rectangle::FULL_AREA, 0.0, false, true).unwrap();
        assert_point_near(t.apply_point(Point::new(0.0, 0.0)), Point::new(0.0, 100.0));
    }

    #[test]
    fn test_image_transform_rotation_counter_clockwise() {
        let scaler = Rectangle::new(0.0, 0.0, 100.0, 100.0);
        let t = image_transform(&scaler, &Rectangle::FULL_AREA, 90.0, false, false).unwrap();
        // Image top-left ends up at screen bottom-left
        assert_point_near(t.apply_point(Point::new(0.0, 0.0)), Point::new(0.0, 100.0));
        // Image center stays at screen center
        assert_point_near(t.apply_point(Point::new(0.5, 0.5)), Point::new(50.0, 50.0));
    }

    #[test]
    fn test_image_transform_combined_round_trip() {
        let scaler = Rectangle::new(20.0, 10.0, 640.0, 480.0);
        let zoom = Rectangle::new(0.25, 0.1, 0.5, 0.6);
        let t = image_transform(&scaler, &zoom, 30.0, true, false).unwrap();

        // Zoom center maps to the scaler center regardless of rotation and mirror
        assert_point_near(t.apply_point(zoom.center()), scaler.center());

        let p = Point::new(0.4, 0.3);
        assert_point_near(t.invert_apply_point(t.apply_point(p)).unwrap(), p);
    }

    #[test]
    fn test_image_transform_empty_zoom() {
        let scaler = Rectangle::new(0.0, 0.0, 100.0, 100.0);
        let zoom = Rectangle::new(0.5, 0.5, 0.0, 0.5);
        assert_eq!(
            image_transform(&scaler, &zoom, 0.0, false, false),
            Err(TransformError::EmptyZoomArea(zoom))
        );
    }

    #[test]
    fn test_transform_error_display() {
        assert_eq!(
            TransformError::Degenerate.to_string(),
            "Degenerate transform: determinant is zero"
        );
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
