//! Current display state supplied by the host viewer.

use crate::geometry::{image_transform, AffineTransform, Point, Rectangle, TransformError};
use serde::{Deserialize, Serialize};

/// What is on screen right now: where the image is drawn, which part of it
/// is visible, and the transform from normalized image space to screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    scaler_rect: Rectangle,
    zoom_area: Rectangle,
    transform: AffineTransform,
}

impl ViewState {
    /// Create a view state from an explicit transform.
    pub fn new(scaler_rect: Rectangle, zoom_area: Rectangle, transform: AffineTransform) -> Self {
        Self {
            scaler_rect,
            zoom_area,
            transform,
        }
    }

    /// Create a view state, deriving the transform from zoom, rotation and mirroring.
    ///
    /// The zoom area is first moved inside the full image.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::EmptyZoomArea`] if the fitted zoom area has no extent.
    pub fn from_zoom(
        scaler_rect: Rectangle,
        zoom_area: Rectangle,
        rotation: f64,
        h_mirror: bool,
        v_mirror: bool,
    ) -> Result<Self, TransformError> {
        let zoom_area = Rectangle::FULL_AREA.fit(&zoom_area.normalized());
        let transform = image_transform(&scaler_rect, &zoom_area, rotation, h_mirror, v_mirror)?;
        Ok(Self::new(scaler_rect, zoom_area, transform))
    }

    /// Screen rectangle of the displayed image.
    pub fn scaler_rect(&self) -> &Rectangle {
        &self.scaler_rect
    }

    /// Visible window in normalized image space.
    pub fn zoom_area(&self) -> &Rectangle {
        &self.zoom_area
    }

    /// Forward transform from normalized image space to screen pixels.
    pub fn transform(&self) -> &AffineTransform {
        &self.transform
    }

    /// Map a screen point into normalized image space.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::Degenerate`] if the transform has no inverse.
    pub fn screen_to_image(&self, p: Point) -> Result<Point, TransformError> {
        self.transform.invert_apply_point(p)
    }

    /// Map a normalized image point onto the screen.
    pub fn image_to_screen(&self, p: Point) -> Point {
        self.transform.apply_point(p)
    }
}
