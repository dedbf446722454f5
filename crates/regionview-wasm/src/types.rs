//! JavaScript-compatible data structures.
//!
//! These are passed to and from TypeScript as plain objects via
//! serde_wasm_bindgen. Missing fields take their defaults.

use regionview_core::{Rectangle, TransformError, ViewState};
use serde::{Deserialize, Serialize};

/// JavaScript-compatible rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct JsRect {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
}

impl From<JsRect> for Rectangle {
    fn from(js: JsRect) -> Self {
        Rectangle::new(js.x, js.y, js.width, js.height)
    }
}

impl From<Rectangle> for JsRect {
    fn from(rect: Rectangle) -> Self {
        JsRect {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
        }
    }
}

fn full_area() -> JsRect {
    Rectangle::FULL_AREA.into()
}

/// JavaScript-compatible view state.
///
/// `scaler_rect` is where the image is drawn in screen pixels, `zoom_area`
/// the visible part of the image in normalized coordinates. Rotation is in
/// degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JsViewState {
    pub scaler_rect: JsRect,
    #[serde(default = "full_area")]
    pub zoom_area: JsRect,
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub h_mirror: bool,
    #[serde(default)]
    pub v_mirror: bool,
}

impl TryFrom<JsViewState> for ViewState {
    type Error = TransformError;

    fn try_from(js: JsViewState) -> Result<Self, Self::Error> {
        ViewState::from_zoom(
            js.scaler_rect.into(),
            js.zoom_area.into(),
            js.rotation,
            js.h_mirror,
            js.v_mirror,
        )
    }
}
