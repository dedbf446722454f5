//! Region viewer WASM bindings.
//!
//! [`JsRegionViewer`] wraps a [`RegionController`] together with the latest
//! view state pushed by the host. The host forwards pointer events in screen
//! pixels and draws the rectangles returned by `render`.

use crate::types::{JsRect, JsViewState};
use regionview_core::region::codec::{markup_coords, svg_coords};
use regionview_core::{
    GestureOutcome, MarkupRegion, Point, QueryParams, RegionController, RegionError,
    RegionHandle, RegionSettings, RegionView, Removal, TransformError, ViewState,
};
use serde::Serialize;
use thiserror::Error;
use wasm_bindgen::prelude::*;

/// Error types for viewer operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ViewerError {
    /// An operation needed the view state before the host supplied one.
    #[error("No view state set, call set_view first")]
    NoView,

    #[error(transparent)]
    Region(#[from] RegionError),

    #[error(transparent)]
    Transform(#[from] TransformError),
}

/// Result of `remove_region` as seen from JavaScript.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct JsRemoval {
    /// Whether a region was removed.
    pub removed: bool,
    /// Handle of the removed region's element, for the host to destroy.
    pub handle: Option<u32>,
}

impl From<Removal> for JsRemoval {
    fn from(removal: Removal) -> Self {
        match removal {
            Removal::Removed(region) => JsRemoval {
                removed: true,
                handle: region.handle().map(|h| h.0),
            },
            Removal::Empty => JsRemoval {
                removed: false,
                handle: None,
            },
        }
    }
}

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(to_js_error)
}

/// Regions of interest for one displayed image.
///
/// # Example (TypeScript)
/// ```typescript
/// const viewer = new JsRegionViewer(location.search);
/// viewer.set_view({
///   scaler_rect: { x: 0, y: 0, width: 800, height: 600 },
///   zoom_area: { x: 0, y: 0, width: 1, height: 1 },
///   rotation: 0,
/// });
///
/// viewer.begin_region(10, 10);
/// const outcome = viewer.end_region(50, 40);
/// if (outcome.kind === 'committed') {
///   history.replaceState(null, '', '?' + viewer.update_query(location.search));
/// }
/// ```
#[wasm_bindgen]
pub struct JsRegionViewer {
    controller: RegionController,
    view: Option<ViewState>,
}

#[wasm_bindgen]
impl JsRegionViewer {
    /// Create a viewer, loading regions from the `rg` parameter of `query`.
    #[wasm_bindgen(constructor)]
    pub fn new(query: &str) -> JsRegionViewer {
        Self::from_query(query)
    }

    /// Create a viewer from a settings object.
    pub fn with_settings(settings: JsValue) -> Result<JsRegionViewer, JsValue> {
        let settings: RegionSettings = serde_wasm_bindgen::from_value(settings)
            .map_err(|e| JsValue::from_str(&format!("Invalid region settings: {}", e)))?;
        Ok(Self::from_settings(settings))
    }

    /// Supply the current view state (JsViewState structure).
    pub fn set_view(&mut self, view: JsValue) -> Result<(), JsValue> {
        let view: JsViewState = serde_wasm_bindgen::from_value(view)
            .map_err(|e| JsValue::from_str(&format!("Invalid view state: {}", e)))?;
        self.apply_view(view).map_err(to_js_error)
    }

    /// Start defining a region at a screen position.
    pub fn begin_region(&mut self, x: f64, y: f64) -> Result<(), JsValue> {
        self.begin(Point::new(x, y)).map_err(to_js_error)
    }

    /// Provisional screen rectangle for the pointer at a screen position.
    pub fn update_region(&self, x: f64, y: f64) -> Result<JsValue, JsValue> {
        let rect = self
            .controller
            .update_region(Point::new(x, y))
            .map_err(to_js_error)?;
        to_js(&JsRect::from(rect))
    }

    /// Finish defining a region at a screen position.
    ///
    /// Returns `{ kind: "committed", number, rect }`, `{ kind: "click" }` or
    /// `{ kind: "outside" }`.
    pub fn end_region(&mut self, x: f64, y: f64) -> Result<JsValue, JsValue> {
        let outcome = self.end(Point::new(x, y)).map_err(to_js_error)?;
        to_js(&outcome)
    }

    /// Abort the region being defined.
    pub fn cancel_region(&mut self) -> bool {
        self.controller.cancel_region()
    }

    /// Remove the most recent region, returning a JsRemoval object.
    pub fn remove_region(&mut self) -> Result<JsValue, JsValue> {
        to_js(&JsRemoval::from(self.controller.remove_region()))
    }

    /// Switch region display on or off, returning the new state.
    pub fn toggle_visibility(&mut self) -> bool {
        self.controller.toggle_visibility()
    }

    #[wasm_bindgen(getter)]
    pub fn is_region_visible(&self) -> bool {
        self.controller.settings().is_region_visible
    }

    #[wasm_bindgen(getter)]
    pub fn show_region_numbers(&self) -> bool {
        self.controller.settings().show_region_numbers
    }

    #[wasm_bindgen(getter)]
    pub fn auto_region_links(&self) -> bool {
        self.controller.settings().auto_region_links
    }

    #[wasm_bindgen(getter)]
    pub fn region_count(&self) -> usize {
        self.controller.regions().len()
    }

    /// Screen placement of every region for the current view.
    ///
    /// Returns an array of `{ number, handle, screen_rect }` in region order;
    /// `screen_rect` is null for hidden regions.
    pub fn render(&self) -> Result<js_sys::Array, JsValue> {
        let views = self.views().map_err(to_js_error)?;
        let array = js_sys::Array::new();
        for view in &views {
            array.push(&to_js(view)?);
        }
        Ok(array)
    }

    /// Attach a host element handle to region `number` (1-based).
    pub fn attach_handle(&mut self, number: usize, handle: u32) -> Option<u32> {
        self.controller
            .attach_handle(number, RegionHandle(handle))
            .map(|h| h.0)
    }

    /// Detach the host element handle from region `number` (1-based).
    pub fn detach_handle(&mut self, number: usize) -> Option<u32> {
        self.controller.detach_handle(number).map(|h| h.0)
    }

    /// Zoom area showing region `number`, or null if there is no such region.
    pub fn zoom_area_for(&self, number: usize) -> Result<JsValue, JsValue> {
        to_js(&self.controller.zoom_area_for(number).map(JsRect::from))
    }

    /// Append regions from markup, an array of `{ coords, attributes }`.
    pub fn load_markup(&mut self, markup: JsValue) -> Result<usize, JsValue> {
        let markup: Vec<MarkupRegion> = serde_wasm_bindgen::from_value(markup)
            .map_err(|e| JsValue::from_str(&format!("Invalid region markup: {}", e)))?;
        Ok(self.controller.load_markup(markup))
    }

    /// Markup attributes of region `number`.
    pub fn region_attributes(&self, number: usize) -> Result<JsValue, JsValue> {
        to_js(&self.controller.regions().get(number).map(|r| r.attributes()))
    }

    /// Coordinates of region `number` in markup form `x,y,width,height`.
    pub fn markup_coords(&self, number: usize) -> Option<String> {
        self.controller
            .regions()
            .get(number)
            .map(|r| markup_coords(r.rect()))
    }

    /// Coordinates of region `number` in SVG form `x y width height`.
    pub fn svg_coords(&self, number: usize) -> Option<String> {
        self.controller
            .regions()
            .get(number)
            .map(|r| svg_coords(r.rect()))
    }

    /// Coordinates of region `number` in the legacy form `WxH@x,y`.
    pub fn digilib_coords(&self, number: usize) -> Option<String> {
        self.controller
            .regions()
            .get(number)
            .map(|r| r.rect().to_string())
    }

    /// The encoded region parameter, or undefined if nothing is persisted.
    pub fn persisted_param(&self) -> Option<String> {
        self.controller.persisted_param()
    }

    /// Rewrite `query` with the current region parameter.
    pub fn update_query(&self, query: &str) -> String {
        let mut params = QueryParams::parse(query);
        self.controller.settings().write_query(&mut params);
        params.to_string()
    }
}

impl JsRegionViewer {
    /// Create a viewer from a query string.
    pub fn from_query(query: &str) -> Self {
        Self::from_settings(RegionSettings::from_query(&QueryParams::parse(query)))
    }

    /// Create a viewer from settings.
    pub fn from_settings(settings: RegionSettings) -> Self {
        Self {
            controller: RegionController::from_settings(settings),
            view: None,
        }
    }

    /// The wrapped controller.
    pub fn controller(&self) -> &RegionController {
        &self.controller
    }

    fn apply_view(&mut self, view: JsViewState) -> Result<(), ViewerError> {
        self.view = Some(ViewState::try_from(view)?);
        Ok(())
    }

    fn current_view(&self) -> Result<&ViewState, ViewerError> {
        self.view.as_ref().ok_or(ViewerError::NoView)
    }

    fn begin(&mut self, start: Point) -> Result<(), ViewerError> {
        let view = *self.current_view()?;
        self.controller.begin_region(start, &view)?;
        Ok(())
    }

    fn end(&mut self, pos: Point) -> Result<GestureOutcome, ViewerError> {
        let view = match self.current_view() {
            Ok(view) => *view,
            Err(e) => {
                self.controller.cancel_region();
                return Err(e);
            }
        };
        Ok(self.controller.end_region(pos, &view)?)
    }

    fn views(&self) -> Result<Vec<RegionView>, ViewerError> {
        Ok(self.controller.render(self.current_view()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regionview_core::Rectangle;

    fn view_state(width: f64, height: f64) -> JsViewState {
        JsViewState {
            scaler_rect: JsRect {
                width,
                height,
                ..Default::default()
            },
            zoom_area: Rectangle::FULL_AREA.into(),
            rotation: 0.0,
            h_mirror: false,
            v_mirror: false,
        }
    }

    #[test]
    fn test_from_query_loads_regions() {
        let viewer = JsRegionViewer::from_query("?fn=page1&rg=0.1/0.2/0.3/0.4,0.5/0.1/0.2/0.2");
        assert_eq!(viewer.region_count(), 2);
        assert!(viewer.is_region_visible());
        assert_eq!(viewer.markup_coords(1).as_deref(), Some("0.1,0.2,0.3,0.4"));
        assert_eq!(viewer.svg_coords(2).as_deref(), Some("0.5 0.1 0.2 0.2"));
        assert_eq!(viewer.markup_coords(3), None);
    }

    #[test]
    fn test_from_query_malformed_is_empty() {
        let viewer = JsRegionViewer::from_query("rg=0.1/0.2");
        assert_eq!(viewer.region_count(), 0);
        assert_eq!(viewer.persisted_param(), None);
    }

    #[test]
    fn test_update_query_drops_malformed_regions() {
        let viewer = JsRegionViewer::from_query("fn=p&rg=0.1/0.2");
        assert_eq!(viewer.update_query("fn=p&rg=0.1/0.2"), "fn=p");
    }

    #[test]
    fn test_digilib_coords() {
        let viewer = JsRegionViewer::from_query("rg=0.1/0.2/0.3/0.4");
        assert_eq!(viewer.digilib_coords(1).as_deref(), Some("0.3x0.4@0.1,0.2"));
        assert_eq!(viewer.digilib_coords(2), None);
    }

    #[test]
    fn test_gesture_requires_view() {
        let mut viewer = JsRegionViewer::from_query("");
        assert_eq!(viewer.begin(Point::new(1.0, 1.0)), Err(ViewerError::NoView));
        assert_eq!(viewer.views(), Err(ViewerError::NoView));
    }

    #[test]
    fn test_gesture_commits_and_updates_query() {
        let mut viewer = JsRegionViewer::from_query("fn=page1&pn=2");
        viewer.apply_view(view_state(400.0, 300.0)).unwrap();

        viewer.begin(Point::new(0.0, 0.0)).unwrap();
        let outcome = viewer.end(Point::new(200.0, 150.0)).unwrap();
        assert!(matches!(outcome, GestureOutcome::Committed { number: 1, .. }));
        assert_eq!(viewer.update_query("fn=page1&pn=2"), "fn=page1&pn=2&rg=0/0/0.5/0.5");

        let views = viewer.views().unwrap();
        assert_eq!(views.len(), 1);
        assert_eq!(
            views[0].screen_rect,
            Some(Rectangle::new(0.0, 0.0, 200.0, 150.0))
        );
    }

    #[test]
    fn test_remove_region_reports_handle() {
        let mut viewer = JsRegionViewer::from_query("rg=0.1/0.1/0.1/0.1");
        assert_eq!(viewer.attach_handle(1, 42), None);
        let removal = JsRemoval::from(viewer.controller.remove_region());
        assert_eq!(
            removal,
            JsRemoval {
                removed: true,
                handle: Some(42)
            }
        );
        assert_eq!(viewer.update_query("rg=0.1/0.1/0.1/0.1&pn=1"), "pn=1");

        let removal = JsRemoval::from(viewer.controller.remove_region());
        assert!(!removal.removed);
    }

    #[test]
    fn test_invalid_view_keeps_previous() {
        let mut viewer = JsRegionViewer::from_query("");
        viewer.apply_view(view_state(400.0, 300.0)).unwrap();
        let mut bad = view_state(400.0, 300.0);
        bad.zoom_area = JsRect::default();
        assert!(matches!(
            viewer.apply_view(bad),
            Err(ViewerError::Transform(_))
        ));
        assert!(viewer.current_view().is_ok());
    }

    #[test]
    fn test_hidden_regions_block_gesture() {
        let mut viewer = JsRegionViewer::from_query("");
        viewer.apply_view(view_state(400.0, 300.0)).unwrap();
        assert!(!viewer.toggle_visibility());
        assert_eq!(
            viewer.begin(Point::new(1.0, 1.0)),
            Err(ViewerError::Region(RegionError::RegionsHidden))
        );
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn js_view() -> JsValue {
        let view = JsViewState {
            scaler_rect: JsRect {
                x: 0.0,
                y: 0.0,
                width: 400.0,
                height: 300.0,
            },
            zoom_area: JsRect {
                x: 0.0,
                y: 0.0,
                width: 1.0,
                height: 1.0,
            },
            rotation: 0.0,
            h_mirror: false,
            v_mirror: false,
        };
        serde_wasm_bindgen::to_value(&view).unwrap()
    }

    #[wasm_bindgen_test]
    fn test_set_view_and_render() {
        let mut viewer = JsRegionViewer::new("rg=0.25/0.5/0.5/0.25");
        viewer.set_view(js_view()).unwrap();
        let array = viewer.render().unwrap();
        assert_eq!(array.length(), 1);
    }

    #[wasm_bindgen_test]
    fn test_set_view_rejects_garbage() {
        let mut viewer = JsRegionViewer::new("");
        let invalid = serde_wasm_bindgen::to_value(&"not a view").unwrap();
        assert!(viewer.set_view(invalid).is_err());
    }

    #[wasm_bindgen_test]
    fn test_click_does_not_commit() {
        let mut viewer = JsRegionViewer::new("");
        viewer.set_view(js_view()).unwrap();
        viewer.begin_region(10.0, 10.0).unwrap();
        viewer.end_region(12.0, 11.0).unwrap();
        assert_eq!(viewer.region_count(), 0);
    }

    #[wasm_bindgen_test]
    fn test_end_without_begin_is_error() {
        let mut viewer = JsRegionViewer::new("");
        viewer.set_view(js_view()).unwrap();
        assert!(viewer.end_region(10.0, 10.0).is_err());
    }
}
