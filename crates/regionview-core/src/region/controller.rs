//! Gesture-driven region creation, removal and rendering.
//!
//! # Gesture States
//!
//! ```text
//! Idle --begin--> Sizing --end--> Idle (region committed, click or outside)
//!                   |
//!                   +--cancel--> Idle
//! ```
//!
//! While sizing, the provisional rectangle lives in screen space and is
//! clipped to the scaler rectangle captured when the gesture began. On
//! release the rectangle is mapped into image space and appended. Appending
//! is the only terminal action of a gesture, so an aborted or failed gesture
//! never leaves a partial region behind.

use super::codec::{decode_regions, encode_regions, parse_markup_coords};
use super::{Region, RegionAttributes, RegionError, RegionHandle, RegionList, Removal};
use crate::geometry::{Point, Rectangle};
use crate::settings::RegionSettings;
use crate::view::ViewState;
use serde::{Deserialize, Serialize};

/// Releases spanning at most this many square pixels count as plain clicks.
pub const CLICK_AREA_THRESHOLD: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq)]
enum GestureState {
    Idle,
    Sizing { start: Point, scaler_rect: Rectangle },
}

/// How a finished gesture ended.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GestureOutcome {
    /// A region was appended.
    Committed {
        /// 1-based number of the new region.
        number: usize,
        /// The new region in normalized image space.
        rect: Rectangle,
    },
    /// The span was too small; treated as a click.
    Click,
    /// The span lay completely outside the scaler.
    Outside,
}

/// Placement of one region on screen, in region order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegionView {
    /// 1-based region number.
    pub number: usize,
    /// The host's visual element, if attached.
    pub handle: Option<RegionHandle>,
    /// Screen rectangle, or `None` if the region is hidden.
    pub screen_rect: Option<Rectangle>,
}

impl RegionView {
    /// Returns true if the region should be shown.
    pub fn is_visible(&self) -> bool {
        self.screen_rect.is_some()
    }
}

/// A region read from host markup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarkupRegion {
    /// Coordinate attribute `x,y,width,height`.
    pub coords: String,
    /// Attributes to carry along.
    #[serde(default)]
    pub attributes: RegionAttributes,
}

/// Owns the region list and drives region gestures.
#[derive(Debug, Clone)]
pub struct RegionController {
    regions: RegionList,
    settings: RegionSettings,
    gesture: GestureState,
}

impl RegionController {
    /// Create a controller with no regions.
    pub fn new(settings: RegionSettings) -> Self {
        Self {
            regions: RegionList::new(),
            settings,
            gesture: GestureState::Idle,
        }
    }

    /// Create a controller and load regions from the encoded region parameter.
    ///
    /// When regions come from markup (`has_region_content`) the parameter is
    /// ignored. A malformed parameter falls back to no regions.
    pub fn from_settings(settings: RegionSettings) -> Self {
        let mut controller = Self::new(settings);
        if controller.settings.has_region_content {
            return controller;
        }
        if let Some(rg) = controller.settings.rg.clone() {
            if let Err(e) = controller.load_encoded(&rg) {
                log::warn!("Ignoring region parameter: {}", e);
            }
        }
        controller
    }

    /// Replace all regions with the decoded contents of `encoded`.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::Codec`] and leaves the controller with no
    /// regions if `encoded` is malformed.
    pub fn load_encoded(&mut self, encoded: &str) -> Result<usize, RegionError> {
        self.gesture = GestureState::Idle;
        match decode_regions(encoded) {
            Ok(rects) => {
                self.regions = RegionList::from_rects(rects);
                log::debug!("Loaded {} regions from parameter", self.regions.len());
                Ok(self.regions.len())
            }
            Err(e) => {
                self.regions = RegionList::new();
                self.repack();
                Err(e.into())
            }
        }
    }

    /// Append regions read from host markup, returning how many were added.
    ///
    /// Unless `has_region_content` is set the appended regions also enter
    /// the persisted region parameter.
    pub fn load_markup(&mut self, markup: impl IntoIterator<Item = MarkupRegion>) -> usize {
        let before = self.regions.len();
        for item in markup {
            let rect = parse_markup_coords(&item.coords);
            self.regions.push(Region::with_attributes(rect, item.attributes));
        }
        let added = self.regions.len() - before;
        log::debug!("Loaded {} regions from markup", added);
        self.repack();
        added
    }

    /// The regions in order.
    pub fn regions(&self) -> &RegionList {
        &self.regions
    }

    /// Current settings.
    pub fn settings(&self) -> &RegionSettings {
        &self.settings
    }

    /// Returns true while a gesture is sizing a region.
    pub fn is_sizing(&self) -> bool {
        matches!(self.gesture, GestureState::Sizing { .. })
    }

    /// Start sizing a new region at screen point `start`.
    ///
    /// # Errors
    ///
    /// - [`RegionError::RegionsHidden`] if region display is off
    /// - [`RegionError::GestureInProgress`] if already sizing
    pub fn begin_region(&mut self, start: Point, view: &ViewState) -> Result<(), RegionError> {
        if !self.settings.is_region_visible {
            return Err(RegionError::RegionsHidden);
        }
        if self.is_sizing() {
            return Err(RegionError::GestureInProgress);
        }
        self.gesture = GestureState::Sizing {
            start,
            scaler_rect: *view.scaler_rect(),
        };
        Ok(())
    }

    /// Track the pointer while sizing.
    ///
    /// Returns the provisional screen rectangle, clipped to the scaler.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::NoGesture`] if no gesture was started.
    pub fn update_region(&self, pos: Point) -> Result<Rectangle, RegionError> {
        match self.gesture {
            GestureState::Sizing { start, scaler_rect } => {
                let mut rect = Rectangle::from_points(start, pos);
                rect.clip_to(&scaler_rect);
                Ok(rect)
            }
            GestureState::Idle => Err(RegionError::NoGesture),
        }
    }

    /// Finish the gesture at screen point `pos`.
    ///
    /// The gesture is over afterwards whatever the outcome.
    ///
    /// # Errors
    ///
    /// - [`RegionError::NoGesture`] if no gesture was started
    /// - [`RegionError::Transform`] if the view transform cannot be inverted;
    ///   nothing is appended
    pub fn end_region(
        &mut self,
        pos: Point,
        view: &ViewState,
    ) -> Result<GestureOutcome, RegionError> {
        let GestureState::Sizing { start, scaler_rect } =
            std::mem::replace(&mut self.gesture, GestureState::Idle)
        else {
            return Err(RegionError::NoGesture);
        };

        let mut screen_rect = Rectangle::from_points(start, pos);
        if screen_rect.area() <= CLICK_AREA_THRESHOLD {
            return Ok(GestureOutcome::Click);
        }
        screen_rect.clip_to(&scaler_rect);
        if screen_rect.is_empty() {
            return Ok(GestureOutcome::Outside);
        }

        let rect = view.transform().invert_apply_rect(&screen_rect)?.normalized();
        let number = self.regions.push(Region::new(rect));
        log::debug!("Committed region {} at {}", number, rect);
        self.repack();
        Ok(GestureOutcome::Committed { number, rect })
    }

    /// Abort any gesture. Returns true if one was in progress.
    pub fn cancel_region(&mut self) -> bool {
        let was_sizing = self.is_sizing();
        self.gesture = GestureState::Idle;
        was_sizing
    }

    /// Remove the most recently added region.
    pub fn remove_region(&mut self) -> Removal {
        let removal = self.regions.remove_last();
        if removal.is_removed() {
            log::debug!("Removed region {}", self.regions.len() + 1);
            self.repack();
        }
        removal
    }

    /// Attach the host's visual element to region `number`.
    pub fn attach_handle(&mut self, number: usize, handle: RegionHandle) -> Option<RegionHandle> {
        self.regions.attach_handle(number, handle)
    }

    /// Detach the host's visual element from region `number`.
    pub fn detach_handle(&mut self, number: usize) -> Option<RegionHandle> {
        self.regions.detach_handle(number)
    }

    /// Switch region display on or off, returning the new state.
    pub fn toggle_visibility(&mut self) -> bool {
        self.settings.is_region_visible = !self.settings.is_region_visible;
        self.settings.is_region_visible
    }

    /// Compute where every region goes on screen for `view`.
    ///
    /// Each stored image rectangle is clipped to the zoom area and mapped
    /// forward. Regions without positive overlap, or all regions when
    /// display is off, are reported hidden.
    pub fn render(&self, view: &ViewState) -> Vec<RegionView> {
        let visible = self.settings.is_region_visible;
        self.regions
            .iter()
            .enumerate()
            .map(|(i, region)| RegionView {
                number: i + 1,
                handle: region.handle(),
                screen_rect: if visible {
                    view.zoom_area()
                        .intersection(region.rect())
                        .map(|clipped| view.transform().apply_rect(&clipped).normalized())
                } else {
                    None
                },
            })
            .collect()
    }

    /// Zoom area that shows region `number`, kept inside the full image.
    pub fn zoom_area_for(&self, number: usize) -> Option<Rectangle> {
        self.regions
            .get(number)
            .map(|region| Rectangle::FULL_AREA.fit(region.rect()))
    }

    /// The encoded region parameter for the current regions.
    ///
    /// `None` when there are no regions or when regions come from markup.
    pub fn persisted_param(&self) -> Option<String> {
        if self.settings.has_region_content || self.regions.is_empty() {
            return None;
        }
        Some(encode_regions(self.regions.rects()))
    }

    fn repack(&mut self) {
        if !self.settings.has_region_content {
            self.settings.rg = self.persisted_param();
        }
    }
}

impl Default for RegionController {
    fn default() -> Self {
        Self::new(RegionSettings::default())
    }
}
