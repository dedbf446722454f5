//! Regionview Core - Region-of-interest model for zoomable image viewers
//!
//! This crate provides the viewer-independent part of region handling:
//! rectangle geometry, the affine transform between normalized image space
//! and screen pixels, the ordered region list with its compact text
//! encoding, and the gesture controller that creates, removes and renders
//! regions.
//!
//! # Coordinate Spaces
//!
//! - **Image space** is normalized: the full image is `(0, 0)` to `(1, 1)`.
//!   Regions are stored here so they survive zoom, rotation and resizing.
//! - **Screen space** is pixels in the viewer. The host supplies the
//!   current [`ViewState`] whose transform maps image space onto screen.

pub mod geometry;
pub mod region;
pub mod settings;
pub mod view;

pub use geometry::{AffineTransform, Point, Rectangle, Size, TransformError};
pub use region::{
    GestureOutcome, MarkupRegion, Region, RegionController, RegionError, RegionHandle,
    RegionList, RegionView, Removal,
};
pub use settings::{QueryParams, RegionSettings};
pub use view::ViewState;
