//! Regions of interest anchored in normalized image space.
//!
//! This module provides:
//! - [`Region`] and [`RegionList`] - the ordered region model
//! - [`codec`] - the compact query-parameter encoding and markup forms
//! - [`RegionController`] - gesture-driven creation, removal and rendering
//!
//! ## Ordering
//!
//! Regions keep insertion order. The 1-based position of a region is the
//! number shown to the user and the order in the persisted encoding.
//! Regions are only ever removed from the tail.

pub mod codec;
mod controller;

pub use codec::CodecError;
pub use controller::{
    GestureOutcome, MarkupRegion, RegionController, RegionView, CLICK_AREA_THRESHOLD,
};

use crate::geometry::{Rectangle, TransformError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for region operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegionError {
    /// The view transform could not be inverted.
    #[error(transparent)]
    Transform(#[from] TransformError),

    /// A persisted region string could not be decoded.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// Regions cannot be defined while region display is switched off.
    #[error("Regions are hidden, show them before defining a region")]
    RegionsHidden,

    /// A new gesture was started while another was still sizing.
    #[error("A region gesture is already in progress")]
    GestureInProgress,

    /// A move or release arrived without a started gesture.
    #[error("No region gesture in progress")]
    NoGesture,
}

/// Opaque identifier of the host's visual element for a region.
///
/// The host creates and destroys the element; the model only stores the handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegionHandle(pub u32);

/// Attributes copied from host markup that defined a region.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionAttributes {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub href: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub style: Option<String>,
}

impl RegionAttributes {
    /// Returns true if no attribute is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A rectangle of interest in normalized image space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    rect: Rectangle,
    handle: Option<RegionHandle>,
    attributes: RegionAttributes,
}

impl Region {
    /// Create a region without a visual element or attributes.
    pub fn new(rect: Rectangle) -> Self {
        Self {
            rect,
            handle: None,
            attributes: RegionAttributes::default(),
        }
    }

    /// Create a region carrying markup attributes.
    pub fn with_attributes(rect: Rectangle, attributes: RegionAttributes) -> Self {
        Self {
            rect,
            handle: None,
            attributes,
        }
    }

    /// The rectangle in normalized image space.
    pub fn rect(&self) -> &Rectangle {
        &self.rect
    }

    /// The handle of the host's visual element, if one is attached.
    pub fn handle(&self) -> Option<RegionHandle> {
        self.handle
    }

    /// Attributes copied from markup.
    pub fn attributes(&self) -> &RegionAttributes {
        &self.attributes
    }
}

/// Result of removing the last region.
#[derive(Debug, Clone, PartialEq)]
pub enum Removal {
    /// The last region was removed. The host should drop its visual element.
    Removed(Region),
    /// There was nothing to remove.
    Empty,
}

impl Removal {
    /// Returns true if a region was actually removed.
    pub fn is_removed(&self) -> bool {
        matches!(self, Removal::Removed(_))
    }
}

/// The ordered sequence of regions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegionList {
    regions: Vec<Region>,
}

impl RegionList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a list of plain regions from rectangles, keeping their order.
    pub fn from_rects(rects: impl IntoIterator<Item = Rectangle>) -> Self {
        Self {
            regions: rects.into_iter().map(Region::new).collect(),
        }
    }

    /// Append a region and return its 1-based number.
    pub fn push(&mut self, region: Region) -> usize {
        self.regions.push(region);
        self.regions.len()
    }

    /// Remove the last region.
    pub fn remove_last(&mut self) -> Removal {
        match self.regions.pop() {
            Some(region) => Removal::Removed(region),
            None => Removal::Empty,
        }
    }

    /// Number of regions.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Returns true if there are no regions.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Region by 1-based number.
    pub fn get(&self, number: usize) -> Option<&Region> {
        number.checked_sub(1).and_then(|i| self.regions.get(i))
    }

    /// Iterate regions in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Region> {
        self.regions.iter()
    }

    /// Iterate region rectangles in order.
    pub fn rects(&self) -> impl Iterator<Item = &Rectangle> + '_ {
        self.regions.iter().map(Region::rect)
    }

    /// Attach a visual element to region `number`, returning the previous handle.
    ///
    /// Returns `None` without changes if there is no such region.
    pub fn attach_handle(&mut self, number: usize, handle: RegionHandle) -> Option<RegionHandle> {
        let region = self.get_mut(number)?;
        region.handle.replace(handle)
    }

    /// Detach the visual element from region `number`, returning it.
    pub fn detach_handle(&mut self, number: usize) -> Option<RegionHandle> {
        self.get_mut(number)?.handle.take()
    }

    fn get_mut(&mut self, number: usize) -> Option<&mut Region> {
        number.checked_sub(1).and_then(|i| self.regions.get_mut(i))
    }
}

impl<'a> IntoIterator for &'a RegionList {
    type Item = &'a Region;
    type IntoIter = std::slice::Iter<'a, Region>;

    fn into_iter(self) -> Self::IntoIter {
        self.regions.iter()
    }
}
