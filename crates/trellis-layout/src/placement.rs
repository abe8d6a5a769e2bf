#![forbid(unsafe_code)]

//! Arrangement output: where each child goes and how it stacks.

use std::fmt;

use trellis_core::geometry::{Offset, Region, Spacing};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Z-order reserved for content that always paints on top (docks, overlays).
pub const TOP_Z: i32 = i32::MAX;

/// Stable handle for a widget.
///
/// The widget tree owns the id-to-widget arena; layout code only passes ids
/// around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct WidgetId(u32);

impl WidgetId {
    /// Create an id from its raw value.
    #[inline]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw numeric value.
    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for WidgetId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

/// A child's resolved region plus stacking information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Placement {
    /// Region in container coordinates, margins already removed.
    pub region: Region,
    /// Translation applied at render time (relative positioning).
    pub offset: Offset,
    /// Margin around `region` that the arrangement reserved.
    pub margin: Spacing,
    pub widget: WidgetId,
    /// Z-stack key; higher paints later. [`TOP_Z`] is always on top.
    pub order: i32,
    /// Does not scroll with the container.
    pub fixed: bool,
    pub overlay: bool,
    pub absolute: bool,
}

impl Placement {
    /// A flow placement at `region` with no margin or offset.
    pub const fn new(region: Region, widget: WidgetId) -> Self {
        Self {
            region,
            offset: Offset::ZERO,
            margin: Spacing::ZERO,
            widget,
            order: 0,
            fixed: false,
            overlay: false,
            absolute: false,
        }
    }

    pub const fn with_offset(mut self, offset: Offset) -> Self {
        self.offset = offset;
        self
    }

    pub const fn with_margin(mut self, margin: Spacing) -> Self {
        self.margin = margin;
        self
    }

    pub const fn with_order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    /// Region after the render-time offset is applied.
    #[inline]
    pub fn visible_region(&self) -> Region {
        self.region.translate(self.offset)
    }

    /// Check if the placement came from the container's flow layout.
    #[inline]
    pub const fn is_flow(&self) -> bool {
        !self.fixed && !self.overlay && !self.absolute
    }

    /// Bounding region of `placements`, margins included.
    pub fn bounds(placements: &[Placement]) -> Region {
        placements
            .iter()
            .map(|placement| placement.region.grow(placement.margin))
            .fold(Region::default(), |bounds, region| bounds.union(&region))
    }

    /// Move every placement by `offset`.
    pub fn translate_all(placements: &mut [Placement], offset: Offset) {
        if offset.is_zero() {
            return;
        }
        for placement in placements {
            placement.region = placement.region.translate(offset);
        }
    }
}
