#![forbid(unsafe_code)]

//! Trellis public facade crate.
//!
//! Re-exports the layout and render crates and ties them together: arrange
//! a container, index the placements, then ask what a viewport shows.
//!
//! ```
//! use trellis::prelude::*;
//!
//! let children = [
//!     Child::new(WidgetId::new(1), NodeStyle::new().dock(Dock::Top).height(Scalar::Cells(1))),
//!     Child::new(WidgetId::new(2), NodeStyle::new().height(Scalar::Fraction(1))),
//! ];
//! let screen = Size::new(80, 24);
//! let result = arrange(Layout::Vertical, &children, screen, screen, &IntrinsicSizes::new());
//!
//! let map = trellis::index_placements(&result.placements, SpatialMapConfig::default());
//! let visible = map.get_values_in_region(result.scroll_region(screen));
//! assert_eq!(visible, vec![WidgetId::new(2)]);
//! assert_eq!(map.get_values_in_region(Region::new(5, 0, 1, 1)), vec![WidgetId::new(1)]);
//! ```

use std::fmt;

// --- Geometry re-exports --------------------------------------------------

pub use trellis_core::geometry::{Offset, Region, Size, Spacing};

// --- Layout re-exports ----------------------------------------------------

pub use trellis_layout::{
    AlignHorizontal, AlignVertical, ArrangeOptions, Child, ContentMeasure, Dock,
    DockArrangeResult, EdgeSpec, IntrinsicSizes, Layout, NodeStyle, Overlay, ParseDockError,
    Placement, Position, Scalar, TOP_Z, WidgetId, arrange, arrange_with, layout_resolve,
};

// --- Render re-exports ----------------------------------------------------

pub use trellis_render::{
    InlineRange, InlineRanges, RegionMerger, SpatialEntry, SpatialMap, SpatialMapConfig,
    inline_ranges,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for code that feeds user input into Trellis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A dock edge keyword that is not `top`, `right`, `bottom` or `left`.
    Dock(ParseDockError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dock(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Dock(err) => Some(err),
        }
    }
}

impl From<ParseDockError> for Error {
    fn from(err: ParseDockError) -> Self {
        Self::Dock(err)
    }
}

/// Standard result type for Trellis APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Placement indexing ---------------------------------------------------

/// Spatial entry for a placement, keyed by widget.
///
/// The entry covers the visible region (render offset applied).
pub fn placement_entry(placement: &Placement) -> SpatialEntry<WidgetId> {
    SpatialEntry {
        region: placement.visible_region(),
        fixed: placement.fixed,
        overlay: placement.overlay,
        value: placement.widget,
    }
}

/// Build a spatial map over `placements`.
pub fn index_placements(
    placements: &[Placement],
    config: SpatialMapConfig,
) -> SpatialMap<WidgetId> {
    let mut map = SpatialMap::with_config(config);
    map.insert(placements.iter().map(placement_entry));
    map
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Child, ContentMeasure, Dock, DockArrangeResult, Error, IntrinsicSizes, Layout, NodeStyle,
        Offset, Placement, Region, Result, Scalar, Size, SpatialMap, SpatialMapConfig, Spacing,
        WidgetId, arrange, arrange_with, inline_ranges,
    };

    pub use crate::{core, layout, render};
}

pub use trellis_core as core;
pub use trellis_layout as layout;
pub use trellis_render as render;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dock_errors_convert() {
        fn parse(keyword: &str) -> Result<Dock> {
            Ok(keyword.parse::<Dock>()?)
        }
        assert_eq!(parse("left"), Ok(Dock::Left));
        let err = parse("sideways").unwrap_err();
        assert!(err.to_string().contains("sideways"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn entry_uses_visible_region() {
        let placement = Placement::new(Region::new(0, 0, 4, 1), WidgetId::new(3))
            .with_offset(Offset::new(2, 2));
        let entry = placement_entry(&placement);
        assert_eq!(entry.region, Region::new(2, 2, 4, 1));
        assert_eq!(entry.value, WidgetId::new(3));
        assert!(!entry.fixed);
    }
}
