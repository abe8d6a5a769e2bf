#![forbid(unsafe_code)]

//! Spatial queries over laid-out regions.
//!
//! - [`SpatialMap`] - which values overlap a region, via grid buckets
//! - [`inline_ranges`] / [`RegionMerger`] - rectangles merged into row spans

pub mod inline_ranges;
pub mod spatial_map;

pub use inline_ranges::{InlineRange, InlineRanges, RegionMerger, inline_ranges};
pub use spatial_map::{SpatialEntry, SpatialMap, SpatialMapConfig};
