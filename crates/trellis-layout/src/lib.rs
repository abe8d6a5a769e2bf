#![forbid(unsafe_code)]

//! Size resolution and child arrangement.
//!
//! - [`layout_resolve`] - split a length between fixed and flexible edges
//! - [`arrange`] - place a container's children: docks, flow, overlays
//! - [`Layout`] - the flow algorithms (`stream`, `vertical`, `horizontal`)
//! - [`ContentMeasure`] - callback for content-sized (`auto`) dimensions
//!
//! Coordinates are cells in `i32`. Nothing here clips: a layout that does
//! not fit overflows, and the caller decides what to show.

pub mod arrange;
mod box_model;
pub mod flow;
pub mod measure;
pub mod placement;
pub mod resolve;
pub mod style;

pub use arrange::{ArrangeOptions, Child, DockArrangeResult, arrange, arrange_with};
pub use flow::Layout;
pub use measure::{ContentMeasure, IntrinsicSizes};
pub use placement::{Placement, TOP_Z, WidgetId};
pub use resolve::{EdgeSpec, layout_resolve, resolve_passes};
pub use style::{
    AlignHorizontal, AlignVertical, Dock, NodeStyle, Overlay, ParseDockError, Position, Scalar,
};
pub use trellis_core::geometry::{Offset, Region, Size, Spacing};
