#![forbid(unsafe_code)]

//! Core: geometry value types and the logging shim shared by the layout and
//! render crates.

pub mod geometry;
pub mod logging;

pub use geometry::{Offset, Region, Size, Spacing};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
