#![forbid(unsafe_code)]

//! Resolved style values consumed by the arrangement pass.
//!
//! The style cascade lives elsewhere; by the time values reach this module
//! they are plain numbers and keywords.

use std::fmt;
use std::str::FromStr;

use trellis_core::geometry::{Offset, Size, Spacing};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A length along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Scalar {
    /// An exact number of cells.
    Cells(i32),
    /// Percentage of the container along the same axis.
    Percent(i32),
    /// Percentage of the viewport width.
    ViewportWidth(i32),
    /// Percentage of the viewport height.
    ViewportHeight(i32),
    /// Share of the space left over after fixed siblings.
    Fraction(i32),
    /// Size to content.
    #[default]
    Auto,
}

impl Scalar {
    /// Check if this is an exact cell count.
    #[inline]
    pub const fn is_cells(&self) -> bool {
        matches!(self, Self::Cells(_))
    }

    /// Check if this is a fractional length.
    #[inline]
    pub const fn is_fraction(&self) -> bool {
        matches!(self, Self::Fraction(_))
    }

    /// Resolve to cells. `container` is the container length on the same
    /// axis. Returns `None` for [`Scalar::Fraction`] and [`Scalar::Auto`],
    /// which depend on siblings or content.
    pub fn resolve(&self, container: i32, viewport: Size) -> Option<i32> {
        match *self {
            Self::Cells(cells) => Some(cells),
            Self::Percent(percent) => Some(percent_of(container, percent)),
            Self::ViewportWidth(percent) => Some(percent_of(viewport.width, percent)),
            Self::ViewportHeight(percent) => Some(percent_of(viewport.height, percent)),
            Self::Fraction(_) | Self::Auto => None,
        }
    }
}

#[inline]
fn percent_of(length: i32, percent: i32) -> i32 {
    (i64::from(length) * i64::from(percent) / 100) as i32
}

/// Container edge a docked child is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Dock {
    Top,
    Right,
    Bottom,
    Left,
}

impl Dock {
    /// All edges, in the order they are listed in styles.
    pub const ALL: [Dock; 4] = [Dock::Top, Dock::Right, Dock::Bottom, Dock::Left];

    /// Style keyword for this edge.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Dock::Top => "top",
            Dock::Right => "right",
            Dock::Bottom => "bottom",
            Dock::Left => "left",
        }
    }

    /// Convert a keyword produced by the style cascade.
    ///
    /// # Panics
    ///
    /// Panics on an unrecognized keyword. The cascade only emits valid dock
    /// edges, so anything else is a bug upstream. Use [`str::parse`] to
    /// validate untrusted input instead.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Dock {
        match keyword.parse() {
            Ok(dock) => dock,
            Err(err) => panic!("invalid value for dock edge: {err}"),
        }
    }

    /// Check if this edge consumes height (top/bottom) rather than width.
    #[inline]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Dock::Top | Dock::Bottom)
    }
}

impl fmt::Display for Dock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for Dock {
    type Err = ParseDockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dock::ALL
            .into_iter()
            .find(|dock| dock.keyword() == s)
            .ok_or_else(|| ParseDockError {
                keyword: s.to_owned(),
            })
    }
}

/// Error returned when a dock keyword is not one of `top`, `right`,
/// `bottom` or `left`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDockError {
    keyword: String,
}

impl ParseDockError {
    /// The keyword that failed to parse.
    #[must_use]
    pub fn keyword(&self) -> &str {
        &self.keyword
    }
}

impl fmt::Display for ParseDockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown dock edge {:?} (expected top, right, bottom or left)",
            self.keyword
        )
    }
}

impl std::error::Error for ParseDockError {}

/// How a child is positioned relative to the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Position {
    /// Part of the container's flow; `offset` is a render-time nudge.
    #[default]
    Relative,
    /// Out of flow, placed at the container origin plus `offset`.
    Absolute,
}

/// Whether a child floats above its siblings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Overlay {
    #[default]
    None,
    /// Painted above everything else in the container.
    Screen,
}

/// Horizontal alignment of the flow within its container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AlignHorizontal {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical alignment of the flow within its container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AlignVertical {
    #[default]
    Top,
    Middle,
    Bottom,
}

impl AlignHorizontal {
    /// Start position of `length` cells inside `container` cells.
    /// Never negative: oversized content stays anchored left.
    pub const fn position(self, length: i32, container: i32) -> i32 {
        let slack = container - length;
        let position = match self {
            Self::Left => 0,
            Self::Center => slack / 2,
            Self::Right => slack,
        };
        if position < 0 { 0 } else { position }
    }
}

impl AlignVertical {
    /// Start position of `length` cells inside `container` cells.
    /// Never negative: oversized content stays anchored to the top.
    pub const fn position(self, length: i32, container: i32) -> i32 {
        let slack = container - length;
        let position = match self {
            Self::Top => 0,
            Self::Middle => slack / 2,
            Self::Bottom => slack,
        };
        if position < 0 { 0 } else { position }
    }
}

/// Style values for one child, as resolved by the cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NodeStyle {
    /// `false` for `display: none`; such children are never placed.
    pub display: bool,
    pub dock: Option<Dock>,
    pub width: Option<Scalar>,
    pub height: Option<Scalar>,
    pub min_width: Option<Scalar>,
    pub max_width: Option<Scalar>,
    pub min_height: Option<Scalar>,
    pub max_height: Option<Scalar>,
    pub margin: Spacing,
    /// Padding plus border, added around measured content.
    pub gutter: Spacing,
    pub offset: Offset,
    pub position: Position,
    pub overlay: Overlay,
    /// Children on different layers are arranged independently.
    pub layer: u8,
}

impl Default for NodeStyle {
    fn default() -> Self {
        Self {
            display: true,
            dock: None,
            width: None,
            height: None,
            min_width: None,
            max_width: None,
            min_height: None,
            max_height: None,
            margin: Spacing::ZERO,
            gutter: Spacing::ZERO,
            offset: Offset::ZERO,
            position: Position::Relative,
            overlay: Overlay::None,
            layer: 0,
        }
    }
}

impl NodeStyle {
    /// Default style.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dock(mut self, dock: Dock) -> Self {
        self.dock = Some(dock);
        self
    }

    /// Dock using a cascade keyword. Panics on an unknown keyword, see
    /// [`Dock::from_keyword`].
    pub fn dock_keyword(self, keyword: &str) -> Self {
        self.dock(Dock::from_keyword(keyword))
    }

    pub fn width(mut self, width: Scalar) -> Self {
        self.width = Some(width);
        self
    }

    pub fn height(mut self, height: Scalar) -> Self {
        self.height = Some(height);
        self
    }

    pub fn min_width(mut self, min_width: Scalar) -> Self {
        self.min_width = Some(min_width);
        self
    }

    pub fn max_width(mut self, max_width: Scalar) -> Self {
        self.max_width = Some(max_width);
        self
    }

    pub fn min_height(mut self, min_height: Scalar) -> Self {
        self.min_height = Some(min_height);
        self
    }

    pub fn max_height(mut self, max_height: Scalar) -> Self {
        self.max_height = Some(max_height);
        self
    }

    pub fn margin(mut self, margin: impl Into<Spacing>) -> Self {
        self.margin = margin.into();
        self
    }

    pub fn gutter(mut self, gutter: impl Into<Spacing>) -> Self {
        self.gutter = gutter.into();
        self
    }

    pub fn offset(mut self, offset: impl Into<Offset>) -> Self {
        self.offset = offset.into();
        self
    }

    /// Take the child out of flow and place it at `offset`.
    pub fn absolute(mut self) -> Self {
        self.position = Position::Absolute;
        self
    }

    /// Float the child above its siblings.
    pub fn overlay(mut self) -> Self {
        self.overlay = Overlay::Screen;
        self
    }

    /// `display: none`.
    pub fn hidden(mut self) -> Self {
        self.display = false;
        self
    }

    pub fn layer(mut self, layer: u8) -> Self {
        self.layer = layer;
        self
    }

    #[inline]
    pub const fn is_docked(&self) -> bool {
        self.dock.is_some()
    }

    #[inline]
    pub const fn is_absolute(&self) -> bool {
        matches!(self.position, Position::Absolute)
    }

    #[inline]
    pub const fn is_overlay(&self) -> bool {
        matches!(self.overlay, Overlay::Screen)
    }

    /// Check if the child takes part in the container's flow layout.
    #[inline]
    pub const fn in_flow(&self) -> bool {
        !self.is_docked() && !self.is_absolute() && !self.is_overlay()
    }
}
