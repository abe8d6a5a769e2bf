#![forbid(unsafe_code)]

//! Turning a child's width/height styles into cells.
//!
//! Resolved `width`/`height` values are border-box sizes (gutter included).
//! `auto` measures content and adds the gutter. A fraction here means "fill
//! the space the caller offers"; flex layouts split fractions themselves
//! before getting this far.

use trellis_core::geometry::Size;

use crate::arrange::Child;
use crate::measure::ContentMeasure;
use crate::style::Scalar;

/// Sizing context for the children of one container.
pub(crate) struct Sizing<'a, M: ?Sized> {
    pub(crate) container: Size,
    pub(crate) viewport: Size,
    pub(crate) measure: &'a M,
}

impl<'a, M: ContentMeasure + ?Sized> Sizing<'a, M> {
    pub(crate) fn new(container: Size, viewport: Size, measure: &'a M) -> Self {
        Self {
            container,
            viewport,
            measure,
        }
    }

    /// Border-box width; `default` stands in for a missing `width` style.
    pub(crate) fn width(&self, child: &Child, default: Scalar, fill: i32) -> i32 {
        let style = &child.style;
        let width = match style.width.unwrap_or(default) {
            Scalar::Auto => self.content_width(child),
            Scalar::Fraction(_) => fill,
            scalar => scalar
                .resolve(self.container.width, self.viewport)
                .unwrap_or(fill),
        };
        self.clamp(width, style.min_width, style.max_width, self.container.width)
    }

    /// Border-box height for a box `width` cells wide.
    pub(crate) fn height(&self, child: &Child, default: Scalar, width: i32, fill: i32) -> i32 {
        let style = &child.style;
        let height = match style.height.unwrap_or(default) {
            Scalar::Auto => self.content_height(child, width),
            Scalar::Fraction(_) => fill,
            scalar => scalar
                .resolve(self.container.height, self.viewport)
                .unwrap_or(fill),
        };
        self.clamp_height(child, height)
    }

    /// Measured content height plus gutter, unclamped.
    pub(crate) fn content_height(&self, child: &Child, width: i32) -> i32 {
        let gutter = child.style.gutter;
        let inner = width.saturating_sub(gutter.width()).max(0);
        self.measure
            .content_height(child.id, self.container, self.viewport, inner)
            .saturating_add(gutter.height())
    }

    /// Measured content width plus gutter, unclamped.
    pub(crate) fn content_width(&self, child: &Child) -> i32 {
        self.measure
            .content_width(child.id, self.container, self.viewport)
            .saturating_add(child.style.gutter.width())
    }

    /// Apply `min_height`/`max_height`.
    pub(crate) fn clamp_height(&self, child: &Child, height: i32) -> i32 {
        let style = &child.style;
        self.clamp(height, style.min_height, style.max_height, self.container.height)
    }

    /// Apply `min_width`/`max_width`.
    pub(crate) fn clamp_width(&self, child: &Child, width: i32) -> i32 {
        let style = &child.style;
        self.clamp(width, style.min_width, style.max_width, self.container.width)
    }

    /// Resolved minimum height, used as the floor for fractional rows.
    pub(crate) fn min_height(&self, child: &Child) -> Option<i32> {
        child
            .style
            .min_height
            .and_then(|scalar| scalar.resolve(self.container.height, self.viewport))
    }

    /// Resolved minimum width, used as the floor for fractional columns.
    pub(crate) fn min_width(&self, child: &Child) -> Option<i32> {
        child
            .style
            .min_width
            .and_then(|scalar| scalar.resolve(self.container.width, self.viewport))
    }

    // A minimum wins over a conflicting maximum.
    fn clamp(&self, value: i32, min: Option<Scalar>, max: Option<Scalar>, length: i32) -> i32 {
        let mut value = value;
        if let Some(max) = max.and_then(|scalar| scalar.resolve(length, self.viewport)) {
            value = value.min(max);
        }
        if let Some(min) = min.and_then(|scalar| scalar.resolve(length, self.viewport)) {
            value = value.max(min);
        }
        value.max(0)
    }
}
