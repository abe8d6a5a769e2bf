#![forbid(unsafe_code)]

//! Intrinsic content measurement supplied by the widget layer.

use std::collections::HashMap;

use trellis_core::geometry::Size;

use crate::placement::WidgetId;

/// Measures a widget's content for `auto` sizing.
///
/// `container` is the size of the box children are arranged in and
/// `viewport` the terminal size. Returned values exclude gutter and margin.
///
/// Closures of the form `Fn(WidgetId, Size, Size, i32) -> i32` implement
/// this trait as a height measurer.
pub trait ContentMeasure {
    /// Content height when laid out `width` cells wide.
    fn content_height(
        &self,
        widget: WidgetId,
        container: Size,
        viewport: Size,
        width: i32,
    ) -> i32;

    /// Preferred content width. Defaults to filling the container.
    fn content_width(&self, widget: WidgetId, container: Size, viewport: Size) -> i32 {
        let _ = (widget, viewport);
        container.width
    }
}

impl<F> ContentMeasure for F
where
    F: Fn(WidgetId, Size, Size, i32) -> i32,
{
    #[inline]
    fn content_height(
        &self,
        widget: WidgetId,
        container: Size,
        viewport: Size,
        width: i32,
    ) -> i32 {
        self(widget, container, viewport, width)
    }
}

/// Fixed intrinsic sizes keyed by widget.
///
/// Widgets without an entry measure as zero high and container wide.
#[derive(Debug, Clone, Default)]
pub struct IntrinsicSizes {
    sizes: HashMap<WidgetId, Size>,
}

impl IntrinsicSizes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the content size of `widget`.
    pub fn insert(&mut self, widget: WidgetId, size: Size) -> &mut Self {
        self.sizes.insert(widget, size);
        self
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, widget: WidgetId, size: Size) -> Self {
        self.sizes.insert(widget, size);
        self
    }

    pub fn get(&self, widget: WidgetId) -> Option<Size> {
        self.sizes.get(&widget).copied()
    }
}

impl ContentMeasure for IntrinsicSizes {
    fn content_height(
        &self,
        widget: WidgetId,
        _container: Size,
        _viewport: Size,
        _width: i32,
    ) -> i32 {
        self.get(widget).map_or(0, |size| size.height)
    }

    fn content_width(&self, widget: WidgetId, container: Size, _viewport: Size) -> i32 {
        self.get(widget).map_or(container.width, |size| size.width)
    }
}
