#![forbid(unsafe_code)]

//! The arrangement pass: docks, flow, and out-of-flow children.
//!
//! For each layer, docked children are pinned to the edges of the
//! container first, each one shrinking the box left for the next. The
//! remaining box goes to the container's [`Layout`]. Absolute and overlay
//! children are then placed relative to that box without disturbing the
//! flow.
//!
//! # Example
//!
//! ```
//! use trellis_layout::{arrange, Child, Dock, IntrinsicSizes, Layout, NodeStyle, Scalar, WidgetId};
//! use trellis_core::{Region, Size};
//!
//! let header = WidgetId::new(1);
//! let body = WidgetId::new(2);
//! let children = [
//!     Child::new(header, NodeStyle::new().dock(Dock::Top).height(Scalar::Cells(1))),
//!     Child::new(body, NodeStyle::new()),
//! ];
//! let sizes = IntrinsicSizes::new().with(body, Size::new(80, 23));
//! let size = Size::new(80, 24);
//!
//! let result = arrange(Layout::Stream, &children, size, size, &sizes);
//! assert_eq!(result.placement(body).map(|p| p.region), Some(Region::new(0, 1, 80, 23)));
//! assert_eq!(result.spacing.top, 1);
//! ```

use std::collections::{BTreeMap, HashSet};

use trellis_core::geometry::{Offset, Region, Size, Spacing};
use trellis_core::{debug, debug_span, trace};

use crate::box_model::Sizing;
use crate::flow::Layout;
use crate::measure::ContentMeasure;
use crate::placement::{Placement, TOP_Z, WidgetId};
use crate::style::{AlignHorizontal, AlignVertical, Dock, NodeStyle, Scalar};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A child to arrange: its id and resolved style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Child {
    pub id: WidgetId,
    pub style: NodeStyle,
}

impl Child {
    pub const fn new(id: WidgetId, style: NodeStyle) -> Self {
        Self { id, style }
    }
}

/// Container-level settings for an arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ArrangeOptions {
    pub layout: Layout,
    pub align_horizontal: AlignHorizontal,
    pub align_vertical: AlignVertical,
}

impl ArrangeOptions {
    /// Options for `layout`, aligned top-left.
    pub const fn new(layout: Layout) -> Self {
        Self {
            layout,
            align_horizontal: AlignHorizontal::Left,
            align_vertical: AlignVertical::Top,
        }
    }

    #[must_use]
    pub const fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    #[must_use]
    pub const fn with_align(
        mut self,
        horizontal: AlignHorizontal,
        vertical: AlignVertical,
    ) -> Self {
        self.align_horizontal = horizontal;
        self.align_vertical = vertical;
        self
    }

    /// Check if the flow needs translating after layout.
    #[inline]
    const fn is_aligned(&self) -> bool {
        !matches!(self.align_horizontal, AlignHorizontal::Left)
            || !matches!(self.align_vertical, AlignVertical::Top)
    }
}

impl From<Layout> for ArrangeOptions {
    fn from(layout: Layout) -> Self {
        Self::new(layout)
    }
}

/// Result of arranging one container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DockArrangeResult {
    /// Placements grouped by layer; within a layer, docks come first and
    /// the rest follow child order.
    pub placements: Vec<Placement>,
    /// Ids of every child that received a placement.
    pub placed: HashSet<WidgetId>,
    /// Space consumed by docks on each edge, the maximum across layers.
    pub spacing: Spacing,
}

impl DockArrangeResult {
    /// First placement for `widget`, if it was placed.
    pub fn placement(&self, widget: WidgetId) -> Option<&Placement> {
        self.placements.iter().find(|p| p.widget == widget)
    }

    /// Region of a container of `size` left over once docks are removed.
    /// This is the viewport that scrolls.
    pub fn scroll_region(&self, size: Size) -> Region {
        size.region().shrink(self.spacing)
    }

    /// Placements that scroll with the container.
    pub fn scrolling(&self) -> impl Iterator<Item = &Placement> {
        self.placements.iter().filter(|p| !p.fixed)
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

/// Arrange `children` inside a container of `size` using `layout`.
///
/// `viewport` is the terminal size, used by viewport-relative scalars.
/// `measure` supplies content sizes for `auto` dimensions.
pub fn arrange<M: ContentMeasure + ?Sized>(
    layout: Layout,
    children: &[Child],
    size: Size,
    viewport: Size,
    measure: &M,
) -> DockArrangeResult {
    arrange_with(ArrangeOptions::new(layout), children, size, viewport, measure)
}

/// [`arrange`] with container alignment.
pub fn arrange_with<M: ContentMeasure + ?Sized>(
    options: ArrangeOptions,
    children: &[Child],
    size: Size,
    viewport: Size,
    measure: &M,
) -> DockArrangeResult {
    let _span = debug_span!(
        "arrange",
        layout = options.layout.name(),
        children = children.len(),
        width = size.width,
        height = size.height
    )
    .entered();

    let mut layers: BTreeMap<u8, Vec<(usize, &Child)>> = BTreeMap::new();
    for (index, child) in children.iter().enumerate() {
        if child.style.display {
            layers.entry(child.style.layer).or_default().push((index, child));
        } else {
            trace!(widget = %child.id, "display none, skipped");
        }
    }

    let mut result = DockArrangeResult::default();
    for (layer, members) in &layers {
        let spacing = arrange_layer(
            &options,
            *layer,
            members,
            size,
            viewport,
            measure,
            &mut result.placements,
        );
        result.spacing = result.spacing.grow_maximum(spacing);
    }
    result.placed = result.placements.iter().map(|p| p.widget).collect();

    debug!(
        layers = layers.len(),
        placed = result.placed.len(),
        top = result.spacing.top,
        right = result.spacing.right,
        bottom = result.spacing.bottom,
        left = result.spacing.left,
        "arranged"
    );
    result
}

/// Arrange one layer, appending to `placements`. Returns the dock spacing.
fn arrange_layer<M: ContentMeasure + ?Sized>(
    options: &ArrangeOptions,
    layer: u8,
    members: &[(usize, &Child)],
    size: Size,
    viewport: Size,
    measure: &M,
    placements: &mut Vec<Placement>,
) -> Spacing {
    let order = i32::from(layer);
    let (docked, undocked): (Vec<_>, Vec<_>) = members
        .iter()
        .copied()
        .partition(|(_, child)| child.style.is_docked());

    let region = size.region();
    let dock_region = arrange_docks(&docked, region, viewport, measure, placements);
    let spacing = region.spacing_to(&dock_region);

    let flow: Vec<&Child> = undocked
        .iter()
        .filter(|(_, child)| child.style.in_flow())
        .map(|(_, child)| *child)
        .collect();
    let mut flow_placements = options
        .layout
        .arrange(&flow, dock_region.size(), viewport, measure);
    if options.is_aligned() {
        let bounds = Placement::bounds(&flow_placements);
        let aligned = Offset::new(
            options
                .align_horizontal
                .position(bounds.width, dock_region.width)
                - bounds.x,
            options
                .align_vertical
                .position(bounds.height, dock_region.height)
                - bounds.y,
        );
        Placement::translate_all(&mut flow_placements, aligned);
    }
    Placement::translate_all(&mut flow_placements, dock_region.offset());

    // Merge flow and out-of-flow placements back into child order.
    let sizing = Sizing::new(dock_region.size(), viewport, measure);
    let mut flow_placements = flow_placements.into_iter();
    for (_, child) in &undocked {
        let placement = if child.style.in_flow() {
            match flow_placements.next() {
                Some(placement) => placement.with_order(order),
                None => continue,
            }
        } else {
            place_out_of_flow(child, dock_region, &sizing, order)
        };
        placements.push(placement);
    }

    spacing
}

/// Pin docked children to the edges of `region`, stacking them inward.
/// Returns what is left of the region.
fn arrange_docks<M: ContentMeasure + ?Sized>(
    docked: &[(usize, &Child)],
    region: Region,
    viewport: Size,
    measure: &M,
    placements: &mut Vec<Placement>,
) -> Region {
    let mut region = region;
    for (_, child) in docked {
        let Some(dock) = child.style.dock else {
            continue;
        };
        let style = &child.style;
        let margin = style.margin;
        let sizing = Sizing::new(region.size(), viewport, measure);

        let (placed, consumed) = if dock.is_vertical() {
            let width = sizing.width(
                child,
                Scalar::Fraction(1),
                region.width.saturating_sub(margin.width()),
            );
            let fill = region.height.saturating_sub(margin.height());
            let height = sizing.height(child, Scalar::Auto, width, fill);
            let consumed = height.saturating_add(margin.height()).min(region.height);
            let y = match dock {
                Dock::Top => region.y.saturating_add(margin.top),
                _ => region
                    .bottom()
                    .saturating_sub(margin.bottom)
                    .saturating_sub(height),
            };
            let x = region.x.saturating_add(margin.left);
            (Region::new(x, y, width, height), consumed)
        } else {
            let width = sizing.width(
                child,
                Scalar::Auto,
                region.width.saturating_sub(margin.width()),
            );
            let height = sizing.height(
                child,
                Scalar::Fraction(1),
                width,
                region.height.saturating_sub(margin.height()),
            );
            let consumed = width.saturating_add(margin.width()).min(region.width);
            let x = match dock {
                Dock::Left => region.x.saturating_add(margin.left),
                _ => region
                    .right()
                    .saturating_sub(margin.right)
                    .saturating_sub(width),
            };
            let y = region.y.saturating_add(margin.top);
            (Region::new(x, y, width, height), consumed)
        };

        trace!(widget = %child.id, edge = dock.keyword(), consumed, "docked");
        placements.push(Placement {
            region: placed,
            offset: style.offset,
            margin: Spacing::ZERO,
            widget: child.id,
            order: TOP_Z,
            fixed: true,
            overlay: style.is_overlay(),
            absolute: false,
        });

        let taken = match dock {
            Dock::Top => Spacing::new(consumed, 0, 0, 0),
            Dock::Right => Spacing::new(0, consumed, 0, 0),
            Dock::Bottom => Spacing::new(0, 0, consumed, 0),
            Dock::Left => Spacing::new(0, 0, 0, consumed),
        };
        region = region.shrink(taken);
    }
    region
}

/// Place an absolute or overlay child at the box origin plus its margin and
/// offset. The offset is folded into the region.
fn place_out_of_flow<M: ContentMeasure + ?Sized>(
    child: &Child,
    region: Region,
    sizing: &Sizing<'_, M>,
    order: i32,
) -> Placement {
    let style = &child.style;
    let margin = style.margin;
    let width = sizing.width(
        child,
        Scalar::Fraction(1),
        region.width.saturating_sub(margin.width()),
    );
    let fill = region.height.saturating_sub(margin.height());
    let height = sizing.height(child, Scalar::Auto, width, fill);
    let origin = region.offset() + margin.top_left() + style.offset;
    let overlay = style.is_overlay();

    Placement {
        region: Region::from_offset(origin, Size::new(width, height)),
        offset: Offset::ZERO,
        margin,
        widget: child.id,
        order: if overlay { TOP_Z } else { order },
        fixed: false,
        overlay,
        absolute: style.is_absolute(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::IntrinsicSizes;

    const SCREEN: Size = Size::new(80, 24);

    fn id(raw: u32) -> WidgetId {
        WidgetId::new(raw)
    }

    #[test]
    fn dock_top_and_stream_body() {
        let children = [
            Child::new(id(1), NodeStyle::new().dock(Dock::Top).height(Scalar::Cells(1))),
            Child::new(id(2), NodeStyle::new()),
        ];
        let sizes = IntrinsicSizes::new().with(id(2), Size::new(80, 23));
        let result = arrange(Layout::Stream, &children, SCREEN, SCREEN, &sizes);

        let header = result.placement(id(1)).copied().unwrap();
        assert_eq!(header.region, Region::new(0, 0, 80, 1));
        assert_eq!(header.order, TOP_Z);
        assert!(header.fixed);

        let body = result.placement(id(2)).copied().unwrap();
        assert_eq!(body.region, Region::new(0, 1, 80, 23));
        assert!(!body.fixed);
        assert_eq!(result.spacing, Spacing::new(1, 0, 0, 0));
        assert_eq!(result.scroll_region(SCREEN), Region::new(0, 1, 80, 23));
    }

    #[test]
    fn docks_stack_on_the_same_edge() {
        let children = [
            Child::new(id(1), NodeStyle::new().dock(Dock::Top).height(Scalar::Cells(1))),
            Child::new(id(2), NodeStyle::new().dock(Dock::Top).height(Scalar::Cells(2))),
            Child::new(id(3), NodeStyle::new().dock(Dock::Bottom).height(Scalar::Cells(1))),
        ];
        let result = arrange(Layout::Stream, &children, SCREEN, SCREEN, &IntrinsicSizes::new());
        assert_eq!(result.placements[0].region, Region::new(0, 0, 80, 1));
        assert_eq!(result.placements[1].region, Region::new(0, 1, 80, 2));
        assert_eq!(result.placements[2].region, Region::new(0, 23, 80, 1));
        assert_eq!(result.spacing, Spacing::new(3, 0, 1, 0));
    }

    #[test]
    fn side_docks_span_the_remaining_height() {
        let children = [
            Child::new(id(1), NodeStyle::new().dock(Dock::Top).height(Scalar::Cells(2))),
            Child::new(id(2), NodeStyle::new().dock(Dock::Left).width(Scalar::Cells(10))),
            Child::new(id(3), NodeStyle::new().dock(Dock::Right).width(Scalar::Cells(5))),
        ];
        let result = arrange(Layout::Stream, &children, SCREEN, SCREEN, &IntrinsicSizes::new());
        assert_eq!(result.placements[1].region, Region::new(0, 2, 10, 22));
        assert_eq!(result.placements[2].region, Region::new(75, 2, 5, 22));
        assert_eq!(result.spacing, Spacing::new(2, 5, 0, 10));
    }

    #[test]
    fn dock_margin_is_consumed() {
        let children = [
            Child::new(
                id(1),
                NodeStyle::new()
                    .dock(Dock::Top)
                    .height(Scalar::Cells(1))
                    .margin(Spacing::new(1, 2, 1, 2)),
            ),
            Child::new(id(2), NodeStyle::new()),
        ];
        let sizes = IntrinsicSizes::new().with(id(2), Size::new(80, 2));
        let result = arrange(Layout::Stream, &children, SCREEN, SCREEN, &sizes);
        assert_eq!(result.placements[0].region, Region::new(2, 1, 76, 1));
        assert_eq!(result.spacing.top, 3);
        assert_eq!(result.placements[1].region, Region::new(0, 3, 80, 2));
    }

    #[test]
    fn dock_keeps_style_offset() {
        let children = [Child::new(
            id(1),
            NodeStyle::new()
                .dock(Dock::Bottom)
                .height(Scalar::Cells(1))
                .offset((3, -1)),
        )];
        let result = arrange(Layout::Stream, &children, SCREEN, SCREEN, &IntrinsicSizes::new());
        let dock = result.placements[0];
        assert_eq!(dock.offset, Offset::new(3, -1));
        assert_eq!(dock.visible_region(), Region::new(3, 22, 80, 1));
    }

    #[test]
    fn fractional_docks_fill_the_box() {
        let top = [Child::new(
            id(1),
            NodeStyle::new()
                .dock(Dock::Top)
                .height(Scalar::Fraction(1))
                .margin(Spacing::new(1, 0, 1, 0)),
        )];
        let result = arrange(Layout::Stream, &top, SCREEN, SCREEN, &IntrinsicSizes::new());
        assert_eq!(result.placements[0].region, Region::new(0, 1, 80, 22));
        assert_eq!(result.spacing, Spacing::new(24, 0, 0, 0));

        let left = [Child::new(
            id(1),
            NodeStyle::new()
                .dock(Dock::Left)
                .width(Scalar::Fraction(1))
                .margin(Spacing::new(0, 2, 0, 2)),
        )];
        let result = arrange(Layout::Stream, &left, SCREEN, SCREEN, &IntrinsicSizes::new());
        assert_eq!(result.placements[0].region, Region::new(2, 0, 76, 24));
        assert_eq!(result.spacing, Spacing::new(0, 0, 0, 80));
    }

    #[test]
    fn oversized_far_edge_docks_saturate() {
        let children = [
            Child::new(
                id(1),
                NodeStyle::new()
                    .dock(Dock::Bottom)
                    .height(Scalar::Cells(i32::MAX))
                    .margin(Spacing::new(0, 0, 30, 0)),
            ),
            Child::new(
                id(2),
                NodeStyle::new()
                    .dock(Dock::Right)
                    .width(Scalar::Cells(i32::MAX))
                    .margin(Spacing::new(0, 90, 0, 0)),
            ),
        ];
        let result = arrange(Layout::Stream, &children, SCREEN, SCREEN, &IntrinsicSizes::new());
        let bottom = result.placements[0].region;
        assert_eq!(bottom.height, i32::MAX);
        assert_eq!(bottom.y, i32::MIN);
        assert_eq!(result.placements[1].region.x, i32::MIN);
        assert_eq!(result.spacing, Spacing::new(0, 80, 24, 0));
    }

    #[test]
    fn hidden_children_are_not_placed() {
        let children = [
            Child::new(id(1), NodeStyle::new().hidden()),
            Child::new(id(2), NodeStyle::new()),
            Child::new(id(3), NodeStyle::new().dock(Dock::Top).hidden()),
        ];
        let sizes = IntrinsicSizes::new().with(id(1), Size::new(80, 5));
        let result = arrange(Layout::Stream, &children, SCREEN, SCREEN, &sizes);
        assert_eq!(result.placed, HashSet::from([id(2)]));
        assert_eq!(result.placements[0].region.y, 0);
        assert!(result.spacing.is_zero());
    }

    #[test]
    fn out_of_flow_children_do_not_advance_the_flow() {
        let children = [
            Child::new(id(1), NodeStyle::new()),
            Child::new(
                id(2),
                NodeStyle::new()
                    .absolute()
                    .offset((5, 5))
                    .width(Scalar::Cells(10))
                    .height(Scalar::Cells(3)),
            ),
            Child::new(id(3), NodeStyle::new().overlay().margin(Spacing::all(1))),
            Child::new(id(4), NodeStyle::new()),
        ];
        let sizes = IntrinsicSizes::new()
            .with(id(1), Size::new(80, 2))
            .with(id(3), Size::new(20, 4))
            .with(id(4), Size::new(80, 2));
        let result = arrange(Layout::Stream, &children, SCREEN, SCREEN, &sizes);

        let ids: Vec<WidgetId> = result.placements.iter().map(|p| p.widget).collect();
        assert_eq!(ids, vec![id(1), id(2), id(3), id(4)]);

        assert_eq!(result.placements[0].region, Region::new(0, 0, 80, 2));
        assert_eq!(result.placements[3].region, Region::new(0, 2, 80, 2));

        let absolute = result.placements[1];
        assert_eq!(absolute.region, Region::new(5, 5, 10, 3));
        assert_eq!(absolute.offset, Offset::ZERO);
        assert!(absolute.absolute);
        assert_eq!(absolute.order, 0);

        let overlay = result.placements[2];
        assert_eq!(overlay.region, Region::new(1, 1, 78, 4));
        assert!(overlay.overlay);
        assert_eq!(overlay.order, TOP_Z);
    }

    #[test]
    fn fractional_overlay_height_fills_the_box() {
        let children = [Child::new(
            id(1),
            NodeStyle::new()
                .overlay()
                .height(Scalar::Fraction(1))
                .margin(Spacing::all(1)),
        )];
        let result = arrange(Layout::Stream, &children, SCREEN, SCREEN, &IntrinsicSizes::new());
        assert_eq!(result.placements[0].region, Region::new(1, 1, 78, 22));
    }

    #[test]
    fn absolute_is_relative_to_the_dock_box() {
        let children = [
            Child::new(id(1), NodeStyle::new().dock(Dock::Left).width(Scalar::Cells(10))),
            Child::new(
                id(2),
                NodeStyle::new()
                    .absolute()
                    .offset((2, 1))
                    .width(Scalar::Cells(4))
                    .height(Scalar::Cells(1)),
            ),
        ];
        let result = arrange(Layout::Stream, &children, SCREEN, SCREEN, &IntrinsicSizes::new());
        assert_eq!(result.placements[1].region, Region::new(12, 1, 4, 1));
    }

    #[test]
    fn layers_are_arranged_independently() {
        let children = [
            Child::new(id(1), NodeStyle::new().layer(1)),
            Child::new(id(2), NodeStyle::new()),
            Child::new(
                id(3),
                NodeStyle::new().layer(1).dock(Dock::Top).height(Scalar::Cells(4)),
            ),
        ];
        let sizes = IntrinsicSizes::new()
            .with(id(1), Size::new(80, 3))
            .with(id(2), Size::new(80, 3));
        let result = arrange(Layout::Stream, &children, SCREEN, SCREEN, &sizes);

        let base = result.placement(id(2)).copied().unwrap();
        assert_eq!(base.region, Region::new(0, 0, 80, 3));
        assert_eq!(base.order, 0);

        let upper = result.placement(id(1)).copied().unwrap();
        assert_eq!(upper.region, Region::new(0, 4, 80, 3));
        assert_eq!(upper.order, 1);

        assert_eq!(result.spacing.top, 4);
    }

    #[test]
    fn alignment_moves_the_flow_as_a_block() {
        let children = [Child::new(
            id(1),
            NodeStyle::new().width(Scalar::Cells(20)).height(Scalar::Cells(4)),
        )];
        let options = ArrangeOptions::new(Layout::Vertical)
            .with_align(AlignHorizontal::Center, AlignVertical::Bottom);
        let result = arrange_with(options, &children, SCREEN, SCREEN, &IntrinsicSizes::new());
        assert_eq!(result.placements[0].region, Region::new(30, 20, 20, 4));
    }

    #[test]
    fn empty_container() {
        let result = arrange(Layout::Stream, &[], SCREEN, SCREEN, &IntrinsicSizes::new());
        assert!(result.is_empty());
        assert!(result.placed.is_empty());
        assert!(result.spacing.is_zero());
    }
}
