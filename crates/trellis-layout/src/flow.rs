#![forbid(unsafe_code)]

//! Flow algorithms for a container's in-flow children.
//!
//! Every layout returns placements relative to the top-left of the box it
//! was given; the arrangement pass translates them afterwards.
//!
//! Adjacent margins along the flow axis collapse to the larger of the two,
//! the way block margins do.

use trellis_core::geometry::{Region, Size};

use crate::arrange::Child;
use crate::box_model::Sizing;
use crate::measure::ContentMeasure;
use crate::placement::Placement;
use crate::resolve::{EdgeSpec, layout_resolve};
use crate::style::Scalar;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The flow algorithm a container applies to its in-flow children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Layout {
    /// Top to bottom, each child as tall as its content.
    #[default]
    Stream,
    /// Top to bottom, honoring `height` styles; fractional heights share
    /// the leftover space.
    Vertical,
    /// Left to right, honoring `width` styles; unspecified and fractional
    /// widths share the leftover space.
    Horizontal,
}

impl Layout {
    /// Style keyword for this layout.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Layout::Stream => "stream",
            Layout::Vertical => "vertical",
            Layout::Horizontal => "horizontal",
        }
    }

    /// Arrange `children` inside a box of `size`.
    pub fn arrange<M: ContentMeasure + ?Sized>(
        self,
        children: &[&Child],
        size: Size,
        viewport: Size,
        measure: &M,
    ) -> Vec<Placement> {
        if children.is_empty() {
            return Vec::new();
        }
        let sizing = Sizing::new(size, viewport, measure);
        match self {
            Layout::Stream => arrange_stream(children, &sizing),
            Layout::Vertical => arrange_vertical(children, &sizing),
            Layout::Horizontal => arrange_horizontal(children, &sizing),
        }
    }
}

/// Space before each item after collapsing, plus the trailing margin.
fn collapsed_gaps(margins: impl Iterator<Item = (i32, i32)>) -> (Vec<i32>, i32) {
    let mut gaps = Vec::new();
    let mut previous: Option<i32> = None;
    for (leading, trailing) in margins {
        gaps.push(previous.map_or(leading, |previous| leading.max(previous)));
        previous = Some(trailing);
    }
    (gaps, previous.unwrap_or(0))
}

fn arrange_stream<M: ContentMeasure + ?Sized>(
    children: &[&Child],
    sizing: &Sizing<'_, M>,
) -> Vec<Placement> {
    let width = sizing.container.width;
    let mut placements = Vec::with_capacity(children.len());
    let mut y = 0i32;
    let mut previous_margin = 0i32;

    for child in children {
        let style = &child.style;
        let margin = style.margin;
        y = y.saturating_add(margin.top.max(previous_margin));
        previous_margin = margin.bottom;

        let box_width = width.saturating_sub(margin.width()).max(0);
        let mut height = sizing.content_height(child, box_width);
        if let Some(Scalar::Cells(max_height)) = style.max_height {
            height = height.min(max_height);
        }
        let height = height.max(0);

        placements.push(
            Placement::new(Region::new(margin.left, y, box_width, height), child.id)
                .with_margin(margin)
                .with_offset(style.offset),
        );
        y = y.saturating_add(height);
    }

    placements
}

fn arrange_vertical<M: ContentMeasure + ?Sized>(
    children: &[&Child],
    sizing: &Sizing<'_, M>,
) -> Vec<Placement> {
    let size = sizing.container;
    let (gaps, trailing) = collapsed_gaps(
        children
            .iter()
            .map(|child| (child.style.margin.top, child.style.margin.bottom)),
    );
    let margin_total = gaps
        .iter()
        .fold(trailing, |total, &gap| total.saturating_add(gap));

    let widths: Vec<i32> = children
        .iter()
        .map(|child| {
            let fill = size.width.saturating_sub(child.style.margin.width());
            sizing.width(child, Scalar::Fraction(1), fill)
        })
        .collect();

    let mut heights = vec![0i32; children.len()];
    let mut flexible = Vec::new();
    let mut edges = Vec::new();
    let mut fixed_total = 0i32;
    for (index, child) in children.iter().enumerate() {
        match child.style.height.unwrap_or(Scalar::Auto) {
            Scalar::Fraction(fraction) => {
                flexible.push(index);
                let min_size = sizing.min_height(child).unwrap_or(1);
                edges.push(EdgeSpec::fraction(fraction).with_min_size(min_size));
            }
            _ => {
                let height = sizing.height(child, Scalar::Auto, widths[index], 0);
                heights[index] = height;
                fixed_total = fixed_total.saturating_add(height);
            }
        }
    }

    if !flexible.is_empty() {
        let remaining = size
            .height
            .saturating_sub(margin_total)
            .saturating_sub(fixed_total);
        for (&index, height) in flexible.iter().zip(layout_resolve(remaining, &edges)) {
            heights[index] = sizing.clamp_height(children[index], height);
        }
    }

    let mut placements = Vec::with_capacity(children.len());
    let mut y = 0i32;
    for (index, child) in children.iter().enumerate() {
        y = y.saturating_add(gaps[index]);
        let margin = child.style.margin;
        placements.push(
            Placement::new(
                Region::new(margin.left, y, widths[index], heights[index]),
                child.id,
            )
            .with_margin(margin)
            .with_offset(child.style.offset),
        );
        y = y.saturating_add(heights[index]);
    }
    placements
}

fn arrange_horizontal<M: ContentMeasure + ?Sized>(
    children: &[&Child],
    sizing: &Sizing<'_, M>,
) -> Vec<Placement> {
    let size = sizing.container;
    let (gaps, trailing) = collapsed_gaps(
        children
            .iter()
            .map(|child| (child.style.margin.left, child.style.margin.right)),
    );
    let margin_total = gaps
        .iter()
        .fold(trailing, |total, &gap| total.saturating_add(gap));

    let mut widths = vec![0i32; children.len()];
    let mut flexible = Vec::new();
    let mut edges = Vec::new();
    let mut fixed_total = 0i32;
    for (index, child) in children.iter().enumerate() {
        match child.style.width.unwrap_or(Scalar::Fraction(1)) {
            Scalar::Fraction(fraction) => {
                flexible.push(index);
                let min_size = sizing.min_width(child).unwrap_or(1);
                edges.push(EdgeSpec::fraction(fraction).with_min_size(min_size));
            }
            _ => {
                let width = sizing.width(child, Scalar::Auto, 0);
                widths[index] = width;
                fixed_total = fixed_total.saturating_add(width);
            }
        }
    }

    if !flexible.is_empty() {
        let remaining = size
            .width
            .saturating_sub(margin_total)
            .saturating_sub(fixed_total);
        for (&index, width) in flexible.iter().zip(layout_resolve(remaining, &edges)) {
            widths[index] = sizing.clamp_width(children[index], width);
        }
    }

    let mut placements = Vec::with_capacity(children.len());
    let mut x = 0i32;
    for (index, child) in children.iter().enumerate() {
        x = x.saturating_add(gaps[index]);
        let margin = child.style.margin;
        let fill = size.height.saturating_sub(margin.height());
        let height = sizing.height(child, Scalar::Fraction(1), widths[index], fill);
        placements.push(
            Placement::new(Region::new(x, margin.top, widths[index], height), child.id)
                .with_margin(margin)
                .with_offset(child.style.offset),
        );
        x = x.saturating_add(widths[index]);
    }
    placements
}
