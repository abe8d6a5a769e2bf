#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! All values are signed cell counts: regions may sit at negative offsets
//! once scrolled, and resolved sizes may overflow their container.

use std::ops::{Add, Neg, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A translation in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Offset {
    pub x: i32,
    pub y: i32,
}

impl Offset {
    /// No translation.
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Create a new offset.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Check if this offset translates anything.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.x == 0 && self.y == 0
    }
}

impl Add for Offset {
    type Output = Offset;

    fn add(self, rhs: Offset) -> Offset {
        Offset::new(self.x.saturating_add(rhs.x), self.y.saturating_add(rhs.y))
    }
}

impl Sub for Offset {
    type Output = Offset;

    fn sub(self, rhs: Offset) -> Offset {
        Offset::new(self.x.saturating_sub(rhs.x), self.y.saturating_sub(rhs.y))
    }
}

impl Neg for Offset {
    type Output = Offset;

    fn neg(self) -> Offset {
        Offset::new(self.x.saturating_neg(), self.y.saturating_neg())
    }
}

impl From<(i32, i32)> for Offset {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// A width and height in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Area in cells (zero for negative dimensions).
    #[inline]
    pub const fn area(&self) -> i64 {
        if self.width <= 0 || self.height <= 0 {
            0
        } else {
            self.width as i64 * self.height as i64
        }
    }

    /// A region of this size anchored at the origin.
    #[inline]
    pub const fn region(&self) -> Region {
        Region::new(0, 0, self.width, self.height)
    }
}

impl From<(i32, i32)> for Size {
    fn from((width, height): (i32, i32)) -> Self {
        Self::new(width, height)
    }
}

/// An axis-aligned rectangle in cell coordinates.
///
/// Origin at top-left; `right` and `bottom` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Region {
    /// Left edge (inclusive).
    pub x: i32,
    /// Top edge (inclusive).
    pub y: i32,
    /// Width in cells.
    pub width: i32,
    /// Height in cells.
    pub height: i32,
}

impl Region {
    /// Create a new region.
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a region at `offset` with the given size.
    #[inline]
    pub const fn from_offset(offset: Offset, size: Size) -> Self {
        Self::new(offset.x, offset.y, size.width, size.height)
    }

    /// Build a region from its two corners (`x2`/`y2` exclusive).
    pub fn from_corners(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self::new(x1, y1, x2.saturating_sub(x1), y2.saturating_sub(y1))
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Top-left corner.
    #[inline]
    pub const fn offset(&self) -> Offset {
        Offset::new(self.x, self.y)
    }

    /// Dimensions.
    #[inline]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Area in cells.
    #[inline]
    pub const fn area(&self) -> i64 {
        self.size().area()
    }

    /// Check if the region covers no cells.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Check if a point is inside the region.
    #[inline]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Check if `other` lies entirely inside this region.
    pub fn contains_region(&self, other: &Region) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Check if the two regions share at least one cell.
    #[inline]
    pub fn overlaps(&self, other: &Region) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Compute the intersection with another region.
    ///
    /// Returns an empty region if they don't overlap.
    #[inline]
    pub fn intersection(&self, other: &Region) -> Region {
        self.intersection_opt(other).unwrap_or_default()
    }

    /// Compute the intersection, returning `None` if there is no overlap.
    pub fn intersection_opt(&self, other: &Region) -> Option<Region> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if x < right && y < bottom {
            Some(Region::new(x, y, right - x, bottom - y))
        } else {
            None
        }
    }

    /// Smallest region containing both. Empty regions are ignored.
    pub fn union(&self, other: &Region) -> Region {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        Region::from_corners(
            self.x.min(other.x),
            self.y.min(other.y),
            self.right().max(other.right()),
            self.bottom().max(other.bottom()),
        )
    }

    /// Move the region by `offset`.
    #[inline]
    pub fn translate(&self, offset: Offset) -> Region {
        Region::new(
            self.x.saturating_add(offset.x),
            self.y.saturating_add(offset.y),
            self.width,
            self.height,
        )
    }

    /// The same size anchored at the origin.
    #[inline]
    pub const fn reset_offset(&self) -> Region {
        Region::new(0, 0, self.width, self.height)
    }

    /// Remove `spacing` from each edge. Dimensions never go below zero.
    pub fn shrink(&self, spacing: Spacing) -> Region {
        Region::new(
            self.x.saturating_add(spacing.left),
            self.y.saturating_add(spacing.top),
            self.width.saturating_sub(spacing.width()).max(0),
            self.height.saturating_sub(spacing.height()).max(0),
        )
    }

    /// Add `spacing` around each edge.
    pub fn grow(&self, spacing: Spacing) -> Region {
        Region::new(
            self.x.saturating_sub(spacing.left),
            self.y.saturating_sub(spacing.top),
            self.width.saturating_add(spacing.width()),
            self.height.saturating_add(spacing.height()),
        )
    }

    /// Spacing between this region's edges and an inner region.
    pub fn spacing_to(&self, inner: &Region) -> Spacing {
        Spacing::new(
            inner.y.saturating_sub(self.y),
            self.right().saturating_sub(inner.right()),
            self.bottom().saturating_sub(inner.bottom()),
            inner.x.saturating_sub(self.x),
        )
    }
}

impl From<(i32, i32, i32, i32)> for Region {
    fn from((x, y, width, height): (i32, i32, i32, i32)) -> Self {
        Self::new(x, y, width, height)
    }
}

/// Per-edge spacing for margins, gutters and consumed dock space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Spacing {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl Spacing {
    /// No spacing.
    pub const ZERO: Self = Self::all(0);

    /// Create new spacing with specific values.
    pub const fn new(top: i32, right: i32, bottom: i32, left: i32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Equal spacing on every edge.
    pub const fn all(val: i32) -> Self {
        Self::new(val, val, val, val)
    }

    /// Left and right only.
    pub const fn horizontal(val: i32) -> Self {
        Self::new(0, val, 0, val)
    }

    /// Top and bottom only.
    pub const fn vertical(val: i32) -> Self {
        Self::new(val, 0, val, 0)
    }

    /// Sum of left and right.
    #[inline]
    pub const fn width(&self) -> i32 {
        self.left.saturating_add(self.right)
    }

    /// Sum of top and bottom.
    #[inline]
    pub const fn height(&self) -> i32 {
        self.top.saturating_add(self.bottom)
    }

    /// Top-left offset of the content box this spacing creates.
    #[inline]
    pub const fn top_left(&self) -> Offset {
        Offset::new(self.left, self.top)
    }

    /// Per-edge maximum of two spacings.
    pub fn grow_maximum(&self, other: Spacing) -> Spacing {
        Spacing::new(
            self.top.max(other.top),
            self.right.max(other.right),
            self.bottom.max(other.bottom),
            self.left.max(other.left),
        )
    }

    /// Check if every edge is zero.
    pub const fn is_zero(&self) -> bool {
        self.top == 0 && self.right == 0 && self.bottom == 0 && self.left == 0
    }
}

impl Add for Spacing {
    type Output = Spacing;

    fn add(self, rhs: Spacing) -> Spacing {
        Spacing::new(
            self.top.saturating_add(rhs.top),
            self.right.saturating_add(rhs.right),
            self.bottom.saturating_add(rhs.bottom),
            self.left.saturating_add(rhs.left),
        )
    }
}

impl From<i32> for Spacing {
    fn from(val: i32) -> Self {
        Self::all(val)
    }
}

impl From<(i32, i32)> for Spacing {
    fn from((vertical, horizontal): (i32, i32)) -> Self {
        Self::new(vertical, horizontal, vertical, horizontal)
    }
}

impl From<(i32, i32, i32, i32)> for Spacing {
    fn from((top, right, bottom, left): (i32, i32, i32, i32)) -> Self {
        Self::new(top, right, bottom, left)
    }
}

#[cfg(test)]
mod tests {
    use super::{Offset, Region, Size, Spacing};

    #[test]
    fn region_contains_edges() {
        let region = Region::new(2, 3, 4, 5);
        assert!(region.contains(2, 3));
        assert!(region.contains(5, 7));
        assert!(!region.contains(6, 3));
        assert!(!region.contains(2, 8));
    }

    #[test]
    fn region_negative_origin() {
        let region = Region::new(-5, -2, 10, 4);
        assert_eq!(region.right(), 5);
        assert_eq!(region.bottom(), 2);
        assert!(region.contains(-5, -2));
        assert!(!region.contains(5, 0));
    }

    #[test]
    fn region_intersection_overlaps() {
        let a = Region::new(0, 0, 4, 4);
        let b = Region::new(2, 2, 4, 4);
        assert_eq!(a.intersection(&b), Region::new(2, 2, 2, 2));
        assert!(a.overlaps(&b));
    }

    #[test]
    fn touching_regions_do_not_overlap() {
        let a = Region::new(0, 0, 10, 10);
        let b = Region::new(10, 0, 10, 10);
        assert!(!a.overlaps(&b));
        assert_eq!(a.intersection(&b), Region::default());
    }

    #[test]
    fn empty_regions_overlap_nothing() {
        let a = Region::new(0, 0, 10, 10);
        assert!(!a.overlaps(&Region::new(5, 5, 0, 3)));
        assert!(!Region::new(5, 5, 3, 0).overlaps(&a));
    }

    #[test]
    fn union_ignores_empty() {
        let a = Region::new(5, 5, 2, 2);
        assert_eq!(a.union(&Region::default()), a);
        assert_eq!(Region::default().union(&a), a);
        assert_eq!(
            a.union(&Region::new(0, 0, 1, 1)),
            Region::new(0, 0, 7, 7)
        );
    }

    #[test]
    fn shrink_and_grow_round_trip() {
        let region = Region::new(0, 0, 10, 10);
        let margin = Spacing::new(1, 2, 3, 4);
        let inner = region.shrink(margin);
        assert_eq!(inner, Region::new(4, 1, 4, 6));
        assert_eq!(inner.grow(margin), region);
        assert_eq!(region.spacing_to(&inner), margin);
    }

    #[test]
    fn shrink_clamps_to_zero() {
        let inner = Region::new(0, 0, 3, 3).shrink(Spacing::all(5));
        assert_eq!(inner.width, 0);
        assert_eq!(inner.height, 0);
        assert!(inner.is_empty());
    }

    #[test]
    fn translate_and_reset() {
        let region = Region::new(3, 4, 5, 6).translate(Offset::new(-3, 1));
        assert_eq!(region, Region::new(0, 5, 5, 6));
        assert_eq!(region.reset_offset(), Region::new(0, 0, 5, 6));
    }

    #[test]
    fn spacing_sums_and_maximum() {
        let a = Spacing::new(1, 2, 3, 4);
        assert_eq!(a.width(), 6);
        assert_eq!(a.height(), 4);
        assert_eq!(
            a.grow_maximum(Spacing::new(2, 0, 5, 1)),
            Spacing::new(2, 2, 5, 4)
        );
        assert_eq!(a + Spacing::all(1), Spacing::new(2, 3, 4, 5));
        assert_eq!(Spacing::from((1, 2)), Spacing::new(1, 2, 1, 2));
    }

    #[test]
    fn size_area_and_region() {
        assert_eq!(Size::new(80, 24).area(), 1920);
        assert_eq!(Size::new(-1, 24).area(), 0);
        assert_eq!(Size::new(80, 24).region(), Region::new(0, 0, 80, 24));
    }

    #[test]
    fn offset_arithmetic() {
        let a = Offset::new(3, -2);
        assert_eq!(a + Offset::new(1, 1), Offset::new(4, -1));
        assert_eq!(a - a, Offset::ZERO);
        assert_eq!(-a, Offset::new(-3, 2));
        assert!(Offset::ZERO.is_zero());
    }
}
