#![forbid(unsafe_code)]

//! Row-wise merging of rectangles into horizontal spans.
//!
//! Selection highlighting and damage tracking both want "which columns of
//! each row are covered" rather than a pile of overlapping rectangles.
//! [`inline_ranges`] answers that with one [`InlineRange`] per maximal run.
//!
//! # Algorithm
//!
//! 1. Every row touched by a region collects the half-open interval
//!    `[x, x + width)`; empty regions contribute nothing.
//! 2. Rows are visited in ascending order. Each row's intervals are sorted
//!    by start and swept once; an interval that overlaps or touches the
//!    current run extends it.
//! 3. Runs are emitted with an inclusive `end`.
//!
//! Step 1 happens up front; steps 2 and 3 run lazily, one row at a time.
//!
//! # Usage
//!
//! ```
//! use trellis_core::Region;
//! use trellis_render::{InlineRange, inline_ranges};
//!
//! let ranges: Vec<InlineRange> = inline_ranges([Region::new(0, 0, 3, 2)]).collect();
//! assert_eq!(ranges, vec![InlineRange::new(0, 0, 2), InlineRange::new(1, 0, 2)]);
//! ```

use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::iter::FusedIterator;
use std::sync::Arc;

use trellis_core::geometry::Region;
use trellis_core::{debug_span, trace};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A run of covered cells on one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InlineRange {
    /// Row index.
    pub row: i32,
    /// Start column (inclusive).
    pub start: i32,
    /// End column (inclusive).
    pub end: i32,
}

impl InlineRange {
    #[inline]
    pub const fn new(row: i32, start: i32, end: i32) -> Self {
        debug_assert!(start <= end);
        Self { row, start, end }
    }

    /// Number of cells in this run.
    #[inline]
    pub const fn len(&self) -> i32 {
        self.end - self.start + 1
    }

    /// Check if this run is empty (never produced by [`inline_ranges`]).
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.end < self.start
    }

    /// The run as a one-row region.
    #[inline]
    pub const fn region(&self) -> Region {
        Region::new(self.start, self.row, self.len(), 1)
    }
}

/// One row's half-open intervals, sorted by start.
#[derive(Debug)]
struct Row {
    row: i32,
    spans: Vec<(i32, i32)>,
}

/// Iterator over merged [`InlineRange`]s in row-major, start-ascending order.
///
/// Cloning is cheap: the collected rows are shared, and a clone resumes from
/// the same position.
#[derive(Debug, Clone)]
pub struct InlineRanges {
    rows: Arc<[Row]>,
    next_row: usize,
    /// Merged runs of the current row, reversed for popping.
    pending: Vec<InlineRange>,
}

impl InlineRanges {
    fn new(rows: Vec<Row>) -> Self {
        Self {
            rows: rows.into(),
            next_row: 0,
            pending: Vec::new(),
        }
    }

    fn merge_row(&mut self, row: usize) {
        let Row { row, spans } = &self.rows[row];
        let row = *row;
        let mut runs = spans.iter().copied();
        let Some((mut start, mut end)) = runs.next() else {
            return;
        };
        for (x0, x1) in runs {
            if x0 <= end {
                end = end.max(x1);
            } else {
                self.pending.push(InlineRange::new(row, start, end - 1));
                (start, end) = (x0, x1);
            }
        }
        self.pending.push(InlineRange::new(row, start, end - 1));
        self.pending.reverse();
    }
}

impl Iterator for InlineRanges {
    type Item = InlineRange;

    fn next(&mut self) -> Option<InlineRange> {
        loop {
            if let Some(range) = self.pending.pop() {
                return Some(range);
            }
            if self.next_row >= self.rows.len() {
                return None;
            }
            let row = self.next_row;
            self.next_row += 1;
            self.merge_row(row);
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = &self.rows[self.next_row.min(self.rows.len())..];
        let upper: usize = rest.iter().map(|row| row.spans.len()).sum();
        (
            self.pending.len() + rest.len(),
            Some(self.pending.len() + upper),
        )
    }
}

impl FusedIterator for InlineRanges {}

/// Merge `regions` into per-row spans.
///
/// The result is a lazy iterator; clone it to walk the ranges again.
pub fn inline_ranges<I>(regions: I) -> InlineRanges
where
    I: IntoIterator,
    I::Item: Borrow<Region>,
{
    let _span = debug_span!("inline_ranges").entered();

    let mut rows: BTreeMap<i32, Vec<(i32, i32)>> = BTreeMap::new();
    for region in regions {
        let region: &Region = region.borrow();
        if region.is_empty() {
            continue;
        }
        let span = (region.x, region.right());
        for y in region.y..region.bottom() {
            rows.entry(y).or_default().push(span);
        }
    }

    trace!(rows = rows.len(), "collected inline spans");
    InlineRanges::new(
        rows.into_iter()
            .map(|(row, mut spans)| {
                spans.sort_unstable();
                Row { row, spans }
            })
            .collect(),
    )
}

/// A reusable collection of regions to merge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionMerger {
    regions: Vec<Region>,
}

impl RegionMerger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, region: Region) -> &mut Self {
        self.regions.push(region);
        self
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn clear(&mut self) {
        self.regions.clear();
    }

    /// A fresh iterator over the merged spans of every region added so far.
    pub fn inline_ranges(&self) -> InlineRanges {
        inline_ranges(&self.regions)
    }
}

impl FromIterator<Region> for RegionMerger {
    fn from_iter<I: IntoIterator<Item = Region>>(iter: I) -> Self {
        Self {
            regions: iter.into_iter().collect(),
        }
    }
}

impl Extend<Region> for RegionMerger {
    fn extend<I: IntoIterator<Item = Region>>(&mut self, iter: I) {
        self.regions.extend(iter);
    }
}
