#![forbid(unsafe_code)]

//! Grid-bucketed spatial index over regions.
//!
//! Answers "which values overlap this region" for compositing and hit
//! testing without scanning every entry.
//!
//! # Design
//!
//! - **Uniform grid**: the plane is divided into `cell_width` x
//!   `cell_height` buckets. Bucket coordinates use floor division, so
//!   negative coordinates land in negative buckets.
//! - **Bucket lists**: each bucket stores indices of the entries whose
//!   region touches it. The grid is sparse and unbounded.
//! - **Fixed entries**: entries that do not scroll (docks) live outside the
//!   grid. They are checked linearly and reported ahead of bucketed values.
//!
//! # Invariants
//!
//! 1. Insert and query compute bucket ranges with the same function.
//! 2. Query results are deduplicated and keep first-seen order.
//! 3. Every returned value overlaps the query region.
//! 4. Empty regions are never bucketed and never match.
//!
//! # Example
//!
//! ```
//! use trellis_core::Region;
//! use trellis_render::{SpatialEntry, SpatialMap};
//!
//! let mut map = SpatialMap::new(10, 10);
//! map.insert([
//!     SpatialEntry::new(Region::new(0, 0, 10, 10), "a"),
//!     SpatialEntry::new(Region::new(10, 10, 10, 10), "b"),
//! ]);
//! assert_eq!(map.get_values_in_region(Region::new(0, 0, 11, 11)), vec!["a", "b"]);
//! assert!(map.get_values_in_region(Region::new(50, 50, 5, 5)).is_empty());
//! ```

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use trellis_core::geometry::Region;
use trellis_core::{debug_span, trace, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for a [`SpatialMap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpatialMapConfig {
    /// Bucket width in cells (default: 100). Values below 1 count as 1.
    pub cell_width: i32,

    /// Bucket height in cells (default: 20). Values below 1 count as 1.
    pub cell_height: i32,

    /// Entries per bucket before logging a warning (default: 64).
    pub bucket_warn_threshold: usize,
}

impl Default for SpatialMapConfig {
    fn default() -> Self {
        Self {
            cell_width: 100,
            cell_height: 20,
            bucket_warn_threshold: 64,
        }
    }
}

impl SpatialMapConfig {
    #[must_use]
    pub fn with_cell_size(mut self, cell_width: i32, cell_height: i32) -> Self {
        self.cell_width = cell_width;
        self.cell_height = cell_height;
        self
    }

    #[must_use]
    pub fn with_bucket_warn_threshold(mut self, threshold: usize) -> Self {
        self.bucket_warn_threshold = threshold;
        self
    }
}

// ---------------------------------------------------------------------------
// Entries
// ---------------------------------------------------------------------------

/// A value and the region it occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpatialEntry<V> {
    pub region: Region,
    /// Pinned to the viewport; kept out of the grid.
    pub fixed: bool,
    /// Painted above the container; excluded from the scrollable extent.
    pub overlay: bool,
    pub value: V,
}

impl<V> SpatialEntry<V> {
    /// A scrolling, non-overlay entry.
    pub const fn new(region: Region, value: V) -> Self {
        Self {
            region,
            fixed: false,
            overlay: false,
            value,
        }
    }

    #[must_use]
    pub fn fixed(mut self) -> Self {
        self.fixed = true;
        self
    }

    #[must_use]
    pub fn overlay(mut self) -> Self {
        self.overlay = true;
        self
    }
}

impl<V> From<(Region, V)> for SpatialEntry<V> {
    fn from((region, value): (Region, V)) -> Self {
        Self::new(region, value)
    }
}

// ---------------------------------------------------------------------------
// SpatialMap
// ---------------------------------------------------------------------------

type Bucket = (i32, i32);

/// Spatial index from regions to values.
///
/// `insert` and `clear` take `&mut self`, queries take `&self`: one writer
/// or many readers, enforced by the borrow checker.
#[derive(Debug, Clone)]
pub struct SpatialMap<V> {
    config: SpatialMapConfig,

    /// Every inserted entry; bucket lists index into this.
    entries: Vec<SpatialEntry<V>>,

    /// Sparse grid of bucket coordinates to entry indices.
    buckets: HashMap<Bucket, Vec<usize>>,

    /// Indices of fixed entries, in insertion order.
    fixed: Vec<usize>,

    /// Union of non-fixed, non-overlay regions.
    total_region: Region,
}

impl<V> Default for SpatialMap<V> {
    fn default() -> Self {
        Self::with_config(SpatialMapConfig::default())
    }
}

impl<V> SpatialMap<V> {
    /// Create an index with buckets of `cell_width` x `cell_height` cells.
    pub fn new(cell_width: i32, cell_height: i32) -> Self {
        Self::with_config(SpatialMapConfig::default().with_cell_size(cell_width, cell_height))
    }

    pub fn with_config(config: SpatialMapConfig) -> Self {
        let config = SpatialMapConfig {
            cell_width: config.cell_width.max(1),
            cell_height: config.cell_height.max(1),
            ..config
        };
        Self {
            config,
            entries: Vec::new(),
            buckets: HashMap::new(),
            fixed: Vec::new(),
            total_region: Region::default(),
        }
    }

    pub fn config(&self) -> &SpatialMapConfig {
        &self.config
    }

    /// Index `entries`.
    pub fn insert(&mut self, entries: impl IntoIterator<Item = SpatialEntry<V>>) {
        let _span = debug_span!("spatial_map.insert", existing = self.entries.len()).entered();

        for entry in entries {
            let index = self.entries.len();

            if entry.fixed {
                self.fixed.push(index);
            } else {
                if !entry.overlay {
                    self.total_region = self.total_region.union(&entry.region);
                }
                self.add_to_buckets(index, entry.region);
            }
            self.entries.push(entry);
        }

        trace!(
            entries = self.entries.len(),
            buckets = self.buckets.len(),
            "spatial map updated"
        );
    }

    /// Union of every scrolling, non-overlay region inserted so far.
    pub fn total_region(&self) -> Region {
        self.total_region
    }

    /// Values of fixed entries in insertion order, wherever they are.
    pub fn fixed_values(&self) -> impl Iterator<Item = &V> + '_ {
        self.fixed.iter().map(|&index| &self.entries[index].value)
    }

    /// Number of inserted entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove every entry, keeping the configuration.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.buckets.clear();
        self.fixed.clear();
        self.total_region = Region::default();
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Inclusive bucket range covered by a non-empty region.
    #[inline]
    fn bucket_range(&self, region: Region) -> (Bucket, Bucket) {
        let (cw, ch) = (self.config.cell_width, self.config.cell_height);
        let right = region.right().saturating_sub(1);
        let bottom = region.bottom().saturating_sub(1);
        (
            (region.x.div_euclid(cw), region.y.div_euclid(ch)),
            (right.div_euclid(cw), bottom.div_euclid(ch)),
        )
    }

    fn add_to_buckets(&mut self, index: usize, region: Region) {
        if region.is_empty() {
            return;
        }
        let ((x0, y0), (x1, y1)) = self.bucket_range(region);
        for by in y0..=y1 {
            for bx in x0..=x1 {
                let bucket = self.buckets.entry((bx, by)).or_default();
                bucket.push(index);
                if bucket.len() == self.config.bucket_warn_threshold + 1 {
                    warn!(
                        bucket_x = bx,
                        bucket_y = by,
                        entries = bucket.len(),
                        threshold = self.config.bucket_warn_threshold,
                        "spatial bucket over threshold; consider a smaller cell size"
                    );
                }
            }
        }
    }
}

impl<V: Clone + Eq + Hash> SpatialMap<V> {
    /// Values whose region overlaps `query`, fixed entries first.
    ///
    /// Each value appears once, in the order it was first encountered.
    pub fn get_values_in_region(&self, query: Region) -> Vec<V> {
        let _span = debug_span!(
            "spatial_map.query",
            x = query.x,
            y = query.y,
            width = query.width,
            height = query.height
        )
        .entered();

        let mut seen: HashSet<&V> = HashSet::new();
        let mut values = Vec::new();
        if query.is_empty() {
            return values;
        }

        for &index in &self.fixed {
            let entry = &self.entries[index];
            if entry.region.overlaps(&query) && seen.insert(&entry.value) {
                values.push(entry.value.clone());
            }
        }

        // Broad phase: every entry in a touched bucket, once.
        let ((x0, y0), (x1, y1)) = self.bucket_range(query);
        let mut candidates: Vec<usize> = Vec::new();
        let mut visited: HashSet<usize> = HashSet::new();
        for by in y0..=y1 {
            for bx in x0..=x1 {
                let Some(bucket) = self.buckets.get(&(bx, by)) else {
                    continue;
                };
                let fresh = bucket.iter().copied().filter(|&index| visited.insert(index));
                candidates.extend(fresh);
            }
        }
        candidates.sort_unstable();

        // Narrow phase.
        for index in candidates {
            let entry = &self.entries[index];
            if entry.region.overlaps(&query) && seen.insert(&entry.value) {
                values.push(entry.value.clone());
            }
        }

        trace!(results = values.len(), "spatial map query");
        values
    }
}

impl<V> Extend<SpatialEntry<V>> for SpatialMap<V> {
    fn extend<I: IntoIterator<Item = SpatialEntry<V>>>(&mut self, iter: I) {
        self.insert(iter);
    }
}

impl<V> FromIterator<SpatialEntry<V>> for SpatialMap<V> {
    fn from_iter<I: IntoIterator<Item = SpatialEntry<V>>>(iter: I) -> Self {
        let mut map = Self::default();
        map.insert(iter);
        map
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
