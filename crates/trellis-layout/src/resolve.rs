#![forbid(unsafe_code)]

//! One-dimensional size resolution.
//!
//! [`layout_resolve`] splits a total length between edges that are either
//! fixed, or flexible with a relative `fraction` and a `min_size` floor.
//!
//! # Algorithm
//!
//! 1. Fixed edges take their size unconditionally.
//! 2. If nothing is left for the flexible edges, each gets its `min_size`
//!    and the result overflows `total`. Clipping is the caller's job.
//! 3. Otherwise the remaining space is shared by fraction. The share is kept
//!    as an exact rational `remaining / Σfraction`; any edge whose share
//!    falls below its `min_size` is pinned there and the split restarts
//!    without it. Each restart pins one edge, so there are at most N passes.
//! 4. Shares are floored in input order, carrying the fractional remainder
//!    into the next edge. The carried remainder is zero after the last edge,
//!    so flexible sizes sum exactly to the remaining space.
//!
//! # Example
//!
//! ```
//! use trellis_layout::{EdgeSpec, layout_resolve};
//!
//! let sizes = layout_resolve(100, &[EdgeSpec::fraction(2), EdgeSpec::fraction(1)]);
//! assert_eq!(sizes, vec![66, 34]);
//! ```

use trellis_core::trace;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One dimension of one child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EdgeSpec {
    /// Fixed size in cells. `None`, zero and negative values mean flexible.
    pub size: Option<i32>,
    /// Weight among flexible edges. Values below 1 count as 1.
    pub fraction: i32,
    /// Smallest size a flexible edge may receive.
    pub min_size: i32,
}

impl Default for EdgeSpec {
    fn default() -> Self {
        Self {
            size: None,
            fraction: 1,
            min_size: 1,
        }
    }
}

impl EdgeSpec {
    /// A fixed edge.
    #[inline]
    pub const fn fixed(size: i32) -> Self {
        Self {
            size: Some(size),
            fraction: 1,
            min_size: 1,
        }
    }

    /// A flexible edge with the given weight.
    #[inline]
    pub const fn fraction(fraction: i32) -> Self {
        Self {
            size: None,
            fraction,
            min_size: 1,
        }
    }

    /// A flexible edge of weight 1 that never shrinks below `min_size`.
    #[inline]
    pub const fn min(min_size: i32) -> Self {
        Self {
            size: None,
            fraction: 1,
            min_size,
        }
    }

    /// Replace the minimum size.
    #[inline]
    pub const fn with_min_size(mut self, min_size: i32) -> Self {
        self.min_size = min_size;
        self
    }

    /// The fixed size, if this edge has one.
    #[inline]
    pub fn fixed_size(&self) -> Option<i32> {
        self.size.filter(|&size| size > 0)
    }

    #[inline]
    fn weight(&self) -> i128 {
        i128::from(self.fraction.max(1))
    }
}

/// Resolve `edges` against `total`, returning one size per edge.
///
/// Never fails: when the space is too small, flexible edges fall back to
/// their `min_size` and the sizes may add up to more than `total`.
pub fn layout_resolve(total: i32, edges: &[EdgeSpec]) -> Vec<i32> {
    resolve_counting_passes(total, edges).0
}

/// Number of distribution passes [`layout_resolve`] makes for `edges`.
///
/// Each pass either pins one edge to its minimum or performs the final
/// split, so the count never exceeds `edges.len()`.
pub fn resolve_passes(total: i32, edges: &[EdgeSpec]) -> usize {
    resolve_counting_passes(total, edges).1
}

fn resolve_counting_passes(total: i32, edges: &[EdgeSpec]) -> (Vec<i32>, usize) {
    let mut sizes: Vec<Option<i32>> = edges.iter().map(EdgeSpec::fixed_size).collect();
    if sizes.iter().all(Option::is_some) {
        return (sizes.into_iter().flatten().collect(), 0);
    }

    let fixed_total: i64 = sizes.iter().flatten().map(|&size| i64::from(size)).sum();
    let mut remaining = i128::from(i64::from(total) - fixed_total);
    if remaining <= 0 {
        trace!(
            total,
            edges = edges.len(),
            "no space left for flexible edges, using minimum sizes"
        );
        let sizes = sizes
            .iter()
            .zip(edges)
            .map(|(size, edge)| size.unwrap_or(edge.min_size))
            .collect();
        return (sizes, 0);
    }

    let mut flexible: Vec<usize> = sizes
        .iter()
        .enumerate()
        .filter_map(|(index, size)| size.is_none().then_some(index))
        .collect();
    let mut denominator: i128 = flexible.iter().map(|&index| edges[index].weight()).sum();
    let mut passes = 0usize;

    while !flexible.is_empty() {
        passes += 1;
        debug_assert!(
            passes <= edges.len(),
            "minimum size pinning did not converge after {passes} passes"
        );

        // The share of an edge is remaining * weight / denominator; compare
        // it against min_size without leaving integer arithmetic.
        let pinned = flexible.iter().position(|&index| {
            let edge = &edges[index];
            remaining * edge.weight() < i128::from(edge.min_size) * denominator
        });

        match pinned {
            Some(position) => {
                let index = flexible.remove(position);
                let edge = &edges[index];
                sizes[index] = Some(edge.min_size);
                remaining -= i128::from(edge.min_size);
                denominator -= edge.weight();
            }
            None => {
                let mut carry: i128 = 0;
                for &index in &flexible {
                    let numerator = remaining * edges[index].weight() + carry;
                    sizes[index] = Some(clamp_to_i32(numerator.div_euclid(denominator)));
                    carry = numerator.rem_euclid(denominator);
                }
                break;
            }
        }
    }

    trace!(total, edges = edges.len(), passes, "resolved flexible edges");
    (sizes.into_iter().map(|size| size.unwrap_or(0)).collect(), passes)
}

#[inline]
fn clamp_to_i32(value: i128) -> i32 {
    value.clamp(i128::from(i32::MIN), i128::from(i32::MAX)) as i32
}
