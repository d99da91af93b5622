//! Rank ordering utilities for monotone regression.
//!
//! ## Purpose
//!
//! This module orders regression terms by their dissimilarity and groups
//! equal dissimilarities into tie blocks. The ordering depends only on the
//! canonical dissimilarities, so it is computed once per run and reused by
//! every regression call.
//!
//! ## Design notes
//!
//! * **Stability**: Uses stable sorting so equal values keep their insertion order.
//! * **Robustness**: Incomparable values (NaN) compare as equal instead of panicking.
//!
//! ## Invariants
//!
//! * The returned order is a permutation of the input positions.
//! * Tie blocks are contiguous, non-empty, and cover the whole order.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

// External dependencies
use core::cmp::Ordering;
use core::ops::Range;
use num_traits::Float;

// ============================================================================
// Data Structures
// ============================================================================

/// Terms of one regression group in ascending dissimilarity order.
#[derive(Debug, Clone, Default)]
pub struct RankedGroup {
    /// Term indices sorted by dissimilarity.
    pub order: Vec<usize>,

    /// Ranges into `order` whose dissimilarities are equal.
    pub ties: Vec<Range<usize>>,
}

// ============================================================================
// Sorting Functions
// ============================================================================

/// Sort `terms` by `value(term)` ascending and split the result into tie blocks.
///
/// 1. Checks if the terms are already ordered (fast path).
/// 2. Performs a stable sort keyed on the dissimilarity.
/// 3. Scans once for runs of equal values.
pub fn rank_terms<T, F>(terms: Vec<usize>, value: F) -> RankedGroup
where
    T: Float,
    F: Fn(usize) -> T,
{
    let mut order = terms;

    let is_sorted = order.windows(2).all(|w| value(w[0]) <= value(w[1]));
    if !is_sorted {
        order.sort_by(|&a, &b| value(a).partial_cmp(&value(b)).unwrap_or(Ordering::Equal));
    }

    let mut ties = Vec::new();
    let mut start = 0;
    for k in 1..=order.len() {
        if k == order.len() || value(order[k]) != value(order[start]) {
            ties.push(start..k);
            start = k;
        }
    }

    RankedGroup { order, ties }
}
