//! Monotone regression of fitted distances on dissimilarities.
//!
//! ## Purpose
//!
//! This module computes the disparities that stress compares fitted
//! distances against. In nonmetric mode the disparities are the least-squares
//! non-decreasing step function of the dissimilarities (pool-adjacent-violators);
//! in metric mode they are the least-squares ratio transform `b * delta`.
//!
//! ## Design notes
//!
//! * **Precomputed ranks**: The rank order and tie blocks depend only on the
//!   dissimilarities, so they are built once and reused every iteration.
//! * **Stack PAVA**: Blocks are pushed in rank order and merged backwards while
//!   they violate monotonicity, giving a single O(P) pass.
//! * **Caller scratch**: Block values and sizes live in caller-provided buffers.
//!
//! ## Key concepts
//!
//! * **Term**: One disparity. GLOBAL mode has one term per pair. LOCAL mode has
//!   two per pair: term `2p` belongs to the row of the smaller index and term
//!   `2p + 1` to the row of the larger one.
//! * **Group**: Terms fitted by one monotone mapping. GLOBAL mode has a single
//!   group; LOCAL mode has one group per row.
//! * **Primary tie approach**: Equal dissimilarities form one block whose
//!   disparities all equal the mean of its distances.
//!
//! ## Invariants
//!
//! * Disparities are non-decreasing in dissimilarity rank within each group.
//! * Every term of a tie block receives the same disparity.
//! * In nonmetric mode each group's disparity sum equals its distance sum.
//!
//! ## Non-goals
//!
//! * This module does not compute distances or stress.
//! * This module does not implement the secondary tie approach.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::algorithms::proximity::CanonicalDissimilarities;
use crate::primitives::sorting::{RankedGroup, rank_terms};

// ============================================================================
// Monotonicity Mode
// ============================================================================

/// Scope of the monotone mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MonotonicityMode {
    /// One mapping over all pairs.
    #[default]
    Global,

    /// One mapping per row (variable).
    Local,
}

impl MonotonicityMode {
    /// Number of disparities per pair.
    #[inline]
    pub fn terms_per_pair(self) -> usize {
        match self {
            Self::Global => 1,
            Self::Local => 2,
        }
    }
}

// ============================================================================
// Regression Engine
// ============================================================================

/// Reusable regression plan for one set of canonical dissimilarities.
#[derive(Debug, Clone)]
pub struct MonotoneRegression<T> {
    mode: MonotonicityMode,
    metric: bool,
    deltas: Vec<T>,
    groups: Vec<RankedGroup>,
}

impl<T: Float> MonotoneRegression<T> {
    /// Build the rank order and tie blocks of every group.
    pub fn new(dissim: &CanonicalDissimilarities<T>, mode: MonotonicityMode, metric: bool) -> Self {
        let k = mode.terms_per_pair();
        let deltas: Vec<T> = dissim
            .pairs
            .iter()
            .flat_map(|p| core::iter::repeat(p.value).take(k))
            .collect();

        let groups = match mode {
            MonotonicityMode::Global => {
                vec![rank_terms((0..deltas.len()).collect(), |t| deltas[t])]
            }
            MonotonicityMode::Local => {
                let mut rows: Vec<Vec<usize>> = vec![Vec::new(); dissim.points()];
                for (p, pair) in dissim.pairs.iter().enumerate() {
                    rows[pair.i].push(2 * p);
                    rows[pair.j].push(2 * p + 1);
                }
                rows.into_iter()
                    .filter(|terms| !terms.is_empty())
                    .map(|terms| rank_terms(terms, |t| deltas[t]))
                    .collect()
            }
        };

        Self {
            mode,
            metric,
            deltas,
            groups,
        }
    }

    /// Number of disparities per pair.
    #[inline]
    pub fn terms_per_pair(&self) -> usize {
        self.mode.terms_per_pair()
    }

    /// Total number of disparities.
    #[inline]
    pub fn terms(&self) -> usize {
        self.deltas.len()
    }

    /// Pair index of term `t`.
    #[inline]
    fn pair_of(&self, t: usize) -> usize {
        t / self.terms_per_pair()
    }

    /// Regression groups in rank order.
    pub fn groups(&self) -> &[RankedGroup] {
        &self.groups
    }

    /// Compute disparities for `distances` (one per pair) into `out` (one per term).
    ///
    /// `values` and `sizes` are scratch buffers of at least `terms()` elements.
    pub fn fit(&self, distances: &[T], out: &mut [T], values: &mut [T], sizes: &mut [usize]) {
        for group in &self.groups {
            if self.metric {
                self.fit_ratio(group, distances, out);
            } else {
                self.fit_monotone(group, distances, out, values, sizes);
            }
        }
    }

    /// Pool-adjacent-violators over the tie blocks of one group.
    fn fit_monotone(
        &self,
        group: &RankedGroup,
        distances: &[T],
        out: &mut [T],
        values: &mut [T],
        sizes: &mut [usize],
    ) {
        let mut top = 0;

        for tie in &group.ties {
            let sum = group.order[tie.clone()]
                .iter()
                .fold(T::zero(), |acc, &t| acc + distances[self.pair_of(t)]);
            let count = tie.len();

            values[top] = sum / T::from(count).unwrap_or_else(T::one);
            sizes[top] = count;
            top += 1;

            // Merge backwards while the last two blocks violate monotonicity.
            while top > 1 && values[top - 2] > values[top - 1] {
                let (w1, w2) = (sizes[top - 2], sizes[top - 1]);
                let total = T::from(w1 + w2).unwrap_or_else(T::one);
                let wa = T::from(w1).unwrap_or_else(T::one);
                let wb = T::from(w2).unwrap_or_else(T::one);
                values[top - 2] = (values[top - 2] * wa + values[top - 1] * wb) / total;
                sizes[top - 2] = w1 + w2;
                top -= 1;
            }
        }

        let mut pos = 0;
        for b in 0..top {
            for &t in &group.order[pos..pos + sizes[b]] {
                out[t] = values[b];
            }
            pos += sizes[b];
        }
    }

    /// Least-squares ratio transform `b * delta` over one group.
    fn fit_ratio(&self, group: &RankedGroup, distances: &[T], out: &mut [T]) {
        let (cross, square, sum) =
            group
                .order
                .iter()
                .fold((T::zero(), T::zero(), T::zero()), |(c, s, m), &t| {
                    let d = distances[self.pair_of(t)];
                    let delta = self.deltas[t];
                    (c + d * delta, s + delta * delta, m + d)
                });

        if square > T::zero() {
            let b = cross / square;
            for &t in &group.order {
                out[t] = b * self.deltas[t];
            }
        } else {
            let mean = sum / T::from(group.order.len()).unwrap_or_else(T::one);
            for &t in &group.order {
                out[t] = mean;
            }
        }
    }
}

// ============================================================================
// Convenience Entry Point
// ============================================================================

/// Compute disparities for `distances` (one per present pair) in a single call.
///
/// The result has `mode.terms_per_pair()` entries per pair.
pub fn fit_disparities<T: Float>(
    dissim: &CanonicalDissimilarities<T>,
    distances: &[T],
    mode: MonotonicityMode,
    metric: bool,
) -> Vec<T> {
    let regression = MonotoneRegression::new(dissim, mode, metric);
    let terms = regression.terms();
    let mut out = vec![T::zero(); terms];
    let mut values = vec![T::zero(); terms];
    let mut sizes = vec![0usize; terms];
    regression.fit(distances, &mut out, &mut values, &mut sizes);
    out
}
