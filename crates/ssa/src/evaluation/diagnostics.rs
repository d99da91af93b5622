//! Fit diagnostics for finished configurations.
//!
//! ## Purpose
//!
//! This module provides the quality measures reported next to stress:
//! Guttman's coefficient of alienation and the Shepard (distance-plot) series
//! used to inspect the monotone relation between dissimilarities and distances.
//!
//! ## Design notes
//!
//! * **Rank-based**: The alienation coefficient depends only on the orderings
//!   of dissimilarities and distances, not on the regression.
//! * **Original indices**: Shepard points carry original variable indices, so
//!   plots remain meaningful after deselection.
//!
//! ## Key concepts
//!
//! * **Weak monotonicity** `mu2`:
//!   `sum_{p,q} (d_p - d_q)(delta_p - delta_q) / sum_{p,q} |d_p - d_q| |delta_p - delta_q|`.
//! * **Alienation**: `K = sqrt(1 - mu2^2)`; zero for a perfectly monotone fit.
//!
//! ## Invariants
//!
//! * `mu2` is in `[-1, 1]` and `K` is in `[0, 1]`.
//! * Shepard series are sorted by dissimilarity (stable).
//!
//! ## Non-goals
//!
//! * This module does not render plots.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::cmp::Ordering;
use num_traits::Float;

// Internal dependencies
use crate::algorithms::proximity::CanonicalDissimilarities;

// ============================================================================
// Shepard Series
// ============================================================================

/// One point of a Shepard (distance-plot) series.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShepardPoint<T> {
    /// Original index of the first variable.
    pub i: usize,
    /// Original index of the second variable.
    pub j: usize,
    /// Canonical dissimilarity.
    pub dissimilarity: T,
    /// Fitted distance.
    pub distance: T,
    /// Disparity (mean over the pair's terms in LOCAL mode).
    pub disparity: T,
}

/// Build the Shepard series of a finished configuration.
///
/// `disparities` holds `k` terms per pair.
pub fn shepard_diagram<T: Float>(
    dissim: &CanonicalDissimilarities<T>,
    distances: &[T],
    disparities: &[T],
    k: usize,
) -> Vec<ShepardPoint<T>> {
    let kf = T::from(k).unwrap_or_else(T::one);
    let mut points: Vec<ShepardPoint<T>> = dissim
        .pairs
        .iter()
        .enumerate()
        .map(|(p, pair)| ShepardPoint {
            i: dissim.variables[pair.i],
            j: dissim.variables[pair.j],
            dissimilarity: pair.value,
            distance: distances[p],
            disparity: disparities[p * k..(p + 1) * k]
                .iter()
                .fold(T::zero(), |a, &v| a + v)
                / kf,
        })
        .collect();

    points.sort_by(|a, b| {
        a.dissimilarity
            .partial_cmp(&b.dissimilarity)
            .unwrap_or(Ordering::Equal)
    });
    points
}

// ============================================================================
// Alienation
// ============================================================================

/// Guttman's weak monotonicity coefficient between dissimilarities and distances.
///
/// Returns `None` when every pair of pairs is tied on either side.
pub fn weak_monotonicity<T: Float>(deltas: &[T], distances: &[T]) -> Option<T> {
    let mut num = T::zero();
    let mut den = T::zero();

    for p in 0..deltas.len() {
        for q in (p + 1)..deltas.len() {
            let dd = distances[p] - distances[q];
            let dl = deltas[p] - deltas[q];
            num = num + dd * dl;
            den = den + dd.abs() * dl.abs();
        }
    }

    (den > T::zero()).then(|| num / den)
}

/// Coefficient of alienation `sqrt(1 - mu2^2)` of a finished configuration.
pub fn coefficient_of_alienation<T: Float>(
    dissim: &CanonicalDissimilarities<T>,
    distances: &[T],
) -> Option<T> {
    let deltas: Vec<T> = dissim.pairs.iter().map(|p| p.value).collect();
    let mu = weak_monotonicity(&deltas, distances)?;
    Some((T::one() - mu * mu).max(T::zero()).sqrt())
}
