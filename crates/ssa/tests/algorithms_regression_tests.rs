#![cfg(feature = "dev")]
//! Tests for monotone regression of distances on dissimilarities.
//!
//! These tests verify the pool-adjacent-violators fit used to compute
//! disparities:
//! - Monotone output in dissimilarity order
//! - Tied dissimilarities sharing one disparity
//! - Sum preservation of the least-squares fit
//! - Per-row fits in local mode
//! - The ratio transform in metric mode
//!
//! ## Test Organization
//!
//! 1. **Global Mode** - One regression over every pair
//! 2. **Local Mode** - One regression per row
//! 3. **Metric Mode** - Ratio transform

use approx::assert_relative_eq;

use ssa::internals::algorithms::proximity::{CanonicalDissimilarities, canonicalize};
use ssa::internals::algorithms::regression::{
    MonotoneRegression, MonotonicityMode, fit_disparities,
};
use ssa::internals::primitives::matrix::{MissingnessPolicy, ProximityMatrix};
use ssa::internals::primitives::selection::SelectionMask;

// ============================================================================
// Helper Functions
// ============================================================================

fn dissimilarities(numvars: usize, lower: Vec<f64>) -> CanonicalDissimilarities<f64> {
    let matrix = ProximityMatrix::lower_triangular(numvars, lower);
    canonicalize(
        &matrix,
        &MissingnessPolicy::None,
        &SelectionMask::new(numvars),
        1e-6,
    )
    .unwrap()
}

/// Check that every group is non-decreasing in rank order and constant on ties.
fn assert_monotone(regression: &MonotoneRegression<f64>, disparities: &[f64]) {
    for group in regression.groups() {
        for w in group.order.windows(2) {
            assert!(
                disparities[w[0]] <= disparities[w[1]] + 1e-12,
                "disparities must not decrease along the dissimilarity order"
            );
        }
        for tie in &group.ties {
            let first = disparities[group.order[tie.start]];
            for &t in &group.order[tie.clone()] {
                assert_relative_eq!(disparities[t], first, epsilon = 1e-12);
            }
        }
    }
}

// ============================================================================
// Global Mode Tests
// ============================================================================

/// Test that order-preserving distances are returned unchanged.
#[test]
fn test_monotone_distances_unchanged() {
    // Pairs (0,1)=1, (0,2)=2, (1,2)=3
    let dissim = dissimilarities(3, vec![1.0, 2.0, 3.0]);
    let distances = [0.5, 1.0, 4.0];

    let out = fit_disparities(&dissim, &distances, MonotonicityMode::Global, false);
    assert_eq!(out, vec![0.5, 1.0, 4.0]);
}

/// Test that violating distances are pooled into their mean.
#[test]
fn test_violators_are_pooled() {
    let dissim = dissimilarities(3, vec![1.0, 2.0, 3.0]);
    let distances = [3.0, 1.0, 2.0];

    let out = fit_disparities(&dissim, &distances, MonotonicityMode::Global, false);
    for v in out {
        assert_relative_eq!(v, 2.0, epsilon = 1e-12);
    }
}

/// Test that tied dissimilarities receive one shared disparity.
#[test]
fn test_ties_share_one_disparity() {
    // Pairs (0,1)=1, (0,2)=1, (1,2)=2
    let dissim = dissimilarities(3, vec![1.0, 1.0, 2.0]);
    let distances = [0.5, 1.5, 3.0];

    let out = fit_disparities(&dissim, &distances, MonotonicityMode::Global, false);
    assert_relative_eq!(out[0], 1.0, epsilon = 1e-12);
    assert_relative_eq!(out[1], 1.0, epsilon = 1e-12);
    assert_relative_eq!(out[2], 3.0, epsilon = 1e-12);
}

/// Test monotonicity and sum preservation on an irregular configuration.
#[test]
fn test_global_fit_properties() {
    // 6 variables, 15 pairs with a few ties
    let lower = vec![
        3.0, //
        1.0, 4.0, //
        1.0, 5.0, 9.0, //
        2.0, 6.0, 5.0, 3.0, //
        5.0, 8.0, 9.0, 7.0, 9.0,
    ];
    let dissim = dissimilarities(6, lower);
    let distances: Vec<f64> = (0..dissim.pair_count())
        .map(|p| 1.0 + (p as f64 * 1.7).sin())
        .collect();

    let regression = MonotoneRegression::new(&dissim, MonotonicityMode::Global, false);
    assert_eq!(regression.groups().len(), 1);
    assert_eq!(regression.terms(), 15);

    let out = fit_disparities(&dissim, &distances, MonotonicityMode::Global, false);
    assert_monotone(&regression, &out);

    let sum_d: f64 = distances.iter().sum();
    let sum_hat: f64 = out.iter().sum();
    assert_relative_eq!(sum_d, sum_hat, epsilon = 1e-10);
}

// ============================================================================
// Local Mode Tests
// ============================================================================

/// Test that local mode fits one group per row with two terms per pair.
#[test]
fn test_local_groups_per_row() {
    let lower = vec![
        3.0, //
        1.0, 4.0, //
        1.0, 5.0, 9.0, //
        2.0, 6.0, 5.0, 3.0,
    ];
    let dissim = dissimilarities(5, lower);
    let regression = MonotoneRegression::new(&dissim, MonotonicityMode::Local, false);

    assert_eq!(regression.terms_per_pair(), 2);
    assert_eq!(regression.terms(), 2 * dissim.pair_count());
    assert_eq!(regression.groups().len(), 5);
    for group in regression.groups() {
        assert_eq!(group.order.len(), 4, "every row holds n - 1 terms");
    }

    let distances: Vec<f64> = (0..dissim.pair_count())
        .map(|p| 2.0 + (p as f64 * 2.3).cos())
        .collect();
    let out = fit_disparities(&dissim, &distances, MonotonicityMode::Local, false);

    assert_eq!(out.len(), regression.terms());
    assert_monotone(&regression, &out);
}

/// Test that local mode is never worse than global mode in residual sum of squares.
#[test]
fn test_local_fit_at_least_as_close_as_global() {
    let lower = vec![
        3.0, //
        1.0, 4.0, //
        1.0, 5.0, 9.0, //
        2.0, 6.0, 5.0, 3.0,
    ];
    let dissim = dissimilarities(5, lower);
    let distances: Vec<f64> = (0..dissim.pair_count())
        .map(|p| 2.0 + (p as f64 * 0.9).sin())
        .collect();

    let global = fit_disparities(&dissim, &distances, MonotonicityMode::Global, false);
    let local = fit_disparities(&dissim, &distances, MonotonicityMode::Local, false);

    let rss_global: f64 = global
        .iter()
        .enumerate()
        .map(|(p, &h)| (distances[p] - h).powi(2))
        .sum();
    // Both terms of a pair count, so halve the local sum.
    let rss_local: f64 = local
        .iter()
        .enumerate()
        .map(|(t, &h)| (distances[t / 2] - h).powi(2))
        .sum::<f64>()
        / 2.0;

    assert!(rss_local <= rss_global + 1e-12);
}

// ============================================================================
// Metric Mode Tests
// ============================================================================

/// Test that proportional distances are reproduced exactly by the ratio transform.
#[test]
fn test_ratio_transform_exact() {
    let dissim = dissimilarities(3, vec![1.0, 2.0, 3.0]);
    let distances = [2.0, 4.0, 6.0];

    let out = fit_disparities(&dissim, &distances, MonotonicityMode::Global, true);
    for (h, d) in out.iter().zip(distances) {
        assert_relative_eq!(*h, d, epsilon = 1e-12);
    }
}

/// Test the least-squares slope of the ratio transform.
#[test]
fn test_ratio_transform_slope() {
    let dissim = dissimilarities(3, vec![1.0, 2.0, 3.0]);
    let distances = [3.0, 1.0, 2.0];

    // b = (3*1 + 1*2 + 2*3) / (1 + 4 + 9) = 11 / 14
    let b = 11.0 / 14.0;
    let out = fit_disparities(&dissim, &distances, MonotonicityMode::Global, true);
    assert_relative_eq!(out[0], b, epsilon = 1e-12);
    assert_relative_eq!(out[1], 2.0 * b, epsilon = 1e-12);
    assert_relative_eq!(out[2], 3.0 * b, epsilon = 1e-12);
}
