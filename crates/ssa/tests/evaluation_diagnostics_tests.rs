#![cfg(feature = "dev")]
//! Tests for fit diagnostics.
//!
//! These tests verify Guttman's weak monotonicity coefficient, the
//! coefficient of alienation, and the Shepard series.
//!
//! ## Test Organization
//!
//! 1. **Monotonicity** - mu2 over rank agreement
//! 2. **Alienation** - Derived from mu2
//! 3. **Shepard Series** - Ordering and original indices

use approx::assert_relative_eq;

use ssa::internals::algorithms::proximity::canonicalize;
use ssa::internals::evaluation::diagnostics::{
    coefficient_of_alienation, shepard_diagram, weak_monotonicity,
};
use ssa::internals::primitives::matrix::{MissingnessPolicy, ProximityMatrix};
use ssa::internals::primitives::selection::SelectionMask;

// ============================================================================
// Monotonicity Tests
// ============================================================================

/// Test that perfectly concordant orders give mu2 = 1.
#[test]
fn test_weak_monotonicity_concordant() {
    let mu = weak_monotonicity(&[1.0, 2.0, 3.0], &[0.1, 0.5, 0.9]).unwrap();
    assert_relative_eq!(mu, 1.0);
}

/// Test that reversed orders give mu2 = -1.
#[test]
fn test_weak_monotonicity_reversed() {
    let mu = weak_monotonicity(&[1.0, 2.0, 3.0], &[0.9, 0.5, 0.1]).unwrap();
    assert_relative_eq!(mu, -1.0);
}

/// Test that ties on one side do not count against monotonicity.
#[test]
fn test_weak_monotonicity_ties() {
    let mu = weak_monotonicity(&[1.0, 1.0, 2.0], &[0.3, 0.4, 0.9]).unwrap();
    assert_relative_eq!(mu, 1.0);

    assert!(weak_monotonicity(&[1.0, 1.0], &[0.3, 0.4]).is_none());
}

// ============================================================================
// Alienation Tests
// ============================================================================

/// Test that a perfect rank reproduction has zero alienation.
#[test]
fn test_alienation_perfect_fit() {
    let matrix = ProximityMatrix::lower_triangular(3, vec![1.0, 2.0, 3.0]);
    let dissim = canonicalize(
        &matrix,
        &MissingnessPolicy::None,
        &SelectionMask::new(3),
        1e-6,
    )
    .unwrap();

    let k: f64 = coefficient_of_alienation(&dissim, &[0.2, 0.4, 0.8]).unwrap();
    assert_relative_eq!(k, 0.0);

    let k: f64 = coefficient_of_alienation(&dissim, &[0.8, 0.4, 0.2]).unwrap();
    assert_relative_eq!(k, 0.0, epsilon = 1e-12);

    let k: f64 = coefficient_of_alienation(&dissim, &[0.4, 0.2, 0.8]).unwrap();
    assert!(k > 0.0 && k < 1.0);
}

// ============================================================================
// Shepard Series Tests
// ============================================================================

/// Test that the series is sorted by dissimilarity and uses original indices.
#[test]
fn test_shepard_series() {
    let rows = vec![
        vec![0.0, 4.0, 9.0, 2.0],
        vec![4.0, 0.0, 3.0, 7.0],
        vec![9.0, 3.0, 0.0, 5.0],
        vec![2.0, 7.0, 5.0, 0.0],
    ];
    let mut selection = SelectionMask::new(4);
    selection.deselect(1).unwrap();
    let dissim = canonicalize(
        &ProximityMatrix::from_rows(&rows),
        &MissingnessPolicy::None,
        &selection,
        1e-6,
    )
    .unwrap();

    // Pairs: (0,2)=9, (0,3)=2, (2,3)=5
    let distances = [3.0, 1.0, 2.0];
    let disparities = [3.0, 3.0, 1.0, 1.0, 2.0, 2.0];
    let series = shepard_diagram(&dissim, &distances, &disparities, 2);

    assert_eq!(series.len(), 3);
    let order: Vec<(usize, usize)> = series.iter().map(|p| (p.i, p.j)).collect();
    assert_eq!(order, vec![(0, 3), (2, 3), (0, 2)]);
    assert_eq!(series[0].dissimilarity, 2.0);
    assert_eq!(series[0].distance, 1.0);
    assert_eq!(series[2].disparity, 3.0);
}
