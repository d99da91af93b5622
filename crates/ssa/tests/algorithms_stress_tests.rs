#![cfg(feature = "dev")]
//! Tests for Kruskal stress and its gradient.
//!
//! These tests verify:
//! - Stress is non-negative and zero exactly when distances equal disparities
//! - Degenerate normalizers are handled
//! - The analytic gradient agrees with finite differences
//!
//! ## Test Organization
//!
//! 1. **Stress Value** - Basic evaluation and edge cases
//! 2. **Gradient** - Agreement with a numerical derivative

use approx::assert_relative_eq;

use ssa::internals::algorithms::stress::{kruskal_stress, stress_gradient};
use ssa::internals::math::distance::pair_distances;
use ssa::internals::primitives::matrix::Pair;

// ============================================================================
// Helper Functions
// ============================================================================

fn all_pairs(n: usize) -> Vec<Pair<f64>> {
    let mut pairs = Vec::new();
    for i in 0..n {
        for j in (i + 1)..n {
            pairs.push(Pair { i, j, value: 0.0 });
        }
    }
    pairs
}

fn stress_at(coords: &[f64], dim: usize, pairs: &[Pair<f64>], disparities: &[f64]) -> f64 {
    let mut distances = vec![0.0; pairs.len()];
    pair_distances(coords, dim, pairs, &mut distances);
    kruskal_stress(&distances, disparities, 1).value
}

// ============================================================================
// Stress Value Tests
// ============================================================================

/// Test that stress is zero when distances equal disparities.
#[test]
fn test_zero_stress_on_exact_fit() {
    let d = [1.0, 2.0, 3.0];
    let s = kruskal_stress(&d, &d, 1);

    assert_eq!(s.raw, 0.0);
    assert_relative_eq!(s.norm, 14.0);
    assert_eq!(s.value, 0.0);
}

/// Test the stress formula on a small hand-computed case.
#[test]
fn test_stress_value() {
    let d = [1.0, 2.0];
    let dhat = [2.0, 2.0];
    let s = kruskal_stress(&d, &dhat, 1);

    // S* = 1, T* = 5
    assert_relative_eq!(s.raw, 1.0);
    assert_relative_eq!(s.norm, 5.0);
    assert_relative_eq!(s.value, (1.0f64 / 5.0).sqrt(), epsilon = 1e-12);
}

/// Test that two terms per pair count the distance twice.
#[test]
fn test_two_terms_per_pair() {
    let d = [1.0, 2.0];
    let dhat = [1.0, 1.0, 2.0, 2.0];
    let s = kruskal_stress(&d, &dhat, 2);

    assert_eq!(s.value, 0.0);
    assert_relative_eq!(s.norm, 10.0);
}

/// Test that a collapsed configuration has zero or unit stress.
#[test]
fn test_zero_distances() {
    let d = [0.0, 0.0];
    assert_eq!(kruskal_stress(&d, &[0.0, 0.0], 1).value, 0.0);
    assert_eq!(kruskal_stress(&d, &[1.0, 0.0], 1).value, 1.0);
}

/// Test that stress is never negative and stays below one for monotone fits.
#[test]
fn test_stress_non_negative() {
    for shift in [0.0, 0.1, 0.5, 1.0, 3.0] {
        let d = [1.0, 1.5, 2.0, 2.5];
        let dhat: Vec<f64> = d.iter().map(|v| v + shift).collect();
        let s = kruskal_stress(&d, &dhat, 1);
        assert!(s.value >= 0.0);
    }
}

// ============================================================================
// Gradient Tests
// ============================================================================

/// Test the analytic gradient against central differences.
#[test]
fn test_gradient_matches_finite_differences() {
    let dim = 2;
    let coords = vec![0.0, 0.0, 1.0, 0.2, 0.3, 1.1, -0.7, 0.4, 0.9, -0.8];
    let pairs = all_pairs(5);
    let disparities: Vec<f64> = (0..pairs.len()).map(|p| 0.5 + 0.1 * p as f64).collect();

    let mut distances = vec![0.0; pairs.len()];
    pair_distances(&coords, dim, &pairs, &mut distances);
    let stress = kruskal_stress(&distances, &disparities, 1);

    let mut gradient = vec![0.0; coords.len()];
    stress_gradient(
        &coords,
        dim,
        &pairs,
        &distances,
        &disparities,
        1,
        &stress,
        &mut gradient,
    );

    let h = 1e-6;
    for k in 0..coords.len() {
        let mut plus = coords.clone();
        let mut minus = coords.clone();
        plus[k] += h;
        minus[k] -= h;
        let numeric = (stress_at(&plus, dim, &pairs, &disparities)
            - stress_at(&minus, dim, &pairs, &disparities))
            / (2.0 * h);
        assert_relative_eq!(gradient[k], numeric, epsilon = 1e-6);
    }
}

/// Test that an exact fit has a zero gradient.
#[test]
fn test_gradient_zero_on_exact_fit() {
    let dim = 1;
    let coords = vec![0.0, 1.0, 3.0];
    let pairs = all_pairs(3);

    let mut distances = vec![0.0; pairs.len()];
    pair_distances(&coords, dim, &pairs, &mut distances);
    let stress = kruskal_stress(&distances, &distances, 1);

    let mut gradient = vec![1.0; coords.len()];
    stress_gradient(
        &coords,
        dim,
        &pairs,
        &distances,
        &distances,
        1,
        &stress,
        &mut gradient,
    );

    assert!(gradient.iter().all(|&g| g == 0.0));
}
