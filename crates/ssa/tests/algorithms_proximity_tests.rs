#![cfg(feature = "dev")]
//! Tests for proximity matrix canonicalization.
//!
//! These tests verify that every accepted matrix layout is reduced to the
//! same canonical dissimilarities, and that malformed input is rejected:
//! - Full, lower-triangular, and similarity-oriented input
//! - Selection compaction
//! - Missing-data exclusion
//! - Contiguity coefficients over dichotomous profiles
//!
//! ## Test Organization
//!
//! 1. **Layouts** - Full and triangular agreement
//! 2. **Orientation** - Similarity reversal
//! 3. **Selection** - Index compaction
//! 4. **Missing Data** - Exclusion markers
//! 5. **Contiguity** - Profile tables
//! 6. **Errors** - Shape, symmetry, and numeric failures

use approx::assert_relative_eq;

use ssa::internals::algorithms::proximity::{CanonicalDissimilarities, canonicalize};
use ssa::internals::math::contiguity::Contingency;
use ssa::internals::primitives::errors::SsaError;
use ssa::internals::primitives::matrix::{
    ContiguityCoefficient, MissingnessPolicy, Orientation, ProximityMatrix,
};
use ssa::internals::primitives::selection::SelectionMask;

// ============================================================================
// Helper Functions
// ============================================================================

fn line_rows() -> Vec<Vec<f64>> {
    vec![
        vec![0.0, 1.0, 2.0, 3.0],
        vec![1.0, 0.0, 1.0, 2.0],
        vec![2.0, 1.0, 0.0, 1.0],
        vec![3.0, 2.0, 1.0, 0.0],
    ]
}

fn run(matrix: &ProximityMatrix<f64>) -> Result<CanonicalDissimilarities<f64>, SsaError> {
    canonicalize(
        matrix,
        &MissingnessPolicy::None,
        &SelectionMask::new(matrix.numvars),
        1e-6,
    )
}

fn values(dissim: &CanonicalDissimilarities<f64>) -> Vec<f64> {
    dissim.pairs.iter().map(|p| p.value).collect()
}

// ============================================================================
// Layout Tests
// ============================================================================

/// Test that a full matrix yields every upper-triangle pair in row order.
#[test]
fn test_full_matrix_pairs() {
    let dissim = run(&ProximityMatrix::from_rows(&line_rows())).unwrap();

    assert_eq!(dissim.points(), 4);
    assert_eq!(dissim.pair_count(), 6);
    assert!(dissim.absent.is_empty());
    assert_eq!(values(&dissim), vec![1.0, 2.0, 3.0, 1.0, 2.0, 1.0]);
    assert!(dissim.pairs.iter().all(|p| p.i < p.j));
}

/// Test that the lower triangle with and without diagonal matches the full matrix.
#[test]
fn test_lower_triangular_matches_full() {
    let full = run(&ProximityMatrix::from_rows(&line_rows())).unwrap();

    let strict = ProximityMatrix::lower_triangular(4, vec![1.0, 2.0, 1.0, 3.0, 2.0, 1.0]);
    let with_diag = ProximityMatrix::lower_triangular(
        4,
        vec![0.0, 1.0, 0.0, 2.0, 1.0, 0.0, 3.0, 2.0, 1.0, 0.0],
    );

    assert_eq!(run(&strict).unwrap().pairs, full.pairs);
    assert_eq!(run(&with_diag).unwrap().pairs, full.pairs);
}

/// Test that mirrored entries within tolerance are averaged.
#[test]
fn test_near_symmetric_entries_are_averaged() {
    let mut rows = line_rows();
    rows[1][0] = 1.0 + 1e-9;
    let dissim = run(&ProximityMatrix::from_rows(&rows)).unwrap();

    assert_relative_eq!(dissim.pairs[0].value, 1.0 + 0.5e-9, epsilon = 1e-15);
}

// ============================================================================
// Orientation Tests
// ============================================================================

/// Test that similarities are reversed against their maximum.
#[test]
fn test_similarity_is_reversed() {
    let matrix = ProximityMatrix::lower_triangular(3, vec![0.9, 0.5, 0.2])
        .with_orientation(Orientation::Similarity);
    let dissim = run(&matrix).unwrap();

    assert_eq!(dissim.orientation, Orientation::Similarity);
    assert_eq!(dissim.reference, Some(0.9));
    // Pairs (0,1)=0.9, (0,2)=0.5, (1,2)=0.2
    let v = values(&dissim);
    assert_relative_eq!(v[0], 0.0);
    assert_relative_eq!(v[1], 0.4, epsilon = 1e-12);
    assert_relative_eq!(v[2], 0.7, epsilon = 1e-12);

    let back = dissim.to_similarities().unwrap();
    assert_relative_eq!(back[2].value, 0.2, epsilon = 1e-12);
}

/// Test that a higher similarity always ends up with a lower dissimilarity.
#[test]
fn test_similarity_order_is_reversed() {
    let matrix = ProximityMatrix::lower_triangular(4, vec![0.8, 0.1, 0.6, 0.3, 0.7, 0.2])
        .with_orientation(Orientation::Similarity);
    let dissim = run(&matrix).unwrap();
    let raw = [0.8, 0.1, 0.6, 0.3, 0.7, 0.2];

    // Triangle order is (1,0) (2,0) (2,1) (3,0) (3,1) (3,2); pairs are (0,1) (0,2) (0,3) (1,2) (1,3) (2,3)
    let sim_of = |i: usize, j: usize| raw[j * (j - 1) / 2 + i];
    for a in &dissim.pairs {
        for b in &dissim.pairs {
            if sim_of(a.i, a.j) > sim_of(b.i, b.j) {
                assert!(a.value < b.value);
            }
        }
    }
}

// ============================================================================
// Selection Tests
// ============================================================================

/// Test that deselected variables are dropped and indices compacted.
#[test]
fn test_selection_compacts_indices() {
    let matrix = ProximityMatrix::from_rows(&line_rows());
    let mut selection = SelectionMask::new(4);
    selection.deselect(1).unwrap();

    let dissim = canonicalize(&matrix, &MissingnessPolicy::None, &selection, 1e-6).unwrap();

    assert_eq!(dissim.variables, vec![0, 2, 3]);
    assert_eq!(dissim.pair_count(), 3);
    // (0,2)=2, (0,3)=3, (2,3)=1 in compacted indices (0,1), (0,2), (1,2)
    assert_eq!(values(&dissim), vec![2.0, 3.0, 1.0]);
    assert_eq!((dissim.pairs[2].i, dissim.pairs[2].j), (1, 2));
}

/// Test that fewer than two selected variables is rejected.
#[test]
fn test_too_few_selected_variables() {
    let matrix = ProximityMatrix::from_rows(&line_rows());
    let selection = SelectionMask::from_flags(&[false, false, true, false]);

    let err = canonicalize(&matrix, &MissingnessPolicy::None, &selection, 1e-6).unwrap_err();
    assert_eq!(err, SsaError::TooFewVariables { got: 1, min: 2 });
}

/// Test that a mask of the wrong length is rejected.
#[test]
fn test_selection_length_mismatch() {
    let matrix = ProximityMatrix::from_rows(&line_rows());
    let err = canonicalize(&matrix, &MissingnessPolicy::None, &SelectionMask::new(3), 1e-6)
        .unwrap_err();

    assert!(matches!(err, SsaError::InvalidInput(_)));
}

// ============================================================================
// Missing Data Tests
// ============================================================================

/// Test that pairs equal to the missing marker become absent.
#[test]
fn test_missing_marker_excludes_pairs() {
    let mut rows = line_rows();
    rows[0][3] = -1.0;
    rows[3][0] = -1.0;
    let matrix = ProximityMatrix::from_rows(&rows);

    let dissim = canonicalize(
        &matrix,
        &MissingnessPolicy::ExcludeMissing(-1.0),
        &SelectionMask::new(4),
        1e-6,
    )
    .unwrap();

    assert_eq!(dissim.pair_count(), 5);
    assert_eq!(dissim.absent, vec![(0, 3)]);
}

/// Test that a NaN marker matches NaN entries.
#[test]
fn test_nan_marker() {
    let matrix = ProximityMatrix::lower_triangular(3, vec![1.0, f64::NAN, 2.0]);
    let dissim = canonicalize(
        &matrix,
        &MissingnessPolicy::ExcludeMissing(f64::NAN),
        &SelectionMask::new(3),
        1e-6,
    )
    .unwrap();

    assert_eq!(dissim.absent, vec![(0, 2)]);
    assert_eq!(dissim.pair_count(), 2);
}

/// Test that non-finite values without a matching marker are rejected.
#[test]
fn test_non_finite_without_marker() {
    let matrix = ProximityMatrix::lower_triangular(3, vec![1.0, f64::INFINITY, 2.0]);
    let err = run(&matrix).unwrap_err();

    assert!(matches!(err, SsaError::InvalidNumericValue(_)));
}

// ============================================================================
// Contiguity Tests
// ============================================================================

/// Test contingency counting over a small profile table.
#[test]
fn test_contingency_counts() {
    // 4 observations x 2 variables
    let values = [1.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0];
    let t = Contingency::count(&values, 2, 0, 1);

    assert_eq!((t.a, t.b, t.c, t.d), (1, 1, 1, 1));
    assert_eq!(t.total(), 4);
}

/// Test Jaccard dissimilarities derived from profiles.
#[test]
fn test_jaccard_profiles() {
    // Columns: v0 = [1,1,0,0], v1 = [1,1,0,0], v2 = [1,0,1,0]
    let data = vec![
        1.0, 1.0, 1.0, //
        1.0, 1.0, 0.0, //
        0.0, 0.0, 1.0, //
        0.0, 0.0, 0.0,
    ];
    let matrix = ProximityMatrix::profiles(3, data);
    let dissim = canonicalize(
        &matrix,
        &MissingnessPolicy::ContiguityCoefficient(ContiguityCoefficient::Jaccard),
        &SelectionMask::new(3),
        1e-6,
    )
    .unwrap();

    assert_eq!(dissim.orientation, Orientation::Dissimilarity);
    let v = values(&dissim);
    assert_relative_eq!(v[0], 0.0); // identical columns
    assert_relative_eq!(v[1], 2.0 / 3.0, epsilon = 1e-12);
    assert_relative_eq!(v[2], 2.0 / 3.0, epsilon = 1e-12);
}

/// Test that an undefined coefficient marks the pair absent.
#[test]
fn test_undefined_coefficient_is_absent() {
    // v0 and v2 are never present, so their Jaccard denominator is zero.
    let values = vec![
        0.0, 1.0, 0.0, //
        0.0, 1.0, 0.0, //
        0.0, 0.0, 0.0,
    ];
    let matrix = ProximityMatrix::profiles(3, values);
    let dissim = canonicalize(
        &matrix,
        &MissingnessPolicy::ContiguityCoefficient(ContiguityCoefficient::Jaccard),
        &SelectionMask::new(3),
        1e-6,
    )
    .unwrap();

    assert_eq!(dissim.absent, vec![(0, 2)]);
    assert_eq!(dissim.pair_count(), 2);
}

/// Test Yule's Q maps perfect association to zero dissimilarity.
#[test]
fn test_yule_q_range() {
    let t = Contingency { a: 3, b: 0, c: 0, d: 2 };
    let d: f64 = ContiguityCoefficient::YuleQ.dissimilarity(&t).unwrap();
    assert_relative_eq!(d, 0.0);

    let t = Contingency { a: 0, b: 3, c: 2, d: 0 };
    let d: f64 = ContiguityCoefficient::YuleQ.dissimilarity(&t).unwrap();
    assert_relative_eq!(d, 1.0);
}

/// Test that non-dichotomous profile values are rejected.
#[test]
fn test_profiles_must_be_dichotomous() {
    let matrix = ProximityMatrix::profiles(2, vec![1.0, 0.0, 2.0, 1.0]);
    let err = canonicalize(
        &matrix,
        &MissingnessPolicy::ContiguityCoefficient(ContiguityCoefficient::SimpleMatching),
        &SelectionMask::new(2),
        1e-6,
    )
    .unwrap_err();

    assert!(matches!(err, SsaError::InvalidNumericValue(_)));
}

// ============================================================================
// Error Tests
// ============================================================================

/// Test that an empty matrix is rejected.
#[test]
fn test_empty_matrix() {
    let matrix = ProximityMatrix::<f64>::full(0, vec![]);
    let err = canonicalize(&matrix, &MissingnessPolicy::None, &SelectionMask::new(0), 1e-6)
        .unwrap_err();

    assert_eq!(err, SsaError::EmptyInput);
}

/// Test that a value count inconsistent with the shape is rejected.
#[test]
fn test_shape_mismatch() {
    let full = ProximityMatrix::full(3, vec![0.0; 8]);
    assert!(matches!(run(&full), Err(SsaError::InvalidMatrixShape(_))));

    let tri = ProximityMatrix::lower_triangular(4, vec![1.0; 5]);
    assert!(matches!(run(&tri), Err(SsaError::InvalidMatrixShape(_))));
}

/// Test that profile tables need a contiguity coefficient and vice versa.
#[test]
fn test_profiles_require_contiguity() {
    let profiles = ProximityMatrix::profiles(2, vec![1.0, 0.0, 0.0, 1.0]);
    assert!(matches!(run(&profiles), Err(SsaError::InvalidMatrixShape(_))));

    let full = ProximityMatrix::from_rows(&line_rows());
    let err = canonicalize(
        &full,
        &MissingnessPolicy::ContiguityCoefficient(ContiguityCoefficient::Jaccard),
        &SelectionMask::new(4),
        1e-6,
    )
    .unwrap_err();
    assert!(matches!(err, SsaError::InvalidMatrixShape(_)));
}

/// Test that mirrored entries outside tolerance report their position.
#[test]
fn test_asymmetry_detected() {
    let mut rows = line_rows();
    rows[2][1] = 5.0;
    let err = run(&ProximityMatrix::from_rows(&rows)).unwrap_err();

    assert_eq!(
        err,
        SsaError::AsymmetryError {
            row: 1,
            col: 2,
            upper: 1.0,
            lower: 5.0,
        }
    );
}
