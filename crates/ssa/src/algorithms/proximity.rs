//! Proximity canonicalization.
//!
//! ## Purpose
//!
//! This module turns a raw `ProximityMatrix` into the canonical form every
//! later stage works on: a list of present variable pairs, in compacted
//! (post-selection) indices, each carrying a dissimilarity. Pairs excluded as
//! missing or with an undefined contiguity coefficient are recorded as absent
//! and never enter stress or regression computations.
//!
//! ## Design notes
//!
//! * **Fail fast**: Shape, symmetry, policy, and numeric problems are all
//!   reported here, before any optimization work.
//! * **Selection first**: Only selected variables are materialized; deselected
//!   variables are dropped, not zeroed.
//! * **Invertible**: Similarities are turned into `max - s` and `max` is kept,
//!   so the original similarities can be recovered.
//!
//! ## Key concepts
//!
//! * **Compacted index**: Position of a variable among the selected ones.
//! * **Reference**: The maximum similarity used by the orientation transform.
//! * **Mirroring**: Full matrices must agree within tolerance across the
//!   diagonal; agreeing entries are averaged.
//!
//! ## Invariants
//!
//! * Every pair has `i < j` and a finite dissimilarity.
//! * Pairs are ordered lexicographically by `(i, j)`.
//! * `variables[c]` is the original index of compacted variable `c`.
//!
//! ## Non-goals
//!
//! * This module does not impute missing values.
//! * This module does not derive proximities from raw observations except
//!   through contiguity coefficients on dichotomous profiles.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::format;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::math::contiguity::Contingency;
use crate::primitives::errors::SsaError;
use crate::primitives::matrix::{MatrixShape, MissingnessPolicy, Orientation, Pair, ProximityMatrix};
use crate::primitives::selection::SelectionMask;

// ============================================================================
// Canonical Dissimilarities
// ============================================================================

/// Selected variable pairs in canonical dissimilarity form.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalDissimilarities<T> {
    /// Original variable index of each compacted variable.
    pub variables: Vec<usize>,

    /// Present pairs in lexicographic `(i, j)` order.
    pub pairs: Vec<Pair<T>>,

    /// Compacted pairs excluded from every computation.
    pub absent: Vec<(usize, usize)>,

    /// Orientation of the raw input.
    pub orientation: Orientation,

    /// Maximum similarity used by `d = max - s`, if the input was similarities.
    pub reference: Option<T>,
}

impl<T: Float> CanonicalDissimilarities<T> {
    /// Number of active points.
    #[inline]
    pub fn points(&self) -> usize {
        self.variables.len()
    }

    /// Number of present pairs.
    #[inline]
    pub fn pair_count(&self) -> usize {
        self.pairs.len()
    }

    /// Recover the input similarities of every present pair.
    ///
    /// Returns `None` when the input was not a similarity matrix.
    pub fn to_similarities(&self) -> Option<Vec<Pair<T>>> {
        let max = self.reference?;
        Some(
            self.pairs
                .iter()
                .map(|p| Pair {
                    value: max - p.value,
                    ..*p
                })
                .collect(),
        )
    }

    /// Mean dissimilarity over present pairs (zero when there are none).
    pub fn mean(&self) -> T {
        if self.pairs.is_empty() {
            return T::zero();
        }
        let sum = self.pairs.iter().fold(T::zero(), |acc, p| acc + p.value);
        sum / T::from(self.pairs.len()).unwrap_or_else(T::one)
    }
}

// ============================================================================
// Canonicalization
// ============================================================================

/// Canonicalize `matrix` under `policy`, keeping only the variables selected in `selection`.
///
/// `symmetry_tolerance` bounds the relative disagreement of mirrored entries
/// of a full matrix: `|a - b| <= tol * max(1, |a|, |b|)`.
pub fn canonicalize<T: Float>(
    matrix: &ProximityMatrix<T>,
    policy: &MissingnessPolicy<T>,
    selection: &SelectionMask,
    symmetry_tolerance: T,
) -> Result<CanonicalDissimilarities<T>, SsaError> {
    if matrix.numvars == 0 || matrix.values.is_empty() {
        return Err(SsaError::EmptyInput);
    }
    if selection.len() != matrix.numvars {
        return Err(SsaError::InvalidInput(format!(
            "selection mask covers {} variables, matrix has {}",
            selection.len(),
            matrix.numvars
        )));
    }

    check_shape(matrix, policy)?;

    let variables = selection.active_indices();
    if variables.len() < 2 {
        return Err(SsaError::TooFewVariables {
            got: variables.len(),
            min: 2,
        });
    }

    let n = variables.len();
    let mut pairs = Vec::with_capacity(n * (n - 1) / 2);
    let mut absent = Vec::new();

    if let MissingnessPolicy::ContiguityCoefficient(coef) = policy {
        check_dichotomous(&matrix.values)?;
        for i in 0..n {
            for j in (i + 1)..n {
                let table = Contingency::count(&matrix.values, matrix.numvars, variables[i], variables[j]);
                match coef.dissimilarity(&table) {
                    Some(value) => pairs.push(Pair { i, j, value }),
                    None => absent.push((i, j)),
                }
            }
        }
        return Ok(CanonicalDissimilarities {
            variables,
            pairs,
            absent,
            orientation: Orientation::Dissimilarity,
            reference: None,
        });
    }

    if matrix.shape == MatrixShape::FullSymmetric {
        check_symmetry(matrix, policy, symmetry_tolerance)?;
    }

    for i in 0..n {
        for j in (i + 1)..n {
            let (a, b) = (variables[i], variables[j]);
            let lower = matrix.raw(b, a);
            let upper = matrix.raw(a, b);

            if policy.is_missing(lower) || policy.is_missing(upper) {
                absent.push((i, j));
                continue;
            }
            if !lower.is_finite() || !upper.is_finite() {
                return Err(SsaError::InvalidNumericValue(format!(
                    "entry ({b}, {a}) is not finite"
                )));
            }

            let two = T::one() + T::one();
            pairs.push(Pair {
                i,
                j,
                value: (lower + upper) / two,
            });
        }
    }

    let reference = match matrix.orientation {
        Orientation::Dissimilarity => None,
        Orientation::Similarity => {
            let max = pairs
                .iter()
                .fold(T::neg_infinity(), |acc, p| acc.max(p.value));
            let max = if max.is_finite() { max } else { T::zero() };
            for p in pairs.iter_mut() {
                p.value = max - p.value;
            }
            Some(max)
        }
    };

    Ok(CanonicalDissimilarities {
        variables,
        pairs,
        absent,
        orientation: matrix.orientation,
        reference,
    })
}

// ============================================================================
// Checks
// ============================================================================

/// Check that the value count matches the shape and that the shape fits the policy.
fn check_shape<T: Float>(
    matrix: &ProximityMatrix<T>,
    policy: &MissingnessPolicy<T>,
) -> Result<(), SsaError> {
    let n = matrix.numvars;
    let len = matrix.values.len();
    let contiguity = matches!(policy, MissingnessPolicy::ContiguityCoefficient(_));

    match matrix.shape {
        MatrixShape::FullSymmetric if len != n * n => Err(SsaError::InvalidMatrixShape(format!(
            "full matrix of {n} variables needs {} values, got {len}",
            n * n
        ))),
        MatrixShape::LowerTriangular if len != n * (n - 1) / 2 && len != n * (n + 1) / 2 => {
            Err(SsaError::InvalidMatrixShape(format!(
                "lower triangle of {n} variables needs {} or {} values, got {len}",
                n * (n - 1) / 2,
                n * (n + 1) / 2
            )))
        }
        MatrixShape::Profiles if len % n != 0 => Err(SsaError::InvalidMatrixShape(format!(
            "profile table of {n} variables has {len} values, not a whole number of rows"
        ))),
        MatrixShape::Profiles if !contiguity => Err(SsaError::InvalidMatrixShape(
            "profile tables require a contiguity coefficient".into(),
        )),
        MatrixShape::FullSymmetric | MatrixShape::LowerTriangular if contiguity => {
            Err(SsaError::InvalidMatrixShape(
                "contiguity coefficients require a profile table".into(),
            ))
        }
        _ => Ok(()),
    }
}

/// Check every off-diagonal mirrored pair of a full matrix.
fn check_symmetry<T: Float>(
    matrix: &ProximityMatrix<T>,
    policy: &MissingnessPolicy<T>,
    tolerance: T,
) -> Result<(), SsaError> {
    let n = matrix.numvars;
    for row in 0..n {
        for col in (row + 1)..n {
            let upper = matrix.raw(row, col);
            let lower = matrix.raw(col, row);
            if policy.is_missing(upper) || policy.is_missing(lower) {
                continue;
            }
            if !upper.is_finite() || !lower.is_finite() {
                continue;
            }
            let scale = T::one().max(upper.abs()).max(lower.abs());
            if (upper - lower).abs() > tolerance * scale {
                return Err(SsaError::AsymmetryError {
                    row,
                    col,
                    upper: upper.to_f64().unwrap_or(f64::NAN),
                    lower: lower.to_f64().unwrap_or(f64::NAN),
                });
            }
        }
    }
    Ok(())
}

/// Check that a profile table contains only 0 and 1.
fn check_dichotomous<T: Float>(values: &[T]) -> Result<(), SsaError> {
    match values
        .iter()
        .position(|&v| v != T::zero() && v != T::one())
    {
        Some(pos) => Err(SsaError::InvalidNumericValue(format!(
            "profile value at position {pos} is not 0 or 1"
        ))),
        None => Ok(()),
    }
}
