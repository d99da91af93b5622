//! Proximity matrix input type.
//!
//! ## Purpose
//!
//! This module defines the raw proximity matrix handed over by the loader,
//! together with the metadata describing how its values are laid out
//! (`MatrixShape`) and what they mean (`Orientation`), and the policy for
//! missing data (`MissingnessPolicy`).
//!
//! ## Design notes
//!
//! * **Raw storage**: Values are stored exactly as provided, row-major.
//! * **Deferred checks**: Constructors never fail; the shape is checked when the
//!   matrix is canonicalized, so every input error is reported before optimization.
//! * **Tagged policy**: Missing-data exclusion and contiguity coefficients are
//!   variants of one enum and cannot be active together.
//!
//! ## Key concepts
//!
//! * **FullSymmetric**: `numvars * numvars` values, mirrored entries must agree.
//! * **LowerTriangular**: Row `i` lists columns `0..i` (strict) or `0..=i`
//!   (with diagonal); both lengths are accepted.
//! * **Profiles**: `observations * numvars` dichotomous values, used only with
//!   contiguity coefficients.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// ============================================================================
// Metadata Tags
// ============================================================================

/// Meaning of the matrix values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Larger values mean more alike.
    Similarity,

    /// Larger values mean less alike.
    #[default]
    Dissimilarity,
}

/// Layout of the matrix values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MatrixShape {
    /// Square `numvars x numvars` matrix.
    #[default]
    FullSymmetric,

    /// Row-major lower triangle, with or without the diagonal.
    LowerTriangular,

    /// Row-major `observations x numvars` table of 0/1 values.
    Profiles,
}

/// Statistic used to turn dichotomous profiles into proximities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ContiguityCoefficient {
    /// Co-presences over all non-joint-absences: `a / (a + b + c)`.
    #[default]
    Jaccard,

    /// Agreements over all observations: `(a + d) / (a + b + c + d)`.
    SimpleMatching,

    /// Weak monotonicity of a 2x2 table: `(ad - bc) / (ad + bc)`.
    YuleQ,
}

/// How missing or dichotomous data is handled for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MissingnessPolicy<T> {
    /// Complete data; every entry is used.
    #[default]
    None,

    /// Pairs whose raw value equals the marker are excluded from every
    /// stress and regression computation. A NaN marker matches NaN entries.
    ExcludeMissing(T),

    /// Profiles are reduced to co-occurrence counts and a contiguity statistic.
    ContiguityCoefficient(ContiguityCoefficient),
}

impl<T: Float> MissingnessPolicy<T> {
    /// Whether `value` is the missing-data marker under this policy.
    #[inline]
    pub fn is_missing(&self, value: T) -> bool {
        match *self {
            Self::ExcludeMissing(marker) => {
                if marker.is_nan() {
                    value.is_nan()
                } else {
                    value == marker
                }
            }
            _ => false,
        }
    }
}

// ============================================================================
// Canonical Pair
// ============================================================================

/// One present variable pair of the canonical dissimilarities.
///
/// Indices are compacted (post-selection) with `i < j`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pair<T> {
    /// Smaller compacted index.
    pub i: usize,
    /// Larger compacted index.
    pub j: usize,
    /// Canonical dissimilarity.
    pub value: T,
}

// ============================================================================
// Proximity Matrix
// ============================================================================

/// Raw proximity data for `numvars` variables.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProximityMatrix<T> {
    /// Row-major values, laid out according to `shape`.
    pub values: Vec<T>,

    /// Number of variables (rows/columns of the logical matrix).
    pub numvars: usize,

    /// Value layout.
    pub shape: MatrixShape,

    /// Value meaning.
    pub orientation: Orientation,
}

impl<T: Float> ProximityMatrix<T> {
    /// Square symmetric dissimilarity matrix.
    pub fn full(numvars: usize, values: Vec<T>) -> Self {
        Self {
            values,
            numvars,
            shape: MatrixShape::FullSymmetric,
            orientation: Orientation::Dissimilarity,
        }
    }

    /// Lower-triangular dissimilarity matrix.
    pub fn lower_triangular(numvars: usize, values: Vec<T>) -> Self {
        Self {
            values,
            numvars,
            shape: MatrixShape::LowerTriangular,
            orientation: Orientation::Dissimilarity,
        }
    }

    /// Dichotomous `observations x numvars` profile table.
    pub fn profiles(numvars: usize, values: Vec<T>) -> Self {
        Self {
            values,
            numvars,
            shape: MatrixShape::Profiles,
            orientation: Orientation::Similarity,
        }
    }

    /// Square matrix from nested rows.
    pub fn from_rows(rows: &[Vec<T>]) -> Self {
        let numvars = rows.len();
        let values = rows.iter().flat_map(|r| r.iter().copied()).collect();
        Self::full(numvars, values)
    }

    /// Override the orientation tag.
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Whether the lower-triangular data includes the diagonal.
    pub(crate) fn triangle_has_diagonal(&self) -> bool {
        self.values.len() == self.numvars * (self.numvars + 1) / 2
    }

    /// Raw value stored for the ordered pair `(row, col)`.
    ///
    /// For `LowerTriangular` data the pair is reflected into the lower
    /// triangle. Callers must have checked the shape first.
    #[inline]
    pub(crate) fn raw(&self, row: usize, col: usize) -> T {
        match self.shape {
            MatrixShape::LowerTriangular => {
                let (r, c) = if row > col { (row, col) } else { (col, row) };
                let offset = if self.triangle_has_diagonal() {
                    r * (r + 1) / 2
                } else {
                    r * (r - 1) / 2
                };
                self.values[offset + c]
            }
            _ => self.values[row * self.numvars + col],
        }
    }
}
