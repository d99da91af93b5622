//! Input abstractions for SSA sweeps.
//!
//! ## Purpose
//!
//! This module lets `fit` accept proximity data in several containers
//! (`ProximityMatrix`, nested `Vec` rows, `ndarray` matrices) through a single
//! trait.
//!
//! ## Design notes
//!
//! * **Zero-copy where possible**: A `ProximityMatrix` is borrowed as is.
//! * **Interoperability**: Square `ndarray` matrices become full symmetric
//!   dissimilarity matrices, in logical row-major order whatever their memory
//!   layout.
//! * **Fail-fast validation**: Non-square input is rejected before any work.
//!
//! ## Invariants
//!
//! * Converted matrices hold exactly `n * n` values for `n` variables.
//!
//! ## Non-goals
//!
//! * This module does not check symmetry (handled by canonicalization).
//! * This module does not detect the orientation of the data.

// External dependencies
use ndarray::{ArrayBase, Data, Ix2};
use num_traits::Float;
use std::borrow::Cow;

// Export dependencies from ssa crate
use ssa::internals::primitives::errors::SsaError;
use ssa::internals::primitives::matrix::ProximityMatrix;

/// Trait for types that can be used as input for an SSA sweep.
pub trait SsaInput<T: Float> {
    /// View the input as a proximity matrix.
    fn as_proximity_matrix(&self) -> Result<Cow<'_, ProximityMatrix<T>>, SsaError>;
}

impl<T: Float> SsaInput<T> for ProximityMatrix<T> {
    fn as_proximity_matrix(&self) -> Result<Cow<'_, ProximityMatrix<T>>, SsaError> {
        Ok(Cow::Borrowed(self))
    }
}

impl<T: Float> SsaInput<T> for [Vec<T>] {
    fn as_proximity_matrix(&self) -> Result<Cow<'_, ProximityMatrix<T>>, SsaError> {
        let n = self.len();
        if let Some(row) = self.iter().position(|r| r.len() != n) {
            return Err(SsaError::InvalidMatrixShape(format!(
                "row {row} has {} values, expected {n}",
                self[row].len()
            )));
        }
        Ok(Cow::Owned(ProximityMatrix::from_rows(self)))
    }
}

impl<T: Float> SsaInput<T> for Vec<Vec<T>> {
    fn as_proximity_matrix(&self) -> Result<Cow<'_, ProximityMatrix<T>>, SsaError> {
        self.as_slice().as_proximity_matrix()
    }
}

impl<T: Float, S> SsaInput<T> for ArrayBase<S, Ix2>
where
    S: Data<Elem = T>,
{
    fn as_proximity_matrix(&self) -> Result<Cow<'_, ProximityMatrix<T>>, SsaError> {
        let (rows, cols) = self.dim();
        if rows != cols {
            return Err(SsaError::InvalidMatrixShape(format!(
                "ndarray input must be square, got {rows}x{cols}"
            )));
        }
        let values = self.iter().copied().collect();
        Ok(Cow::Owned(ProximityMatrix::full(rows, values)))
    }
}
