//! Variable inclusion mask.
//!
//! ## Purpose
//!
//! This module provides the selection mask that decides which variables of the
//! proximity matrix take part in a run. Deselected variables are dropped from
//! the canonical dissimilarities entirely; they are not zeroed.
//!
//! ## Design notes
//!
//! * **Owned**: The mask is an owned, bounds-checked boolean sequence.
//! * **Idempotent**: Selecting a selected variable (or deselecting a deselected
//!   one) is a no-op, not an error.
//! * **Read-only during a run**: The engine only reads the mask once a sweep begins.
//!
//! ## Invariants
//!
//! * `len()` equals the number of variables of the matrix it is used with.
//! * At least two variables must be selected before optimization begins
//!   (checked by the validator, not by the mask).

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// Internal dependencies
use crate::primitives::errors::SsaError;

// ============================================================================
// Selection Mask
// ============================================================================

/// Boolean inclusion mask over the variables of a proximity matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectionMask {
    mask: Vec<bool>,
}

impl SelectionMask {
    /// Create a mask over `numvars` variables with every variable selected.
    pub fn new(numvars: usize) -> Self {
        Self {
            mask: vec![true; numvars],
        }
    }

    /// Build a mask from explicit flags.
    pub fn from_flags(flags: &[bool]) -> Self {
        Self {
            mask: flags.to_vec(),
        }
    }

    /// Include variable `index`.
    pub fn select(&mut self, index: usize) -> Result<(), SsaError> {
        *self.slot(index)? = true;
        Ok(())
    }

    /// Exclude variable `index`.
    pub fn deselect(&mut self, index: usize) -> Result<(), SsaError> {
        *self.slot(index)? = false;
        Ok(())
    }

    /// Mark every variable selected.
    pub fn reset(&mut self) {
        self.mask.fill(true);
    }

    /// Number of currently selected variables.
    pub fn active_count(&self) -> usize {
        self.mask.iter().filter(|&&s| s).count()
    }

    /// Whether variable `index` is selected (`false` when out of range).
    pub fn is_selected(&self, index: usize) -> bool {
        self.mask.get(index).copied().unwrap_or(false)
    }

    /// Total number of variables covered by the mask.
    pub fn len(&self) -> usize {
        self.mask.len()
    }

    /// Whether the mask covers no variables.
    pub fn is_empty(&self) -> bool {
        self.mask.is_empty()
    }

    /// Original indices of the selected variables, ascending.
    ///
    /// Position `k` of the returned vector is the compacted index `k` used by
    /// the canonical dissimilarities and every configuration.
    pub fn active_indices(&self) -> Vec<usize> {
        self.mask
            .iter()
            .enumerate()
            .filter_map(|(i, &s)| if s { Some(i) } else { None })
            .collect()
    }

    /// Raw flags, one per variable.
    pub fn as_slice(&self) -> &[bool] {
        &self.mask
    }

    fn slot(&mut self, index: usize) -> Result<&mut bool, SsaError> {
        let len = self.mask.len();
        self.mask
            .get_mut(index)
            .ok_or(SsaError::IndexOutOfRange { index, len })
    }
}
