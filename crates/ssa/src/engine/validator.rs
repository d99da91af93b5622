//! Input validation for SSA configuration and data.
//!
//! ## Purpose
//!
//! This module provides validation functions for SSA configuration
//! parameters. It checks the dimensionality range, numeric controls of the
//! minimizer, selection size, starting configuration dimensions, and the
//! exclusivity of missing-data handling modes.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **Up front**: Everything here runs before canonicalization and optimization.
//! * **Generics**: Validation is generic over `Float` types.
//!
//! ## Invariants
//!
//! * All validated inputs satisfy their respective mathematical constraints.
//! * Validation logic is deterministic and side-effect free.
//!
//! ## Non-goals
//!
//! * This module does not check matrix shape or symmetry (done during canonicalization).
//! * This module does not provide automatic correction of invalid inputs.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::format;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::algorithms::initial::InitialConfiguration;
use crate::primitives::errors::SsaError;
use crate::primitives::selection::SelectionMask;

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for SSA configuration.
///
/// All methods return `Result<(), SsaError>` and fail fast upon identifying
/// the first violation.
pub struct Validator;

impl Validator {
    // ========================================================================
    // Sweep Parameters
    // ========================================================================

    /// Validate the dimensionality range `1 <= mind <= maxd`.
    pub fn validate_dimensionality_range(mind: usize, maxd: usize) -> Result<(), SsaError> {
        if mind < 1 || mind > maxd {
            return Err(SsaError::InvalidDimensionalityRange { mind, maxd });
        }
        Ok(())
    }

    /// Validate the minimizer iteration cap.
    pub fn validate_iterations(iterations: usize) -> Result<(), SsaError> {
        const MAX_ITERATIONS: usize = 100_000;
        if iterations == 0 || iterations > MAX_ITERATIONS {
            return Err(SsaError::InvalidIterations(iterations));
        }
        Ok(())
    }

    /// Validate a convergence tolerance or stress floor.
    pub fn validate_tolerance<T: Float>(tol: T) -> Result<(), SsaError> {
        if !tol.is_finite() || tol < T::zero() {
            return Err(SsaError::InvalidTolerance(tol.to_f64().unwrap_or(f64::NAN)));
        }
        Ok(())
    }

    /// Validate the initial step size.
    pub fn validate_step_size<T: Float>(step: T) -> Result<(), SsaError> {
        if !step.is_finite() || step <= T::zero() {
            return Err(SsaError::InvalidStepSize(step.to_f64().unwrap_or(f64::NAN)));
        }
        Ok(())
    }

    /// Validate the number of random restarts.
    pub fn validate_random_starts(starts: usize) -> Result<(), SsaError> {
        if starts == 0 {
            return Err(SsaError::InvalidRandomStarts(starts));
        }
        Ok(())
    }

    // ========================================================================
    // Data-Dependent Validation
    // ========================================================================

    /// Validate the selection mask against the matrix size.
    pub fn validate_selection(selection: &SelectionMask, numvars: usize) -> Result<(), SsaError> {
        if selection.len() != numvars {
            return Err(SsaError::InvalidInput(format!(
                "selection mask covers {} variables, matrix has {}",
                selection.len(),
                numvars
            )));
        }
        let got = selection.active_count();
        if got < 2 {
            return Err(SsaError::TooFewVariables { got, min: 2 });
        }
        Ok(())
    }

    /// Validate that a predefined starting configuration covers `numvars x maxd`.
    pub fn validate_initial<T: Float>(
        initial: &InitialConfiguration<T>,
        numvars: usize,
        maxd: usize,
    ) -> Result<(), SsaError> {
        if let InitialConfiguration::Predefined {
            coordinates,
            columns,
        } = initial
        {
            if *columns < maxd || coordinates.len() != numvars * columns {
                return Err(SsaError::InvalidStartingConfiguration {
                    expected: numvars * maxd.max(*columns),
                    got: coordinates.len(),
                });
            }
            if let Some(pos) = coordinates.iter().position(|v| !v.is_finite()) {
                return Err(SsaError::InvalidNumericValue(format!(
                    "starting coordinate {pos} is not finite"
                )));
            }
        }
        Ok(())
    }

    // ========================================================================
    // Builder Validation
    // ========================================================================

    /// Validate that exclusion and contiguity were not both requested.
    pub fn validate_missingness(exclusion: bool, contiguity: bool) -> Result<(), SsaError> {
        if exclusion && contiguity {
            return Err(SsaError::ConflictingMissingnessPolicy);
        }
        Ok(())
    }

    /// Validate that no parameters were set multiple times in the builder.
    pub fn validate_no_duplicates(duplicate_param: Option<&'static str>) -> Result<(), SsaError> {
        if let Some(param) = duplicate_param {
            return Err(SsaError::DuplicateParameter { parameter: param });
        }
        Ok(())
    }
}
