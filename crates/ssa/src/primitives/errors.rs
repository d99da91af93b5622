//! Error types for SSA operations.
//!
//! ## Purpose
//!
//! This module defines the error conditions that can occur while preparing and
//! running a Smallest Space Analysis: matrix shape and symmetry problems,
//! selection misuse, invalid dimensionality ranges, and numeric parameter
//! constraints.
//!
//! ## Design notes
//!
//! * **Contextual**: Errors include the offending indices, counts, or values.
//! * **Deferred**: Builder misconfiguration is stored and reported by `build()`.
//! * **No-std**: Supports `no_std` environments by using `alloc` for dynamic messages.
//! * **Trait Implementation**: Implements `Display` and `std::error::Error` (when `std` is enabled).
//!
//! ## Key concepts
//!
//! 1. **Input validation**: Matrix shape, symmetry, finite values, selection size.
//! 2. **Parameter validation**: Dimensionality range, iterations, tolerances, step size.
//! 3. **Policy validation**: Missing-data exclusion and contiguity coefficients are exclusive.
//! 4. **Per-dimensionality failures**: `InsufficientData` is recorded on a sweep
//!    entry instead of aborting the whole sweep.
//!
//! ## Non-goals
//!
//! * This module does not perform the validation logic itself.
//! * This module does not provide error recovery or fallback strategies.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::String;
#[cfg(feature = "std")]
use std::error::Error;
#[cfg(feature = "std")]
use std::string::String;

// External dependencies
use core::fmt::{Display, Formatter, Result};

// ============================================================================
// Error Type
// ============================================================================

/// Error type for SSA operations.
#[derive(Debug, Clone, PartialEq)]
pub enum SsaError {
    /// The proximity matrix holds no values.
    EmptyInput,

    /// Generic invalid input error with a descriptive message.
    InvalidInput(String),

    /// Input data contains NaN, infinite, or otherwise unusable values.
    InvalidNumericValue(String),

    /// The matrix data does not fill the layout implied by its shape tag.
    InvalidMatrixShape(String),

    /// Mirrored entries of a full symmetric matrix disagree beyond tolerance.
    AsymmetryError {
        /// Row of the upper-triangle entry.
        row: usize,
        /// Column of the upper-triangle entry.
        col: usize,
        /// Value at `(row, col)`.
        upper: f64,
        /// Value at `(col, row)`.
        lower: f64,
    },

    /// A variable index is outside `[0, numvars)`.
    IndexOutOfRange {
        /// The index provided.
        index: usize,
        /// Number of variables.
        len: usize,
    },

    /// The requested dimensionality range is empty or starts below 1.
    InvalidDimensionalityRange {
        /// Lowest requested dimensionality.
        mind: usize,
        /// Highest requested dimensionality.
        maxd: usize,
    },

    /// Too few active points to place in the requested dimensionality.
    InsufficientData {
        /// Active points available.
        points: usize,
        /// Requested dimensionality.
        dimensionality: usize,
        /// Minimum number of points required.
        min: usize,
    },

    /// Missing-data exclusion and contiguity coefficients were both requested.
    ConflictingMissingnessPolicy,

    /// Fewer than two variables are selected.
    TooFewVariables {
        /// Number of selected variables.
        got: usize,
        /// Minimum required.
        min: usize,
    },

    /// Iteration cap must be in `[1, 100000]`.
    InvalidIterations(usize),

    /// Tolerances must be non-negative and finite.
    InvalidTolerance(f64),

    /// The initial step size must be positive and finite.
    InvalidStepSize(f64),

    /// At least one random start is required.
    InvalidRandomStarts(usize),

    /// A predefined starting configuration does not match `numvars * maxd`.
    InvalidStartingConfiguration {
        /// Expected number of coordinates.
        expected: usize,
        /// Number of coordinates provided.
        got: usize,
    },

    /// Parameter was set multiple times in the builder.
    DuplicateParameter {
        /// Name of the parameter that was set multiple times.
        parameter: &'static str,
    },
}

// ============================================================================
// Display Implementation
// ============================================================================

impl Display for SsaError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::EmptyInput => write!(f, "Proximity matrix is empty"),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {msg}"),
            Self::InvalidNumericValue(s) => write!(f, "Invalid numeric value: {s}"),
            Self::InvalidMatrixShape(msg) => write!(f, "Invalid matrix shape: {msg}"),
            Self::AsymmetryError {
                row,
                col,
                upper,
                lower,
            } => {
                write!(
                    f,
                    "Asymmetric matrix: entry ({row}, {col}) = {upper} but ({col}, {row}) = {lower}"
                )
            }
            Self::IndexOutOfRange { index, len } => {
                write!(f, "Variable index {index} out of range (numvars = {len})")
            }
            Self::InvalidDimensionalityRange { mind, maxd } => {
                write!(
                    f,
                    "Invalid dimensionality range: mind = {mind}, maxd = {maxd} (need 1 <= mind <= maxd)"
                )
            }
            Self::InsufficientData {
                points,
                dimensionality,
                min,
            } => {
                write!(
                    f,
                    "Insufficient data: {points} active points cannot be scaled in {dimensionality} dimensions (need at least {min})"
                )
            }
            Self::ConflictingMissingnessPolicy => {
                write!(
                    f,
                    "Missing-data exclusion and contiguity coefficients are mutually exclusive"
                )
            }
            Self::TooFewVariables { got, min } => {
                write!(f, "Too few selected variables: got {got}, need at least {min}")
            }
            Self::InvalidIterations(iter) => {
                write!(f, "Invalid iterations: {iter} (must be in [1, 100000])")
            }
            Self::InvalidTolerance(tol) => {
                write!(f, "Invalid tolerance: {tol} (must be >= 0 and finite)")
            }
            Self::InvalidStepSize(step) => {
                write!(f, "Invalid step size: {step} (must be > 0 and finite)")
            }
            Self::InvalidRandomStarts(n) => {
                write!(f, "Invalid random starts: {n} (must be at least 1)")
            }
            Self::InvalidStartingConfiguration { expected, got } => {
                write!(
                    f,
                    "Invalid starting configuration: expected {expected} coordinates, got {got}"
                )
            }
            Self::DuplicateParameter { parameter } => {
                write!(
                    f,
                    "Parameter '{parameter}' was set multiple times. Each parameter can only be configured once."
                )
            }
        }
    }
}

// ============================================================================
// Standard Error Trait
// ============================================================================

#[cfg(feature = "std")]
impl Error for SsaError {}
