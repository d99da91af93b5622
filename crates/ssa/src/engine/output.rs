//! Output types and result aggregation for SSA sweeps.
//!
//! ## Purpose
//!
//! This module defines the `SweepResult` returned to callers: one entry per
//! dimensionality with its stress, coordinates, iteration count, and
//! convergence reason, plus the selection echo that maps coordinate rows back
//! to original variables.
//!
//! ## Design notes
//!
//! * **Immutable snapshot**: Results own their data and are never updated.
//! * **Ascending order**: Entries are stored in ascending dimensionality.
//! * **Failures as data**: A degenerate dimensionality keeps its error on the
//!   entry instead of aborting the sweep.
//! * **Ergonomics**: Implements `Display` for a scree table and coordinates.
//!
//! ## Key concepts
//!
//! * **Stress profile**: `(d, stress)` over the sweep, for an external elbow decision.
//! * **Display normalisation**: Each axis reversed and rescaled to `[-0.5, 0.5]`.
//!
//! ## Invariants
//!
//! * `coordinates[r]` belongs to original variable `variables[r]`.
//! * Degenerate entries have `stress == None` and empty coordinates.
//!
//! ## Non-goals
//!
//! * This module does not choose a best dimensionality.
//! * This module does not render plots.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::format;
#[cfg(not(feature = "std"))]
use alloc::string::String;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::string::String;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::fmt::{Debug, Display, Formatter, Result};
use num_traits::Float;

// Internal dependencies
use crate::engine::minimizer::{ConvergenceReason, MinimizerOutput};
use crate::evaluation::diagnostics::ShepardPoint;
use crate::math::scaling::normalize_axes;
use crate::primitives::errors::SsaError;
use crate::primitives::selection::SelectionMask;

// ============================================================================
// Per-Dimensionality Result
// ============================================================================

/// Result of one dimensionality of the sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionResult<T> {
    /// Dimensionality `d`.
    pub dimensionality: usize,

    /// Final stress (`None` when degenerate).
    pub stress: Option<T>,

    /// One row of `d` coordinates per active variable.
    pub coordinates: Vec<Vec<T>>,

    /// Step attempts made.
    pub iterations: usize,

    /// Why optimization stopped.
    pub reason: ConvergenceReason,

    /// Coefficient of alienation (if requested and defined).
    pub alienation: Option<T>,

    /// Shepard series (if requested).
    pub shepard: Option<Vec<ShepardPoint<T>>>,

    /// Stress of the start and of every accepted step.
    pub history: Vec<T>,

    /// Why the dimensionality could not be optimized.
    pub error: Option<SsaError>,
}

impl<T: Float> DimensionResult<T> {
    /// Copy a minimizer snapshot into a result entry.
    pub fn from_output(
        output: MinimizerOutput<T>,
        alienation: Option<T>,
        shepard: Option<Vec<ShepardPoint<T>>>,
    ) -> Self {
        let dim = output.dimensionality;
        Self {
            dimensionality: dim,
            stress: Some(output.stress),
            coordinates: output
                .coordinates
                .chunks_exact(dim.max(1))
                .map(|row| row.to_vec())
                .collect(),
            iterations: output.iterations,
            reason: output.reason,
            alienation,
            shepard,
            history: output.history,
            error: None,
        }
    }

    /// Entry for a dimensionality that could not be optimized.
    pub fn degenerate(dimensionality: usize, error: SsaError) -> Self {
        Self {
            dimensionality,
            stress: None,
            coordinates: Vec::new(),
            iterations: 0,
            reason: ConvergenceReason::Degenerate,
            alienation: None,
            shepard: None,
            history: Vec::new(),
            error: Some(error),
        }
    }

    /// Whether the dimensionality was optimized.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.reason == ConvergenceReason::Degenerate
    }
}

// ============================================================================
// Sweep Result
// ============================================================================

/// Full result of a dimensionality sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepResult<T> {
    /// Run title.
    pub title: Option<String>,

    /// Run footnote.
    pub footnote: Option<String>,

    /// Number of variables in the input matrix.
    pub numvars: usize,

    /// Original index of each coordinate row.
    pub variables: Vec<usize>,

    /// Selection mask the sweep ran with.
    pub selection: SelectionMask,

    /// One entry per dimensionality, ascending.
    pub dimensions: Vec<DimensionResult<T>>,
}

impl<T: Float> SweepResult<T> {
    /// Attach the selection echo to per-dimensionality results.
    pub fn assemble(
        mut dimensions: Vec<DimensionResult<T>>,
        selection: &SelectionMask,
        title: Option<String>,
        footnote: Option<String>,
    ) -> Self {
        dimensions.sort_by_key(|d| d.dimensionality);
        Self {
            title,
            footnote,
            numvars: selection.len(),
            variables: selection.active_indices(),
            selection: selection.clone(),
            dimensions,
        }
    }

    /// Entry of dimensionality `d`.
    pub fn get(&self, d: usize) -> Option<&DimensionResult<T>> {
        self.dimensions.iter().find(|r| r.dimensionality == d)
    }

    /// `(d, stress)` for every dimensionality.
    pub fn stress_profile(&self) -> Vec<(usize, Option<T>)> {
        self.dimensions
            .iter()
            .map(|r| (r.dimensionality, r.stress))
            .collect()
    }

    /// Coordinates of original variable `var` in dimensionality `d`.
    pub fn coordinates_of(&self, var: usize, d: usize) -> Option<&[T]> {
        let row = self.variables.iter().position(|&v| v == var)?;
        self.get(d)?.coordinates.get(row).map(|r| r.as_slice())
    }

    /// Coordinates of dimensionality `d` with each axis reversed and rescaled to `[-0.5, 0.5]`.
    pub fn normalized_coordinates(&self, d: usize) -> Option<Vec<Vec<T>>> {
        let entry = self.get(d)?;
        if entry.coordinates.is_empty() {
            return None;
        }
        let flat: Vec<T> = entry.coordinates.iter().flatten().copied().collect();
        let points = entry.coordinates.len();
        Some(
            normalize_axes(&flat, points, d)
                .chunks_exact(d)
                .map(|row| row.to_vec())
                .collect(),
        )
    }
}

// ============================================================================
// Display Implementation
// ============================================================================

impl<T: Float + Display + Debug> Display for SweepResult<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        if let Some(title) = &self.title {
            writeln!(f, "{title}")?;
            writeln!(f)?;
        }

        writeln!(f, "Summary:")?;
        writeln!(f, "  Variables: {} of {}", self.variables.len(), self.numvars)?;
        writeln!(f)?;

        writeln!(f, "Stress Profile:")?;
        writeln!(
            f,
            "{:>6} {:>12} {:>12} {:>8}  Reason",
            "Dim", "Stress", "Alienation", "Iter"
        )?;
        writeln!(f, "{:-<54}", "")?;
        for r in &self.dimensions {
            let stress = r
                .stress
                .map(|s| format!("{:.6}", s.to_f64().unwrap_or(f64::NAN)))
                .unwrap_or_else(|| "-".into());
            let alien = r
                .alienation
                .map(|s| format!("{:.6}", s.to_f64().unwrap_or(f64::NAN)))
                .unwrap_or_else(|| "-".into());
            writeln!(
                f,
                "{:>6} {:>12} {:>12} {:>8}  {:?}",
                r.dimensionality, stress, alien, r.iterations, r.reason
            )?;
        }

        for r in self.dimensions.iter().filter(|r| !r.is_degenerate()) {
            writeln!(f)?;
            writeln!(f, "Coordinates (d = {}):", r.dimensionality)?;
            for (row, coords) in self.variables.iter().zip(&r.coordinates) {
                write!(f, "{row:>6}")?;
                for c in coords {
                    write!(f, " {:>10.4}", c.to_f64().unwrap_or(f64::NAN))?;
                }
                writeln!(f)?;
            }
        }

        if let Some(note) = &self.footnote {
            writeln!(f)?;
            writeln!(f, "{note}")?;
        }

        Ok(())
    }
}
