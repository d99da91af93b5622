//! Batch adapter for parallel Smallest Space Analysis.
//!
//! ## Purpose
//!
//! This module wraps the `ssa` batch adapter and injects the parallel sweep
//! pass, so every dimensionality of the sweep runs as its own `rayon` task.
//!
//! ## Design notes
//!
//! * **Delegation**: Configuration and validation live in the `ssa` builder.
//! * **Parallelism**: Adds parallel execution via `rayon` (fastSSA extension).
//! * **Inputs**: `fit` accepts any `SsaInput` (matrices, rows, `ndarray`).
//!
//! ## Invariants
//!
//! * Parallel and sequential runs return identical results.
//!
//! ## Non-goals
//!
//! * This adapter does not parallelize inside one dimensionality.

// Feature-gated imports
#[cfg(feature = "cpu")]
use crate::engine::executor::sweep_pass_parallel;

// External dependencies
use num_traits::Float;
use std::result::Result;

// Export dependencies from ssa crate
use ssa::internals::adapters::batch::BatchSsaBuilder;
use ssa::internals::algorithms::initial::InitialConfiguration;
use ssa::internals::algorithms::regression::MonotonicityMode;
use ssa::internals::engine::output::SweepResult;
use ssa::internals::primitives::cancel::CancellationToken;
use ssa::internals::primitives::errors::SsaError;
use ssa::internals::primitives::matrix::ContiguityCoefficient;
use ssa::internals::primitives::selection::SelectionMask;

// Internal dependencies
use crate::input::SsaInput;

// ============================================================================
// Extended Batch SSA Builder
// ============================================================================

/// Builder for the batch SSA processor with parallel support.
#[derive(Debug, Clone)]
pub struct ParallelBatchSsaBuilder<T: Float> {
    /// Base builder from the ssa crate
    pub base: BatchSsaBuilder<T>,
}

impl<T: Float> Default for ParallelBatchSsaBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> ParallelBatchSsaBuilder<T> {
    /// Create a new builder with parallel execution enabled.
    fn new() -> Self {
        Self {
            base: BatchSsaBuilder::default().parallel(true),
        }
    }

    /// Set parallel execution mode.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.base = self.base.parallel(parallel);
        self
    }

    // ========================================================================
    // Shared Setters
    // ========================================================================

    /// Set the dimensionality range.
    pub fn dimensions(mut self, mind: usize, maxd: usize) -> Self {
        self.base = self.base.dimensions(mind, maxd);
        self
    }

    /// Use the ratio transform instead of a monotone step function.
    pub fn metric(mut self, enabled: bool) -> Self {
        self.base = self.base.metric(enabled);
        self
    }

    /// Set the scope of the monotone mapping.
    pub fn monotonicity(mut self, mode: MonotonicityMode) -> Self {
        self.base = self.base.monotonicity(mode);
        self
    }

    /// Exclude pairs whose raw value equals `marker`.
    pub fn exclude_missing(mut self, marker: T) -> Self {
        self.base = self.base.exclude_missing(marker);
        self
    }

    /// Derive dissimilarities from dichotomous profiles.
    pub fn contiguity_coefficient(mut self, coef: ContiguityCoefficient) -> Self {
        self.base = self.base.contiguity_coefficient(coef);
        self
    }

    /// Set the starting configuration strategy.
    pub fn initial_configuration(mut self, initial: InitialConfiguration<T>) -> Self {
        self.base = self.base.initial_configuration(initial);
        self
    }

    /// Set the iteration cap per run.
    pub fn max_iterations(mut self, iterations: usize) -> Self {
        self.base = self.base.max_iterations(iterations);
        self
    }

    /// Set the convergence tolerance.
    pub fn tolerance(mut self, tolerance: T) -> Self {
        self.base = self.base.tolerance(tolerance);
        self
    }

    /// Set the stress at which a run stops immediately.
    pub fn min_stress(mut self, stress: T) -> Self {
        self.base = self.base.min_stress(stress);
        self
    }

    /// Set the initial relative step size.
    pub fn step_size(mut self, step: T) -> Self {
        self.base = self.base.step_size(step);
        self
    }

    /// Set the number of random restarts.
    pub fn random_starts(mut self, starts: usize) -> Self {
        self.base = self.base.random_starts(starts);
        self
    }

    /// Set the run seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.base = self.base.seed(seed);
        self
    }

    /// Set the relative tolerance for mirrored entries.
    pub fn symmetry_tolerance(mut self, tolerance: T) -> Self {
        self.base = self.base.symmetry_tolerance(tolerance);
        self
    }

    /// Restrict the run to the selected variables.
    pub fn selection(mut self, selection: SelectionMask) -> Self {
        self.base = self.base.selection(selection);
        self
    }

    /// Attach a cancellation token.
    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.base = self.base.cancellation(token);
        self
    }

    // ========================================================================
    // Batch-Specific Setters
    // ========================================================================

    /// Set the run title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.base = self.base.title(title);
        self
    }

    /// Set the run footnote.
    pub fn footnote(mut self, footnote: impl Into<String>) -> Self {
        self.base = self.base.footnote(footnote);
        self
    }

    /// Compute the coefficient of alienation per dimensionality.
    pub fn return_alienation(mut self, enabled: bool) -> Self {
        self.base = self.base.return_alienation(enabled);
        self
    }

    /// Compute the Shepard series per dimensionality.
    pub fn return_shepard(mut self, enabled: bool) -> Self {
        self.base = self.base.return_shepard(enabled);
        self
    }

    // ========================================================================
    // Build Method
    // ========================================================================

    /// Build the parallel batch processor.
    pub fn build(self) -> Result<ParallelBatchSsa<T>, SsaError> {
        // Check for deferred errors from adapter conversion
        if let Some(ref err) = self.base.deferred_error {
            return Err(err.clone());
        }

        // Validation logic is centralized in the ssa crate
        let _ = self.base.clone().build()?;

        Ok(ParallelBatchSsa { config: self })
    }
}

// ============================================================================
// Extended Batch SSA Processor
// ============================================================================

/// Batch SSA processor with parallel support.
#[derive(Debug, Clone)]
pub struct ParallelBatchSsa<T: Float> {
    config: ParallelBatchSsaBuilder<T>,
}

impl<T: Float + Send + Sync + 'static> ParallelBatchSsa<T> {
    /// Run the sweep on `matrix`.
    pub fn fit<I>(&self, matrix: &I) -> Result<SweepResult<T>, SsaError>
    where
        I: SsaInput<T> + ?Sized,
    {
        let matrix = matrix.as_proximity_matrix()?;

        let mut builder = self.config.base.clone();

        #[cfg(feature = "cpu")]
        {
            if builder.parallel.unwrap_or(true) {
                builder = builder.custom_sweep_pass(sweep_pass_parallel);
            } else {
                builder.custom_sweep_pass = None;
            }
        }
        #[cfg(not(feature = "cpu"))]
        {
            // Fallback to sequential if cpu feature is disabled
            builder.custom_sweep_pass = None;
        }

        // Delegate execution to the base implementation
        let processor = builder.build()?;
        processor.fit(&matrix)
    }
}
