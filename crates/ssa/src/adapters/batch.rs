//! Batch adapter for Smallest Space Analysis.
//!
//! ## Purpose
//!
//! This module provides the batch execution adapter. It takes a complete
//! proximity matrix, canonicalizes it under the configured missing-data
//! policy and selection, sweeps every requested dimensionality, and returns
//! the assembled `SweepResult`.
//!
//! ## Design notes
//!
//! * **Processing**: Processes the whole matrix in memory in a single call.
//! * **Fail fast**: Every configuration error surfaces from `build()` or from
//!   canonicalization, before any optimization runs.
//! * **Delegation**: Delegates computation to the execution engine.
//! * **Generics**: Generic over `Float` types.
//!
//! ## Key concepts
//!
//! * **Builder Pattern**: Fluent API for configuration with sensible defaults.
//! * **Deferred errors**: Conflicting missing-data requests are stored and
//!   reported by `build()`.
//!
//! ## Invariants
//!
//! * At least 2 variables are selected.
//! * `1 <= mind <= maxd`.
//! * At most one missing-data mode is active.
//!
//! ## Non-goals
//!
//! * This adapter does not parse files or detect matrix formats.
//! * This adapter does not run dimensionalities in parallel by itself.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::String;
#[cfg(feature = "std")]
use std::string::String;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::algorithms::initial::InitialConfiguration;
use crate::algorithms::proximity::canonicalize;
use crate::algorithms::regression::MonotonicityMode;
use crate::engine::executor::{SweepConfig, SweepExecutor, SweepPassFn};
use crate::engine::minimizer::MinimizerConfig;
use crate::engine::output::SweepResult;
use crate::engine::validator::Validator;
use crate::primitives::cancel::CancellationToken;
use crate::primitives::errors::SsaError;
use crate::primitives::matrix::{ContiguityCoefficient, MissingnessPolicy, ProximityMatrix};
use crate::primitives::selection::SelectionMask;

// ============================================================================
// Batch SSA Builder
// ============================================================================

/// Builder for the batch SSA processor.
#[derive(Debug, Clone)]
pub struct BatchSsaBuilder<T: Float> {
    /// Lowest dimensionality.
    pub mind: usize,

    /// Highest dimensionality.
    pub maxd: usize,

    /// Ratio transform instead of a monotone step function.
    pub metric: bool,

    /// Scope of the monotone mapping.
    pub monotonicity: MonotonicityMode,

    /// Missing-data handling.
    pub missingness: MissingnessPolicy<T>,

    /// Starting configuration strategy.
    pub initial: InitialConfiguration<T>,

    /// Maximum step attempts per run.
    pub max_iterations: usize,

    /// Minimum accepted stress improvement.
    pub tolerance: T,

    /// Stress at which a run stops immediately.
    pub min_stress: T,

    /// Initial relative step size.
    pub step_size: T,

    /// Random restarts per dimensionality.
    pub random_starts: usize,

    /// Run seed for random placements.
    pub seed: u64,

    /// Relative tolerance for mirrored entries.
    pub symmetry_tolerance: T,

    /// Variable selection (all variables when `None`).
    pub selection: Option<SelectionMask>,

    /// Run title.
    pub title: Option<String>,

    /// Run footnote.
    pub footnote: Option<String>,

    /// Whether to compute the coefficient of alienation.
    pub return_alienation: bool,

    /// Whether to compute Shepard series.
    pub return_shepard: bool,

    /// Cooperative cancellation.
    pub cancel: Option<CancellationToken>,

    /// Deferred error from adapter conversion.
    pub deferred_error: Option<SsaError>,

    // ++++++++++++++++++++++++++++++++++++++
    // +               DEV                  +
    // ++++++++++++++++++++++++++++++++++++++
    /// Custom sweep pass function.
    #[doc(hidden)]
    pub custom_sweep_pass: Option<SweepPassFn<T>>,

    /// Parallel execution hint.
    #[doc(hidden)]
    pub parallel: Option<bool>,

    /// Tracks if any parameter was set multiple times (for validation)
    #[doc(hidden)]
    pub(crate) duplicate_param: Option<&'static str>,
}

impl<T: Float> Default for BatchSsaBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> BatchSsaBuilder<T> {
    /// Create a new batch SSA builder with default parameters.
    fn new() -> Self {
        let minimizer = MinimizerConfig::<T>::default();
        Self {
            mind: 1,
            maxd: 3,
            metric: false,
            monotonicity: MonotonicityMode::default(),
            missingness: MissingnessPolicy::default(),
            initial: InitialConfiguration::default(),
            max_iterations: minimizer.max_iterations,
            tolerance: minimizer.tolerance,
            min_stress: minimizer.min_stress,
            step_size: minimizer.step_size,
            random_starts: minimizer.random_starts,
            seed: minimizer.seed,
            symmetry_tolerance: T::from(1e-6).unwrap_or_else(T::epsilon),
            selection: None,
            title: None,
            footnote: None,
            return_alienation: false,
            return_shepard: false,
            cancel: None,
            deferred_error: None,
            custom_sweep_pass: None,
            parallel: None,
            duplicate_param: None,
        }
    }

    // ========================================================================
    // Setters
    // ========================================================================

    /// Set the dimensionality range.
    pub fn dimensions(mut self, mind: usize, maxd: usize) -> Self {
        self.mind = mind;
        self.maxd = maxd;
        self
    }

    /// Use the ratio transform instead of a monotone step function.
    pub fn metric(mut self, enabled: bool) -> Self {
        self.metric = enabled;
        self
    }

    /// Set the scope of the monotone mapping.
    pub fn monotonicity(mut self, mode: MonotonicityMode) -> Self {
        self.monotonicity = mode;
        self
    }

    /// Exclude pairs whose raw value equals `marker`.
    pub fn exclude_missing(mut self, marker: T) -> Self {
        if matches!(self.missingness, MissingnessPolicy::ContiguityCoefficient(_)) {
            self.deferred_error = Some(SsaError::ConflictingMissingnessPolicy);
        }
        self.missingness = MissingnessPolicy::ExcludeMissing(marker);
        self
    }

    /// Derive dissimilarities from dichotomous profiles with `coef`.
    pub fn contiguity_coefficient(mut self, coef: ContiguityCoefficient) -> Self {
        if matches!(self.missingness, MissingnessPolicy::ExcludeMissing(_)) {
            self.deferred_error = Some(SsaError::ConflictingMissingnessPolicy);
        }
        self.missingness = MissingnessPolicy::ContiguityCoefficient(coef);
        self
    }

    /// Set the starting configuration strategy.
    pub fn initial_configuration(mut self, initial: InitialConfiguration<T>) -> Self {
        self.initial = initial;
        self
    }

    /// Set the iteration cap per run.
    pub fn max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = iterations;
        self
    }

    /// Set the convergence tolerance.
    pub fn tolerance(mut self, tolerance: T) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the stress at which a run stops immediately.
    pub fn min_stress(mut self, stress: T) -> Self {
        self.min_stress = stress;
        self
    }

    /// Set the initial relative step size.
    pub fn step_size(mut self, step: T) -> Self {
        self.step_size = step;
        self
    }

    /// Set the number of random restarts.
    pub fn random_starts(mut self, starts: usize) -> Self {
        self.random_starts = starts;
        self
    }

    /// Set the run seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the relative tolerance for mirrored entries.
    pub fn symmetry_tolerance(mut self, tolerance: T) -> Self {
        self.symmetry_tolerance = tolerance;
        self
    }

    /// Restrict the run to the variables selected in `selection`.
    pub fn selection(mut self, selection: SelectionMask) -> Self {
        self.selection = Some(selection);
        self
    }

    // ========================================================================
    // Batch-Specific Setters
    // ========================================================================

    /// Set the run title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the run footnote.
    pub fn footnote(mut self, footnote: impl Into<String>) -> Self {
        self.footnote = Some(footnote.into());
        self
    }

    /// Compute the coefficient of alienation per dimensionality.
    pub fn return_alienation(mut self, enabled: bool) -> Self {
        self.return_alienation = enabled;
        self
    }

    /// Compute the Shepard series per dimensionality.
    pub fn return_shepard(mut self, enabled: bool) -> Self {
        self.return_shepard = enabled;
        self
    }

    /// Attach a cancellation token.
    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    // ++++++++++++++++++++++++++++++++++++++
    // +               DEV                  +
    // ++++++++++++++++++++++++++++++++++++++

    /// Set parallel execution hint.
    #[doc(hidden)]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = Some(parallel);
        self
    }

    /// Set a custom sweep pass function.
    #[doc(hidden)]
    pub fn custom_sweep_pass(mut self, pass: SweepPassFn<T>) -> Self {
        self.custom_sweep_pass = Some(pass);
        self
    }

    // ========================================================================
    // Build Method
    // ========================================================================

    /// Build the batch processor.
    pub fn build(self) -> Result<BatchSsa<T>, SsaError> {
        if let Some(err) = self.deferred_error {
            return Err(err);
        }

        // Check for duplicate parameter configuration
        Validator::validate_no_duplicates(self.duplicate_param)?;

        // Validate sweep range
        Validator::validate_dimensionality_range(self.mind, self.maxd)?;

        // Validate minimizer controls
        Validator::validate_iterations(self.max_iterations)?;
        Validator::validate_tolerance(self.tolerance)?;
        Validator::validate_tolerance(self.min_stress)?;
        Validator::validate_tolerance(self.symmetry_tolerance)?;
        Validator::validate_step_size(self.step_size)?;
        Validator::validate_random_starts(self.random_starts)?;

        Ok(BatchSsa { config: self })
    }
}

// ============================================================================
// Batch SSA Processor
// ============================================================================

/// Batch SSA processor.
#[derive(Debug, Clone)]
pub struct BatchSsa<T: Float> {
    config: BatchSsaBuilder<T>,
}

impl<T: Float> BatchSsa<T> {
    /// Run the sweep on `matrix`.
    pub fn fit(&self, matrix: &ProximityMatrix<T>) -> Result<SweepResult<T>, SsaError> {
        let cfg = &self.config;

        let selection = cfg
            .selection
            .clone()
            .unwrap_or_else(|| SelectionMask::new(matrix.numvars));
        Validator::validate_selection(&selection, matrix.numvars)?;
        Validator::validate_initial(&cfg.initial, matrix.numvars, cfg.maxd)?;

        let dissim = canonicalize(matrix, &cfg.missingness, &selection, cfg.symmetry_tolerance)?;

        let sweep = SweepConfig {
            mind: cfg.mind,
            maxd: cfg.maxd,
            monotonicity: cfg.monotonicity,
            metric: cfg.metric,
            minimizer: MinimizerConfig {
                max_iterations: cfg.max_iterations,
                tolerance: cfg.tolerance,
                min_stress: cfg.min_stress,
                step_size: cfg.step_size,
                random_starts: cfg.random_starts,
                initial: cfg.initial.clone(),
                seed: cfg.seed,
                cancel: cfg.cancel.clone(),
            },
            return_alienation: cfg.return_alienation,
            return_shepard: cfg.return_shepard,
            // ++++++++++++++++++++++++++++++++++++++
            // +               DEV                  +
            // ++++++++++++++++++++++++++++++++++++++
            custom_sweep_pass: cfg.custom_sweep_pass,
            parallel: cfg.parallel.unwrap_or(false),
        };

        let dimensions = SweepExecutor::new(sweep).run(&dissim)?;

        Ok(SweepResult::assemble(
            dimensions,
            &selection,
            cfg.title.clone(),
            cfg.footnote.clone(),
        ))
    }
}
