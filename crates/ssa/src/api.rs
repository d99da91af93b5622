//! High-level API for Smallest Space Analysis.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry points. It implements a
//! fluent builder for configuring a sweep and choosing an execution adapter,
//! and the single-call `run_ssa` boundary that takes a matrix and a plain
//! parameter record.
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builder with sensible defaults for all parameters.
//! * **Polymorphic**: Uses marker types to transition to specialized adapter builders.
//! * **Validated**: Parameters are validated when `.build()` is called on the adapter.
//! * **Type-Safe**: Generic over `Float` types for flexible precision.
//!
//! ## Key concepts
//!
//! * **Configuration Flow**: Builder pattern ending in `.adapter(Adapter::Batch)`.
//! * **Parameter record**: `SsaParameters` mirrors a host's run configuration
//!   and can be (de)serialized with the `serde` feature.
//!
//! ### Configuration Flow
//!
//! 1. Create an [`SsaBuilder`] via `Ssa::new()`.
//! 2. Chain configuration methods (`.dimensions()`, `.monotonicity()`, etc.).
//! 3. Select an adapter via `.adapter(Adapter::Batch)` to get an execution builder.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::String;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::string::String;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::adapters::batch::BatchSsaBuilder;
use crate::engine::executor::SweepPassFn;
use crate::engine::validator::Validator;

// Publicly re-exported types
pub use crate::algorithms::initial::InitialConfiguration;
pub use crate::algorithms::regression::MonotonicityMode;
pub use crate::engine::minimizer::ConvergenceReason;
pub use crate::engine::output::{DimensionResult, SweepResult};
pub use crate::evaluation::diagnostics::ShepardPoint;
pub use crate::primitives::cancel::CancellationToken;
pub use crate::primitives::errors::SsaError;
pub use crate::primitives::matrix::{
    ContiguityCoefficient, MatrixShape, MissingnessPolicy, Orientation, ProximityMatrix,
};
pub use crate::primitives::selection::SelectionMask;

/// Marker types for selecting execution adapters.
#[allow(non_snake_case)]
pub mod Adapter {
    pub use super::Batch;
}

/// Fluent builder for configuring SSA parameters and execution modes.
#[derive(Debug, Clone)]
pub struct SsaBuilder<T> {
    /// Dimensionality range `(mind, maxd)`.
    pub dimensions: Option<(usize, usize)>,

    /// Ratio transform instead of a monotone step function.
    pub metric: Option<bool>,

    /// Scope of the monotone mapping.
    pub monotonicity: Option<MonotonicityMode>,

    /// Missing-data marker.
    pub missing_marker: Option<T>,

    /// Contiguity coefficient for dichotomous profiles.
    pub contiguity: Option<ContiguityCoefficient>,

    /// Starting configuration strategy.
    pub initial: Option<InitialConfiguration<T>>,

    /// Iteration cap per run.
    pub max_iterations: Option<usize>,

    /// Minimum accepted stress improvement.
    pub tolerance: Option<T>,

    /// Stress at which a run stops immediately.
    pub min_stress: Option<T>,

    /// Initial relative step size.
    pub step_size: Option<T>,

    /// Random restarts per dimensionality.
    pub random_starts: Option<usize>,

    /// Run seed.
    pub seed: Option<u64>,

    /// Relative tolerance for mirrored entries.
    pub symmetry_tolerance: Option<T>,

    /// Variable selection.
    pub selection: Option<SelectionMask>,

    /// Run title.
    pub title: Option<String>,

    /// Run footnote.
    pub footnote: Option<String>,

    /// Compute the coefficient of alienation.
    pub return_alienation: Option<bool>,

    /// Compute Shepard series.
    pub return_shepard: Option<bool>,

    /// Cooperative cancellation.
    pub cancel: Option<CancellationToken>,

    // ======================================
    // DEV
    // ======================================
    /// Custom sweep pass function.
    #[doc(hidden)]
    pub custom_sweep_pass: Option<SweepPassFn<T>>,

    /// Parallel execution hint.
    #[doc(hidden)]
    pub parallel: Option<bool>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl<T: Float> Default for SsaBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> SsaBuilder<T> {
    /// Select an execution adapter to transition to an execution builder.
    pub fn adapter<A>(self, _adapter: A) -> A::Output
    where
        A: SsaAdapter<T>,
    {
        A::convert(self)
    }

    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            dimensions: None,
            metric: None,
            monotonicity: None,
            missing_marker: None,
            contiguity: None,
            initial: None,
            max_iterations: None,
            tolerance: None,
            min_stress: None,
            step_size: None,
            random_starts: None,
            seed: None,
            symmetry_tolerance: None,
            selection: None,
            title: None,
            footnote: None,
            return_alienation: None,
            return_shepard: None,
            cancel: None,
            custom_sweep_pass: None,
            parallel: None,
            duplicate_param: None,
        }
    }

    /// Set the dimensionality range `[mind, maxd]`.
    pub fn dimensions(mut self, mind: usize, maxd: usize) -> Self {
        if self.dimensions.is_some() {
            self.duplicate_param = Some("dimensions");
        }
        self.dimensions = Some((mind, maxd));
        self
    }

    /// Use the ratio transform `b * delta` instead of a monotone step function.
    pub fn metric(mut self) -> Self {
        if self.metric.is_some() {
            self.duplicate_param = Some("metric");
        }
        self.metric = Some(true);
        self
    }

    /// Set the scope of the monotone mapping.
    pub fn monotonicity(mut self, mode: MonotonicityMode) -> Self {
        if self.monotonicity.is_some() {
            self.duplicate_param = Some("monotonicity");
        }
        self.monotonicity = Some(mode);
        self
    }

    /// Exclude pairs whose raw value equals `marker` (NaN matches NaN).
    pub fn exclude_missing(mut self, marker: T) -> Self {
        if self.missing_marker.is_some() {
            self.duplicate_param = Some("exclude_missing");
        }
        self.missing_marker = Some(marker);
        self
    }

    /// Derive dissimilarities from dichotomous profiles.
    pub fn contiguity_coefficient(mut self, coef: ContiguityCoefficient) -> Self {
        if self.contiguity.is_some() {
            self.duplicate_param = Some("contiguity_coefficient");
        }
        self.contiguity = Some(coef);
        self
    }

    /// Set the starting configuration strategy.
    pub fn initial_configuration(mut self, initial: InitialConfiguration<T>) -> Self {
        if self.initial.is_some() {
            self.duplicate_param = Some("initial_configuration");
        }
        self.initial = Some(initial);
        self
    }

    /// Start every dimensionality from caller-supplied coordinates.
    ///
    /// `coordinates` holds one row of `columns` values per original variable;
    /// dimensionality `d` uses the first `d` columns.
    pub fn predefined_start(self, coordinates: Vec<T>, columns: usize) -> Self {
        self.initial_configuration(InitialConfiguration::Predefined {
            coordinates,
            columns,
        })
    }

    /// Set the iteration cap per run.
    pub fn max_iterations(mut self, iterations: usize) -> Self {
        if self.max_iterations.is_some() {
            self.duplicate_param = Some("max_iterations");
        }
        self.max_iterations = Some(iterations);
        self
    }

    /// Set the minimum accepted stress improvement.
    pub fn tolerance(mut self, tolerance: T) -> Self {
        if self.tolerance.is_some() {
            self.duplicate_param = Some("tolerance");
        }
        self.tolerance = Some(tolerance);
        self
    }

    /// Set the stress at which a run stops immediately.
    pub fn min_stress(mut self, stress: T) -> Self {
        if self.min_stress.is_some() {
            self.duplicate_param = Some("min_stress");
        }
        self.min_stress = Some(stress);
        self
    }

    /// Set the initial relative step size.
    pub fn step_size(mut self, step: T) -> Self {
        if self.step_size.is_some() {
            self.duplicate_param = Some("step_size");
        }
        self.step_size = Some(step);
        self
    }

    /// Set the number of random restarts per dimensionality.
    pub fn random_starts(mut self, starts: usize) -> Self {
        if self.random_starts.is_some() {
            self.duplicate_param = Some("random_starts");
        }
        self.random_starts = Some(starts);
        self
    }

    /// Set the seed of random placements.
    ///
    /// The same seed reproduces a run exactly, sequential or parallel.
    pub fn seed(mut self, seed: u64) -> Self {
        if self.seed.is_some() {
            self.duplicate_param = Some("seed");
        }
        self.seed = Some(seed);
        self
    }

    /// Set the relative tolerance for mirrored entries of full matrices.
    pub fn symmetry_tolerance(mut self, tolerance: T) -> Self {
        if self.symmetry_tolerance.is_some() {
            self.duplicate_param = Some("symmetry_tolerance");
        }
        self.symmetry_tolerance = Some(tolerance);
        self
    }

    /// Restrict the run to the variables selected in `selection`.
    pub fn selection(mut self, selection: SelectionMask) -> Self {
        if self.selection.is_some() {
            self.duplicate_param = Some("selection");
        }
        self.selection = Some(selection);
        self
    }

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

    /// Report Guttman's coefficient of alienation per dimensionality.
    pub fn return_alienation(mut self) -> Self {
        self.return_alienation = Some(true);
        self
    }

    /// Report Shepard (distance-plot) series per dimensionality.
    pub fn return_shepard(mut self) -> Self {
        self.return_shepard = Some(true);
        self
    }

    /// Attach a cancellation token checked between iterations.
    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    // ==========================
    // Development Options
    // ==========================

    /// Set a custom sweep pass function.
    #[doc(hidden)]
    pub fn custom_sweep_pass(mut self, pass: SweepPassFn<T>) -> Self {
        self.custom_sweep_pass = Some(pass);
        self
    }

    /// Set parallel execution hint.
    #[doc(hidden)]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = Some(parallel);
        self
    }
}

// ============================================================================
// Adapters
// ============================================================================

/// Conversion from the generic builder into an adapter-specific builder.
pub trait SsaAdapter<T: Float> {
    /// Adapter-specific builder.
    type Output;

    /// Convert the generic builder.
    fn convert(builder: SsaBuilder<T>) -> Self::Output;
}

/// Batch (in-memory, sequential) execution.
#[derive(Debug, Clone, Copy)]
pub struct Batch;

impl<T: Float> SsaAdapter<T> for Batch {
    type Output = BatchSsaBuilder<T>;

    fn convert(builder: SsaBuilder<T>) -> Self::Output {
        let mut result = BatchSsaBuilder::default();

        if let Some((mind, maxd)) = builder.dimensions {
            result.mind = mind;
            result.maxd = maxd;
        }
        if let Some(metric) = builder.metric {
            result.metric = metric;
        }
        if let Some(mode) = builder.monotonicity {
            result.monotonicity = mode;
        }

        if let Err(err) = Validator::validate_missingness(
            builder.missing_marker.is_some(),
            builder.contiguity.is_some(),
        ) {
            result.deferred_error = Some(err);
        } else if let Some(marker) = builder.missing_marker {
            result.missingness = MissingnessPolicy::ExcludeMissing(marker);
        } else if let Some(coef) = builder.contiguity {
            result.missingness = MissingnessPolicy::ContiguityCoefficient(coef);
        }

        if let Some(initial) = builder.initial {
            result.initial = initial;
        }
        if let Some(iterations) = builder.max_iterations {
            result.max_iterations = iterations;
        }
        if let Some(tol) = builder.tolerance {
            result.tolerance = tol;
        }
        if let Some(ms) = builder.min_stress {
            result.min_stress = ms;
        }
        if let Some(step) = builder.step_size {
            result.step_size = step;
        }
        if let Some(starts) = builder.random_starts {
            result.random_starts = starts;
        }
        if let Some(seed) = builder.seed {
            result.seed = seed;
        }
        if let Some(st) = builder.symmetry_tolerance {
            result.symmetry_tolerance = st;
        }

        result.selection = builder.selection;
        result.title = builder.title;
        result.footnote = builder.footnote;
        result.cancel = builder.cancel;

        if let Some(ra) = builder.return_alienation {
            result.return_alienation = ra;
        }
        if let Some(rs) = builder.return_shepard {
            result.return_shepard = rs;
        }

        // ======================================
        // DEV
        // ======================================
        if let Some(sp) = builder.custom_sweep_pass {
            result.custom_sweep_pass = Some(sp);
        }
        if let Some(p) = builder.parallel {
            result.parallel = Some(p);
        }

        result.duplicate_param = builder.duplicate_param;

        result
    }
}

// ============================================================================
// Parameter Record and Entry Point
// ============================================================================

/// Plain parameter record for a complete run.
///
/// Orientation and shape travel with the [`ProximityMatrix`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SsaParameters<T> {
    /// Lowest dimensionality.
    pub mind: usize,

    /// Highest dimensionality.
    pub maxd: usize,

    /// Ratio transform instead of a monotone step function.
    pub metric: bool,

    /// One monotone mapping per row instead of one overall.
    pub local_monotonicity: bool,

    /// Missing-data handling.
    pub missingness: MissingnessPolicy<T>,

    /// Row-major `numvars x maxd` starting coordinates.
    pub predefined_start: Option<Vec<T>>,

    /// Classical scaling start instead of random placement (ignored with `predefined_start`).
    pub classical_start: bool,

    /// Seed of random starting configurations.
    pub seed: u64,

    /// Random restarts per dimensionality.
    pub random_starts: usize,

    /// Iteration cap per run.
    pub max_iterations: usize,

    /// Minimum accepted stress improvement.
    pub tolerance: T,

    /// Stress at which a run stops immediately.
    pub min_stress: T,

    /// Initial relative step size.
    pub step_size: T,

    /// Relative tolerance for mirrored entries.
    pub symmetry_tolerance: T,

    /// Variable selection (all variables when `None`).
    pub selection: Option<SelectionMask>,

    /// Report Shepard (distance-plot) series.
    pub plots_dist: bool,

    /// Report the coefficient of alienation.
    pub return_alienation: bool,

    /// Run title.
    pub title: Option<String>,

    /// Run footnote.
    pub footnote: Option<String>,
}

impl<T: Float> Default for SsaParameters<T> {
    fn default() -> Self {
        let defaults = BatchSsaBuilder::<T>::default();
        Self {
            mind: defaults.mind,
            maxd: defaults.maxd,
            metric: false,
            local_monotonicity: false,
            missingness: MissingnessPolicy::None,
            predefined_start: None,
            classical_start: false,
            seed: defaults.seed,
            random_starts: defaults.random_starts,
            max_iterations: defaults.max_iterations,
            tolerance: defaults.tolerance,
            min_stress: defaults.min_stress,
            step_size: defaults.step_size,
            symmetry_tolerance: defaults.symmetry_tolerance,
            selection: None,
            plots_dist: false,
            return_alienation: false,
            title: None,
            footnote: None,
        }
    }
}

/// Run a complete Smallest Space Analysis of `matrix` under `params`.
pub fn run_ssa<T: Float>(
    matrix: &ProximityMatrix<T>,
    params: &SsaParameters<T>,
) -> Result<SweepResult<T>, SsaError> {
    let initial = match (&params.predefined_start, params.classical_start) {
        (Some(coords), _) => InitialConfiguration::Predefined {
            coordinates: coords.clone(),
            columns: params.maxd,
        },
        (None, true) => InitialConfiguration::Classical,
        (None, false) => InitialConfiguration::Random,
    };

    let mut builder = SsaBuilder::new()
        .dimensions(params.mind, params.maxd)
        .monotonicity(if params.local_monotonicity {
            MonotonicityMode::Local
        } else {
            MonotonicityMode::Global
        })
        .initial_configuration(initial)
        .random_starts(params.random_starts)
        .seed(params.seed)
        .max_iterations(params.max_iterations)
        .tolerance(params.tolerance)
        .min_stress(params.min_stress)
        .step_size(params.step_size)
        .symmetry_tolerance(params.symmetry_tolerance);

    if params.metric {
        builder = builder.metric();
    }
    match params.missingness {
        MissingnessPolicy::None => {}
        MissingnessPolicy::ExcludeMissing(marker) => builder = builder.exclude_missing(marker),
        MissingnessPolicy::ContiguityCoefficient(coef) => {
            builder = builder.contiguity_coefficient(coef)
        }
    }
    if let Some(selection) = &params.selection {
        builder = builder.selection(selection.clone());
    }
    if let Some(title) = &params.title {
        builder = builder.title(title.clone());
    }
    if let Some(note) = &params.footnote {
        builder = builder.footnote(note.clone());
    }
    if params.plots_dist {
        builder = builder.return_shepard();
    }
    if params.return_alienation {
        builder = builder.return_alienation();
    }

    builder.adapter(Batch).build()?.fit(matrix)
}
