//! Execution engine for dimensionality sweeps.
//!
//! ## Purpose
//!
//! This module runs the stress minimizer once per dimensionality in
//! `[mind, maxd]` over one set of canonical dissimilarities and turns every
//! outcome into a `DimensionResult`, including the optional alienation
//! coefficient and Shepard series.
//!
//! ## Design notes
//!
//! * **Independent dimensionalities**: Every dimensionality starts fresh; no
//!   coordinates are reused, so the passes may run in any order.
//! * **Pluggable pass**: Extension crates replace the sequential pass through
//!   `custom_sweep_pass` (e.g., one rayon task per dimensionality).
//! * **Contained failures**: An `InsufficientData` outcome becomes a degenerate
//!   entry; the rest of the sweep continues.
//! * **Shared plan**: The regression plan is built once and shared read-only.
//!
//! ## Invariants
//!
//! * Results come back in ascending dimensionality.
//! * Every dimensionality in the range has exactly one entry.
//!
//! ## Non-goals
//!
//! * This module does not validate builder parameters (handled by `validator`).
//! * This module does not canonicalize the matrix.
//! * This module does not handle parallel execution directly (handled by extension crates).

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;
use tracing::{debug, info, warn};

// Internal dependencies
use crate::algorithms::proximity::CanonicalDissimilarities;
use crate::algorithms::regression::{MonotoneRegression, MonotonicityMode};
use crate::engine::minimizer::{MinimizerConfig, MinimizerOutput, optimize};
use crate::engine::output::DimensionResult;
use crate::engine::validator::Validator;
use crate::evaluation::diagnostics::{coefficient_of_alienation, shepard_diagram};
use crate::primitives::errors::SsaError;

// ============================================================================
// Type Definitions
// ============================================================================

/// Signature for a custom sweep pass.
#[doc(hidden)]
pub type SweepPassFn<T> = fn(
    &CanonicalDissimilarities<T>, // dissimilarities
    &MonotoneRegression<T>,       // regression plan
    &[usize],                     // dimensionalities
    &MinimizerConfig<T>,          // minimizer controls
) -> Vec<Result<MinimizerOutput<T>, SsaError>>;

// ============================================================================
// Configuration
// ============================================================================

/// Configuration for a dimensionality sweep.
#[derive(Debug, Clone)]
pub struct SweepConfig<T> {
    /// Lowest dimensionality.
    pub mind: usize,

    /// Highest dimensionality.
    pub maxd: usize,

    /// Scope of the monotone mapping.
    pub monotonicity: MonotonicityMode,

    /// Ratio transform instead of a monotone step function.
    pub metric: bool,

    /// Minimizer controls shared by every dimensionality.
    pub minimizer: MinimizerConfig<T>,

    /// Compute the coefficient of alienation per dimensionality.
    pub return_alienation: bool,

    /// Compute the Shepard series per dimensionality.
    pub return_shepard: bool,

    // ++++++++++++++++++++++++++++++++++++++
    // +               DEV                  +
    // ++++++++++++++++++++++++++++++++++++++
    /// Custom sweep pass (enables parallel execution).
    #[doc(hidden)]
    pub custom_sweep_pass: Option<SweepPassFn<T>>,

    /// Whether to use parallel execution.
    #[doc(hidden)]
    pub parallel: bool,
}

impl<T: Float> Default for SweepConfig<T> {
    fn default() -> Self {
        Self {
            mind: 1,
            maxd: 3,
            monotonicity: MonotonicityMode::default(),
            metric: false,
            minimizer: MinimizerConfig::default(),
            return_alienation: false,
            return_shepard: false,
            custom_sweep_pass: None,
            parallel: false,
        }
    }
}

// ============================================================================
// Executor
// ============================================================================

/// Runs a dimensionality sweep.
#[derive(Debug, Clone)]
pub struct SweepExecutor<T> {
    config: SweepConfig<T>,
}

impl<T: Float> SweepExecutor<T> {
    /// Create an executor from a configuration.
    pub fn new(config: SweepConfig<T>) -> Self {
        Self { config }
    }

    /// Run every dimensionality in `[mind, maxd]`.
    pub fn run(
        &self,
        dissim: &CanonicalDissimilarities<T>,
    ) -> Result<Vec<DimensionResult<T>>, SsaError> {
        let cfg = &self.config;
        Validator::validate_dimensionality_range(cfg.mind, cfg.maxd)?;

        let dims: Vec<usize> = (cfg.mind..=cfg.maxd).collect();
        let regression = MonotoneRegression::new(dissim, cfg.monotonicity, cfg.metric);

        info!(
            points = dissim.points(),
            present = dissim.pair_count(),
            absent = dissim.absent.len(),
            mind = cfg.mind,
            maxd = cfg.maxd,
            "starting sweep"
        );

        let outcomes = match cfg.custom_sweep_pass {
            Some(pass) if cfg.parallel => pass(dissim, &regression, &dims, &cfg.minimizer),
            _ => Self::sweep_pass(dissim, &regression, &dims, &cfg.minimizer),
        };

        Ok(dims
            .iter()
            .zip(outcomes)
            .map(|(&d, outcome)| self.finish(d, dissim, &regression, outcome))
            .collect())
    }

    /// Sequential pass: one minimizer run per dimensionality, ascending.
    pub fn sweep_pass(
        dissim: &CanonicalDissimilarities<T>,
        regression: &MonotoneRegression<T>,
        dims: &[usize],
        config: &MinimizerConfig<T>,
    ) -> Vec<Result<MinimizerOutput<T>, SsaError>> {
        dims.iter()
            .map(|&d| optimize(d, dissim, regression, config))
            .collect()
    }

    /// Turn one minimizer outcome into a result entry.
    fn finish(
        &self,
        dim: usize,
        dissim: &CanonicalDissimilarities<T>,
        regression: &MonotoneRegression<T>,
        outcome: Result<MinimizerOutput<T>, SsaError>,
    ) -> DimensionResult<T> {
        match outcome {
            Ok(output) => {
                debug!(
                    dim,
                    stress = output.stress.to_f64().unwrap_or(f64::NAN),
                    iterations = output.iterations,
                    reason = ?output.reason,
                    "dimensionality finished"
                );
                let alienation = if self.config.return_alienation {
                    coefficient_of_alienation(dissim, &output.distances)
                } else {
                    None
                };
                let shepard = self.config.return_shepard.then(|| {
                    shepard_diagram(
                        dissim,
                        &output.distances,
                        &output.disparities,
                        regression.terms_per_pair(),
                    )
                });
                DimensionResult::from_output(output, alienation, shepard)
            }
            Err(err) => {
                warn!(dim, error = %err, "dimensionality is degenerate");
                DimensionResult::degenerate(dim, err)
            }
        }
    }
}
