//! Parallel execution engine for SSA sweeps.
//!
//! ## Purpose
//!
//! This module provides the parallel sweep pass that is injected into the
//! `ssa` crate's execution engine. Each dimensionality in the sweep becomes
//! one `rayon` task.
//!
//! ## Design notes
//!
//! * **Implementation**: Drop-in replacement for the sequential sweep pass.
//! * **Parallelism**: Uses `rayon` for task-parallel execution across CPU cores.
//! * **Determinism**: Random starts are seeded per dimensionality and restart,
//!   so results do not depend on thread scheduling.
//!
//! ## Key concepts
//!
//! * **Shared inputs**: Dissimilarities and the regression plan are read-only
//!   and shared by reference across tasks.
//! * **Integration**: Plugs into the `ssa` executor via the `SweepPassFn` hook.
//!
//! ## Invariants
//!
//! * Output order matches the order of `dims`.
//!
//! ## Non-goals
//!
//! * This module does not parallelize inside one optimization run.
//! * This module does not validate parameters (handled by `ssa::validator`).

// External dependencies
use num_traits::Float;
use rayon::prelude::*;
use tracing::debug;

// Export dependencies from ssa crate
use ssa::internals::algorithms::proximity::CanonicalDissimilarities;
use ssa::internals::algorithms::regression::MonotoneRegression;
use ssa::internals::engine::minimizer::{MinimizerConfig, MinimizerOutput, optimize};
use ssa::internals::primitives::errors::SsaError;

// ============================================================================
// Parallel Sweep Function
// ============================================================================

/// Optimize every dimensionality in `dims` on the rayon pool.
pub fn sweep_pass_parallel<T>(
    dissim: &CanonicalDissimilarities<T>,
    regression: &MonotoneRegression<T>,
    dims: &[usize],
    config: &MinimizerConfig<T>,
) -> Vec<Result<MinimizerOutput<T>, SsaError>>
where
    T: Float + Send + Sync,
{
    debug!(
        tasks = dims.len(),
        threads = rayon::current_num_threads(),
        "parallel sweep pass"
    );
    dims.par_iter()
        .map(|&d| optimize(d, dissim, regression, config))
        .collect()
}
