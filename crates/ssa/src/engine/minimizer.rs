//! Stress minimization for a single dimensionality.
//!
//! ## Purpose
//!
//! This module places the active points in `R^d` so that their distances are
//! monotonically related to the canonical dissimilarities. It alternates
//! distance computation, monotone regression, and a damped steepest-descent
//! step until the stress stops improving.
//!
//! ## Design notes
//!
//! * **Backtracking**: A step is accepted only if it lowers stress; the step
//!   grows by 1.5 on acceptance and halves on rejection.
//! * **Scale-free step**: The step length is `alpha * |X| / |G|`, so `alpha` is a
//!   relative move independent of configuration size.
//! * **Normalized configurations**: Every accepted configuration is centred
//!   and scaled to unit RMS radius (stress is invariant to both).
//! * **Restarts**: Random mode runs the classical start and then every random
//!   start, keeping the lowest stress.
//! * **Owned workspace**: Each run owns its `StressBuffer`; nothing is shared.
//!
//! ## Key concepts
//!
//! * **Converged**: The last accepted improvement fell below `tolerance`,
//!   stress reached `min_stress`, the gradient vanished, or the step collapsed.
//! * **MaxIterations**: `max_iterations` step attempts were made.
//! * **Degenerate**: Fewer than `d + 2` points or no present pairs; reported
//!   as `InsufficientData` before any iteration runs.
//! * **Cancelled**: The cancellation token fired between iterations.
//!
//! ## Invariants
//!
//! * The accepted stress sequence (`history`) is non-increasing.
//! * Returned coordinates are a snapshot; no live handle is exposed.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;
use tracing::trace;

// Internal dependencies
use crate::algorithms::initial::{InitialConfiguration, random_configuration};
use crate::algorithms::proximity::CanonicalDissimilarities;
use crate::algorithms::regression::MonotoneRegression;
use crate::algorithms::stress::{Stress, kruskal_stress, stress_gradient};
use crate::math::distance::pair_distances;
use crate::math::scaling::{center_and_scale, norm};
use crate::primitives::buffer::StressBuffer;
use crate::primitives::cancel::CancellationToken;
use crate::primitives::errors::SsaError;

// ============================================================================
// Convergence Reason
// ============================================================================

/// Why a minimizer run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConvergenceReason {
    /// Stress improvement fell below the tolerance.
    Converged,

    /// The iteration cap was reached.
    MaxIterations,

    /// Too few active points for the dimensionality.
    Degenerate,

    /// The caller cancelled the run.
    Cancelled,
}

// ============================================================================
// Configuration and Output
// ============================================================================

/// Numeric controls of one minimizer run.
#[derive(Debug, Clone)]
pub struct MinimizerConfig<T> {
    /// Maximum number of step attempts.
    pub max_iterations: usize,

    /// Minimum stress improvement of an accepted step.
    pub tolerance: T,

    /// Stress at or below which the run stops immediately.
    pub min_stress: T,

    /// Initial relative step size.
    pub step_size: T,

    /// Number of random restarts (only for random starts).
    pub random_starts: usize,

    /// Starting configuration strategy.
    pub initial: InitialConfiguration<T>,

    /// Run seed for random placements and fallbacks.
    pub seed: u64,

    /// Cooperative cancellation.
    pub cancel: Option<CancellationToken>,
}

impl<T: Float> Default for MinimizerConfig<T> {
    fn default() -> Self {
        Self {
            max_iterations: 500,
            tolerance: T::from(1e-9).unwrap_or_else(T::epsilon),
            min_stress: T::from(1e-7).unwrap_or_else(T::epsilon),
            step_size: T::from(0.2).unwrap_or_else(T::one),
            random_starts: 4,
            initial: InitialConfiguration::default(),
            seed: 42,
            cancel: None,
        }
    }
}

/// Snapshot of a finished minimizer run.
#[derive(Debug, Clone, PartialEq)]
pub struct MinimizerOutput<T> {
    /// Dimensionality of the configuration.
    pub dimensionality: usize,

    /// Final row-major `points x dimensionality` coordinates.
    pub coordinates: Vec<T>,

    /// Final normalized stress.
    pub stress: T,

    /// Step attempts made by the retained run.
    pub iterations: usize,

    /// Why the retained run stopped.
    pub reason: ConvergenceReason,

    /// Final fitted distances, one per present pair.
    pub distances: Vec<T>,

    /// Final disparities, `terms_per_pair` per present pair.
    pub disparities: Vec<T>,

    /// Stress of the start and of every accepted step.
    pub history: Vec<T>,
}

// ============================================================================
// Optimization
// ============================================================================

/// Smallest step multiplier before the run counts as converged.
const MIN_ALPHA: f64 = 1e-12;

/// Upper bound for the relative step multiplier.
const MAX_ALPHA: f64 = 4.0;

/// Minimize stress in `dim` dimensions.
pub fn optimize<T: Float>(
    dim: usize,
    dissim: &CanonicalDissimilarities<T>,
    regression: &MonotoneRegression<T>,
    config: &MinimizerConfig<T>,
) -> Result<MinimizerOutput<T>, SsaError> {
    let points = dissim.points();
    if points < dim + 2 || dissim.pairs.is_empty() {
        return Err(SsaError::InsufficientData {
            points,
            dimensionality: dim,
            min: dim + 2,
        });
    }

    let classical = InitialConfiguration::Classical;
    let starts: Vec<(&InitialConfiguration<T>, usize)> = if config.initial.is_random() {
        core::iter::once((&classical, 0))
            .chain((0..config.random_starts.max(1)).map(|r| (&config.initial, r)))
            .collect()
    } else {
        vec![(&config.initial, 0)]
    };

    let mut buffer = StressBuffer::new(points * dim, dissim.pair_count(), regression.terms());
    let mut best: Option<MinimizerOutput<T>> = None;

    for (start, restart) in starts {
        let run = run_once(dim, dissim, regression, config, start, restart, &mut buffer);
        let cancelled = run.reason == ConvergenceReason::Cancelled;

        best = match best {
            Some(b) if b.stress <= run.stress => Some(b),
            _ => Some(run),
        };

        if cancelled {
            break;
        }
    }

    best.ok_or(SsaError::InvalidRandomStarts(0))
}

/// One descent from one starting configuration.
fn run_once<T: Float>(
    dim: usize,
    dissim: &CanonicalDissimilarities<T>,
    regression: &MonotoneRegression<T>,
    config: &MinimizerConfig<T>,
    start: &InitialConfiguration<T>,
    restart: usize,
    buf: &mut StressBuffer<T>,
) -> MinimizerOutput<T> {
    let points = dissim.points();
    let k = regression.terms_per_pair();

    buf.prepare(points * dim, dissim.pair_count(), regression.terms());
    buf.coords
        .copy_from_slice(&start.generate(dissim, dim, config.seed, restart));
    if center_and_scale(&mut buf.coords, points, dim) <= T::zero() {
        // A collapsed start has no gradient; fall back to a seeded placement.
        buf.coords
            .copy_from_slice(&random_configuration(points, dim, config.seed, restart));
        center_and_scale(&mut buf.coords, points, dim);
    }

    let mut stress = evaluate(
        dissim,
        regression,
        dim,
        &buf.coords,
        &mut buf.distances,
        &mut buf.disparities,
        &mut buf.scratch,
        &mut buf.block_sizes,
    );

    let mut history = Vec::with_capacity(config.max_iterations.min(1024) + 1);
    history.push(stress.value);

    let min_alpha = T::from(MIN_ALPHA).unwrap_or_else(T::epsilon);
    let max_alpha = T::from(MAX_ALPHA).unwrap_or_else(T::one);
    let grow = T::from(1.5).unwrap_or_else(T::one);
    let shrink = T::from(0.5).unwrap_or_else(T::one);

    let mut alpha = config.step_size;
    let mut iterations = 0;

    let reason = loop {
        if stress.value <= config.min_stress {
            break ConvergenceReason::Converged;
        }
        if config.cancel.as_ref().is_some_and(|c| c.is_cancelled()) {
            break ConvergenceReason::Cancelled;
        }
        if iterations >= config.max_iterations {
            break ConvergenceReason::MaxIterations;
        }

        stress_gradient(
            &buf.coords,
            dim,
            &dissim.pairs,
            &buf.distances,
            &buf.disparities,
            k,
            &stress,
            &mut buf.gradient,
        );
        let gnorm = norm(&buf.gradient);
        if gnorm.is_nan() || gnorm <= T::zero() {
            break ConvergenceReason::Converged;
        }

        let step = alpha * norm(&buf.coords) / gnorm;
        for ((t, &x), &g) in buf
            .trial_coords
            .iter_mut()
            .zip(buf.coords.iter())
            .zip(buf.gradient.iter())
        {
            *t = x - step * g;
        }
        center_and_scale(&mut buf.trial_coords, points, dim);

        let trial = evaluate(
            dissim,
            regression,
            dim,
            &buf.trial_coords,
            &mut buf.trial_distances,
            &mut buf.trial_disparities,
            &mut buf.scratch,
            &mut buf.block_sizes,
        );
        iterations += 1;

        if trial.value < stress.value {
            let improvement = stress.value - trial.value;
            buf.accept_trial();
            stress = trial;
            history.push(stress.value);
            alpha = (alpha * grow).min(max_alpha);
            trace!(
                dim,
                iteration = iterations,
                stress = stress.value.to_f64().unwrap_or(f64::NAN),
                "accepted step"
            );
            if improvement < config.tolerance {
                break ConvergenceReason::Converged;
            }
        } else {
            alpha = alpha * shrink;
            trace!(
                dim,
                iteration = iterations,
                alpha = alpha.to_f64().unwrap_or(f64::NAN),
                "rejected step"
            );
            if alpha < min_alpha {
                break ConvergenceReason::Converged;
            }
        }
    };

    MinimizerOutput {
        dimensionality: dim,
        coordinates: buf.coords.to_vec(),
        stress: stress.value,
        iterations,
        reason,
        distances: buf.distances.to_vec(),
        disparities: buf.disparities.to_vec(),
        history,
    }
}

/// Distances, disparities, and stress of one configuration.
#[allow(clippy::too_many_arguments)]
fn evaluate<T: Float>(
    dissim: &CanonicalDissimilarities<T>,
    regression: &MonotoneRegression<T>,
    dim: usize,
    coords: &[T],
    distances: &mut [T],
    disparities: &mut [T],
    values: &mut [T],
    sizes: &mut [usize],
) -> Stress<T> {
    pair_distances(coords, dim, &dissim.pairs, distances);
    regression.fit(distances, disparities, values, sizes);
    kruskal_stress(distances, disparities, regression.terms_per_pair())
}
