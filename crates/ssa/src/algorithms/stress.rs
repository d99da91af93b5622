//! Kruskal stress and its gradient.
//!
//! ## Purpose
//!
//! This module evaluates the normalized stress of a configuration against its
//! disparities and the gradient of that stress with respect to coordinates.
//!
//! ## Key concepts
//!
//! With `k` disparities per pair and `d(t)` the distance of the pair owning term `t`:
//!
//! ```text
//! S* = sum_t (d(t) - dhat_t)^2
//! T* = sum_t d(t)^2
//! S  = sqrt(S* / T*)
//! ```
//!
//! Disparities are held fixed while differentiating (Kruskal's convention):
//!
//! ```text
//! dS/dd_p = S * sum_{t in p} ((d_p - dhat_t) / S* - d_p / T*)
//! ```
//!
//! ## Invariants
//!
//! * Stress is non-negative and zero exactly when distances equal disparities.
//! * A configuration with all distances zero has stress 1 unless its
//!   disparities are zero too.
//!
//! ## Non-goals
//!
//! * This module does not compute disparities.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::matrix::Pair;

// ============================================================================
// Stress
// ============================================================================

/// Raw and normalized stress of one configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stress<T> {
    /// Residual sum of squares `S*`.
    pub raw: T,
    /// Normalizing sum of squared distances `T*`.
    pub norm: T,
    /// Normalized stress `sqrt(S* / T*)`.
    pub value: T,
}

/// Evaluate stress for `distances` (one per pair) and `disparities` (`k` per pair).
pub fn kruskal_stress<T: Float>(distances: &[T], disparities: &[T], k: usize) -> Stress<T> {
    let (raw, norm) = disparities
        .iter()
        .enumerate()
        .fold((T::zero(), T::zero()), |(s, n), (t, &dhat)| {
            let d = distances[t / k];
            let r = d - dhat;
            (s + r * r, n + d * d)
        });

    let value = if norm > T::zero() {
        (raw / norm).sqrt()
    } else if raw > T::zero() {
        T::one()
    } else {
        T::zero()
    };

    Stress { raw, norm, value }
}

// ============================================================================
// Gradient
// ============================================================================

/// Accumulate the stress gradient with respect to a row-major configuration into `out`.
///
/// `out` is overwritten. Pairs at zero distance contribute nothing.
#[allow(clippy::too_many_arguments)]
pub fn stress_gradient<T: Float>(
    coords: &[T],
    dim: usize,
    pairs: &[Pair<T>],
    distances: &[T],
    disparities: &[T],
    k: usize,
    stress: &Stress<T>,
    out: &mut [T],
) {
    out.iter_mut().for_each(|g| *g = T::zero());

    if stress.raw <= T::zero() || stress.norm <= T::zero() {
        return;
    }

    for (p, pair) in pairs.iter().enumerate() {
        let d = distances[p];
        if d <= T::zero() {
            continue;
        }

        let dsdd = disparities[p * k..(p + 1) * k]
            .iter()
            .fold(T::zero(), |acc, &dhat| {
                acc + (d - dhat) / stress.raw - d / stress.norm
            })
            * stress.value;

        let factor = dsdd / d;
        for axis in 0..dim {
            let diff = coords[pair.i * dim + axis] - coords[pair.j * dim + axis];
            out[pair.i * dim + axis] = out[pair.i * dim + axis] + factor * diff;
            out[pair.j * dim + axis] = out[pair.j * dim + axis] - factor * diff;
        }
    }
}
