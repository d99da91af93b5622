//! Starting configurations for the stress minimizer.
//!
//! ## Purpose
//!
//! This module produces the configuration a minimizer run starts from:
//! a seeded pseudo-random placement, a classical (Torgerson) scaling of the
//! dissimilarities, or a caller-supplied configuration. Random mode also
//! tries the classical start, so the best of both is kept.
//!
//! ## Design notes
//!
//! * **Reproducible**: Random placements use `ChaCha8Rng` keyed by the run
//!   seed, with the dimensionality and restart number selecting the stream,
//!   so a parallel sweep reproduces a sequential one exactly.
//! * **Independent seeds**: Neighbouring seeds expand to unrelated keys; no
//!   two `(seed, d, restart)` triples share a stream.
//! * **Fresh per dimensionality**: Nothing is carried over between
//!   dimensionalities; predefined input contributes its first `d` columns.
//!
//! ## Key concepts
//!
//! * **Classical scaling**: Double-centre the squared dissimilarities and take
//!   the leading eigenvectors (power iteration with deflation), scaled by the
//!   square roots of their eigenvalues. Absent pairs use the mean dissimilarity.
//!
//! ## Non-goals
//!
//! * This module does not centre or scale the configuration (the minimizer does).

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
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// Internal dependencies
use crate::algorithms::proximity::CanonicalDissimilarities;

// ============================================================================
// Initial Configuration
// ============================================================================

/// Strategy for the configuration a minimizer run starts from.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InitialConfiguration<T> {
    /// Classical start plus `random_starts` uniform placements in `[-1, 1]^d`.
    Random,

    /// Classical (Torgerson) scaling of the dissimilarities.
    Classical,

    /// Caller-supplied coordinates, one row per original variable.
    Predefined {
        /// Row-major `numvars x columns` coordinates.
        coordinates: Vec<T>,
        /// Columns per row; must be at least the highest dimensionality.
        columns: usize,
    },
}

impl<T> Default for InitialConfiguration<T> {
    fn default() -> Self {
        Self::Random
    }
}

impl<T: Float> InitialConfiguration<T> {
    /// Whether restarts produce different starting points.
    #[inline]
    pub fn is_random(&self) -> bool {
        matches!(self, Self::Random)
    }

    /// Build the row-major `points x dim` starting configuration.
    pub fn generate(
        &self,
        dissim: &CanonicalDissimilarities<T>,
        dim: usize,
        seed: u64,
        restart: usize,
    ) -> Vec<T> {
        match self {
            Self::Random => random_configuration(dissim.points(), dim, seed, restart),
            Self::Classical => classical_configuration(dissim, dim, seed),
            Self::Predefined {
                coordinates,
                columns,
            } => dissim
                .variables
                .iter()
                .flat_map(|&v| coordinates[v * columns..v * columns + dim].iter().copied())
                .collect(),
        }
    }
}

// ============================================================================
// Random Placement
// ============================================================================

/// Stream reserved for the random axes of classical scaling.
const CLASSICAL_STREAM: usize = u32::MAX as usize;

/// Generator of one dimensionality and restart under `seed`.
///
/// The seed picks the key; `(dim, restart)` picks one of its streams.
pub fn start_rng(seed: u64, dim: usize, restart: usize) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(((dim as u64) << 32) | (restart as u64 & 0xFFFF_FFFF));
    rng
}

/// Uniform placement of `points` points in `[-1, 1]^dim`.
pub fn random_configuration<T: Float>(points: usize, dim: usize, seed: u64, restart: usize) -> Vec<T> {
    let mut rng = start_rng(seed, dim, restart);
    (0..points * dim)
        .map(|_| T::from(rng.random_range(-1.0f64..1.0)).unwrap_or_else(T::zero))
        .collect()
}

// ============================================================================
// Classical Scaling
// ============================================================================

/// Power iterations per eigenvector.
const POWER_ITERATIONS: usize = 300;

/// Classical scaling of `dissim` into `dim` dimensions.
///
/// Axes with a non-positive eigenvalue fall back to a random placement drawn
/// from `seed`.
pub fn classical_configuration<T: Float>(
    dissim: &CanonicalDissimilarities<T>,
    dim: usize,
    seed: u64,
) -> Vec<T> {
    let n = dissim.points();
    let half = T::from(0.5).unwrap_or_else(T::zero);

    // Squared dissimilarities, absent pairs at the mean.
    let mean = dissim.mean();
    let mut b = vec![mean * mean; n * n];
    for i in 0..n {
        b[i * n + i] = T::zero();
    }
    for p in &dissim.pairs {
        let sq = p.value * p.value;
        b[p.i * n + p.j] = sq;
        b[p.j * n + p.i] = sq;
    }

    double_center(&mut b, n);
    b.iter_mut().for_each(|v| *v = -half * *v);

    let mut coords = vec![T::zero(); n * dim];
    let mut rng = start_rng(seed, dim, CLASSICAL_STREAM);

    for axis in 0..dim {
        let (lambda, vector) = leading_eigenpair(&b, n, &mut rng);
        let scale = if lambda > T::zero() {
            lambda.sqrt()
        } else {
            T::zero()
        };

        for i in 0..n {
            coords[i * dim + axis] = if scale > T::zero() {
                vector[i] * scale
            } else {
                T::from(rng.random_range(-1.0f64..1.0)).unwrap_or_else(T::zero)
            };
        }

        // Deflate: B -= lambda * v v^T
        for i in 0..n {
            for j in 0..n {
                b[i * n + j] = b[i * n + j] - lambda * vector[i] * vector[j];
            }
        }
    }

    coords
}

/// Subtract row and column means and add back the grand mean.
fn double_center<T: Float>(m: &mut [T], n: usize) {
    let nf = T::from(n).unwrap_or_else(T::one);
    let row_means: Vec<T> = (0..n)
        .map(|i| m[i * n..(i + 1) * n].iter().fold(T::zero(), |a, &v| a + v) / nf)
        .collect();
    let grand = row_means.iter().fold(T::zero(), |a, &v| a + v) / nf;

    // Symmetric input: column means equal row means.
    for i in 0..n {
        for j in 0..n {
            m[i * n + j] = m[i * n + j] - row_means[i] - row_means[j] + grand;
        }
    }
}

/// Dominant eigenpair of a symmetric matrix by power iteration.
fn leading_eigenpair<T: Float>(m: &[T], n: usize, rng: &mut ChaCha8Rng) -> (T, Vec<T>) {
    let mut v: Vec<T> = (0..n)
        .map(|_| T::from(rng.random_range(-1.0f64..1.0)).unwrap_or_else(T::one))
        .collect();
    let mut next = vec![T::zero(); n];
    let mut lambda = T::zero();
    let eps = T::from(1e-12).unwrap_or_else(T::epsilon);

    normalize(&mut v);
    for _ in 0..POWER_ITERATIONS {
        for i in 0..n {
            next[i] = (0..n).fold(T::zero(), |acc, j| acc + m[i * n + j] * v[j]);
        }
        let rayleigh = v.iter().zip(&next).fold(T::zero(), |a, (&x, &y)| a + x * y);
        if normalize(&mut next) <= eps {
            return (T::zero(), v);
        }
        core::mem::swap(&mut v, &mut next);
        let converged = (rayleigh - lambda).abs() <= eps * T::one().max(rayleigh.abs());
        lambda = rayleigh;
        if converged {
            break;
        }
    }

    (lambda, v)
}

/// Scale `v` to unit length, returning its original length.
fn normalize<T: Float>(v: &mut [T]) -> T {
    let len = v.iter().fold(T::zero(), |a, &x| a + x * x).sqrt();
    if len > T::zero() {
        v.iter_mut().for_each(|x| *x = *x / len);
    }
    len
}
