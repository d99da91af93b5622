//! Euclidean distances between configuration points.
//!
//! ## Purpose
//!
//! This module computes the fitted distances of a configuration for the
//! present pairs of the canonical dissimilarities. Absent pairs are never
//! materialized, so they never receive a distance.
//!
//! ## Invariants
//!
//! * Configurations are row-major `points x dim`.
//! * Output slices have exactly one entry per pair.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::matrix::Pair;

/// Euclidean distance between points `i` and `j` of a row-major configuration.
#[inline]
pub fn euclidean<T: Float>(coords: &[T], dim: usize, i: usize, j: usize) -> T {
    let a = &coords[i * dim..(i + 1) * dim];
    let b = &coords[j * dim..(j + 1) * dim];
    a.iter()
        .zip(b)
        .fold(T::zero(), |acc, (&x, &y)| {
            let diff = x - y;
            acc + diff * diff
        })
        .sqrt()
}

/// Fill `out[p]` with the fitted distance of `pairs[p]`.
pub fn pair_distances<T: Float>(coords: &[T], dim: usize, pairs: &[Pair<T>], out: &mut [T]) {
    for (slot, pair) in out.iter_mut().zip(pairs) {
        *slot = euclidean(coords, dim, pair.i, pair.j);
    }
}
