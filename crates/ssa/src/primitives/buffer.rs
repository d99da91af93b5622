//! Memory management and buffer recycling for stress minimization.
//!
//! ## Purpose
//!
//! This module provides the reusable workspace of a single stress minimizer
//! run. Distances, disparities, gradients, and the trial configuration are
//! allocated once per dimensionality and recycled across every iteration and
//! every random restart.
//!
//! ## Design notes
//!
//! * **Centralized Ownership**: One `StressBuffer` holds all scratch space of a run.
//! * **Lazy Expansion**: Slots grow on demand via `ensure_len` but never shrink.
//! * **Per-task**: Each dimensionality task owns its own buffer, so parallel
//!   sweeps never share mutable state.
//!
//! ## Key concepts
//!
//! * **Slot**: A reusable vector wrapper with automatic capacity management.
//! * **Current / trial**: The accepted configuration and the candidate step are
//!   kept side by side and swapped on acceptance.
//!
//! ## Invariants
//!
//! * Buffers are only logically resized between runs, not deallocated.
//! * Capacity is monotonically increasing.

// Feature-gated dependencies
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::mem::swap;
use core::ops::{Deref, DerefMut};
use num_traits::Zero;

// ============================================================================
// Slot - Unified Vector Abstraction
// ============================================================================

/// A reusable vector slot with automatic capacity management.
#[derive(Debug, Clone)]
pub struct Slot<T>(Vec<T>);

impl<T: Copy + Zero> Slot<T> {
    /// Resize to exactly `len` zeroed elements, reusing capacity.
    #[inline]
    pub fn ensure_len(&mut self, len: usize) {
        self.0.clear();
        self.0.resize(len, T::zero());
    }
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T> Deref for Slot<T> {
    type Target = Vec<T>;
    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> DerefMut for Slot<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

// ============================================================================
// Stress Buffer
// ============================================================================

/// Working memory for one stress minimizer run.
#[derive(Debug, Clone)]
pub struct StressBuffer<T> {
    /// Accepted configuration (`points * dim`, row-major).
    pub coords: Slot<T>,
    /// Fitted distances of the accepted configuration, one per pair.
    pub distances: Slot<T>,
    /// Disparities of the accepted configuration, one per regression term.
    pub disparities: Slot<T>,
    /// Stress gradient with respect to `coords`.
    pub gradient: Slot<T>,
    /// Candidate configuration.
    pub trial_coords: Slot<T>,
    /// Fitted distances of the candidate.
    pub trial_distances: Slot<T>,
    /// Disparities of the candidate.
    pub trial_disparities: Slot<T>,
    /// Regression scratch space (block values and weights).
    pub scratch: Slot<T>,
    /// Regression scratch space (block sizes).
    pub block_sizes: Slot<usize>,
}

impl<T> Default for StressBuffer<T> {
    fn default() -> Self {
        Self {
            coords: Slot::default(),
            distances: Slot::default(),
            disparities: Slot::default(),
            gradient: Slot::default(),
            trial_coords: Slot::default(),
            trial_distances: Slot::default(),
            trial_disparities: Slot::default(),
            scratch: Slot::default(),
            block_sizes: Slot::default(),
        }
    }
}

impl<T: Copy + Zero> StressBuffer<T> {
    /// Create a buffer sized for `coords` coordinates, `pairs` pairs, and `terms` terms.
    pub fn new(coords: usize, pairs: usize, terms: usize) -> Self {
        let mut buffer = Self::default();
        buffer.prepare(coords, pairs, terms);
        buffer
    }

    /// Resize every slot for a run of the given size.
    pub fn prepare(&mut self, coords: usize, pairs: usize, terms: usize) {
        self.coords.ensure_len(coords);
        self.gradient.ensure_len(coords);
        self.trial_coords.ensure_len(coords);
        self.distances.ensure_len(pairs);
        self.trial_distances.ensure_len(pairs);
        self.disparities.ensure_len(terms);
        self.trial_disparities.ensure_len(terms);
        self.scratch.ensure_len(terms);
        self.block_sizes.ensure_len(terms);
    }

    /// Promote the candidate to the accepted state.
    #[inline]
    pub fn accept_trial(&mut self) {
        swap(&mut self.coords, &mut self.trial_coords);
        swap(&mut self.distances, &mut self.trial_distances);
        swap(&mut self.disparities, &mut self.trial_disparities);
    }
}
