//! High-level API for parallel SSA sweeps.
//!
//! ## Purpose
//!
//! This module re-exports the `ssa` builder and result types and provides the
//! `Batch` marker that turns an `SsaBuilder` into a parallel batch builder.
//!
//! ## Design notes
//!
//! * **Delegation**: Conversion reuses the `ssa` `Batch` adapter, then wraps
//!   the result with the parallel extension.
//! * **Defaults**: Parallel execution is on unless the caller disables it.

// Feature-gated imports
use crate::adapters::batch::ParallelBatchSsaBuilder;

// External dependencies
use num_traits::Float;

// Import base marker types for delegation
use ssa::internals::api::Batch as BaseBatch;

// Publicly re-exported types
pub use crate::input::SsaInput;
pub use ssa::internals::api::{
    CancellationToken, ContiguityCoefficient, ConvergenceReason, DimensionResult,
    InitialConfiguration, MatrixShape, MissingnessPolicy, MonotonicityMode, Orientation,
    ProximityMatrix, SelectionMask, ShepardPoint, SsaAdapter, SsaBuilder, SsaError, SweepResult,
};

// ============================================================================
// Adapter Module
// ============================================================================

/// Adapter selection namespace.
#[allow(non_snake_case)]
pub mod Adapter {
    pub use super::Batch;
}

// ============================================================================
// Adapter Marker Types
// ============================================================================

/// Marker for parallel in-memory batch processing.
#[derive(Debug, Clone, Copy)]
pub struct Batch;

impl<T: Float> SsaAdapter<T> for Batch {
    type Output = ParallelBatchSsaBuilder<T>;

    fn convert(builder: SsaBuilder<T>) -> Self::Output {
        // Determine parallel mode: user choice OR default to true for fastSSA Batch
        let parallel = builder.parallel.unwrap_or(true);

        // Delegate to base implementation to create base builder
        let mut base = <BaseBatch as SsaAdapter<T>>::convert(builder);
        base = base.parallel(parallel);

        // Wrap with extension fields
        ParallelBatchSsaBuilder { base }
    }
}
