//! # fastSSA: Parallel Smallest Space Analysis
//!
//! A parallel front end for the [`ssa`] crate. Every dimensionality of a sweep
//! is an independent optimization problem, so `fastSSA` runs them on the
//! `rayon` thread pool and accepts `ndarray` matrices directly.
//!
//! ## Quick Start
//!
//! ```rust
//! use fastSSA::prelude::*;
//! use ndarray::array;
//!
//! let matrix = array![
//!     [0.0, 1.0, 2.0, 3.0],
//!     [1.0, 0.0, 1.0, 2.0],
//!     [2.0, 1.0, 0.0, 1.0],
//!     [3.0, 2.0, 1.0, 0.0],
//! ];
//!
//! // Build the model with parallel execution (default)
//! let model = Ssa::new()
//!     .dimensions(1, 2)
//!     .adapter(Batch)
//!     .build()?;
//!
//! let result = model.fit(&matrix)?;
//! assert_eq!(result.dimensions.len(), 2);
//! # Result::<(), SsaError>::Ok(())
//! ```
//!
//! ### Sequential Execution
//!
//! ```rust
//! use fastSSA::prelude::*;
//! # let matrix = ProximityMatrix::from_rows(&[
//! #     vec![0.0, 1.0, 2.0, 3.0],
//! #     vec![1.0, 0.0, 1.0, 2.0],
//! #     vec![2.0, 1.0, 0.0, 1.0],
//! #     vec![3.0, 2.0, 1.0, 0.0],
//! # ]);
//!
//! let model = Ssa::new()
//!     .dimensions(1, 2)
//!     .parallel(false)    // Run dimensionalities one after another
//!     .adapter(Batch)
//!     .build()?;
//!
//! let result = model.fit(&matrix)?;
//! # Result::<(), SsaError>::Ok(())
//! ```
//!
//! Results are identical in both modes: each dimensionality seeds its own
//! random stream, so scheduling order never changes the output.
//!
//! ## Feature Flags
//!
//! - **`cpu`** (default): parallel sweeps with `rayon`.
//! - **`dev`**: exposes internal modules for testing.
//!
//! ## License
//!
//! See the repository for license information and contribution guidelines.

#![allow(non_snake_case)]

// Layer 5: Engine - orchestration and execution control.
mod engine;

// Layer 6: Adapters - execution mode adapters.
mod adapters;

// High-level fluent API for SSA.
mod api;

// Input data handling.
mod input;

// Standard fastSSA prelude.
pub mod prelude {
    pub use crate::api::{
        Adapter::Batch,
        CancellationToken,
        ContiguityCoefficient::{Jaccard, SimpleMatching, YuleQ},
        ContiguityCoefficient, ConvergenceReason, DimensionResult, InitialConfiguration,
        InitialConfiguration::Classical,
        MatrixShape, MissingnessPolicy,
        MonotonicityMode::{Global, Local},
        MonotonicityMode,
        Orientation::{Dissimilarity, Similarity},
        Orientation, ProximityMatrix, SelectionMask, ShepardPoint, SsaBuilder as Ssa, SsaError,
        SsaInput, SweepResult,
    };
}

// Internal modules for development and testing.
//
// This module re-exports internal modules for development and testing purposes.
// It is only available with the `dev` feature enabled.
#[cfg(feature = "dev")]
pub mod internals {
    pub mod engine {
        pub use crate::engine::*;
    }
    pub mod adapters {
        pub use crate::adapters::*;
    }
    pub mod api {
        pub use crate::api::*;
    }
    pub mod input {
        pub use crate::input::*;
    }
}
