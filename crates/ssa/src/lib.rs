//! # SSA: Smallest Space Analysis for Rust
//!
//! Nonmetric multidimensional scaling of a proximity matrix across a range of
//! candidate dimensionalities.
//!
//! ## What is SSA?
//!
//! Smallest Space Analysis places one point per variable in a low-dimensional
//! Euclidean space so that the rank order of inter-point distances reproduces
//! the rank order of the input dissimilarities as closely as possible. Fit is
//! measured by Kruskal's stress between distances and disparities, where the
//! disparities are the best monotone (isotonic) fit of the distances to the
//! dissimilarities. Because the right dimensionality is rarely known in
//! advance, a run sweeps every dimensionality in `[mind, maxd]` and reports a
//! stress profile alongside the configurations.
//!
//! ## Quick Start
//!
//! ```rust
//! use ssa::prelude::*;
//!
//! // Dissimilarities among four variables (full symmetric matrix)
//! let matrix = ProximityMatrix::from_rows(&[
//!     vec![0.0, 1.0, 2.0, 3.0],
//!     vec![1.0, 0.0, 1.0, 2.0],
//!     vec![2.0, 1.0, 0.0, 1.0],
//!     vec![3.0, 2.0, 1.0, 0.0],
//! ]);
//!
//! let model = Ssa::new()
//!     .dimensions(1, 2)       // Sweep d = 1 and d = 2
//!     .adapter(Batch)
//!     .build()?;
//!
//! let result = model.fit(&matrix)?;
//!
//! for (d, stress) in result.stress_profile() {
//!     println!("d = {d}: stress = {stress:?}");
//! }
//! # Result::<(), SsaError>::Ok(())
//! ```
//!
//! ### Full Features
//!
//! ```rust
//! use ssa::prelude::*;
//!
//! let matrix = ProximityMatrix::lower_triangular(
//!     5,
//!     vec![
//!         0.9,
//!         0.4, 0.7,
//!         0.2, 0.5, 0.8,
//!         0.1, 0.3, 0.6, 0.9,
//!     ],
//! )
//! .with_orientation(Similarity);
//!
//! let mut selection = SelectionMask::new(5);
//! selection.deselect(4)?;
//!
//! let model = Ssa::new()
//!     .dimensions(1, 2)
//!     .monotonicity(Local)                       // One monotone mapping per row
//!     .selection(selection)                      // Drop variable 4
//!     .initial_configuration(Classical)          // Torgerson start
//!     .max_iterations(1000)
//!     .return_alienation()                       // Guttman's coefficient of alienation
//!     .return_shepard()                          // Distance-plot series
//!     .title("Example run")
//!     .adapter(Batch)
//!     .build()?;
//!
//! let result = model.fit(&matrix)?;
//! println!("{}", result);
//! # Result::<(), SsaError>::Ok(())
//! ```
//!
//! ### Single-Call Entry Point
//!
//! ```rust
//! use ssa::prelude::*;
//! # let matrix = ProximityMatrix::from_rows(&[
//! #     vec![0.0, 1.0, 2.0, 3.0],
//! #     vec![1.0, 0.0, 1.0, 2.0],
//! #     vec![2.0, 1.0, 0.0, 1.0],
//! #     vec![3.0, 2.0, 1.0, 0.0],
//! # ]);
//!
//! let params = SsaParameters {
//!     mind: 1,
//!     maxd: 2,
//!     ..SsaParameters::default()
//! };
//! let result = run_ssa(&matrix, &params)?;
//! assert_eq!(result.dimensions.len(), 2);
//! # Result::<(), SsaError>::Ok(())
//! ```
//!
//! ### Result and Error Handling
//!
//! Configuration and matrix problems are reported as `Err(SsaError)` before
//! any optimization starts. A dimensionality that has too few active points
//! is not an error for the sweep: its entry carries `reason: Degenerate`, no
//! stress, and the `InsufficientData` error, while the other dimensionalities
//! are still optimized.
//!
//! ## Minimal Usage (no_std / Embedded)
//!
//! The crate supports `no_std` environments with `alloc`:
//!
//! ```toml
//! [dependencies]
//! ssa = { version = "0.3", default-features = false }
//! ```
//!
//! ## References
//!
//! - Guttman, L. (1968). "A general nonmetric technique for finding the smallest coordinate space for a configuration of points"
//! - Kruskal, J. B. (1964). "Nonmetric multidimensional scaling: a numerical method"
//!
//! ## License
//!
//! See the repository for license information and contribution guidelines.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
#[macro_use]
extern crate alloc;

// Layer 1: Primitives - data structures and basic utilities.
mod primitives;

// Layer 2: Math - pure mathematical functions.
mod math;

// Layer 3: Algorithms - core SSA algorithms.
mod algorithms;

// Layer 4: Evaluation - post-processing and diagnostics.
mod evaluation;

// Layer 5: Engine - orchestration and execution control.
mod engine;

// Layer 6: Adapters - execution mode adapters.
mod adapters;

// High-level fluent API for SSA.
mod api;

// Standard SSA prelude.
pub mod prelude {
    pub use crate::api::{
        Adapter::Batch,
        CancellationToken,
        ContiguityCoefficient::Jaccard,
        ContiguityCoefficient::SimpleMatching,
        ContiguityCoefficient::YuleQ,
        ContiguityCoefficient, ConvergenceReason, DimensionResult, InitialConfiguration,
        InitialConfiguration::Classical,
        MatrixShape, MissingnessPolicy, MonotonicityMode,
        MonotonicityMode::Global,
        MonotonicityMode::Local,
        Orientation::Dissimilarity,
        Orientation::Similarity,
        Orientation, ProximityMatrix, SelectionMask, ShepardPoint, SsaBuilder as Ssa, SsaError,
        SsaParameters, SweepResult, run_ssa,
    };
}

// Internal modules for development and testing.
//
// This module re-exports internal modules for development and testing purposes.
// It is only available with the `dev` feature enabled.
#[cfg(feature = "dev")]
pub mod internals {
    pub mod primitives {
        pub use crate::primitives::*;
    }
    pub mod math {
        pub use crate::math::*;
    }
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    pub mod engine {
        pub use crate::engine::*;
    }
    pub mod evaluation {
        pub use crate::evaluation::*;
    }
    pub mod adapters {
        pub use crate::adapters::*;
    }
    pub mod api {
        pub use crate::api::*;
    }
}
