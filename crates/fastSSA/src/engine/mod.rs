//! Layer 5: Engine
//!
//! This layer provides the parallel execution engine for SSA sweeps.
//! It distributes dimensionalities across CPU cores.

// Parallel execution engine using CPU threads
#[cfg(feature = "cpu")]
pub mod executor;
