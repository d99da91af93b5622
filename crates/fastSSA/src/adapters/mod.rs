//! Layer 6: Adapters
//!
//! This layer provides user-facing APIs that adapt the engine layer for
//! different execution modes:
//!
//! - **Batch**: Unified adapter for parallel/sequential sweeps

// Unified batch adapter for SSA.
pub mod batch;
