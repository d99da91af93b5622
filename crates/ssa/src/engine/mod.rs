//! Layer 5: Engine
//!
//! # Purpose
//!
//! This layer orchestrates the analysis by coordinating primitives and
//! algorithms. It provides the stress minimization loop, the dimensionality
//! sweep, parameter validation, and result aggregation.
//!
//! # Architecture
//!
//! ```text
//! Layer 7: API
//!   ↓
//! Layer 6: Adapters
//!   ↓
//! Layer 5: Engine ← You are here
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Dimensionality sweep executor.
pub mod executor;

/// Stress minimizer for a single dimensionality.
pub mod minimizer;

/// Validation utilities.
pub mod validator;

/// Output types for SSA sweeps.
pub mod output;
