//! Layer 2: Math
//!
//! # Purpose
//!
//! This layer provides pure mathematical functions used throughout SSA:
//! - Euclidean distances between configuration points
//! - Centring, scaling, and display normalisation of configurations
//! - Contiguity coefficients for dichotomous profiles
//!
//! These are reusable mathematical building blocks with no algorithm-specific logic.
//!
//! # Architecture
//!
//! ```text
//! Layer 7: API
//!   ↓
//! Layer 6: Adapters
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Pairwise Euclidean distances.
pub mod distance;

/// Configuration centring, scaling, and axis normalisation.
pub mod scaling;

/// Contiguity coefficients for 0/1 profiles.
pub mod contiguity;
