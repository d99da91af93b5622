//! Layer 4: Evaluation
//!
//! # Purpose
//!
//! This layer calculates fit-quality measures for finished configurations:
//! - Guttman's coefficient of alienation
//! - Shepard (distance-plot) series relating dissimilarities, distances, and disparities
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
//! Layer 4: Evaluation ← You are here
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Fit diagnostics for a finished configuration.
pub mod diagnostics;
