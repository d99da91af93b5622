//! Layer 3: Algorithms
//!
//! This layer implements the core logic of Smallest Space Analysis: proximity
//! canonicalization, monotone regression, stress evaluation, and starting
//! configurations. It contains the "business logic" of SSA but is
//! orchestrated by the engine layer.

// Canonical dissimilarities from raw proximity matrices.
pub mod proximity;

// Monotone (and ratio) regression of distances on dissimilarities.
pub mod regression;

// Kruskal stress and gradient.
pub mod stress;

// Random, classical, and predefined starting configurations.
pub mod initial;
