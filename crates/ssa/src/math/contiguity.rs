//! Contiguity coefficients for dichotomous profiles.
//!
//! ## Purpose
//!
//! When variables are observed as 0/1 profiles, their proximity is derived
//! from the 2x2 co-occurrence table of each pair instead of from raw values.
//!
//! ## Key concepts
//!
//! For variables `u` and `v` over `M` observations:
//!
//! ```text
//!            v = 1   v = 0
//!   u = 1      a       b
//!   u = 0      c       d
//! ```
//!
//! * **Jaccard**: `a / (a + b + c)`, joint absences ignored.
//! * **SimpleMatching**: `(a + d) / M`.
//! * **YuleQ**: `(ad - bc) / (ad + bc)`, in `[-1, 1]`.
//!
//! ## Invariants
//!
//! * Dissimilarities derived here lie in `[0, 1]`.
//! * An undefined coefficient (zero denominator) yields `None`.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::matrix::ContiguityCoefficient;

/// Co-occurrence counts of two dichotomous variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Contingency {
    /// Both present.
    pub a: usize,
    /// First present, second absent.
    pub b: usize,
    /// First absent, second present.
    pub c: usize,
    /// Both absent.
    pub d: usize,
}

impl Contingency {
    /// Count co-occurrences of columns `u` and `v` of a row-major `rows x cols` 0/1 table.
    pub fn count<T: Float>(values: &[T], cols: usize, u: usize, v: usize) -> Self {
        let mut table = Self::default();
        for row in values.chunks_exact(cols) {
            match (row[u] > T::zero(), row[v] > T::zero()) {
                (true, true) => table.a += 1,
                (true, false) => table.b += 1,
                (false, true) => table.c += 1,
                (false, false) => table.d += 1,
            }
        }
        table
    }

    /// Number of observations.
    pub fn total(&self) -> usize {
        self.a + self.b + self.c + self.d
    }
}

impl ContiguityCoefficient {
    /// Similarity of a contingency table, or `None` when undefined.
    pub fn similarity<T: Float>(&self, t: &Contingency) -> Option<T> {
        let f = |n: usize| T::from(n).unwrap_or_else(T::zero);
        match self {
            Self::Jaccard => {
                let denom = t.a + t.b + t.c;
                (denom > 0).then(|| f(t.a) / f(denom))
            }
            Self::SimpleMatching => {
                let total = t.total();
                (total > 0).then(|| f(t.a + t.d) / f(total))
            }
            Self::YuleQ => {
                let ad = f(t.a) * f(t.d);
                let bc = f(t.b) * f(t.c);
                let denom = ad + bc;
                (denom > T::zero()).then(|| (ad - bc) / denom)
            }
        }
    }

    /// Dissimilarity in `[0, 1]` of a contingency table, or `None` when undefined.
    pub fn dissimilarity<T: Float>(&self, t: &Contingency) -> Option<T> {
        let s: T = self.similarity(t)?;
        Some(match self {
            Self::YuleQ => (T::one() - s) / (T::one() + T::one()),
            _ => T::one() - s,
        })
    }
}
