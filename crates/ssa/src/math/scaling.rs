//! Configuration centring and scaling.
//!
//! ## Purpose
//!
//! Stress is invariant to translation and uniform scaling of a configuration.
//! This module exploits that to keep the optimizer numerically tame (every
//! accepted configuration is centred with unit RMS radius) and provides the
//! per-axis display normalisation used for results.
//!
//! ## Design notes
//!
//! * **In place**: Centring and scaling mutate the row-major buffer directly.
//! * **Degenerate-safe**: A configuration collapsed to one point is left untouched.
//!
//! ## Non-goals
//!
//! * This module does not rotate configurations (no principal-axis alignment).

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

// External dependencies
use num_traits::Float;

/// Square root of the summed squares of `values`.
#[inline]
pub fn norm<T: Float>(values: &[T]) -> T {
    values.iter().fold(T::zero(), |acc, &v| acc + v * v).sqrt()
}

/// Centre a row-major `points x dim` configuration and scale it to unit RMS radius.
///
/// Returns the RMS radius before scaling.
pub fn center_and_scale<T: Float>(coords: &mut [T], points: usize, dim: usize) -> T {
    if points == 0 || dim == 0 {
        return T::zero();
    }
    let n = T::from(points).unwrap_or_else(T::one);

    for axis in 0..dim {
        let mean = (0..points).fold(T::zero(), |acc, p| acc + coords[p * dim + axis]) / n;
        for p in 0..points {
            coords[p * dim + axis] = coords[p * dim + axis] - mean;
        }
    }

    let rms = (norm(coords) * norm(coords) / n).sqrt();
    if rms > T::zero() && rms.is_finite() {
        for v in coords.iter_mut() {
            *v = *v / rms;
        }
    }
    rms
}

/// Rescale each axis of a row-major configuration independently to `[-0.5, 0.5]`.
///
/// Axes are reversed: the minimum maps to `0.5` and the maximum to `-0.5`.
/// Axes with zero range map to `0`.
pub fn normalize_axes<T: Float>(coords: &[T], points: usize, dim: usize) -> Vec<T> {
    let half = T::from(0.5).unwrap_or_else(T::zero);
    let mut out = coords.to_vec();

    for axis in 0..dim {
        let (lo, hi) = (0..points).fold((T::infinity(), T::neg_infinity()), |(lo, hi), p| {
            let v = coords[p * dim + axis];
            (lo.min(v), hi.max(v))
        });
        let range = hi - lo;
        for p in 0..points {
            let idx = p * dim + axis;
            out[idx] = if range > T::zero() {
                half - (coords[idx] - lo) / range
            } else {
                T::zero()
            };
        }
    }

    out
}
