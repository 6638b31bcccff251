// src/validation/mod.rs

//! Provides functions to validate `StateVector`s and gate matrices.

use crate::core::constants::DEFAULT_NORM_TOLERANCE;
use crate::core::{Result, SimError, StateVector};
use num_complex::Complex;
use num_traits::{One, Zero};

/// Checks if the state vector is normalized (sum of squared amplitudes ≈ 1.0).
///
/// # Arguments
/// * `state` - The `StateVector` to check.
/// * `tolerance` - Allowed deviation from 1.0. Defaults to 1e-9.
///
/// # Returns
/// * `Ok(())` if normalized within tolerance.
/// * `Err(SimError::UnnormalizedStateDrift)` otherwise.
pub fn check_normalization(state: &StateVector, tolerance: Option<f64>) -> Result<()> {
    check_norm_sqr(state.norm_sqr(), tolerance.unwrap_or(DEFAULT_NORM_TOLERANCE))
}

pub(crate) fn check_norm_sqr(norm_sqr: f64, tolerance: f64) -> Result<()> {
    let deviation = (norm_sqr - 1.0).abs();
    if deviation.is_nan() || deviation > tolerance {
        return Err(SimError::UnnormalizedStateDrift { norm_sqr, tolerance });
    }
    Ok(())
}

/// Largest entry-wise distance between `U·U†` and the identity.
pub fn unitarity_deviation<const N: usize>(matrix: &[[Complex<f64>; N]; N]) -> f64 {
    let mut worst = 0.0_f64;
    for row in 0..N {
        for col in 0..N {
            // (U·U†)[row][col] = sum_k U[row][k] * conj(U[col][k])
            let entry: Complex<f64> = (0..N)
                .map(|k| matrix[row][k] * matrix[col][k].conj())
                .sum();
            let expected = if row == col { Complex::one() } else { Complex::zero() };
            worst = worst.max((entry - expected).norm());
        }
    }
    worst
}

/// Checks `U·U† = I` within `tolerance`.
pub fn is_unitary<const N: usize>(matrix: &[[Complex<f64>; N]; N], tolerance: f64) -> bool {
    unitarity_deviation(matrix) <= tolerance
}

/// Performs basic validation checks on a state handed in from outside the
/// simulator: dimension matches the qubit count, and normalization holds.
pub fn validate_state(state: &StateVector, norm_tolerance: Option<f64>) -> Result<()> {
    if state.dim() != 1usize << state.num_qubits() {
        return Err(SimError::InvalidDimension(state.dim()));
    }
    check_normalization(state, norm_tolerance)
}
