// src/operations/gates.rs

//! The fixed gate matrices the superdense coding protocol is built from.
//!
//! Single-qubit matrices act on the amplitude pair `(|0>, |1>)` of their
//! target. Two-qubit matrices act on qubits `[a, b]` with row/column index
//! `2·bit(a) + bit(b)`.

use num_complex::Complex;
use std::f64::consts::FRAC_1_SQRT_2;

/// 2×2 complex matrix for a single-qubit gate.
pub type Matrix2 = [[Complex<f64>; 2]; 2];

/// 4×4 complex matrix for a two-qubit gate.
pub type Matrix4 = [[Complex<f64>; 4]; 4];

const ZERO: Complex<f64> = Complex::new(0.0, 0.0);
const ONE: Complex<f64> = Complex::new(1.0, 0.0);
const MINUS_ONE: Complex<f64> = Complex::new(-1.0, 0.0);
const HALF_SQRT: Complex<f64> = Complex::new(FRAC_1_SQRT_2, 0.0);
const MINUS_HALF_SQRT: Complex<f64> = Complex::new(-FRAC_1_SQRT_2, 0.0);

/// Hadamard: maps |0> to |+> and |1> to |->.
pub const HADAMARD: Matrix2 = [[HALF_SQRT, HALF_SQRT], [HALF_SQRT, MINUS_HALF_SQRT]];

/// Pauli-X (bit flip).
pub const PAULI_X: Matrix2 = [[ZERO, ONE], [ONE, ZERO]];

/// Pauli-Z (phase flip).
pub const PAULI_Z: Matrix2 = [[ONE, ZERO], [ZERO, MINUS_ONE]];

/// Controlled-NOT on `[control, target]`.
pub const CNOT: Matrix4 = [
    [ONE, ZERO, ZERO, ZERO],
    [ZERO, ONE, ZERO, ZERO],
    [ZERO, ZERO, ZERO, ONE],
    [ZERO, ZERO, ONE, ZERO],
];
