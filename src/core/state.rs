// src/core/state.rs

use super::bitstring::Bitstring;
use super::constants::{AMPLITUDE_TOLERANCE, DEFAULT_UNITARITY_TOLERANCE, MAX_QUBITS};
use super::error::{Result, SimError};
use crate::operations::{Gate, GateAction, Matrix2, Matrix4};
use crate::validation::check_normalization;
use num_complex::Complex;
use num_traits::Zero;
use std::fmt;

/// The complex amplitude vector of an n-qubit register.
///
/// Amplitude `i` belongs to the basis state whose qubit `k` equals bit `k`
/// of `i` (qubit 0 least significant). The vector stays normalized under
/// every successful `apply`.
#[derive(Debug, Clone, PartialEq)] // No Eq: amplitudes are floating point
pub struct StateVector {
    amplitudes: Vec<Complex<f64>>,
    num_qubits: usize,
}

impl StateVector {
    /// Creates the all-zero basis state |0...0> on `num_qubits` qubits.
    pub fn new(num_qubits: usize) -> Result<Self> {
        if num_qubits > MAX_QUBITS {
            return Err(SimError::TooManyQubits {
                requested: num_qubits,
                max: MAX_QUBITS,
            });
        }
        let mut amplitudes = vec![Complex::zero(); 1 << num_qubits];
        amplitudes[0] = Complex::new(1.0, 0.0);
        Ok(Self {
            amplitudes,
            num_qubits,
        })
    }

    /// Wraps an explicit amplitude vector.
    ///
    /// The length must be a power of two and the vector must be normalized
    /// within the default tolerance.
    pub fn from_amplitudes(amplitudes: Vec<Complex<f64>>) -> Result<Self> {
        let dim = amplitudes.len();
        if !dim.is_power_of_two() {
            return Err(SimError::InvalidDimension(dim));
        }
        let num_qubits = dim.trailing_zeros() as usize;
        if num_qubits > MAX_QUBITS {
            return Err(SimError::TooManyQubits {
                requested: num_qubits,
                max: MAX_QUBITS,
            });
        }
        let state = Self {
            amplitudes,
            num_qubits,
        };
        check_normalization(&state, None)?;
        Ok(state)
    }

    /// Provides read-only access to the amplitudes.
    pub fn amplitudes(&self) -> &[Complex<f64>] {
        &self.amplitudes
    }

    /// Amplitude of one basis state, or `None` if the width does not match.
    pub fn amplitude(&self, basis: &Bitstring) -> Option<Complex<f64>> {
        if basis.width() != self.num_qubits {
            return None;
        }
        self.amplitudes.get(basis.value()).copied()
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of amplitudes (2^n).
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    /// Sum of squared magnitudes.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(|c| c.norm_sqr()).sum()
    }

    /// Born-rule probability of each basis state, indexed like the amplitudes.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|c| c.norm_sqr()).collect()
    }

    /// Every outcome with non-negligible probability, in ascending bitstring order.
    pub fn outcomes(&self) -> Vec<MeasurementOutcome> {
        self.amplitudes
            .iter()
            .enumerate()
            .filter(|(_, c)| c.norm_sqr() > AMPLITUDE_TOLERANCE)
            .map(|(i, c)| MeasurementOutcome {
                bitstring: Bitstring::new(i, self.num_qubits),
                probability: c.norm_sqr(),
            })
            .collect()
    }

    /// Applies `gate` in place, checking unitarity against the default tolerance.
    pub fn apply(&mut self, gate: &Gate) -> Result<()> {
        self.apply_with_tolerance(gate, DEFAULT_UNITARITY_TOLERANCE)
    }

    /// Applies `gate` in place.
    ///
    /// Fails with `InvalidQubitIndex`, `DuplicateQubit` or `NonUnitaryGate`
    /// before touching any amplitude.
    pub fn apply_with_tolerance(&mut self, gate: &Gate, unitarity_tolerance: f64) -> Result<()> {
        gate.check_qubits(self.num_qubits)?;
        gate.check_unitary(unitarity_tolerance)?;
        match gate.action() {
            GateAction::Single { matrix, target } => self.apply_single(*target, matrix),
            GateAction::Two { matrix, qubits } => self.apply_pair(qubits[0], qubits[1], matrix),
        }
        Ok(())
    }

    /// Rescales the vector to unit norm.
    pub fn renormalize(&mut self) -> Result<()> {
        let norm_sqr = self.norm_sqr();
        if !norm_sqr.is_finite() || norm_sqr < AMPLITUDE_TOLERANCE {
            return Err(SimError::UnnormalizedStateDrift {
                norm_sqr,
                tolerance: AMPLITUDE_TOLERANCE,
            });
        }
        let norm = norm_sqr.sqrt();
        for c in &mut self.amplitudes {
            *c /= norm;
        }
        Ok(())
    }

    /// Contracts a 2×2 matrix against every amplitude pair that differs only
    /// in `target`.
    fn apply_single(&mut self, target: usize, matrix: &Matrix2) {
        let mask = 1usize << target;
        for i0 in (0..self.dim()).filter(|i| i & mask == 0) {
            let i1 = i0 | mask;
            let psi_0 = self.amplitudes[i0];
            let psi_1 = self.amplitudes[i1];
            self.amplitudes[i0] = matrix[0][0] * psi_0 + matrix[0][1] * psi_1;
            self.amplitudes[i1] = matrix[1][0] * psi_0 + matrix[1][1] * psi_1;
        }
    }

    /// Contracts a 4×4 matrix against every amplitude quadruple that differs
    /// only in qubits `a` and `b`. Sub-index is `2·bit(a) + bit(b)`.
    fn apply_pair(&mut self, a: usize, b: usize, matrix: &Matrix4) {
        let mask_a = 1usize << a;
        let mask_b = 1usize << b;
        for base in (0..self.dim()).filter(|i| i & (mask_a | mask_b) == 0) {
            let indices = [base, base | mask_b, base | mask_a, base | mask_a | mask_b];
            let psi = indices.map(|i| self.amplitudes[i]);
            for (row, &index) in indices.iter().enumerate() {
                self.amplitudes[index] = matrix[row]
                    .iter()
                    .zip(psi.iter())
                    .map(|(m, p)| m * p)
                    .sum();
            }
        }
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StateVector[")?;
        for (i, c) in self.amplitudes.iter().enumerate() {
            write!(
                f,
                "{}|{}>: {:.4}",
                if i > 0 { ", " } else { "" },
                Bitstring::new(i, self.num_qubits),
                c
            )?;
        }
        write!(f, "]")
    }
}

/// A basis state together with its Born-rule probability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasurementOutcome {
    /// The measured basis label.
    pub bitstring: Bitstring,
    /// `|amplitude|^2` at the time the outcome was derived.
    pub probability: f64,
}

impl fmt::Display for MeasurementOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:.4}", self.bitstring, self.probability)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_1_SQRT_2;

    const TEST_TOLERANCE: f64 = 1e-9;

    /// Asserts that two complex vectors are approximately equal component-wise.
    fn assert_complex_vec_approx_equal(
        actual: &[Complex<f64>],
        expected: &[Complex<f64>],
        context: &str,
    ) {
        assert_eq!(actual.len(), expected.len(), "Vector length mismatch - {}", context);
        for i in 0..actual.len() {
            let dist_sq = (actual[i] - expected[i]).norm_sqr();
            assert!(
                dist_sq < TEST_TOLERANCE * TEST_TOLERANCE,
                "Vector mismatch at index {} - Actual: {}, Expected: {}, Context: {}",
                i,
                actual[i],
                expected[i],
                context
            );
        }
    }

    fn c(re: f64) -> Complex<f64> {
        Complex::new(re, 0.0)
    }

    #[test]
    fn test_new_is_all_zero_basis_state() -> Result<()> {
        let state = StateVector::new(2)?;
        assert_eq!(state.dim(), 4);
        assert_eq!(state.amplitudes(), &[c(1.0), c(0.0), c(0.0), c(0.0)]);
        Ok(())
    }

    #[test]
    fn test_new_rejects_oversized_register() {
        assert_eq!(
            StateVector::new(MAX_QUBITS + 1),
            Err(SimError::TooManyQubits {
                requested: MAX_QUBITS + 1,
                max: MAX_QUBITS
            })
        );
    }

    #[test]
    fn test_x_on_qubit_one_sets_high_bit() -> Result<()> {
        let mut state = StateVector::new(2)?;
        state.apply(&Gate::x(1))?;
        // |q1 q0> = |10> is index 2
        assert_complex_vec_approx_equal(
            state.amplitudes(),
            &[c(0.0), c(0.0), c(1.0), c(0.0)],
            "X on qubit 1",
        );
        Ok(())
    }

    #[test]
    fn test_bell_pair() -> Result<()> {
        let mut state = StateVector::new(2)?;
        state.apply(&Gate::h(0))?;
        state.apply(&Gate::cnot(0, 1))?;
        let r = c(FRAC_1_SQRT_2);
        assert_complex_vec_approx_equal(state.amplitudes(), &[r, c(0.0), c(0.0), r], "Bell pair");
        Ok(())
    }

    #[test]
    fn test_cnot_respects_control_and_target_order() -> Result<()> {
        // Control on qubit 1, target qubit 0: |10> -> |11>
        let mut state = StateVector::new(2)?;
        state.apply(&Gate::x(1))?;
        state.apply(&Gate::cnot(1, 0))?;
        assert_complex_vec_approx_equal(
            state.amplitudes(),
            &[c(0.0), c(0.0), c(0.0), c(1.0)],
            "CNOT(1 -> 0) on |10>",
        );
        // Control on qubit 0 clear: nothing happens
        let mut idle = StateVector::new(2)?;
        idle.apply(&Gate::x(1))?;
        idle.apply(&Gate::cnot(0, 1))?;
        assert_complex_vec_approx_equal(
            idle.amplitudes(),
            &[c(0.0), c(0.0), c(1.0), c(0.0)],
            "CNOT(0 -> 1) on |10>",
        );
        Ok(())
    }

    #[test]
    fn test_gate_on_middle_qubit_of_three() -> Result<()> {
        let mut state = StateVector::new(3)?;
        state.apply(&Gate::h(1))?;
        let r = c(FRAC_1_SQRT_2);
        let z = c(0.0);
        assert_complex_vec_approx_equal(
            state.amplitudes(),
            &[r, z, r, z, z, z, z, z],
            "H on qubit 1 of 3",
        );
        Ok(())
    }

    #[test]
    fn test_out_of_range_qubit_leaves_state_untouched() -> Result<()> {
        let mut state = StateVector::new(2)?;
        state.apply(&Gate::h(0))?;
        let before = state.clone();
        assert_eq!(
            state.apply(&Gate::cnot(0, 2)),
            Err(SimError::InvalidQubitIndex {
                index: 2,
                num_qubits: 2
            })
        );
        assert_eq!(state, before);
        Ok(())
    }

    #[test]
    fn test_non_unitary_gate_is_rejected() -> Result<()> {
        let mut state = StateVector::new(1)?;
        let projector = [[c(1.0), c(0.0)], [c(0.0), c(0.0)]];
        let result = state.apply(&Gate::single("P0", projector, 0));
        assert!(matches!(result, Err(SimError::NonUnitaryGate { .. })));
        Ok(())
    }

    #[test]
    fn test_from_amplitudes_validates() {
        assert_eq!(
            StateVector::from_amplitudes(vec![c(1.0), c(0.0), c(0.0)]),
            Err(SimError::InvalidDimension(3))
        );
        assert!(matches!(
            StateVector::from_amplitudes(vec![c(1.0), c(1.0)]),
            Err(SimError::UnnormalizedStateDrift { .. })
        ));
        assert!(StateVector::from_amplitudes(vec![c(0.6), c(0.8)]).is_ok());
    }

    #[test]
    fn test_renormalize_restores_unit_norm() -> Result<()> {
        let mut state = StateVector::new(1)?;
        state.amplitudes[0] = c(1.0 + 1e-6);
        state.renormalize()?;
        assert!((state.norm_sqr() - 1.0).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn test_outcomes_skip_impossible_states() -> Result<()> {
        let mut state = StateVector::new(2)?;
        state.apply(&Gate::h(0))?;
        state.apply(&Gate::cnot(0, 1))?;
        let outcomes = state.outcomes();
        let labels: Vec<String> = outcomes.iter().map(|o| o.bitstring.to_string()).collect();
        assert_eq!(labels, vec!["00", "11"]);
        for outcome in outcomes {
            assert!((outcome.probability - 0.5).abs() < TEST_TOLERANCE);
        }
        Ok(())
    }

    #[test]
    fn test_amplitude_lookup_by_bitstring() -> Result<()> {
        let mut state = StateVector::new(2)?;
        state.apply(&Gate::x(0))?;
        let one: Bitstring = "01".parse()?;
        assert_eq!(state.amplitude(&one), Some(c(1.0)));
        assert_eq!(state.amplitude(&"1".parse()?), None);
        Ok(())
    }
}
