// src/operations/mod.rs

//! Gate applications: a unitary matrix bound to the qubit(s) it acts on.
//!
//! The protocol only ever needs the four library gates (`Gate::h`, `Gate::x`,
//! `Gate::z`, `Gate::cnot`). `Gate::single` and `Gate::two` accept an
//! arbitrary matrix; its unitarity is checked when the gate is applied to a
//! state, not at construction.

pub mod gates;

pub use gates::{Matrix2, Matrix4, CNOT, HADAMARD, PAULI_X, PAULI_Z};

use crate::core::{Result, SimError};
use crate::validation::unitarity_deviation;
use std::borrow::Cow;
use std::fmt;

/// The matrix of a gate together with the qubits it is bound to.
#[derive(Debug, Clone, PartialEq)]
pub enum GateAction {
    /// A 2×2 matrix on one qubit.
    Single {
        /// Gate matrix.
        matrix: Matrix2,
        /// Target qubit.
        target: usize,
    },
    /// A 4×4 matrix on an ordered qubit pair `[a, b]`, indexed `2·bit(a) + bit(b)`.
    Two {
        /// Gate matrix.
        matrix: Matrix4,
        /// Ordered qubit pair.
        qubits: [usize; 2],
    },
}

/// An immutable gate application.
#[derive(Debug, Clone, PartialEq)]
pub struct Gate {
    name: Cow<'static, str>,
    action: GateAction,
}

impl Gate {
    /// Hadamard on `target`.
    pub fn h(target: usize) -> Self {
        Self::single("H", HADAMARD, target)
    }

    /// Pauli-X on `target`.
    pub fn x(target: usize) -> Self {
        Self::single("X", PAULI_X, target)
    }

    /// Pauli-Z on `target`.
    pub fn z(target: usize) -> Self {
        Self::single("Z", PAULI_Z, target)
    }

    /// Controlled-NOT flipping `target` when `control` is |1>.
    pub fn cnot(control: usize, target: usize) -> Self {
        Self::two("CNOT", CNOT, [control, target])
    }

    /// Binds a caller-supplied 2×2 matrix to `target`.
    pub fn single(name: impl Into<Cow<'static, str>>, matrix: Matrix2, target: usize) -> Self {
        Self {
            name: name.into(),
            action: GateAction::Single { matrix, target },
        }
    }

    /// Binds a caller-supplied 4×4 matrix to the ordered pair `qubits`.
    pub fn two(name: impl Into<Cow<'static, str>>, matrix: Matrix4, qubits: [usize; 2]) -> Self {
        Self {
            name: name.into(),
            action: GateAction::Two { matrix, qubits },
        }
    }

    /// Display name, e.g. `"H"` or `"CNOT"`.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn action(&self) -> &GateAction {
        &self.action
    }

    /// Qubits the gate touches, in matrix order.
    pub fn qubits(&self) -> &[usize] {
        match &self.action {
            GateAction::Single { target, .. } => std::slice::from_ref(target),
            GateAction::Two { qubits, .. } => &qubits[..],
        }
    }

    /// Checks that every qubit is below `num_qubits` and no qubit repeats.
    pub fn check_qubits(&self, num_qubits: usize) -> Result<()> {
        for &index in self.qubits() {
            if index >= num_qubits {
                return Err(SimError::InvalidQubitIndex { index, num_qubits });
            }
        }
        if let GateAction::Two { qubits: [a, b], .. } = self.action {
            if a == b {
                return Err(SimError::DuplicateQubit(a));
            }
        }
        Ok(())
    }

    /// Fails with `NonUnitaryGate` unless `U·U†` is within `tolerance` of `I`.
    pub fn check_unitary(&self, tolerance: f64) -> Result<()> {
        let deviation = match &self.action {
            GateAction::Single { matrix, .. } => unitarity_deviation(matrix),
            GateAction::Two { matrix, .. } => unitarity_deviation(matrix),
        };
        if deviation > tolerance {
            return Err(SimError::NonUnitaryGate {
                gate: self.name.to_string(),
                deviation,
            });
        }
        Ok(())
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        for (i, q) in self.qubits().iter().enumerate() {
            write!(f, "{}q{}", if i > 0 { ", " } else { " " }, q)?;
        }
        Ok(())
    }
}
