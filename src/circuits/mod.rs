// src/circuits/mod.rs

//! Defines structures for representing and building ordered sequences of
//! gate applications (`densecode::operations::Gate`).
//!
//! A `Circuit` is a plan only: it holds no state and never changes after
//! `CircuitBuilder::build` returns it. The simulator consumes it.

use crate::core::Result;
use crate::operations::Gate;
use std::fmt;

/// An ordered sequence of gates on a register of fixed width.
///
/// Every gate is known to reference qubits inside `[0, num_qubits)`.
#[derive(Clone, PartialEq)]
pub struct Circuit {
    /// Register width the gates were validated against.
    num_qubits: usize,
    /// The order is the application order.
    operations: Vec<Gate>,
}

impl Circuit {
    /// Creates an empty circuit on `num_qubits` qubits.
    pub fn empty(num_qubits: usize) -> Self {
        Self {
            num_qubits,
            operations: Vec::new(),
        }
    }

    /// Register width this circuit was built for.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Returns a slice containing the ordered sequence of gates in this circuit.
    pub fn operations(&self) -> &[Gate] {
        &self.operations
    }

    /// Returns the total number of gates in the circuit.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Returns `true` if the circuit contains no gates.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Appends the gates of `next` after this circuit's gates.
    ///
    /// The result is as wide as the wider of the two.
    pub fn then(mut self, next: &Circuit) -> Circuit {
        self.num_qubits = self.num_qubits.max(next.num_qubits);
        self.operations.extend(next.operations.iter().cloned());
        self
    }
}

//-------------------------------------------------------------------------
// Circuit Builder
//-------------------------------------------------------------------------

/// A helper struct for programmatically constructing `Circuit` instances using method chaining.
///
/// Qubit indices are checked once, in `build`.
pub struct CircuitBuilder {
    circuit: Circuit,
}

impl CircuitBuilder {
    /// Creates a new, empty builder for a `num_qubits`-wide register.
    pub fn new(num_qubits: usize) -> Self {
        Self {
            circuit: Circuit::empty(num_qubits),
        }
    }

    /// Adds a single gate to the circuit being built.
    pub fn add_op(mut self, gate: Gate) -> Self {
        self.circuit.operations.push(gate);
        self
    }

    /// Adds multiple gates from an iterator to the circuit being built.
    pub fn add_ops<I>(mut self, gates: I) -> Self
    where
        I: IntoIterator<Item = Gate>,
    {
        self.circuit.operations.extend(gates);
        self
    }

    pub fn h(self, target: usize) -> Self {
        self.add_op(Gate::h(target))
    }

    pub fn x(self, target: usize) -> Self {
        self.add_op(Gate::x(target))
    }

    pub fn z(self, target: usize) -> Self {
        self.add_op(Gate::z(target))
    }

    pub fn cnot(self, control: usize, target: usize) -> Self {
        self.add_op(Gate::cnot(control, target))
    }

    /// Finalizes the construction process and returns the built `Circuit`.
    ///
    /// Fails with `InvalidQubitIndex` (or `DuplicateQubit`) for the first gate
    /// that does not fit the register.
    pub fn build(self) -> Result<Circuit> {
        for gate in &self.circuit.operations {
            gate.check_qubits(self.circuit.num_qubits)?;
        }
        Ok(self.circuit)
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Circuit[{} gates on {} qubits]",
            self.operations.len(),
            self.num_qubits
        )?;
        for (t, gate) in self.operations.iter().enumerate() {
            writeln!(f, "  {:>3}: {}", t, gate)?;
        }
        Ok(())
    }
}

// Keep the Debug impl delegating to Display
impl fmt::Debug for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
