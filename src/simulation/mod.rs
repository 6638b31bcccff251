// src/simulation/mod.rs

//! Runs a `Circuit` against a `StateVector`.
//!
//! Execution is deterministic: the same circuit and initial state always give
//! bit-for-bit identical amplitudes. Randomness only enters later, in
//! `crate::measurement::Sampler`.

use crate::circuits::Circuit;
use crate::config::{DriftPolicy, SimulatorConfig};
use crate::core::{Result, StateVector};
use crate::validation::check_norm_sqr;
use tracing::{debug, trace, warn};

/// The main simulator orchestrating the execution of circuits.
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    config: SimulatorConfig,
}

impl Simulator {
    /// Creates a new Simulator with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SimulatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Runs `circuit` on a fresh |0...0> register of `num_qubits` qubits.
    ///
    /// # Returns
    /// * `Ok(StateVector)` holding the final amplitudes.
    /// * `Err(SimError::InvalidQubitIndex)` if a gate does not fit the register.
    /// * `Err(SimError::UnnormalizedStateDrift)` under `DriftPolicy::Fail` when
    ///   rounding pushes the norm outside tolerance.
    pub fn run(&self, circuit: &Circuit, num_qubits: usize) -> Result<StateVector> {
        self.run_on(circuit, StateVector::new(num_qubits)?)
    }

    /// Runs `circuit` on `state`, taking ownership of it, and returns the
    /// final state.
    ///
    /// The drift policy covers the incoming state as well as every gate, so
    /// a state built under a looser tolerance is rescaled (or rejected)
    /// before the first gate.
    pub fn run_on(&self, circuit: &Circuit, mut state: StateVector) -> Result<StateVector> {
        self.enforce_norm(&mut state)?;
        debug!(
            gates = circuit.len(),
            num_qubits = state.num_qubits(),
            "running circuit"
        );

        for (step, gate) in circuit.operations().iter().enumerate() {
            state.apply_with_tolerance(gate, self.config.unitarity_tolerance)?;
            trace!(step, gate = %gate, "applied gate");
            self.enforce_norm(&mut state)?;
        }

        Ok(state)
    }

    fn enforce_norm(&self, state: &mut StateVector) -> Result<()> {
        let norm_sqr = state.norm_sqr();
        match check_norm_sqr(norm_sqr, self.config.norm_tolerance) {
            Ok(()) => Ok(()),
            Err(err) => match self.config.drift_policy {
                DriftPolicy::Fail => Err(err),
                DriftPolicy::Renormalize => {
                    warn!(norm_sqr, "state norm drifted, renormalizing");
                    state.renormalize()
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuits::CircuitBuilder;
    use crate::core::SimError;
    use crate::operations::Gate;
    use num_complex::Complex;

    /// A gate that is unitary within a loose tolerance but scales the norm.
    fn leaky_gate() -> Gate {
        let s = Complex::new(1.0 + 1e-4, 0.0);
        let z = Complex::new(0.0, 0.0);
        Gate::single("leak", [[s, z], [z, s]], 0)
    }

    #[test]
    fn test_empty_circuit_returns_initial_state() -> Result<()> {
        let state = Simulator::new().run(&Circuit::empty(2), 2)?;
        assert_eq!(state, StateVector::new(2)?);
        Ok(())
    }

    #[test]
    fn test_drift_fails_by_default() -> Result<()> {
        let config = SimulatorConfig {
            unitarity_tolerance: 1e-2,
            ..SimulatorConfig::default()
        };
        let circuit = CircuitBuilder::new(1).add_op(leaky_gate()).build()?;
        let result = Simulator::with_config(config).run(&circuit, 1);
        assert!(matches!(result, Err(SimError::UnnormalizedStateDrift { .. })));
        Ok(())
    }

    #[test]
    fn test_drift_renormalizes_when_configured() -> Result<()> {
        let config = SimulatorConfig {
            unitarity_tolerance: 1e-2,
            drift_policy: DriftPolicy::Renormalize,
            ..SimulatorConfig::default()
        };
        let circuit = CircuitBuilder::new(1)
            .add_op(leaky_gate())
            .add_op(leaky_gate())
            .build()?;
        let state = Simulator::with_config(config).run(&circuit, 1)?;
        assert!((state.norm_sqr() - 1.0).abs() < 1e-12);
        Ok(())
    }

    /// Normalized within the default tolerance, but not within 1e-12.
    fn slightly_drifted_state() -> Result<StateVector> {
        StateVector::from_amplitudes(vec![Complex::new(0.6, 0.0), Complex::new(0.8 + 1e-10, 0.0)])
    }

    #[test]
    fn test_drifted_input_follows_policy() -> Result<()> {
        let strict = SimulatorConfig {
            norm_tolerance: 1e-12,
            ..SimulatorConfig::default()
        };
        let circuit = CircuitBuilder::new(1).x(0).build()?;

        let result = Simulator::with_config(strict).run_on(&circuit, slightly_drifted_state()?);
        assert!(matches!(result, Err(SimError::UnnormalizedStateDrift { .. })));

        let forgiving = SimulatorConfig {
            drift_policy: DriftPolicy::Renormalize,
            ..strict
        };
        let state = Simulator::with_config(forgiving).run_on(&circuit, slightly_drifted_state()?)?;
        assert!((state.norm_sqr() - 1.0).abs() < 1e-12);
        assert!((state.amplitudes()[0].re - 0.8).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_strict_unitarity_tolerance_rejects_leaky_gate() -> Result<()> {
        let circuit = CircuitBuilder::new(1).add_op(leaky_gate()).build()?;
        let result = Simulator::new().run(&circuit, 1);
        assert!(matches!(result, Err(SimError::NonUnitaryGate { .. })));
        Ok(())
    }

    #[test]
    fn test_circuit_wider_than_register_fails() -> Result<()> {
        let circuit = CircuitBuilder::new(3).cnot(0, 2).build()?;
        assert_eq!(
            Simulator::new().run(&circuit, 2),
            Err(SimError::InvalidQubitIndex { index: 2, num_qubits: 2 })
        );
        Ok(())
    }
}
