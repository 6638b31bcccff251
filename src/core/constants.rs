//! Numeric tolerances and limits shared by the simulation core.

/// Allowed deviation of `sum(|c_i|^2)` from 1.
pub const DEFAULT_NORM_TOLERANCE: f64 = 1e-9;

/// Allowed entry-wise deviation of `U·U†` from the identity.
pub const DEFAULT_UNITARITY_TOLERANCE: f64 = 1e-9;

/// Probabilities below this are treated as impossible outcomes.
pub const AMPLITUDE_TOLERANCE: f64 = 1e-12;

/// Largest system `StateVector::new` will allocate (2^24 amplitudes).
pub const MAX_QUBITS: usize = 24;
