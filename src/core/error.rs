// src/core/error.rs

//! Error handling logic

use thiserror::Error;

/// Failures surfaced by the simulation core.
///
/// Every variant is returned to the caller; nothing in the core swallows an
/// error or substitutes a default value.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    /// A gate names a qubit outside `[0, num_qubits)`.
    #[error("qubit index {index} is out of range for a {num_qubits}-qubit system")]
    InvalidQubitIndex {
        /// The offending qubit index.
        index: usize,
        /// Width of the system the gate was applied to.
        num_qubits: usize,
    },

    /// A gate matrix failed the U·U† = I check.
    #[error("gate '{gate}' is not unitary (max deviation from identity {deviation:.3e})")]
    NonUnitaryGate {
        /// Display name of the gate.
        gate: String,
        /// Largest entry-wise distance between U·U† and the identity.
        deviation: f64,
    },

    /// Sampling was requested with no shots.
    #[error("shot count must be positive, got {shots}")]
    ShotCountNonPositive {
        /// The rejected shot count.
        shots: usize,
    },

    /// Total probability left the tolerance band around 1.
    #[error(
        "state vector normalization drifted: sum(|c_i|^2) = {norm_sqr} (tolerance {tolerance:e})"
    )]
    UnnormalizedStateDrift {
        /// Observed sum of squared magnitudes.
        norm_sqr: f64,
        /// Tolerance that was exceeded.
        tolerance: f64,
    },

    /// A two-qubit gate names the same qubit twice.
    #[error("qubit {0} appears more than once in a single gate")]
    DuplicateQubit(usize),

    /// An amplitude vector whose length is not a power of two.
    #[error("amplitude vector length {0} is not a power of two")]
    InvalidDimension(usize),

    /// The requested system is larger than the core supports.
    #[error("{requested} qubits requested, at most {max} are supported")]
    TooManyQubits {
        /// Requested qubit count.
        requested: usize,
        /// Supported maximum.
        max: usize,
    },

    /// Text that is not a string of `0`/`1` characters.
    #[error("'{0}' is not a valid bitstring")]
    InvalidBitstring(String),

    /// Text or bitstring that is not one of the four 2-bit messages.
    #[error("'{0}' is not a 2-bit message")]
    InvalidMessage(String),

    /// Configuration text could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl From<toml::de::Error> for SimError {
    fn from(err: toml::de::Error) -> Self {
        SimError::Config(err.to_string())
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, SimError>;
