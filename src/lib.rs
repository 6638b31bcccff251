// src/lib.rs

//! `densecode` - a small, exact state-vector simulator and the superdense
//! coding protocol built on it.
//!
//! The layers, leaf first:
//! - [`StateVector`] holds 2^n complex amplitudes and applies gates in place.
//! - [`operations`] defines the gate matrices (H, X, Z, CNOT) and [`Gate`].
//! - [`Circuit`] is an ordered gate plan; [`Simulator`] runs it.
//! - [`Sampler`] draws Born-rule shots from a final state into a [`Histogram`].
//! - [`SuperdenseProtocol`] composes all of the above for 2-bit messages.
//!
//! Qubit `k` is bit `k` of an amplitude index. Bitstrings print the highest
//! qubit first, so qubit 0 is the rightmost character.
//!
//! The only source of randomness is the generator passed to
//! [`Sampler::sample`] / [`SuperdenseProtocol::run`]; seed it for
//! reproducible runs.

pub mod circuits;
pub mod config;
pub mod core;
pub mod measurement;
pub mod operations;
pub mod protocols;
pub mod simulation;
pub mod validation;

// Re-export the most common types for easier top-level use
pub use circuits::{Circuit, CircuitBuilder};
pub use config::{DriftPolicy, ProtocolConfig, SimulatorConfig};
pub use crate::core::{Bitstring, MeasurementOutcome, Result, SimError, StateVector};
pub use measurement::{Histogram, Sampler};
pub use operations::Gate;
pub use protocols::{Message, Outcome, ProtocolReport, ProtocolResult, Stage, SuperdenseProtocol};
pub use simulation::Simulator;
pub use validation::{check_normalization, is_unitary, validate_state};

// Example 1: Sending one message
// Every message decodes to its own basis state with probability 1, so all
// shots land on the sent bitstring.
/// ```
/// use densecode::{Message, SimError, SuperdenseProtocol};
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let protocol = SuperdenseProtocol::new();
///
/// let result = protocol.run(Message::M11, 1000, &mut rng)?;
/// assert!(result.success);
/// assert_eq!(result.received.to_string(), "11");
/// assert_eq!(result.histogram.count(&"11".parse()?), 1000);
/// # Ok::<(), SimError>(())
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item

// Example 2: Building and simulating a circuit by hand
/// ```
/// use densecode::{CircuitBuilder, Sampler, SimError, Simulator};
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// // Bell pair: (|00> + |11>) / sqrt(2)
/// let circuit = CircuitBuilder::new(2).h(0).cnot(0, 1).build()?;
/// let state = Simulator::new().run(&circuit, 2)?;
///
/// let mut rng = StdRng::seed_from_u64(1);
/// let histogram = Sampler::new().sample(&state, 1000, &mut rng)?;
/// assert_eq!(histogram.total(), 1000);
/// assert_eq!(histogram.count(&"01".parse()?) + histogram.count(&"10".parse()?), 0);
/// # Ok::<(), SimError>(())
/// ```
#[doc(hidden)]
const _: () = ();
