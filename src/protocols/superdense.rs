// src/protocols/superdense.rs

//! Superdense coding: two classical bits carried by one qubit of a shared
//! Bell pair.
//!
//! Qubit 0 is the sender's half of the pair and the only qubit the encoding
//! touches; qubit 1 stays with the receiver. After decoding, the register
//! holds the computational basis state whose bitstring (qubit 1 first) is the
//! message.

use crate::circuits::{Circuit, CircuitBuilder};
use crate::config::SimulatorConfig;
use crate::core::{Bitstring, Result, SimError, StateVector};
use crate::measurement::{Histogram, Sampler};
use crate::operations::Gate;
use crate::simulation::Simulator;
use rand::Rng;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, debug_span, info};

/// Register width the protocol runs on.
pub const NUM_QUBITS: usize = 2;
/// The qubit the sender encodes onto and transmits.
pub const SENDER_QUBIT: usize = 0;
/// The qubit held by the receiver throughout.
pub const RECEIVER_QUBIT: usize = 1;

/// One of the four 2-bit messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Message {
    M00,
    M01,
    M10,
    M11,
}

impl Message {
    /// All messages in ascending order.
    pub const ALL: [Message; 4] = [Message::M00, Message::M01, Message::M10, Message::M11];

    /// The message as text, e.g. `"10"`.
    pub fn bits(self) -> &'static str {
        match self {
            Message::M00 => "00",
            Message::M01 => "01",
            Message::M10 => "10",
            Message::M11 => "11",
        }
    }

    /// The basis state the receiver should measure for this message.
    pub fn as_bitstring(self) -> Bitstring {
        let value = match self {
            Message::M00 => 0b00,
            Message::M01 => 0b01,
            Message::M10 => 0b10,
            Message::M11 => 0b11,
        };
        Bitstring::new(value, NUM_QUBITS)
    }

    /// Gates the sender applies to qubit 0, in order.
    ///
    /// This table is the whole encoding scheme. For `11`, Z comes before X.
    pub fn encoding(self) -> Vec<Gate> {
        match self {
            Message::M00 => vec![],
            Message::M10 => vec![Gate::x(SENDER_QUBIT)],
            Message::M01 => vec![Gate::z(SENDER_QUBIT)],
            Message::M11 => vec![Gate::z(SENDER_QUBIT), Gate::x(SENDER_QUBIT)],
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.bits())
    }
}

impl FromStr for Message {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self> {
        Message::ALL
            .into_iter()
            .find(|m| m.bits() == s)
            .ok_or_else(|| SimError::InvalidMessage(s.to_string()))
    }
}

impl TryFrom<Bitstring> for Message {
    type Error = SimError;

    fn try_from(bitstring: Bitstring) -> Result<Self> {
        Message::ALL
            .into_iter()
            .find(|m| m.as_bitstring() == bitstring)
            .ok_or_else(|| SimError::InvalidMessage(bitstring.to_string()))
    }
}

impl Serialize for Message {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.bits())
    }
}

/// Stages a message passes through, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Init,
    /// Bell pair prepared.
    Entangled,
    /// Sender's gates applied to qubit 0.
    Encoded,
    /// Bell-basis disentangling transform applied.
    Decoded,
    /// Histogram sampled.
    Measured,
    /// Received message compared with the sent one.
    Reported,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Init => "init",
            Stage::Entangled => "entangled",
            Stage::Encoded => "encoded",
            Stage::Decoded => "decoded",
            Stage::Measured => "measured",
            Stage::Reported => "reported",
        };
        f.write_str(name)
    }
}

/// Terminal state of one message run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Outcome {
    Success,
    Failure,
}

/// The verdict for one message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProtocolResult {
    /// What the sender encoded.
    pub sent: Message,
    /// Most frequent bitstring in `histogram` (smallest on ties).
    pub received: Bitstring,
    /// `received == sent`.
    pub success: bool,
    /// Raw counts, for whoever renders them.
    pub histogram: Histogram,
}

impl ProtocolResult {
    pub fn outcome(&self) -> Outcome {
        if self.success {
            Outcome::Success
        } else {
            Outcome::Failure
        }
    }
}

impl fmt::Display for ProtocolResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = match self.outcome() {
            Outcome::Success => "SUCCESS",
            Outcome::Failure => "FAILURE",
        };
        write!(f, "'{}' -> '{}': {}", self.sent, self.received, verdict)
    }
}

/// Results for all four messages of one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProtocolReport {
    results: Vec<ProtocolResult>,
}

impl ProtocolReport {
    /// Per-message results, in `Message::ALL` order.
    pub fn results(&self) -> &[ProtocolResult] {
        &self.results
    }

    /// Result for one message.
    pub fn get(&self, message: Message) -> Option<&ProtocolResult> {
        self.results.iter().find(|r| r.sent == message)
    }

    pub fn all_succeeded(&self) -> bool {
        self.results.iter().all(|r| r.success)
    }
}

impl fmt::Display for ProtocolReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Final results:")?;
        for result in &self.results {
            writeln!(f, "  {}", result)?;
        }
        if self.all_succeeded() {
            writeln!(f, "All messages were transmitted and received correctly.")?;
        }
        Ok(())
    }
}

/// Encode → transmit → decode → measure pipeline on a simulated register.
#[derive(Debug, Clone, Default)]
pub struct SuperdenseProtocol {
    simulator: Simulator,
    sampler: Sampler,
}

impl SuperdenseProtocol {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `config` for both the simulator and the sampler.
    pub fn with_config(config: SimulatorConfig) -> Self {
        Self {
            simulator: Simulator::with_config(config),
            sampler: Sampler::with_tolerance(config.norm_tolerance),
        }
    }

    /// H on qubit 0, then CNOT(0 → 1): |00> becomes a Bell pair.
    pub fn entangle_circuit(&self) -> Result<Circuit> {
        CircuitBuilder::new(NUM_QUBITS)
            .h(SENDER_QUBIT)
            .cnot(SENDER_QUBIT, RECEIVER_QUBIT)
            .build()
    }

    /// The sender's gates for `message`.
    pub fn encode_circuit(&self, message: Message) -> Result<Circuit> {
        CircuitBuilder::new(NUM_QUBITS)
            .add_ops(message.encoding())
            .build()
    }

    /// CNOT(0 → 1), then H on qubit 0: maps the Bell basis onto the
    /// computational basis.
    pub fn decode_circuit(&self) -> Result<Circuit> {
        CircuitBuilder::new(NUM_QUBITS)
            .cnot(SENDER_QUBIT, RECEIVER_QUBIT)
            .h(SENDER_QUBIT)
            .build()
    }

    /// Full gate sequence for `message`: entangle, encode, decode.
    pub fn circuit(&self, message: Message) -> Result<Circuit> {
        Ok(self
            .entangle_circuit()?
            .then(&self.encode_circuit(message)?)
            .then(&self.decode_circuit()?))
    }

    /// Runs the deterministic part of the protocol and returns the state
    /// just before measurement.
    pub fn prepare(&self, message: Message) -> Result<StateVector> {
        let mut state = StateVector::new(NUM_QUBITS)?;
        debug!(stage = %Stage::Init, "allocated register");

        state = self.simulator.run_on(&self.entangle_circuit()?, state)?;
        debug!(stage = %Stage::Entangled, "bell pair ready");

        state = self.simulator.run_on(&self.encode_circuit(message)?, state)?;
        debug!(stage = %Stage::Encoded, gates = message.encoding().len(), "message encoded");

        state = self.simulator.run_on(&self.decode_circuit()?, state)?;
        debug!(stage = %Stage::Decoded, "bell basis undone");

        Ok(state)
    }

    /// Sends `message` through the protocol and measures it `shots` times.
    ///
    /// A decoded mismatch is reported through `ProtocolResult::success`;
    /// only simulation failures and a zero shot count are errors.
    pub fn run<R: Rng + ?Sized>(
        &self,
        message: Message,
        shots: usize,
        rng: &mut R,
    ) -> Result<ProtocolResult> {
        let span = debug_span!("superdense", message = %message, shots);
        let _enter = span.enter();

        let state = self.prepare(message)?;

        let histogram = self.sampler.sample(&state, shots, rng)?;
        debug!(stage = %Stage::Measured, distinct = histogram.len(), "histogram sampled");

        let (received, count) = histogram
            .most_frequent()
            .ok_or(SimError::ShotCountNonPositive { shots })?;
        let success = received == message.as_bitstring();
        debug!(stage = %Stage::Reported, %received, count, success, "compared");
        info!(sent = %message, %received, success, "message decoded");

        Ok(ProtocolResult {
            sent: message,
            received,
            success,
            histogram,
        })
    }

    /// Runs every message in `Message::ALL` order with the same generator.
    pub fn run_all<R: Rng + ?Sized>(&self, shots: usize, rng: &mut R) -> Result<ProtocolReport> {
        let results = Message::ALL
            .into_iter()
            .map(|message| self.run(message, shots, &mut *rng))
            .collect::<Result<Vec<_>>>()?;
        Ok(ProtocolReport { results })
    }
}
