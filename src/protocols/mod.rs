// src/protocols/mod.rs

//! Protocols composed from circuits and sampling.

pub mod superdense;

pub use superdense::{Message, Outcome, ProtocolReport, ProtocolResult, Stage, SuperdenseProtocol};
