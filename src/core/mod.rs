// src/core/mod.rs

//! Core data structures and types

pub mod bitstring;
pub mod constants;
pub mod error;
pub mod state;

// Re-export public types for convenient access via `densecode::core::TypeName`
pub use bitstring::Bitstring;
pub use error::{Result, SimError};
pub use state::{MeasurementOutcome, StateVector};
