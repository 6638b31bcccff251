// src/config.rs

//! Tunable settings for the simulator and the protocol driver.
//!
//! Every field has a default, so a TOML document only needs the keys it
//! changes:
//!
//! ```toml
//! shots = 2048
//! seed = 7
//!
//! [simulator]
//! drift_policy = "renormalize"
//! ```

use crate::core::constants::{DEFAULT_NORM_TOLERANCE, DEFAULT_UNITARITY_TOLERANCE};
use crate::core::Result;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// What the simulator does when rounding pushes the norm outside tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriftPolicy {
    /// Stop with `UnnormalizedStateDrift`.
    #[default]
    Fail,
    /// Rescale the state to unit norm and continue.
    Renormalize,
}

/// Numeric settings for `Simulator` and `Sampler`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Allowed deviation of total probability from 1.
    pub norm_tolerance: f64,
    /// Allowed entry-wise deviation of `U·U†` from the identity.
    pub unitarity_tolerance: f64,
    pub drift_policy: DriftPolicy,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            norm_tolerance: DEFAULT_NORM_TOLERANCE,
            unitarity_tolerance: DEFAULT_UNITARITY_TOLERANCE,
            drift_policy: DriftPolicy::Fail,
        }
    }
}

/// Settings for a full superdense coding run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolConfig {
    /// Shots sampled per message.
    pub shots: usize,
    /// Fixed RNG seed; `None` draws a seed from the operating system.
    pub seed: Option<u64>,
    pub simulator: SimulatorConfig,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            shots: 1000,
            seed: None,
            simulator: SimulatorConfig::default(),
        }
    }
}

impl ProtocolConfig {
    /// Parses a TOML document; missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// The pseudorandom source this configuration asks for.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => rand::make_rng(),
        }
    }
}
