// src/measurement/mod.rs

//! Born-rule sampling of a final state into a count histogram.

mod histogram;
mod sampler;

pub use histogram::Histogram;
pub use sampler::Sampler;
