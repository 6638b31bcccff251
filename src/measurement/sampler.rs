// src/measurement/sampler.rs
use super::Histogram;
use crate::core::constants::DEFAULT_NORM_TOLERANCE;
use crate::core::{Bitstring, Result, SimError, StateVector};
use crate::validation::check_norm_sqr;
use rand::{Rng, RngExt};
use tracing::trace;

/// Draws repeated computational-basis measurements from a state.
///
/// Every shot samples the same, unchanged distribution: the state is read,
/// never collapsed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sampler {
    /// How far total probability may stray from 1 before sampling is refused.
    norm_tolerance: f64,
}

impl Default for Sampler {
    fn default() -> Self {
        Self {
            norm_tolerance: DEFAULT_NORM_TOLERANCE,
        }
    }
}

impl Sampler {
    /// Creates a `Sampler` with the default normalization tolerance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the normalization tolerance.
    pub fn with_tolerance(norm_tolerance: f64) -> Self {
        Self { norm_tolerance }
    }

    /// Samples `state` `shots` times using the Born rule.
    ///
    /// # Arguments
    ///
    /// * `state` - The state to measure; left untouched.
    /// * `shots` - Number of independent draws.
    /// * `rng` - Source of randomness; pass a seeded generator for reproducible runs.
    ///
    /// # Returns
    ///
    /// A `Histogram` whose counts sum to `shots`, or
    /// `ShotCountNonPositive` for zero shots and `UnnormalizedStateDrift`
    /// if the probabilities do not sum to 1 within tolerance.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        state: &StateVector,
        shots: usize,
        rng: &mut R,
    ) -> Result<Histogram> {
        if shots == 0 {
            return Err(SimError::ShotCountNonPositive { shots });
        }

        let probs = state.probabilities();
        let total: f64 = probs.iter().sum();
        check_norm_sqr(total, self.norm_tolerance)?;

        // Pre-calculate the cumulative distribution once, divided by the
        // total so the last entry is 1 up to rounding.
        let mut cdf = Vec::with_capacity(probs.len());
        let mut current_sum = 0.0;
        for &p in &probs {
            current_sum += p / total;
            cdf.push(current_sum);
        }
        // A roll past the rounded top of the CDF lands on the last possible outcome.
        let last_possible = probs.iter().rposition(|&p| p > 0.0).unwrap_or(0);

        let mut raw_counts = vec![0usize; probs.len()];
        for _ in 0..shots {
            let roll: f64 = rng.random(); // [0.0, 1.0)
            let outcome_idx = cdf.partition_point(|&c| c <= roll).min(last_possible);
            raw_counts[outcome_idx] += 1;
        }

        let mut histogram = Histogram::new(state.num_qubits());
        for (idx, &count) in raw_counts.iter().enumerate() {
            histogram.record(Bitstring::new(idx, state.num_qubits()), count);
        }

        trace!(shots, distinct = histogram.len(), "sampled state");
        Ok(histogram)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::Gate;
    use num_complex::Complex;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_zero_shots_is_rejected() -> Result<()> {
        let state = StateVector::new(2)?;
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            Sampler::new().sample(&state, 0, &mut rng),
            Err(SimError::ShotCountNonPositive { shots: 0 })
        );
        Ok(())
    }

    #[test]
    fn test_basis_state_always_yields_itself() -> Result<()> {
        let mut state = StateVector::new(2)?;
        state.apply(&Gate::x(1))?;
        let mut rng = StdRng::seed_from_u64(7);
        let histogram = Sampler::new().sample(&state, 500, &mut rng)?;
        assert_eq!(histogram.len(), 1);
        assert_eq!(histogram.count(&"10".parse()?), 500);
        Ok(())
    }

    #[test]
    fn test_sampling_does_not_mutate_state() -> Result<()> {
        let mut state = StateVector::new(1)?;
        state.apply(&Gate::h(0))?;
        let before = state.clone();
        let mut rng = StdRng::seed_from_u64(3);
        Sampler::new().sample(&state, 100, &mut rng)?;
        assert_eq!(state, before);
        Ok(())
    }

    #[test]
    fn test_born_rule_frequencies() -> Result<()> {
        // |psi> = 0.6|0> + 0.8|1>  ->  P(0) = 0.36, P(1) = 0.64
        let state =
            StateVector::from_amplitudes(vec![Complex::new(0.6, 0.0), Complex::new(0.0, 0.8)])?;
        let mut rng = StdRng::seed_from_u64(2024);
        let shots = 20_000;
        let histogram = Sampler::new().sample(&state, shots, &mut rng)?;
        assert_eq!(histogram.total(), shots);
        let p0 = histogram.frequency(&"0".parse()?);
        assert!((p0 - 0.36).abs() < 0.02, "P(0) = {}", p0);
        Ok(())
    }

    #[test]
    fn test_same_seed_same_histogram() -> Result<()> {
        let mut state = StateVector::new(2)?;
        state.apply(&Gate::h(0))?;
        state.apply(&Gate::h(1))?;
        let sampler = Sampler::new();
        let a = sampler.sample(&state, 1000, &mut StdRng::seed_from_u64(9))?;
        let b = sampler.sample(&state, 1000, &mut StdRng::seed_from_u64(9))?;
        assert_eq!(a, b);
        Ok(())
    }

    #[test]
    fn test_tolerance_controls_drift_check() -> Result<()> {
        // 1e-10 over: inside the default tolerance, outside a tighter one.
        let mut state = StateVector::new(1)?;
        state.apply(&Gate::single(
            "almost-I",
            [
                [Complex::new((1.0f64 + 1e-10).sqrt(), 0.0), Complex::new(0.0, 0.0)],
                [Complex::new(0.0, 0.0), Complex::new(1.0, 0.0)],
            ],
            0,
        ))?;
        let mut rng = StdRng::seed_from_u64(5);
        assert!(Sampler::new().sample(&state, 10, &mut rng).is_ok());
        assert!(matches!(
            Sampler::with_tolerance(1e-12).sample(&state, 10, &mut rng),
            Err(SimError::UnnormalizedStateDrift { .. })
        ));
        Ok(())
    }
}
