//! Display activations
//!
//! A visualization can show intermediate "layer" values next to the
//! result. They are derived from the combined scores and probabilities
//! after the decision is made and never feed back into it.

use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

/// Number of activations per display layer
pub const DEFAULT_ACTIVATION_COUNT: usize = 32;

/// Largest noise added by [`SeededActivations`]
pub const ACTIVATION_NOISE: f32 = 0.2;

/// Produces display activations from a value vector
pub trait ActivationSource {
    /// Produce `count` activations in [0, 1] from `values`
    fn activations(&mut self, values: &[f32], count: usize) -> Vec<f32>;
}

/// `|values[i % len]|` clamped to [0, 1], zeros for an empty input
fn cyclic(values: &[f32], count: usize) -> Vec<f32> {
    if values.is_empty() {
        return vec![0.0; count];
    }
    (0..count)
        .map(|i| {
            let v = values[i % values.len()].abs();
            if v.is_finite() { v.min(1.0) } else { 0.0 }
        })
        .collect()
}

/// Noise-free activations: a cyclic copy of the values
#[derive(Debug, Clone, Copy, Default)]
pub struct DeterministicActivations;

impl ActivationSource for DeterministicActivations {
    fn activations(&mut self, values: &[f32], count: usize) -> Vec<f32> {
        cyclic(values, count)
    }
}

/// Cyclic activations with seeded noise of up to [`ACTIVATION_NOISE`]
#[derive(Debug)]
pub struct SeededActivations {
    rng: StdRng,
}

impl SeededActivations {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl ActivationSource for SeededActivations {
    fn activations(&mut self, values: &[f32], count: usize) -> Vec<f32> {
        let rng = &mut self.rng;
        cyclic(values, count)
            .into_iter()
            .map(|v| (v + rng.random::<f32>() * ACTIVATION_NOISE).min(1.0))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic_is_cyclic() {
        let out = DeterministicActivations.activations(&[0.5, -2.0, f32::NAN], 7);
        assert_eq!(out, vec![0.5, 1.0, 0.0, 0.5, 1.0, 0.0, 0.5]);
        assert_eq!(DeterministicActivations.activations(&[], 3), vec![0.0; 3]);
    }

    #[test]
    fn test_seeded_is_reproducible_and_bounded() {
        let values = [0.1, 0.9, 0.4];
        let a = SeededActivations::new(7).activations(&values, 32);
        let b = SeededActivations::new(7).activations(&values, 32);
        assert_eq!(a, b);
        let base = cyclic(&values, 32);
        for (noisy, clean) in a.iter().zip(&base) {
            assert!(*noisy >= *clean && *noisy <= 1.0);
            assert!(*noisy - *clean <= ACTIVATION_NOISE + 1e-6);
        }
    }
}
