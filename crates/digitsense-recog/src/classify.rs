//! Digit classification entry points
//!
//! Runs the full pipeline on a raw pixel buffer:
//!
//! 1. [`preprocess`](crate::preprocess::preprocess) normalizes the drawing
//! 2. [`extract_features`](crate::features::extract_features) describes it
//! 3. [`score_digits`](crate::scorer::score_digits) and
//!    [`match_templates`](crate::matcher::match_templates) score every digit
//! 4. [`combine`](crate::ensemble::combine) merges the scores into
//!    probabilities

use crate::activations::{ActivationSource, DEFAULT_ACTIVATION_COUNT, DeterministicActivations};
use crate::ensemble::{EnsembleOptions, combine};
use crate::features::{FeatureOptions, FeatureRecord, extract_features};
use crate::matcher::{MatchOptions, match_templates};
use crate::preprocess::{PreprocessOptions, preprocess};
use crate::scorer::score_digits;
use crate::{RecogError, RecogResult};
use digitsense_core::{Digit, GRID_LEN, GRID_SIZE, NUM_CLASSES, PixelGrid, ProbabilityVector};
use tracing::{debug, instrument};

/// Confidence reported for an empty drawing
pub const EMPTY_CONFIDENCE: f32 = 1.0 / NUM_CLASSES as f32;

/// Values for display only; they play no part in the decision
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AuxFeatures {
    /// Activations derived from the combined scores
    pub hidden1: Vec<f32>,
    /// Activations derived from the probabilities
    pub hidden2: Vec<f32>,
    /// First row of the normalized grid
    pub input_sample: Vec<f32>,
}

/// Outcome of classifying one drawing
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub probabilities: ProbabilityVector,
    pub predicted_digit: Digit,
    /// Probability of the predicted digit
    pub confidence: f32,
    pub features: FeatureRecord,
    pub aux: AuxFeatures,
}

/// Pipeline configuration
#[derive(Debug, Clone)]
pub struct Classifier {
    pub preprocess: PreprocessOptions,
    pub features: FeatureOptions,
    pub matching: MatchOptions,
    pub ensemble: EnsembleOptions,
    /// Activations per display layer
    pub activation_count: usize,
}

impl Default for Classifier {
    fn default() -> Self {
        Self {
            preprocess: PreprocessOptions::default(),
            features: FeatureOptions::default(),
            matching: MatchOptions::default(),
            ensemble: EnsembleOptions::default(),
            activation_count: DEFAULT_ACTIVATION_COUNT,
        }
    }
}

impl Classifier {
    /// Create a classifier with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the ensemble options
    pub fn with_ensemble(mut self, options: EnsembleOptions) -> Self {
        self.ensemble = options;
        self
    }

    /// Set the preprocessing options
    pub fn with_preprocess(mut self, options: PreprocessOptions) -> Self {
        self.preprocess = options;
        self
    }

    /// Validate every stage's options
    pub fn validate(&self) -> RecogResult<()> {
        self.preprocess.validate()?;
        self.features.validate()?;
        self.matching.validate()?;
        self.ensemble.validate()
    }

    /// Classify a row-major 28x28 pixel buffer with default display
    /// activations and no third source
    pub fn classify(&self, pixels: &[f32]) -> RecogResult<Classification> {
        self.classify_with(pixels, None, &mut DeterministicActivations)
    }

    /// Classify a row-major 28x28 pixel buffer
    ///
    /// `third` is an optional probability vector from another recognizer
    /// that joins the ensemble. `activations` only fills
    /// [`Classification::aux`].
    ///
    /// Non-finite pixels count as background and values are clamped to
    /// [0, 1]. A drawing with too little ink yields uniform probabilities.
    ///
    /// # Errors
    ///
    /// Returns [`RecogError::InvalidInput`] when `pixels` does not hold
    /// exactly 784 values, or an error for invalid options.
    #[instrument(level = "debug", skip_all)]
    pub fn classify_with(
        &self,
        pixels: &[f32],
        third: Option<&ProbabilityVector>,
        activations: &mut dyn ActivationSource,
    ) -> RecogResult<Classification> {
        if pixels.len() != GRID_LEN {
            return Err(RecogError::InvalidInput {
                expected: GRID_LEN,
                actual: pixels.len(),
            });
        }
        self.validate()?;

        let mut grid = PixelGrid::from_data(GRID_SIZE, GRID_SIZE, pixels.to_vec())?;
        grid.sanitize();
        let normalized = preprocess(&grid, &self.preprocess)?;
        let features = extract_features(&normalized, &self.features)?;
        let input_sample = normalized.row(0).to_vec();

        if features == FeatureRecord::default() {
            debug!("empty drawing");
            let probabilities = ProbabilityVector::uniform();
            return Ok(Classification {
                probabilities,
                predicted_digit: Digit::from_index(0),
                confidence: EMPTY_CONFIDENCE,
                features,
                aux: AuxFeatures {
                    hidden1: activations.activations(&[0.0; NUM_CLASSES], self.activation_count),
                    hidden2: activations
                        .activations(probabilities.values(), self.activation_count),
                    input_sample,
                },
            });
        }

        let scores = score_digits(&features);
        let matches = match_templates(&normalized, &self.matching)?;
        let result = combine(&scores, &matches, third, &self.ensemble)?;
        let (predicted_digit, confidence) = result.probabilities.argmax();
        debug!(
            digit = predicted_digit.value(),
            confidence,
            consensus = result.consensus.map(|d| d.value()),
            "classified drawing"
        );

        Ok(Classification {
            probabilities: result.probabilities,
            predicted_digit,
            confidence,
            aux: AuxFeatures {
                hidden1: activations.activations(&result.combined, self.activation_count),
                hidden2: activations
                    .activations(result.probabilities.values(), self.activation_count),
                input_sample,
            },
            features,
        })
    }
}

/// Classify a row-major 28x28 pixel buffer with default options
///
/// # Errors
///
/// Returns [`RecogError::InvalidInput`] when `pixels` does not hold
/// exactly 784 values.
pub fn classify(pixels: &[f32]) -> RecogResult<Classification> {
    Classifier::new().classify(pixels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activations::SeededActivations;

    fn bar() -> Vec<f32> {
        let mut pixels = vec![0.0; GRID_LEN];
        for y in 4..24 {
            for x in 13..15 {
                pixels[y * 28 + x] = 1.0;
            }
        }
        pixels
    }

    #[test]
    fn test_wrong_length() {
        let err = classify(&[0.0; 100]).unwrap_err();
        assert!(matches!(
            err,
            RecogError::InvalidInput {
                expected: 784,
                actual: 100
            }
        ));
    }

    #[test]
    fn test_empty_is_uniform() {
        let result = classify(&[0.0; GRID_LEN]).unwrap();
        assert_eq!(result.predicted_digit, Digit::from_index(0));
        assert!((result.confidence - 0.1).abs() < 1e-6);
        assert!(result.probabilities.values().iter().all(|&p| (p - 0.1).abs() < 1e-6));
        assert_eq!(result.aux.input_sample.len(), 28);
        assert_eq!(result.aux.hidden1.len(), DEFAULT_ACTIVATION_COUNT);
    }

    #[test]
    fn test_garbage_values_are_sanitized() {
        let mut pixels = bar();
        pixels[0] = f32::NAN;
        pixels[1] = f32::INFINITY;
        pixels[2] = -3.0;
        let result = classify(&pixels).unwrap();
        assert!((result.probabilities.sum() - 1.0).abs() < 1e-5);
        assert!(result.probabilities.values().iter().all(|&p| (0.0..=1.0).contains(&p)));
    }

    #[test]
    fn test_activations_do_not_change_decision() {
        let pixels = bar();
        let classifier = Classifier::new();
        let plain = classifier.classify(&pixels).unwrap();
        let noisy = classifier
            .classify_with(&pixels, None, &mut SeededActivations::new(11))
            .unwrap();
        assert_eq!(plain.predicted_digit, noisy.predicted_digit);
        assert_eq!(plain.probabilities, noisy.probabilities);
        assert_eq!(plain.predicted_digit, Digit::from_index(1));
    }
}
