//! Combining the scorer, the matcher and an optional third source
//!
//! Each source casts a vote for its best digit when it is confident
//! enough. Digits backed by two or more sources receive a consensus bonus
//! on top of the weighted sum, and a temperature-scaled softmax turns the
//! combined scores into probabilities.

use crate::{RecogError, RecogResult};
use digitsense_core::{Digit, NUM_CLASSES, ProbabilityVector, ScoreVector};
use tracing::debug;

/// Fraction of the attainable maximum a source needs to vote
pub const DEFAULT_VOTE_FRACTION: f32 = 0.65;

/// Bonus shared by agreeing voters
pub const DEFAULT_CONSENSUS_WEIGHT: f32 = 0.15;

/// Weight of the heuristic scorer
pub const DEFAULT_SCORER_WEIGHT: f32 = 0.72;

/// Weight of the template matcher
pub const DEFAULT_MATCHER_WEIGHT: f32 = 0.20;

/// Weight of the third source
pub const DEFAULT_THIRD_WEIGHT: f32 = 0.08;

/// Softmax temperature
pub const DEFAULT_TEMPERATURE: f32 = 7.0;

/// Options for [`combine`]
#[derive(Debug, Clone)]
pub struct EnsembleOptions {
    /// Vote fraction (default: 0.65)
    pub vote_fraction: f32,
    /// Consensus bonus weight (default: 0.15)
    pub consensus_weight: f32,
    /// Scorer weight (default: 0.72)
    pub scorer_weight: f32,
    /// Matcher weight (default: 0.20)
    pub matcher_weight: f32,
    /// Third source weight (default: 0.08)
    pub third_weight: f32,
    /// Softmax temperature (default: 7.0)
    pub temperature: f32,
}

impl Default for EnsembleOptions {
    fn default() -> Self {
        Self {
            vote_fraction: DEFAULT_VOTE_FRACTION,
            consensus_weight: DEFAULT_CONSENSUS_WEIGHT,
            scorer_weight: DEFAULT_SCORER_WEIGHT,
            matcher_weight: DEFAULT_MATCHER_WEIGHT,
            third_weight: DEFAULT_THIRD_WEIGHT,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl EnsembleOptions {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the source weights
    pub fn with_weights(mut self, scorer: f32, matcher: f32, third: f32) -> Self {
        self.scorer_weight = scorer;
        self.matcher_weight = matcher;
        self.third_weight = third;
        self
    }

    /// Set the softmax temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the vote fraction
    pub fn with_vote_fraction(mut self, fraction: f32) -> Self {
        self.vote_fraction = fraction;
        self
    }

    /// Validate options
    pub fn validate(&self) -> RecogResult<()> {
        if !(0.0..=1.0).contains(&self.vote_fraction) {
            return Err(RecogError::InvalidParameter(format!(
                "vote_fraction must be in [0, 1], got {}",
                self.vote_fraction
            )));
        }
        let weights = [
            self.consensus_weight,
            self.scorer_weight,
            self.matcher_weight,
            self.third_weight,
        ];
        if weights.iter().any(|w| !(*w >= 0.0)) {
            return Err(RecogError::InvalidParameter(
                "ensemble weights must not be negative".to_string(),
            ));
        }
        if !(self.temperature > 0.0) {
            return Err(RecogError::InvalidParameter(
                "temperature must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Result of combining the sources
#[derive(Debug, Clone, PartialEq)]
pub struct EnsembleResult {
    /// Weighted sum plus consensus bonus, before the softmax
    pub combined: [f32; NUM_CLASSES],
    pub probabilities: ProbabilityVector,
    /// Digit that received the consensus bonus, if any
    pub consensus: Option<Digit>,
    /// Bonus added to the consensus digit
    pub bonus: f32,
}

/// Digit a source votes for, if its best score clears `fraction`
///
/// Scores are on a scale whose attainable maximum is 1.
fn vote(best: (Digit, f32), fraction: f32) -> Option<Digit> {
    let (digit, score) = best;
    (score >= fraction).then_some(digit)
}

/// Consensus digit and its bonus
///
/// `votes` has one entry per present source.
pub fn consensus_bonus(votes: &[Option<Digit>], weight: f32) -> Option<(Digit, f32)> {
    let present = votes.len();
    let mut counts = [0usize; NUM_CLASSES];
    for digit in votes.iter().flatten() {
        counts[digit.index()] += 1;
    }
    let (index, &voters) = counts
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(&a.0)))?;
    if voters < 2 || present == 0 {
        return None;
    }
    Some((Digit::from_index(index), weight * voters as f32 / present as f32))
}

/// Combine the scorer, the matcher and an optional third source
///
/// # Errors
///
/// Returns an error for invalid options.
pub fn combine(
    scorer: &ScoreVector,
    matcher: &ScoreVector,
    third: Option<&ProbabilityVector>,
    options: &EnsembleOptions,
) -> RecogResult<EnsembleResult> {
    options.validate()?;

    let mut votes = vec![
        vote(scorer.argmax(), options.vote_fraction),
        vote(matcher.argmax(), options.vote_fraction),
    ];
    if let Some(third) = third {
        votes.push(vote(third.argmax(), options.vote_fraction));
    }

    let mut combined = [0.0f32; NUM_CLASSES];
    for (i, value) in combined.iter_mut().enumerate() {
        *value = options.scorer_weight * scorer.values()[i]
            + options.matcher_weight * matcher.values()[i]
            + third.map_or(0.0, |t| options.third_weight * t.values()[i]);
    }

    let consensus = consensus_bonus(&votes, options.consensus_weight);
    if let Some((digit, bonus)) = consensus {
        combined[digit.index()] += bonus;
    }

    let probabilities = ProbabilityVector::softmax(&combined, options.temperature);
    debug!(
        sources = votes.len(),
        consensus = consensus.map(|(d, _)| d.value()),
        "combined sources"
    );
    Ok(EnsembleResult {
        combined,
        probabilities,
        consensus: consensus.map(|(d, _)| d),
        bonus: consensus.map_or(0.0, |(_, b)| b),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn peaked(digit: usize, peak: f32, rest: f32) -> ScoreVector {
        let mut values = [rest; NUM_CLASSES];
        values[digit] = peak;
        ScoreVector::new(values)
    }

    #[test]
    fn test_agreement_gets_bonus() {
        let scorer = peaked(3, 0.9, 0.2);
        let matcher = peaked(3, 0.8, 0.5);
        let result = combine(&scorer, &matcher, None, &EnsembleOptions::default()).unwrap();
        assert_eq!(result.consensus, Some(Digit::from_index(3)));
        assert!((result.bonus - 0.15).abs() < 1e-6);
        assert_eq!(result.probabilities.argmax().0, Digit::from_index(3));
        assert!((result.probabilities.sum() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_third_source_dilutes_bonus() {
        let scorer = peaked(7, 0.9, 0.1);
        let matcher = peaked(7, 0.9, 0.1);
        let third = ProbabilityVector::uniform();
        let result =
            combine(&scorer, &matcher, Some(&third), &EnsembleOptions::default()).unwrap();
        assert!((result.bonus - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_weak_sources_do_not_vote() {
        let scorer = peaked(2, 0.6, 0.1);
        let matcher = peaked(2, 0.6, 0.1);
        let result = combine(&scorer, &matcher, None, &EnsembleOptions::default()).unwrap();
        assert_eq!(result.consensus, None);
        assert_eq!(result.bonus, 0.0);

        let disagree = combine(
            &peaked(2, 0.9, 0.1),
            &peaked(5, 0.9, 0.1),
            None,
            &EnsembleOptions::default(),
        )
        .unwrap();
        assert_eq!(disagree.consensus, None);
        assert_eq!(disagree.probabilities.argmax().0, Digit::from_index(2));
    }

    #[test]
    fn test_invalid_options() {
        let options = EnsembleOptions::default().with_temperature(0.0);
        let s = ScoreVector::zeros();
        assert!(combine(&s, &s, None, &options).is_err());
    }
}
