//! Digit classes, raw score vectors and probability vectors

use crate::error::{Error, Result};
use std::fmt;

/// Number of digit classes
pub const NUM_CLASSES: usize = 10;

/// Smallest denominator used by ratio computations
pub const EPSILON: f32 = 1e-6;

/// A digit class in `0..=9`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Digit(u8);

impl Digit {
    /// All ten classes in ascending order
    pub const ALL: [Digit; NUM_CLASSES] = [
        Digit(0),
        Digit(1),
        Digit(2),
        Digit(3),
        Digit(4),
        Digit(5),
        Digit(6),
        Digit(7),
        Digit(8),
        Digit(9),
    ];

    /// Validate a class index
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDigit` if `index > 9`.
    pub fn new(index: usize) -> Result<Self> {
        if index >= NUM_CLASSES {
            return Err(Error::InvalidDigit(index));
        }
        Ok(Digit(index as u8))
    }

    /// Convert an index known to be valid
    ///
    /// # Panics
    ///
    /// Panics if `index > 9`. An out-of-range class here is a programming
    /// error in a fixed catalog, not a recoverable condition.
    pub fn from_index(index: usize) -> Self {
        assert!(index < NUM_CLASSES, "digit class {index} out of range");
        Digit(index as u8)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn value(self) -> u8 {
        self.0
    }

    /// One-hot encoding of this class
    pub fn one_hot(self) -> [f32; NUM_CLASSES] {
        let mut v = [0.0; NUM_CLASSES];
        v[self.index()] = 1.0;
        v
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Index and value of the largest entry; ties resolve to the lowest index
fn argmax(values: &[f32; NUM_CLASSES]) -> (Digit, f32) {
    let mut best = 0;
    for i in 1..NUM_CLASSES {
        if values[i] > values[best] {
            best = i;
        }
    }
    (Digit::from_index(best), values[best])
}

/// Ten raw scores, one per class
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScoreVector([f32; NUM_CLASSES]);

impl ScoreVector {
    pub fn new(values: [f32; NUM_CLASSES]) -> Self {
        ScoreVector(values)
    }

    pub fn zeros() -> Self {
        ScoreVector([0.0; NUM_CLASSES])
    }

    #[inline]
    pub fn get(&self, digit: Digit) -> f32 {
        self.0[digit.index()]
    }

    #[inline]
    pub fn set(&mut self, digit: Digit, value: f32) {
        self.0[digit.index()] = value;
    }

    #[inline]
    pub fn values(&self) -> &[f32; NUM_CLASSES] {
        &self.0
    }

    /// Class with the highest score and that score
    pub fn argmax(&self) -> (Digit, f32) {
        argmax(&self.0)
    }

    pub fn max(&self) -> f32 {
        self.argmax().1
    }

    /// Divide by the maximum and floor at zero
    ///
    /// A vector whose maximum is not positive becomes all zeros.
    pub fn normalized_by_max(&self) -> ScoreVector {
        let max = self.max();
        if max <= EPSILON {
            return ScoreVector::zeros();
        }
        ScoreVector(self.0.map(|v| (v / max).max(0.0)))
    }
}

/// A discrete distribution over the ten classes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbabilityVector([f32; NUM_CLASSES]);

impl ProbabilityVector {
    /// Uniform distribution (0.1 per class)
    pub fn uniform() -> Self {
        ProbabilityVector([1.0 / NUM_CLASSES as f32; NUM_CLASSES])
    }

    /// Normalize non-negative weights into a distribution
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidParameter` if any weight is negative or
    /// non-finite, or if all weights are zero.
    pub fn from_weights(weights: [f32; NUM_CLASSES]) -> Result<Self> {
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(Error::InvalidParameter(
                "probability weights must be finite and non-negative".to_string(),
            ));
        }
        let sum: f32 = weights.iter().sum();
        if sum <= EPSILON {
            return Err(Error::InvalidParameter(
                "probability weights sum to zero".to_string(),
            ));
        }
        Ok(ProbabilityVector(weights.map(|w| w / sum)))
    }

    /// Temperature-scaled softmax
    ///
    /// `p_i = exp(t * (v_i - max)) / sum_j exp(t * (v_j - max))`; larger
    /// temperatures sharpen the distribution. Non-finite inputs are treated
    /// as the minimum score.
    pub fn softmax(values: &[f32; NUM_CLASSES], temperature: f32) -> Self {
        let finite_max = values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(f32::NEG_INFINITY, f32::max);
        if !finite_max.is_finite() {
            return Self::uniform();
        }
        let exps = values.map(|v| {
            if v.is_finite() {
                ((v - finite_max) * temperature).exp()
            } else {
                0.0
            }
        });
        let sum: f32 = exps.iter().sum();
        ProbabilityVector(exps.map(|e| e / sum))
    }

    #[inline]
    pub fn get(&self, digit: Digit) -> f32 {
        self.0[digit.index()]
    }

    #[inline]
    pub fn values(&self) -> &[f32; NUM_CLASSES] {
        &self.0
    }

    /// Most probable class and its probability
    pub fn argmax(&self) -> (Digit, f32) {
        argmax(&self.0)
    }

    pub fn sum(&self) -> f32 {
        self.0.iter().sum()
    }
}

impl Default for ProbabilityVector {
    fn default() -> Self {
        Self::uniform()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_bounds() {
        assert!(Digit::new(9).is_ok());
        assert!(Digit::new(10).is_err());
        assert_eq!(Digit::from_index(3).value(), 3);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_digit_from_index_panics() {
        let _ = Digit::from_index(10);
    }

    #[test]
    fn test_one_hot() {
        let v = Digit::from_index(4).one_hot();
        assert_eq!(v.iter().sum::<f32>(), 1.0);
        assert_eq!(v[4], 1.0);
    }

    #[test]
    fn test_normalized_by_max_floors_negative() {
        let mut raw = [0.0; NUM_CLASSES];
        raw[2] = 2.0;
        raw[5] = 1.0;
        raw[7] = -0.5;
        let n = ScoreVector::new(raw).normalized_by_max();
        assert_eq!(n.values()[2], 1.0);
        assert_eq!(n.values()[5], 0.5);
        assert_eq!(n.values()[7], 0.0);
        assert_eq!(ScoreVector::zeros().normalized_by_max(), ScoreVector::zeros());
    }

    #[test]
    fn test_softmax_is_distribution() {
        let values = [0.1, 0.9, 0.3, 0.0, 0.5, 0.2, 0.2, 0.8, 0.4, 0.6];
        let p = ProbabilityVector::softmax(&values, 7.0);
        assert!((p.sum() - 1.0).abs() < 1e-6);
        assert!(p.values().iter().all(|&v| (0.0..=1.0).contains(&v)));
        assert_eq!(p.argmax().0, Digit::from_index(1));
    }

    #[test]
    fn test_softmax_equal_values_uniform() {
        let p = ProbabilityVector::softmax(&[0.0; NUM_CLASSES], 7.0);
        for v in p.values() {
            assert!((v - 0.1).abs() < 1e-6);
        }
    }

    #[test]
    fn test_argmax_ties_pick_lowest() {
        let s = ScoreVector::new([0.5, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(s.argmax(), (Digit::from_index(1), 1.0));
    }
}
