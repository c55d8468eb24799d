//! Rule-based per-digit scoring
//!
//! Every digit has one rule function that adds and subtracts fixed
//! contributions for the features it expects or rules out. The raw scores
//! then pass through a disambiguation stage for pairs of digits that share
//! most of their structure (0 and 8, 6 and 9, ...): a single telling
//! feature picks the favoured digit and the other one is capped below it.
//!
//! Both stages are pure: they read only the [`FeatureRecord`] and return a
//! fresh [`ScoreVector`].

use crate::features::FeatureRecord;
use digitsense_core::{Digit, NUM_CLASSES, ScoreVector};
use tracing::trace;

/// Contribution of a defining feature
pub const W_STRONG: f32 = 0.4;

/// Contribution of a typical feature
pub const W_MEDIUM: f32 = 0.25;

/// Contribution of a supporting feature
pub const W_WEAK: f32 = 0.1;

/// Contribution of two holes to digit 8
pub const W_TWO_HOLES: f32 = 0.6;

/// Highest score a disambiguated loser keeps, relative to the winner
pub const CONFUSION_CAP: f32 = 0.85;

/// Hole position past which the hole sits in the lower part of the ink (6, 8)
pub const HOLE_LOW: f32 = 0.58;

/// Hole position short of which the hole sits in the upper part of the ink (9)
pub const HOLE_HIGH: f32 = 0.42;

/// Add `weight` when `cond` holds
#[inline]
fn when(cond: bool, weight: f32) -> f32 {
    if cond { weight } else { 0.0 }
}

/// Activity of one ink zone, `row` and `col` in 0..3
#[inline]
fn zone(f: &FeatureRecord, row: usize, col: usize) -> f32 {
    f.zones[row][col]
}

fn hole_low(f: &FeatureRecord) -> bool {
    f.holes >= 1 && f.hole_position > HOLE_LOW
}

fn hole_high(f: &FeatureRecord) -> bool {
    f.holes >= 1 && f.hole_position < HOLE_HIGH
}

/// The middle of the ink box is mostly background
fn hollow_middle(f: &FeatureRecord) -> bool {
    zone(f, 1, 1) < 0.3
}

/// Ring around an empty middle; a gap at the top still counts
pub fn score_zero(f: &FeatureRecord) -> f32 {
    when(hollow_middle(f), W_STRONG) + when(zone(f, 1, 0) > 0.5, W_STRONG)
        + when(f.holes == 0, W_WEAK)
        + when(f.endpoints == 0, W_WEAK)
        - when(f.endpoints == 2, W_MEDIUM)
        + when(f.center_density < 0.3, W_WEAK)
        + when(f.horizontal_lines == 0, W_MEDIUM)
        + when(f.horizontal_lines >= 2, W_WEAK)
}

/// Narrow upright stroke with empty corners
pub fn score_one(f: &FeatureRecord) -> f32 {
    when(f.aspect_ratio < 0.45, W_STRONG) + when(f.aspect_ratio < 0.65, W_MEDIUM)
        - when(f.closed_loop, W_STRONG)
        - when(f.has_hook, W_STRONG)
        - when(f.heavy_top, W_MEDIUM)
        + when(f.symmetry > 0.6, W_MEDIUM)
        + when(zone(f, 0, 1) < 0.5, W_MEDIUM)
        + when(zone(f, 0, 2) < 0.4, W_STRONG)
        + when(zone(f, 1, 0) < 0.25, W_STRONG)
        + when(zone(f, 2, 0) > 0.5, W_MEDIUM)
        + when(zone(f, 2, 2) < 0.25, W_STRONG)
}

/// Hooked top, diagonal, bar along the bottom
pub fn score_two(f: &FeatureRecord) -> f32 {
    when(f.has_hook, W_STRONG) + when(f.holes == 0, W_MEDIUM)
        + when(f.aspect_ratio < 0.65, W_MEDIUM)
        + when(f.diagonals > 0, W_MEDIUM)
        - when(f.heavy_top, W_STRONG)
        + when(f.heavy_bottom, W_STRONG)
        - when(f.heavy_right, W_STRONG)
        + when(hollow_middle(f), W_MEDIUM)
        + when(zone(f, 1, 0) < 0.25, W_STRONG)
        - when(zone(f, 1, 0) > 0.5, W_STRONG)
        - when(zone(f, 1, 2) > 0.5, W_STRONG)
        + when(zone(f, 2, 1) > 0.6, W_STRONG)
        - when(zone(f, 2, 2) > 0.5, W_STRONG)
}

/// Two right-hand bows meeting in the middle
pub fn score_three(f: &FeatureRecord) -> f32 {
    when(f.holes == 0, W_STRONG) - when(f.closed_loop, W_STRONG)
        + when(f.crossings > 0, W_STRONG)
        + when(f.heavy_right, W_MEDIUM)
        - when(hollow_middle(f), W_STRONG)
        - when(zone(f, 1, 0) > 0.5, W_MEDIUM)
        + when(zone(f, 1, 2) > 0.5, W_MEDIUM)
        - when(zone(f, 2, 0) < 0.25, W_MEDIUM)
}

/// Crossbar meeting a right stem; a closed top leaves a centered hole
pub fn score_four(f: &FeatureRecord) -> f32 {
    when(f.crossings > 0, W_STRONG) + when(f.center_density > 0.7, W_STRONG)
        - when(f.has_hook, W_MEDIUM)
        - when(hole_low(f), W_STRONG)
        - when(hole_high(f), W_STRONG)
        + when(f.heavy_right, W_MEDIUM)
        - when(f.horizontal_lines >= 2, W_MEDIUM)
        - when(zone(f, 0, 0) > 0.6, W_WEAK)
        - when(zone(f, 1, 0) < 0.25, W_STRONG)
        + when(zone(f, 1, 2) > 0.5, W_STRONG)
        + when(zone(f, 2, 0) < 0.25, W_MEDIUM)
}

/// Flag at the top left over a bowl; a closed bowl is common
pub fn score_five(f: &FeatureRecord) -> f32 {
    when(f.holes == 0, W_MEDIUM) + when(f.holes == 1, W_STRONG)
        - when(f.has_hook, W_MEDIUM)
        + when(f.endpoints >= 2, W_MEDIUM)
        + when(f.heavy_top, W_STRONG)
        - when(f.strong_vertical_lines > 0, W_MEDIUM)
        + when(zone(f, 0, 0) > 0.6, W_MEDIUM)
        - when(zone(f, 1, 0) < 0.25, W_STRONG)
}

/// Low hole under a left-hand stem
pub fn score_six(f: &FeatureRecord) -> f32 {
    when(hole_low(f), W_STRONG) + when(f.holes == 1, W_WEAK)
        + when(f.endpoints == 1, W_MEDIUM)
        - when(f.crossings >= 2, W_STRONG)
        + when(f.aspect_ratio < 0.45, W_STRONG)
        + when(f.heavy_bottom, W_STRONG)
        - when(f.heavy_right, W_MEDIUM)
        - when(hollow_middle(f), W_STRONG)
        - when(zone(f, 0, 0) > 0.6, W_MEDIUM)
        + when(zone(f, 0, 2) < 0.4, W_STRONG)
        + when(zone(f, 1, 0) > 0.5, W_STRONG)
        + when(zone(f, 1, 2) < 0.3, W_WEAK)
        + when(zone(f, 2, 2) < 0.25, W_MEDIUM)
}

/// Top bar ending in a stroke down to the bottom left
pub fn score_seven(f: &FeatureRecord) -> f32 {
    when(f.heavy_top, W_MEDIUM) - when(f.closed_loop, W_STRONG)
        + when(zone(f, 0, 2) > 0.6, W_STRONG)
        + when(zone(f, 1, 0) < 0.25, W_STRONG)
        - when(zone(f, 1, 0) > 0.5, W_STRONG)
        + when(zone(f, 2, 2) < 0.25, W_STRONG)
        - when(zone(f, 2, 2) > 0.5, W_STRONG)
}

/// Two stacked loops with a filled waist
pub fn score_eight(f: &FeatureRecord) -> f32 {
    when(f.holes >= 2, W_TWO_HOLES) + when(f.closed_loop, W_MEDIUM)
        + when(hole_low(f), W_STRONG)
        + when(hole_high(f), W_MEDIUM)
        + when(f.endpoints == 0, W_MEDIUM)
        + when(f.aspect_ratio < 0.65, W_STRONG)
        + when(f.center_density > 0.7, W_MEDIUM)
        - when(hollow_middle(f), W_STRONG)
        + when(zone(f, 1, 0) > 0.5, W_MEDIUM)
        - when(zone(f, 1, 2) < 0.3, W_STRONG)
}

/// High hole over a right-hand stem
pub fn score_nine(f: &FeatureRecord) -> f32 {
    when(hole_high(f), W_STRONG) + when(f.holes == 1, W_STRONG)
        + when(f.holes == 0, W_MEDIUM)
        - when(f.closed_loop, W_MEDIUM)
        + when(f.endpoints == 1, W_STRONG)
        + when(f.heavy_top, W_STRONG)
        - when(hollow_middle(f), W_STRONG)
        - when(zone(f, 2, 0) > 0.5, W_STRONG)
        + when(zone(f, 2, 2) < 0.25, W_MEDIUM)
}

/// Rule function of each digit, indexed by class
pub const RULES: [fn(&FeatureRecord) -> f32; NUM_CLASSES] = [
    score_zero,
    score_one,
    score_two,
    score_three,
    score_four,
    score_five,
    score_six,
    score_seven,
    score_eight,
    score_nine,
];

/// Two digits that the rules alone often confuse
///
/// `decide` returns the digit the record favours, or `None` when the
/// telling feature is inconclusive.
#[derive(Clone, Copy)]
pub struct ConfusablePair {
    pub a: Digit,
    pub b: Digit,
    pub decide: fn(&FeatureRecord) -> Option<Digit>,
}

impl std::fmt::Debug for ConfusablePair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ConfusablePair({}, {})", self.a, self.b)
    }
}

const fn d(index: u8) -> Digit {
    Digit::ALL[index as usize]
}

/// Pairs checked by [`disambiguate`], in order
pub const CONFUSABLE_PAIRS: [ConfusablePair; 7] = [
    ConfusablePair {
        a: d(0),
        b: d(8),
        decide: |f| {
            if f.holes >= 2 {
                Some(d(8))
            } else if f.holes == 1 && hollow_middle(f) {
                Some(d(0))
            } else {
                None
            }
        },
    },
    ConfusablePair {
        a: d(6),
        b: d(9),
        decide: |f| {
            if hole_low(f) {
                Some(d(6))
            } else if hole_high(f) {
                Some(d(9))
            } else {
                None
            }
        },
    },
    ConfusablePair {
        a: d(1),
        b: d(4),
        // A 1 has neither a crossbar nor a junction
        decide: |f| (f.horizontal_lines > 0 || f.crossings > 0).then_some(d(4)),
    },
    ConfusablePair {
        a: d(1),
        b: d(7),
        decide: |f| {
            if f.has_hook {
                Some(d(7))
            } else if f.aspect_ratio < 0.45 {
                Some(d(1))
            } else {
                None
            }
        },
    },
    ConfusablePair {
        a: d(2),
        b: d(3),
        decide: |f| {
            if zone(f, 2, 0) > 0.5 && zone(f, 1, 2) < 0.5 {
                Some(d(2))
            } else if zone(f, 2, 0) < 0.25 && f.heavy_right {
                Some(d(3))
            } else {
                None
            }
        },
    },
    ConfusablePair {
        a: d(2),
        b: d(5),
        decide: |f| {
            if f.has_hook && zone(f, 1, 0) < 0.25 {
                Some(d(2))
            } else if !f.has_hook && zone(f, 1, 0) > 0.5 && zone(f, 0, 0) > 0.6 {
                Some(d(5))
            } else {
                None
            }
        },
    },
    ConfusablePair {
        a: d(3),
        b: d(5),
        decide: |f| {
            if !f.has_hook && zone(f, 1, 0) > 0.5 {
                Some(d(5))
            } else if f.has_hook && zone(f, 1, 0) < 0.25 {
                Some(d(3))
            } else {
                None
            }
        },
    },
];

/// Raw rule scores of every digit
pub fn rule_scores(record: &FeatureRecord) -> ScoreVector {
    ScoreVector::new(RULES.map(|rule| rule(record)))
}

/// Cap the loser of every decided confusable pair
///
/// The favoured digit must have a positive score; the other digit is then
/// limited to [`CONFUSION_CAP`] times that score.
pub fn disambiguate(mut scores: ScoreVector, record: &FeatureRecord) -> ScoreVector {
    for pair in &CONFUSABLE_PAIRS {
        let Some(winner) = (pair.decide)(record) else {
            continue;
        };
        let loser = if winner == pair.a { pair.b } else { pair.a };
        let top = scores.get(winner);
        if top > 0.0 && scores.get(loser) > CONFUSION_CAP * top {
            trace!(winner = winner.value(), loser = loser.value(), "capping confusable digit");
            scores.set(loser, CONFUSION_CAP * top);
        }
    }
    scores
}

/// Score every digit from its features
///
/// Runs the rules, disambiguates and normalizes by the maximum, so the
/// best digit scores 1 and no score is negative.
pub fn score_digits(record: &FeatureRecord) -> ScoreVector {
    disambiguate(rule_scores(record), record).normalized_by_max()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Features of a clean ring
    fn ring_record() -> FeatureRecord {
        FeatureRecord {
            holes: 1,
            aspect_ratio: 1.0,
            zones: [[0.72, 0.71, 0.76], [1.0, 0.14, 1.0], [0.76, 0.63, 0.8]],
            symmetry: 1.0,
            center_density: 0.4,
            horizontal_lines: 2,
            vertical_lines: 2,
            strong_horizontal_lines: 2,
            strong_vertical_lines: 2,
            has_hook: true,
            closed_loop: true,
            hole_position: 0.5,
            ..Default::default()
        }
    }

    #[test]
    fn test_ring_scores_zero() {
        let scores = score_digits(&ring_record());
        assert_eq!(scores.argmax().0, d(0));
        assert_eq!(scores.max(), 1.0);
        assert!(scores.values().iter().all(|&v| v >= 0.0));
    }

    #[test]
    fn test_two_holes_scores_eight() {
        let record = FeatureRecord {
            holes: 2,
            crossings: 2,
            aspect_ratio: 1.0,
            zones: [[0.72, 0.71, 0.76], [0.86, 0.63, 0.88], [0.76, 0.63, 0.8]],
            symmetry: 1.0,
            center_density: 0.64,
            horizontal_lines: 3,
            vertical_lines: 2,
            has_hook: true,
            closed_loop: true,
            hole_position: 0.7,
            ..Default::default()
        };
        assert_eq!(score_digits(&record).argmax().0, d(8));
    }

    #[test]
    fn test_upright_stroke_scores_one() {
        let record = FeatureRecord {
            endpoints: 2,
            aspect_ratio: 0.5,
            zones: [[0.67, 1.0, 0.46], [0.38, 1.0, 0.5], [0.71, 1.0, 0.79]],
            symmetry: 0.89,
            center_density: 0.63,
            vertical_lines: 1,
            strong_vertical_lines: 1,
            hole_position: 0.5,
            ..Default::default()
        };
        assert_eq!(score_digits(&record).argmax().0, d(1));
    }

    #[test]
    fn test_closed_four_is_not_zero() {
        // One centered hole, but the junction and filled middle mean 4
        let record = FeatureRecord {
            holes: 1,
            endpoints: 1,
            crossings: 1,
            aspect_ratio: 0.9,
            zones: [[0.08, 0.83, 0.75], [0.86, 0.81, 0.88], [0.24, 0.45, 0.81]],
            heavy_right: true,
            symmetry: 0.53,
            center_density: 0.92,
            horizontal_lines: 2,
            vertical_lines: 2,
            strong_vertical_lines: 1,
            diagonals: 4,
            closed_loop: true,
            hole_position: 0.46,
            ..Default::default()
        };
        let scores = score_digits(&record);
        assert_eq!(scores.argmax().0, d(4));
        assert!(scores.get(d(0)) < 0.5);
    }

    #[test]
    fn test_crossing_caps_one_below_four() {
        let record = FeatureRecord {
            crossings: 1,
            horizontal_lines: 1,
            vertical_lines: 1,
            ..Default::default()
        };
        let raw = ScoreVector::new([0.0, 0.9, 0.0, 0.0, 0.5, 0.0, 0.0, 0.0, 0.0, 0.0]);
        let capped = disambiguate(raw, &record);
        assert!((capped.get(d(1)) - 0.5 * CONFUSION_CAP).abs() < 1e-6);
        assert_eq!(capped.get(d(4)), 0.5);
    }

    #[test]
    fn test_hole_position_separates_six_and_nine() {
        let six = FeatureRecord {
            holes: 1,
            endpoints: 1,
            crossings: 1,
            aspect_ratio: 1.0,
            zones: [[0.72, 0.71, 0.33], [1.0, 0.63, 0.51], [0.76, 0.63, 0.8]],
            heavy_bottom: true,
            heavy_left: true,
            symmetry: 0.73,
            center_density: 0.58,
            horizontal_lines: 3,
            vertical_lines: 1,
            closed_loop: true,
            hole_position: 0.7,
            ..Default::default()
        };
        assert_eq!(score_digits(&six).argmax().0, d(6));

        let nine = FeatureRecord {
            zones: [[0.72, 0.71, 0.76], [0.62, 0.63, 1.0], [0.24, 0.69, 0.43]],
            heavy_top: true,
            heavy_bottom: false,
            heavy_left: false,
            heavy_right: true,
            symmetry: 0.69,
            center_density: 0.62,
            diagonals: 1,
            has_hook: true,
            hole_position: 0.3,
            ..six
        };
        assert_eq!(score_digits(&nine).argmax().0, d(9));
    }

    #[test]
    fn test_non_positive_winner_does_not_cap() {
        let raw = ScoreVector::new([-0.2, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.3, 0.0]);
        let out = disambiguate(raw, &ring_record());
        assert_eq!(out.get(d(8)), 0.3);
    }
}
