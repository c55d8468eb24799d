//! Low-resolution template matching
//!
//! The normalized drawing is reduced to a small binary grid and compared
//! cell by cell against every catalog variant, fitted to the same size.
//! Cells on the outer ring and in the central 3x3 block decide most
//! digits, so agreement there weighs more.
//!
//! Each variant is tried at every shift within the shift radius; shifted
//! placements are slightly discounted. A second, fuzzy comparison ignores
//! disagreements outside the critical cells, which helps thin or sloppy
//! strokes.

use crate::preprocess::DEFAULT_PADDING;
use crate::{RecogError, RecogResult};
use digitsense_core::{BinaryGrid, Digit, GridBox, PixelGrid, ScoreVector, catalog};
use digitsense_transform::{crop, downsample_gaussian, fit_binary};
use std::sync::LazyLock;
use tracing::{debug, instrument};

/// Side of the comparison grid
pub const DEFAULT_MATCH_SIZE: u32 = 7;

/// Threshold applied after downsampling
pub const DEFAULT_MATCH_THRESHOLD: f32 = 0.3;

/// Weight of a critical cell
pub const DEFAULT_CRITICAL_WEIGHT: f32 = 1.5;

/// Cost of a disagreement relative to the cell weight
pub const DEFAULT_MISMATCH_PENALTY: f32 = 0.5;

/// Largest shift tried in each direction
pub const DEFAULT_SHIFT_RADIUS: i32 = 1;

/// Factor applied to shifted placements
pub const DEFAULT_SHIFT_DISCOUNT: f32 = 0.95;

/// Factor applied to the fuzzy score
pub const DEFAULT_FUZZY_DISCOUNT: f32 = 0.9;

/// Catalog variants fitted to the default comparison size
static FITTED_TEMPLATES: LazyLock<Vec<(Digit, BinaryGrid)>> = LazyLock::new(|| {
    fit_catalog(DEFAULT_MATCH_SIZE).expect("catalog templates fit the comparison grid")
});

fn fit_catalog(size: u32) -> RecogResult<Vec<(Digit, BinaryGrid)>> {
    catalog()
        .iter()
        .map(|template| -> RecogResult<(Digit, BinaryGrid)> {
            Ok((template.digit(), fit_binary(template.bitmap(), size)?))
        })
        .collect()
}

/// Options for [`match_templates`]
#[derive(Debug, Clone)]
pub struct MatchOptions {
    /// Comparison grid side (default: 7)
    pub size: u32,
    /// Border of the normalized grid skipped before downsampling (default: 4)
    pub padding: u32,
    /// Binary threshold after downsampling (default: 0.3)
    pub threshold: f32,
    /// Critical cell weight (default: 1.5)
    pub critical_weight: f32,
    /// Mismatch penalty (default: 0.5)
    pub mismatch_penalty: f32,
    /// Shift radius (default: 1)
    pub shift_radius: i32,
    /// Shifted placement discount (default: 0.95)
    pub shift_discount: f32,
    /// Fuzzy score discount (default: 0.9)
    pub fuzzy_discount: f32,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            size: DEFAULT_MATCH_SIZE,
            padding: DEFAULT_PADDING,
            threshold: DEFAULT_MATCH_THRESHOLD,
            critical_weight: DEFAULT_CRITICAL_WEIGHT,
            mismatch_penalty: DEFAULT_MISMATCH_PENALTY,
            shift_radius: DEFAULT_SHIFT_RADIUS,
            shift_discount: DEFAULT_SHIFT_DISCOUNT,
            fuzzy_discount: DEFAULT_FUZZY_DISCOUNT,
        }
    }
}

impl MatchOptions {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the comparison grid side
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    /// Set the shift radius
    pub fn with_shift_radius(mut self, radius: i32) -> Self {
        self.shift_radius = radius;
        self
    }

    /// Set the critical cell weight
    pub fn with_critical_weight(mut self, weight: f32) -> Self {
        self.critical_weight = weight;
        self
    }

    /// Validate options
    pub fn validate(&self) -> RecogResult<()> {
        if self.size < 3 {
            return Err(RecogError::InvalidParameter(format!(
                "match size must be at least 3, got {}",
                self.size
            )));
        }
        if self.shift_radius < 0 {
            return Err(RecogError::InvalidParameter(
                "shift_radius must not be negative".to_string(),
            ));
        }
        if !(self.critical_weight > 0.0) || !(self.mismatch_penalty >= 0.0) {
            return Err(RecogError::InvalidParameter(
                "weights must be positive".to_string(),
            ));
        }
        for (name, value) in [
            ("threshold", self.threshold),
            ("shift_discount", self.shift_discount),
            ("fuzzy_discount", self.fuzzy_discount),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(RecogError::InvalidParameter(format!(
                    "{name} must be in [0, 1], got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Whether (x, y) lies on the outer ring or in the central 3x3 block
fn is_critical(x: i32, y: i32, size: i32) -> bool {
    let ring = x == 0 || y == 0 || x == size - 1 || y == size - 1;
    let mid = size / 2;
    ring || ((x - mid).abs() <= 1 && (y - mid).abs() <= 1)
}

/// Per-cell weights of a `size` x `size` comparison grid, row-major
fn cell_weights(size: u32, critical_weight: f32) -> Vec<f32> {
    let size = size as i32;
    (0..size)
        .flat_map(|y| (0..size).map(move |x| (x, y)))
        .map(|(x, y)| {
            if is_critical(x, y, size) {
                critical_weight
            } else {
                1.0
            }
        })
        .collect()
}

/// Reduce a normalized grid to the binary comparison grid
pub fn downsample_for_matching(grid: &PixelGrid, options: &MatchOptions) -> RecogResult<BinaryGrid> {
    let (w, h) = grid.dimensions();
    let side = w.min(h);
    let region = if side > 2 * options.padding {
        GridBox::new(
            options.padding,
            options.padding,
            side - 2 * options.padding,
            side - 2 * options.padding,
        )
    } else {
        GridBox::new(0, 0, w, h)
    };
    let cropped = crop(grid, region)?;
    let small = downsample_gaussian(&cropped, options.size, options.size)?;
    Ok(small.to_binary(options.threshold))
}

/// Weighted agreement between `input` and `template` shifted by (dx, dy)
///
/// With `fuzzy`, disagreements on non-critical cells cost nothing.
fn placement_score(
    input: &BinaryGrid,
    template: &BinaryGrid,
    dx: i32,
    dy: i32,
    weights: &[f32],
    options: &MatchOptions,
    fuzzy: bool,
) -> f32 {
    let size = input.width() as i32;
    let mut score = 0.0;
    for y in 0..size {
        for x in 0..size {
            let weight = weights[(y * size + x) as usize];
            if input.get(x, y) == template.get(x - dx, y - dy) {
                score += weight;
            } else if !fuzzy || is_critical(x, y, size) {
                score -= options.mismatch_penalty * weight;
            }
        }
    }
    score.max(0.0)
}

/// Best shifted and fuzzy scores of one variant, normalized to [0, 1]
fn variant_score(
    input: &BinaryGrid,
    template: &BinaryGrid,
    weights: &[f32],
    options: &MatchOptions,
) -> f32 {
    let attainable: f32 = weights.iter().sum();
    let r = options.shift_radius;
    let mut best = 0.0f32;
    for dy in -r..=r {
        for dx in -r..=r {
            let discount = if dx == 0 && dy == 0 {
                1.0
            } else {
                options.shift_discount
            };
            let raw = placement_score(input, template, dx, dy, weights, options, false);
            best = best.max(raw * discount / attainable);
        }
    }
    let fuzzy = placement_score(input, template, 0, 0, weights, options, true);
    best.max(fuzzy * options.fuzzy_discount / attainable)
}

/// Score an already downsampled grid against every catalog variant
///
/// Each class gets the best score of its variants.
pub fn score_binary(input: &BinaryGrid, options: &MatchOptions) -> RecogResult<ScoreVector> {
    options.validate()?;
    if input.dimensions() != (options.size, options.size) {
        return Err(RecogError::InvalidParameter(format!(
            "comparison grid must be {0}x{0}, got {1}x{2}",
            options.size,
            input.width(),
            input.height()
        )));
    }

    let refitted;
    let templates: &[(Digit, BinaryGrid)] = if options.size == DEFAULT_MATCH_SIZE {
        &FITTED_TEMPLATES
    } else {
        refitted = fit_catalog(options.size)?;
        &refitted
    };

    let weights = cell_weights(options.size, options.critical_weight);
    let mut scores = ScoreVector::zeros();
    for (digit, template) in templates {
        let score = variant_score(input, template, &weights, options);
        if score > scores.get(*digit) {
            scores.set(*digit, score);
        }
    }
    Ok(scores)
}

/// Match a normalized grid against the template catalog
///
/// # Errors
///
/// Returns an error for invalid options.
#[instrument(level = "debug", skip(grid, options))]
pub fn match_templates(grid: &PixelGrid, options: &MatchOptions) -> RecogResult<ScoreVector> {
    options.validate()?;
    let input = downsample_for_matching(grid, options)?;
    let scores = score_binary(&input, options)?;
    let (best, score) = scores.argmax();
    debug!(best = best.value(), score, "template match");
    Ok(scores)
}
