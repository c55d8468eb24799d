//! Image normalization
//!
//! Brings an arbitrary drawing into the standard layout every later stage
//! assumes: the ink's bounding box, measured relative to the darkest
//! cell, is cropped, scaled uniformly so its longer side spans
//! [`DEFAULT_TARGET_SIZE`] cells and centered in a [`GRID_SIZE`] grid,
//! lightly blurred, then contrast-stretched with a gamma curve.
//!
//! Inputs with fewer than [`DEFAULT_MIN_ACTIVE`] cells above
//! [`DEFAULT_INK_THRESHOLD`] are treated as empty and produce an all-zero
//! grid.

use crate::features::DEFAULT_BINARY_THRESHOLD;
use crate::{RecogError, RecogResult};
use digitsense_core::{GRID_SIZE, PixelGrid};
use digitsense_filter::{box_blur3, stretch_and_gamma};
use digitsense_transform::crop_and_fit;
use tracing::debug;

/// Fraction of the drawing's peak value a cell must exceed to count
/// towards the bounding box
///
/// Relative to the peak, so faint drawings are cropped like dark ones and
/// the blur halo of an already normalized grid stays outside the box.
pub const DEFAULT_BBOX_THRESHOLD: f32 = 0.4;

/// Value a cell must exceed to count as ink
///
/// Equal to the feature binarization threshold, so any drawing the
/// features would see is never treated as empty.
pub const DEFAULT_INK_THRESHOLD: f32 = DEFAULT_BINARY_THRESHOLD;

/// Fewest inked cells treated as a drawing
pub const DEFAULT_MIN_ACTIVE: usize = 5;

/// Length of the longer bounding-box side after rescaling
pub const DEFAULT_TARGET_SIZE: u32 = 20;

/// Empty border kept around the rescaled drawing
pub const DEFAULT_PADDING: u32 = 4;

/// Gamma of the tone curve applied after the contrast stretch
pub const DEFAULT_GAMMA: f32 = 0.8;

/// Options for [`preprocess`]
#[derive(Debug, Clone)]
pub struct PreprocessOptions {
    /// Bounding box threshold as a fraction of the peak value (default: 0.4)
    pub bbox_threshold: f32,
    /// Absolute ink threshold (default: 0.25)
    pub ink_threshold: f32,
    /// Minimum number of cells above the ink threshold (default: 5)
    pub min_active: usize,
    /// Longer side of the rescaled drawing (default: 20)
    pub target_size: u32,
    /// Border around the drawing (default: 4)
    pub padding: u32,
    /// Side of the output grid (default: 28)
    pub output_size: u32,
    /// Tone curve gamma (default: 0.8)
    pub gamma: f32,
}

impl Default for PreprocessOptions {
    fn default() -> Self {
        Self {
            bbox_threshold: DEFAULT_BBOX_THRESHOLD,
            ink_threshold: DEFAULT_INK_THRESHOLD,
            min_active: DEFAULT_MIN_ACTIVE,
            target_size: DEFAULT_TARGET_SIZE,
            padding: DEFAULT_PADDING,
            output_size: GRID_SIZE,
            gamma: DEFAULT_GAMMA,
        }
    }
}

impl PreprocessOptions {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the bounding box threshold
    pub fn with_bbox_threshold(mut self, threshold: f32) -> Self {
        self.bbox_threshold = threshold;
        self
    }

    /// Set the absolute ink threshold
    pub fn with_ink_threshold(mut self, threshold: f32) -> Self {
        self.ink_threshold = threshold;
        self
    }

    /// Set the minimum active cell count
    pub fn with_min_active(mut self, count: usize) -> Self {
        self.min_active = count;
        self
    }

    /// Set the target size and padding
    pub fn with_layout(mut self, target_size: u32, padding: u32) -> Self {
        self.target_size = target_size;
        self.padding = padding;
        self
    }

    /// Set the gamma
    pub fn with_gamma(mut self, gamma: f32) -> Self {
        self.gamma = gamma;
        self
    }

    /// Validate options
    pub fn validate(&self) -> RecogResult<()> {
        if !(0.0..1.0).contains(&self.bbox_threshold) {
            return Err(RecogError::InvalidParameter(
                "bbox_threshold must be in [0, 1)".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&self.ink_threshold) {
            return Err(RecogError::InvalidParameter(
                "ink_threshold must be in [0, 1)".to_string(),
            ));
        }
        if self.target_size == 0 {
            return Err(RecogError::InvalidParameter(
                "target_size must be positive".to_string(),
            ));
        }
        if self.target_size + 2 * self.padding > self.output_size {
            return Err(RecogError::InvalidParameter(format!(
                "target_size {} with padding {} does not fit in {}",
                self.target_size, self.padding, self.output_size
            )));
        }
        if !(self.gamma > 0.0) {
            return Err(RecogError::InvalidParameter(
                "gamma must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Normalize a drawing into the standard layout
///
/// # Errors
///
/// Returns an error only for invalid options; empty drawings produce an
/// all-zero grid.
pub fn preprocess(grid: &PixelGrid, options: &PreprocessOptions) -> RecogResult<PixelGrid> {
    options.validate()?;

    let active = grid.count_above(options.ink_threshold);
    let (_, peak) = grid.min_max();
    let bbox = match grid.bounding_box(options.bbox_threshold * peak) {
        Some(bbox) if active >= options.min_active => bbox,
        _ => {
            debug!(active, "too little ink, returning an empty grid");
            return Ok(PixelGrid::new(options.output_size, options.output_size)?);
        }
    };

    let fitted = crop_and_fit(grid, bbox, options.target_size, options.output_size)?;
    let blurred = box_blur3(&fitted);
    let normalized = stretch_and_gamma(&blurred, options.gamma)?;
    debug!(
        bbox_w = bbox.w,
        bbox_h = bbox.h,
        active,
        peak,
        "normalized drawing"
    );
    Ok(normalized)
}
