//! Structural feature extraction
//!
//! Turns a normalized grid into a [`FeatureRecord`]: counts that describe
//! the stroke topology (holes, endpoints, crossings), where the ink sits
//! (zones, edges, heavy halves) and which simple shapes are present
//! (straight lines, diagonals, a hook, a closed loop).
//!
//! The grid is thresholded once. Hole, line and density measurements work
//! on the thresholded strokes; endpoint, crossing, corner and curvature
//! counts work on their skeleton so stroke width does not inflate them.
//!
//! # Example
//!
//! ```
//! use digitsense_core::{BinaryGrid, PixelGrid};
//! use digitsense_recog::features::{FeatureOptions, extract_features};
//!
//! let ring = BinaryGrid::from_rows(&[
//!     "..........",
//!     "..######..",
//!     "..#....#..",
//!     "..#....#..",
//!     "..#....#..",
//!     "..######..",
//!     "..........",
//! ])
//! .unwrap();
//! let grid = PixelGrid::from_fn(10, 7, |x, y| {
//!     if ring.get(x as i32, y as i32) { 1.0 } else { 0.0 }
//! })
//! .unwrap();
//! let record = extract_features(&grid, &FeatureOptions::default()).unwrap();
//! assert_eq!(record.holes, 1);
//! ```

pub mod lines;
pub mod shape;
pub mod topology;

pub use lines::Axis;
pub use shape::EdgeDensity;

use crate::{RecogError, RecogResult};
use digitsense_core::{BinaryGrid, PixelGrid};
use digitsense_region::{ConnectivityType, count_components, find_holes, thin_to_skeleton};
use tracing::{debug, instrument};

/// Threshold separating ink from background
pub const DEFAULT_BINARY_THRESHOLD: f32 = 0.25;

/// Fraction of the grid a row or column run must exceed to be a line
pub const DEFAULT_LINE_FRACTION: f32 = 0.45;

/// Fraction of the grid a run must exceed to be a strong line
pub const DEFAULT_STRONG_LINE_FRACTION: f32 = 0.65;

/// Fraction of the grid a diagonal run must exceed
pub const DEFAULT_DIAGONAL_FRACTION: f32 = 0.4;

/// Most diagonals reported
pub const DEFAULT_DIAGONAL_CAP: usize = 4;

/// Width of each border band
pub const DEFAULT_EDGE_BAND: u32 = 7;

/// Side of the centered density window
pub const DEFAULT_CENTER_WINDOW: u32 = 10;

/// Minimum top-stroke length and descent of a hook, as grid fractions
pub const DEFAULT_HOOK_FRACTION: f32 = 0.25;

/// Points sampled on the closed-loop circle
pub const DEFAULT_LOOP_SAMPLES: usize = 32;

/// Radius of the closed-loop circle as a fraction of the grid size
pub const DEFAULT_LOOP_RADIUS: f32 = 0.3;

/// Fraction of circle points that must be inked
pub const DEFAULT_LOOP_COVERAGE: f32 = 0.75;

/// Ink ratio making one half heavier than the other
pub const DEFAULT_HEAVY_RATIO: f32 = 1.25;

/// Ink density below which the grid is treated as empty
pub const DEFAULT_MIN_DENSITY: f32 = 0.01;

/// Options for [`extract_features`]
#[derive(Debug, Clone)]
pub struct FeatureOptions {
    /// Ink threshold (default: 0.25)
    pub binary_threshold: f32,
    /// Line run fraction (default: 0.45)
    pub line_fraction: f32,
    /// Strong line run fraction (default: 0.65)
    pub strong_line_fraction: f32,
    /// Diagonal run fraction (default: 0.4)
    pub diagonal_fraction: f32,
    /// Diagonal count cap (default: 4)
    pub diagonal_cap: usize,
    /// Border band width (default: 7)
    pub edge_band: u32,
    /// Center window side (default: 10)
    pub center_window: u32,
    /// Hook fraction (default: 0.25)
    pub hook_fraction: f32,
    /// Closed-loop samples (default: 32)
    pub loop_samples: usize,
    /// Closed-loop radius fraction (default: 0.3)
    pub loop_radius: f32,
    /// Closed-loop coverage (default: 0.75)
    pub loop_coverage: f32,
    /// Heavy half ratio (default: 1.25)
    pub heavy_ratio: f32,
    /// Empty-grid density (default: 0.01)
    pub min_density: f32,
}

impl Default for FeatureOptions {
    fn default() -> Self {
        Self {
            binary_threshold: DEFAULT_BINARY_THRESHOLD,
            line_fraction: DEFAULT_LINE_FRACTION,
            strong_line_fraction: DEFAULT_STRONG_LINE_FRACTION,
            diagonal_fraction: DEFAULT_DIAGONAL_FRACTION,
            diagonal_cap: DEFAULT_DIAGONAL_CAP,
            edge_band: DEFAULT_EDGE_BAND,
            center_window: DEFAULT_CENTER_WINDOW,
            hook_fraction: DEFAULT_HOOK_FRACTION,
            loop_samples: DEFAULT_LOOP_SAMPLES,
            loop_radius: DEFAULT_LOOP_RADIUS,
            loop_coverage: DEFAULT_LOOP_COVERAGE,
            heavy_ratio: DEFAULT_HEAVY_RATIO,
            min_density: DEFAULT_MIN_DENSITY,
        }
    }
}

impl FeatureOptions {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the ink threshold
    pub fn with_binary_threshold(mut self, threshold: f32) -> Self {
        self.binary_threshold = threshold;
        self
    }

    /// Set the line and strong line fractions
    pub fn with_line_fractions(mut self, line: f32, strong: f32) -> Self {
        self.line_fraction = line;
        self.strong_line_fraction = strong;
        self
    }

    /// Set the border band width and center window side
    pub fn with_density_windows(mut self, edge_band: u32, center_window: u32) -> Self {
        self.edge_band = edge_band;
        self.center_window = center_window;
        self
    }

    /// Set the heavy half ratio
    pub fn with_heavy_ratio(mut self, ratio: f32) -> Self {
        self.heavy_ratio = ratio;
        self
    }

    /// Validate options
    pub fn validate(&self) -> RecogResult<()> {
        let fractions = [
            ("binary_threshold", self.binary_threshold),
            ("line_fraction", self.line_fraction),
            ("strong_line_fraction", self.strong_line_fraction),
            ("diagonal_fraction", self.diagonal_fraction),
            ("hook_fraction", self.hook_fraction),
            ("loop_radius", self.loop_radius),
            ("loop_coverage", self.loop_coverage),
            ("min_density", self.min_density),
        ];
        for (name, value) in fractions {
            if !(0.0..=1.0).contains(&value) {
                return Err(RecogError::InvalidParameter(format!(
                    "{name} must be in [0, 1], got {value}"
                )));
            }
        }
        if self.strong_line_fraction < self.line_fraction {
            return Err(RecogError::InvalidParameter(
                "strong_line_fraction must not be below line_fraction".to_string(),
            ));
        }
        if self.edge_band == 0 || self.center_window == 0 {
            return Err(RecogError::InvalidParameter(
                "edge_band and center_window must be positive".to_string(),
            ));
        }
        if self.loop_samples == 0 {
            return Err(RecogError::InvalidParameter(
                "loop_samples must be positive".to_string(),
            ));
        }
        if !(self.heavy_ratio >= 1.0) {
            return Err(RecogError::InvalidParameter(
                "heavy_ratio must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Structural description of one drawing
///
/// The default record (all zeros, all flags false) describes an empty grid.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureRecord {
    /// Enclosed background regions
    pub holes: usize,
    /// Skeleton endpoints
    pub endpoints: usize,
    /// Skeleton crossings
    pub crossings: usize,
    /// Skeleton corners
    pub corners: usize,
    /// Skeleton turning cells
    pub curvature: usize,
    /// 4-connected ink components
    pub components: usize,
    /// Width / height of the ink bounding box
    pub aspect_ratio: f32,
    /// Fraction of the grid that is ink
    pub density: f32,
    /// 3x3 zone activity, `[row][column]`
    pub zones: [[f32; 3]; 3],
    pub heavy_top: bool,
    pub heavy_bottom: bool,
    pub heavy_left: bool,
    pub heavy_right: bool,
    /// Left-right mirror agreement in [0, 1]
    pub symmetry: f32,
    /// Border band activity
    pub edges: EdgeDensity,
    /// Activity of the centered window
    pub center_density: f32,
    /// Longest vertical run / height
    pub vertical_length: f32,
    /// Longest horizontal run / width
    pub horizontal_length: f32,
    pub horizontal_lines: usize,
    pub vertical_lines: usize,
    pub strong_horizontal_lines: usize,
    pub strong_vertical_lines: usize,
    pub diagonals: usize,
    pub has_hook: bool,
    pub closed_loop: bool,
    /// Vertical position of the largest hole's center within the ink
    /// bounding box: 0 at the top, 1 at the bottom, 0.5 without holes
    pub hole_position: f32,
}

/// Vertical position of the largest hole relative to the ink bounding box
fn largest_hole_position(binary: &BinaryGrid) -> f32 {
    let Some(bbox) = binary.bounding_box() else {
        return 0.5;
    };
    find_holes(binary)
        .iter()
        .max_by_key(|hole| hole.area)
        .map(|hole| {
            let y = hole.centroid.1 + 0.5 - bbox.y as f32;
            (y / bbox.h.max(1) as f32).clamp(0.0, 1.0)
        })
        .unwrap_or(0.5)
}

/// Extract the feature record of a normalized grid
///
/// # Errors
///
/// Returns an error only for invalid options. A grid with less ink than
/// `min_density` yields [`FeatureRecord::default`].
#[instrument(level = "debug", skip(grid, options), fields(w = grid.width(), h = grid.height()))]
pub fn extract_features(grid: &PixelGrid, options: &FeatureOptions) -> RecogResult<FeatureRecord> {
    options.validate()?;

    let binary = grid.to_binary(options.binary_threshold);
    let density = binary.density();
    if density < options.min_density {
        debug!(density, "degenerate grid, returning empty record");
        return Ok(FeatureRecord::default());
    }

    let skeleton = thin_to_skeleton(&binary);
    let holes = find_holes(&binary).len();
    let aspect_ratio = binary
        .bounding_box()
        .map(|bbox| bbox.aspect_ratio())
        .unwrap_or(0.0);
    let [heavy_top, heavy_bottom, heavy_left, heavy_right] =
        shape::heavy_halves(&binary, options.heavy_ratio);
    let (vertical_length, horizontal_length) = lines::continuous_lengths(&binary);

    let record = FeatureRecord {
        holes,
        endpoints: topology::count_endpoints(&skeleton),
        crossings: topology::count_crossings(&skeleton),
        corners: topology::count_corners(&skeleton),
        curvature: topology::curvature_index(&skeleton),
        components: count_components(&binary, ConnectivityType::FourWay),
        aspect_ratio,
        density,
        zones: shape::zone_densities(&binary),
        heavy_top,
        heavy_bottom,
        heavy_left,
        heavy_right,
        symmetry: shape::symmetry(&binary),
        edges: shape::edge_density(&binary, options.edge_band),
        center_density: shape::center_density(&binary, options.center_window),
        vertical_length,
        horizontal_length,
        horizontal_lines: lines::count_lines(&binary, Axis::Horizontal, options.line_fraction),
        vertical_lines: lines::count_lines(&binary, Axis::Vertical, options.line_fraction),
        strong_horizontal_lines: lines::count_lines(
            &binary,
            Axis::Horizontal,
            options.strong_line_fraction,
        ),
        strong_vertical_lines: lines::count_lines(
            &binary,
            Axis::Vertical,
            options.strong_line_fraction,
        ),
        diagonals: lines::count_diagonals(
            &binary,
            options.diagonal_fraction,
            options.diagonal_cap,
        ),
        has_hook: lines::has_hook(&binary, options.hook_fraction),
        closed_loop: shape::is_closed_loop(
            &binary,
            options.loop_samples,
            options.loop_radius,
            options.loop_coverage,
        ),
        hole_position: largest_hole_position(&binary),
    };

    debug!(
        holes = record.holes,
        endpoints = record.endpoints,
        crossings = record.crossings,
        aspect = record.aspect_ratio,
        "extracted features"
    );
    Ok(record)
}
