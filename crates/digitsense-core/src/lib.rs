//! digitsense Core - Basic data structures for digit recognition
//!
//! This crate provides the fundamental data structures used throughout
//! the digitsense workspace:
//!
//! - [`PixelGrid`] - Floating-point intensity grid (28x28 by convention)
//! - [`BinaryGrid`] - Thresholded active/inactive view of a grid
//! - [`GridBox`] - Rectangle regions
//! - [`Digit`], [`ScoreVector`], [`ProbabilityVector`] - Per-class results
//! - [`DigitTemplate`] / [`TemplateCatalog`] - Small digit bitmaps shared by
//!   the template matcher and the synthetic renderer

pub mod binary;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod scores;
pub mod template;

pub use binary::{BinaryGrid, NEIGHBORS_4, NEIGHBORS_8};
pub use error::{Error, Result};
pub use geometry::GridBox;
pub use grid::{GRID_LEN, GRID_SIZE, PixelGrid};
pub use scores::{Digit, EPSILON, NUM_CLASSES, ProbabilityVector, ScoreVector};
pub use template::{DigitTemplate, TemplateCatalog, canonical, catalog, templates};
