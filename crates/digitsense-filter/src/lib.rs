//! digitsense-filter - Grid filtering operations
//!
//! This crate provides the filters used by the preprocessor and the
//! synthetic renderer:
//!
//! - 3x3 box blur (local averaging)
//! - Neighbour blending with the 4-connected mean
//! - Contrast stretch and gamma curves

pub mod convolve;
pub mod enhance;
mod error;

pub use convolve::{box_blur3, neighbor_blend};
pub use enhance::{contrast_stretch, gamma_curve, stretch_and_gamma};
pub use error::{FilterError, FilterResult};
