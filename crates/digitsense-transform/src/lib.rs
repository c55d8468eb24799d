//! digitsense-transform - Geometric resampling for digitsense
//!
//! This crate provides the resampling operations shared by the recognizer
//! and the synthetic renderer:
//!
//! - Bilinear sampling with zero padding outside the grid
//! - Affine matrices (translation, scale, shear, rotation, composition)
//!   and inverse-mapped warps
//! - Bounding-box crop and uniform fit into a padded output grid
//! - Gaussian-weighted area downsampling
//! - Nearest-neighbour fitting of binary bitmaps into a square grid

pub mod affine;
mod error;
pub mod interp;
pub mod scale;

pub use affine::{AffineMatrix, warp};
pub use error::{TransformError, TransformResult};
pub use interp::sample_bilinear;
pub use scale::{crop, crop_and_fit, downsample_gaussian, fit_binary};
