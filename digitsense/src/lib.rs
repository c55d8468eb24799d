//! digitsense - Handwritten digit recognition without a trained model
//!
//! # Overview
//!
//! digitsense classifies 28x28 drawings of the digits 0-9 with a
//! hand-engineered pipeline and renders synthetic digits for training
//! other recognizers:
//!
//! - Drawing normalization (crop, rescale, blur, contrast)
//! - Structural features (holes, skeleton topology, lines, mass layout)
//! - Template matching against a catalog of digit bitmaps
//! - Per-digit heuristic rules and an ensemble with calibrated
//!   probabilities
//! - Styled synthetic rendering and labelled batch generation
//!
//! # Example
//!
//! ```
//! use digitsense::recog::classify;
//! use digitsense::synth::render_canonical;
//! use digitsense::{Digit, canonical};
//!
//! let zero = render_canonical(canonical(Digit::from_index(0))).unwrap();
//! let result = classify(zero.data()).unwrap();
//! assert!((result.probabilities.sum() - 1.0).abs() < 1e-5);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use digitsense_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use digitsense_filter as filter;
pub use digitsense_recog as recog;
pub use digitsense_region as region;
pub use digitsense_synth as synth;
pub use digitsense_transform as transform;
