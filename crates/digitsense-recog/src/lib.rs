//! digitsense-recog - Handwritten digit recognition
//!
//! This crate classifies a 28x28 drawing with hand-written rules instead of
//! a trained model:
//!
//! - **Preprocessing**: Crop, rescale, center and normalize the drawing
//! - **Feature extraction**: Holes, stroke topology, lines and mass layout
//! - **Template matching**: Low-resolution comparison with the catalog
//! - **Heuristic scoring**: Per-digit rules with confusable-pair handling
//! - **Ensembling**: Voting, consensus bonus and softmax probabilities
//!
//! # Quick Start
//!
//! ```
//! use digitsense_recog::classify;
//!
//! let mut pixels = vec![0.0f32; 28 * 28];
//! for y in 4..24 {
//!     pixels[y * 28 + 13] = 1.0;
//!     pixels[y * 28 + 14] = 1.0;
//! }
//! let result = classify(&pixels).unwrap();
//! println!("{} ({:.2})", result.predicted_digit, result.confidence);
//! ```
//!
//! # Modules
//!
//! - [`preprocess`]: Drawing normalization
//! - [`features`]: Structural feature extraction
//! - [`matcher`]: Template matching
//! - [`scorer`]: Heuristic scoring and disambiguation
//! - [`ensemble`]: Source combination
//! - [`activations`]: Display-only activations

pub mod activations;
pub mod classify;
mod error;
pub mod ensemble;
pub mod features;
pub mod matcher;
pub mod preprocess;
pub mod scorer;

pub use error::{RecogError, RecogResult};

// Re-export commonly used types
pub use activations::{ActivationSource, DeterministicActivations, SeededActivations};
pub use classify::{AuxFeatures, Classification, Classifier, classify};
pub use ensemble::{EnsembleOptions, EnsembleResult, combine};
pub use features::{FeatureOptions, FeatureRecord, extract_features};
pub use matcher::{MatchOptions, match_templates};
pub use preprocess::{PreprocessOptions, preprocess};
pub use scorer::score_digits;

// Re-export core for convenience
pub use digitsense_core;
