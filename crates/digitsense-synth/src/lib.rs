//! digitsense-synth - Synthetic handwritten digits
//!
//! This crate renders catalog templates into realistic 28x28 samples for
//! training an external recognizer:
//!
//! - **Styles**: A catalog of base writing styles, jittered or messy
//!   variants
//! - **Rendering**: Affine placement, bilinear sampling, blur and noise
//! - **Batches**: Balanced, labelled, deterministically shuffled batches
//!
//! # Features
//!
//! - `rayon` - renders batch samples in parallel. Every sample has its own
//!   seeded RNG, so results are identical with or without the feature.
//!
//! # Example
//!
//! ```
//! use digitsense_core::{Digit, canonical};
//! use digitsense_synth::{random_style, render_sample};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let style = random_style(&mut rng);
//! let sample = render_sample(canonical(Digit::from_index(3)), &style, &mut rng).unwrap();
//! assert_eq!(sample.dimensions(), (28, 28));
//! ```

pub mod batch;
mod error;
pub mod render;
pub mod style;

pub use batch::{BatchOptions, LabeledSample, generate_batch};
pub use error::{SynthError, SynthResult};
pub use render::{Placement, render_canonical, render_sample, render_with};
pub use style::{BASE_STYLES, StyleDescriptor, base_styles, messy_style, random_style};

// Re-export core for convenience
pub use digitsense_core;
