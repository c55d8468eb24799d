//! Labelled training batches
//!
//! Generates the same number of samples for every digit. Each sample owns
//! an RNG seeded from the batch seed and its position, so the batch is the
//! same whether it is generated sequentially or, with the `rayon` feature,
//! in parallel. Shuffling happens only after every sample is rendered.

use crate::render::render_sample;
use crate::style::{messy_style, random_style};
use crate::{SynthError, SynthResult};
use digitsense_core::{Digit, NUM_CLASSES, PixelGrid, templates};
use rand::rngs::StdRng;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::SeedableRng;
#[cfg(feature = "rayon")]
use rayon::prelude::*;
use tracing::{debug, instrument};

/// Samples rendered for each digit
pub const DEFAULT_SAMPLES_PER_DIGIT: usize = 600;

/// Every n-th sample of a digit uses a messy style
pub const DEFAULT_MESSY_EVERY: usize = 3;

/// Options for [`generate_batch`]
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Samples per digit (default: 600)
    pub samples_per_digit: usize,
    /// Seed of the whole batch (default: 0)
    pub seed: u64,
    /// Messy style period; 0 disables messy styles (default: 3)
    pub messy_every: usize,
    /// Shuffle the finished batch (default: true)
    pub shuffle: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            samples_per_digit: DEFAULT_SAMPLES_PER_DIGIT,
            seed: 0,
            messy_every: DEFAULT_MESSY_EVERY,
            shuffle: true,
        }
    }
}

impl BatchOptions {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of samples per digit
    pub fn with_samples_per_digit(mut self, count: usize) -> Self {
        self.samples_per_digit = count;
        self
    }

    /// Set the batch seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the messy style period
    pub fn with_messy_every(mut self, period: usize) -> Self {
        self.messy_every = period;
        self
    }

    /// Enable or disable the final shuffle
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Validate options
    pub fn validate(&self) -> SynthResult<()> {
        if self.samples_per_digit == 0 {
            return Err(SynthError::InvalidParameter(
                "samples_per_digit must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// One rendered sample with its digit
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledSample {
    pub grid: PixelGrid,
    pub label: Digit,
}

impl LabeledSample {
    /// One-hot encoding of the label
    pub fn one_hot(&self) -> [f32; NUM_CLASSES] {
        self.label.one_hot()
    }

    /// Row-major pixel values
    pub fn pixels(&self) -> &[f32] {
        self.grid.data()
    }
}

/// Seed of the sample at `position` within a batch
fn sample_seed(batch_seed: u64, position: usize) -> u64 {
    batch_seed ^ (position as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Render the sample at `position`
///
/// Positions run digit by digit: the first `samples_per_digit` are zeros,
/// the next ones ones, and so on.
fn generate_one(position: usize, options: &BatchOptions) -> SynthResult<LabeledSample> {
    let label = Digit::from_index(position / options.samples_per_digit);
    let within = position % options.samples_per_digit;
    let mut rng = StdRng::seed_from_u64(sample_seed(options.seed, position));

    let template = templates(label).choose(&mut rng).ok_or_else(|| {
        SynthError::InvalidParameter(format!("no templates for digit {label}"))
    })?;
    let style = if options.messy_every > 0 && within % options.messy_every == 0 {
        messy_style(&mut rng)
    } else {
        random_style(&mut rng)
    };
    let grid = render_sample(template, &style, &mut rng)?;
    Ok(LabeledSample { grid, label })
}

/// Generate a labelled batch of `samples_per_digit` samples per digit
///
/// # Errors
///
/// Returns an error for invalid options.
#[instrument(level = "debug", skip(options), fields(per_digit = options.samples_per_digit, seed = options.seed))]
pub fn generate_batch(options: &BatchOptions) -> SynthResult<Vec<LabeledSample>> {
    options.validate()?;
    let total = options.samples_per_digit * NUM_CLASSES;

    #[cfg(feature = "rayon")]
    let samples: SynthResult<Vec<LabeledSample>> = (0..total)
        .into_par_iter()
        .map(|position| generate_one(position, options))
        .collect();

    #[cfg(not(feature = "rayon"))]
    let samples: SynthResult<Vec<LabeledSample>> = (0..total)
        .map(|position| generate_one(position, options))
        .collect();

    let mut samples = samples?;
    if options.shuffle {
        let mut rng = StdRng::seed_from_u64(options.seed);
        samples.shuffle(&mut rng);
    }
    debug!(total, shuffled = options.shuffle, "generated batch");
    Ok(samples)
}
