//! Writing styles
//!
//! A [`StyleDescriptor`] describes how a template is drawn: its size,
//! stroke intensity, slant, proportions and how blurred or noisy the
//! result looks. A fixed catalog of base styles covers common hands;
//! [`random_style`] picks one and jitters every parameter, while
//! [`messy_style`] draws each parameter from a wide range for careless
//! handwriting.

use crate::{SynthError, SynthResult};
use rand::seq::IndexedRandom;
use rand::{Rng, RngExt};

/// Rendering parameters of one sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleDescriptor {
    /// Output pixels per template cell
    pub scale: f32,
    /// Intensity multiplier of the sampled strokes
    pub thickness: f32,
    /// Horizontal shear applied to the vertical offset
    pub shear_x: f32,
    /// Vertical shear applied to the horizontal offset
    pub shear_y: f32,
    pub stretch_x: f32,
    pub stretch_y: f32,
    /// Neighbour blur strength in [0, 1]
    pub blur: f32,
    /// Noise strength in [0, 1]
    pub noise: f32,
}

impl StyleDescriptor {
    /// Style from explicit parameters
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        scale: f32,
        thickness: f32,
        shear_x: f32,
        shear_y: f32,
        stretch_x: f32,
        stretch_y: f32,
        blur: f32,
        noise: f32,
    ) -> Self {
        Self {
            scale,
            thickness,
            shear_x,
            shear_y,
            stretch_x,
            stretch_y,
            blur,
            noise,
        }
    }

    /// Clean, upright, full-intensity style used for canonical renderings
    pub const fn canonical() -> Self {
        Self::new(2.8, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0)
    }

    /// Validate the style
    ///
    /// # Errors
    ///
    /// Returns [`SynthError::InvalidStyle`] for non-finite values,
    /// non-positive scale or stretch, negative thickness, or blur and noise
    /// outside [0, 1].
    pub fn validate(&self) -> SynthResult<()> {
        let values = [
            self.scale,
            self.thickness,
            self.shear_x,
            self.shear_y,
            self.stretch_x,
            self.stretch_y,
            self.blur,
            self.noise,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(SynthError::InvalidStyle(
                "style values must be finite".to_string(),
            ));
        }
        if self.scale <= 0.0 || self.stretch_x <= 0.0 || self.stretch_y <= 0.0 {
            return Err(SynthError::InvalidStyle(format!(
                "scale and stretch must be positive, got scale {} stretch {}x{}",
                self.scale, self.stretch_x, self.stretch_y
            )));
        }
        if self.thickness < 0.0 {
            return Err(SynthError::InvalidStyle(
                "thickness must not be negative".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.blur) || !(0.0..=1.0).contains(&self.noise) {
            return Err(SynthError::InvalidStyle(
                "blur and noise must be in [0, 1]".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for StyleDescriptor {
    fn default() -> Self {
        Self::canonical()
    }
}

/// Base styles picked by [`random_style`]
pub const BASE_STYLES: [StyleDescriptor; 14] = [
    StyleDescriptor::new(2.8, 0.9, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0),
    // small
    StyleDescriptor::new(2.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0),
    // large
    StyleDescriptor::new(3.8, 0.8, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0),
    // slanted right and left
    StyleDescriptor::new(2.8, 0.85, 0.25, 0.0, 0.9, 1.0, 0.0, 0.0),
    StyleDescriptor::new(2.8, 0.85, -0.2, 0.0, 0.9, 1.0, 0.0, 0.0),
    // wide and tall
    StyleDescriptor::new(2.5, 0.9, 0.0, 0.0, 1.3, 1.0, 0.0, 0.0),
    StyleDescriptor::new(2.5, 0.85, 0.0, 0.0, 1.0, 1.3, 0.0, 0.0),
    // faint
    StyleDescriptor::new(2.8, 0.55, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0),
    // heavy marker
    StyleDescriptor::new(2.8, 1.2, 0.0, 0.0, 1.0, 1.0, 0.5, 0.0),
    // narrow
    StyleDescriptor::new(3.0, 0.8, 0.0, 0.0, 0.7, 1.0, 0.0, 0.0),
    // flat
    StyleDescriptor::new(3.0, 0.85, 0.0, 0.0, 1.4, 0.9, 0.0, 0.0),
    // cursive
    StyleDescriptor::new(2.6, 0.7, 0.15, 0.05, 1.1, 1.0, 0.3, 0.0),
    // soft pencil
    StyleDescriptor::new(2.5, 1.1, 0.0, 0.0, 1.0, 1.0, 0.2, 0.0),
    // very large
    StyleDescriptor::new(4.2, 0.7, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0),
];

/// Base style catalog
pub fn base_styles() -> &'static [StyleDescriptor] {
    &BASE_STYLES
}

/// A randomly chosen base style with every parameter jittered
///
/// Scale varies by up to 0.4, thickness by 0.125, shear by 0.1 (x) and
/// 0.075 (y), stretch by 0.15; blur gains up to 0.3 and noise is drawn
/// from [0, 0.1).
pub fn random_style<R: Rng + ?Sized>(rng: &mut R) -> StyleDescriptor {
    let base = BASE_STYLES
        .choose(rng)
        .copied()
        .unwrap_or_else(StyleDescriptor::canonical);
    StyleDescriptor {
        scale: base.scale + rng.random_range(-0.4..0.4),
        thickness: base.thickness + rng.random_range(-0.125..0.125),
        shear_x: base.shear_x + rng.random_range(-0.1..0.1),
        shear_y: base.shear_y + rng.random_range(-0.075..0.075),
        stretch_x: base.stretch_x + rng.random_range(-0.15..0.15),
        stretch_y: base.stretch_y + rng.random_range(-0.15..0.15),
        blur: base.blur + rng.random_range(0.0..0.3),
        noise: rng.random_range(0.0..0.1),
    }
}

/// A style drawn from wide ranges, for careless handwriting
pub fn messy_style<R: Rng + ?Sized>(rng: &mut R) -> StyleDescriptor {
    StyleDescriptor {
        scale: rng.random_range(2.0..4.5),
        thickness: rng.random_range(0.4..1.3),
        shear_x: rng.random_range(-0.25..0.25),
        shear_y: rng.random_range(-0.15..0.15),
        stretch_x: rng.random_range(0.6..1.5),
        stretch_y: rng.random_range(0.6..1.5),
        blur: rng.random_range(0.0..0.6),
        noise: rng.random_range(0.05..0.25),
    }
}
