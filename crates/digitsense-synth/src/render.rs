//! Synthetic sample rendering
//!
//! A template is drawn into a 28x28 grid by inverse mapping: every output
//! pixel is taken relative to a jittered center, un-stretched, sheared,
//! rotated by a small random angle and scaled down into template space,
//! where the template is sampled bilinearly. A second pass blurs the
//! strokes, varies their intensity and adds background specks, erosion
//! and dilation according to the style's noise level.
//!
//! All randomness comes from the caller's RNG, so a seeded RNG gives
//! reproducible samples.

use crate::style::StyleDescriptor;
use crate::SynthResult;
use digitsense_core::{DigitTemplate, GRID_SIZE, PixelGrid};
use digitsense_filter::neighbor_blend;
use digitsense_transform::{AffineMatrix, warp};
use rand::{Rng, RngExt};
use tracing::trace;

/// Largest random center offset on each axis, in pixels
pub const MAX_OFFSET: f32 = 5.0;

/// Largest random rotation angle in radians
pub const MAX_ROTATION: f32 = 0.25;

/// Blend weight of the neighbour mean at blur 1
pub const BLUR_STRENGTH: f32 = 0.6;

/// Values above this get a random intensity factor
pub const INK_LEVEL: f32 = 0.15;

/// Range of the intensity factor, starting at [`INTENSITY_MIN`]
pub const INTENSITY_SPAN: f32 = 0.4;
pub const INTENSITY_MIN: f32 = 0.7;

/// Values below this may receive a background speck
pub const BACKGROUND_LEVEL: f32 = 0.05;

/// Probability of a background speck
pub const SPECK_PROBABILITY: f64 = 0.015;

/// Largest speck value
pub const SPECK_MAX: f32 = 0.1;

/// Random placement of one rendering
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Placement {
    pub offset_x: f32,
    pub offset_y: f32,
    /// Rotation in radians
    pub angle: f32,
}

impl Placement {
    /// Draw a placement within [`MAX_OFFSET`] and [`MAX_ROTATION`]
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            offset_x: rng.random_range(-MAX_OFFSET..MAX_OFFSET),
            offset_y: rng.random_range(-MAX_OFFSET..MAX_OFFSET),
            angle: rng.random_range(-MAX_ROTATION..MAX_ROTATION),
        }
    }
}

/// Output-to-template mapping of a style and placement
pub fn sample_transform(
    template: &DigitTemplate,
    style: &StyleDescriptor,
    placement: &Placement,
) -> AffineMatrix {
    let center = GRID_SIZE as f32 / 2.0;
    let template_cx = template.width() as f32 / 2.0 - 0.5;
    let template_cy = template.height() as f32 / 2.0 - 0.5;

    AffineMatrix::translation(-center - placement.offset_x, -center - placement.offset_y)
        .then(&AffineMatrix::scale(1.0 / style.stretch_x, 1.0 / style.stretch_y))
        .then(&AffineMatrix::shear_x(style.shear_x))
        .then(&AffineMatrix::shear_y(style.shear_y))
        .then(&AffineMatrix::rotation(-placement.angle))
        .then(&AffineMatrix::scale(1.0 / style.scale, 1.0 / style.scale))
        .then(&AffineMatrix::translation(template_cx, template_cy))
}

/// Geometric pass: warp the template and apply the stroke intensity
fn draw(
    template: &DigitTemplate,
    style: &StyleDescriptor,
    placement: &Placement,
) -> SynthResult<PixelGrid> {
    let transform = sample_transform(template, style, placement);
    let mut grid = warp(&template.to_grid(), &transform, GRID_SIZE, GRID_SIZE)?;
    for v in grid.data_mut() {
        *v *= style.thickness;
    }
    Ok(grid)
}

/// Intensity variation, background specks and style noise for one value
fn degrade<R: Rng + ?Sized>(mut v: f32, noise: f32, rng: &mut R) -> f32 {
    if v > INK_LEVEL {
        v *= rng.random_range(INTENSITY_MIN..INTENSITY_MIN + INTENSITY_SPAN);
    }
    if v < BACKGROUND_LEVEL && rng.random_bool(SPECK_PROBABILITY) {
        v = rng.random_range(0.0..SPECK_MAX);
    }
    if noise > 0.0 {
        v += rng.random_range(-noise / 2.0..noise / 2.0);
        // Erosion
        if v > 0.3 && rng.random_bool(f64::from(noise * 0.5)) {
            v *= 0.3;
        }
        // Dilation near stroke edges
        if v < 0.2 && v > 0.05 && rng.random_bool(f64::from(noise * 0.3)) {
            v = rng.random_range(0.4..0.7);
        }
    }
    v.clamp(0.0, 1.0)
}

/// Render a template in the given style
///
/// The output is always 28x28 with values in [0, 1], whatever the
/// template's size.
///
/// # Errors
///
/// Returns [`SynthError::InvalidStyle`](crate::SynthError::InvalidStyle)
/// for an invalid style.
pub fn render_sample<R: Rng + ?Sized>(
    template: &DigitTemplate,
    style: &StyleDescriptor,
    rng: &mut R,
) -> SynthResult<PixelGrid> {
    style.validate()?;
    let placement = Placement::random(rng);
    trace!(
        digit = template.digit().value(),
        angle = placement.angle,
        scale = style.scale,
        "rendering sample"
    );

    let drawn = draw(template, style, &placement)?;
    let mut grid = neighbor_blend(&drawn, style.blur * BLUR_STRENGTH)?;
    for v in grid.data_mut() {
        *v = degrade(*v, style.noise, rng);
    }
    Ok(grid)
}

/// Render a template centered and upright without any randomness
///
/// Uses [`StyleDescriptor::canonical`] and skips the degradation pass.
pub fn render_canonical(template: &DigitTemplate) -> SynthResult<PixelGrid> {
    render_with(template, &StyleDescriptor::canonical(), &Placement::default())
}

/// Render a template with a fixed placement and no degradation
///
/// # Errors
///
/// Returns an error for an invalid style.
pub fn render_with(
    template: &DigitTemplate,
    style: &StyleDescriptor,
    placement: &Placement,
) -> SynthResult<PixelGrid> {
    style.validate()?;
    let drawn = draw(template, style, placement)?;
    let mut grid = neighbor_blend(&drawn, style.blur * BLUR_STRENGTH)?;
    grid.sanitize();
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use digitsense_core::{BinaryGrid, Digit, canonical};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_transform_maps_center_to_template_center() {
        let template = canonical(Digit::from_index(0));
        let m = sample_transform(template, &StyleDescriptor::canonical(), &Placement::default());
        let (x, y) = m.transform_point(14.0, 14.0);
        assert!((x - 3.0).abs() < 1e-5 && (y - 3.0).abs() < 1e-5);
        let (x, _) = m.transform_point(14.0 + 2.8, 14.0);
        assert!((x - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_canonical_is_centered() {
        let grid = render_canonical(canonical(Digit::from_index(8))).unwrap();
        assert_eq!(grid.dimensions(), (28, 28));
        let bbox = grid.bounding_box(0.5).unwrap();
        let (cx, cy) = bbox.center();
        assert!((cx - 14.5).abs() <= 1.5 && (cy - 14.5).abs() <= 1.5);
        assert!(bbox.longer_side() >= 16 && bbox.longer_side() <= 20);
    }

    #[test]
    fn test_tiny_template_renders_full_grid() {
        let template =
            DigitTemplate::new(Digit::from_index(1), BinaryGrid::from_rows(&["#"]).unwrap());
        let mut rng = StdRng::seed_from_u64(3);
        let grid = render_sample(&template, &StyleDescriptor::canonical(), &mut rng).unwrap();
        assert_eq!(grid.len(), 784);
        assert!(grid.data().iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn test_invalid_style_is_rejected() {
        let mut style = StyleDescriptor::canonical();
        style.stretch_x = 0.0;
        let mut rng = StdRng::seed_from_u64(0);
        assert!(render_sample(canonical(Digit::from_index(2)), &style, &mut rng).is_err());
    }

    #[test]
    fn test_placement_bounds() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..500 {
            let p = Placement::random(&mut rng);
            assert!(p.offset_x.abs() <= MAX_OFFSET && p.offset_y.abs() <= MAX_OFFSET);
            assert!(p.angle.abs() <= MAX_ROTATION);
        }
    }

    #[test]
    fn test_noiseless_degrade_keeps_background() {
        // Without noise only specks can touch the background, and they stay faint
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..2000 {
            assert!(degrade(0.0, 0.0, &mut rng) < SPECK_MAX);
            let ink = degrade(1.0, 0.0, &mut rng);
            assert!((INTENSITY_MIN..=1.0).contains(&ink));
        }
    }

    #[test]
    fn test_degrade_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(9);
        for i in 0..2000 {
            let v = degrade((i % 13) as f32 / 10.0, 0.25, &mut rng);
            assert!((0.0..=1.0).contains(&v));
        }
    }
}
