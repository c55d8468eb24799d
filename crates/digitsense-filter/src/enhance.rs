//! Contrast enhancement
//!
//! Min/max contrast stretching and a power-law tone curve. Together they
//! make faint and heavy drawings look alike before features are measured.

use crate::{FilterError, FilterResult};
use digitsense_core::{EPSILON, PixelGrid};

/// Linearly stretch values so the minimum maps to 0 and the maximum to 1
///
/// A flat grid (max - min below epsilon) is returned unchanged.
pub fn contrast_stretch(src: &PixelGrid) -> PixelGrid {
    let (lo, hi) = src.min_max();
    let range = hi - lo;
    let mut out = src.clone();
    if !(range > EPSILON) {
        return out;
    }
    for v in out.data_mut() {
        *v = ((*v - lo) / range).clamp(0.0, 1.0);
    }
    out
}

/// Apply `v' = v^(1/gamma)` to every value
///
/// Values are expected in [0, 1]. Gamma below 1 darkens mid-tones, which
/// pushes faint blur fringes further towards the background.
///
/// # Errors
///
/// Returns `FilterError::InvalidParameters` if `gamma` is not positive.
pub fn gamma_curve(src: &PixelGrid, gamma: f32) -> FilterResult<PixelGrid> {
    if !(gamma > 0.0) || !gamma.is_finite() {
        return Err(FilterError::InvalidParameters(format!(
            "gamma must be > 0.0, got {gamma}"
        )));
    }
    let inv_gamma = 1.0 / gamma;
    let mut out = src.clone();
    for v in out.data_mut() {
        *v = v.clamp(0.0, 1.0).powf(inv_gamma);
    }
    Ok(out)
}

/// Contrast stretch followed by a gamma curve
pub fn stretch_and_gamma(src: &PixelGrid, gamma: f32) -> FilterResult<PixelGrid> {
    gamma_curve(&contrast_stretch(src), gamma)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contrast_stretch() {
        let grid = PixelGrid::from_data(3, 1, vec![0.2, 0.4, 0.6]).unwrap();
        let out = contrast_stretch(&grid);
        let d = out.data();
        assert!(d[0].abs() < 1e-6);
        assert!((d[1] - 0.5).abs() < 1e-6);
        assert!((d[2] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_contrast_stretch_flat() {
        let grid = PixelGrid::new_with_value(3, 3, 0.3).unwrap();
        assert_eq!(contrast_stretch(&grid), grid);
    }

    #[test]
    fn test_gamma_curve() {
        let grid = PixelGrid::from_data(3, 1, vec![0.0, 0.5, 1.0]).unwrap();
        let out = gamma_curve(&grid, 0.8).unwrap();
        let d = out.data();
        assert_eq!(d[0], 0.0);
        assert!((d[1] - 0.5f32.powf(1.25)).abs() < 1e-6);
        assert_eq!(d[2], 1.0);
        assert!(gamma_curve(&grid, 0.0).is_err());
        assert!(gamma_curve(&grid, -1.0).is_err());
    }
}
