//! Affine transformations
//!
//! # Affine Matrix
//!
//! An affine transformation is represented as:
//! ```text
//! | a  b  tx |
//! | c  d  ty |
//! | 0  0  1  |
//! ```
//!
//! The transformation equations are:
//! ```text
//! x' = a*x + b*y + tx
//! y' = c*x + d*y + ty
//! ```
//!
//! Warps use inverse mapping: the matrix passed to [`warp`] maps each
//! destination cell back into source coordinates, where the source is
//! sampled bilinearly. Chains of simple steps are built with
//! [`AffineMatrix::then`] in the order they are applied.

use crate::interp::sample_bilinear;
use crate::{TransformError, TransformResult};
use digitsense_core::{EPSILON, PixelGrid};

/// 2D affine transformation matrix (6 coefficients)
///
/// Represents the transformation:
/// ```text
/// x' = coeffs[0]*x + coeffs[1]*y + coeffs[2]
/// y' = coeffs[3]*x + coeffs[4]*y + coeffs[5]
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineMatrix {
    /// Coefficients [a, b, tx, c, d, ty]
    coeffs: [f32; 6],
}

impl Default for AffineMatrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl AffineMatrix {
    /// Create the identity transformation
    pub fn identity() -> Self {
        Self::from_coeffs([1.0, 0.0, 0.0, 0.0, 1.0, 0.0])
    }

    /// Create from raw coefficients `[a, b, tx, c, d, ty]`
    pub fn from_coeffs(coeffs: [f32; 6]) -> Self {
        Self { coeffs }
    }

    /// Get the raw coefficients
    pub fn coeffs(&self) -> &[f32; 6] {
        &self.coeffs
    }

    /// Translation by (tx, ty)
    pub fn translation(tx: f32, ty: f32) -> Self {
        Self::from_coeffs([1.0, 0.0, tx, 0.0, 1.0, ty])
    }

    /// Scaling about the origin
    pub fn scale(sx: f32, sy: f32) -> Self {
        Self::from_coeffs([sx, 0.0, 0.0, 0.0, sy, 0.0])
    }

    /// Horizontal shear: `x' = x + k*y`
    pub fn shear_x(k: f32) -> Self {
        Self::from_coeffs([1.0, k, 0.0, 0.0, 1.0, 0.0])
    }

    /// Vertical shear: `y' = y + k*x`
    pub fn shear_y(k: f32) -> Self {
        Self::from_coeffs([1.0, 0.0, 0.0, k, 1.0, 0.0])
    }

    /// Rotation about the origin by `angle` radians
    ///
    /// Positive angles turn the x axis towards the y axis; with y pointing
    /// down that is clockwise on screen.
    pub fn rotation(angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::from_coeffs([cos, -sin, 0.0, sin, cos, 0.0])
    }

    /// Apply `self` first, then `next`
    pub fn then(&self, next: &Self) -> Self {
        let [a, b, tx, c, d, ty] = self.coeffs;
        let [na, nb, ntx, nc, nd, nty] = next.coeffs;
        Self::from_coeffs([
            na * a + nb * c,
            na * b + nb * d,
            na * tx + nb * ty + ntx,
            nc * a + nd * c,
            nc * b + nd * d,
            nc * tx + nd * ty + nty,
        ])
    }

    /// Compute the inverse transformation
    ///
    /// # Errors
    ///
    /// Returns `TransformError::SingularMatrix` if the determinant is
    /// (near) zero.
    pub fn inverse(&self) -> TransformResult<Self> {
        let [a, b, tx, c, d, ty] = self.coeffs;
        let det = a * d - b * c;
        if det.abs() < EPSILON || !det.is_finite() {
            return Err(TransformError::SingularMatrix);
        }
        let ia = d / det;
        let ib = -b / det;
        let ic = -c / det;
        let id = a / det;
        Ok(Self::from_coeffs([
            ia,
            ib,
            -(ia * tx + ib * ty),
            ic,
            id,
            -(ic * tx + id * ty),
        ]))
    }

    /// Transform a point
    #[inline]
    pub fn transform_point(&self, x: f32, y: f32) -> (f32, f32) {
        let [a, b, tx, c, d, ty] = self.coeffs;
        (a * x + b * y + tx, c * x + d * y + ty)
    }
}

/// Warp `src` into a `width` x `height` grid by inverse mapping
///
/// `dst_to_src` maps each destination cell position (integer coordinates)
/// to a source position, which is sampled bilinearly with zero padding.
///
/// # Errors
///
/// Returns an error if the output dimensions are zero.
pub fn warp(
    src: &PixelGrid,
    dst_to_src: &AffineMatrix,
    width: u32,
    height: u32,
) -> TransformResult<PixelGrid> {
    let grid = PixelGrid::from_fn(width, height, |x, y| {
        let (sx, sy) = dst_to_src.transform_point(x as f32, y as f32);
        sample_bilinear(src, sx, sy)
    })?;
    Ok(grid)
}
