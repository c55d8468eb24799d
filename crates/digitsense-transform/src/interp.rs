//! Bilinear interpolation
//!
//! Samples are addressed in cell-index space: the value stored at (x, y)
//! is returned exactly for integer coordinates. Reads outside the grid
//! contribute zero, so strokes fade out smoothly at the border instead of
//! being smeared by edge clamping.

use digitsense_core::PixelGrid;

/// Sample `grid` at a fractional position with zero padding
///
/// # Examples
///
/// ```
/// use digitsense_core::PixelGrid;
/// use digitsense_transform::sample_bilinear;
///
/// let grid = PixelGrid::from_data(2, 1, vec![0.0, 1.0]).unwrap();
/// assert_eq!(sample_bilinear(&grid, 0.5, 0.0), 0.5);
/// assert_eq!(sample_bilinear(&grid, 5.0, 0.0), 0.0);
/// ```
pub fn sample_bilinear(grid: &PixelGrid, x: f32, y: f32) -> f32 {
    if !x.is_finite() || !y.is_finite() {
        return 0.0;
    }
    let x0 = x.floor();
    let y0 = y.floor();
    let fx = x - x0;
    let fy = y - y0;
    let (ix, iy) = (x0 as i32, y0 as i32);

    let v00 = grid.value_or_zero(ix, iy);
    let v10 = grid.value_or_zero(ix + 1, iy);
    let v01 = grid.value_or_zero(ix, iy + 1);
    let v11 = grid.value_or_zero(ix + 1, iy + 1);

    v00 * (1.0 - fx) * (1.0 - fy) + v10 * fx * (1.0 - fy) + v01 * (1.0 - fx) * fy + v11 * fx * fy
}
