//! PixelGrid - Floating-point digit image
//!
//! `PixelGrid` is a 2D array of `f32` intensities in `[0, 1]`, where 1.0 is
//! fully drawn ink and 0.0 is background. It is the input of the recognition
//! pipeline and the output of the synthetic renderer.
//!
//! # Examples
//!
//! ```
//! use digitsense_core::PixelGrid;
//!
//! let mut grid = PixelGrid::new(28, 28).unwrap();
//! grid.set_pixel(10, 20, 0.5).unwrap();
//! assert_eq!(grid.get_pixel(10, 20).unwrap(), 0.5);
//! assert_eq!(grid.count_above(0.25), 1);
//! ```

use crate::binary::BinaryGrid;
use crate::error::{Error, Result};
use crate::geometry::GridBox;

/// Side length of the square grids exchanged with collaborators
pub const GRID_SIZE: u32 = 28;

/// Number of cells in a [`GRID_SIZE`] x [`GRID_SIZE`] grid
pub const GRID_LEN: usize = (GRID_SIZE * GRID_SIZE) as usize;

/// Floating-point digit image
///
/// # Memory Layout
///
/// Data is stored in row-major order with no padding. The cell at (x, y)
/// is at index `y * width + x`.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl PixelGrid {
    /// Create a new grid with all cells set to zero
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::new_with_value(width, height, 0.0)
    }

    /// Create a new grid with all cells set to `value`
    pub fn new_with_value(width: u32, height: u32, value: f32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let size = (width as usize) * (height as usize);
        Ok(PixelGrid {
            width,
            height,
            data: vec![value; size],
        })
    }

    /// Create the standard 28x28 all-zero grid
    pub fn standard() -> Self {
        PixelGrid {
            width: GRID_SIZE,
            height: GRID_SIZE,
            data: vec![0.0; GRID_LEN],
        }
    }

    /// Create a grid from raw row-major data
    ///
    /// # Errors
    ///
    /// Returns an error if dimensions are invalid or the data length doesn't
    /// match `width * height`.
    pub fn from_data(width: u32, height: u32, data: Vec<f32>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let expected_size = (width as usize) * (height as usize);
        if data.len() != expected_size {
            return Err(Error::InvalidParameter(format!(
                "data length {} doesn't match {}x{} = {}",
                data.len(),
                width,
                height,
                expected_size
            )));
        }
        Ok(PixelGrid {
            width,
            height,
            data,
        })
    }

    /// Create a grid by evaluating `f(x, y)` for every cell
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> f32) -> Result<Self> {
        let mut grid = Self::new(width, height)?;
        for y in 0..height {
            for x in 0..width {
                let idx = grid.index(x, y);
                grid.data[idx] = f(x, y);
            }
        }
        Ok(grid)
    }

    /// Get the grid width in cells
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the grid height in cells
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the grid dimensions as (width, height)
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Total number of cells
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false; grids have at least one cell
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    /// Get the value at (x, y)
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if coordinates are out of range.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Result<f32> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                index: self.index(x, y),
                len: self.data.len(),
            });
        }
        Ok(self.data[self.index(x, y)])
    }

    /// Get the value at (x, y), returning 0.0 outside the grid
    ///
    /// Signed coordinates make neighbourhood scans at the border simple.
    #[inline]
    pub fn value_or_zero(&self, x: i32, y: i32) -> f32 {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return 0.0;
        }
        self.data[self.index(x as u32, y as u32)]
    }

    /// Set the value at (x, y)
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, value: f32) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                index: self.index(x, y),
                len: self.data.len(),
            });
        }
        let idx = self.index(x, y);
        self.data[idx] = value;
        Ok(())
    }

    /// Get the raw row-major data
    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Get mutable access to the raw data
    #[inline]
    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Consume the grid and return its data
    pub fn into_data(self) -> Vec<f32> {
        self.data
    }

    /// Get one row as a slice
    pub fn row(&self, y: u32) -> &[f32] {
        let start = self.index(0, y);
        &self.data[start..start + self.width as usize]
    }

    /// Clamp every value into [0, 1], replacing non-finite values with 0
    pub fn sanitize(&mut self) {
        for v in &mut self.data {
            *v = if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 };
        }
    }

    /// Sum of all values
    pub fn sum(&self) -> f32 {
        self.data.iter().sum()
    }

    /// Minimum and maximum value
    pub fn min_max(&self) -> (f32, f32) {
        self.data
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }

    /// Number of cells whose value exceeds `threshold`
    pub fn count_above(&self, threshold: f32) -> usize {
        self.data.iter().filter(|&&v| v > threshold).count()
    }

    /// Bounding box of the cells whose value exceeds `threshold`
    ///
    /// Returns `None` if no cell is above the threshold.
    pub fn bounding_box(&self, threshold: f32) -> Option<GridBox> {
        let mut min_x = u32::MAX;
        let mut min_y = u32::MAX;
        let mut max_x = 0;
        let mut max_y = 0;
        let mut found = false;

        for y in 0..self.height {
            for (x, &v) in self.row(y).iter().enumerate() {
                if v > threshold {
                    let x = x as u32;
                    found = true;
                    min_x = min_x.min(x);
                    max_x = max_x.max(x);
                    min_y = min_y.min(y);
                    max_y = max_y.max(y);
                }
            }
        }

        found.then(|| GridBox::new(min_x, min_y, max_x - min_x + 1, max_y - min_y + 1))
    }

    /// Threshold into a binary view (active iff value > `threshold`)
    pub fn to_binary(&self, threshold: f32) -> BinaryGrid {
        let cells = self.data.iter().map(|&v| v > threshold).collect();
        BinaryGrid::from_parts(self.width, self.height, cells)
    }

    /// Left-right mirror image
    pub fn mirrored(&self) -> PixelGrid {
        let mut out = self.clone();
        for y in 0..self.height {
            for x in 0..self.width {
                let src = self.index(self.width - 1 - x, y);
                let dst = self.index(x, y);
                out.data[dst] = self.data[src];
            }
        }
        out
    }

    /// Mean absolute difference against another grid of the same size
    pub fn mean_abs_diff(&self, other: &PixelGrid) -> Result<f32> {
        if self.dimensions() != other.dimensions() {
            return Err(Error::DimensionMismatch {
                expected: self.dimensions(),
                actual: other.dimensions(),
            });
        }
        let total: f32 = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(a, b)| (a - b).abs())
            .sum();
        Ok(total / self.data.len() as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_zero_dimension() {
        assert!(PixelGrid::new(0, 5).is_err());
        assert!(PixelGrid::new(5, 0).is_err());
    }

    #[test]
    fn test_from_data_length_mismatch() {
        assert!(PixelGrid::from_data(2, 2, vec![0.0; 3]).is_err());
        assert!(PixelGrid::from_data(2, 2, vec![0.0; 4]).is_ok());
    }

    #[test]
    fn test_bounding_box() {
        let mut grid = PixelGrid::new(10, 10).unwrap();
        grid.set_pixel(2, 3, 1.0).unwrap();
        grid.set_pixel(6, 8, 0.9).unwrap();
        let b = grid.bounding_box(0.5).unwrap();
        assert_eq!(b, GridBox::new(2, 3, 5, 6));
        assert!(PixelGrid::new(4, 4).unwrap().bounding_box(0.5).is_none());
    }

    #[test]
    fn test_sanitize_clamps_and_drops_nan() {
        let mut grid = PixelGrid::from_data(2, 2, vec![-1.0, 2.0, f32::NAN, 0.5]).unwrap();
        grid.sanitize();
        assert_eq!(grid.data(), &[0.0, 1.0, 0.0, 0.5]);
    }

    #[test]
    fn test_mirrored() {
        let grid = PixelGrid::from_data(3, 1, vec![0.1, 0.2, 0.3]).unwrap();
        assert_eq!(grid.mirrored().data(), &[0.3, 0.2, 0.1]);
    }

    #[test]
    fn test_value_or_zero_outside() {
        let grid = PixelGrid::new_with_value(2, 2, 1.0).unwrap();
        assert_eq!(grid.value_or_zero(-1, 0), 0.0);
        assert_eq!(grid.value_or_zero(1, 1), 1.0);
        assert_eq!(grid.value_or_zero(2, 1), 0.0);
    }
}
