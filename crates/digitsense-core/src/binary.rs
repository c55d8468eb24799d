//! BinaryGrid - thresholded view of a PixelGrid
//!
//! A cell is active when the source intensity exceeded the threshold used
//! to build the view. Reads outside the grid are inactive, which keeps
//! neighbourhood tests at the border free of special cases.

use crate::error::{Error, Result};
use crate::geometry::GridBox;

/// Offsets of the four edge-adjacent neighbours (left, right, up, down)
pub const NEIGHBORS_4: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Offsets of the eight surrounding neighbours, clockwise from top-left
pub const NEIGHBORS_8: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
];

/// Binary grid of active/inactive cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryGrid {
    width: u32,
    height: u32,
    cells: Vec<bool>,
}

impl BinaryGrid {
    /// Create an all-inactive grid
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        Ok(Self::from_parts(
            width,
            height,
            vec![false; (width as usize) * (height as usize)],
        ))
    }

    /// Create a grid from row-major cells
    pub fn from_cells(width: u32, height: u32, cells: Vec<bool>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        if cells.len() != (width as usize) * (height as usize) {
            return Err(Error::InvalidParameter(format!(
                "cell count {} doesn't match {}x{}",
                cells.len(),
                width,
                height
            )));
        }
        Ok(Self::from_parts(width, height, cells))
    }

    /// Parse rows of `'#'` (active) and `'.'` (inactive)
    ///
    /// Rows shorter than the longest row are padded with inactive cells.
    ///
    /// ```
    /// use digitsense_core::BinaryGrid;
    ///
    /// let g = BinaryGrid::from_rows(&["#.#", ".#"]).unwrap();
    /// assert_eq!(g.dimensions(), (3, 2));
    /// assert!(g.get(1, 1));
    /// assert!(!g.get(2, 1));
    /// ```
    pub fn from_rows(rows: &[&str]) -> Result<Self> {
        let height = rows.len() as u32;
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0) as u32;
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let mut cells = vec![false; (width as usize) * (height as usize)];
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                cells[y * width as usize + x] = match c {
                    '#' => true,
                    '.' => false,
                    other => {
                        return Err(Error::InvalidTemplate(format!(
                            "unexpected character '{other}' in row {y}"
                        )));
                    }
                };
            }
        }
        Ok(Self::from_parts(width, height, cells))
    }

    pub(crate) fn from_parts(width: u32, height: u32, cells: Vec<bool>) -> Self {
        BinaryGrid {
            width,
            height,
            cells,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Row-major cells
    #[inline]
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Whether (x, y) is active; false outside the grid
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return false;
        }
        self.cells[(y as usize) * (self.width as usize) + (x as usize)]
    }

    /// Set (x, y); ignored outside the grid
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, value: bool) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let idx = (y as usize) * (self.width as usize) + (x as usize);
        self.cells[idx] = value;
    }

    /// Number of active cells
    pub fn active_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Fraction of active cells
    pub fn density(&self) -> f32 {
        self.active_count() as f32 / self.cells.len() as f32
    }

    /// Number of active 4-neighbours of (x, y)
    pub fn count_neighbors_4(&self, x: i32, y: i32) -> usize {
        NEIGHBORS_4
            .iter()
            .filter(|(dx, dy)| self.get(x + dx, y + dy))
            .count()
    }

    /// Number of active 8-neighbours of (x, y)
    pub fn count_neighbors_8(&self, x: i32, y: i32) -> usize {
        NEIGHBORS_8
            .iter()
            .filter(|(dx, dy)| self.get(x + dx, y + dy))
            .count()
    }

    /// Bounding box of the active cells
    pub fn bounding_box(&self) -> Option<GridBox> {
        let (w, h) = (self.width as i32, self.height as i32);
        let mut bounds: Option<(i32, i32, i32, i32)> = None;
        for y in 0..h {
            for x in 0..w {
                if self.get(x, y) {
                    bounds = Some(match bounds {
                        None => (x, y, x, y),
                        Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
                    });
                }
            }
        }
        bounds.map(|(x0, y0, x1, y1)| {
            GridBox::new(x0 as u32, y0 as u32, (x1 - x0 + 1) as u32, (y1 - y0 + 1) as u32)
        })
    }

    /// Iterate over the coordinates of active cells in row-major order
    pub fn active_cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let w = self.width as usize;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| **c)
            .map(move |(i, _)| ((i % w) as i32, (i / w) as i32))
    }
}
