//! Seed fill operations
//!
//! Enclosed-hole detection for binary grids. Background
//! reachable from the border is filled with 4-connectivity, so ink that
//! touches only diagonally still closes a loop.

use crate::conncomp::{ConnectivityType, collect_region, measure};
use digitsense_core::{BinaryGrid, GridBox};

/// An enclosed background region
#[derive(Debug, Clone, PartialEq)]
pub struct Hole {
    /// Number of background cells in the hole
    pub area: u32,
    /// Bounding box of the hole
    pub bounds: GridBox,
    /// Mean cell position (x, y)
    pub centroid: (f32, f32),
}

/// Mark every background cell reachable from the border
///
/// Returns a mask (row-major, same size as `grid`) that is `true` for
/// outside background. Background cells left unmarked are enclosed.
pub fn fill_from_border(grid: &BinaryGrid) -> Vec<bool> {
    let (w, h) = (grid.width() as i32, grid.height() as i32);
    let mut outside = vec![false; grid.cells().len()];

    let border = (0..w)
        .flat_map(|x| [(x, 0), (x, h - 1)])
        .chain((0..h).flat_map(|y| [(0, y), (w - 1, y)]));
    for (x, y) in border {
        let idx = (y * w + x) as usize;
        if !outside[idx] && !grid.get(x, y) {
            collect_region(grid, &mut outside, (x, y), false, ConnectivityType::FourWay);
        }
    }
    outside
}

/// Find the enclosed background regions of a grid
///
/// Each 4-connected background region that does not touch the border is
/// one hole. Holes are returned in row-major order of their first cell.
pub fn find_holes(grid: &BinaryGrid) -> Vec<Hole> {
    let w = grid.width() as i32;
    let mut visited = fill_from_border(grid);
    let mut holes = Vec::new();

    for (i, &active) in grid.cells().iter().enumerate() {
        if active || visited[i] {
            continue;
        }
        let seed = ((i as i32) % w, (i as i32) / w);
        let cells = collect_region(grid, &mut visited, seed, false, ConnectivityType::FourWay);
        let (bounds, centroid) = measure(&cells);
        holes.push(Hole {
            area: cells.len() as u32,
            bounds,
            centroid,
        });
    }
    holes
}

/// Number of enclosed background regions
pub fn count_holes(grid: &BinaryGrid) -> usize {
    find_holes(grid).len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_from_border() {
        let g = BinaryGrid::from_rows(&["#####", "#.#.#", "#####", "....."]).unwrap();
        let outside = fill_from_border(&g);
        // Enclosed cells stay unmarked, ink is never marked
        assert!(!outside[6]);
        assert!(!outside[8]);
        assert!(!outside[0]);
        assert!(outside[15..20].iter().all(|&o| o));
    }

    #[test]
    fn test_two_holes() {
        let g = BinaryGrid::from_rows(&["#####", "#.#.#", "#####"]).unwrap();
        let holes = find_holes(&g);
        assert_eq!(holes.len(), 2);
        assert_eq!(holes[0].centroid, (1.0, 1.0));
        assert_eq!(holes[1].area, 1);
    }

    #[test]
    fn test_diagonal_wall_encloses() {
        let g = BinaryGrid::from_rows(&[".#.", "#.#", ".#."]).unwrap();
        assert_eq!(count_holes(&g), 1);
    }

    #[test]
    fn test_open_shape_has_no_hole() {
        let g = BinaryGrid::from_rows(&["###", "#..", "###"]).unwrap();
        assert_eq!(count_holes(&g), 0);
    }
}
