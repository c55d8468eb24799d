//! Connected component analysis
//!
//! Components are traced with an explicit stack. Each cell is pushed at
//! most once, so the work is linear in the grid size.

use digitsense_core::{BinaryGrid, GridBox, NEIGHBORS_4, NEIGHBORS_8};

/// Connectivity type for component analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectivityType {
    /// 4-way connectivity (up, down, left, right)
    #[default]
    FourWay,
    /// 8-way connectivity (includes diagonals)
    EightWay,
}

impl ConnectivityType {
    pub(crate) fn offsets(self) -> &'static [(i32, i32)] {
        match self {
            ConnectivityType::FourWay => &NEIGHBORS_4,
            ConnectivityType::EightWay => &NEIGHBORS_8,
        }
    }
}

/// A connected component of active cells
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectedComponent {
    /// Label in discovery order, starting at 1
    pub label: u32,
    /// Number of cells in this component
    pub pixel_count: u32,
    /// Bounding box of this component
    pub bounds: GridBox,
    /// Mean cell position (x, y)
    pub centroid: (f32, f32),
}

/// Collect the region of cells equal to `value` that contains `seed`
///
/// Cells already marked in `visited` are skipped; every collected cell is
/// marked. The seed must hold `value` and be unvisited.
pub(crate) fn collect_region(
    grid: &BinaryGrid,
    visited: &mut [bool],
    seed: (i32, i32),
    value: bool,
    connectivity: ConnectivityType,
) -> Vec<(i32, i32)> {
    let (w, h) = (grid.width() as i32, grid.height() as i32);
    let mut region = Vec::new();
    let mut stack = vec![seed];
    visited[(seed.1 * w + seed.0) as usize] = true;

    while let Some((x, y)) = stack.pop() {
        region.push((x, y));
        for (dx, dy) in connectivity.offsets() {
            let (nx, ny) = (x + dx, y + dy);
            if nx < 0 || ny < 0 || nx >= w || ny >= h {
                continue;
            }
            let idx = (ny * w + nx) as usize;
            if !visited[idx] && grid.get(nx, ny) == value {
                visited[idx] = true;
                stack.push((nx, ny));
            }
        }
    }
    region
}

/// Bounding box and centroid of a non-empty set of cells
pub(crate) fn measure(cells: &[(i32, i32)]) -> (GridBox, (f32, f32)) {
    let (mut x0, mut y0, mut x1, mut y1) = (i32::MAX, i32::MAX, i32::MIN, i32::MIN);
    let (mut sx, mut sy) = (0.0f32, 0.0f32);
    for &(x, y) in cells {
        x0 = x0.min(x);
        y0 = y0.min(y);
        x1 = x1.max(x);
        y1 = y1.max(y);
        sx += x as f32;
        sy += y as f32;
    }
    let n = cells.len().max(1) as f32;
    (
        GridBox::new(x0 as u32, y0 as u32, (x1 - x0 + 1) as u32, (y1 - y0 + 1) as u32),
        (sx / n, sy / n),
    )
}

/// Find all connected components of active cells
///
/// Components are returned in row-major order of their first cell.
pub fn find_connected_components(
    grid: &BinaryGrid,
    connectivity: ConnectivityType,
) -> Vec<ConnectedComponent> {
    let w = grid.width() as i32;
    let mut visited = vec![false; grid.cells().len()];
    let mut components = Vec::new();

    for (x, y) in grid.active_cells() {
        if visited[(y * w + x) as usize] {
            continue;
        }
        let cells = collect_region(grid, &mut visited, (x, y), true, connectivity);
        let (bounds, centroid) = measure(&cells);
        components.push(ConnectedComponent {
            label: components.len() as u32 + 1,
            pixel_count: cells.len() as u32,
            bounds,
            centroid,
        });
    }
    components
}

/// Number of connected components of active cells
pub fn count_components(grid: &BinaryGrid, connectivity: ConnectivityType) -> usize {
    find_connected_components(grid, connectivity).len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagonal_connectivity() {
        let g = BinaryGrid::from_rows(&["#..", ".#.", "..#"]).unwrap();
        assert_eq!(count_components(&g, ConnectivityType::FourWay), 3);
        assert_eq!(count_components(&g, ConnectivityType::EightWay), 1);
    }

    #[test]
    fn test_component_measurements() {
        let g = BinaryGrid::from_rows(&["##...", "##...", "....#"]).unwrap();
        let comps = find_connected_components(&g, ConnectivityType::FourWay);
        assert_eq!(comps.len(), 2);
        assert_eq!(comps[0].label, 1);
        assert_eq!(comps[0].pixel_count, 4);
        assert_eq!(comps[0].bounds, GridBox::new(0, 0, 2, 2));
        assert_eq!(comps[0].centroid, (0.5, 0.5));
        assert_eq!(comps[1].bounds, GridBox::new(4, 2, 1, 1));
    }

    #[test]
    fn test_empty_grid() {
        let g = BinaryGrid::new(5, 5).unwrap();
        assert!(find_connected_components(&g, ConnectivityType::EightWay).is_empty());
    }
}
