//! Mass distribution and outline measurements

use digitsense_core::{BinaryGrid, EPSILON};

/// Mean activity within one of the four border bands, per side and combined
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EdgeDensity {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
    /// Mean of the four bands
    pub combined: f32,
}

/// Fraction of active cells in the rectangle `[x0, x1) x [y0, y1)`
fn rect_density(grid: &BinaryGrid, x0: i32, y0: i32, x1: i32, y1: i32) -> f32 {
    let area = ((x1 - x0).max(0) * (y1 - y0).max(0)) as f32;
    if area < 1.0 {
        return 0.0;
    }
    let mut active = 0;
    for y in y0..y1 {
        for x in x0..x1 {
            if grid.get(x, y) {
                active += 1;
            }
        }
    }
    active as f32 / area
}

/// Left-right mirror agreement
///
/// Measured over the cells where the cell or its mirror is active: the
/// fraction of those whose mirror agrees. A grid without ink is perfectly
/// symmetric.
pub fn symmetry(grid: &BinaryGrid) -> f32 {
    let (w, h) = (grid.width() as i32, grid.height() as i32);
    let mut union = 0;
    let mut matches = 0;
    for y in 0..h {
        for x in 0..w {
            let a = grid.get(x, y);
            let b = grid.get(w - 1 - x, y);
            if a || b {
                union += 1;
                if a == b {
                    matches += 1;
                }
            }
        }
    }
    if union == 0 {
        return 1.0;
    }
    matches as f32 / union as f32
}

/// Mean activity of each cell of a 3x3 partition of the ink bounding box,
/// indexed `[row][column]`
///
/// Partitioning the ink rather than the grid keeps the zones comparable
/// between narrow and wide drawings. A grid without ink has all zones zero.
pub fn zone_densities(grid: &BinaryGrid) -> [[f32; 3]; 3] {
    let mut zones = [[0.0; 3]; 3];
    let Some(ink) = grid.bounding_box() else {
        return zones;
    };
    let (bx, by, bw, bh) = (ink.x as i32, ink.y as i32, ink.w as i32, ink.h as i32);
    for (row, zone_row) in zones.iter_mut().enumerate() {
        let y0 = by + row as i32 * bh / 3;
        let y1 = by + (row as i32 + 1) * bh / 3;
        for (col, zone) in zone_row.iter_mut().enumerate() {
            let x0 = bx + col as i32 * bw / 3;
            let x1 = bx + (col as i32 + 1) * bw / 3;
            *zone = rect_density(grid, x0, y0, x1, y1);
        }
    }
    zones
}

/// Activity within the border bands of width `band`
pub fn edge_density(grid: &BinaryGrid, band: u32) -> EdgeDensity {
    let (w, h) = (grid.width() as i32, grid.height() as i32);
    let band = (band as i32).min(w).min(h);
    let top = rect_density(grid, 0, 0, w, band);
    let bottom = rect_density(grid, 0, h - band, w, h);
    let left = rect_density(grid, 0, 0, band, h);
    let right = rect_density(grid, w - band, 0, w, h);
    EdgeDensity {
        top,
        bottom,
        left,
        right,
        combined: (top + bottom + left + right) / 4.0,
    }
}

/// Activity within a centered `window` x `window` square
pub fn center_density(grid: &BinaryGrid, window: u32) -> f32 {
    let (w, h) = (grid.width() as i32, grid.height() as i32);
    let window = window as i32;
    let x0 = ((w - window) / 2).max(0);
    let y0 = ((h - window) / 2).max(0);
    rect_density(grid, x0, y0, (x0 + window).min(w), (y0 + window).min(h))
}

/// Whether ink runs all the way around the center
///
/// `samples` points are placed on a circle of radius `radius_fraction` of
/// the grid size around the grid center. A point is active when any cell
/// of its 3x3 neighbourhood is; the loop is closed when at least
/// `min_fraction` of the points are active.
pub fn is_closed_loop(
    grid: &BinaryGrid,
    samples: usize,
    radius_fraction: f32,
    min_fraction: f32,
) -> bool {
    if samples == 0 {
        return false;
    }
    let (w, h) = (grid.width() as f32, grid.height() as f32);
    let (cx, cy) = (w / 2.0 - 0.5, h / 2.0 - 0.5);
    let radius = radius_fraction * w.min(h);

    let active = (0..samples)
        .filter(|&i| {
            let angle = i as f32 * std::f32::consts::TAU / samples as f32;
            let px = (cx + radius * angle.cos()).round() as i32;
            let py = (cy + radius * angle.sin()).round() as i32;
            (-1..=1).any(|dy| (-1..=1).any(|dx| grid.get(px + dx, py + dy)))
        })
        .count();
    active as f32 >= min_fraction * samples as f32
}

/// Heavy flags for the top, bottom, left and right halves
///
/// A half is heavy when its active count exceeds the opposite half's by
/// more than `ratio`.
pub fn heavy_halves(grid: &BinaryGrid, ratio: f32) -> [bool; 4] {
    let (w, h) = (grid.width() as i32, grid.height() as i32);
    let (mut top, mut bottom, mut left, mut right) = (0.0f32, 0.0f32, 0.0f32, 0.0f32);
    for (x, y) in grid.active_cells() {
        if 2 * y < h {
            top += 1.0;
        } else {
            bottom += 1.0;
        }
        if 2 * x < w {
            left += 1.0;
        } else {
            right += 1.0;
        }
    }
    let heavier = |a: f32, b: f32| a > ratio * b.max(EPSILON);
    [
        heavier(top, bottom),
        heavier(bottom, top),
        heavier(left, right),
        heavier(right, left),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symmetry() {
        let g = BinaryGrid::from_rows(&["#..#", ".##.", "#..#"]).unwrap();
        assert_eq!(symmetry(&g), 1.0);
        let g = BinaryGrid::from_rows(&["#...", "....", "...."]).unwrap();
        assert_eq!(symmetry(&g), 0.0);
        assert_eq!(symmetry(&BinaryGrid::new(3, 3).unwrap()), 1.0);
    }

    #[test]
    fn test_zone_densities() {
        let g = BinaryGrid::from_rows(&[
            "........", ".######.", ".##.....", ".##.....", "........",
        ])
        .unwrap();
        let z = zone_densities(&g);
        assert_eq!(z[0], [1.0, 1.0, 1.0]);
        assert_eq!(z[1], [1.0, 0.0, 0.0]);
        assert_eq!(z[2], [1.0, 0.0, 0.0]);

        // Zones follow the ink, not the grid
        let shifted = BinaryGrid::from_rows(&[
            "........", "........", "........", "..######", "..##....", "..##....",
        ])
        .unwrap();
        assert_eq!(zone_densities(&shifted), z);

        let empty = BinaryGrid::new(6, 6).unwrap();
        assert_eq!(zone_densities(&empty), [[0.0; 3]; 3]);
    }

    #[test]
    fn test_edge_and_center() {
        let mut g = BinaryGrid::new(10, 10).unwrap();
        for x in 0..10 {
            g.set(x, 0, true);
        }
        let e = edge_density(&g, 2);
        assert_eq!(e.top, 0.5);
        assert_eq!(e.bottom, 0.0);
        assert!((e.left - 0.1).abs() < 1e-6);
        assert_eq!(center_density(&g, 4), 0.0);
    }

    #[test]
    fn test_closed_loop() {
        let mut ring = BinaryGrid::new(28, 28).unwrap();
        for y in 0..28 {
            for x in 0..28 {
                let d = ((x as f32 - 13.5).powi(2) + (y as f32 - 13.5).powi(2)).sqrt();
                if (7.0..10.0).contains(&d) {
                    ring.set(x, y, true);
                }
            }
        }
        assert!(is_closed_loop(&ring, 32, 0.3, 0.75));
        let mut half = ring.clone();
        for y in 0..28 {
            for x in 0..14 {
                half.set(x, y, false);
            }
        }
        assert!(!is_closed_loop(&half, 32, 0.3, 0.75));
    }

    #[test]
    fn test_heavy_halves() {
        let g = BinaryGrid::from_rows(&["####", "####", "##..", "...."]).unwrap();
        let [top, bottom, left, right] = heavy_halves(&g, 1.25);
        assert!(top);
        assert!(!bottom);
        assert!(left);
        assert!(!right);
    }
}
