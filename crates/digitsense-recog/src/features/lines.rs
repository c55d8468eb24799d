//! Straight-stroke detectors
//!
//! Rows, columns and diagonals are scanned for long active runs. A thick
//! stroke makes several neighbouring rows qualify, so adjacent qualifying
//! scan lines are merged into one band and each band counts as one line.

use digitsense_core::BinaryGrid;

/// Row or column scan direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Longest run in one row or column
///
/// With `tolerance`, a cell also counts when either perpendicular
/// neighbour is active, so slightly wavy strokes still form one run.
pub fn longest_run(grid: &BinaryGrid, axis: Axis, index: i32, tolerance: bool) -> usize {
    let len = match axis {
        Axis::Horizontal => grid.width(),
        Axis::Vertical => grid.height(),
    } as i32;
    let active = |i: i32| -> bool {
        let (x, y, px, py) = match axis {
            Axis::Horizontal => (i, index, 0, 1),
            Axis::Vertical => (index, i, 1, 0),
        };
        grid.get(x, y) || (tolerance && (grid.get(x - px, y - py) || grid.get(x + px, y + py)))
    };

    let mut best = 0;
    let mut run = 0;
    for i in 0..len {
        if active(i) {
            run += 1;
            best = best.max(run);
        } else {
            run = 0;
        }
    }
    best
}

/// Number of bands of adjacent qualifying flags
fn count_bands(flags: impl Iterator<Item = bool>) -> usize {
    let mut bands = 0;
    let mut inside = false;
    for flag in flags {
        if flag && !inside {
            bands += 1;
        }
        inside = flag;
    }
    bands
}

/// Number of lines along `axis` whose tolerant run exceeds `fraction` of
/// the grid size
pub fn count_lines(grid: &BinaryGrid, axis: Axis, fraction: f32) -> usize {
    let (scan_count, run_span) = match axis {
        Axis::Horizontal => (grid.height(), grid.width()),
        Axis::Vertical => (grid.width(), grid.height()),
    };
    let min_run = fraction * run_span as f32;
    count_bands(
        (0..scan_count as i32).map(|i| longest_run(grid, axis, i, true) as f32 > min_run),
    )
}

/// Longest run along one diagonal
///
/// `falling` diagonals satisfy `x - y == offset`, rising ones
/// `x + y == offset`.
fn diagonal_run(grid: &BinaryGrid, offset: i32, falling: bool) -> usize {
    let (w, h) = (grid.width() as i32, grid.height() as i32);
    let mut best = 0;
    let mut run = 0;
    for y in 0..h {
        let x = if falling { offset + y } else { offset - y };
        if x < 0 || x >= w {
            run = 0;
            continue;
        }
        if grid.get(x, y) {
            run += 1;
            best = best.max(run);
        } else {
            run = 0;
        }
    }
    best
}

/// Number of diagonal strokes longer than `fraction` of the grid size
///
/// Both orientations are scanned and adjacent qualifying diagonals merge.
/// The total is capped at `cap`.
pub fn count_diagonals(grid: &BinaryGrid, fraction: f32, cap: usize) -> usize {
    let (w, h) = (grid.width() as i32, grid.height() as i32);
    let size = w.max(h) as f32;
    let min_run = fraction * size;

    let falling = count_bands(
        (-(h - 1)..w).map(|offset| diagonal_run(grid, offset, true) as f32 > min_run),
    );
    let rising = count_bands(
        (0..w + h - 1).map(|offset| diagonal_run(grid, offset, false) as f32 > min_run),
    );
    (falling + rising).min(cap)
}

/// Longest unbroken vertical and horizontal runs, as fractions of the
/// grid height and width
pub fn continuous_lengths(grid: &BinaryGrid) -> (f32, f32) {
    let vertical = (0..grid.width() as i32)
        .map(|x| longest_run(grid, Axis::Vertical, x, false))
        .max()
        .unwrap_or(0);
    let horizontal = (0..grid.height() as i32)
        .map(|y| longest_run(grid, Axis::Horizontal, y, false))
        .max()
        .unwrap_or(0);
    (
        vertical as f32 / grid.height() as f32,
        horizontal as f32 / grid.width() as f32,
    )
}

/// Cells a descending stroke may slide left within one row
const MAX_SLIDE: i32 = 3;

/// Fraction of the ink height searched for the top stroke
const TOP_BAND_FRACTION: f32 = 0.25;

/// Whether a top stroke turns down at its right end
///
/// Only the first rows of the ink bounding box are searched, and only the
/// first row holding a horizontal run at least `fraction` of the width
/// decides. The descent starts below the bar's bottom edge, from the
/// rightmost cell under the run's right half, so the bar's own thickness
/// never counts. The pattern is a hook when the stroke drops at least
/// `fraction` of the height.
pub fn has_hook(grid: &BinaryGrid, fraction: f32) -> bool {
    let Some(ink) = grid.bounding_box() else {
        return false;
    };
    let (w, h) = (grid.width() as i32, grid.height() as i32);
    let min_run = (fraction * w as f32).ceil() as i32;
    let min_descent = (fraction * h as f32).ceil() as i32;
    let band = ((TOP_BAND_FRACTION * ink.h as f32).ceil() as i32).max(2);
    let top = ink.y as i32;

    for y in top..(top + band).min(h) {
        let mut found_bar = false;
        let mut run = 0;
        for x in 0..=w {
            if x < w && grid.get(x, y) {
                run += 1;
                continue;
            }
            if run >= min_run {
                found_bar = true;
                if turns_down(grid, x - run, x - 1, y, min_descent) {
                    return true;
                }
            }
            run = 0;
        }
        if found_bar {
            return false;
        }
    }
    false
}

/// Whether the bar spanning `start..=end` on row `y` continues into a
/// descending stroke on its right
fn turns_down(grid: &BinaryGrid, start: i32, end: i32, y: i32, min_descent: i32) -> bool {
    let middle = (start + end) / 2;
    let mut bottom = y;
    while grid.get(middle, bottom + 1) {
        bottom += 1;
    }
    let below = bottom + 1;
    ((middle + 1)..=(end + 1))
        .rev()
        .find(|&x| grid.get(x, below))
        .is_some_and(|x| 1 + descent(grid, x, below) >= min_descent)
}

/// Rows a stroke descends from (x, y)
///
/// Moves down or down-left. A thick diagonal steps sideways at its edge,
/// so up to [`MAX_SLIDE`] cells of leftward travel within a row are
/// allowed before the next row must continue the stroke.
fn descent(grid: &BinaryGrid, mut x: i32, mut y: i32) -> i32 {
    let mut steps = 0;
    let mut slides = 0;
    loop {
        if grid.get(x, y + 1) {
            y += 1;
        } else if grid.get(x - 1, y + 1) {
            x -= 1;
            y += 1;
        } else if slides < MAX_SLIDE && grid.get(x - 1, y) {
            x -= 1;
            slides += 1;
            continue;
        } else {
            return steps;
        }
        steps += 1;
        slides = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seven() -> BinaryGrid {
        BinaryGrid::from_rows(&[
            "..........",
            ".########.",
            ".......#..",
            "......#...",
            ".....#....",
            "....#.....",
            "...#......",
            "..#.......",
            "..........",
            "..........",
        ])
        .unwrap()
    }

    #[test]
    fn test_longest_run_with_tolerance() {
        let g = BinaryGrid::from_rows(&["##.##", "..#..", "....."]).unwrap();
        assert_eq!(longest_run(&g, Axis::Horizontal, 0, false), 2);
        assert_eq!(longest_run(&g, Axis::Horizontal, 0, true), 5);
    }

    #[test]
    fn test_thick_line_is_one_band() {
        let g = BinaryGrid::from_rows(&[
            "......", "######", "######", "......", "......", "......",
        ])
        .unwrap();
        assert_eq!(count_lines(&g, Axis::Horizontal, 0.45), 1);
        assert_eq!(count_lines(&g, Axis::Vertical, 0.45), 0);
    }

    #[test]
    fn test_diagonal_detection() {
        let g = seven();
        assert_eq!(count_diagonals(&g, 0.4, 4), 1);
        let empty = BinaryGrid::new(10, 10).unwrap();
        assert_eq!(count_diagonals(&empty, 0.4, 4), 0);
    }

    #[test]
    fn test_hook() {
        assert!(has_hook(&seven(), 0.25));
        let bar = BinaryGrid::from_rows(&["........", "#######.", "........", "........"]).unwrap();
        assert!(!has_hook(&bar, 0.25));
        // A top bar continued down the left side is not a hook
        let five = BinaryGrid::from_rows(&[
            "########", "#.......", "#.......", "#.......", "........", "........", "........",
            "........",
        ])
        .unwrap();
        assert!(!has_hook(&five, 0.25));
    }

    #[test]
    fn test_thick_bar_is_not_a_hook() {
        // The bar's own rows must not count as a descent
        let bar = BinaryGrid::from_rows(&[
            "..........", ".########.", ".########.", ".########.", "..........", "..........",
            "..........", "..........", "..........", "..........",
        ])
        .unwrap();
        assert!(!has_hook(&bar, 0.25));
    }

    #[test]
    fn test_stem_below_bar_is_not_a_hook() {
        // A stroke hanging from the middle of a top bar reads as 1 or T
        let tee = BinaryGrid::from_rows(&[
            "..........", ".#######..", "....#.....", "....#.....", "....#.....", "....#.....",
            "....#.....", "....#.....", "..........", "..........",
        ])
        .unwrap();
        assert!(!has_hook(&tee, 0.25));
    }

    #[test]
    fn test_lower_bar_is_ignored() {
        // The open 4: only the top of the ink is searched
        let four = BinaryGrid::from_rows(&[
            "..........", ".#....#...", ".#....#...", ".#....#...", ".#######..", "......#...",
            "......#...", "......#...", "......#...", "..........",
        ])
        .unwrap();
        assert!(!has_hook(&four, 0.25));
    }

    #[test]
    fn test_continuous_lengths() {
        let (v, h) = continuous_lengths(&seven());
        assert!((h - 0.8).abs() < 1e-6);
        assert!((v - 0.2).abs() < 1e-6);
    }
}
