//! digitsense-test - Regression test framework for digitsense
//!
//! Supports three modes, selected with the `REGTEST_MODE` environment
//! variable:
//!
//! - **Generate**: Create golden files for comparison
//! - **Compare**: Compare results with golden files (default)
//! - **Display**: Run tests without comparison (visual inspection)
//!
//! # Usage
//!
//! ```ignore
//! use digitsense_test::RegParams;
//!
//! let mut rp = RegParams::new("holes");
//! rp.compare_values(2.0, holes as f64, 0.0);
//! assert!(rp.cleanup());
//! ```

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

use digitsense_core::{Digit, PixelGrid};

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // digitsense-test is at crates/digitsense-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the golden files directory
pub fn golden_dir() -> String {
    format!("{}/tests/golden", workspace_root())
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}

/// Draw a canonical catalog template into a standard 28x28 grid
///
/// Each template cell becomes a `cell` x `cell` block of full ink, with the
/// template centered on the grid. Useful for building crisp test inputs
/// without going through the synthetic renderer.
pub fn block_digit(digit: usize, cell: u32) -> PixelGrid {
    let template = digitsense_core::canonical(Digit::from_index(digit));
    let mut grid = PixelGrid::standard();
    let (tw, th) = (template.width() * cell, template.height() * cell);
    let x0 = (grid.width().saturating_sub(tw)) / 2;
    let y0 = (grid.height().saturating_sub(th)) / 2;
    for y in 0..th {
        for x in 0..tw {
            if template.bitmap().get((x / cell) as i32, (y / cell) as i32) {
                let _ = grid.set_pixel(x0 + x, y0 + y, 1.0);
            }
        }
    }
    grid
}

/// Build a standard grid from 28 rows of `'#'`/`'.'`-style art
///
/// Shorter inputs are placed at the top-left; any character other than `'#'`
/// is background.
pub fn grid_from_art(rows: &[&str]) -> PixelGrid {
    let mut grid = PixelGrid::standard();
    for (y, row) in rows.iter().enumerate().take(grid.height() as usize) {
        for (x, c) in row.chars().enumerate().take(grid.width() as usize) {
            if c == '#' {
                let _ = grid.set_pixel(x as u32, y as u32, 1.0);
            }
        }
    }
    grid
}
