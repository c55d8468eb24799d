//! Regression test parameters and operations

use crate::error::{TestError, TestResult};
use crate::{golden_dir, regout_dir};
use digitsense_core::PixelGrid;
use std::fs;
use std::io::BufWriter;
use std::path::Path;

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Generate golden files
    Generate,
    /// Compare with golden files (default)
    #[default]
    Compare,
    /// Display mode - run without comparison
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        match std::env::var("REGTEST_MODE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "generate" => Self::Generate,
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// Tracks the test name, current index, mode, and success status.
pub struct RegParams {
    /// Name of the test (e.g., "holes")
    pub test_name: String,
    /// Current test index (incremented before each check)
    index: usize,
    /// Test mode (generate, compare, or display)
    pub mode: RegTestMode,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// The mode comes from the `REGTEST_MODE` environment variable.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();

        let _ = fs::create_dir_all(golden_dir());
        let _ = fs::create_dir_all(regout_dir());

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    fn record_failure(&mut self, msg: String) {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
    }

    /// Compare two floating-point values
    ///
    /// Returns `true` if `|expected - actual| <= delta`.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta {
            let err = TestError::ValueMismatch {
                index: self.index,
                expected,
                actual,
                delta,
            };
            self.record_failure(format!("Failure in {}_reg: {}", self.test_name, err));
            false
        } else {
            true
        }
    }

    /// Compare a boolean condition, recorded like a value comparison
    pub fn check(&mut self, condition: bool, what: &str) -> bool {
        self.index += 1;
        if !condition {
            self.record_failure(format!(
                "Failure in {}_reg: check for index {} failed: {}",
                self.test_name, self.index, what
            ));
        }
        condition
    }

    /// Compare two grids cell by cell
    ///
    /// Returns `true` if the dimensions agree and every cell differs by at
    /// most `delta`.
    pub fn compare_grids(&mut self, grid1: &PixelGrid, grid2: &PixelGrid, delta: f32) -> bool {
        self.index += 1;

        if grid1.dimensions() != grid2.dimensions() {
            let msg = format!(
                "Failure in {}_reg: grid comparison for index {} - dimension mismatch {:?} vs {:?}",
                self.test_name,
                self.index,
                grid1.dimensions(),
                grid2.dimensions()
            );
            self.record_failure(msg);
            return false;
        }

        let width = grid1.width() as usize;
        for (i, (a, b)) in grid1.data().iter().zip(grid2.data()).enumerate() {
            if (a - b).abs() > delta {
                let err = TestError::GridMismatch { index: self.index };
                let msg = format!(
                    "Failure in {}_reg: {} - value mismatch at ({}, {}): {} vs {}",
                    self.test_name,
                    err,
                    i % width,
                    i / width,
                    a,
                    b
                );
                self.record_failure(msg);
                return false;
            }
        }

        true
    }

    /// Write a grid as an 8-bit grayscale PNG and check against golden
    ///
    /// Ink is drawn dark on a light background so the files read like the
    /// hand drawings.
    pub fn write_grid_and_check(&mut self, grid: &PixelGrid) -> TestResult<()> {
        self.index += 1;

        let local_path = format!(
            "{}/{}.{:02}.png",
            regout_dir(),
            self.test_name,
            self.index
        );

        write_grid_png(grid, &local_path)?;
        self.check_file(&local_path)
    }

    /// Check a file against its golden counterpart
    ///
    /// In generate mode, copies the file to golden.
    /// In compare mode, compares bytes with the golden file; a missing
    /// golden file is reported and skipped.
    /// In display mode, does nothing.
    fn check_file(&mut self, local_path: &str) -> TestResult<()> {
        let ext = Path::new(local_path)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");

        let golden_path = format!(
            "{}/{}_golden.{:02}.{}",
            golden_dir(),
            self.test_name,
            self.index,
            ext
        );

        match self.mode {
            RegTestMode::Generate => {
                fs::copy(local_path, &golden_path)?;
                eprintln!("Generated: {}", golden_path);
            }
            RegTestMode::Compare => {
                if !Path::new(&golden_path).exists() {
                    eprintln!(
                        "{}_reg: no golden file for index {} ({}), skipping",
                        self.test_name, self.index, golden_path
                    );
                    return Ok(());
                }

                let local_data = fs::read(local_path)?;
                let golden_data = fs::read(&golden_path)?;

                if local_data != golden_data {
                    let msg = format!(
                        "Failure in {}_reg, index {}: comparing {} with {}",
                        self.test_name, self.index, local_path, golden_path
                    );
                    self.record_failure(msg);
                }
            }
            RegTestMode::Display => {}
        }

        Ok(())
    }

    /// Clean up and report results
    ///
    /// Returns `true` if all checks passed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all tests have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

/// Encode a grid as an 8-bit grayscale PNG (ink dark, background light)
fn write_grid_png(grid: &PixelGrid, path: &str) -> TestResult<()> {
    let file = fs::File::create(path)?;
    let writer = BufWriter::new(file);

    let mut encoder = png::Encoder::new(writer, grid.width(), grid.height());
    encoder.set_color(png::ColorType::Grayscale);
    encoder.set_depth(png::BitDepth::Eight);

    let bytes: Vec<u8> = grid
        .data()
        .iter()
        .map(|v| 255 - (v.clamp(0.0, 1.0) * 255.0 + 0.5) as u8)
        .collect();

    let to_err = |e: png::EncodingError| TestError::ImageWrite {
        path: path.to_string(),
        message: e.to_string(),
    };
    let mut png_writer = encoder.write_header().map_err(to_err)?;
    png_writer.write_image_data(&bytes).map_err(to_err)?;
    png_writer.finish().map_err(to_err)?;
    Ok(())
}
