//! Feature extraction regression test
//!
//! Checks hole counts, mirror symmetry and the stroke detectors on
//! block-drawn digits and hand-drawn shapes. Hooks and crossings are
//! checked on raw and normalized drawings.

use digitsense_core::PixelGrid;
use digitsense_recog::features::{FeatureOptions, FeatureRecord, extract_features};
use digitsense_recog::{PreprocessOptions, preprocess};
use digitsense_test::{RegParams, block_digit, grid_from_art};

fn features(grid: &PixelGrid) -> FeatureRecord {
    extract_features(grid, &FeatureOptions::default()).expect("extract features")
}

#[test]
fn features_reg_holes() {
    let mut rp = RegParams::new("features_holes");

    rp.compare_values(1.0, features(&block_digit(0, 3)).holes as f64, 0.0);
    rp.compare_values(2.0, features(&block_digit(8, 3)).holes as f64, 0.0);
    rp.compare_values(0.0, features(&block_digit(7, 3)).holes as f64, 0.0);

    // The loop survives normalization
    let normalized =
        preprocess(&block_digit(0, 3), &PreprocessOptions::default()).expect("preprocess");
    rp.compare_values(1.0, features(&normalized).holes as f64, 0.0);
    rp.write_grid_and_check(&normalized).expect("write normalized zero");

    // Six keeps its loop low, nine high
    let six = features(&block_digit(6, 3));
    let nine = features(&block_digit(9, 3));
    rp.compare_values(1.0, six.holes as f64, 0.0);
    rp.compare_values(1.0, nine.holes as f64, 0.0);
    rp.check(six.hole_position > 0.5, "six hole in lower half");
    rp.check(nine.hole_position < 0.5, "nine hole in upper half");

    assert!(rp.cleanup(), "features_holes regression test failed");
}

#[test]
fn features_reg_symmetry() {
    let mut rp = RegParams::new("features_symmetry");

    for digit in [2, 4, 7] {
        let grid = block_digit(digit, 3);
        let mirrored = grid.mirrored();
        let symmetric = PixelGrid::from_fn(28, 28, |x, y| {
            let a = grid.get_pixel(x, y).unwrap_or(0.0);
            let b = mirrored.get_pixel(x, y).unwrap_or(0.0);
            a.max(b)
        })
        .expect("symmetric grid");
        rp.compare_values(1.0, features(&symmetric).symmetry as f64, 0.0);
    }

    let seven = features(&block_digit(7, 3));
    rp.check(seven.symmetry < 1.0, "seven is not mirror symmetric");

    assert!(rp.cleanup(), "features_symmetry regression test failed");
}

#[test]
fn features_reg_strokes() {
    let mut rp = RegParams::new("features_strokes");

    // A plus sign: one horizontal and one vertical line crossing
    let mut rows = vec![""; 4];
    let vertical = "..............#";
    rows.extend(std::iter::repeat_n(vertical, 9));
    rows.push("....####################");
    rows.extend(std::iter::repeat_n(vertical, 9));
    let plus = grid_from_art(&rows);
    rp.write_grid_and_check(&plus).expect("write plus");

    let record = features(&plus);
    rp.compare_values(0.0, record.holes as f64, 0.0);
    rp.compare_values(1.0, record.components as f64, 0.0);
    rp.compare_values(1.0, record.horizontal_lines as f64, 0.0);
    rp.compare_values(1.0, record.vertical_lines as f64, 0.0);
    rp.compare_values(1.0, record.crossings as f64, 0.0);
    rp.compare_values(4.0, record.endpoints as f64, 0.0);
    rp.check(!record.closed_loop, "plus is not a loop");

    // The canonical seven has a hook and a diagonal
    let seven = features(&block_digit(7, 3));
    rp.check(seven.has_hook, "seven has a hook");
    rp.check(seven.diagonals >= 1, "seven has a diagonal");
    rp.check(seven.heavy_top, "seven is top heavy");

    // The ring closes a loop
    let zero = features(&block_digit(0, 3));
    rp.check(zero.closed_loop, "zero is a closed loop");

    assert!(rp.cleanup(), "features_strokes regression test failed");
}

#[test]
fn features_reg_hooks() {
    let mut rp = RegParams::new("features_hooks");
    let options = PreprocessOptions::default();

    let cases = [(1, false), (4, false), (5, false), (6, false), (2, true), (7, true)];
    for (digit, expected) in cases {
        let raw = block_digit(digit, 3);
        let normalized = preprocess(&raw, &options).expect("preprocess");
        rp.check(
            features(&raw).has_hook == expected,
            &format!("raw {digit} hook is {expected}"),
        );
        rp.check(
            features(&normalized).has_hook == expected,
            &format!("normalized {digit} hook is {expected}"),
        );
    }

    assert!(rp.cleanup(), "features_hooks regression test failed");
}

#[test]
fn features_reg_crossings() {
    let mut rp = RegParams::new("features_crossings");
    let options = PreprocessOptions::default();

    // The bar of a four meets its stem; an eight pinches twice
    let four = preprocess(&block_digit(4, 3), &options).expect("preprocess four");
    rp.check(features(&four).crossings >= 1, "four has a crossing");
    let eight = preprocess(&block_digit(8, 3), &options).expect("preprocess eight");
    rp.compare_values(2.0, features(&eight).crossings as f64, 0.0);

    // Open strokes have none
    for digit in [0, 5, 7] {
        let normalized = preprocess(&block_digit(digit, 3), &options).expect("preprocess");
        rp.compare_values(0.0, features(&normalized).crossings as f64, 0.0);
    }

    assert!(rp.cleanup(), "features_crossings regression test failed");
}
