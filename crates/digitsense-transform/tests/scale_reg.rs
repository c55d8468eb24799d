//! Crop, fit and downsample regression test
//!
//! Fits small and off-center drawings into the standard padded layout,
//! downsamples them to the 7x7 matching resolution and checks the
//! geometry of the results.

use digitsense_core::{GRID_SIZE, PixelGrid};
use digitsense_test::{RegParams, block_digit, grid_from_art};
use digitsense_transform::{AffineMatrix, crop_and_fit, downsample_gaussian, warp};

#[test]
fn scale_reg_crop_and_fit() {
    let mut rp = RegParams::new("scale_fit");

    // A small "7" drawn in the top-left corner
    let art = grid_from_art(&[
        "#######", "......#", ".....#.", "....#..", "...#...", "...#...", "...#...",
    ]);
    let bbox = art.bounding_box(0.4).expect("ink present");
    rp.compare_values(7.0, bbox.w as f64, 0.0);
    rp.compare_values(7.0, bbox.h as f64, 0.0);

    let fitted = crop_and_fit(&art, bbox, 20, GRID_SIZE).expect("crop_and_fit");
    rp.compare_values(GRID_SIZE as f64, fitted.width() as f64, 0.0);
    let fitted_box = fitted.bounding_box(0.4).expect("ink after fit");
    rp.compare_values(20.0, fitted_box.longer_side() as f64, 1.0);
    let (cx, cy) = fitted_box.center();
    rp.compare_values(14.0, cx as f64, 1.0);
    rp.compare_values(14.0, cy as f64, 1.0);
    rp.write_grid_and_check(&fitted).expect("write fitted");

    // A tall narrow bar keeps its aspect ratio
    let bar = grid_from_art(&[
        "", "", "", "", "", "", "", "", "", "", "..........##", "..........##",
        "..........##", "..........##", "..........##", "..........##", "..........##",
        "..........##",
    ]);
    let bbox = bar.bounding_box(0.4).expect("bar present");
    let fitted = crop_and_fit(&bar, bbox, 20, GRID_SIZE).expect("crop_and_fit bar");
    let fitted_box = fitted.bounding_box(0.4).expect("bar after fit");
    rp.compare_values(20.0, fitted_box.h as f64, 1.0);
    rp.compare_values(5.0, fitted_box.w as f64, 1.0);

    assert!(rp.cleanup(), "scale_fit regression test failed");
}

#[test]
fn scale_reg_downsample() {
    let mut rp = RegParams::new("scale_down");

    for digit in 0..10 {
        let grid = block_digit(digit, 3);
        let small = downsample_gaussian(&grid, 7, 7).expect("downsample");
        rp.compare_values(7.0, small.width() as f64, 0.0);
        // Block digits are drawn from 7x7 templates with 3-cell blocks, so the
        // downsampled grid keeps substantial ink
        rp.check(small.count_above(0.3) >= 5, "downsampled ink survives");
    }

    let empty = downsample_gaussian(&PixelGrid::standard(), 7, 7).expect("downsample empty");
    rp.compare_values(0.0, empty.sum() as f64, 0.0);

    assert!(rp.cleanup(), "scale_down regression test failed");
}

#[test]
fn scale_reg_warp_identity() {
    let mut rp = RegParams::new("scale_warp");

    let grid = block_digit(8, 3);
    let same = warp(&grid, &AffineMatrix::identity(), GRID_SIZE, GRID_SIZE).expect("warp");
    rp.compare_grids(&grid, &same, 1e-6);

    let m = AffineMatrix::rotation(0.2).then(&AffineMatrix::translation(2.0, 1.0));
    let inv = m.inverse().expect("invertible");
    let there = warp(&grid, &inv, GRID_SIZE, GRID_SIZE).expect("warp forward");
    let back = warp(&there, &m, GRID_SIZE, GRID_SIZE).expect("warp back");
    // Two bilinear passes blur edges but keep the overall ink
    let diff = grid.mean_abs_diff(&back).expect("same size");
    rp.check(diff < 0.15, "rotation round trip stays close");

    assert!(rp.cleanup(), "scale_warp regression test failed");
}
