//! Hole detection regression test
//!
//! Counts enclosed background regions of block-drawn digits and of hand
//! drawn shapes with zero, one and two holes.

use digitsense_core::BinaryGrid;
use digitsense_region::{
    ConnectivityType, count_components, count_holes, find_holes, thin_to_skeleton,
};
use digitsense_test::{RegParams, block_digit, grid_from_art};

const BINARY_THRESHOLD: f32 = 0.25;

#[test]
fn holes_reg_block_digits() {
    let mut rp = RegParams::new("holes_digits");

    // Canonical templates: 0, 4, 6, 9 close one loop; 8 closes two
    let expected = [1, 0, 0, 0, 1, 0, 1, 0, 2, 1];
    for (digit, &holes) in expected.iter().enumerate() {
        let binary = block_digit(digit, 3).to_binary(BINARY_THRESHOLD);
        rp.compare_values(holes as f64, count_holes(&binary) as f64, 0.0);
        rp.compare_values(1.0, count_components(&binary, ConnectivityType::EightWay) as f64, 0.0);
    }

    assert!(rp.cleanup(), "holes_digits regression test failed");
}

#[test]
fn holes_reg_drawn_shapes() {
    let mut rp = RegParams::new("holes_shapes");

    let one_hole = grid_from_art(&[
        "", "", "", "", "", "", "",
        "..........########",
        ".........##......##",
        "........##........##",
        "........##........##",
        "........##........##",
        ".........##......##",
        "..........########",
    ]);
    let binary = one_hole.to_binary(BINARY_THRESHOLD);
    rp.compare_values(1.0, count_holes(&binary) as f64, 0.0);
    let holes = find_holes(&binary);
    rp.check(holes[0].area > 20, "large single hole");
    rp.write_grid_and_check(&one_hole).expect("write one hole");

    let two_holes = grid_from_art(&[
        "", "", "", "",
        "..........######",
        ".........##....##",
        ".........##....##",
        "..........######",
        ".........##....##",
        ".........##....##",
        ".........##....##",
        "..........######",
    ]);
    let binary = two_holes.to_binary(BINARY_THRESHOLD);
    let holes = find_holes(&binary);
    rp.compare_values(2.0, holes.len() as f64, 0.0);
    // Upper hole first, centered above the lower one
    rp.check(holes[0].centroid.1 < holes[1].centroid.1, "holes ordered top to bottom");
    rp.write_grid_and_check(&two_holes).expect("write two holes");

    // Thinning keeps both loops
    let skeleton = thin_to_skeleton(&binary);
    rp.compare_values(2.0, count_holes(&skeleton) as f64, 0.0);

    let open = BinaryGrid::from_rows(&["#####", "#....", "#####", "....#", "#####"])
        .expect("valid rows");
    rp.compare_values(0.0, count_holes(&open) as f64, 0.0);

    assert!(rp.cleanup(), "holes_shapes regression test failed");
}
