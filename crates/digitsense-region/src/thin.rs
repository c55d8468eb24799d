//! Connectivity-preserving thinning
//!
//! Thinning reduces strokes to one-cell-wide skeletons while keeping their
//! connectivity, so endpoint and junction counts do not depend on how
//! thick the pen was.
//!
//! # Algorithm
//!
//! Two-subiteration parallel thinning (Zhang and Suen, CACM 27(3), 1984).
//! Neighbours are named clockwise from north:
//!
//! ```text
//! P9 P2 P3
//! P8 P1 P4
//! P7 P6 P5
//! ```
//!
//! A cell P1 is deleted when it has 2..=6 active neighbours, exactly one
//! 0 -> 1 transition around the ring, and (first subiteration)
//! `P2*P4*P6 == 0 && P4*P6*P8 == 0` or (second subiteration)
//! `P2*P4*P8 == 0 && P2*P6*P8 == 0`. Subiterations alternate until nothing
//! changes or the iteration limit is reached.

use digitsense_core::BinaryGrid;

/// Ring offsets P2..P9, clockwise from north
const RING: [(i32, i32); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

/// Thin until convergence
pub fn thin_to_skeleton(grid: &BinaryGrid) -> BinaryGrid {
    thin(grid, 0)
}

/// Thin a binary grid
///
/// `max_iters` bounds the number of full iterations (both subiterations);
/// 0 runs until convergence.
pub fn thin(grid: &BinaryGrid, max_iters: u32) -> BinaryGrid {
    let mut current = grid.clone();
    let mut iteration = 0;
    loop {
        let removed_first = thin_pass(&mut current, true);
        let removed_second = thin_pass(&mut current, false);
        iteration += 1;
        if removed_first + removed_second == 0 || (max_iters > 0 && iteration >= max_iters) {
            break;
        }
    }
    current
}

/// One subiteration; returns the number of deleted cells
fn thin_pass(grid: &mut BinaryGrid, first: bool) -> usize {
    let deletions: Vec<(i32, i32)> = grid
        .active_cells()
        .filter(|&(x, y)| is_deletable(grid, x, y, first))
        .collect();
    for &(x, y) in &deletions {
        grid.set(x, y, false);
    }
    deletions.len()
}

fn is_deletable(grid: &BinaryGrid, x: i32, y: i32, first: bool) -> bool {
    let p = RING.map(|(dx, dy)| grid.get(x + dx, y + dy));
    let active = p.iter().filter(|&&v| v).count();
    if !(2..=6).contains(&active) {
        return false;
    }
    let transitions = (0..8).filter(|&i| !p[i] && p[(i + 1) % 8]).count();
    if transitions != 1 {
        return false;
    }
    // p[0]=P2, p[2]=P4, p[4]=P6, p[6]=P8
    let (p2, p4, p6, p8) = (p[0], p[2], p[4], p[6]);
    if first {
        !(p2 && p4 && p6) && !(p4 && p6 && p8)
    } else {
        !(p2 && p4 && p8) && !(p2 && p6 && p8)
    }
}
