//! Stroke topology measured on the skeleton
//!
//! Counting endpoints or junctions on raw strokes would report every cell
//! along a thick edge, so these functions expect a thinned grid. Endpoints
//! and junctions use the 8-neighbourhood since thinning leaves diagonal
//! steps.

use digitsense_core::{BinaryGrid, NEIGHBORS_8};

/// Skeleton cells with exactly one active 8-neighbour
pub fn count_endpoints(skeleton: &BinaryGrid) -> usize {
    skeleton
        .active_cells()
        .filter(|&(x, y)| skeleton.count_neighbors_8(x, y) == 1)
        .count()
}

/// Number of stroke segments meeting at a skeleton cell
///
/// Counts background-to-ink transitions around the clockwise 8-ring. A
/// line cell has 2 and a branching cell 3 or more.
fn branch_count(skeleton: &BinaryGrid, x: i32, y: i32) -> usize {
    let ring: Vec<bool> = NEIGHBORS_8
        .iter()
        .map(|(dx, dy)| skeleton.get(x + dx, y + dy))
        .collect();
    (0..ring.len())
        .filter(|&i| !ring[i] && ring[(i + 1) % ring.len()])
        .count()
}

/// Stroke crossings
///
/// A junction is a skeleton cell where three or more segments meet.
/// Thinning leaves a crossing as a small cluster of such cells, so
/// 8-connected junction cells merge and each cluster counts once. T and
/// X shapes both count.
pub fn count_crossings(skeleton: &BinaryGrid) -> usize {
    let (w, h) = skeleton.dimensions();
    let mut junction = vec![false; (w * h) as usize];
    for (x, y) in skeleton.active_cells() {
        if branch_count(skeleton, x, y) >= 3 {
            junction[(y as u32 * w + x as u32) as usize] = true;
        }
    }

    let mut clusters = 0;
    let mut stack = Vec::new();
    for start in 0..junction.len() {
        if !junction[start] {
            continue;
        }
        clusters += 1;
        junction[start] = false;
        stack.push(((start as u32 % w) as i32, (start as u32 / w) as i32));
        while let Some((x, y)) = stack.pop() {
            for (dx, dy) in NEIGHBORS_8 {
                let (nx, ny) = (x + dx, y + dy);
                if nx < 0 || ny < 0 || nx >= w as i32 || ny >= h as i32 {
                    continue;
                }
                let idx = (ny as u32 * w + nx as u32) as usize;
                if junction[idx] {
                    junction[idx] = false;
                    stack.push((nx, ny));
                }
            }
        }
    }
    clusters
}

/// Cells with exactly two active 8-neighbours that are not opposite
pub fn count_corners(skeleton: &BinaryGrid) -> usize {
    skeleton
        .active_cells()
        .filter(|&(x, y)| {
            let active: Vec<usize> = NEIGHBORS_8
                .iter()
                .enumerate()
                .filter(|(_, (dx, dy))| skeleton.get(x + dx, y + dy))
                .map(|(i, _)| i)
                .collect();
            // NEIGHBORS_8 runs clockwise, so opposite offsets are 4 apart
            active.len() == 2 && active[1] - active[0] != 4
        })
        .count()
}

/// Cells where the stroke turns
///
/// Counts cells with 2 or 3 active 8-neighbours whose active 4-neighbours
/// are exactly one horizontal and one vertical, forming an L.
pub fn curvature_index(skeleton: &BinaryGrid) -> usize {
    skeleton
        .active_cells()
        .filter(|&(x, y)| {
            let n8 = skeleton.count_neighbors_8(x, y);
            if !(2..=3).contains(&n8) {
                return false;
            }
            let horizontal =
                usize::from(skeleton.get(x - 1, y)) + usize::from(skeleton.get(x + 1, y));
            let vertical =
                usize::from(skeleton.get(x, y - 1)) + usize::from(skeleton.get(x, y + 1));
            horizontal == 1 && vertical == 1
        })
        .count()
}
