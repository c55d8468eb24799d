//! Local averaging filters

use crate::{FilterError, FilterResult};
use digitsense_core::{NEIGHBORS_4, PixelGrid};

/// 3x3 box blur
///
/// Each cell becomes the mean of its 3x3 neighbourhood. At the border only
/// the cells inside the grid are averaged, so edges are not darkened.
pub fn box_blur3(src: &PixelGrid) -> PixelGrid {
    let (w, h) = (src.width() as i32, src.height() as i32);
    let mut out = src.clone();
    let data = out.data_mut();
    for y in 0..h {
        for x in 0..w {
            let mut sum = 0.0;
            let mut count = 0;
            for dy in -1..=1 {
                for dx in -1..=1 {
                    let (nx, ny) = (x + dx, y + dy);
                    if nx >= 0 && ny >= 0 && nx < w && ny < h {
                        sum += src.value_or_zero(nx, ny);
                        count += 1;
                    }
                }
            }
            data[(y * w + x) as usize] = sum / count as f32;
        }
    }
    out
}

/// Blend interior cells towards the mean of their four neighbours
///
/// `v' = v * (1 - weight) + mean4 * weight`. Border cells are copied
/// unchanged.
///
/// # Errors
///
/// Returns `FilterError::InvalidParameters` if `weight` is outside [0, 1].
pub fn neighbor_blend(src: &PixelGrid, weight: f32) -> FilterResult<PixelGrid> {
    if !(0.0..=1.0).contains(&weight) {
        return Err(FilterError::InvalidParameters(format!(
            "blend weight {weight} outside [0, 1]"
        )));
    }
    let (w, h) = (src.width() as i32, src.height() as i32);
    let mut out = src.clone();
    if weight == 0.0 {
        return Ok(out);
    }
    let data = out.data_mut();
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let mean = NEIGHBORS_4
                .iter()
                .map(|(dx, dy)| src.value_or_zero(x + dx, y + dy))
                .sum::<f32>()
                / 4.0;
            let v = src.value_or_zero(x, y);
            data[(y * w + x) as usize] = v * (1.0 - weight) + mean * weight;
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_blur_constant_unchanged() {
        let grid = PixelGrid::new_with_value(5, 5, 0.4).unwrap();
        let out = box_blur3(&grid);
        for v in out.data() {
            assert!((v - 0.4).abs() < 1e-6);
        }
    }

    #[test]
    fn test_box_blur_spreads_point() {
        let mut grid = PixelGrid::new(5, 5).unwrap();
        grid.set_pixel(2, 2, 0.9).unwrap();
        let out = box_blur3(&grid);
        assert!((out.get_pixel(2, 2).unwrap() - 0.1).abs() < 1e-6);
        assert!((out.get_pixel(1, 1).unwrap() - 0.1).abs() < 1e-6);
        assert_eq!(out.get_pixel(0, 0).unwrap(), 0.0);
        assert!((out.sum() - 0.9).abs() < 1e-5);
    }

    #[test]
    fn test_neighbor_blend() {
        let mut grid = PixelGrid::new(3, 3).unwrap();
        grid.set_pixel(1, 0, 1.0).unwrap();
        let out = neighbor_blend(&grid, 0.5).unwrap();
        assert!((out.get_pixel(1, 1).unwrap() - 0.125).abs() < 1e-6);
        // border copied
        assert_eq!(out.get_pixel(1, 0).unwrap(), 1.0);
        assert!(neighbor_blend(&grid, 1.5).is_err());
    }
}
