//! Cropping, fitting and downsampling
//!
//! - [`crop`] extracts a rectangle of a grid
//! - [`crop_and_fit`] crops a bounding box and rescales it uniformly so its
//!   longer side spans a target length, centered in a square output
//! - [`downsample_gaussian`] reduces a grid by Gaussian-weighted area
//!   averaging, which keeps thin strokes from vanishing the way point
//!   sampling would
//! - [`fit_binary`] fits a small bitmap of any shape into an N x N bitmap

use crate::interp::sample_bilinear;
use crate::{TransformError, TransformResult};
use digitsense_core::{BinaryGrid, GridBox, PixelGrid};

/// Extract the rectangle `region` of `src`
///
/// Parts of the rectangle outside `src` read as zero.
pub fn crop(src: &PixelGrid, region: GridBox) -> TransformResult<PixelGrid> {
    let grid = PixelGrid::from_fn(region.w, region.h, |x, y| {
        src.value_or_zero((region.x + x) as i32, (region.y + y) as i32)
    })?;
    Ok(grid)
}

/// Crop `region` from `src` and fit it into an `out_size` x `out_size` grid
///
/// The longer side of the region is scaled to `target` cells and the result
/// is centered. Sampling uses the pixel-center convention: output cell `i`
/// covers `[i, i + 1)` and reads the source at the matching center.
///
/// # Errors
///
/// Returns an error if `target` is zero or larger than `out_size`, or if the
/// region is empty.
pub fn crop_and_fit(
    src: &PixelGrid,
    region: GridBox,
    target: u32,
    out_size: u32,
) -> TransformResult<PixelGrid> {
    if target == 0 || target > out_size {
        return Err(TransformError::InvalidParameters(format!(
            "target size {target} must be in 1..={out_size}"
        )));
    }
    let cropped = crop(src, region)?;
    let scale = target as f32 / region.longer_side() as f32;
    let fitted_w = region.w as f32 * scale;
    let fitted_h = region.h as f32 * scale;
    let origin_x = (out_size as f32 - fitted_w) / 2.0;
    let origin_y = (out_size as f32 - fitted_h) / 2.0;

    let grid = PixelGrid::from_fn(out_size, out_size, |x, y| {
        let sx = (x as f32 + 0.5 - origin_x) / scale - 0.5;
        let sy = (y as f32 + 0.5 - origin_y) / scale - 0.5;
        sample_bilinear(&cropped, sx, sy)
    })?;
    Ok(grid)
}

/// Downsample by Gaussian-weighted area averaging
///
/// Each output cell averages the source cells within one cell footprint of
/// its center, weighted by a Gaussian whose sigma is half the footprint.
///
/// # Errors
///
/// Returns an error if the output is empty or larger than the source.
pub fn downsample_gaussian(
    src: &PixelGrid,
    out_width: u32,
    out_height: u32,
) -> TransformResult<PixelGrid> {
    if out_width == 0 || out_height == 0 {
        return Err(TransformError::InvalidScaleFactor(format!(
            "output size {out_width}x{out_height} is empty"
        )));
    }
    if out_width > src.width() || out_height > src.height() {
        return Err(TransformError::InvalidScaleFactor(format!(
            "cannot downsample {}x{} to {out_width}x{out_height}",
            src.width(),
            src.height()
        )));
    }

    let fx = src.width() as f32 / out_width as f32;
    let fy = src.height() as f32 / out_height as f32;
    let sigma_x = fx / 2.0;
    let sigma_y = fy / 2.0;

    let grid = PixelGrid::from_fn(out_width, out_height, |ox, oy| {
        let cx = (ox as f32 + 0.5) * fx - 0.5;
        let cy = (oy as f32 + 0.5) * fy - 0.5;
        let x0 = (cx - fx).floor().max(0.0) as u32;
        let x1 = ((cx + fx).ceil() as u32).min(src.width() - 1);
        let y0 = (cy - fy).floor().max(0.0) as u32;
        let y1 = ((cy + fy).ceil() as u32).min(src.height() - 1);

        let mut acc = 0.0;
        let mut weight_sum = 0.0;
        for sy in y0..=y1 {
            let dy = (sy as f32 - cy) / sigma_y;
            for sx in x0..=x1 {
                let dx = (sx as f32 - cx) / sigma_x;
                let w = (-0.5 * (dx * dx + dy * dy)).exp();
                acc += w * src.value_or_zero(sx as i32, sy as i32);
                weight_sum += w;
            }
        }
        if weight_sum > 0.0 {
            acc / weight_sum
        } else {
            0.0
        }
    })?;
    Ok(grid)
}

/// Fit a bitmap into a `size` x `size` bitmap
///
/// The longer side is scaled to `size`, aspect ratio is preserved and the
/// result is centered. Nearest-neighbour sampling keeps cells crisp.
pub fn fit_binary(bitmap: &BinaryGrid, size: u32) -> TransformResult<BinaryGrid> {
    if size == 0 {
        return Err(TransformError::InvalidScaleFactor(
            "fit size must be positive".to_string(),
        ));
    }
    let (w, h) = bitmap.dimensions();
    let scale = size as f32 / w.max(h) as f32;
    let fitted_w = ((w as f32 * scale).round() as u32).clamp(1, size);
    let fitted_h = ((h as f32 * scale).round() as u32).clamp(1, size);
    let origin_x = (size - fitted_w) / 2;
    let origin_y = (size - fitted_h) / 2;

    let mut out = BinaryGrid::new(size, size)?;
    for y in 0..fitted_h {
        let sy = (((y as f32 + 0.5) / scale) as u32).min(h - 1);
        for x in 0..fitted_w {
            let sx = (((x as f32 + 0.5) / scale) as u32).min(w - 1);
            if bitmap.get(sx as i32, sy as i32) {
                out.set((origin_x + x) as i32, (origin_y + y) as i32, true);
            }
        }
    }
    Ok(out)
}
