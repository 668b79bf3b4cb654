//! Percentage-based cropping

use crate::scale::scale_resolution;
use crate::{TransformError, TransformResult};
use bmpkit_core::{Bitmap, PixelBuffer};

/// Crop window in percent of the source extents.
///
/// Columns `x1..x2` and rows `y1..y2`, each bound in `[0, 100]` with
/// `x1 < x2` and `y1 < y2`. Rows count in matrix order, from the first
/// row stored in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    x1: u32,
    y1: u32,
    x2: u32,
    y2: u32,
}

impl CropRect {
    /// Validate and build a crop window.
    pub fn new(x1: u32, y1: u32, x2: u32, y2: u32) -> TransformResult<Self> {
        if x2 > 100 || y2 > 100 {
            return Err(TransformError::InvalidParameters(format!(
                "crop bounds ({x1}, {y1})-({x2}, {y2}) exceed 100%"
            )));
        }
        if x1 >= x2 || y1 >= y2 {
            return Err(TransformError::InvalidParameters(format!(
                "crop bounds ({x1}, {y1})-({x2}, {y2}) are empty or inverted"
            )));
        }
        Ok(Self { x1, y1, x2, y2 })
    }

    /// Pixel bounds `(col1, row1, col2, row2)`, half-open, for a
    /// `width` x `height` image. Each bound is `floor(extent * pct / 100)`.
    pub fn pixel_bounds(&self, width: u32, height: u32) -> (u32, u32, u32, u32) {
        let at = |extent: u32, pct: u32| (extent as u64 * pct as u64 / 100) as u32;
        (
            at(width, self.x1),
            at(height, self.y1),
            at(width, self.x2),
            at(height, self.y2),
        )
    }
}

/// Crop a bitmap
///
/// The resolution fields are scaled by `old_extent / new_extent`.
///
/// # Errors
///
/// Returns [`TransformError::InvalidParameters`] if the window covers no
/// whole pixel. `bitmap` is never modified.
pub fn crop(bitmap: &Bitmap, rect: &CropRect) -> TransformResult<Bitmap> {
    let w = bitmap.width();
    let h = bitmap.height();
    let (c1, r1, c2, r2) = rect.pixel_bounds(w, h);
    if c1 >= c2 || r1 >= r2 {
        return Err(TransformError::InvalidParameters(format!(
            "crop window {rect:?} is empty on a {w}x{h} image"
        )));
    }
    let new_w = c2 - c1;
    let new_h = r2 - r1;

    let src = bitmap.pixels();
    let pixels = PixelBuffer::from_fn(new_w, new_h, |row, col| src.pixel(r1 + row, c1 + col))?;

    let (x_res, y_res) = bitmap.resolution();
    let resolution = (
        scale_resolution(x_res, w, new_w)?,
        scale_resolution(y_res, h, new_h)?,
    );

    log::debug!("crop {w}x{h} to columns {c1}..{c2}, rows {r1}..{r2}");
    Ok(bitmap.with_pixels(pixels, resolution)?)
}
