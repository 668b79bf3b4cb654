//! Orthogonal rotation and mirroring
//!
//! Both operations move pixels without changing their values. Rotation
//! builds a new bitmap with swapped axes; mirroring rewrites the live
//! matrix from a frozen duplicate, since every output pixel reads a source
//! pixel that an earlier write may already have replaced.

use crate::{TransformError, TransformResult};
use bmpkit_core::{Bitmap, PixelBuffer};
use std::str::FromStr;

/// Direction of a quarter turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotateDirection {
    Clockwise,
    CounterClockwise,
}

impl FromStr for RotateDirection {
    type Err = TransformError;

    /// Accepts `r` / `cw` and `l` / `ccw`.
    fn from_str(s: &str) -> TransformResult<Self> {
        match s {
            "r" | "cw" => Ok(RotateDirection::Clockwise),
            "l" | "ccw" => Ok(RotateDirection::CounterClockwise),
            other => Err(TransformError::InvalidParameters(format!(
                "unknown rotation direction '{other}'"
            ))),
        }
    }
}

/// Rotate a bitmap by 90 degrees
///
/// Width and height swap, and so do the horizontal and vertical
/// resolutions. The declared image and file sizes follow the new padding.
///
/// Clockwise, output `(i, j)` takes input `(j, width - 1 - i)`;
/// counter-clockwise it takes input `(height - 1 - j, i)`.
pub fn rotate_90(bitmap: &Bitmap, direction: RotateDirection) -> TransformResult<Bitmap> {
    let src = bitmap.pixels();
    let w = src.width();
    let h = src.height();

    let pixels = PixelBuffer::from_fn(h, w, |i, j| match direction {
        RotateDirection::Clockwise => src.pixel(j, w - 1 - i),
        RotateDirection::CounterClockwise => src.pixel(h - 1 - j, i),
    })?;

    let (x_res, y_res) = bitmap.resolution();
    Ok(bitmap.with_pixels(pixels, (y_res, x_res))?)
}

/// Rotate a bitmap by 180 degrees
pub fn rotate_180(bitmap: &Bitmap) -> TransformResult<Bitmap> {
    let once = rotate_90(bitmap, RotateDirection::Clockwise)?;
    rotate_90(&once, RotateDirection::Clockwise)
}

/// Mirror axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MirrorAxis {
    /// Reverse the column order of every row
    Vertical,
    /// Reverse the row order
    Horizontal,
}

impl FromStr for MirrorAxis {
    type Err = TransformError;

    /// Accepts `v` and `h`; any other token is rejected.
    fn from_str(s: &str) -> TransformResult<Self> {
        match s {
            "v" => Ok(MirrorAxis::Vertical),
            "h" => Ok(MirrorAxis::Horizontal),
            other => Err(TransformError::InvalidParameters(format!(
                "unknown mirror axis '{other}'"
            ))),
        }
    }
}

/// Mirror a bitmap in place
///
/// Headers are untouched; only the pixel matrix is rewritten.
pub fn mirror(bitmap: &mut Bitmap, axis: MirrorAxis) {
    let snapshot = bitmap.duplicate();
    let src = snapshot.pixels();
    let w = src.width();
    let h = src.height();
    let dst = bitmap.pixels_mut();

    for i in 0..h {
        for j in 0..w {
            let value = match axis {
                MirrorAxis::Vertical => src.pixel(i, w - 1 - j),
                MirrorAxis::Horizontal => src.pixel(h - 1 - i, j),
            };
            dst.set(i, j, value);
        }
    }
}
