//! Lanczos resampling
//!
//! Every output pixel maps back to the continuous source coordinate
//! `s = i * old / new` and averages the 4x4 neighborhood
//! `floor(s) - 1 ..= floor(s) + 2` in each axis, weighted by the
//! separable Lanczos-2 kernel `L(dy) * L(dx)`.
//!
//! Neighbors outside the source are dropped from both the weighted sum and
//! the weight total, so edges are renormalized rather than darkened. If the
//! remaining weight is zero, the nearest source pixel is copied instead.

use crate::{TransformError, TransformResult};
use bmpkit_core::fastmath::sinc;
use bmpkit_core::{Bitmap, PixelBuffer, Rgb, image_size_for};

/// Kernel half-width
pub const LANCZOS_RADIUS: f64 = 2.0;

/// Lanczos-2 kernel: `sinc(x) * sinc(x / 2)` inside the window, 0 outside.
pub fn lanczos2(x: f64) -> f64 {
    if x.abs() >= LANCZOS_RADIUS {
        return 0.0;
    }
    sinc(x) * sinc(x / LANCZOS_RADIUS)
}

/// In-bounds taps of one output coordinate along one axis.
struct Taps {
    /// `(source index, weight)`
    taps: Vec<(u32, f64)>,
    /// Source index used when the weights cancel out
    nearest: u32,
}

impl Taps {
    fn total(&self) -> f64 {
        self.taps.iter().map(|&(_, w)| w).sum()
    }
}

fn axis_taps(new_extent: u32, old_extent: u32) -> Vec<Taps> {
    let ratio = old_extent as f64 / new_extent as f64;
    let last = old_extent as i64 - 1;
    (0..new_extent)
        .map(|i| {
            let s = i as f64 * ratio;
            let base = s.floor() as i64;
            let taps = (base - 1..=base + 2)
                .filter(|&k| (0..=last).contains(&k))
                .map(|k| (k as u32, lanczos2(s - k as f64)))
                .collect();
            let nearest = (s.round() as i64).clamp(0, last) as u32;
            Taps { taps, nearest }
        })
        .collect()
}

fn to_channel(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Resample a bitmap to `new_height` x `new_width` with the Lanczos-2
/// kernel.
///
/// The resolution fields scale with the extents:
/// `new_res = old_res * new_extent / old_extent`.
///
/// # Errors
///
/// Returns [`TransformError::InvalidParameters`] for a zero target extent,
/// or a core `TooLarge` error if the target does not fit the 32-bit size
/// fields. Both are checked before any pixel is allocated.
pub fn resample(bitmap: &Bitmap, new_height: u32, new_width: u32) -> TransformResult<Bitmap> {
    if new_height == 0 || new_width == 0 {
        return Err(TransformError::InvalidParameters(format!(
            "target size {new_width}x{new_height} is empty"
        )));
    }
    image_size_for(new_width, new_height)?;
    let src = bitmap.pixels();
    let (w, h) = (src.width(), src.height());

    let rows = axis_taps(new_height, h);
    let cols = axis_taps(new_width, w);
    let mut fallbacks = 0usize;

    let pixels = PixelBuffer::from_fn(new_width, new_height, |i, j| {
        let ry = &rows[i as usize];
        let cx = &cols[j as usize];
        let total = ry.total() * cx.total();

        if total.abs() < f64::EPSILON {
            fallbacks += 1;
            return src.pixel(ry.nearest, cx.nearest);
        }

        let mut acc = [0.0f64; 3];
        for &(sr, wr) in &ry.taps {
            for &(sc, wc) in &cx.taps {
                let weight = wr * wc;
                let px = src.pixel(sr, sc);
                acc[0] += weight * px.r as f64;
                acc[1] += weight * px.g as f64;
                acc[2] += weight * px.b as f64;
            }
        }
        Rgb::new(
            to_channel(acc[0] / total),
            to_channel(acc[1] / total),
            to_channel(acc[2] / total),
        )
    })?;

    if fallbacks > 0 {
        log::debug!("resample: {fallbacks} pixels fell back to the nearest sample");
    }
    log::debug!("resample {w}x{h} -> {new_width}x{new_height}");

    let (x_res, y_res) = bitmap.resolution();
    let resolution = (
        scale_resolution(x_res, new_width, w)?,
        scale_resolution(y_res, new_height, h)?,
    );
    Ok(bitmap.with_pixels(pixels, resolution)?)
}

/// Shrink both axes by an integer factor: `new = old / factor`.
///
/// # Errors
///
/// Returns [`TransformError::InvalidScaleFactor`] for `factor == 0` or if
/// either extent would drop to zero.
pub fn reduce(bitmap: &Bitmap, factor: u32) -> TransformResult<Bitmap> {
    if factor == 0 {
        return Err(TransformError::InvalidScaleFactor(
            "reduce factor must be at least 1".to_string(),
        ));
    }
    let new_w = bitmap.width() / factor;
    let new_h = bitmap.height() / factor;
    if new_w == 0 || new_h == 0 {
        return Err(TransformError::InvalidScaleFactor(format!(
            "reducing {}x{} by {factor} leaves no pixels",
            bitmap.width(),
            bitmap.height()
        )));
    }
    resample(bitmap, new_h, new_w)
}

/// Grow both axes by an integer factor: `new = old * factor`.
///
/// # Errors
///
/// Returns [`TransformError::InvalidScaleFactor`] for `factor == 0` or if
/// the result would not fit the 32-bit signed header fields.
pub fn enlarge(bitmap: &Bitmap, factor: u32) -> TransformResult<Bitmap> {
    if factor == 0 {
        return Err(TransformError::InvalidScaleFactor(
            "enlarge factor must be at least 1".to_string(),
        ));
    }
    let grow = |extent: u32| {
        extent
            .checked_mul(factor)
            .filter(|&n| n <= i32::MAX as u32)
            .ok_or_else(|| {
                TransformError::InvalidScaleFactor(format!(
                    "enlarging {}x{} by {factor} overflows",
                    bitmap.width(),
                    bitmap.height()
                ))
            })
    };
    let new_w = grow(bitmap.width())?;
    let new_h = grow(bitmap.height())?;
    resample(bitmap, new_h, new_w)
}

/// `res * num / den` with integer division, checked against `i32`.
pub(crate) fn scale_resolution(res: i32, num: u32, den: u32) -> TransformResult<i32> {
    let scaled = res as i64 * num as i64 / den as i64;
    i32::try_from(scaled).map_err(|_| {
        TransformError::InvalidParameters(format!("resolution {res} scaled to {scaled} overflows"))
    })
}
