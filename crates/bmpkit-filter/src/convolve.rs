//! Gaussian blur
//!
//! Kernel cells that fall outside the image are skipped, and their weight
//! is taken off the divisor, so borders are averaged over what exists
//! instead of being darkened. Output is written to a fresh matrix; the
//! source is only read.

use crate::kernel::{BlurOptions, GaussianKernel, KernelNormalization};
use crate::FilterResult;
use bmpkit_core::{Bitmap, PixelBuffer, Rgb};

/// Blur with the default corner-weight kernel.
///
/// # Errors
///
/// Returns [`crate::FilterError::InvalidParameters`] if `radius < 2`.
pub fn blur(bitmap: &Bitmap, radius: u32) -> FilterResult<Bitmap> {
    blur_with_options(bitmap, &BlurOptions::new(radius))
}

/// Blur with explicit options.
pub fn blur_with_options(bitmap: &Bitmap, options: &BlurOptions) -> FilterResult<Bitmap> {
    let kernel = GaussianKernel::from_options(options)?;
    let pixels = match kernel.normalization() {
        KernelNormalization::CornerWeight => convolve_integer(bitmap.pixels(), &kernel)?,
        KernelNormalization::UnitSum => convolve_float(bitmap.pixels(), &kernel)?,
    };
    Ok(bitmap.with_pixels(pixels, bitmap.resolution())?)
}

/// Source offset `(row + dy, col + dx)` if it lies inside the image.
#[inline]
fn offset(row: u32, col: u32, dy: i32, dx: i32, w: u32, h: u32) -> Option<(u32, u32)> {
    let r = row.checked_add_signed(dy).filter(|&r| r < h)?;
    let c = col.checked_add_signed(dx).filter(|&c| c < w)?;
    Some((r, c))
}

fn convolve_integer(src: &PixelBuffer, kernel: &GaussianKernel) -> FilterResult<PixelBuffer> {
    let cells: Vec<(i32, i32, u64)> = kernel
        .cells()
        .map(|(dy, dx, weight)| (dy, dx, weight as u64))
        .collect();
    let max_weight: u64 = cells.iter().map(|&(_, _, w)| w).sum();
    log::debug!("blur: integer kernel, max weight {}", max_weight);

    let (w, h) = (src.width(), src.height());
    let out = PixelBuffer::from_fn(w, h, |row, col| {
        let mut acc = [0u64; 3];
        let mut excluded = 0u64;
        for &(dy, dx, weight) in &cells {
            match offset(row, col, dy, dx, w, h) {
                Some((r, c)) => {
                    let px = src.pixel(r, c);
                    acc[0] += weight * px.r as u64;
                    acc[1] += weight * px.g as u64;
                    acc[2] += weight * px.b as u64;
                }
                None => excluded += weight,
            }
        }
        // the center cell is always inside, so the divisor is at least 1
        let divisor = max_weight - excluded;
        Rgb::new(
            (acc[0] / divisor) as u8,
            (acc[1] / divisor) as u8,
            (acc[2] / divisor) as u8,
        )
    })?;
    Ok(out)
}

fn convolve_float(src: &PixelBuffer, kernel: &GaussianKernel) -> FilterResult<PixelBuffer> {
    let (w, h) = (src.width(), src.height());
    let out = PixelBuffer::from_fn(w, h, |row, col| {
        let mut acc = [0.0f64; 3];
        let mut total = 0.0;
        for (dy, dx, weight) in kernel.cells() {
            if let Some((r, c)) = offset(row, col, dy, dx, w, h) {
                let px = src.pixel(r, c);
                acc[0] += weight * px.r as f64;
                acc[1] += weight * px.g as f64;
                acc[2] += weight * px.b as f64;
                total += weight;
            }
        }
        let channel = |v: f64| (v / total).round().clamp(0.0, 255.0) as u8;
        Rgb::new(channel(acc[0]), channel(acc[1]), channel(acc[2]))
    })?;
    Ok(out)
}
