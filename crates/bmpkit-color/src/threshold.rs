//! Two-tone thresholding and Otsu's method
//!
//! [`otsu_threshold`] needs the complete luminance histogram, so
//! [`threshold_otsu`] runs a full-frame reduction before the per-pixel
//! [`apply_threshold`] pass starts.

use bmpkit_core::{Bitmap, HISTOGRAM_BINS, Rgb};

/// Replace each pixel by `dark` if `r + g + b < threshold_sum`, else by
/// `light`.
pub fn apply_threshold(bitmap: &mut Bitmap, dark: Rgb, light: Rgb, threshold_sum: u32) {
    for px in bitmap.pixels_mut().as_mut_slice() {
        *px = if px.sum() < threshold_sum { dark } else { light };
    }
}

/// Otsu's optimal threshold over a 256-bin histogram.
///
/// The background class is every intensity `<= t`. Candidates where either
/// class is empty are skipped, and among equal between-class variances the
/// lowest `t` wins. Returns 0 when no candidate splits the histogram (an
/// empty or single-valued histogram).
pub fn otsu_threshold(histogram: &[u64; HISTOGRAM_BINS], total: u64) -> u8 {
    let sum_all: f64 = histogram
        .iter()
        .enumerate()
        .map(|(i, &n)| i as f64 * n as f64)
        .sum();

    let mut sum_b = 0.0;
    let mut weight_b = 0u64;
    let mut best = 0u8;
    let mut best_variance = -1.0;

    for (t, &count) in histogram.iter().enumerate() {
        weight_b += count;
        if weight_b == 0 {
            continue;
        }
        let weight_f = total.saturating_sub(weight_b);
        if weight_f == 0 {
            break;
        }

        sum_b += t as f64 * count as f64;
        let wb = weight_b as f64;
        let wf = weight_f as f64;
        let mean_b = sum_b / wb;
        let mean_f = (sum_all - sum_b) / wf;
        let between = wb * wf * (mean_b - mean_f) * (mean_b - mean_f);

        if between > best_variance {
            best_variance = between;
            best = t as u8;
        }
    }

    log::debug!("otsu threshold {} over {} pixels", best, total);
    best
}

/// Binarize with Otsu's threshold on the luminance histogram.
///
/// Returns the chosen intensity `t`; the threshold test is applied with
/// `threshold_sum = 3 * t`.
pub fn threshold_otsu(bitmap: &mut Bitmap, dark: Rgb, light: Rgb) -> u8 {
    let histogram = bitmap.luminance_histogram();
    let total = bitmap.pixels().len() as u64;
    let t = otsu_threshold(&histogram, total);
    apply_threshold(bitmap, dark, light, 3 * t as u32);
    t
}
