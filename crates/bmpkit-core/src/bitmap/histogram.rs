//! Histogram generation for bitmaps
//!
//! Per-channel intensity counts and the BT.709 luminance distribution.
//! Both are full-frame reductions; anything that depends on them (such as
//! automatic thresholding) must wait for the whole pass to finish.

use super::{Bitmap, PixelBuffer};

/// Number of bins in every histogram, one per 8-bit intensity
pub const HISTOGRAM_BINS: usize = 256;

/// RGB channel histograms
///
/// Contains separate 256-bin histograms for the red, green and blue channels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelHistograms {
    /// Red channel counts
    pub red: [u64; HISTOGRAM_BINS],
    /// Green channel counts
    pub green: [u64; HISTOGRAM_BINS],
    /// Blue channel counts
    pub blue: [u64; HISTOGRAM_BINS],
}

impl ChannelHistograms {
    /// Count every channel value of every pixel.
    pub fn compute(pixels: &PixelBuffer) -> Self {
        let mut hist = Self {
            red: [0; HISTOGRAM_BINS],
            green: [0; HISTOGRAM_BINS],
            blue: [0; HISTOGRAM_BINS],
        };
        for px in pixels.as_slice() {
            hist.red[px.r as usize] += 1;
            hist.green[px.g as usize] += 1;
            hist.blue[px.b as usize] += 1;
        }
        hist
    }

    /// Number of pixels counted (the sum of any one channel).
    pub fn total(&self) -> u64 {
        self.red.iter().sum()
    }
}

/// Count the truncated BT.709 luminance of every pixel.
pub fn luminance_histogram(pixels: &PixelBuffer) -> [u64; HISTOGRAM_BINS] {
    let mut hist = [0u64; HISTOGRAM_BINS];
    for px in pixels.as_slice() {
        hist[px.luminance() as usize] += 1;
    }
    hist
}

impl Bitmap {
    /// Per-channel histograms of this bitmap.
    ///
    /// # Example
    ///
    /// ```
    /// use bmpkit_core::Bitmap;
    ///
    /// let bmp = Bitmap::new(4, 4).unwrap();
    /// let hist = bmp.color_histogram();
    /// assert_eq!(hist.red[0], 16);
    /// ```
    pub fn color_histogram(&self) -> ChannelHistograms {
        ChannelHistograms::compute(self.pixels())
    }

    /// Luminance histogram of this bitmap.
    pub fn luminance_histogram(&self) -> [u64; HISTOGRAM_BINS] {
        luminance_histogram(self.pixels())
    }
}
