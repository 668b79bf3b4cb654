//! bmpkit Color - Per-pixel color operations
//!
//! This crate provides the recolor operations and the thresholding pass:
//!
//! - **Adjustments** ([`adjust`]): channel mask, sepia, grayscale, invert,
//!   and saturation / brightness / hue edits through HSV
//! - **Color space conversion** ([`colorspace`]): RGB <-> HSV
//! - **Thresholding** ([`threshold`]): two-tone threshold and Otsu's method
//!
//! All operations mutate the bitmap in place and cannot fail.

pub mod adjust;
pub mod colorspace;
pub mod error;
pub mod threshold;

// Re-export core types
pub use bmpkit_core;

pub use error::{ColorError, ColorResult};

pub use adjust::{
    GrayChannel, adjust_brightness, adjust_hue, adjust_saturation, apply_channel_mask, grayscale,
    invert, sepia,
};
pub use colorspace::{HUE_UNDEFINED, Hsv, hsv_to_rgb, rgb_to_hsv};
pub use threshold::{apply_threshold, otsu_threshold, threshold_otsu};
