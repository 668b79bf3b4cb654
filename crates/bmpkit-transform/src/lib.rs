//! bmpkit-transform - Geometric transformations for 24-bit bitmaps
//!
//! This crate provides the shape-changing operations:
//!
//! - Quarter-turn rotation and mirroring ([`rotate`])
//! - Percentage-based cropping ([`crop`])
//! - Lanczos-2 resampling, integer reduce / enlarge ([`scale`])
//!
//! Every operation except [`mirror`] reads the source bitmap and returns a
//! new one; the source is left untouched on success and on failure.

pub mod crop;
mod error;
pub mod rotate;
pub mod scale;

pub use crop::{CropRect, crop};
pub use error::{TransformError, TransformResult};
pub use rotate::{MirrorAxis, RotateDirection, mirror, rotate_90, rotate_180};
pub use scale::{LANCZOS_RADIUS, enlarge, lanczos2, reduce, resample};
