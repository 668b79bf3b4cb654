//! bmpkit-filter - Neighborhood filters for 24-bit bitmaps
//!
//! - [`kernel`]: the fixed 10x10 Gaussian weight table and its options
//! - [`convolve`]: blur with edge renormalization

pub mod convolve;
mod error;
pub mod kernel;

pub use convolve::{blur, blur_with_options};
pub use error::{FilterError, FilterResult};
pub use kernel::{BlurOptions, GaussianKernel, KernelNormalization};
