//! bmpkit Core - Basic data structures for 24-bit bitmap processing
//!
//! This crate provides the fundamental pieces shared by every other crate
//! in the workspace:
//!
//! - [`Bitmap`] - headers, alignment span and pixel matrix of one image
//! - [`PixelBuffer`] / [`Rgb`] - flat row-major pixel storage
//! - [`FileHeader`] / [`InfoHeader`] - field models of the on-disk headers
//! - [`ChannelHistograms`] - per-channel intensity counts
//! - [`fastmath`] - deterministic `sin` / `exp` approximations for kernels
//! - [`Error`] / [`ErrorKind`] - core errors and the shared kind table

pub mod bitmap;
pub mod error;
pub mod fastmath;

pub use bitmap::{
    Bitmap, ChannelHistograms, FileHeader, HISTOGRAM_BINS, InfoHeader, PixelBuffer, Rgb,
    alignment_len, image_size_for, luminance_histogram, row_padding, row_stride,
};
pub use error::{Error, ErrorKind, Result};
