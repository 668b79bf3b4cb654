//! bmpkit - 24-bit bitmap codec and transform engine
//!
//! Decodes uncompressed 24-bit Windows Bitmap files into an owned pixel
//! matrix, transforms them, and encodes them back byte for byte.
//!
//! # Overview
//!
//! - Codec and histogram export ([`io`])
//! - Recolor operations and Otsu thresholding ([`color`])
//! - Rotation, mirroring, cropping and Lanczos resampling ([`transform`])
//! - Gaussian blur ([`filter`])
//!
//! # Example
//!
//! ```
//! use bmpkit::{Bitmap, Rgb};
//! use bmpkit::transform::{RotateDirection, rotate_90};
//!
//! let mut bmp = Bitmap::new(4, 2).unwrap();
//! bmp.pixels_mut().set(0, 3, Rgb::WHITE);
//! bmpkit::color::invert(&mut bmp);
//!
//! let rotated = rotate_90(&bmp, RotateDirection::Clockwise).unwrap();
//! assert_eq!((rotated.width(), rotated.height()), (2, 4));
//!
//! let bytes = bmpkit::io::write_bmp_mem(&rotated).unwrap();
//! assert_eq!(bytes.len(), 54 + 4 * 8);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use bmpkit_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use bmpkit_color as color;
pub use bmpkit_filter as filter;
pub use bmpkit_io as io;
pub use bmpkit_transform as transform;
