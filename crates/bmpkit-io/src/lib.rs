//! bmpkit-io - 24-bit bitmap I/O
//!
//! Decodes and encodes uncompressed 24-bit Windows Bitmap files.
//!
//! - [`read_bmp`] / [`write_bmp`] work on any `Read` / `Write`
//! - [`read_bitmap`] / [`write_bitmap`] work on file paths
//! - [`is_bitmap`] / [`is_bitmap_file`] are cheap pre-checks
//! - [`histogram`] exports the intensity distribution for external plotting
//!
//! # Example
//!
//! ```
//! use bmpkit_core::Bitmap;
//! use bmpkit_io::{read_bmp_mem, write_bmp_mem};
//!
//! let bmp = Bitmap::new(2, 2).unwrap();
//! let bytes = write_bmp_mem(&bmp).unwrap();
//! assert_eq!(read_bmp_mem(&bytes).unwrap(), bmp);
//! ```

pub mod bmp;
mod error;
mod header;
pub mod histogram;

pub use bmp::{is_bitmap, is_bitmap_mem, read_bmp, read_bmp_mem, write_bmp, write_bmp_mem};
pub use error::{IoError, IoResult};
pub use histogram::{
    HistogramRenderer, HistogramTable, RenderError, RenderOutcome, export_histogram,
};

use bmpkit_core::Bitmap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Read a bitmap from a file path.
///
/// Errors opening the file pass through as [`IoError::Io`].
pub fn read_bitmap<P: AsRef<Path>>(path: P) -> IoResult<Bitmap> {
    let file = File::open(path.as_ref())?;
    read_bmp(BufReader::new(file))
}

/// Write a bitmap to a file path, creating or truncating it.
///
/// Errors creating the file pass through as [`IoError::Io`]; errors while
/// writing are [`IoError::CannotWrite`].
pub fn write_bitmap<P: AsRef<Path>>(bitmap: &Bitmap, path: P) -> IoResult<()> {
    let file = File::create(path.as_ref())?;
    write_bmp(bitmap, BufWriter::new(file))
}

/// Check whether the file at `path` is a bitmap.
///
/// Symlinks are resolved first. Anything that is not a regular file is
/// `Ok(false)`; for a regular file only the magic tag and the declared size
/// are read and compared with the file length.
pub fn is_bitmap_file<P: AsRef<Path>>(path: P) -> IoResult<bool> {
    let resolved = fs::canonicalize(path.as_ref())?;
    if !fs::metadata(&resolved)?.is_file() {
        return Ok(false);
    }
    is_bitmap(File::open(&resolved)?)
}
