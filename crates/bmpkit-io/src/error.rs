//! I/O error types
//!
//! Provides a unified error type for bitmap decoding and encoding.
//! Structural problems in the byte stream become `CannotLoad`, write
//! failures become `CannotWrite`, and operating-system errors raised while
//! opening or inspecting paths pass through unchanged so their native
//! description reaches the caller.

use bmpkit_core::ErrorKind;
use thiserror::Error;

/// Error type for bitmap I/O operations.
#[derive(Error, Debug)]
pub enum IoError {
    /// Operating-system error (file not found, permission denied, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The byte stream is truncated or structurally invalid
    #[error("cannot load bitmap: {0}")]
    CannotLoad(String),

    /// Writing the encoded bitmap failed
    #[error("cannot write bitmap: {0}")]
    CannotWrite(String),

    /// Bit depth other than 24 or a compressed bitmap
    #[error("unsupported bitmap: {bits_per_pixel} bpp, compression {compression}")]
    UnsupportedFormat {
        bits_per_pixel: u16,
        compression: u32,
    },

    /// A histogram renderer reported a hard failure
    #[error("histogram rendering failed: {0}")]
    Render(String),

    /// An error from the core library
    #[error("core error: {0}")]
    Core(#[from] bmpkit_core::Error),
}

impl IoError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            IoError::Io(_) => ErrorKind::Os,
            IoError::CannotLoad(_) => ErrorKind::CannotLoad,
            IoError::CannotWrite(_) => ErrorKind::CannotWrite,
            IoError::UnsupportedFormat { .. } => ErrorKind::NotSupportedFormat,
            IoError::Render(_) => ErrorKind::Unknown,
            IoError::Core(e) => e.kind(),
        }
    }
}

/// Convenience alias for I/O results.
pub type IoResult<T> = Result<T, IoError>;
