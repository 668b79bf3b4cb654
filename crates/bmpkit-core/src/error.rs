//! Error types for bmpkit-core
//!
//! Provides the core error type and the error-kind table shared by every
//! crate in the workspace. Each domain crate keeps its own error enum, but
//! all of them classify into one of the [`ErrorKind`] values so callers can
//! report failures uniformly. The fixed message for each kind lives on
//! [`ErrorKind::message`].

use thiserror::Error;

/// Classification of a failure, independent of the crate that raised it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Decode-time I/O or structural failure
    CannotLoad,
    /// Encode-time I/O failure
    CannotWrite,
    /// Bit depth other than 24 or non-zero compression
    NotSupportedFormat,
    /// Invalid caller-supplied parameter
    Unknown,
    /// Operating-system error passed through with its native description
    Os,
}

impl ErrorKind {
    /// Fixed human-readable text for this kind.
    ///
    /// OS-level errors carry their own description; for those this returns
    /// a generic label and callers should print the error itself.
    pub fn message(self) -> &'static str {
        match self {
            ErrorKind::CannotLoad => "Cannot load the file",
            ErrorKind::CannotWrite => "Cannot write into the file",
            ErrorKind::NotSupportedFormat => "Not supported format",
            ErrorKind::Unknown => "Unknown error",
            ErrorKind::Os => "Operating system error",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// bmpkit core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid image dimensions
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimension { width: i64, height: i64 },

    /// Pixel data does not match the declared dimensions
    #[error("pixel count mismatch: expected {expected}, got {actual}")]
    PixelCountMismatch { expected: usize, actual: usize },

    /// Alignment span length disagrees with the pixel-data offset
    #[error("alignment span of {actual} bytes does not match offset (expected {expected})")]
    AlignmentMismatch { expected: usize, actual: usize },

    /// Header field outside of the supported format
    #[error("unsupported bitmap: {bits_per_pixel} bpp, compression {compression}")]
    UnsupportedFormat {
        bits_per_pixel: u16,
        compression: u32,
    },

    /// Derived size does not fit in the header fields
    #[error("image too large: {0}")]
    TooLarge(String),

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidDimension { .. }
            | Error::PixelCountMismatch { .. }
            | Error::AlignmentMismatch { .. } => ErrorKind::CannotLoad,
            Error::UnsupportedFormat { .. } => ErrorKind::NotSupportedFormat,
            Error::TooLarge(_) | Error::InvalidParameter(_) => ErrorKind::Unknown,
        }
    }
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;
