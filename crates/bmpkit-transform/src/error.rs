//! Error types for bmpkit-transform

use bmpkit_core::ErrorKind;
use thiserror::Error;

/// Errors that can occur during geometric transformations
#[derive(Debug, Error)]
pub enum TransformError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] bmpkit_core::Error),

    /// Invalid scale factor
    #[error("invalid scale factor: {0}")]
    InvalidScaleFactor(String),

    /// Invalid transformation parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

impl TransformError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            TransformError::Core(e) => e.kind(),
            TransformError::InvalidScaleFactor(_) | TransformError::InvalidParameters(_) => {
                ErrorKind::Unknown
            }
        }
    }
}

/// Result type for transform operations
pub type TransformResult<T> = Result<T, TransformError>;
