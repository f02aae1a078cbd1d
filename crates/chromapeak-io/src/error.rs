//! I/O error types
//!
//! Each format-specific module maps its underlying decoder errors into
//! `IoError` variants so that callers only need to handle one error type.

use thiserror::Error;

/// Error type for image acquisition.
#[derive(Error, Debug)]
pub enum IoError {
    /// Standard I/O error (file not found, permission denied, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The image format is not recognized or its decoder is not enabled
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The image data is structurally invalid
    #[error("invalid image data: {0}")]
    InvalidData(String),

    /// A format-specific decoder returned an error
    #[error("decode error: {0}")]
    DecodeError(String),

    /// An error from the core library (e.g. buffer shape mismatch)
    #[error("core error: {0}")]
    Core(#[from] chromapeak_core::Error),
}

/// Convenience alias for I/O results.
pub type IoResult<T> = Result<T, IoError>;
