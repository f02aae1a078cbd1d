//! Error types for chromapeak-core
//!
//! Provides a unified error type for the shared data structures.
//! Downstream crates wrap it through `#[from]` so that callers only
//! see one error type per crate.

use thiserror::Error;

/// chromapeak core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Pixel buffer length does not match `width * height * 4`
    #[error("input shape mismatch: expected {expected} bytes, got {actual}")]
    InputShape { expected: usize, actual: usize },

    /// Invalid image dimensions
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Slice length does not match the 360-bucket hue ring
    #[error("hue ring length mismatch: expected {expected}, got {actual}")]
    RingLength { expected: usize, actual: usize },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;
