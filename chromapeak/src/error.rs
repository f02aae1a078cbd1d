//! Error type for the chromapeak facade
//!
//! Wraps every sub-crate error so that pipeline callers handle a single
//! type.

use std::path::PathBuf;
use thiserror::Error;

/// chromapeak error type
#[derive(Debug, Error)]
pub enum Error {
    /// Core library error (e.g. pixel buffer shape)
    #[error("core error: {0}")]
    Core(#[from] chromapeak_core::Error),

    /// Smoothing error
    #[error("filter error: {0}")]
    Filter(#[from] chromapeak_filter::FilterError),

    /// Histogram, peak or resolution error
    #[error("hue analysis error: {0}")]
    Hue(#[from] chromapeak_hue::HueError),

    /// Image acquisition error
    #[error("image error: {0}")]
    Io(#[from] chromapeak_io::IoError),

    /// Lookup-table error
    #[error("grade error: {0}")]
    Grade(#[from] chromapeak_grade::GradeError),

    /// Pipeline option outside its documented range
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// Configuration file could not be read or written
    #[error("config file '{}': {source}", .path.display())]
    ConfigFile {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Configuration text is not valid YAML for the options
    #[error("config parse error: {0}")]
    Config(#[from] serde_yaml::Error),
}

/// Result type alias for chromapeak operations
pub type Result<T> = std::result::Result<T, Error>;
