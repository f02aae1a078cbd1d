//! Error types for chromapeak-grade

use thiserror::Error;

/// Errors that can occur while building a grading lookup table
#[derive(Debug, Error)]
pub enum GradeError {
    /// Option value outside its documented range
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// One adjustment is required per color
    #[error("length mismatch: {colors} colors but {adjustments} adjustments")]
    LengthMismatch { colors: usize, adjustments: usize },
}

/// Result type for grading operations
pub type GradeResult<T> = Result<T, GradeError>;
