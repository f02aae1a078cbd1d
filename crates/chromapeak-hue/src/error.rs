//! Error types for chromapeak-hue

use thiserror::Error;

/// Errors that can occur while building histograms, detecting peaks or
/// resolving peak colors
///
/// Degenerate inputs (fully transparent images, peaks without samples)
/// are not errors: they produce empty or shorter results.
#[derive(Debug, Error)]
pub enum HueError {
    /// Configuration value outside its documented range
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for hue analysis operations
pub type HueResult<T> = Result<T, HueError>;

/// Reject a value outside `[lo, hi]` (NaN included)
pub(crate) fn check_range(name: &str, value: f64, lo: f64, hi: f64) -> HueResult<()> {
    if value.is_nan() || value < lo || value > hi {
        return Err(HueError::InvalidParameters(format!(
            "{name} must be in [{lo}, {hi}], got {value}"
        )));
    }
    Ok(())
}
