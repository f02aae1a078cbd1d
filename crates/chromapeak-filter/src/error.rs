//! Error types for chromapeak-filter
//!
//! Smoothing itself cannot fail for finite inputs; errors only report
//! kernels or parameters that cannot describe a smoothing operation.

use thiserror::Error;

/// Errors that can occur during filtering operations
#[derive(Debug, Error)]
pub enum FilterError {
    /// Invalid kernel
    #[error("invalid kernel: {0}")]
    InvalidKernel(String),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Kernel1D, smooth_circular};
    use chromapeak_core::HueRing;

    #[test]
    fn test_errors_by_operation() {
        assert!(matches!(
            Kernel1D::gaussian(0.0),
            Err(FilterError::InvalidKernel(_))
        ));
        assert!(matches!(
            smooth_circular(&HueRing::new(), f64::INFINITY),
            Err(FilterError::InvalidParameters(_))
        ));
    }
}
