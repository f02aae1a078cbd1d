//! Convolution kernels
//!
//! Defines the 1-D kernel used to smooth hue histograms. A kernel of
//! radius `r` has `2r + 1` taps with its center at index `r`.

use crate::{FilterError, FilterResult};

/// A 1-D convolution kernel centered on its middle tap
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel1D {
    /// Kernel taps, `2 * radius + 1` values
    data: Vec<f64>,
}

impl Kernel1D {
    /// Create a kernel from an odd-length slice of taps.
    pub fn from_slice(data: &[f64]) -> FilterResult<Self> {
        if data.is_empty() || data.len() % 2 == 0 {
            return Err(FilterError::InvalidKernel(format!(
                "kernel length must be odd, got {}",
                data.len()
            )));
        }
        if data.iter().any(|v| !v.is_finite()) {
            return Err(FilterError::InvalidKernel(
                "kernel values must be finite".into(),
            ));
        }
        Ok(Self {
            data: data.to_vec(),
        })
    }

    /// Create a normalized Gaussian kernel.
    ///
    /// The radius is `ceil(3 * sigma)` and tap `x` (offset from the
    /// center) is `exp(-x^2 / (2 sigma^2))` before normalization.
    pub fn gaussian(sigma: f64) -> FilterResult<Self> {
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(FilterError::InvalidKernel(format!(
                "gaussian sigma must be finite and positive, got {sigma}"
            )));
        }
        let radius = (3.0 * sigma).ceil() as usize;
        let denom = 2.0 * sigma * sigma;
        let data = (0..=2 * radius)
            .map(|k| {
                let x = k as f64 - radius as f64;
                (-(x * x) / denom).exp()
            })
            .collect();
        let mut kernel = Self { data };
        kernel.normalize();
        Ok(kernel)
    }

    /// Distance from the center tap to either end
    #[inline]
    pub fn radius(&self) -> usize {
        self.data.len() / 2
    }

    /// Number of taps
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false; a kernel has at least one tap
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the kernel taps.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Get the tap at signed offset `x` from the center.
    pub fn at_offset(&self, x: isize) -> Option<f64> {
        let idx = x.checked_add(self.radius() as isize)?;
        usize::try_from(idx).ok().and_then(|i| self.data.get(i).copied())
    }

    /// Normalize the kernel so that values sum to 1.
    ///
    /// A zero-sum kernel is left unchanged.
    pub fn normalize(&mut self) {
        let sum = self.sum();
        if sum != 0.0 {
            for v in &mut self.data {
                *v /= sum;
            }
        }
    }

    /// Get the sum of all kernel values.
    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }
}
