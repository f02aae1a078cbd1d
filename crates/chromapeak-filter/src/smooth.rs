//! Circular smoothing
//!
//! Convolves a 360-bucket hue ring with a normalized kernel, treating
//! the ring as closed: bucket 359 neighbors bucket 0, so nothing is
//! padded and total mass is preserved.

use crate::{FilterError, FilterResult, Kernel1D};
use chromapeak_core::{HUE_BUCKETS, HueRing, wrap_index};
use tracing::trace;

/// Smoothed hue buckets together with their maximum
#[derive(Debug, Clone, PartialEq)]
pub struct SmoothedBuckets {
    values: HueRing,
    max: f64,
}

impl SmoothedBuckets {
    /// Wrap a ring, computing its maximum
    pub fn new(values: HueRing) -> Self {
        let max = values.max_value();
        Self { values, max }
    }

    /// The smoothed values
    #[inline]
    pub fn values(&self) -> &HueRing {
        &self.values
    }

    /// Maximum of the smoothed values
    #[inline]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Value at bucket `index` (wrapped onto the ring)
    #[inline]
    pub fn get(&self, index: usize) -> f64 {
        self.values[index % HUE_BUCKETS]
    }

    /// Consume into the underlying ring
    pub fn into_ring(self) -> HueRing {
        self.values
    }
}

/// Convolve a ring with `kernel`, wrapping around at both ends.
///
/// `out[i] = sum_k ring[(i + k - r) mod 360] * kernel[k]` for a kernel of
/// radius `r`. Kernels wider than the ring wrap more than once.
pub fn convolve_circular(ring: &HueRing, kernel: &Kernel1D) -> HueRing {
    let radius = kernel.radius() as isize;
    let taps = kernel.data();
    let mut out = [0.0; HUE_BUCKETS];
    for (i, slot) in out.iter_mut().enumerate() {
        let base = i as isize - radius;
        *slot = taps
            .iter()
            .enumerate()
            .map(|(k, w)| ring[wrap_index(base + k as isize)] * w)
            .sum();
    }
    HueRing::from_array(out)
}

/// Smooth a hue ring with a Gaussian of standard deviation `sigma` buckets.
///
/// A `sigma <= 0` returns an exact copy of the input (the maximum is
/// still recomputed).
///
/// # Errors
///
/// Returns [`FilterError::InvalidParameters`] when `sigma` is NaN or
/// infinite.
pub fn smooth_circular(ring: &HueRing, sigma: f64) -> FilterResult<SmoothedBuckets> {
    if !sigma.is_finite() {
        return Err(FilterError::InvalidParameters(format!(
            "sigma must be finite, got {sigma}"
        )));
    }
    if sigma <= 0.0 {
        return Ok(SmoothedBuckets::new(ring.clone()));
    }

    let kernel = Kernel1D::gaussian(sigma)?;
    trace!(sigma, radius = kernel.radius(), "circular gaussian smoothing");
    Ok(SmoothedBuckets::new(convolve_circular(ring, &kernel)))
}
