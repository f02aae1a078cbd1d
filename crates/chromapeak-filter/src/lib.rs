//! chromapeak Filter - Smoothing on the circular hue domain
//!
//! This crate provides:
//!
//! - **Kernels** ([`kernel`]): normalized 1-D kernels, including Gaussian
//! - **Circular smoothing** ([`smooth`]): wrap-around convolution of a
//!   [`HueRing`](chromapeak_core::HueRing)

pub mod error;
pub mod kernel;
pub mod smooth;

pub use error::{FilterError, FilterResult};
pub use kernel::Kernel1D;
pub use smooth::{SmoothedBuckets, convolve_circular, smooth_circular};
