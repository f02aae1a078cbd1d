//! chromapeak Color - Perceptual color models and color difference
//!
//! This crate provides the numeric color machinery of the extractor:
//!
//! - **Color space conversion** ([`colorspace`]): sRGB <-> OKLab/OKLCH,
//!   linear sRGB -> XYZ -> CIE L*a*b*
//! - **Color difference** ([`distance`]): CIEDE2000 and the OKLCH-level
//!   perceptual distance used for de-duplicating extracted colors
//!
//! Every function here is pure and total; there is no error type.

pub mod colorspace;
pub mod distance;

// Re-export core types
pub use chromapeak_core;

// Re-export color space types and functions
pub use colorspace::{
    // Types
    Lab,
    Oklab,
    Oklch,
    Xyz,
    // Conversions
    linear_rgb_to_oklab,
    linear_rgb_to_xyz,
    linear_to_srgb,
    oklab_to_linear_rgb,
    oklab_to_oklch,
    oklch_to_lab,
    oklch_to_oklab,
    oklch_to_rgb,
    oklch_to_rgb8,
    rgb_to_lab,
    rgb_to_oklab,
    rgb_to_oklch,
    srgb_to_linear,
    xyz_to_lab,
};

// Re-export distance functions
pub use distance::{ciede2000, perceptual_distance};
