//! chromapeak-test - Regression test framework for chromapeak
//!
//! Provides [`RegParams`], which records numeric, string and image
//! comparisons and reports every failure at [`RegParams::cleanup`], plus
//! builders for the synthetic images the regression tests analyze.
//!
//! # Usage
//!
//! ```ignore
//! use chromapeak_test::RegParams;
//!
//! let mut rp = RegParams::new("peaks");
//! rp.compare_values(4.0, peaks.len() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" (default) or "display"

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

use chromapeak_color::{Oklch, oklch_to_rgb8};
use chromapeak_io::DecodedImage;
use std::path::PathBuf;

/// Write bytes into the regression output directory
///
/// Returns the full path of the written file.
pub fn write_regout(name: &str, data: &[u8]) -> TestResult<PathBuf> {
    let dir = regout_dir();
    std::fs::create_dir_all(&dir)?;
    let path = dir.join(name);
    std::fs::write(&path, data)?;
    Ok(path)
}

/// Get the path to the workspace root
fn workspace_root() -> PathBuf {
    // chromapeak-test is at crates/chromapeak-test, so go up two directories
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../..")
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> PathBuf {
    workspace_root().join("tests/regout")
}

// =============================================================================
// Synthetic images
// =============================================================================

/// An image filled with one RGBA value
pub fn uniform_image(width: u32, height: u32, rgba: [u8; 4]) -> DecodedImage {
    DecodedImage {
        width,
        height,
        data: rgba.repeat(width as usize * height as usize),
    }
}

/// A fully transparent image
pub fn transparent_image(width: u32, height: u32) -> DecodedImage {
    uniform_image(width, height, [0, 0, 0, 0])
}

/// Vertical stripes, one `block_width` wide stripe per color, left to right
pub fn block_image(block_width: u32, height: u32, colors: &[[u8; 4]]) -> DecodedImage {
    let width = block_width * colors.len() as u32;
    let row: Vec<u8> = colors
        .iter()
        .flat_map(|c| c.repeat(block_width as usize))
        .collect();
    DecodedImage {
        width,
        height,
        data: row.repeat(height as usize),
    }
}

/// Opaque vertical stripes of the given OKLCH colors (quantized to sRGB)
pub fn oklch_block_image(block_width: u32, height: u32, colors: &[Oklch]) -> DecodedImage {
    let rgba: Vec<[u8; 4]> = colors
        .iter()
        .map(|&c| {
            let (r, g, b) = oklch_to_rgb8(c);
            [r, g, b, 255]
        })
        .collect();
    block_image(block_width, height, &rgba)
}
