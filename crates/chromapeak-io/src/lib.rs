//! chromapeak-io - Image acquisition for chromapeak
//!
//! Decodes image files into the row-major RGBA buffers that the
//! analysis crates consume, and shrinks large images before analysis.
//!
//! # Supported Formats
//!
//! - PNG (feature `png-format`, default): all color types and depths
//! - JPEG (feature `jpeg`, default): grayscale, RGB and CMYK, decode only
//!
//! GIF, BMP, TIFF and WebP are recognized by [`ImageFormat::sniff`] but
//! reported as unsupported.

pub mod error;
pub mod format;
pub mod image;

#[cfg(feature = "jpeg")]
pub mod jpegio;
#[cfg(feature = "png-format")]
pub mod pngio;

pub use error::{IoError, IoResult};
pub use format::{ImageFormat, detect_format, detect_format_from_bytes};
pub use image::{DecodedImage, downsample};

#[cfg(feature = "jpeg")]
pub use jpegio::decode_jpeg;
#[cfg(feature = "png-format")]
pub use pngio::decode_png;

use std::fs;
use std::path::Path;

/// Read an image file into RGBA
///
/// The format is detected from the file contents, not the extension.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<DecodedImage> {
    let bytes = fs::read(path)?;
    decode(&bytes)
}

/// Decode an in-memory image into RGBA
pub fn decode(bytes: &[u8]) -> IoResult<DecodedImage> {
    let format = detect_format_from_bytes(bytes)?;
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => decode_png(std::io::Cursor::new(bytes)),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => decode_jpeg(std::io::Cursor::new(bytes)),
        other => Err(IoError::UnsupportedFormat(format!(
            "{} decoding is not available",
            other
        ))),
    }
}
