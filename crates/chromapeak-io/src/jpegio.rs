//! JPEG image format support
//!
//! Reads JPEG images using the `jpeg-decoder` crate. 8-bit grayscale,
//! 24-bit RGB and CMYK scans are converted to opaque RGBA.

use crate::{DecodedImage, IoError, IoResult};
use jpeg_decoder::{Decoder, PixelFormat};
use std::io::Read;

/// Read a JPEG image from a reader.
///
/// # Arguments
/// * `reader` - A reader positioned at the JPEG SOI marker (`FF D8`)
///
/// # Returns
/// An opaque RGBA image.
pub fn decode_jpeg<R: Read>(reader: R) -> IoResult<DecodedImage> {
    let mut decoder = Decoder::new(reader);
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(format!("JPEG decode error: {}", e)))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("JPEG header missing after decode".to_string()))?;

    let width = u32::from(info.width);
    let height = u32::from(info.height);
    let rgba = match info.pixel_format {
        PixelFormat::L8 => pixels.iter().flat_map(|&g| [g, g, g, 255]).collect(),
        PixelFormat::RGB24 => pixels
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], 255])
            .collect(),
        PixelFormat::CMYK32 => pixels.chunks_exact(4).flat_map(cmyk_to_rgba).collect(),
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported JPEG pixel format: {:?}",
                other
            )));
        }
    };

    DecodedImage::new(width, height, rgba)
}

/// Naive CMYK to RGB: `r = (255 - c) * (255 - k) / 255`
fn cmyk_to_rgba(p: &[u8]) -> [u8; 4] {
    let k = 255 - u32::from(p[3]);
    let ch = |c: u8| ((255 - u32::from(c)) * k / 255) as u8;
    [ch(p[0]), ch(p[1]), ch(p[2]), 255]
}
