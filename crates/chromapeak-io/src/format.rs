//! Image format detection
//!
//! Detects image formats by examining magic numbers in the file header.
//! Only PNG and JPEG can be decoded; the other formats are recognized so
//! that callers get a precise "unsupported" error instead of a decode
//! failure.

use crate::{IoError, IoResult};
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Magic numbers for image format detection
mod magic {
    /// PNG: 89 50 4E 47 0D 0A 1A 0A
    pub const PNG: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    /// JPEG: FF D8 FF
    pub const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF];

    /// GIF87a / GIF89a
    pub const GIF87A: &[u8] = b"GIF87a";
    pub const GIF89A: &[u8] = b"GIF89a";

    /// BMP: "BM"
    pub const BMP: &[u8] = b"BM";

    /// TIFF little-endian / big-endian
    pub const TIFF_LE: &[u8] = &[0x49, 0x49, 0x2A, 0x00];
    pub const TIFF_BE: &[u8] = &[0x4D, 0x4D, 0x00, 0x2A];

    /// WebP: RIFF....WEBP
    pub const RIFF: &[u8] = b"RIFF";
    pub const WEBP: &[u8] = b"WEBP";
}

/// Number of header bytes needed to recognize every format
pub const SNIFF_LEN: usize = 12;

/// Recognized image container formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Bmp,
    Tiff,
    WebP,
}

impl ImageFormat {
    /// Identify a format from the leading bytes of a file
    pub fn sniff(data: &[u8]) -> Option<Self> {
        if data.starts_with(magic::PNG) {
            Some(Self::Png)
        } else if data.starts_with(magic::JPEG) {
            Some(Self::Jpeg)
        } else if data.starts_with(magic::GIF87A) || data.starts_with(magic::GIF89A) {
            Some(Self::Gif)
        } else if data.starts_with(magic::TIFF_LE) || data.starts_with(magic::TIFF_BE) {
            Some(Self::Tiff)
        } else if data.len() >= SNIFF_LEN && data.starts_with(magic::RIFF) && &data[8..12] == magic::WEBP
        {
            Some(Self::WebP)
        } else if data.starts_with(magic::BMP) {
            Some(Self::Bmp)
        } else {
            None
        }
    }

    /// Conventional file extension
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Gif => "gif",
            Self::Bmp => "bmp",
            Self::Tiff => "tif",
            Self::WebP => "webp",
        }
    }

    /// Whether this build can decode the format
    pub fn is_decodable(self) -> bool {
        match self {
            Self::Png => cfg!(feature = "png-format"),
            Self::Jpeg => cfg!(feature = "jpeg"),
            _ => false,
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Detect image format from a file path
pub fn detect_format<P: AsRef<Path>>(path: P) -> IoResult<ImageFormat> {
    let mut file = File::open(path)?;
    let mut header = [0u8; SNIFF_LEN];
    let bytes_read = file.read(&mut header)?;
    detect_format_from_bytes(&header[..bytes_read])
}

/// Detect image format from bytes
pub fn detect_format_from_bytes(data: &[u8]) -> IoResult<ImageFormat> {
    if data.len() < 2 {
        return Err(IoError::InvalidData(
            "not enough data to detect format".to_string(),
        ));
    }
    ImageFormat::sniff(data)
        .ok_or_else(|| IoError::UnsupportedFormat("unknown image format".to_string()))
}
