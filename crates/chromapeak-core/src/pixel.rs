//! PixelSample, PixelBuffer - Row-major RGBA input
//!
//! The extractor never decodes images itself. It consumes a borrowed
//! row-major RGBA byte buffer (4 bytes per pixel) together with its
//! dimensions, validated once at construction.

use crate::error::{Error, Result};

/// Number of bytes per pixel in a [`PixelBuffer`]
pub const CHANNELS: usize = 4;

/// One RGBA pixel read from a [`PixelBuffer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelSample {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl PixelSample {
    /// Create a new sample
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a fully opaque sample
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Build a sample from a 4-byte RGBA chunk.
    ///
    /// Missing trailing channels read as 0.
    #[inline]
    pub fn from_chunk(chunk: &[u8]) -> Self {
        let at = |i: usize| chunk.get(i).copied().unwrap_or(0);
        Self::new(at(0), at(1), at(2), at(3))
    }

    /// The sample as an `[r, g, b, a]` array
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Borrowed, shape-checked RGBA pixel buffer
///
/// # Invariant
///
/// `data.len() == width * height * 4`, checked by [`PixelBuffer::new`].
#[derive(Debug, Clone, Copy)]
pub struct PixelBuffer<'a> {
    data: &'a [u8],
    width: u32,
    height: u32,
}

impl<'a> PixelBuffer<'a> {
    /// Wrap a row-major RGBA buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InputShape`] when the buffer length is not exactly
    /// `width * height * 4`. Zero-area images are accepted and simply
    /// contain no pixels.
    pub fn new(data: &'a [u8], width: u32, height: u32) -> Result<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(CHANNELS))
            .ok_or(Error::InvalidDimension { width, height })?;
        if data.len() != expected {
            return Err(Error::InputShape {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels (`width * height`)
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.data.len() / CHANNELS
    }

    /// Whether the buffer contains no pixels
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The raw RGBA bytes
    #[inline]
    pub fn as_bytes(&self) -> &'a [u8] {
        self.data
    }

    /// Number of bytes in one row
    #[inline]
    pub fn row_stride(&self) -> usize {
        self.width as usize * CHANNELS
    }

    /// Get the pixel at (x, y), or `None` when out of bounds
    pub fn get(&self, x: u32, y: u32) -> Option<PixelSample> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = y as usize * self.row_stride() + x as usize * CHANNELS;
        Some(PixelSample::from_chunk(&self.data[offset..offset + CHANNELS]))
    }

    /// Iterate over all pixels in row-major order
    pub fn samples(&self) -> impl Iterator<Item = PixelSample> + 'a {
        self.data.chunks_exact(CHANNELS).map(PixelSample::from_chunk)
    }

    /// Split the buffer into consecutive bands of at most `rows` rows.
    ///
    /// Each band is returned as its raw RGBA bytes. A `rows` of 0 is
    /// treated as 1.
    pub fn row_bands(&self, rows: usize) -> impl Iterator<Item = &'a [u8]> + 'a {
        let band_bytes = (self.row_stride() * rows.max(1)).max(CHANNELS);
        self.data.chunks(band_bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_exact_length() {
        let data = vec![0u8; 3 * 2 * 4];
        let buf = PixelBuffer::new(&data, 3, 2).unwrap();
        assert_eq!(buf.width(), 3);
        assert_eq!(buf.height(), 2);
        assert_eq!(buf.pixel_count(), 6);
    }

    #[test]
    fn test_new_rejects_short_buffer() {
        let data = vec![0u8; 23];
        let err = PixelBuffer::new(&data, 3, 2).unwrap_err();
        assert!(matches!(
            err,
            Error::InputShape {
                expected: 24,
                actual: 23
            }
        ));
    }

    #[test]
    fn test_new_rejects_long_buffer() {
        let data = vec![0u8; 28];
        assert!(PixelBuffer::new(&data, 3, 2).is_err());
    }

    #[test]
    fn test_empty_buffer() {
        let buf = PixelBuffer::new(&[], 0, 10).unwrap();
        assert!(buf.is_empty());
        assert_eq!(buf.samples().count(), 0);
    }

    #[test]
    fn test_get_and_samples() {
        let data = [1, 2, 3, 4, 5, 6, 7, 8];
        let buf = PixelBuffer::new(&data, 2, 1).unwrap();
        assert_eq!(buf.get(1, 0), Some(PixelSample::new(5, 6, 7, 8)));
        assert_eq!(buf.get(2, 0), None);
        let all: Vec<_> = buf.samples().collect();
        assert_eq!(all, vec![PixelSample::new(1, 2, 3, 4), PixelSample::new(5, 6, 7, 8)]);
    }

    #[test]
    fn test_row_bands_cover_buffer() {
        let data = vec![7u8; 4 * 5 * 4];
        let buf = PixelBuffer::new(&data, 4, 5).unwrap();
        let bands: Vec<_> = buf.row_bands(2).collect();
        assert_eq!(bands.len(), 3);
        assert_eq!(bands[0].len(), 32);
        assert_eq!(bands[2].len(), 16);
        let total: usize = bands.iter().map(|b| b.len()).sum();
        assert_eq!(total, data.len());
    }
}
