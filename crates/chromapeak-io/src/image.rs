//! Decoded RGBA images and box downsampling

use crate::IoResult;
use chromapeak_core::{CHANNELS, Error, PixelBuffer};

/// An owned, row-major RGBA image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    /// `width * height * 4` bytes
    pub data: Vec<u8>,
}

impl DecodedImage {
    /// Create an image, checking the buffer length
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> IoResult<Self> {
        PixelBuffer::new(&data, width, height)?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Borrow the pixels as a [`PixelBuffer`]
    pub fn as_buffer(&self) -> chromapeak_core::Result<PixelBuffer<'_>> {
        PixelBuffer::new(&self.data, self.width, self.height)
    }

    /// Number of pixels
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Shrink an image so that neither side exceeds `max_dimension`.
///
/// Each output pixel is the box average of the source pixels it covers
/// (all four channels averaged alike, rounded to nearest). The aspect
/// ratio is kept; each side is at least 1. Images already within the
/// limit are returned unchanged.
///
/// # Errors
///
/// `max_dimension == 0` is rejected.
pub fn downsample(image: &DecodedImage, max_dimension: u32) -> IoResult<DecodedImage> {
    if max_dimension == 0 {
        return Err(Error::InvalidParameter("max_dimension must be at least 1".into()).into());
    }
    let (w, h) = (image.width, image.height);
    if w <= max_dimension && h <= max_dimension {
        return Ok(image.clone());
    }

    let scale = max_dimension as f64 / w.max(h) as f64;
    let out_w = ((w as f64 * scale).round() as u32).clamp(1, max_dimension);
    let out_h = ((h as f64 * scale).round() as u32).clamp(1, max_dimension);

    let mut out = Vec::with_capacity(out_w as usize * out_h as usize * CHANNELS);
    for oy in 0..out_h {
        let y0 = span_start(oy, h, out_h);
        let y1 = span_start(oy + 1, h, out_h).max(y0 + 1);
        for ox in 0..out_w {
            let x0 = span_start(ox, w, out_w);
            let x1 = span_start(ox + 1, w, out_w).max(x0 + 1);

            let mut sums = [0u64; CHANNELS];
            for y in y0..y1 {
                let row = y as usize * w as usize * CHANNELS;
                let span = &image.data[row + x0 as usize * CHANNELS..row + x1 as usize * CHANNELS];
                for px in span.chunks_exact(CHANNELS) {
                    for (s, &v) in sums.iter_mut().zip(px) {
                        *s += u64::from(v);
                    }
                }
            }
            let n = u64::from((y1 - y0) * (x1 - x0));
            out.extend(sums.iter().map(|&s| ((s + n / 2) / n) as u8));
        }
    }

    DecodedImage::new(out_w, out_h, out)
}

/// First source index covered by output index `i` when mapping `src` onto `dst`
#[inline]
fn span_start(i: u32, src: u32, dst: u32) -> u32 {
    ((u64::from(i) * u64::from(src)) / u64::from(dst)) as u32
}
