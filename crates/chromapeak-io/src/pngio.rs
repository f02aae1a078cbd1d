//! PNG image format support
//!
//! Every PNG color type is normalized to 8-bit RGBA: palettes and
//! low-bit grayscale are expanded (including `tRNS` transparency) and
//! 16-bit samples keep their high byte.

use crate::{DecodedImage, IoError, IoResult};
use png::{BitDepth, ColorType, Decoder, Transformations};
use std::io::{BufRead, Seek};

/// Read a PNG image into RGBA
pub fn decode_png<R: BufRead + Seek>(reader: R) -> IoResult<DecodedImage> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::EXPAND);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let info = reader.info();
    let width = info.width;
    let height = info.height;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let (color_type, bit_depth) = reader.output_color_type();
    let samples = match color_type {
        ColorType::Grayscale => 1,
        ColorType::GrayscaleAlpha => 2,
        ColorType::Rgb => 3,
        ColorType::Rgba => 4,
        ColorType::Indexed => {
            return Err(IoError::UnsupportedFormat(
                "PNG palette was not expanded".to_string(),
            ));
        }
    };
    let bytes_per_sample = match bit_depth {
        BitDepth::Eight => 1,
        BitDepth::Sixteen => 2,
        _ => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported PNG output depth: {:?} {:?}",
                color_type, bit_depth
            )));
        }
    };
    let pixel_bytes = samples * bytes_per_sample;

    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];
    let mut rgba = Vec::with_capacity(width as usize * height as usize * 4);

    for y in 0..height as usize {
        let row_start = y * bytes_per_row;
        let row = data
            .get(row_start..row_start + width as usize * pixel_bytes)
            .ok_or_else(|| IoError::InvalidData(format!("PNG row {} truncated", y)))?;
        for px in row.chunks_exact(pixel_bytes) {
            // 16-bit samples are big-endian; keep the high byte
            let s = |i: usize| px[i * bytes_per_sample];
            let pixel = match samples {
                1 => [s(0), s(0), s(0), 255],
                2 => [s(0), s(0), s(0), s(1)],
                3 => [s(0), s(1), s(2), 255],
                _ => [s(0), s(1), s(2), s(3)],
            };
            rgba.extend_from_slice(&pixel);
        }
    }

    DecodedImage::new(width, height, rgba)
}
