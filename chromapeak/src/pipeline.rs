//! Color extraction pipeline
//!
//! Runs the four analysis stages in order and keeps every intermediate
//! result:
//!
//! 1. hue histogram of the pixel buffer
//! 2. circular Gaussian smoothing of the bucket weights
//! 3. peak detection on the smoothed weights
//! 4. peak color resolution, ranking and perceptual merging

use crate::{Error, Result};
use chromapeak_core::PixelBuffer;
use chromapeak_filter::{SmoothedBuckets, smooth_circular};
use chromapeak_hue::{
    HistogramOptions, HueHistogram, Peak, PeakColor, PeakOptions, ResolveMode, ResolveOptions,
    build_histogram, detect_peaks, resolve_colors,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, debug_span};

/// Default smoothing sigma, in buckets
pub const DEFAULT_SIGMA: f64 = 2.0;

/// Options for the whole pipeline
///
/// The nested defaults are tuned for photographs and differ from the
/// per-stage defaults: a much lower peak threshold, a 0.2 averaging
/// threshold and a CIEDE2000 merge distance of 10.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PipelineOptions {
    pub histogram: HistogramOptions,
    /// Gaussian sigma in buckets; `<= 0` disables smoothing
    pub sigma: f64,
    pub peaks: PeakOptions,
    pub resolve: ResolveOptions,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            histogram: HistogramOptions::default(),
            sigma: DEFAULT_SIGMA,
            peaks: PeakOptions {
                min_height_ratio: 0.005,
            },
            resolve: ResolveOptions {
                mode: ResolveMode::Average,
                threshold: 0.2,
                max_colors: 5,
                min_distance: 10.0,
            },
        }
    }
}

impl PipelineOptions {
    /// Report the first out-of-range option
    pub fn validate(&self) -> Result<()> {
        self.histogram.validate()?;
        if !self.sigma.is_finite() {
            return Err(Error::InvalidParameters(format!(
                "sigma must be finite, got {}",
                self.sigma
            )));
        }
        self.peaks.validate()?;
        self.resolve.validate()?;
        Ok(())
    }
}

/// Every stage's output from one pipeline run
#[derive(Debug, Clone)]
pub struct Extraction {
    pub histogram: HueHistogram,
    pub smoothed: SmoothedBuckets,
    pub peaks: Vec<Peak>,
    pub colors: Vec<PeakColor>,
}

impl Extraction {
    /// Whether no color could be extracted
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// Extract dominant colors from an RGBA buffer
///
/// # Arguments
///
/// * `buffer` - Shape-checked RGBA pixels
/// * `options` - Pipeline options, validated before any work
///
/// # Returns
///
/// All intermediate results. A buffer without qualifying pixels yields an
/// empty histogram, no peaks and no colors.
pub fn extract_colors(buffer: &PixelBuffer, options: &PipelineOptions) -> Result<Extraction> {
    let _span = debug_span!("extract_colors", width = buffer.width(), height = buffer.height())
        .entered();
    options.validate()?;

    let histogram = build_histogram(buffer, &options.histogram)?;
    let smoothed = smooth_circular(histogram.weight(), options.sigma)?;
    let peaks = detect_peaks(smoothed.values(), &options.peaks)?;
    let colors = resolve_colors(&histogram, &peaks, &smoothed, &options.resolve)?;

    debug!(
        peaks = peaks.len(),
        colors = colors.len(),
        "color extraction finished"
    );
    Ok(Extraction {
        histogram,
        smoothed,
        peaks,
        colors,
    })
}

/// Extract dominant colors from raw RGBA bytes
///
/// # Errors
///
/// Returns [`chromapeak_core::Error::InputShape`] (wrapped) when
/// `data.len() != width * height * 4`.
pub fn extract_colors_from_rgba(
    data: &[u8],
    width: u32,
    height: u32,
    options: &PipelineOptions,
) -> Result<Extraction> {
    let buffer = PixelBuffer::new(data, width, height)?;
    extract_colors(&buffer, options)
}

/// Decode an image file and extract its dominant colors
///
/// With `max_dimension`, the image is first box-downsampled so that
/// neither side exceeds it.
pub fn extract_colors_from_path<P: AsRef<Path>>(
    path: P,
    max_dimension: Option<u32>,
    options: &PipelineOptions,
) -> Result<Extraction> {
    let mut image = chromapeak_io::read_image(path.as_ref())?;
    if let Some(max) = max_dimension {
        image = chromapeak_io::downsample(&image, max)?;
    }
    debug!(
        path = %path.as_ref().display(),
        width = image.width,
        height = image.height,
        "image decoded"
    );
    extract_colors(&image.as_buffer()?, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let o = PipelineOptions::default();
        assert_eq!(o.sigma, 2.0);
        assert_eq!(o.peaks.min_height_ratio, 0.005);
        assert_eq!(o.resolve.threshold, 0.2);
        assert_eq!(o.resolve.max_colors, 5);
        assert_eq!(o.resolve.min_distance, 10.0);
        assert_eq!(o.histogram, HistogramOptions::default());
        assert!(o.validate().is_ok());
    }

    #[test]
    fn test_wrong_length_is_input_shape() {
        let err = extract_colors_from_rgba(&[0; 15], 2, 2, &PipelineOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::Core(chromapeak_core::Error::InputShape {
                expected: 16,
                actual: 15
            })
        ));
    }

    #[test]
    fn test_nan_sigma_rejected() {
        let o = PipelineOptions {
            sigma: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(o.validate(), Err(Error::InvalidParameters(_))));
    }

    #[test]
    fn test_invalid_nested_option() {
        let mut o = PipelineOptions::default();
        o.resolve.max_colors = 0;
        assert!(matches!(
            extract_colors_from_rgba(&[0; 4], 1, 1, &o),
            Err(Error::Hue(_))
        ));
    }

    #[test]
    fn test_zero_area_image() {
        let out = extract_colors_from_rgba(&[], 0, 0, &PipelineOptions::default()).unwrap();
        assert!(out.histogram.is_empty());
        assert!(out.peaks.is_empty());
        assert!(out.is_empty());
    }
}
