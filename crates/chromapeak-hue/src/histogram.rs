//! Hue histogram construction
//!
//! Scans an RGBA buffer, converts every usable pixel to OKLCH and
//! accumulates a 360-bucket circular histogram indexed by integer hue
//! degree. Alongside the weight of each bucket, the histogram keeps the
//! chroma sum, lightness sum and pixel count so that later stages can
//! recover an average color per bucket.
//!
//! Pixel filtering happens in this order:
//! 1. alpha below [`HistogramOptions::alpha_cutoff`] -> skipped entirely
//! 2. lightness outside `[margin, 1 - margin]` -> skipped entirely
//! 3. the chroma gate scales the weight only; gated pixels still count
//!    towards the per-bucket chroma/lightness averages
//!
//! The scan runs over fixed bands of rows whose partial histograms are
//! merged in band order, so the optional `parallel` feature produces the
//! same result as the sequential build.

use crate::error::{HueResult, check_range};
use chromapeak_color::{Oklch, rgb_to_oklch};
use chromapeak_core::{CHANNELS, HUE_BUCKETS, HueRing, PixelBuffer, PixelSample};
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Default minimum chroma for a pixel to carry weight
pub const DEFAULT_CHROMA_THRESHOLD: f64 = 0.02;

/// Default alpha cutoff: pixels below ~78% opacity are ignored
pub const DEFAULT_ALPHA_CUTOFF: u8 = 200;

/// Rows per scan band; partial histograms are merged in band order
pub const BAND_ROWS: usize = 64;

// =============================================================================
// Options
// =============================================================================

/// How much weight a qualifying pixel adds to its hue bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum WeightMode {
    /// Every pixel weighs 1
    Count,
    /// Weight is the pixel's chroma
    Chroma,
    /// Chroma times a triangular lightness window peaking at L = 0.5:
    /// `max(0, 1 - 2|L - 0.5|)`
    #[default]
    ChromaLightness,
}

impl WeightMode {
    /// Weight of a color before the chroma gate is applied
    pub fn base_weight(self, color: Oklch) -> f64 {
        match self {
            WeightMode::Count => 1.0,
            WeightMode::Chroma => color.c,
            WeightMode::ChromaLightness => color.c * lightness_window(color.l),
        }
    }
}

/// Triangular window over lightness, 1 at L = 0.5 and 0 at L <= 0 or L >= 1
#[inline]
pub fn lightness_window(l: f64) -> f64 {
    (1.0 - 2.0 * (l - 0.5).abs()).max(0.0)
}

/// How low-chroma pixels are suppressed
///
/// Two weighting variants exist for near-neutral pixels. Both are kept
/// as named strategies; [`ChromaGate::Hard`] is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum ChromaGate {
    /// Weight is zeroed when chroma is below the threshold
    #[default]
    Hard,
    /// Weight ramps from 0 to full with a Hermite smoothstep as chroma
    /// goes from 0 to the threshold
    Smooth,
}

impl ChromaGate {
    /// Multiplier in [0, 1] applied to the base weight
    pub fn factor(self, chroma: f64, threshold: f64) -> f64 {
        match self {
            ChromaGate::Hard => {
                if chroma < threshold {
                    0.0
                } else {
                    1.0
                }
            }
            ChromaGate::Smooth => smoothstep(0.0, threshold, chroma),
        }
    }
}

/// Hermite smoothstep; a degenerate edge acts as a step at `edge1`
#[inline]
pub fn smoothstep(edge0: f64, edge1: f64, x: f64) -> f64 {
    if edge1 <= edge0 {
        return if x >= edge1 { 1.0 } else { 0.0 };
    }
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Options for histogram construction
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct HistogramOptions {
    /// Reference chroma for the gate (must be >= 0)
    pub chroma_threshold: f64,
    /// Per-pixel weighting
    pub weight_mode: WeightMode,
    /// Low-chroma suppression strategy
    pub chroma_gate: ChromaGate,
    /// Pixels with L < margin or L > 1 - margin are excluded (range [0, 0.5])
    pub lightness_margin: f64,
    /// Pixels with alpha below this value are excluded
    pub alpha_cutoff: u8,
}

impl Default for HistogramOptions {
    fn default() -> Self {
        Self {
            chroma_threshold: DEFAULT_CHROMA_THRESHOLD,
            weight_mode: WeightMode::default(),
            chroma_gate: ChromaGate::default(),
            lightness_margin: 0.0,
            alpha_cutoff: DEFAULT_ALPHA_CUTOFF,
        }
    }
}

impl HistogramOptions {
    /// Check every field against its documented range
    pub fn validate(&self) -> HueResult<()> {
        check_range("chroma_threshold", self.chroma_threshold, 0.0, f64::INFINITY)?;
        check_range("lightness_margin", self.lightness_margin, 0.0, 0.5)?;
        Ok(())
    }

    /// Weight contributed by one color, after the chroma gate
    pub fn weight_of(&self, color: Oklch) -> f64 {
        self.weight_mode.base_weight(color) * self.chroma_gate.factor(color.c, self.chroma_threshold)
    }

    #[inline]
    fn in_lightness_window(&self, l: f64) -> bool {
        l >= self.lightness_margin && l <= 1.0 - self.lightness_margin
    }
}

// =============================================================================
// Histogram
// =============================================================================

/// Circular hue histogram with per-bucket chroma and lightness sums
///
/// # Invariants
///
/// - every sequence has exactly 360 entries (enforced by [`HueRing`])
/// - `count[i] == 0` implies `chroma_sum[i] == lightness_sum[i] == 0`
/// - `total` is the sum of `weight`, `max` its maximum (0 when empty)
#[derive(Debug, Clone, PartialEq)]
pub struct HueHistogram {
    weight: HueRing,
    chroma_sum: HueRing,
    lightness_sum: HueRing,
    count: [u64; HUE_BUCKETS],
    max: f64,
    total: f64,
}

impl HueHistogram {
    /// An all-zero histogram
    pub fn empty() -> Self {
        Accumulator::new().finish()
    }

    /// Per-bucket weight
    #[inline]
    pub fn weight(&self) -> &HueRing {
        &self.weight
    }

    /// Per-bucket sum of chroma over included pixels
    #[inline]
    pub fn chroma_sum(&self) -> &HueRing {
        &self.chroma_sum
    }

    /// Per-bucket sum of lightness over included pixels
    #[inline]
    pub fn lightness_sum(&self) -> &HueRing {
        &self.lightness_sum
    }

    /// Per-bucket count of included pixels
    #[inline]
    pub fn count(&self) -> &[u64; HUE_BUCKETS] {
        &self.count
    }

    /// Count at one bucket (wrapped onto the ring)
    #[inline]
    pub fn count_at(&self, index: usize) -> u64 {
        self.count[index % HUE_BUCKETS]
    }

    /// Maximum bucket weight
    #[inline]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Sum of all bucket weights
    #[inline]
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Whether no pixel was included at all
    pub fn is_empty(&self) -> bool {
        self.count.iter().all(|&c| c == 0)
    }

    /// Mean chroma of the pixels in a bucket
    pub fn average_chroma(&self, index: usize) -> Option<f64> {
        let n = self.count_at(index);
        (n > 0).then(|| self.chroma_sum[index % HUE_BUCKETS] / n as f64)
    }

    /// Mean lightness of the pixels in a bucket
    pub fn average_lightness(&self, index: usize) -> Option<f64> {
        let n = self.count_at(index);
        (n > 0).then(|| self.lightness_sum[index % HUE_BUCKETS] / n as f64)
    }

    /// Combine two partial histograms by element-wise addition
    ///
    /// `max` and `total` are recomputed from the merged weights.
    pub fn merged(&self, other: &HueHistogram) -> HueHistogram {
        let mut acc = Accumulator::from_histogram(self);
        acc.merge(Accumulator::from_histogram(other));
        acc.finish()
    }
}

/// Mutable partial histogram for one scan band
#[derive(Debug, Clone)]
struct Accumulator {
    weight: HueRing,
    chroma_sum: HueRing,
    lightness_sum: HueRing,
    count: [u64; HUE_BUCKETS],
}

impl Accumulator {
    fn new() -> Self {
        Self {
            weight: HueRing::new(),
            chroma_sum: HueRing::new(),
            lightness_sum: HueRing::new(),
            count: [0; HUE_BUCKETS],
        }
    }

    fn from_histogram(h: &HueHistogram) -> Self {
        Self {
            weight: h.weight.clone(),
            chroma_sum: h.chroma_sum.clone(),
            lightness_sum: h.lightness_sum.clone(),
            count: h.count,
        }
    }

    fn add_pixel(&mut self, px: PixelSample, options: &HistogramOptions) {
        if px.a < options.alpha_cutoff {
            return;
        }
        let mut color = rgb_to_oklch(px.r, px.g, px.b);
        color.l = color.l.clamp(0.0, 1.0);
        if !options.in_lightness_window(color.l) {
            return;
        }

        let bucket = (color.h.floor() as usize) % HUE_BUCKETS;
        self.weight.add(bucket, options.weight_of(color));
        self.chroma_sum.add(bucket, color.c);
        self.lightness_sum.add(bucket, color.l);
        self.count[bucket] += 1;
    }

    fn add_band(mut self, band: &[u8], options: &HistogramOptions) -> Self {
        for chunk in band.chunks_exact(CHANNELS) {
            self.add_pixel(PixelSample::from_chunk(chunk), options);
        }
        self
    }

    fn merge(&mut self, other: Accumulator) {
        self.weight.accumulate(&other.weight);
        self.chroma_sum.accumulate(&other.chroma_sum);
        self.lightness_sum.accumulate(&other.lightness_sum);
        for (a, b) in self.count.iter_mut().zip(other.count.iter()) {
            *a += b;
        }
    }

    fn finish(self) -> HueHistogram {
        let max = self.weight.max_value();
        let total = self.weight.sum();
        HueHistogram {
            weight: self.weight,
            chroma_sum: self.chroma_sum,
            lightness_sum: self.lightness_sum,
            count: self.count,
            max,
            total,
        }
    }
}

// =============================================================================
// Main API
// =============================================================================

/// Build a hue histogram from an RGBA buffer
///
/// # Arguments
///
/// * `buffer` - Shape-checked RGBA pixels
/// * `options` - Filtering and weighting parameters
///
/// # Errors
///
/// Returns [`crate::HueError::InvalidParameters`] when an option is out of
/// range. An image without any qualifying pixel yields an all-zero
/// histogram, not an error.
pub fn build_histogram(buffer: &PixelBuffer, options: &HistogramOptions) -> HueResult<HueHistogram> {
    options.validate()?;

    let partials = scan_bands(buffer, options);
    let mut acc = Accumulator::new();
    for partial in partials {
        acc.merge(partial);
    }
    let histogram = acc.finish();

    debug!(
        width = buffer.width(),
        height = buffer.height(),
        included = histogram.count.iter().sum::<u64>(),
        total = histogram.total,
        max = histogram.max,
        "hue histogram built"
    );
    Ok(histogram)
}

#[cfg(not(feature = "parallel"))]
fn scan_bands(buffer: &PixelBuffer, options: &HistogramOptions) -> Vec<Accumulator> {
    buffer
        .row_bands(BAND_ROWS)
        .map(|band| Accumulator::new().add_band(band, options))
        .collect()
}

#[cfg(feature = "parallel")]
fn scan_bands(buffer: &PixelBuffer, options: &HistogramOptions) -> Vec<Accumulator> {
    let bands: Vec<&[u8]> = buffer.row_bands(BAND_ROWS).collect();
    bands
        .par_iter()
        .map(|band| Accumulator::new().add_band(band, options))
        .collect()
}
