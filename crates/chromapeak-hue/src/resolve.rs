//! Peak color resolution
//!
//! Turns detected peaks into representative OKLCH colors, ranks them by
//! the smoothed histogram mass under each peak's arc and merges colors
//! that are perceptually too close (CIEDE2000).
//!
//! The algorithm proceeds in 3 phases:
//! 1. **Resolve**: one color per peak, either the exact peak bucket
//!    ([`ResolveMode::Peak`]) or a weighted average over the arc
//!    ([`ResolveMode::Average`])
//! 2. **Rank**: sort by descending arc weight
//! 3. **Merge**: greedy first-match de-duplication, then truncation to
//!    `max_colors`

use crate::error::{HueError, HueResult, check_range};
use crate::histogram::HueHistogram;
use crate::peaks::Peak;
use chromapeak_color::{Oklch, perceptual_distance};
use chromapeak_filter::SmoothedBuckets;
use tracing::{debug, trace};

/// Upper clamp for resolved chroma
pub const MAX_CHROMA: f64 = 0.4;

// =============================================================================
// Options
// =============================================================================

/// How a peak is turned into one color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum ResolveMode {
    /// Use the average color of the peak bucket itself
    Peak,
    /// Weighted circular mean over the buckets of the peak's arc
    #[default]
    Average,
}

/// Options for peak color resolution
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct ResolveOptions {
    /// Single bucket or arc average
    pub mode: ResolveMode,
    /// In average mode, buckets below `smoothed[peak] * threshold` are
    /// ignored. Range [0, 1].
    pub threshold: f64,
    /// Maximum number of colors returned (>= 1)
    pub max_colors: usize,
    /// CIEDE2000 distance under which two colors merge; 0 disables merging
    pub min_distance: f64,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            mode: ResolveMode::default(),
            threshold: 0.0,
            max_colors: 5,
            min_distance: 0.0,
        }
    }
}

impl ResolveOptions {
    /// Check every field against its documented range
    ///
    /// A negative `min_distance` is not an error; it disables merging.
    pub fn validate(&self) -> HueResult<()> {
        check_range("threshold", self.threshold, 0.0, 1.0)?;
        if self.max_colors < 1 {
            return Err(HueError::InvalidParameters(
                "max_colors must be at least 1".into(),
            ));
        }
        if self.min_distance.is_nan() {
            return Err(HueError::InvalidParameters(
                "min_distance must be a number".into(),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// PeakColor
// =============================================================================

/// One extracted color and the peak it came from
#[derive(Debug, Clone, PartialEq)]
pub struct PeakColor {
    /// Hue in degrees, [0, 360)
    pub hue: f64,
    /// OKLCH chroma, clamped to [0, 0.4]
    pub chroma: f64,
    /// OKLCH lightness, clamped to [0, 1]
    pub lightness: f64,
    /// Smoothed histogram mass under the peak's arc
    pub weight: f64,
    /// CSS color token, e.g. `oklch(0.650 0.120 90.0)`
    pub description: String,
    /// The originating peak
    pub peak: Peak,
}

impl PeakColor {
    /// Build a color, clamping lightness and chroma and formatting the
    /// description
    pub fn new(hue: f64, chroma: f64, lightness: f64, weight: f64, peak: Peak) -> Self {
        let lightness = lightness.clamp(0.0, 1.0);
        let chroma = chroma.clamp(0.0, MAX_CHROMA);
        Self {
            hue,
            chroma,
            lightness,
            weight,
            description: describe(lightness, chroma, hue),
            peak,
        }
    }

    /// The color as OKLCH
    pub fn to_oklch(&self) -> Oklch {
        Oklch::new(self.lightness, self.chroma, self.hue)
    }
}

/// Format an OKLCH triple as a CSS color token
pub fn describe(lightness: f64, chroma: f64, hue: f64) -> String {
    format!("oklch({lightness:.3} {chroma:.3} {hue:.1})")
}

// =============================================================================
// Main API
// =============================================================================

/// Resolve detected peaks into ranked, de-duplicated colors
///
/// # Arguments
///
/// * `histogram` - Source histogram (per-bucket chroma/lightness data)
/// * `peaks` - Peaks detected on `smoothed`
/// * `smoothed` - Smoothed bucket weights
/// * `options` - Resolution parameters
///
/// # Returns
///
/// At most `max_colors` colors sorted by descending weight before the
/// merge step. Peaks without sample data are omitted.
pub fn resolve_colors(
    histogram: &HueHistogram,
    peaks: &[Peak],
    smoothed: &SmoothedBuckets,
    options: &ResolveOptions,
) -> HueResult<Vec<PeakColor>> {
    options.validate()?;

    let mut colors: Vec<PeakColor> = peaks
        .iter()
        .filter_map(|peak| {
            let resolved = match options.mode {
                ResolveMode::Peak => resolve_at_peak(histogram, peak, smoothed),
                ResolveMode::Average => {
                    resolve_average(histogram, peak, smoothed, options.threshold)
                }
            };
            if resolved.is_none() {
                trace!(index = peak.index, "peak dropped: no sampled color data");
            }
            resolved
        })
        .collect();

    colors.sort_by(|a, b| b.weight.total_cmp(&a.weight));
    let resolved = colors.len();
    let mut colors = merge_similar(colors, options.min_distance);
    colors.truncate(options.max_colors);

    debug!(
        peaks = peaks.len(),
        resolved,
        returned = colors.len(),
        "peak colors resolved"
    );
    Ok(colors)
}

/// Color of the peak bucket itself
fn resolve_at_peak(
    histogram: &HueHistogram,
    peak: &Peak,
    smoothed: &SmoothedBuckets,
) -> Option<PeakColor> {
    let chroma = histogram.average_chroma(peak.index)?;
    let lightness = histogram.average_lightness(peak.index)?;
    let weight = smoothed.values().sum_over(peak.arc());
    Some(PeakColor::new(
        peak.index as f64,
        chroma,
        lightness,
        weight,
        *peak,
    ))
}

/// Weighted circular mean over the buckets of the peak's arc
fn resolve_average(
    histogram: &HueHistogram,
    peak: &Peak,
    smoothed: &SmoothedBuckets,
    threshold: f64,
) -> Option<PeakColor> {
    let min_value = smoothed.get(peak.index) * threshold;

    let mut sum_sin = 0.0;
    let mut sum_cos = 0.0;
    let mut sum_chroma = 0.0;
    let mut sum_lightness = 0.0;
    let mut sum_weight = 0.0;

    for bucket in peak.arc().buckets() {
        let w = smoothed.get(bucket);
        if w < min_value {
            continue;
        }
        let (Some(c), Some(l)) = (
            histogram.average_chroma(bucket),
            histogram.average_lightness(bucket),
        ) else {
            continue;
        };
        let angle = (bucket as f64).to_radians();
        sum_sin += w * angle.sin();
        sum_cos += w * angle.cos();
        sum_chroma += w * c;
        sum_lightness += w * l;
        sum_weight += w;
    }

    if sum_weight <= 0.0 {
        return None;
    }

    let hue = sum_sin.atan2(sum_cos).to_degrees().rem_euclid(360.0);
    let hue = if hue >= 360.0 { 0.0 } else { hue };
    let weight = smoothed.values().sum_over(peak.arc());
    Some(PeakColor::new(
        hue,
        sum_chroma / sum_weight,
        sum_lightness / sum_weight,
        weight,
        *peak,
    ))
}

/// Greedy perceptual de-duplication
///
/// Candidates are visited in order. Each is compared against the accepted
/// colors in order, and only the first one closer than `min_distance`
/// (CIEDE2000) matters: the candidate replaces it in place when its
/// chroma is strictly higher and is dropped otherwise. A candidate with
/// no close accepted color is appended.
///
/// Returns the input unchanged when `min_distance <= 0` or there are
/// fewer than 2 colors.
pub fn merge_similar(colors: Vec<PeakColor>, min_distance: f64) -> Vec<PeakColor> {
    if min_distance <= 0.0 || colors.len() < 2 {
        return colors;
    }

    colors
        .into_iter()
        .fold(Vec::new(), |mut accepted: Vec<PeakColor>, candidate| {
            let lch = candidate.to_oklch();
            let close = accepted
                .iter()
                .position(|a| perceptual_distance(a.to_oklch(), lch) < min_distance);
            match close {
                Some(i) if candidate.chroma > accepted[i].chroma => {
                    trace!(
                        replaced = %accepted[i].description,
                        by = %candidate.description,
                        "merged similar color"
                    );
                    accepted[i] = candidate;
                }
                Some(i) => {
                    trace!(
                        kept = %accepted[i].description,
                        dropped = %candidate.description,
                        "merged similar color"
                    );
                }
                None => accepted.push(candidate),
            }
            accepted
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::histogram::{HistogramOptions, build_histogram};
    use chromapeak_color::rgb_to_oklch;
    use chromapeak_core::{HueRing, PixelBuffer, circular_distance};

    fn peak(index: usize, left: usize, right: usize) -> Peak {
        Peak {
            index,
            value: 1.0,
            left,
            right,
        }
    }

    fn color(hue: f64, chroma: f64, lightness: f64, weight: f64) -> PeakColor {
        PeakColor::new(hue, chroma, lightness, weight, peak(hue as usize % 360, 0, 0))
    }

    fn histogram_of(pixels: &[(u8, u8, u8)]) -> HueHistogram {
        let data: Vec<u8> = pixels.iter().flat_map(|&(r, g, b)| [r, g, b, 255]).collect();
        let buf = PixelBuffer::new(&data, pixels.len() as u32, 1).unwrap();
        build_histogram(&buf, &HistogramOptions::default()).unwrap()
    }

    #[test]
    fn test_describe_format() {
        assert_eq!(describe(0.65, 0.12, 90.0), "oklch(0.650 0.120 90.0)");
        assert_eq!(describe(0.12345, 0.0006, 359.96), "oklch(0.123 0.001 360.0)");
    }

    #[test]
    fn test_peak_color_clamps() {
        let c = color(10.0, 0.9, 1.3, 1.0);
        assert_eq!(c.chroma, MAX_CHROMA);
        assert_eq!(c.lightness, 1.0);
        let c = color(10.0, -0.1, -0.2, 1.0);
        assert_eq!(c.chroma, 0.0);
        assert_eq!(c.lightness, 0.0);
    }

    #[test]
    fn test_peak_mode_uses_bucket_average() {
        let hist = histogram_of(&[(200, 60, 60); 4]);
        let (_, idx) = hist.weight().max();
        let smoothed = SmoothedBuckets::new(hist.weight().clone());
        let p = peak(idx, idx, idx);
        let opts = ResolveOptions {
            mode: ResolveMode::Peak,
            ..Default::default()
        };
        let colors = resolve_colors(&hist, &[p], &smoothed, &opts).unwrap();
        assert_eq!(colors.len(), 1);
        assert_eq!(colors[0].hue, idx as f64);
        assert!((colors[0].chroma - hist.average_chroma(idx).unwrap()).abs() < 1e-12);
        assert!((colors[0].weight - hist.weight()[idx]).abs() < 1e-12);
    }

    #[test]
    fn test_peak_mode_drops_unsampled_bucket() {
        let hist = HueHistogram::empty();
        let smoothed = SmoothedBuckets::new(HueRing::new());
        let opts = ResolveOptions {
            mode: ResolveMode::Peak,
            ..Default::default()
        };
        let colors = resolve_colors(&hist, &[peak(12, 10, 14)], &smoothed, &opts).unwrap();
        assert!(colors.is_empty());
    }

    fn two_bucket_setup(low_weight: f64) -> (HueHistogram, SmoothedBuckets, usize, usize) {
        let hist = histogram_of(&[(200, 60, 60), (60, 60, 200)]);
        let a = rgb_to_oklch(200, 60, 60).h.floor() as usize;
        let b = rgb_to_oklch(60, 60, 200).h.floor() as usize;
        let mut ring = HueRing::new();
        ring.add(a, 1.0);
        ring.add(b, low_weight);
        (hist, SmoothedBuckets::new(ring), a, b)
    }

    #[test]
    fn test_average_mode_circular_mean() {
        let (hist, smoothed, a, b) = two_bucket_setup(1.0);
        let whole_ring = peak(a, (a + 1) % 360, a);
        let colors =
            resolve_colors(&hist, &[whole_ring], &smoothed, &ResolveOptions::default()).unwrap();
        assert_eq!(colors.len(), 1);

        let (ra, rb) = ((a as f64).to_radians(), (b as f64).to_radians());
        let mid = (ra.sin() + rb.sin())
            .atan2(ra.cos() + rb.cos())
            .to_degrees()
            .rem_euclid(360.0);
        assert!(circular_distance(colors[0].hue, mid) < 1e-9);
        assert!((colors[0].weight - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_average_mode_threshold_excludes_low_buckets() {
        let (hist, smoothed, a, _) = two_bucket_setup(0.4);
        let whole_ring = peak(a, (a + 1) % 360, a);

        let strict = ResolveOptions {
            threshold: 0.5,
            ..Default::default()
        };
        let colors = resolve_colors(&hist, &[whole_ring], &smoothed, &strict).unwrap();
        assert!(circular_distance(colors[0].hue, a as f64) < 1e-9);
        assert!((colors[0].chroma - hist.average_chroma(a).unwrap()).abs() < 1e-12);

        let loose = resolve_colors(&hist, &[whole_ring], &smoothed, &ResolveOptions::default())
            .unwrap();
        assert!(circular_distance(loose[0].hue, a as f64) > 1.0);
    }

    #[test]
    fn test_average_mode_zero_weight_dropped() {
        let hist = histogram_of(&[(200, 60, 60)]);
        let smoothed = SmoothedBuckets::new(HueRing::new());
        let colors =
            resolve_colors(&hist, &[peak(100, 90, 110)], &smoothed, &ResolveOptions::default())
                .unwrap();
        assert!(colors.is_empty());
    }

    #[test]
    fn test_merge_keeps_higher_chroma() {
        let a = color(30.0, 0.12, 0.6, 5.0);
        let b = color(31.0, 0.14, 0.6, 3.0);
        let merged = merge_similar(vec![a, b.clone()], 10.0);
        assert_eq!(merged, vec![b]);
    }

    #[test]
    fn test_merge_drops_lower_chroma() {
        let a = color(30.0, 0.14, 0.6, 5.0);
        let b = color(31.0, 0.12, 0.6, 3.0);
        let merged = merge_similar(vec![a.clone(), b], 10.0);
        assert_eq!(merged, vec![a]);
    }

    #[test]
    fn test_merge_disabled() {
        let a = color(30.0, 0.15, 0.6, 5.0);
        let b = color(31.0, 0.10, 0.6, 3.0);
        assert_eq!(merge_similar(vec![a.clone(), b.clone()], 0.0).len(), 2);
        assert_eq!(merge_similar(vec![a.clone(), b], -3.0).len(), 2);
        assert_eq!(merge_similar(vec![a], 50.0).len(), 1);
    }

    #[test]
    fn test_merge_idempotent() {
        let colors = vec![
            color(30.0, 0.12, 0.6, 9.0),
            color(33.0, 0.14, 0.6, 8.0),
            color(150.0, 0.10, 0.7, 7.0),
            color(260.0, 0.15, 0.5, 6.0),
            color(262.0, 0.11, 0.5, 5.0),
        ];
        let once = merge_similar(colors, 10.0);
        assert_eq!(once.len(), 3);
        let twice = merge_similar(once.clone(), 10.0);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_truncates_to_max_colors() {
        let hist = histogram_of(&[(200, 60, 60), (60, 200, 60), (60, 60, 200)]);
        let smoothed = SmoothedBuckets::new(hist.weight().clone());
        let peaks: Vec<Peak> = (0..360)
            .filter(|&i| hist.count_at(i) > 0)
            .map(|i| peak(i, i, i))
            .collect();
        let opts = ResolveOptions {
            mode: ResolveMode::Peak,
            max_colors: 2,
            ..Default::default()
        };
        let colors = resolve_colors(&hist, &peaks, &smoothed, &opts).unwrap();
        assert_eq!(colors.len(), 2);
        assert!(colors[0].weight >= colors[1].weight);
    }

    #[test]
    fn test_invalid_options() {
        let hist = HueHistogram::empty();
        let smoothed = SmoothedBuckets::new(HueRing::new());
        let bad = ResolveOptions {
            max_colors: 0,
            ..Default::default()
        };
        assert!(resolve_colors(&hist, &[], &smoothed, &bad).is_err());
        let bad = ResolveOptions {
            threshold: 1.2,
            ..Default::default()
        };
        assert!(resolve_colors(&hist, &[], &smoothed, &bad).is_err());
    }
}
