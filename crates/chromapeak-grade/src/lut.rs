//! Hue-segment lookup table
//!
//! The hue circle is split into `segments` equal slices. Every extracted
//! color pulls the slices near its hue towards its adjustment:
//!
//! - full influence within the color's half arc width (floored at
//!   `min_half_width`)
//! - a smoothstep falloff over the next `feather` degrees
//! - no influence beyond that
//!
//! Where several colors reach the same segment their adjustments are
//! averaged by influence, and the segment strength (the summed
//! influence) is capped at 1.

use crate::{GradeError, GradeResult};
use chromapeak_core::circular_distance;
use chromapeak_hue::{PeakColor, smoothstep};

// =============================================================================
// Options
// =============================================================================

/// A user adjustment attached to one extracted color
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ColorAdjustment {
    /// Hue rotation in degrees
    pub hue_shift: f64,
    /// Saturation delta
    pub saturation: f64,
    /// Lightness delta
    pub lightness: f64,
}

impl ColorAdjustment {
    pub fn new(hue_shift: f64, saturation: f64, lightness: f64) -> Self {
        Self {
            hue_shift,
            saturation,
            lightness,
        }
    }

    /// Whether the adjustment changes nothing
    pub fn is_identity(&self) -> bool {
        self.hue_shift == 0.0 && self.saturation == 0.0 && self.lightness == 0.0
    }

    fn is_finite(&self) -> bool {
        self.hue_shift.is_finite() && self.saturation.is_finite() && self.lightness.is_finite()
    }

    fn scaled(&self, k: f64) -> Self {
        Self::new(self.hue_shift * k, self.saturation * k, self.lightness * k)
    }
}

/// Options for lookup-table construction
#[derive(Debug, Clone, PartialEq)]
pub struct GradeOptions {
    /// Number of hue segments (>= 1)
    pub segments: usize,
    /// Smallest full-strength half width in degrees
    pub min_half_width: f64,
    /// Width of the falloff band in degrees
    pub feather: f64,
}

impl Default for GradeOptions {
    fn default() -> Self {
        Self {
            segments: 8,
            min_half_width: 15.0,
            feather: 20.0,
        }
    }
}

impl GradeOptions {
    /// Check every field against its documented range
    pub fn validate(&self) -> GradeResult<()> {
        if self.segments == 0 {
            return Err(GradeError::InvalidParameters(
                "segments must be at least 1".into(),
            ));
        }
        for (name, v) in [("min_half_width", self.min_half_width), ("feather", self.feather)] {
            if !v.is_finite() || v < 0.0 {
                return Err(GradeError::InvalidParameters(format!(
                    "{name} must be finite and non-negative, got {v}"
                )));
            }
        }
        Ok(())
    }

    /// Hue at the center of segment `s`, in degrees
    pub fn segment_center(&self, s: usize) -> f64 {
        (s as f64 + 0.5) * 360.0 / self.segments as f64
    }
}

// =============================================================================
// Table
// =============================================================================

/// One slice of the hue circle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HueSegment {
    /// Center hue in degrees
    pub center: f64,
    /// Influence-weighted adjustment
    pub adjustment: ColorAdjustment,
    /// Summed influence, in [0, 1]
    pub strength: f64,
}

/// Evenly spaced hue segments, ordered by center hue
#[derive(Debug, Clone, PartialEq)]
pub struct HueLut {
    segments: Vec<HueSegment>,
}

impl HueLut {
    pub fn segments(&self) -> &[HueSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Pack the table as `[hue_shift_radians, saturation, lightness, strength]`
    /// quadruples, one per segment
    pub fn to_gpu_data(&self) -> Vec<f32> {
        self.segments
            .iter()
            .flat_map(|s| {
                [
                    s.adjustment.hue_shift.to_radians() as f32,
                    s.adjustment.saturation as f32,
                    s.adjustment.lightness as f32,
                    s.strength as f32,
                ]
            })
            .collect()
    }

    /// Effective adjustment at `hue`
    ///
    /// Linearly interpolates between the two nearest segment centers
    /// (wrapping around 0) and scales by the interpolated strength.
    pub fn sample(&self, hue: f64) -> ColorAdjustment {
        let n = self.segments.len();
        if n == 0 {
            return ColorAdjustment::default();
        }
        let pos = hue.rem_euclid(360.0) * n as f64 / 360.0 - 0.5;
        let base = pos.floor();
        let t = pos - base;
        let i0 = (base as isize).rem_euclid(n as isize) as usize;
        let i1 = (i0 + 1) % n;
        let (a, b) = (&self.segments[i0], &self.segments[i1]);

        let lerp = |x: f64, y: f64| x + (y - x) * t;
        let blend = |s: &HueSegment| s.adjustment.scaled(s.strength);
        let (ea, eb) = (blend(a), blend(b));
        ColorAdjustment::new(
            lerp(ea.hue_shift, eb.hue_shift),
            lerp(ea.saturation, eb.saturation),
            lerp(ea.lightness, eb.lightness),
        )
    }
}

/// Influence of a color with the given half width at hue distance `d`
fn influence(d: f64, half_width: f64, feather: f64) -> f64 {
    if d <= half_width {
        1.0
    } else if feather <= 0.0 {
        0.0
    } else {
        1.0 - smoothstep(half_width, half_width + feather, d)
    }
}

/// Build a hue-segment lookup table
///
/// # Arguments
///
/// * `colors` - Extracted colors; each one's arc width sets its reach
/// * `adjustments` - One adjustment per color, in the same order
/// * `options` - Segment count and falloff
///
/// # Errors
///
/// [`GradeError::LengthMismatch`] when the slices differ in length and
/// [`GradeError::InvalidParameters`] for invalid options or non-finite
/// adjustments.
pub fn build_lut(
    colors: &[PeakColor],
    adjustments: &[ColorAdjustment],
    options: &GradeOptions,
) -> GradeResult<HueLut> {
    options.validate()?;
    if colors.len() != adjustments.len() {
        return Err(GradeError::LengthMismatch {
            colors: colors.len(),
            adjustments: adjustments.len(),
        });
    }
    if let Some(i) = adjustments.iter().position(|a| !a.is_finite()) {
        return Err(GradeError::InvalidParameters(format!(
            "adjustment {i} is not finite"
        )));
    }

    let reach: Vec<f64> = colors
        .iter()
        .map(|c| (c.peak.width() as f64 / 2.0).max(options.min_half_width))
        .collect();

    let segments = (0..options.segments)
        .map(|s| {
            let center = options.segment_center(s);
            let mut total = 0.0;
            let mut sum = ColorAdjustment::default();
            for ((color, adj), &half_width) in colors.iter().zip(adjustments).zip(&reach) {
                let w = influence(circular_distance(center, color.hue), half_width, options.feather);
                if w > 0.0 {
                    total += w;
                    sum.hue_shift += adj.hue_shift * w;
                    sum.saturation += adj.saturation * w;
                    sum.lightness += adj.lightness * w;
                }
            }
            let adjustment = if total > 0.0 {
                sum.scaled(1.0 / total)
            } else {
                ColorAdjustment::default()
            };
            HueSegment {
                center,
                adjustment,
                strength: total.min(1.0),
            }
        })
        .collect();

    Ok(HueLut { segments })
}
