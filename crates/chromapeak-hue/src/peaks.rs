//! Peak detection on a circular hue histogram
//!
//! A peak is a bucket strictly greater than both circular neighbors and
//! at least `max * min_height_ratio`. Each peak's support is the widest
//! strictly decreasing run on either side of it, found by walking
//! outward until the values stop falling.
//!
//! Arcs of different peaks are not reconciled: a shallow or flat valley
//! between two peaks can leave their arcs overlapping.

use crate::error::{HueResult, check_range};
use chromapeak_core::{HUE_BUCKETS, HueArc, HueRing, wrap_index};
use tracing::debug;

/// Maximum number of steps the boundary walk takes in one direction
const MAX_WALK: usize = HUE_BUCKETS / 2;

/// Options for peak detection
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct PeakOptions {
    /// Minimum peak height relative to the highest bucket, in [0, 1]
    pub min_height_ratio: f64,
}

impl Default for PeakOptions {
    fn default() -> Self {
        Self {
            min_height_ratio: 0.1,
        }
    }
}

impl PeakOptions {
    /// Check every field against its documented range
    pub fn validate(&self) -> HueResult<()> {
        check_range("min_height_ratio", self.min_height_ratio, 0.0, 1.0)
    }
}

/// A local maximum of the hue histogram and its supporting arc
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Peak {
    /// Hue bucket of the local maximum, in [0, 360)
    pub index: usize,
    /// Bucket value at `index`
    pub value: f64,
    /// First bucket of the arc (inclusive)
    pub left: usize,
    /// Last bucket of the arc (inclusive); `right < left` means the arc
    /// wraps through 0
    pub right: usize,
}

impl Peak {
    /// The peak's supporting arc
    pub fn arc(&self) -> HueArc {
        HueArc::new(self.left, self.right)
    }

    /// Number of buckets in the arc
    pub fn width(&self) -> usize {
        self.arc().width()
    }
}

/// Find the valley-to-valley bounds around `index`
///
/// Walks left, then right, while each farther bucket is strictly
/// smaller than the one before it. Each walk takes at most 180 steps;
/// the right walk is further limited so that the arc never covers more
/// than the full ring.
pub fn valley_bounds(values: &HueRing, index: usize) -> HueArc {
    let idx = index as isize;

    let mut left_steps = 0;
    while left_steps < MAX_WALK {
        let closer = values.at(idx - left_steps as isize);
        let farther = values.at(idx - left_steps as isize - 1);
        if farther >= closer {
            break;
        }
        left_steps += 1;
    }

    let right_limit = MAX_WALK.min(HUE_BUCKETS - 1 - left_steps);
    let mut right_steps = 0;
    while right_steps < right_limit {
        let closer = values.at(idx + right_steps as isize);
        let farther = values.at(idx + right_steps as isize + 1);
        if farther >= closer {
            break;
        }
        right_steps += 1;
    }

    HueArc::new(
        wrap_index(idx - left_steps as isize),
        wrap_index(idx + right_steps as isize),
    )
}

/// Whether bucket `i` is a strict local maximum on the ring
#[inline]
fn is_local_max(values: &HueRing, i: usize) -> bool {
    let v = values[i];
    let i = i as isize;
    v > values.at(i - 1) && v > values.at(i + 1)
}

/// Detect peaks in a circular histogram
///
/// # Arguments
///
/// * `values` - Usually smoothed bucket weights
/// * `options` - Relative height threshold
///
/// # Returns
///
/// Peaks sorted by descending value; ties keep ascending bucket order.
/// No near-duplicate elimination happens here.
pub fn detect_peaks(values: &HueRing, options: &PeakOptions) -> HueResult<Vec<Peak>> {
    options.validate()?;

    let threshold = values.max_value() * options.min_height_ratio;
    let mut peaks: Vec<Peak> = (0..HUE_BUCKETS)
        .filter(|&i| is_local_max(values, i) && values[i] >= threshold)
        .map(|i| {
            let arc = valley_bounds(values, i);
            Peak {
                index: i,
                value: values[i],
                left: arc.left,
                right: arc.right,
            }
        })
        .collect();

    peaks.sort_by(|a, b| b.value.total_cmp(&a.value));
    debug!(threshold, count = peaks.len(), "hue peaks detected");
    Ok(peaks)
}
