//! HueRing, HueArc - Circular 360-bucket arrays
//!
//! Hue is a circular quantity: bucket 359 is adjacent to bucket 0.
//! [`HueRing`] stores one `f64` per integer hue degree and offers
//! wrap-around indexing; [`HueArc`] names a contiguous, possibly
//! wrapping, inclusive range of buckets.

use crate::error::{Error, Result};

/// Number of integer hue-degree buckets on the ring
pub const HUE_BUCKETS: usize = 360;

/// Wrap a signed bucket offset onto the ring
#[inline]
pub fn wrap_index(index: isize) -> usize {
    index.rem_euclid(HUE_BUCKETS as isize) as usize
}

/// Shortest angular distance between two hues in degrees, in `[0, 180]`
pub fn circular_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(360.0);
    if d > 180.0 { 360.0 - d } else { d }
}

/// Fixed-length circular array of 360 values
///
/// The length is part of the type, so every ring built anywhere in the
/// workspace has exactly one slot per hue degree.
#[derive(Debug, Clone, PartialEq)]
pub struct HueRing {
    data: [f64; HUE_BUCKETS],
}

impl Default for HueRing {
    fn default() -> Self {
        Self::new()
    }
}

impl HueRing {
    /// Create an all-zero ring
    pub fn new() -> Self {
        Self {
            data: [0.0; HUE_BUCKETS],
        }
    }

    /// Create a ring from a fixed-size array
    pub fn from_array(data: [f64; HUE_BUCKETS]) -> Self {
        Self { data }
    }

    /// Create a ring from a slice of exactly 360 values
    ///
    /// # Errors
    ///
    /// Returns [`Error::RingLength`] for any other length.
    pub fn from_slice(values: &[f64]) -> Result<Self> {
        let data: [f64; HUE_BUCKETS] = values.try_into().map_err(|_| Error::RingLength {
            expected: HUE_BUCKETS,
            actual: values.len(),
        })?;
        Ok(Self { data })
    }

    /// Number of buckets (always 360)
    #[inline]
    pub const fn len(&self) -> usize {
        HUE_BUCKETS
    }

    /// Always false; present for API symmetry with slices
    #[inline]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Get a value by bucket index, or `None` when `index >= 360`
    #[inline]
    pub fn get(&self, index: usize) -> Option<f64> {
        self.data.get(index).copied()
    }

    /// Get a value by signed offset, wrapping around the ring
    #[inline]
    pub fn at(&self, index: isize) -> f64 {
        self.data[wrap_index(index)]
    }

    /// Add `delta` to a bucket, wrapping the index
    #[inline]
    pub fn add(&mut self, index: usize, delta: f64) {
        self.data[index % HUE_BUCKETS] += delta;
    }

    /// Maximum value and its first bucket index
    pub fn max(&self) -> (f64, usize) {
        let mut best = (self.data[0], 0);
        for (i, &v) in self.data.iter().enumerate().skip(1) {
            if v > best.0 {
                best = (v, i);
            }
        }
        best
    }

    /// Maximum value on the ring
    pub fn max_value(&self) -> f64 {
        self.max().0
    }

    /// Sum of all values
    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }

    /// Sum of the values covered by `arc`
    ///
    /// A wrapping arc is summed as two sub-ranges, `[left, 359]` and
    /// `[0, right]`.
    pub fn sum_over(&self, arc: HueArc) -> f64 {
        if arc.wraps() {
            self.data[arc.left..].iter().sum::<f64>() + self.data[..=arc.right].iter().sum::<f64>()
        } else {
            self.data[arc.left..=arc.right].iter().sum()
        }
    }

    /// Element-wise addition of another ring
    pub fn accumulate(&mut self, other: &HueRing) {
        for (a, b) in self.data.iter_mut().zip(other.data.iter()) {
            *a += b;
        }
    }

    /// Get the underlying data as a slice
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Get the underlying fixed-size array
    pub fn as_array(&self) -> &[f64; HUE_BUCKETS] {
        &self.data
    }

    /// Iterate over values in bucket order
    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.data.iter()
    }
}

impl std::ops::Index<usize> for HueRing {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl<'a> IntoIterator for &'a HueRing {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

/// Inclusive arc of hue buckets
///
/// `left` and `right` are bucket indices in `[0, 360)`. When
/// `right < left` the arc wraps through bucket 0. An arc always
/// contains at least one bucket; `right == left - 1` (mod 360) covers
/// the whole ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HueArc {
    pub left: usize,
    pub right: usize,
}

impl HueArc {
    /// Create an arc, wrapping both ends onto the ring
    pub fn new(left: usize, right: usize) -> Self {
        Self {
            left: left % HUE_BUCKETS,
            right: right % HUE_BUCKETS,
        }
    }

    /// Whether the arc passes through bucket 0
    #[inline]
    pub fn wraps(&self) -> bool {
        self.right < self.left
    }

    /// Whether `index` lies on the arc
    pub fn contains(&self, index: usize) -> bool {
        let index = index % HUE_BUCKETS;
        if self.wraps() {
            index >= self.left || index <= self.right
        } else {
            index >= self.left && index <= self.right
        }
    }

    /// Number of buckets on the arc, in `[1, 360]`
    pub fn width(&self) -> usize {
        (self.right + HUE_BUCKETS - self.left) % HUE_BUCKETS + 1
    }

    /// Iterate over the arc's buckets from `left` to `right`
    pub fn buckets(&self) -> impl Iterator<Item = usize> {
        let left = self.left;
        (0..self.width()).map(move |k| (left + k) % HUE_BUCKETS)
    }
}
