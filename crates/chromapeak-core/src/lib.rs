//! chromapeak Core - Basic data structures for dominant-color extraction
//!
//! This crate provides the fundamental data structures shared by the
//! chromapeak crates:
//!
//! - [`PixelBuffer`] / [`PixelSample`] - Shape-checked RGBA input
//! - [`HueRing`] - Fixed 360-bucket circular numeric array
//! - [`HueArc`] - Inclusive, possibly wrapping, range of hue buckets
//! - [`Error`] / [`Result`] - Shared error type

pub mod error;
pub mod pixel;
pub mod ring;

pub use error::{Error, Result};
pub use pixel::{CHANNELS, PixelBuffer, PixelSample};
pub use ring::{HUE_BUCKETS, HueArc, HueRing, circular_distance, wrap_index};
