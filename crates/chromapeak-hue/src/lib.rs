//! chromapeak Hue - Hue-space analysis
//!
//! This crate provides the three analysis stages between a pixel buffer
//! and a list of dominant colors:
//!
//! - **Histogram** ([`histogram`]): 360-bucket OKLCH hue histogram with
//!   per-bucket chroma/lightness sums
//! - **Peaks** ([`peaks`]): circular local maxima and their valley-to-valley
//!   arcs
//! - **Resolve** ([`resolve`]): one representative color per peak,
//!   ranked and de-duplicated with CIEDE2000
//!
//! # Features
//!
//! - `parallel`: scan histogram row bands on the rayon thread pool
//! - `serde`: derive `Serialize`/`Deserialize` for every options type

pub mod error;
pub mod histogram;
pub mod peaks;
pub mod resolve;

pub use error::{HueError, HueResult};
pub use histogram::{
    ChromaGate, DEFAULT_ALPHA_CUTOFF, DEFAULT_CHROMA_THRESHOLD, HistogramOptions, HueHistogram,
    WeightMode, build_histogram, lightness_window, smoothstep,
};
pub use peaks::{Peak, PeakOptions, detect_peaks, valley_bounds};
pub use resolve::{
    MAX_CHROMA, PeakColor, ResolveMode, ResolveOptions, describe, merge_similar, resolve_colors,
};
