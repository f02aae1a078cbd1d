//! chromapeak - Dominant color extraction for Rust
//!
//! Finds a small set of perceptually distinct dominant colors in an
//! image by building a circular OKLCH hue histogram, smoothing it,
//! detecting its peaks and resolving each peak into a representative
//! color, de-duplicated with CIEDE2000.
//!
//! # Overview
//!
//! - Color spaces and color difference ([`color`])
//! - Circular smoothing ([`filter`])
//! - Histogram, peaks and color resolution ([`hue`])
//! - Image decoding and downsampling ([`io`])
//! - Hue-segment grading tables ([`grade`])
//! - The end-to-end pipeline ([`extract_colors`]) and its YAML
//!   configuration ([`config`])
//!
//! # Example
//!
//! ```
//! use chromapeak::{PipelineOptions, extract_colors_from_rgba};
//!
//! // 2x1 image: one red and one blue pixel
//! let data = [220, 30, 30, 255, 30, 30, 220, 255];
//! let out = extract_colors_from_rgba(&data, 2, 1, &PipelineOptions::default()).unwrap();
//! assert_eq!(out.colors.len(), 2);
//! assert!(out.colors[0].description.starts_with("oklch("));
//! ```
//!
//! # Features
//!
//! - `parallel`: build histograms on the rayon thread pool

pub mod config;
pub mod error;
pub mod pipeline;

pub use config::{load_options, parse_options, save_options, to_yaml};
pub use error::{Error, Result};
pub use pipeline::{
    DEFAULT_SIGMA, Extraction, PipelineOptions, extract_colors, extract_colors_from_path,
    extract_colors_from_rgba,
};

// Re-export the shared data model
pub use chromapeak_core::{
    CHANNELS, HUE_BUCKETS, HueArc, HueRing, PixelBuffer, PixelSample, circular_distance,
    wrap_index,
};
pub use chromapeak_hue::{Peak, PeakColor};

// Re-export domain crates as modules to avoid name conflicts
pub use chromapeak_color as color;
pub use chromapeak_filter as filter;
pub use chromapeak_grade as grade;
pub use chromapeak_hue as hue;
pub use chromapeak_io as io;
