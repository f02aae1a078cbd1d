//! chromapeak Grade - Hue-segment lookup tables for color grading
//!
//! Turns extracted [`PeakColor`](chromapeak_hue::PeakColor)s and a
//! per-color [`ColorAdjustment`] into a small table of evenly spaced hue
//! segments that a renderer can upload and interpolate. No GPU work
//! happens here; [`HueLut::to_gpu_data`] only packs the table.

pub mod error;
pub mod lut;

pub use error::{GradeError, GradeResult};
pub use lut::{ColorAdjustment, GradeOptions, HueLut, HueSegment, build_lut};
