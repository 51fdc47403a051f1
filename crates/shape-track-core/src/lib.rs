//! Core types and color segmentation for the shape-track pipeline.
//!
//! This crate is intentionally small: owned pixel buffers, the HSV threshold
//! step and the per-frame report record. It does *not* depend on any capture
//! device, detector or I/O layer.

mod hsv;
mod image;
mod logger;
mod report;
mod segment;

pub use hsv::{rgb_to_hsv, HsvPatch, HsvRange};
pub use image::{ImageError, Mask, RgbFrame};
pub use logger::init_logging;
pub use report::TrackingReport;
pub use segment::{erode, segment, threshold};
