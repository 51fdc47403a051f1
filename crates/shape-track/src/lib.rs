//! High-level facade crate for the `shape-track-*` workspace.
//!
//! A camera feed is thresholded in HSV space, contours are classified into
//! known shapes (quadrilateral, triangle, circle) and a monocular distance
//! estimate plus lateral/vertical offsets are streamed over a serial link to
//! an embedded controller under handshake-gated flow control.
//!
//! This crate provides:
//! - stable re-exports of the underlying pipeline crates
//! - (feature-gated) helpers that run the segment → contour → classify pass
//!   on an `image::RgbImage`
//! - the adapter wiring the pipeline's tracking state into the serial link
//!
//! ## Quickstart
//!
//! ```no_run
//! use shape_track::{track_rgb_image, HsvRange, TargetShape};
//! use image::ImageReader;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let img = ImageReader::open("target.png")?.decode()?.to_rgb8();
//! let report = track_rgb_image(
//!     &img,
//!     &HsvRange::default(),
//!     [5, 5],
//!     TargetShape::Quadrilateral,
//!     430.0,
//! );
//! println!("distance: {:.1} cm", report.z_distance);
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `shape_track::core`: pixel buffers, HSV segmentation, the report record.
//! - `shape_track::detect`: contours, polygon approximation, classification.
//! - `shape_track::runtime`: config, tracking state, the processing loop.
//! - `shape_track::serial`: the handshake-gated link.

pub use shape_track_core as core;
pub use shape_track_detect as detect;
pub use shape_track_runtime as runtime;
pub use shape_track_serial as serial;

pub use shape_track_core::{HsvPatch, HsvRange, Mask, RgbFrame, TrackingReport};
pub use shape_track_detect::{EstimatorParams, TargetShape};
pub use shape_track_runtime::{
    FrameSource, SourceError, TrackerConfig, TrackerPipeline, TrackingState,
};
pub use shape_track_serial::{LinkParams, SerialLink};

mod adapter;
pub use adapter::StateReportSource;

#[cfg(feature = "image")]
mod still;
#[cfg(feature = "image")]
pub use still::{rgb_frame_from_image, track_rgb_image};
