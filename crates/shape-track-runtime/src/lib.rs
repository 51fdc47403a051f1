//! Runtime glue for the tracking pipeline: persisted configuration, the
//! shared latest-value state store, the frame-acquisition seam and the
//! background processing loop.

mod config;
mod pipeline;
mod source;
mod state;

pub use config::{ConfigError, TrackerConfig};
pub use pipeline::{CaptureSettings, TrackerPipeline};
pub use source::{FrameSource, SourceError};
pub use state::{TrackingSnapshot, TrackingState};
