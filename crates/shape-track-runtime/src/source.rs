//! Frame acquisition boundary.

use shape_track_core::RgbFrame;

/// Errors surfaced by frame sources.
#[derive(thiserror::Error, Debug)]
pub enum SourceError {
    #[error("capture device unavailable: {0}")]
    DeviceUnavailable(String),

    #[error("frame acquisition failed: {0}")]
    AcquisitionFailed(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Pull-based source of color frames.
///
/// Implementations wrap a camera driver, a file sequence or a synthetic
/// generator. The processing loop owns the instance it was started with and
/// drops it when the loop exits, releasing the underlying device.
pub trait FrameSource: Send {
    /// Block until the next frame is available.
    ///
    /// Any error is fatal to the processing loop; there is no automatic
    /// retry.
    fn next_frame(&mut self) -> Result<RgbFrame, SourceError>;
}
