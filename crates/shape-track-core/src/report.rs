use serde::{Deserialize, Serialize};

/// Per-frame tracking output streamed to the embedded controller.
///
/// Offsets and distance are in real-world centimeters relative to the frame
/// center (positive `y_offset` is up); `contour_area` is in pixels squared.
/// A frame with no classified target reports zero distance and offsets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackingReport {
    pub x_offset: f64,
    pub y_offset: f64,
    pub z_distance: f64,
    pub contour_area: f64,
}

impl TrackingReport {
    /// True when the frame contained a classified target.
    #[inline]
    pub fn qualifies(&self) -> bool {
        self.z_distance > 0.0
    }
}
