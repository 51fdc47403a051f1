//! Persisted tracker settings.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use shape_track_core::HsvRange;
use shape_track_detect::TargetShape;

/// Settings record stored as a JSON document.
///
/// Loaded once at startup and re-persisted whenever the HSV bounds or the
/// target shape change through the command surface.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub camera_index: u32,
    pub lower_hsv: [u8; 3],
    pub upper_hsv: [u8; 3],
    /// Erosion structuring element, `[rows, cols]`.
    pub kernel_shape: [usize; 2],
    /// Calibrated focal length in cm.
    pub focal_length: f64,
    pub target_shape: TargetShape,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            camera_index: 0,
            lower_hsv: HsvRange::DEFAULT_LOWER,
            upper_hsv: HsvRange::DEFAULT_UPPER,
            kernel_shape: [5, 5],
            focal_length: 430.0,
            target_shape: TargetShape::Quadrilateral,
        }
    }
}

/// Errors produced while loading or persisting the settings document.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to access settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed settings document: {0}")]
    Parse(#[from] serde_json::Error),
}

impl TrackerConfig {
    /// Load settings from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
    }

    /// Persist settings as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn hsv_range(&self) -> HsvRange {
        HsvRange::new(self.lower_hsv, self.upper_hsv)
    }
}
