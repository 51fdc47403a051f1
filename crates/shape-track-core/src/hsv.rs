//! HSV color space conversion and threshold bounds.
//!
//! Hue is stored in the 8-bit convention of the tooling the thresholds were
//! tuned with: H in `0..=180`, S and V in `0..=255`.

use serde::{Deserialize, Serialize};

/// Inclusive per-channel HSV thresholds.
///
/// `lower <= upper` is deliberately not enforced: an inverted channel simply
/// matches nothing and the segmenter produces an empty mask.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HsvRange {
    pub lower: [u8; 3],
    pub upper: [u8; 3],
}

impl HsvRange {
    /// Factory-default bounds, also used by the reset command.
    pub const DEFAULT_LOWER: [u8; 3] = [40, 40, 90];
    pub const DEFAULT_UPPER: [u8; 3] = [110, 255, 255];

    pub fn new(lower: [u8; 3], upper: [u8; 3]) -> Self {
        Self { lower, upper }
    }

    #[inline]
    pub fn contains(&self, hsv: [u8; 3]) -> bool {
        (0..3).all(|c| self.lower[c] <= hsv[c] && hsv[c] <= self.upper[c])
    }

    /// Apply a partial update, leaving unspecified channels untouched.
    pub fn apply(&mut self, patch: &HsvPatch) {
        if let Some(v) = patch.lower_h {
            self.lower[0] = v;
        }
        if let Some(v) = patch.lower_s {
            self.lower[1] = v;
        }
        if let Some(v) = patch.lower_v {
            self.lower[2] = v;
        }
        if let Some(v) = patch.upper_h {
            self.upper[0] = v;
        }
        if let Some(v) = patch.upper_s {
            self.upper[1] = v;
        }
        if let Some(v) = patch.upper_v {
            self.upper[2] = v;
        }
    }
}

impl Default for HsvRange {
    fn default() -> Self {
        Self {
            lower: Self::DEFAULT_LOWER,
            upper: Self::DEFAULT_UPPER,
        }
    }
}

/// Partial update of the six threshold channels.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct HsvPatch {
    #[serde(default)]
    pub lower_h: Option<u8>,
    #[serde(default)]
    pub lower_s: Option<u8>,
    #[serde(default)]
    pub lower_v: Option<u8>,
    #[serde(default)]
    pub upper_h: Option<u8>,
    #[serde(default)]
    pub upper_s: Option<u8>,
    #[serde(default)]
    pub upper_v: Option<u8>,
}

/// Convert one RGB pixel to 8-bit HSV (H in `0..=180`).
pub fn rgb_to_hsv(rgb: [u8; 3]) -> [u8; 3] {
    let r = rgb[0] as f32;
    let g = rgb[1] as f32;
    let b = rgb[2] as f32;

    let v = r.max(g).max(b);
    let min = r.min(g).min(b);
    let diff = v - min;

    let s = if v == 0.0 { 0.0 } else { 255.0 * diff / v };

    let h = if diff == 0.0 {
        0.0
    } else if v == r {
        60.0 * (g - b) / diff
    } else if v == g {
        120.0 + 60.0 * (b - r) / diff
    } else {
        240.0 + 60.0 * (r - g) / diff
    };
    let h = if h < 0.0 { h + 360.0 } else { h };

    [(h / 2.0).round() as u8, s.round() as u8, v.round() as u8]
}
