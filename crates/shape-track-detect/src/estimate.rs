//! Shape classification and monocular distance estimation.

use log::debug;
use serde::{Deserialize, Serialize};
use shape_track_core::TrackingReport;

use crate::contour::Contour;
use crate::geometry::{centroid, contour_area, perimeter};
use crate::polygon::approx_polygon;
use crate::shape::TargetShape;

/// Tuning knobs for per-frame analysis.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorParams {
    /// Contours at or below this pixel area are noise and never classified.
    pub min_contour_area: f64,
    /// A frame yielding more contours than this is too noisy; every
    /// detection in it is suppressed.
    pub max_contours: usize,
    /// Polygon approximation tolerance, as a fraction of the perimeter.
    pub approx_tolerance_rel: f64,
    /// Calibrated focal length in cm, derived empirically as
    /// `(pixel_width × known_distance) / known_real_width`.
    pub focal_length_cm: f64,
}

impl Default for EstimatorParams {
    fn default() -> Self {
        Self {
            min_contour_area: 400.0,
            max_contours: 20,
            approx_tolerance_rel: 0.02,
            focal_length_cm: 430.0,
        }
    }
}

impl EstimatorParams {
    pub fn with_focal_length(focal_length_cm: f64) -> Self {
        Self {
            focal_length_cm,
            ..Self::default()
        }
    }
}

/// Classify this frame's contours against `target` and derive the report.
///
/// The distance is an inverse-square pinhole approximation,
/// `sqrt(reference_area × focal² / pixel_area)`, and the offsets project the
/// contour centroid's pixel displacement from the frame center into
/// real-world cm (positive `y_offset` is up). Not a full camera model.
///
/// When several candidates survive the guards, the last one processed wins;
/// the reported `contour_area` follows the last contour examined even when it
/// was rejected. Both are long-standing behaviors downstream consumers see
/// today, so they are kept rather than tie-broken by size.
pub fn analyze_frame(
    contours: &[Contour],
    frame_width: usize,
    frame_height: usize,
    target: TargetShape,
    params: &EstimatorParams,
) -> TrackingReport {
    let mut report = TrackingReport::default();

    if contours.len() > params.max_contours {
        debug!(
            "noisy mask: {} contours (max {}), suppressing detections",
            contours.len(),
            params.max_contours
        );
    }

    for contour in contours {
        let area = contour_area(contour);
        report.contour_area = area;
        if area <= params.min_contour_area {
            continue;
        }

        let tolerance = params.approx_tolerance_rel * perimeter(contour);
        let polygon = approx_polygon(contour, tolerance);
        if polygon.len() < 3 || contours.len() > params.max_contours {
            continue;
        }

        let distance = if target.accepts_vertices(polygon.len()) {
            let focal_sq = params.focal_length_cm * params.focal_length_cm;
            (target.reference_area_cm2() * focal_sq / area).sqrt()
        } else {
            0.0
        };

        let c = centroid(contour);
        let scale = distance / params.focal_length_cm;
        report.x_offset = (c.x - frame_width as f64 / 2.0) * scale;
        report.y_offset = (frame_height as f64 / 2.0 - c.y) * scale;
        report.z_distance = distance;
    }

    report
}
