//! Helpers for running the tracker on still images.

use shape_track_core::{segment, HsvRange, RgbFrame, TrackingReport};
use shape_track_detect::{analyze_frame, extract_contours, EstimatorParams, TargetShape};

/// Convert an `image` crate RGB image into a pipeline frame.
pub fn rgb_frame_from_image(img: &image::RgbImage) -> RgbFrame {
    RgbFrame {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw().clone(),
    }
}

/// One-shot segment → contour → classify pass with explicit settings.
pub fn track_rgb_image(
    img: &image::RgbImage,
    hsv: &HsvRange,
    kernel: [usize; 2],
    target: TargetShape,
    focal_length_cm: f64,
) -> TrackingReport {
    let frame = rgb_frame_from_image(img);
    let mask = segment(&frame, hsv, kernel);
    let contours = extract_contours(&mask);
    analyze_frame(
        &contours,
        frame.width,
        frame.height,
        target,
        &EstimatorParams::with_focal_length(focal_length_cm),
    )
}
