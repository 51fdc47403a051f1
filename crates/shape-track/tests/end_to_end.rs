//! Full pass over a synthetic image: threshold, erode, trace, classify.

use approx::assert_relative_eq;
use shape_track::{track_rgb_image, HsvRange, TargetShape};

const FOCAL: f64 = 430.0;

fn green_square_image() -> image::RgbImage {
    let mut img = image::RgbImage::from_pixel(128, 96, image::Rgb([0, 0, 0]));
    for y in 30..70 {
        for x in 30..70 {
            img.put_pixel(x, y, image::Rgb([0, 255, 0]));
        }
    }
    img
}

#[test]
fn green_square_distance_matches_the_pinhole_model() {
    let img = green_square_image();
    let report = track_rgb_image(
        &img,
        &HsvRange::default(),
        [5, 5],
        TargetShape::Quadrilateral,
        FOCAL,
    );

    // The 40x40 block erodes to 36x36; its boundary is the 35x35 square
    // spanning (32,32)..(67,67).
    assert_relative_eq!(report.contour_area, 1225.0);
    let expected = (196.0 * FOCAL * FOCAL / 1225.0_f64).sqrt();
    assert_relative_eq!(report.z_distance, expected, epsilon = 1e-9);

    // Centroid (49.5, 49.5) against frame center (64, 48).
    let scale = expected / FOCAL;
    assert_relative_eq!(report.x_offset, -14.5 * scale, epsilon = 1e-9);
    assert_relative_eq!(report.y_offset, -1.5 * scale, epsilon = 1e-9);
}

#[test]
fn wrong_target_shape_reports_no_detection() {
    let img = green_square_image();
    let report = track_rgb_image(
        &img,
        &HsvRange::default(),
        [5, 5],
        TargetShape::Triangle,
        FOCAL,
    );
    assert_eq!(report.z_distance, 0.0);
    assert!(report.contour_area > 0.0);
}

#[test]
fn inverted_bounds_report_nothing_at_all() {
    let img = green_square_image();
    let inverted = HsvRange::new([110, 255, 255], [40, 40, 90]);
    let report = track_rgb_image(&img, &inverted, [5, 5], TargetShape::Quadrilateral, FOCAL);
    assert_eq!(report, shape_track::TrackingReport::default());
}
