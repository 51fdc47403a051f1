use image::ImageReader;
use shape_track::{track_rgb_image, HsvRange, TargetShape};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    shape_track::core::init_logging(log::LevelFilter::Info)?;

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("Usage: track_still <image_path>");
        return Ok(());
    };

    let img = ImageReader::open(path)?.decode()?.to_rgb8();
    let report = track_rgb_image(
        &img,
        &HsvRange::default(),
        [5, 5],
        TargetShape::Quadrilateral,
        430.0,
    );

    if report.qualifies() {
        println!(
            "target at x={:.1} cm, y={:.1} cm, z={:.1} cm (area {:.0} px²)",
            report.x_offset, report.y_offset, report.z_distance, report.contour_area
        );
    } else {
        println!("no target detected (last contour area {:.0} px²)", report.contour_area);
    }
    Ok(())
}
