//! Composition root: processing loop plus serial link over a synthetic
//! camera, useful for bench testing without hardware.

use std::time::Duration;

use shape_track::runtime::SourceError;
use shape_track::{
    FrameSource, RgbFrame, SerialLink, StateReportSource, TrackerConfig, TrackerPipeline,
};

/// Emits frames with a green square drifting across the image.
struct SyntheticCamera {
    tick: usize,
    frames_left: usize,
}

impl FrameSource for SyntheticCamera {
    fn next_frame(&mut self) -> Result<RgbFrame, SourceError> {
        if self.frames_left == 0 {
            return Err(SourceError::AcquisitionFailed("synthetic feed ended".into()));
        }
        self.frames_left -= 1;
        self.tick += 1;

        let mut frame = RgbFrame::new(160, 120);
        let x0 = 20 + (self.tick % 60);
        for y in 40..80 {
            for x in x0..x0 + 40 {
                frame.set_pixel(x, y, [30, 220, 40]);
            }
        }
        std::thread::sleep(Duration::from_millis(30));
        Ok(frame)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    shape_track::core::init_logging(log::LevelFilter::Debug)?;

    let config = TrackerConfig::load("config.json").unwrap_or_default();
    let mut pipeline = TrackerPipeline::new(config);
    pipeline.start(SyntheticCamera {
        tick: 0,
        frames_left: 200,
    });

    let mut link = SerialLink::open("/dev/ttyUSB0", 115_200);
    link.start(StateReportSource(pipeline.state()));

    std::thread::sleep(Duration::from_secs(5));
    if let Some(report) = pipeline.state().latest_report() {
        println!(
            "latest: x={:.1} y={:.1} z={:.1} area={:.0}",
            report.x_offset, report.y_offset, report.z_distance, report.contour_area
        );
    }

    link.stop();
    pipeline.stop();
    Ok(())
}
