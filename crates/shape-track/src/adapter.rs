use std::sync::Arc;

use shape_track_core::TrackingReport;
use shape_track_runtime::TrackingState;
use shape_track_serial::ReportSource;

/// Adapts the pipeline's tracking state to the serial link's report seam.
pub struct StateReportSource(pub Arc<TrackingState>);

impl ReportSource for StateReportSource {
    fn latest_report(&self) -> Option<TrackingReport> {
        self.0.latest_report()
    }
}
