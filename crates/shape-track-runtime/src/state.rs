//! Shared tracking state: single writer, many readers.

use std::sync::{Arc, RwLock};

use shape_track_core::{Mask, RgbFrame, TrackingReport};

/// One published processing result.
#[derive(Clone, Debug)]
pub struct TrackingSnapshot {
    pub frame: RgbFrame,
    pub mask: Mask,
    pub report: TrackingReport,
}

/// Latest-value store written once per loop iteration.
///
/// The whole snapshot is swapped behind one lock, so a reader never observes
/// a frame paired with another iteration's mask or report. Staleness by one
/// frame is fine; readers that arrive before the first publish get `None`.
#[derive(Debug, Default)]
pub struct TrackingState {
    latest: RwLock<Option<Arc<TrackingSnapshot>>>,
}

impl TrackingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the published snapshot. Called by the processing loop only.
    pub fn publish(&self, frame: RgbFrame, mask: Mask, report: TrackingReport) {
        let snapshot = Arc::new(TrackingSnapshot { frame, mask, report });
        *self.latest.write().expect("tracking state lock poisoned") = Some(snapshot);
    }

    /// Most recent snapshot, shared without copying the buffers.
    pub fn latest(&self) -> Option<Arc<TrackingSnapshot>> {
        self.latest.read().expect("tracking state lock poisoned").clone()
    }

    pub fn latest_frame(&self) -> Option<RgbFrame> {
        self.latest().map(|s| s.frame.clone())
    }

    pub fn latest_mask(&self) -> Option<Mask> {
        self.latest().map(|s| s.mask.clone())
    }

    pub fn latest_report(&self) -> Option<TrackingReport> {
        self.latest().map(|s| s.report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_before_first_publish_return_none() {
        let state = TrackingState::new();
        assert!(state.latest().is_none());
        assert!(state.latest_frame().is_none());
        assert!(state.latest_mask().is_none());
        assert!(state.latest_report().is_none());
    }

    #[test]
    fn publish_replaces_the_whole_snapshot() {
        let state = TrackingState::new();

        state.publish(
            RgbFrame::new(4, 4),
            Mask::new(4, 4),
            TrackingReport::default(),
        );
        let report = TrackingReport {
            z_distance: 12.0,
            contour_area: 900.0,
            ..TrackingReport::default()
        };
        state.publish(RgbFrame::new(8, 8), Mask::new(8, 8), report);

        let snapshot = state.latest().unwrap();
        assert_eq!(snapshot.frame.width, 8);
        assert_eq!(snapshot.mask.width, 8);
        assert_eq!(snapshot.report, report);
    }
}
