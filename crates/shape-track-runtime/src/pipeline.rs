//! Background frame-processing loop and its command surface.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use log::{error, info, warn};
use shape_track_core::{segment, HsvPatch, HsvRange};
use shape_track_detect::{analyze_frame, extract_contours, EstimatorParams, TargetShape};

use crate::config::{ConfigError, TrackerConfig};
use crate::source::FrameSource;
use crate::state::TrackingState;

/// Capture settings the worker reads once per iteration.
///
/// Command handlers build a fresh value and swap the whole `Arc`, so the
/// worker never observes a half-updated bound.
#[derive(Clone, Debug)]
pub struct CaptureSettings {
    pub hsv: HsvRange,
    pub kernel: [usize; 2],
    pub focal_length: f64,
    pub target_shape: TargetShape,
}

impl From<&TrackerConfig> for CaptureSettings {
    fn from(config: &TrackerConfig) -> Self {
        Self {
            hsv: config.hsv_range(),
            kernel: config.kernel_shape,
            focal_length: config.focal_length,
            target_shape: config.target_shape,
        }
    }
}

struct PipelineShared {
    running: AtomicBool,
    state: Arc<TrackingState>,
    settings: Mutex<Arc<CaptureSettings>>,
}

/// The frame-processing loop: segment, extract, classify, publish.
///
/// One background worker owns the frame source for the duration of a run;
/// HTTP-style command handlers mutate the capture settings concurrently
/// through `&self` methods.
pub struct TrackerPipeline {
    shared: Arc<PipelineShared>,
    worker: Option<JoinHandle<()>>,
    config: Mutex<TrackerConfig>,
    config_path: Option<PathBuf>,
}

impl TrackerPipeline {
    pub fn new(config: TrackerConfig) -> Self {
        let settings = Arc::new(CaptureSettings::from(&config));
        Self {
            shared: Arc::new(PipelineShared {
                running: AtomicBool::new(false),
                state: Arc::new(TrackingState::new()),
                settings: Mutex::new(settings),
            }),
            worker: None,
            config: Mutex::new(config),
            config_path: None,
        }
    }

    /// Like `new`, but re-persists the settings document at `path` whenever
    /// a command changes the HSV bounds or target shape.
    pub fn with_persistence(config: TrackerConfig, path: impl Into<PathBuf>) -> Self {
        let mut pipeline = Self::new(config);
        pipeline.config_path = Some(path.into());
        pipeline
    }

    /// Load the settings document and attach it for re-persistence.
    pub fn from_config_file(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let config = TrackerConfig::load(&path)?;
        Ok(Self::with_persistence(config, path))
    }

    /// Shared handle to the latest frame/mask/report store.
    pub fn state(&self) -> Arc<TrackingState> {
        Arc::clone(&self.shared.state)
    }

    pub fn is_running(&self) -> bool {
        self.shared.running.load(Ordering::SeqCst)
    }

    /// Spawn the processing worker over `source`.
    ///
    /// Idempotent while running: a second call logs, drops `source` and
    /// returns `false` without spawning anything.
    pub fn start(&mut self, source: impl FrameSource + 'static) -> bool {
        if self.shared.running.swap(true, Ordering::SeqCst) {
            warn!("processing loop already running; start ignored");
            return false;
        }
        // Reap a worker that stopped on its own (fatal acquisition error).
        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }

        let shared = Arc::clone(&self.shared);
        let mut source = source;
        self.worker = Some(std::thread::spawn(move || {
            info!("processing loop started");
            run_loop(&shared, &mut source);
            info!("processing loop stopped");
        }));
        true
    }

    /// Signal the worker, wait for it to exit and release the frame source.
    pub fn stop(&mut self) {
        self.shared.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.worker.take() {
            if handle.join().is_err() {
                error!("processing worker panicked");
            }
        }
    }

    /// Current HSV bounds.
    pub fn hsv(&self) -> HsvRange {
        self.shared
            .settings
            .lock()
            .expect("settings lock poisoned")
            .hsv
    }

    /// Replace either or both HSV bounds.
    pub fn set_hsv(&self, lower: Option<[u8; 3]>, upper: Option<[u8; 3]>) {
        self.update(|settings, config| {
            if let Some(lower) = lower {
                settings.hsv.lower = lower;
                config.lower_hsv = lower;
            }
            if let Some(upper) = upper {
                settings.hsv.upper = upper;
                config.upper_hsv = upper;
            }
        });
    }

    /// Update a subset of the six threshold channels.
    pub fn patch_hsv(&self, patch: &HsvPatch) {
        self.update(|settings, config| {
            settings.hsv.apply(patch);
            config.lower_hsv = settings.hsv.lower;
            config.upper_hsv = settings.hsv.upper;
        });
    }

    /// Restore the factory-default HSV bounds.
    pub fn reset_hsv(&self) {
        self.update(|settings, config| {
            settings.hsv = HsvRange::default();
            config.lower_hsv = settings.hsv.lower;
            config.upper_hsv = settings.hsv.upper;
        });
    }

    /// Select the shape being tracked.
    pub fn set_target_shape(&self, shape: TargetShape) {
        self.update(|settings, config| {
            settings.target_shape = shape;
            config.target_shape = shape;
        });
    }

    /// Current configuration view, for health/status queries.
    pub fn status(&self) -> TrackerConfig {
        self.config.lock().expect("config lock poisoned").clone()
    }

    /// Swap in updated capture settings and persist the matching config.
    fn update(&self, apply: impl FnOnce(&mut CaptureSettings, &mut TrackerConfig)) {
        let mut config = self.config.lock().expect("config lock poisoned");
        {
            let mut slot = self.shared.settings.lock().expect("settings lock poisoned");
            let mut next = (**slot).clone();
            apply(&mut next, &mut config);
            *slot = Arc::new(next);
        }
        if let Some(path) = &self.config_path {
            if let Err(e) = config.save(path) {
                warn!("failed to persist settings: {e}");
            }
        }
    }
}

impl Drop for TrackerPipeline {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run_loop(shared: &PipelineShared, source: &mut dyn FrameSource) {
    while shared.running.load(Ordering::SeqCst) {
        let frame = match source.next_frame() {
            Ok(frame) => frame,
            Err(e) => {
                error!("frame acquisition failed, stopping loop: {e}");
                break;
            }
        };

        let settings: Arc<CaptureSettings> = shared
            .settings
            .lock()
            .expect("settings lock poisoned")
            .clone();

        let mask = segment(&frame, &settings.hsv, settings.kernel);
        let contours = extract_contours(&mask);
        let report = analyze_frame(
            &contours,
            frame.width,
            frame.height,
            settings.target_shape,
            &EstimatorParams::with_focal_length(settings.focal_length),
        );
        shared.state.publish(frame, mask, report);
    }
    shared.running.store(false, Ordering::SeqCst);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SourceError;
    use shape_track_core::RgbFrame;
    use std::sync::atomic::AtomicUsize;
    use std::time::{Duration, Instant};

    /// Yields a fixed number of frames with a green square, then fails.
    struct ScriptedSource {
        frames_left: usize,
        width: usize,
        height: usize,
        drops: Arc<AtomicUsize>,
    }

    impl ScriptedSource {
        fn new(frames: usize) -> Self {
            Self {
                frames_left: frames,
                width: 64,
                height: 64,
                drops: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn green_square_frame(&self) -> RgbFrame {
            let mut frame = RgbFrame::new(self.width, self.height);
            for y in 16..48 {
                for x in 16..48 {
                    frame.set_pixel(x, y, [0, 255, 0]);
                }
            }
            frame
        }
    }

    impl FrameSource for ScriptedSource {
        fn next_frame(&mut self) -> Result<RgbFrame, SourceError> {
            if self.frames_left == 0 {
                return Err(SourceError::AcquisitionFailed("script exhausted".into()));
            }
            self.frames_left -= 1;
            Ok(self.green_square_frame())
        }
    }

    impl Drop for ScriptedSource {
        fn drop(&mut self) {
            self.drops.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn wait_until(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if condition() {
                return true;
            }
            std::thread::sleep(Duration::from_millis(2));
        }
        condition()
    }

    #[test]
    fn processes_frames_and_publishes_reports() {
        let mut pipeline = TrackerPipeline::new(TrackerConfig::default());
        let state = pipeline.state();

        assert!(pipeline.start(ScriptedSource::new(10_000)));
        assert!(wait_until(Duration::from_secs(5), || state
            .latest_report()
            .is_some()));
        pipeline.stop();
        assert!(!pipeline.is_running());

        // The 32x32 green square qualifies as a quadrilateral.
        let report = state.latest_report().unwrap();
        assert!(report.z_distance > 0.0);
        assert!(report.contour_area > 400.0);
    }

    #[test]
    fn start_is_idempotent_while_running() {
        let mut pipeline = TrackerPipeline::new(TrackerConfig::default());
        assert!(pipeline.start(ScriptedSource::new(1_000_000)));
        assert!(!pipeline.start(ScriptedSource::new(1_000_000)));
        pipeline.stop();
    }

    #[test]
    fn acquisition_failure_stops_the_loop() {
        let mut pipeline = TrackerPipeline::new(TrackerConfig::default());
        pipeline.start(ScriptedSource::new(3));

        assert!(wait_until(Duration::from_secs(5), || !pipeline.is_running()));
        pipeline.stop();
    }

    #[test]
    fn stop_releases_the_frame_source() {
        let source = ScriptedSource::new(1_000_000);
        let drops = Arc::clone(&source.drops);

        let mut pipeline = TrackerPipeline::new(TrackerConfig::default());
        pipeline.start(source);
        assert_eq!(drops.load(Ordering::SeqCst), 0);
        pipeline.stop();
        assert_eq!(drops.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn commands_update_settings_and_persist() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        TrackerConfig::default().save(&path).unwrap();

        let pipeline = TrackerPipeline::from_config_file(&path).unwrap();
        pipeline.set_hsv(Some([10, 20, 30]), None);
        pipeline.set_target_shape(TargetShape::Circle);

        assert_eq!(pipeline.hsv().lower, [10, 20, 30]);
        assert_eq!(pipeline.status().target_shape, TargetShape::Circle);

        let persisted = TrackerConfig::load(&path).unwrap();
        assert_eq!(persisted.lower_hsv, [10, 20, 30]);
        assert_eq!(persisted.target_shape, TargetShape::Circle);

        pipeline.reset_hsv();
        assert_eq!(pipeline.hsv(), HsvRange::default());
        assert_eq!(
            TrackerConfig::load(&path).unwrap().lower_hsv,
            HsvRange::DEFAULT_LOWER
        );
    }
}
