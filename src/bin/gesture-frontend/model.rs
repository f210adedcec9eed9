use std::path::PathBuf;

use hand_gestures::{
    animation::{AnimationClock, SystemClock},
    config::{load_config_from_file, TrackerConfig},
    replay::{ReplayCamera, ReplayLandmarker},
    tracker::GestureTracker,
};
use log::{error, info};

use crate::{cli::Cli, ui::render_ui};

pub struct Model {
    pub tracker: GestureTracker<ReplayLandmarker, ReplayCamera>,
    pub clock: SystemClock,
    pub recording_path: PathBuf,
}

impl Model {
    pub fn new(cli: &Cli) -> Self {
        let config = load_config_from_file(&cli.config_path).unwrap_or_else(|e| {
            error!("{}; falling back to default config", e);
            TrackerConfig::default()
        });

        let recording_path = PathBuf::from(&cli.recording_path);
        let camera = ReplayCamera::new(&recording_path, config.loop_playback);
        let mut tracker = GestureTracker::new(camera, config);

        // Failures end up in the tracker state, which the UI shows
        if tracker
            .load_detector(|| ReplayLandmarker::open(&recording_path))
            .is_ok()
            && cli.auto_start
        {
            if let Err(e) = tracker.toggle() {
                error!("Could not start tracking: {}", e);
            }
        }

        info!("Gesture Frontend started OK");

        Model {
            tracker,
            clock: SystemClock::new(),
            recording_path,
        }
    }

    pub fn toggle_tracking(&mut self) {
        if let Err(e) = self.tracker.toggle() {
            error!("Could not toggle tracking: {}", e);
        }
    }
}

impl eframe::App for Model {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.tracker.poll(self.clock.now());

        render_ui(ctx, self);

        if self.tracker.is_tracking() {
            ctx.request_repaint();
        }
    }
}
