//! The tracking loop: acquire a frame, detect hands, classify, render.
//!
//! The loop is cooperative and single-threaded. The host calls
//! [`GestureTracker::poll`] whenever it has time (an event loop, a UI
//! repaint); each call runs at most one complete cycle and only if a new
//! video frame is available, so the cadence follows the camera rather than a
//! timer. Nothing here blocks or retries: a failed frame is skipped.

use std::time::Duration;

use log::{debug, error, info, warn};

use crate::{
    classifier::classify_hand,
    config::TrackerConfig,
    error::TrackingError,
    gesture_state::{GestureChange, PerHandState},
    interfaces::{Camera, FrameSize, LandmarkSource, VideoFrame, VideoStream},
    landmarks::HandLandmarkerResult,
    render::{commands::RenderedFrame, FrameRenderer},
};

#[derive(Debug, Clone, PartialEq)]
pub enum TrackerState {
    Idle,
    Loading,
    Ready,
    Tracking,
    Stopped,
    Error(TrackingError),
}

/// The next cycle waiting to run. Dropping it cancels the cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ScheduledCycle {
    id: u64,
}

pub struct GestureTracker<S: LandmarkSource, C: Camera> {
    state: TrackerState,
    config: TrackerConfig,
    camera: C,
    detector: Option<S>,
    stream: Option<C::Stream>,
    pending: Option<ScheduledCycle>,
    cycles_scheduled: u64,
    frames_processed: u64,
    frame_size: FrameSize,
    last_result: HandLandmarkerResult,
    gestures: PerHandState,
    last_changes: Vec<GestureChange>,
    renderer: FrameRenderer,
    canvas: RenderedFrame,
}

impl<S: LandmarkSource, C: Camera> GestureTracker<S, C> {
    pub fn new(camera: C, config: TrackerConfig) -> Self {
        let frame_size = config.stream_request().desired_size;
        GestureTracker {
            state: TrackerState::Idle,
            renderer: FrameRenderer::new(&config),
            config,
            camera,
            detector: None,
            stream: None,
            pending: None,
            cycles_scheduled: 0,
            frames_processed: 0,
            frame_size,
            last_result: HandLandmarkerResult::default(),
            gestures: PerHandState::new(),
            last_changes: Vec::new(),
            canvas: FrameRenderer::cleared(frame_size),
        }
    }

    /// Acquire the detector. This happens once; on failure the tracker stays
    /// in the error state for good.
    pub fn load_detector(
        &mut self,
        loader: impl FnOnce() -> anyhow::Result<S>,
    ) -> Result<(), TrackingError> {
        if self.state != TrackerState::Idle {
            warn!("Detector already loaded (or loading); ignoring");
            return Ok(());
        }

        self.state = TrackerState::Loading;
        info!("Loading hand landmark detector...");
        match loader() {
            Ok(detector) => {
                self.detector = Some(detector);
                self.state = TrackerState::Ready;
                info!("Detector ready");
                Ok(())
            }
            Err(e) => {
                let e = TrackingError::InitializationFailure(e.to_string());
                error!("{}", e);
                self.state = TrackerState::Error(e.clone());
                Err(e)
            }
        }
    }

    /// Start tracking if stopped, stop if tracking
    pub fn toggle(&mut self) -> Result<(), TrackingError> {
        match &self.state {
            TrackerState::Tracking => {
                self.stop();
                Ok(())
            }
            TrackerState::Ready | TrackerState::Stopped => self.start(),
            TrackerState::Error(e) if e.is_user_recoverable() => {
                info!("Retrying after error: {}", e);
                self.start()
            }
            TrackerState::Error(e) => Err(e.clone()),
            TrackerState::Idle | TrackerState::Loading => {
                warn!("Cannot start tracking before the detector is ready");
                Ok(())
            }
        }
    }

    fn start(&mut self) -> Result<(), TrackingError> {
        if self.detector.is_none() {
            return Err(TrackingError::InitializationFailure(String::from(
                "no detector loaded",
            )));
        }

        let request = self.config.stream_request();
        debug!(
            "Requesting camera stream at {}x{}",
            request.desired_size.width, request.desired_size.height
        );
        match self.camera.request_stream(request) {
            Ok(stream) => {
                self.stream = Some(stream);
                self.state = TrackerState::Tracking;
                info!("Tracking started");
                self.schedule_next();
                Ok(())
            }
            Err(e) => {
                let e = TrackingError::from(e);
                self.fail(e.clone());
                Err(e)
            }
        }
    }

    /// Cancel the pending cycle, release the camera and clear the canvas
    pub fn stop(&mut self) {
        if self.state != TrackerState::Tracking {
            debug!("Not tracking; nothing to stop");
            return;
        }
        self.halt();
        self.state = TrackerState::Stopped;
        info!("Tracking stopped after {} frames", self.frames_processed);
    }

    fn fail(&mut self, e: TrackingError) {
        if e.is_user_recoverable() {
            warn!("{}", e);
        } else {
            error!("{}", e);
        }
        self.halt();
        self.state = TrackerState::Error(e);
    }

    fn halt(&mut self) {
        if let Some(cycle) = self.pending.take() {
            debug!("Cancelled cycle #{}", cycle.id);
        }
        self.release_stream();
        self.last_result = HandLandmarkerResult::default();
        self.gestures.clear();
        self.last_changes.clear();
        self.canvas = FrameRenderer::cleared(self.frame_size);
    }

    fn release_stream(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.stop_tracks();
            info!("Camera released");
        }
    }

    /// Release the camera and the detector. Safe to call any number of
    /// times, in any state; also runs on drop.
    pub fn teardown(&mut self) {
        if self.state == TrackerState::Tracking {
            self.stop();
        }
        self.pending = None;
        self.release_stream();
        if let Some(mut detector) = self.detector.take() {
            detector.close();
            info!("Detector released");
            self.state = TrackerState::Error(TrackingError::InitializationFailure(String::from(
                "detector released",
            )));
        }
    }

    fn schedule_next(&mut self) {
        self.cycles_scheduled += 1;
        self.pending = Some(ScheduledCycle {
            id: self.cycles_scheduled,
        });
    }

    /// Run the scheduled cycle if a new frame is available. Returns true if a
    /// frame was processed.
    pub fn poll(&mut self, now: Duration) -> bool {
        let Some(cycle) = self.pending else {
            return false;
        };
        let Some(stream) = self.stream.as_mut() else {
            return false;
        };

        let Some(frame) = stream.next_frame() else {
            if !stream.is_live() {
                info!("Video stream ended");
                self.stop();
            }
            return false;
        };

        self.pending = None;
        debug!("Cycle #{} on frame {}", cycle.id, frame.index);
        self.run_cycle(&frame, now);
        self.schedule_next();
        true
    }

    fn run_cycle(&mut self, frame: &VideoFrame, now: Duration) {
        let Some(detector) = self.detector.as_mut() else {
            return;
        };

        let result = match detector.detect(frame, frame.timestamp) {
            Ok(result) => result,
            Err(e) => {
                warn!("Skipping frame {}: detection failed: {}", frame.index, e);
                return;
            }
        };

        let previous = std::mem::take(&mut self.gestures);
        self.gestures
            .replace_all(result.hands.iter().map(classify_hand));
        self.last_changes = self.gestures.changes_from(&previous);
        for change in &self.last_changes {
            debug!(
                "Hand #{}: {:?} -> {:?}",
                change.slot, change.previous, change.current
            );
        }

        self.last_result = result;
        self.frame_size = frame.size;
        self.canvas = self
            .renderer
            .render(self.frame_size, &self.last_result, &self.gestures, now);
        self.frames_processed += 1;
    }

    /// Redraw the latest detection at a new clock reading, so animations keep
    /// moving between detections. Blank unless tracking.
    pub fn render_at(&self, now: Duration) -> RenderedFrame {
        if self.state == TrackerState::Tracking {
            self.renderer
                .render(self.frame_size, &self.last_result, &self.gestures, now)
        } else {
            FrameRenderer::cleared(self.frame_size)
        }
    }

    /// Output of the most recent cycle
    pub fn canvas(&self) -> &RenderedFrame {
        &self.canvas
    }

    pub fn state(&self) -> &TrackerState {
        &self.state
    }

    pub fn is_tracking(&self) -> bool {
        self.state == TrackerState::Tracking
    }

    pub fn has_pending_cycle(&self) -> bool {
        self.pending.is_some()
    }

    pub fn gestures(&self) -> &PerHandState {
        &self.gestures
    }

    pub fn last_changes(&self) -> &[GestureChange] {
        &self.last_changes
    }

    pub fn last_result(&self) -> &HandLandmarkerResult {
        &self.last_result
    }

    pub fn frames_processed(&self) -> u64 {
        self.frames_processed
    }

    pub fn frame_size(&self) -> FrameSize {
        self.frame_size
    }
}

impl<S: LandmarkSource, C: Camera> Drop for GestureTracker<S, C> {
    fn drop(&mut self) {
        self.teardown();
    }
}
