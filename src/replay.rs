//! Replays a recorded sequence of hand landmarks, standing in for both the
//! camera and the detector model.
//!
//! Recording format (JSON):
//! `{ "width": 1280, "height": 720, "fps": 30, "frames": [ { "hands": [ [ {"x","y","z"} x21 ] ] } ] }`

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use anyhow::{anyhow, Context, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::{
    error::CameraError,
    interfaces::{Camera, FrameSize, LandmarkSource, StreamRequest, VideoFrame, VideoStream},
    landmarks::HandLandmarkerResult,
};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Recording {
    pub width: u32,
    pub height: u32,
    pub fps: f32,
    pub frames: Vec<HandLandmarkerResult>,
}

impl Recording {
    pub fn parse(text: &str) -> Result<Recording> {
        let recording: Recording =
            serde_json::from_str(text).map_err(|e| anyhow!("Failed to parse recording: {}", e))?;
        if recording.fps.is_nan() || recording.fps <= 0. {
            return Err(anyhow!("Recording fps must be above 0, got {}", recording.fps));
        }
        recording.frame_interval()?;
        Ok(recording)
    }

    pub fn load(path: &Path) -> Result<Recording> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read recording {}", path.display()))?;
        let recording = Recording::parse(&text)?;
        info!(
            "Loaded recording \"{}\": {} frames at {}fps",
            path.display(),
            recording.frames.len(),
            recording.fps
        );
        Ok(recording)
    }

    pub fn size(&self) -> FrameSize {
        FrameSize {
            width: self.width,
            height: self.height,
        }
    }

    pub fn frame_interval(&self) -> Result<Duration> {
        Duration::try_from_secs_f64(1. / self.fps as f64)
            .map_err(|e| anyhow!("Recording fps {} gives no usable frame interval: {}", self.fps, e))
    }
}

/// Looks up the recorded hands for each frame index
pub struct ReplayLandmarker {
    frames: Vec<HandLandmarkerResult>,
    closed: bool,
}

impl ReplayLandmarker {
    pub fn new(recording: &Recording) -> Self {
        ReplayLandmarker {
            frames: recording.frames.clone(),
            closed: false,
        }
    }

    pub fn open(path: &Path) -> Result<Self> {
        Ok(ReplayLandmarker::new(&Recording::load(path)?))
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl LandmarkSource for ReplayLandmarker {
    fn detect(&mut self, frame: &VideoFrame, _timestamp: Duration) -> Result<HandLandmarkerResult> {
        if self.closed {
            return Err(anyhow!("Landmarker used after close"));
        }
        Ok(self
            .frames
            .get(frame.index as usize)
            .cloned()
            .unwrap_or_default())
    }

    fn close(&mut self) {
        debug!("Closing replay landmarker");
        self.closed = true;
        self.frames.clear();
    }
}

/// Opens a recording file as if it were a camera device
pub struct ReplayCamera {
    path: PathBuf,
    looping: bool,
}

impl ReplayCamera {
    pub fn new(path: &Path, looping: bool) -> Self {
        ReplayCamera {
            path: path.to_path_buf(),
            looping,
        }
    }
}

impl Camera for ReplayCamera {
    type Stream = ReplayStream;

    fn request_stream(&mut self, request: StreamRequest) -> Result<ReplayStream, CameraError> {
        let text = fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            ErrorKind::PermissionDenied => CameraError::PermissionDenied,
            _ => CameraError::Device(format!("{}: {}", self.path.display(), e)),
        })?;
        let recording = Recording::parse(&text).map_err(|e| CameraError::Device(e.to_string()))?;

        if recording.size() != request.desired_size {
            warn!(
                "Requested {}x{} but recording is {}x{}",
                request.desired_size.width,
                request.desired_size.height,
                recording.width,
                recording.height
            );
        }

        let frame_interval = recording
            .frame_interval()
            .map_err(|e| CameraError::Device(e.to_string()))?;

        Ok(ReplayStream::new(
            recording.size(),
            frame_interval,
            recording.frames.len() as u64,
            self.looping,
        ))
    }
}

/// Makes frame `n` available once `n` frame intervals have elapsed. A host
/// that polls too slowly gets the latest due frame; missed frames are skipped.
pub struct ReplayStream {
    size: FrameSize,
    frame_interval: Duration,
    frame_count: u64,
    looping: bool,
    started: Instant,
    last_emitted: Option<u64>,
    live: bool,
}

impl ReplayStream {
    pub fn new(size: FrameSize, frame_interval: Duration, frame_count: u64, looping: bool) -> Self {
        ReplayStream {
            size,
            frame_interval,
            frame_count,
            looping,
            started: Instant::now(),
            last_emitted: None,
            live: frame_count > 0,
        }
    }

    /// The frame due after `elapsed`, unless it was already handed out
    pub fn frame_at(&mut self, elapsed: Duration) -> Option<VideoFrame> {
        if !self.live {
            return None;
        }

        let due = (elapsed.as_secs_f64() / self.frame_interval.as_secs_f64()) as u64;
        if !self.looping && due >= self.frame_count {
            info!("Recording ended after {} frames", self.frame_count);
            self.live = false;
            return None;
        }
        if self.last_emitted.is_some_and(|last| last >= due) {
            return None;
        }
        if let Some(last) = self.last_emitted {
            if due > last + 1 {
                debug!("Skipped {} late frame(s)", due - last - 1);
            }
        }
        self.last_emitted = Some(due);

        Some(VideoFrame {
            index: due % self.frame_count,
            size: self.size,
            timestamp: elapsed,
        })
    }
}

impl VideoStream for ReplayStream {
    fn next_frame(&mut self) -> Option<VideoFrame> {
        let elapsed = self.started.elapsed();
        self.frame_at(elapsed)
    }

    fn is_live(&self) -> bool {
        self.live
    }

    fn stop_tracks(&mut self) {
        if self.live {
            debug!("Stopping replay stream");
        }
        self.live = false;
    }
}

#[cfg(test)]
mod tests {
    use std::env;

    use super::*;
    use crate::landmarks::{HandLandmarks, Landmark, LANDMARK_COUNT};

    fn recording(frames: usize) -> Recording {
        let hand = HandLandmarks::new([Landmark::new(0.5, 0.5, 0.); LANDMARK_COUNT]);
        Recording {
            width: 640,
            height: 480,
            fps: 10.,
            frames: (0..frames)
                .map(|i| HandLandmarkerResult {
                    hands: vec![hand.clone(); i % 3],
                })
                .collect(),
        }
    }

    fn frame(index: u64) -> VideoFrame {
        VideoFrame {
            index,
            size: FrameSize {
                width: 640,
                height: 480,
            },
            timestamp: Duration::ZERO,
        }
    }

    #[test]
    fn test_recording_roundtrips_through_json() {
        let original = recording(4);
        let text = serde_json::to_string(&original).unwrap();
        assert_eq!(Recording::parse(&text).unwrap(), original);
    }

    #[test]
    fn test_zero_fps_rejected() {
        let mut bad = recording(1);
        bad.fps = 0.;
        let text = serde_json::to_string(&bad).unwrap();
        assert!(Recording::parse(&text).is_err());
    }

    #[test]
    fn test_vanishing_fps_rejected() {
        let text = r#"{"width":640,"height":480,"fps":1e-25,"frames":[]}"#;
        assert!(Recording::parse(text).is_err());

        let mut bad = recording(1);
        bad.fps = 1e-25;
        assert!(bad.frame_interval().is_err());
        assert_eq!(
            recording(1).frame_interval().unwrap(),
            Duration::from_millis(100)
        );
    }

    #[test]
    fn test_landmarker_returns_recorded_hands() {
        let mut landmarker = ReplayLandmarker::new(&recording(5));
        assert_eq!(landmarker.detect(&frame(2), Duration::ZERO).unwrap().hands.len(), 2);
        assert_eq!(landmarker.detect(&frame(3), Duration::ZERO).unwrap().hands.len(), 0);
        assert!(landmarker.detect(&frame(99), Duration::ZERO).unwrap().hands.is_empty());
    }

    #[test]
    fn test_landmarker_unusable_after_close() {
        let mut landmarker = ReplayLandmarker::new(&recording(5));
        landmarker.close();
        assert!(landmarker.is_closed());
        assert!(landmarker.detect(&frame(0), Duration::ZERO).is_err());
    }

    #[test]
    fn test_stream_paces_frames() {
        let mut stream = ReplayStream::new(
            FrameSize {
                width: 640,
                height: 480,
            },
            Duration::from_millis(100),
            5,
            false,
        );
        assert_eq!(stream.frame_at(Duration::from_millis(0)).unwrap().index, 0);
        assert!(stream.frame_at(Duration::from_millis(50)).is_none());
        assert_eq!(stream.frame_at(Duration::from_millis(120)).unwrap().index, 1);
        // Slow poll: frames 2 and 3 are skipped
        assert_eq!(stream.frame_at(Duration::from_millis(450)).unwrap().index, 4);
        assert!(stream.frame_at(Duration::from_millis(510)).is_none());
        assert!(!stream.is_live());
    }

    #[test]
    fn test_looping_stream_wraps() {
        let mut stream = ReplayStream::new(
            FrameSize {
                width: 640,
                height: 480,
            },
            Duration::from_millis(100),
            3,
            true,
        );
        assert_eq!(stream.frame_at(Duration::from_millis(420)).unwrap().index, 1);
        assert!(stream.is_live());
    }

    #[test]
    fn test_stopped_stream_yields_nothing() {
        let mut stream = ReplayStream::new(
            FrameSize {
                width: 640,
                height: 480,
            },
            Duration::from_millis(100),
            3,
            true,
        );
        stream.stop_tracks();
        assert!(stream.frame_at(Duration::from_millis(100)).is_none());
    }

    #[test]
    fn test_camera_missing_file_is_device_error() {
        let mut camera = ReplayCamera::new(Path::new("./no/such/recording.json"), false);
        let request = StreamRequest {
            desired_size: FrameSize {
                width: 640,
                height: 480,
            },
        };
        assert!(matches!(
            camera.request_stream(request),
            Err(CameraError::Device(_))
        ));
    }

    #[test]
    fn test_camera_opens_recording() {
        let path = env::temp_dir().join(format!("hand-gestures-rec-{}.json", std::process::id()));
        fs::write(&path, serde_json::to_string(&recording(3)).unwrap()).unwrap();
        let mut camera = ReplayCamera::new(&path, false);
        let request = StreamRequest {
            desired_size: FrameSize {
                width: 640,
                height: 480,
            },
        };
        let stream = camera.request_stream(request).unwrap();
        assert!(stream.is_live());
        fs::remove_file(&path).unwrap();
    }
}
