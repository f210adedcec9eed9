//! Collaborators the tracker drives but does not implement: the camera and
//! the landmark detector.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{error::CameraError, landmarks::HandLandmarkerResult};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

/// A frame handed out by a [`VideoStream`]. Pixel data stays with the
/// stream/detector pair; the tracker only needs to know which frame it is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VideoFrame {
    pub index: u64,
    pub size: FrameSize,
    /// Presentation time since the stream started
    pub timestamp: Duration,
}

/// What to ask the camera for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamRequest {
    pub desired_size: FrameSize,
}

pub trait LandmarkSource {
    /// Find all hands in a frame
    fn detect(
        &mut self,
        frame: &VideoFrame,
        timestamp: Duration,
    ) -> anyhow::Result<HandLandmarkerResult>;

    /// Release detector resources
    fn close(&mut self);
}

pub trait Camera {
    type Stream: VideoStream;

    fn request_stream(&mut self, request: StreamRequest) -> Result<Self::Stream, CameraError>;
}

pub trait VideoStream {
    /// The next frame, if one has become available since the last call
    fn next_frame(&mut self) -> Option<VideoFrame>;

    /// Whether the stream can still produce frames
    fn is_live(&self) -> bool;

    /// Stop every track and release the device
    fn stop_tracks(&mut self);
}
