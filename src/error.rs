use thiserror::Error;

/// Why a camera stream could not be opened
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CameraError {
    #[error("camera access was denied")]
    PermissionDenied,

    #[error("camera unavailable: {0}")]
    Device(String),
}

/// Failures that halt tracking. None of these are retried automatically.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrackingError {
    /// The detector could not be loaded; only a full restart helps
    #[error("failed to initialise hand landmark detector: {0}")]
    InitializationFailure(String),

    #[error("camera permission denied; allow camera access and try again")]
    PermissionDenied,

    #[error("camera error: {0}")]
    DeviceError(String),
}

impl TrackingError {
    /// Whether toggling tracking again may succeed
    pub fn is_user_recoverable(&self) -> bool {
        !matches!(self, TrackingError::InitializationFailure(_))
    }
}

impl From<CameraError> for TrackingError {
    fn from(e: CameraError) -> Self {
        match e {
            CameraError::PermissionDenied => TrackingError::PermissionDenied,
            CameraError::Device(reason) => TrackingError::DeviceError(reason),
        }
    }
}
