//! Platform recorder port

use async_trait::async_trait;
use thiserror::Error;

/// Recording errors
#[derive(Debug, Clone, Error)]
pub enum RecordingError {
    #[error("Failed to start recording: {0}")]
    StartFailed(String),

    #[error("Failed to stop recording: {0}")]
    StopFailed(String),

    #[error("No audio input device available")]
    NoAudioDevice,

    #[error("Recorder is already capturing")]
    AlreadyRecording,
}

/// Port for the platform's audio capture primitive.
///
/// One capture at a time; the recording session owns the recorder while a
/// capture is running.
#[async_trait]
pub trait PlatformRecorder: Send + Sync {
    /// Prepare the device and begin capturing.
    async fn start(&self) -> Result<(), RecordingError>;

    /// Finalize and flush the capture.
    ///
    /// # Returns
    /// The URI of the written file, or `None` when nothing was captured
    async fn stop(&self) -> Result<Option<String>, RecordingError>;

    /// Size of the resource behind `uri`, `None` if it does not exist
    async fn file_size(&self, uri: &str) -> Option<u64>;
}
