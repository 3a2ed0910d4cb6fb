//! Recording session use case
//!
//! Wraps one platform capture: permission, start, optional lock, and either
//! finalization into an [`Artifact`] or cancellation. The elapsed-seconds
//! clock is a [`TickTimer`] owned by the session, so stopping, cancelling or
//! dropping the session always releases it.

use std::sync::Arc;
use std::time::SystemTime;

use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::recording::{Artifact, RecordingState};

use super::permission_gate::PermissionGate;
use super::ports::{MicrophonePermission, PlatformRecorder, RecordingError};
use super::ticker::{TickTimer, TICK_PERIOD};

/// Why a recording could not start
#[derive(Debug, Clone, Error)]
pub enum StartError {
    #[error("Microphone permission denied")]
    PermissionDenied { can_ask_again: bool },

    #[error("Recorder failed to start: {0}")]
    RecorderInit(#[from] RecordingError),

    #[error("A recording is already in progress (session is {0})")]
    AlreadyActive(RecordingState),
}

/// Why a recording could not be finalized
#[derive(Debug, Clone, Error)]
pub enum StopError {
    #[error("No active recording (session is {0})")]
    NoActiveRecording(RecordingState),

    #[error("Recorder returned no audio file")]
    NoData,

    #[error("Recorder failed to stop: {0}")]
    Recorder(#[from] RecordingError),
}

/// A single capture and its clock
pub struct RecordingSession<R: PlatformRecorder> {
    recorder: Arc<R>,
    state: RecordingState,
    started_at: Option<SystemTime>,
    timer: Option<TickTimer>,
    /// Frozen clock value once the timer is released
    elapsed_seconds: u64,
    artifact: Option<Artifact>,
}

impl<R: PlatformRecorder> RecordingSession<R> {
    pub fn new(recorder: Arc<R>) -> Self {
        Self {
            recorder,
            state: RecordingState::Idle,
            started_at: None,
            timer: None,
            elapsed_seconds: 0,
            artifact: None,
        }
    }

    pub fn state(&self) -> RecordingState {
        self.state
    }

    /// Whole seconds captured so far, frozen once the session stops
    pub fn elapsed_seconds(&self) -> u64 {
        match &self.timer {
            Some(timer) => timer.elapsed(),
            None => self.elapsed_seconds,
        }
    }

    pub fn started_at(&self) -> Option<SystemTime> {
        self.started_at
    }

    /// The finalized artifact, present only in `Finalized`
    pub fn artifact(&self) -> Option<&Artifact> {
        self.artifact.as_ref()
    }

    pub fn has_active_timer(&self) -> bool {
        self.timer.as_ref().is_some_and(TickTimer::is_running)
    }

    /// Acquire permission and begin capturing.
    ///
    /// A denial the user blocked (`can_ask_again == false`) is refused without
    /// prompting again. Any failure leaves the session `Idle` with no tick.
    pub async fn start<P: MicrophonePermission>(
        &mut self,
        gate: &mut PermissionGate<P>,
    ) -> Result<(), StartError> {
        if self.state != RecordingState::Idle {
            return Err(StartError::AlreadyActive(self.state));
        }

        self.state = RecordingState::Requesting;
        let granted = if gate.status().may_prompt() {
            gate.request().await
        } else {
            gate.status().is_granted()
        };

        if !granted {
            self.state = RecordingState::Idle;
            let can_ask_again = gate.status().may_prompt();
            debug!(can_ask_again, "recording refused: no microphone permission");
            return Err(StartError::PermissionDenied { can_ask_again });
        }

        if let Err(e) = self.recorder.start().await {
            self.state = RecordingState::Idle;
            return Err(e.into());
        }

        self.elapsed_seconds = 0;
        self.artifact = None;
        self.started_at = Some(SystemTime::now());
        self.timer = Some(TickTimer::start(TICK_PERIOD));
        self.state = RecordingState::Recording;
        debug!("recording started");
        Ok(())
    }

    /// Pin the capture so releasing the control no longer stops it.
    /// Returns `false` unless the session was `Recording`.
    pub fn lock(&mut self) -> bool {
        if self.state != RecordingState::Recording {
            return false;
        }
        self.state = RecordingState::Locked;
        debug!("recording locked");
        true
    }

    /// Finalize the capture into an artifact.
    ///
    /// The tick is released before the recorder is asked to flush, so the
    /// artifact duration is the clock value at the moment of the stop.
    pub async fn stop(&mut self) -> Result<Artifact, StopError> {
        if !self.state.is_capturing() {
            return Err(StopError::NoActiveRecording(self.state));
        }

        self.state = RecordingState::Stopping;
        self.release_timer();

        match self.finalize().await {
            Ok(artifact) => {
                debug!(uri = %artifact.uri, duration = artifact.duration_seconds, "recording finalized");
                self.artifact = Some(artifact.clone());
                self.state = RecordingState::Finalized;
                Ok(artifact)
            }
            Err(e) => {
                self.state = RecordingState::Failed;
                Err(e)
            }
        }
    }

    async fn finalize(&self) -> Result<Artifact, StopError> {
        let uri = self.recorder.stop().await?.ok_or(StopError::NoData)?;
        let size_bytes = self.recorder.file_size(&uri).await.unwrap_or(0);
        Ok(Artifact::new(uri, self.elapsed_seconds, size_bytes))
    }

    /// Abandon the capture from any state. Never fails.
    pub async fn cancel(&mut self) {
        self.release_timer();

        if self.state.is_capturing() || self.state == RecordingState::Stopping {
            if let Err(e) = self.recorder.stop().await {
                warn!(error = %e, state = %self.state, "recorder stop failed during cancel");
            }
        }

        self.state = RecordingState::Idle;
        self.elapsed_seconds = 0;
        self.started_at = None;
        self.artifact = None;
        debug!("recording cancelled");
    }

    fn release_timer(&mut self) {
        if let Some(mut timer) = self.timer.take() {
            self.elapsed_seconds = timer.release();
        }
    }
}
