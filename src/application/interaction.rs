//! Record-button interaction use case
//!
//! Turns press, drag and lifecycle inputs into recording-session calls,
//! haptic pulses and alerts. At most one [`RecordingSession`] is alive at a
//! time and every exit path, failures included, returns to `Idle` with no
//! running tick.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::gesture::{GestureEvent, GestureTrack, LockThreshold};
use crate::domain::interaction::{InteractionSession, InteractionState, InvalidStateTransition};
use crate::domain::permission::PermissionStatus;
use crate::domain::recording::{Artifact, Duration};

use super::permission_gate::PermissionGate;
use super::ports::{
    Alert, AlertKind, Alerter, HapticStyle, Haptics, MicrophonePermission, PlatformRecorder,
};
use super::recording_session::{RecordingSession, StartError, StopError};

/// Tunables for the record control
#[derive(Debug, Clone, Copy)]
pub struct InteractionConfig {
    /// Upward drag distance that locks a recording
    pub lock_threshold: LockThreshold,
    /// Recordings are stopped once they reach this length
    pub max_duration: Duration,
    /// Whether haptic pulses are emitted
    pub haptics: bool,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            lock_threshold: LockThreshold::default(),
            max_duration: Duration::default_max_duration(),
            haptics: true,
        }
    }
}

/// Observers for UI updates
#[derive(Default)]
pub struct InteractionCallbacks {
    /// Called after every state change
    pub on_state_change: Option<Box<dyn Fn(InteractionState) + Send + Sync>>,
    /// Called with the lock indicator fill in `[0, 1]` on every drag sample
    pub on_lock_progress: Option<Box<dyn Fn(f64) + Send + Sync>>,
}

/// Record control state machine
pub struct InteractionMachine<P, R, H, A>
where
    P: MicrophonePermission,
    R: PlatformRecorder,
    H: Haptics,
    A: Alerter,
{
    gate: PermissionGate<P>,
    recorder: Arc<R>,
    haptics: H,
    alerter: A,
    config: InteractionConfig,
    callbacks: InteractionCallbacks,
    session: InteractionSession,
    recording: Option<RecordingSession<R>>,
    gesture: Option<GestureTrack>,
}

impl<P, R, H, A> InteractionMachine<P, R, H, A>
where
    P: MicrophonePermission,
    R: PlatformRecorder,
    H: Haptics,
    A: Alerter,
{
    pub fn new(permission: P, recorder: R, haptics: H, alerter: A, config: InteractionConfig) -> Self {
        Self {
            gate: PermissionGate::new(permission),
            recorder: Arc::new(recorder),
            haptics,
            alerter,
            config,
            callbacks: InteractionCallbacks::default(),
            session: InteractionSession::new(),
            recording: None,
            gesture: None,
        }
    }

    pub fn with_callbacks(mut self, callbacks: InteractionCallbacks) -> Self {
        self.callbacks = callbacks;
        self
    }

    pub fn state(&self) -> InteractionState {
        self.session.state()
    }

    pub fn is_locked(&self) -> bool {
        self.session.is_locked()
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.recording
            .as_ref()
            .map_or(0, RecordingSession::elapsed_seconds)
    }

    pub fn permission_status(&self) -> PermissionStatus {
        self.gate.status()
    }

    pub fn has_active_timer(&self) -> bool {
        self.recording
            .as_ref()
            .is_some_and(RecordingSession::has_active_timer)
    }

    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    /// Read the microphone grant without prompting, e.g. when the screen mounts
    pub async fn check_permission(&mut self) -> PermissionStatus {
        self.gate.check().await
    }

    /// Prompt for the microphone up front; alerts on denial
    pub async fn request_permission(&mut self) -> bool {
        let granted = self.gate.request().await;
        if !granted {
            self.alert_permission_denied(self.gate.status().may_prompt());
        }
        granted
    }

    /// Re-read the grant after the user returns from system settings
    pub async fn refresh_permission(&mut self) -> PermissionStatus {
        self.gate.refresh().await
    }

    /// Finger down on the record control. Returns whether recording began.
    pub async fn press_in(&mut self) -> bool {
        if !self.session.is_idle() || self.recording.is_some() {
            debug!(state = %self.state(), "press-in ignored");
            return false;
        }

        let mut recording = RecordingSession::new(Arc::clone(&self.recorder));
        match recording.start(&mut self.gate).await {
            Ok(()) => {
                let began = self.session.begin();
                self.recording = Some(recording);
                self.gesture = Some(GestureTrack::new(self.config.lock_threshold));
                self.apply(began);
                self.pulse(HapticStyle::Medium);
                true
            }
            Err(StartError::PermissionDenied { can_ask_again }) => {
                self.alert_permission_denied(can_ask_again);
                false
            }
            Err(e) => {
                warn!(error = %e, "could not start recording");
                self.alerter.alert(Alert::new(
                    AlertKind::Error,
                    "Recording failed",
                    "Could not start recording. Please try again.",
                ));
                false
            }
        }
    }

    /// Finger up. Stops an unlocked recording; ignored while locked.
    pub async fn press_out(&mut self) -> Option<Artifact> {
        match self.state() {
            InteractionState::Recording => self.finish().await,
            InteractionState::Locked => {
                debug!("release ignored: recording is locked");
                None
            }
            state => {
                debug!(%state, "release ignored");
                None
            }
        }
    }

    /// One vertical drag sample (negative is upward).
    pub fn gesture_move(&mut self, displacement: f64) -> Option<GestureEvent> {
        if self.state() != InteractionState::Recording {
            return None;
        }

        let track = self
            .gesture
            .unwrap_or_else(|| GestureTrack::new(self.config.lock_threshold));
        let (track, event) = track.step(displacement);
        self.gesture = Some(track);

        if let Some(on_progress) = &self.callbacks.on_lock_progress {
            on_progress(track.progress());
        }
        if event == Some(GestureEvent::Lock) {
            self.slide_lock();
        }
        event
    }

    /// End of the drag. An unlocked drag ending counts as a release.
    pub async fn gesture_end(&mut self) -> Option<Artifact> {
        let track = self.gesture?;
        if self.state() != InteractionState::Recording {
            return None;
        }
        match track.finish() {
            Some(GestureEvent::ReleaseWithoutLock) => self.press_out().await,
            _ => None,
        }
    }

    /// Pin the current recording. Idempotent.
    pub fn slide_lock(&mut self) -> bool {
        let locked = self.session.lock();
        if locked.is_err() {
            debug!(state = %self.state(), "lock ignored");
            return false;
        }

        if let Some(recording) = self.recording.as_mut() {
            recording.lock();
        }
        self.apply(locked);
        self.pulse(HapticStyle::Heavy);
        true
    }

    /// The stop control, available while recording or locked
    pub async fn explicit_stop(&mut self) -> Option<Artifact> {
        if !self.session.is_capturing() {
            debug!(state = %self.state(), "stop ignored");
            return None;
        }
        self.finish().await
    }

    /// Screen lost focus: drop everything without alerting.
    pub async fn screen_blur(&mut self) {
        self.gesture = None;
        if let Some(mut recording) = self.recording.take() {
            recording.cancel().await;
        }
        if !self.session.is_idle() {
            self.session.reset();
            self.notify_state();
            debug!("interaction reset on blur");
        }
    }

    /// Stop the recording if it has reached the configured maximum length.
    pub async fn enforce_max_duration(&mut self) -> Option<Artifact> {
        let limit = self.config.max_duration.as_secs();
        if !self.session.is_capturing() || self.elapsed_seconds() < limit {
            return None;
        }
        info!(limit_seconds = limit, "maximum recording length reached");
        self.finish().await
    }

    /// Finalize the current recording. The lock is cleared before the
    /// artifact is produced.
    async fn finish(&mut self) -> Option<Artifact> {
        let finalizing = self.session.finalize();
        let refused = finalizing.is_err();
        self.apply(finalizing);
        if refused {
            return None;
        }
        self.gesture = None;

        let Some(mut recording) = self.recording.take() else {
            warn!("capturing state without a recording session");
            self.session.reset();
            self.notify_state();
            return None;
        };

        match recording.stop().await {
            Ok(artifact) => {
                let completed = self.session.complete();
                self.apply(completed);
                Some(artifact)
            }
            Err(StopError::NoActiveRecording(state)) => {
                warn!(%state, "stop requested with nothing to stop");
                self.session.reset();
                self.notify_state();
                None
            }
            Err(e) => {
                warn!(error = %e, "could not finalize recording");
                let failed = self.session.fail();
                self.apply(failed);
                self.alerter.alert(Alert::new(
                    AlertKind::Error,
                    "Recording failed",
                    "The recording could not be saved. Please try again.",
                ));
                let completed = self.session.complete();
                self.apply(completed);
                None
            }
        }
    }

    fn alert_permission_denied(&self, can_ask_again: bool) {
        let alert = if can_ask_again {
            Alert::new(
                AlertKind::Warning,
                "Microphone permission required",
                "DreamTalk needs microphone access to record your dreams.",
            )
        } else {
            Alert::new(
                AlertKind::OpenSettings,
                "Microphone access blocked",
                "Enable microphone access for DreamTalk in your system settings.",
            )
        };
        self.alerter.alert(alert);
    }

    fn pulse(&self, style: HapticStyle) {
        if self.config.haptics {
            self.haptics.pulse(style);
        }
    }

    fn apply(&self, transition: Result<(), InvalidStateTransition>) {
        match transition {
            Ok(()) => {
                debug!(state = %self.state(), "interaction state changed");
                self.notify_state();
            }
            Err(e) => debug!(error = %e, "transition refused"),
        }
    }

    fn notify_state(&self) {
        if let Some(on_change) = &self.callbacks.on_state_change {
            on_change(self.state());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::permission_gate::tests::ScriptedPermission;
    use crate::application::ports::RecordingError;
    use crate::domain::permission::PermissionResponse;
    use crate::application::recording_session::tests::{MockRecorder, MOCK_URI};
    use std::sync::atomic::Ordering;
    use std::sync::Mutex;
    use std::time::Duration as StdDuration;
    use tokio::time::sleep;

    #[derive(Clone, Default)]
    struct SpyHaptics(Arc<Mutex<Vec<HapticStyle>>>);

    impl Haptics for SpyHaptics {
        fn pulse(&self, style: HapticStyle) {
            self.0.lock().unwrap().push(style);
        }
    }

    #[derive(Clone, Default)]
    struct SpyAlerter(Arc<Mutex<Vec<Alert>>>);

    impl Alerter for SpyAlerter {
        fn alert(&self, alert: Alert) {
            self.0.lock().unwrap().push(alert);
        }
    }

    type Machine = InteractionMachine<ScriptedPermission, MockRecorder, SpyHaptics, SpyAlerter>;

    struct Harness {
        machine: Machine,
        haptics: SpyHaptics,
        alerts: SpyAlerter,
        states: Arc<Mutex<Vec<InteractionState>>>,
    }

    impl Harness {
        fn new(permission: ScriptedPermission, recorder: MockRecorder) -> Self {
            Self::with_config(permission, recorder, InteractionConfig::default())
        }

        fn with_config(
            permission: ScriptedPermission,
            recorder: MockRecorder,
            config: InteractionConfig,
        ) -> Self {
            let haptics = SpyHaptics::default();
            let alerts = SpyAlerter::default();
            let states = Arc::new(Mutex::new(Vec::new()));
            let sink = Arc::clone(&states);
            let machine = InteractionMachine::new(
                permission,
                recorder,
                haptics.clone(),
                alerts.clone(),
                config,
            )
            .with_callbacks(InteractionCallbacks {
                on_state_change: Some(Box::new(move |state: InteractionState| {
                    sink.lock().unwrap().push(state)
                })),
                on_lock_progress: None,
            });
            Self {
                machine,
                haptics,
                alerts,
                states,
            }
        }

        fn pulses(&self) -> Vec<HapticStyle> {
            self.haptics.0.lock().unwrap().clone()
        }

        fn alerts(&self) -> Vec<Alert> {
            self.alerts.0.lock().unwrap().clone()
        }

        fn states(&self) -> Vec<InteractionState> {
            self.states.lock().unwrap().clone()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn hold_and_release_produces_artifact() {
        let mut h = Harness::new(ScriptedPermission::granting(), MockRecorder::new());

        assert!(h.machine.press_in().await);
        assert_eq!(h.machine.state(), InteractionState::Recording);
        assert_eq!(h.pulses(), vec![HapticStyle::Medium]);

        sleep(StdDuration::from_millis(3100)).await;
        let artifact = h.machine.press_out().await.unwrap();

        assert_eq!(artifact.duration_seconds, 3);
        assert_eq!(artifact.uri, MOCK_URI);
        assert_eq!(h.machine.state(), InteractionState::Idle);
        assert!(!h.machine.has_active_timer());
        assert_eq!(
            h.states(),
            vec![
                InteractionState::Recording,
                InteractionState::Finalizing,
                InteractionState::Idle
            ]
        );
    }

    #[tokio::test]
    async fn slide_up_locks_once_and_release_keeps_recording() {
        let mut h = Harness::new(ScriptedPermission::granting(), MockRecorder::new());
        h.machine.press_in().await;

        assert_eq!(h.machine.gesture_move(-30.0), None);
        assert_eq!(h.machine.gesture_move(-61.0), Some(GestureEvent::Lock));
        assert_eq!(h.machine.gesture_move(-90.0), None);
        assert!(h.machine.is_locked());
        assert_eq!(h.pulses(), vec![HapticStyle::Medium, HapticStyle::Heavy]);

        assert_eq!(h.machine.gesture_end().await, None);
        assert_eq!(h.machine.press_out().await, None);
        assert_eq!(h.machine.state(), InteractionState::Locked);
        assert!(h.machine.has_active_timer());

        let artifact = h.machine.explicit_stop().await;
        assert!(artifact.is_some());
        assert_eq!(h.machine.state(), InteractionState::Idle);
        assert!(!h.machine.is_locked());
    }

    #[tokio::test]
    async fn lock_progress_is_reported() {
        let progress = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&progress);
        let mut machine = InteractionMachine::new(
            ScriptedPermission::granting(),
            MockRecorder::new(),
            SpyHaptics::default(),
            SpyAlerter::default(),
            InteractionConfig::default(),
        )
        .with_callbacks(InteractionCallbacks {
            on_state_change: None,
            on_lock_progress: Some(Box::new(move |p: f64| sink.lock().unwrap().push(p))),
        });

        machine.press_in().await;
        machine.gesture_move(-30.0);
        machine.gesture_move(-120.0);

        assert_eq!(*progress.lock().unwrap(), vec![0.5, 1.0]);
    }

    #[tokio::test]
    async fn drag_without_lock_ends_as_release() {
        let mut h = Harness::new(ScriptedPermission::granting(), MockRecorder::new());
        h.machine.press_in().await;

        h.machine.gesture_move(-40.0);
        let artifact = h.machine.gesture_end().await;

        assert!(artifact.is_some());
        assert_eq!(h.machine.state(), InteractionState::Idle);
    }

    #[tokio::test]
    async fn slide_lock_is_idempotent() {
        let mut h = Harness::new(ScriptedPermission::granting(), MockRecorder::new());
        assert!(!h.machine.slide_lock());

        h.machine.press_in().await;
        assert!(h.machine.slide_lock());
        assert!(!h.machine.slide_lock());
        assert_eq!(h.pulses(), vec![HapticStyle::Medium, HapticStyle::Heavy]);
    }

    #[tokio::test]
    async fn blocked_permission_alerts_settings_without_recording() {
        let recorder = MockRecorder::new();
        let mut h = Harness::new(ScriptedPermission::denying(false), recorder);
        h.machine.check_permission().await;

        assert!(!h.machine.press_in().await);
        assert_eq!(h.machine.state(), InteractionState::Idle);
        assert!(!h.machine.has_active_timer());
        assert_eq!(h.alerts().len(), 1);
        assert_eq!(h.alerts()[0].kind, AlertKind::OpenSettings);
        assert!(h.pulses().is_empty());
        assert!(h.states().is_empty());
    }

    #[tokio::test]
    async fn refresh_after_settings_unblocks_recording() {
        let permission = ScriptedPermission::new(
            vec![
                Ok(PermissionResponse::denied(false)),
                Ok(PermissionResponse::granted()),
            ],
            vec![Ok(PermissionResponse::denied(false))],
        );
        let prompts = Arc::clone(&permission.prompts);
        let mut h = Harness::new(permission, MockRecorder::new());

        assert_eq!(
            h.machine.check_permission().await,
            PermissionStatus::Denied {
                can_ask_again: false
            }
        );
        assert!(!h.machine.press_in().await);
        assert_eq!(h.alerts()[0].kind, AlertKind::OpenSettings);

        assert_eq!(h.machine.refresh_permission().await, PermissionStatus::Granted);
        assert!(h.machine.press_in().await);
        assert_eq!(h.machine.state(), InteractionState::Recording);
        assert_eq!(prompts.load(Ordering::SeqCst), 0);
        assert_eq!(h.alerts().len(), 1);
    }

    #[tokio::test]
    async fn retryable_denial_alerts_warning() {
        let mut h = Harness::new(ScriptedPermission::denying(true), MockRecorder::new());

        assert!(!h.machine.press_in().await);
        assert_eq!(h.alerts()[0].kind, AlertKind::Warning);
        assert_eq!(
            h.machine.permission_status(),
            PermissionStatus::Denied {
                can_ask_again: true
            }
        );
    }

    #[tokio::test]
    async fn request_permission_alerts_on_denial() {
        let mut h = Harness::new(ScriptedPermission::denying(false), MockRecorder::new());
        assert!(!h.machine.request_permission().await);
        assert_eq!(h.alerts()[0].kind, AlertKind::OpenSettings);

        let mut h = Harness::new(ScriptedPermission::granting(), MockRecorder::new());
        assert!(h.machine.request_permission().await);
        assert!(h.alerts().is_empty());
    }

    #[tokio::test]
    async fn recorder_init_failure_alerts_and_stays_idle() {
        let mut h = Harness::new(ScriptedPermission::granting(), MockRecorder::failing_start());

        assert!(!h.machine.press_in().await);
        assert_eq!(h.machine.state(), InteractionState::Idle);
        assert_eq!(h.alerts()[0].kind, AlertKind::Error);
        assert!(h.pulses().is_empty());
    }

    #[tokio::test]
    async fn finalize_failure_alerts_and_returns_to_idle() {
        let recorder = MockRecorder::with_stop(Err(RecordingError::StopFailed("disk full".into())));
        let mut h = Harness::new(ScriptedPermission::granting(), recorder);
        h.machine.press_in().await;

        assert_eq!(h.machine.press_out().await, None);
        assert_eq!(h.machine.state(), InteractionState::Idle);
        assert!(!h.machine.has_active_timer());
        assert_eq!(h.alerts().len(), 1);
        assert_eq!(
            h.states(),
            vec![
                InteractionState::Recording,
                InteractionState::Finalizing,
                InteractionState::Failed,
                InteractionState::Idle
            ]
        );
    }

    #[tokio::test]
    async fn press_in_while_recording_is_ignored() {
        let mut h = Harness::new(ScriptedPermission::granting(), MockRecorder::new());
        assert!(h.machine.press_in().await);
        assert!(!h.machine.press_in().await);
        assert_eq!(h.pulses(), vec![HapticStyle::Medium]);
    }

    #[tokio::test(start_paused = true)]
    async fn blur_while_locked_resets_silently() {
        let mut h = Harness::new(ScriptedPermission::granting(), MockRecorder::new());
        h.machine.press_in().await;
        h.machine.slide_lock();
        sleep(StdDuration::from_millis(2500)).await;

        h.machine.screen_blur().await;

        assert_eq!(h.machine.state(), InteractionState::Idle);
        assert_eq!(h.machine.elapsed_seconds(), 0);
        assert!(!h.machine.has_active_timer());
        assert!(!h.machine.is_locked());
        assert!(h.alerts().is_empty());
        assert_eq!(h.machine.recorder.stops.load(Ordering::SeqCst), 1);
        assert!(!h.machine.recorder.is_capturing());
    }

    #[tokio::test]
    async fn blur_and_stop_from_idle_are_safe() {
        let mut h = Harness::new(ScriptedPermission::granting(), MockRecorder::new());

        h.machine.screen_blur().await;
        assert_eq!(h.machine.explicit_stop().await, None);
        assert_eq!(h.machine.press_out().await, None);
        assert_eq!(h.machine.gesture_end().await, None);
        assert_eq!(h.machine.gesture_move(-100.0), None);

        assert_eq!(h.machine.state(), InteractionState::Idle);
        assert!(h.alerts().is_empty());
        assert!(h.states().is_empty());
        assert_eq!(h.machine.recorder.stops.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn max_duration_stops_the_recording() {
        let config = InteractionConfig {
            max_duration: Duration::from_secs(2),
            ..InteractionConfig::default()
        };
        let mut h = Harness::with_config(ScriptedPermission::granting(), MockRecorder::new(), config);
        h.machine.press_in().await;
        h.machine.slide_lock();

        sleep(StdDuration::from_millis(1100)).await;
        assert_eq!(h.machine.enforce_max_duration().await, None);
        assert_eq!(h.machine.state(), InteractionState::Locked);

        sleep(StdDuration::from_secs(1)).await;
        let artifact = h.machine.enforce_max_duration().await.unwrap();
        assert_eq!(artifact.duration_seconds, 2);
        assert_eq!(h.machine.state(), InteractionState::Idle);
    }

    #[tokio::test]
    async fn haptics_can_be_disabled() {
        let config = InteractionConfig {
            haptics: false,
            ..InteractionConfig::default()
        };
        let mut h = Harness::with_config(ScriptedPermission::granting(), MockRecorder::new(), config);
        h.machine.press_in().await;
        h.machine.slide_lock();
        assert!(h.pulses().is_empty());
    }

    #[tokio::test]
    async fn new_recording_after_finish() {
        let mut h = Harness::new(ScriptedPermission::granting(), MockRecorder::new());
        h.machine.press_in().await;
        h.machine.press_out().await;

        assert!(h.machine.press_in().await);
        assert_eq!(h.machine.state(), InteractionState::Recording);
        assert_eq!(h.machine.recorder.starts.load(Ordering::SeqCst), 2);
    }
}
