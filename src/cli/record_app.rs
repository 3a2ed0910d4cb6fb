//! Record app runner
//!
//! Drives the hold-to-record control from the terminal: the control is held
//! from start until the user releases it, slides it to lock, or stops it.

use std::process::ExitCode;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration as StdDuration;

use indicatif::ProgressBar;
use tokio::time::timeout;
use tracing::debug;

use crate::application::ports::{Alerter, Haptics, MicrophonePermission, PlatformRecorder};
use crate::application::{InteractionCallbacks, InteractionConfig, InteractionMachine};
use crate::domain::interaction::InteractionState;
use crate::domain::recording::{format_elapsed, Artifact};
use crate::infrastructure::config::data_dir;
use crate::infrastructure::{create_haptics, create_recorder, DevicePermission};

use super::alerter::PresenterAlerter;
use super::app::{EXIT_ERROR, EXIT_SUCCESS};
use super::args::RecordOptions;
use super::presenter::Presenter;
use super::signals::{RecordInput, RecordInputHandler, INPUT_HELP};

/// How often the display refreshes and the length limit is checked
const POLL_INTERVAL: StdDuration = StdDuration::from_millis(100);

/// How a recording ended
#[derive(Debug, Clone, PartialEq)]
pub enum RecordOutcome {
    Saved(Artifact),
    Discarded,
    Failed,
}

/// Run the record command
pub async fn run_record(options: RecordOptions) -> ExitCode {
    let mut presenter = Presenter::new();

    let mut inputs = match RecordInputHandler::new().await {
        Ok(handler) => handler,
        Err(e) => {
            presenter.error(&format!("Failed to setup input handler: {}", e));
            return ExitCode::from(EXIT_ERROR);
        }
    };

    presenter.start_spinner("Starting...");
    let bar = presenter.spinner_handle();

    let lock_progress = Arc::new(AtomicU64::new(0f64.to_bits()));
    let callbacks = record_callbacks(bar.clone(), Arc::clone(&lock_progress));

    let config = InteractionConfig {
        lock_threshold: options.lock_threshold,
        max_duration: options.max_duration,
        haptics: options.haptics,
    };
    let mut machine = InteractionMachine::new(
        DevicePermission::new(),
        create_recorder(data_dir().join("recordings")),
        create_haptics(options.haptics),
        PresenterAlerter::new().with_progress(bar.clone()),
        config,
    )
    .with_callbacks(callbacks);

    if !machine.press_in().await {
        presenter.spinner_fail("Recording did not start");
        return ExitCode::from(EXIT_ERROR);
    }

    if let Some(ref bar) = bar {
        bar.println(INPUT_HELP);
    }

    let outcome = record_loop(&mut machine, &mut inputs, &presenter, &lock_progress).await;

    match outcome {
        RecordOutcome::Saved(artifact) => {
            presenter.spinner_success(&format!(
                "Recorded {}",
                format_elapsed(artifact.duration_seconds)
            ));
            if options.json {
                match serde_json::to_string_pretty(&artifact) {
                    Ok(json) => presenter.output(&json),
                    Err(e) => {
                        presenter.error(&format!("Failed to encode recording: {}", e));
                        return ExitCode::from(EXIT_ERROR);
                    }
                }
            } else {
                presenter.artifact(&artifact);
                presenter.info(&format!(
                    "Describe it and keep the recording with: dreamtalk interpret --save --audio {}",
                    artifact.uri
                ));
            }
            ExitCode::from(EXIT_SUCCESS)
        }
        RecordOutcome::Discarded => {
            presenter.spinner_fail("Recording discarded");
            ExitCode::from(EXIT_ERROR)
        }
        RecordOutcome::Failed => {
            presenter.spinner_fail("Recording failed");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn record_callbacks(bar: Option<ProgressBar>, lock_progress: Arc<AtomicU64>) -> InteractionCallbacks {
    let state_bar = bar;
    InteractionCallbacks {
        on_state_change: Some(Box::new(move |state: InteractionState| {
            debug!(%state, "record control changed");
            if state == InteractionState::Locked {
                if let Some(ref bar) = state_bar {
                    bar.println("Locked. Type s and Enter to stop.");
                }
            }
        })),
        on_lock_progress: Some(Box::new(move |progress: f64| {
            lock_progress.store(progress.to_bits(), Ordering::SeqCst);
        })),
    }
}

/// Feed inputs into the machine until the recording is finished or dropped
pub async fn record_loop<P, R, H, A>(
    machine: &mut InteractionMachine<P, R, H, A>,
    inputs: &mut RecordInputHandler,
    presenter: &Presenter,
    lock_progress: &AtomicU64,
) -> RecordOutcome
where
    P: MicrophonePermission,
    R: PlatformRecorder,
    H: Haptics,
    A: Alerter,
{
    loop {
        let state = machine.state();
        let progress = f64::from_bits(lock_progress.load(Ordering::SeqCst));
        let mut line = presenter.format_recording(
            state,
            machine.elapsed_seconds(),
            machine.config().max_duration,
        );
        if state == InteractionState::Recording && progress > 0.0 {
            line = format!("{}  {}", line, presenter.format_lock_progress(progress));
        }
        presenter.update_spinner(&line);

        let finished = match timeout(POLL_INTERVAL, inputs.recv()).await {
            Ok(Some(RecordInput::Release)) => {
                if machine.is_locked() {
                    presenter.update_spinner("Recording is locked; type s to stop");
                }
                machine.gesture_end().await
            }
            Ok(Some(RecordInput::Slide(points))) => {
                machine.gesture_move(-points);
                None
            }
            Ok(Some(RecordInput::Lock)) => {
                let past = machine.config().lock_threshold.points() + 1.0;
                machine.gesture_move(-past);
                None
            }
            Ok(Some(RecordInput::Stop)) | Ok(None) => machine.explicit_stop().await,
            Ok(Some(RecordInput::Cancel)) => {
                machine.screen_blur().await;
                return RecordOutcome::Discarded;
            }
            Err(_) => machine.enforce_max_duration().await,
        };

        if let Some(artifact) = finished {
            return RecordOutcome::Saved(artifact);
        }
        if machine.state() == InteractionState::Idle {
            return RecordOutcome::Failed;
        }
    }
}
