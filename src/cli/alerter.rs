//! Terminal alerter

use indicatif::ProgressBar;

use crate::application::ports::{Alert, AlertKind, Alerter};

use super::presenter::Presenter;

/// Shown with `OpenSettings` alerts on desktop platforms
const SETTINGS_HINT: &str =
    "Check that a microphone is connected and that this terminal may use it in your system privacy settings";

/// Prints alerts to stderr through the presenter
pub struct PresenterAlerter {
    presenter: Presenter,
    progress: Option<ProgressBar>,
}

impl PresenterAlerter {
    pub fn new() -> Self {
        Self {
            presenter: Presenter::new(),
            progress: None,
        }
    }

    /// Print above a running progress line instead of through it
    pub fn with_progress(mut self, progress: Option<ProgressBar>) -> Self {
        self.progress = progress;
        self
    }

    fn emit(&self, alert: &Alert) {
        let line = format_alert(alert);
        match alert.kind {
            AlertKind::Info => self.presenter.info(&line),
            AlertKind::Warning => self.presenter.warn(&line),
            AlertKind::Error => self.presenter.error(&line),
            AlertKind::OpenSettings => {
                self.presenter.warn(&line);
                self.presenter.info(SETTINGS_HINT);
            }
        }
    }
}

impl Default for PresenterAlerter {
    fn default() -> Self {
        Self::new()
    }
}

impl Alerter for PresenterAlerter {
    fn alert(&self, alert: Alert) {
        match &self.progress {
            Some(bar) => bar.suspend(|| self.emit(&alert)),
            None => self.emit(&alert),
        }
    }
}

fn format_alert(alert: &Alert) -> String {
    if alert.title.is_empty() {
        alert.message.clone()
    } else if alert.message.is_empty() {
        alert.title.clone()
    } else {
        format!("{}: {}", alert.title, alert.message)
    }
}
