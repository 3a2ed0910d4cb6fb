//! User-facing alert port

/// Alert severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Info,
    Warning,
    Error,
    /// The user has to change a system setting to continue
    OpenSettings,
}

/// A single user-facing alert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn new(kind: AlertKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Port for surfacing alerts to the user
pub trait Alerter: Send + Sync {
    fn alert(&self, alert: Alert);
}

impl Alerter for Box<dyn Alerter> {
    fn alert(&self, alert: Alert) {
        self.as_ref().alert(alert)
    }
}
