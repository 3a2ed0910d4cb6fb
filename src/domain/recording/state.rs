//! Recording session lifecycle states

use std::fmt;

/// Lifecycle of a single audio capture.
///
/// ```text
///   Idle -> Requesting -> Recording -> Locked -> Stopping -> Finalized
///                 |            |__________________|    |
///                 v                                    v
///               Idle                                 Failed
/// ```
/// `cancel` returns every state to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RecordingState {
    #[default]
    Idle,
    Requesting,
    Recording,
    Locked,
    Stopping,
    Finalized,
    Failed,
}

impl RecordingState {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Requesting => "requesting",
            Self::Recording => "recording",
            Self::Locked => "locked",
            Self::Stopping => "stopping",
            Self::Finalized => "finalized",
            Self::Failed => "failed",
        }
    }

    /// Whether audio is being captured and the tick should be running
    pub const fn is_capturing(&self) -> bool {
        matches!(self, Self::Recording | Self::Locked)
    }
}

impl fmt::Display for RecordingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
