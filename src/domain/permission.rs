//! Microphone permission value objects

use std::fmt;

/// Cached view of the OS-level microphone grant.
///
/// Only an explicit request or a settings check moves it away from `Unknown`;
/// it is never assumed granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PermissionStatus {
    #[default]
    Unknown,
    Granted,
    Denied { can_ask_again: bool },
}

impl PermissionStatus {
    pub const fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }

    /// Whether a native prompt may still be shown for this status
    pub const fn may_prompt(&self) -> bool {
        matches!(
            self,
            Self::Unknown | Self::Denied { can_ask_again: true }
        )
    }
}

impl From<PermissionResponse> for PermissionStatus {
    fn from(response: PermissionResponse) -> Self {
        if response.granted {
            Self::Granted
        } else {
            Self::Denied {
                can_ask_again: response.can_ask_again,
            }
        }
    }
}

impl fmt::Display for PermissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => f.write_str("unknown"),
            Self::Granted => f.write_str("granted"),
            Self::Denied { can_ask_again: true } => f.write_str("denied"),
            Self::Denied { can_ask_again: false } => f.write_str("denied (blocked)"),
        }
    }
}

/// Raw answer from the platform permission API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermissionResponse {
    pub granted: bool,
    pub can_ask_again: bool,
}

impl PermissionResponse {
    pub const fn granted() -> Self {
        Self {
            granted: true,
            can_ask_again: true,
        }
    }

    pub const fn denied(can_ask_again: bool) -> Self {
        Self {
            granted: false,
            can_ask_again,
        }
    }
}
