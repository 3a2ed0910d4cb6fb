//! Microphone permission gate

use tracing::{debug, warn};

use crate::domain::permission::PermissionStatus;

use super::ports::MicrophonePermission;

/// Caches the microphone grant in front of the platform permission API.
///
/// Platform failures are folded into `Denied { can_ask_again: true }` so
/// callers only ever deal with a status, never an error.
pub struct PermissionGate<P: MicrophonePermission> {
    platform: P,
    status: PermissionStatus,
}

impl<P: MicrophonePermission> PermissionGate<P> {
    pub fn new(platform: P) -> Self {
        Self {
            platform,
            status: PermissionStatus::Unknown,
        }
    }

    /// Last known status; `Unknown` until checked or requested
    pub fn status(&self) -> PermissionStatus {
        self.status
    }

    /// Query the current grant without prompting.
    pub async fn check(&mut self) -> PermissionStatus {
        self.status = match self.platform.query().await {
            Ok(response) => response.into(),
            Err(e) => {
                warn!(error = %e, "microphone permission query failed");
                PermissionStatus::Denied {
                    can_ask_again: true,
                }
            }
        };
        debug!(status = %self.status, "microphone permission checked");
        self.status
    }

    /// Ask for access, prompting if the platform wants to.
    ///
    /// Returns `true` straight away when access was already granted.
    pub async fn request(&mut self) -> bool {
        if self.status.is_granted() {
            return true;
        }

        self.status = match self.platform.request().await {
            Ok(response) => response.into(),
            Err(e) => {
                warn!(error = %e, "microphone permission request failed");
                PermissionStatus::Denied {
                    can_ask_again: true,
                }
            }
        };
        debug!(status = %self.status, "microphone permission requested");
        self.status.is_granted()
    }

    /// Forget the cached status and read it again from the platform,
    /// e.g. after the user returns from system settings.
    pub async fn refresh(&mut self) -> PermissionStatus {
        self.status = PermissionStatus::Unknown;
        self.check().await
    }
}
