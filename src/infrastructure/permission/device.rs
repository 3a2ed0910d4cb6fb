//! Desktop microphone permission adapter
//!
//! Desktop hosts have no runtime prompt: access counts as granted when a
//! default input device is present. A missing device may appear later, so
//! the denial is always retryable.

use async_trait::async_trait;
use cpal::traits::HostTrait;

use crate::application::ports::{MicrophonePermission, PermissionError};
use crate::domain::permission::PermissionResponse;

/// Permission adapter backed by cpal device discovery
pub struct DevicePermission;

impl DevicePermission {
    pub fn new() -> Self {
        Self
    }

    async fn probe() -> Result<PermissionResponse, PermissionError> {
        let available = tokio::task::spawn_blocking(|| {
            cpal::default_host().default_input_device().is_some()
        })
        .await
        .map_err(|e| PermissionError::QueryFailed(format!("Device probe failed: {}", e)))?;

        Ok(if available {
            PermissionResponse::granted()
        } else {
            PermissionResponse::denied(true)
        })
    }
}

impl Default for DevicePermission {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MicrophonePermission for DevicePermission {
    async fn query(&self) -> Result<PermissionResponse, PermissionError> {
        Self::probe().await
    }

    async fn request(&self) -> Result<PermissionResponse, PermissionError> {
        Self::probe().await
    }
}
