//! Microphone permission port

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::permission::PermissionResponse;

#[derive(Debug, Clone, Error)]
pub enum PermissionError {
    #[error("Permission query failed: {0}")]
    QueryFailed(String),

    #[error("Permission request failed: {0}")]
    RequestFailed(String),
}

/// Port for the host platform's microphone permission API
#[async_trait]
pub trait MicrophonePermission: Send + Sync {
    /// Read the current grant without prompting the user
    async fn query(&self) -> Result<PermissionResponse, PermissionError>;

    /// Ask for access; may show a native prompt and waits for the answer
    async fn request(&self) -> Result<PermissionResponse, PermissionError>;
}
