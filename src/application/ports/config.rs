//! Settings storage port

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::warn;

use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

/// Port for persisted user settings
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Read the stored settings. A store with nothing saved yields an
    /// all-`None` config rather than an error.
    async fn load(&self) -> Result<AppConfig, ConfigError>;

    /// Replace the stored settings
    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError>;

    /// Where the settings live, for display
    fn path(&self) -> PathBuf;

    fn exists(&self) -> bool;

    /// Write the defaults. Refuses to overwrite existing settings.
    async fn init(&self) -> Result<(), ConfigError>;

    /// Settings for a command run: an unreadable store counts as empty
    async fn load_or_empty(&self) -> AppConfig {
        match self.load().await {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %self.path().display(), error = %e, "ignoring unreadable config");
                AppConfig::empty()
            }
        }
    }
}
