//! Domain error types

use thiserror::Error;

/// Error when parsing a duration string
#[derive(Debug, Clone, Error)]
#[error("Invalid duration format: \"{input}\". Expected format: <number>s, <number>m, or <number>m<number>s (e.g., 30s, 1m, 2m30s)")]
pub struct DurationParseError {
    pub input: String,
}

/// Error when a lock threshold is zero or not a number
#[derive(Debug, Clone, Error)]
#[error("Invalid lock threshold: \"{input}\". Expected a positive number of points (e.g., 60)")]
pub struct LockThresholdError {
    pub input: String,
}

/// Error when a symbol category name is not recognised
#[derive(Debug, Clone, Error)]
#[error("Unknown symbol category: \"{input}\". Expected one of: all, nature, animals, objects")]
pub struct SymbolCategoryError {
    pub input: String,
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}
