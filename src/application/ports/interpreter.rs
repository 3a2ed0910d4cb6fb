//! Dream interpretation port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::interpretation::InterpretationResult;

/// Interpretation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterpretationError {
    #[error("Interpretation service is not configured: {0}")]
    Configuration(String),

    #[error("{0}")]
    Validation(String),

    #[error("Interpretation service error: {0}")]
    Remote(String),

    #[error("Failed to parse interpretation: {0}")]
    Parse(String),
}

/// Port for dream interpretation
#[async_trait]
pub trait Interpreter: Send + Sync {
    /// Interpret a dream description.
    ///
    /// One attempt per call; callers own any retry affordance.
    async fn interpret(&self, text: &str) -> Result<InterpretationResult, InterpretationError>;

    /// Whether a credential is present
    fn is_configured(&self) -> bool;
}
