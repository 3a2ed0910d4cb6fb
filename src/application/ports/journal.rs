//! Account and dream journal ports

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::journal::{
    AuthSession, Dream, DreamUpdate, NewDream, Profile, ProfileUpdate,
};

#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Authentication failed: {0}")]
    Rejected(String),

    #[error("Auth request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to persist session: {0}")]
    SessionStorage(String),
}

#[derive(Debug, Clone, Error)]
pub enum JournalError {
    #[error("Not signed in")]
    NotAuthenticated,

    #[error("Record not found")]
    NotFound,

    #[error("Journal request failed: {0}")]
    RequestFailed(String),

    #[error("Journal service error (HTTP {status}): {message}")]
    Remote { status: u16, message: String },

    #[error("Failed to parse journal response: {0}")]
    ParseError(String),
}

/// Port for account authentication
#[async_trait]
pub trait AuthService: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AuthError>;

    /// Create an account.
    ///
    /// # Returns
    /// The new session, or `None` when the backend wants the email confirmed first
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<Option<AuthSession>, AuthError>;

    /// End the session. The local session is cleared even if the backend call fails.
    async fn sign_out(&self) -> Result<(), AuthError>;

    /// The current session, if any
    async fn session(&self) -> Option<AuthSession>;
}

/// Port for profile and dream rows, scoped to the signed-in user
#[async_trait]
pub trait JournalStore: Send + Sync {
    async fn profile(&self, user_id: &str) -> Result<Profile, JournalError>;

    async fn update_profile(&self, user_id: &str, update: &ProfileUpdate) -> Result<Profile, JournalError>;

    async fn insert_dream(&self, dream: &NewDream) -> Result<Dream, JournalError>;

    async fn update_dream(&self, id: &str, update: &DreamUpdate) -> Result<Dream, JournalError>;

    /// Dreams of a user, newest first
    async fn list_dreams(&self, user_id: &str) -> Result<Vec<Dream>, JournalError>;
}
