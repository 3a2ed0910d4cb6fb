//! Supabase auth and PostgREST journal adapter

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::application::ports::{AuthError, AuthService, JournalError, JournalStore};
use crate::domain::journal::{
    AuthSession, Dream, DreamUpdate, NewDream, Profile, ProfileUpdate,
};

// Request types

#[derive(Debug, Serialize)]
struct PasswordCredentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct SignUpRequest<'a> {
    email: &'a str,
    password: &'a str,
    data: SignUpMetadata<'a>,
}

#[derive(Debug, Serialize)]
struct SignUpMetadata<'a> {
    display_name: &'a str,
}

#[derive(Debug, Serialize)]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

// Error bodies. GoTrue has used both shapes over time.

#[derive(Debug, Default, Deserialize)]
struct GoTrueError {
    error: Option<String>,
    error_description: Option<String>,
    error_code: Option<String>,
    msg: Option<String>,
    message: Option<String>,
}

impl GoTrueError {
    fn is_invalid_credentials(&self) -> bool {
        matches!(self.error_code.as_deref(), Some("invalid_credentials"))
            || matches!(self.error.as_deref(), Some("invalid_grant"))
    }

    fn into_message(self) -> Option<String> {
        self.msg
            .or(self.error_description)
            .or(self.message)
            .or(self.error)
    }
}

#[derive(Debug, Deserialize)]
struct PostgrestError {
    message: Option<String>,
}

fn now_unix() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Supabase client covering auth and the `profiles`/`dreams` tables.
///
/// The session is cached in memory and, when a session file is set, mirrored
/// to disk so it survives restarts. Expired sessions are refreshed on demand.
pub struct SupabaseClient {
    base_url: String,
    anon_key: String,
    client: reqwest::Client,
    session: Mutex<Option<AuthSession>>,
    session_file: Option<PathBuf>,
}

impl SupabaseClient {
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
            client: reqwest::Client::new(),
            session: Mutex::new(None),
            session_file: None,
        }
    }

    /// Persist the session as JSON at `path`
    pub fn with_session_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_file = Some(path.into());
        self
    }

    /// Load a previously persisted session into the cache.
    ///
    /// An unreadable or corrupt file is logged and treated as signed out.
    pub async fn restore_session(&self) -> Option<AuthSession> {
        let path = self.session_file.as_ref()?;
        if !path.exists() {
            return None;
        }

        let restored = match fs::read_to_string(path).await {
            Ok(content) => match serde_json::from_str::<AuthSession>(&content) {
                Ok(session) => Some(session),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "ignoring corrupt session file");
                    None
                }
            },
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not read session file");
                None
            }
        };

        *self.session.lock().await = restored.clone();
        restored
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    async fn persist(&self, session: Option<&AuthSession>) -> Result<(), AuthError> {
        let Some(path) = self.session_file.as_ref() else {
            return Ok(());
        };
        let storage = |e: std::io::Error| AuthError::SessionStorage(e.to_string());

        match session {
            Some(session) => {
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent).await.map_err(storage)?;
                }
                let content = serde_json::to_string_pretty(session)
                    .map_err(|e| AuthError::SessionStorage(e.to_string()))?;
                fs::write(path, content).await.map_err(storage)?;
                #[cfg(unix)]
                {
                    use std::os::unix::fs::PermissionsExt;
                    fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
                        .await
                        .map_err(storage)?;
                }
            }
            None => {
                if path.exists() {
                    fs::remove_file(path).await.map_err(storage)?;
                }
            }
        }
        Ok(())
    }

    /// Cache and persist a fresh session, filling in the absolute expiry
    async fn store_session(&self, mut session: AuthSession) -> Result<AuthSession, AuthError> {
        if session.expires_at.is_none() {
            session.expires_at = Some(now_unix() + session.expires_in);
        }
        self.persist(Some(&session)).await?;
        *self.session.lock().await = Some(session.clone());
        Ok(session)
    }

    async fn auth_error(response: Response) -> AuthError {
        let status = response.status();
        let body = response.json::<GoTrueError>().await.unwrap_or_default();

        if status == StatusCode::BAD_REQUEST && body.is_invalid_credentials() {
            return AuthError::InvalidCredentials;
        }
        let message = body.into_message().unwrap_or_else(|| {
            status.canonical_reason().unwrap_or("Unknown error").to_string()
        });
        AuthError::Rejected(message)
    }

    async fn parse_session(response: Response) -> Result<AuthSession, AuthError> {
        if !response.status().is_success() {
            return Err(Self::auth_error(response).await);
        }
        response
            .json()
            .await
            .map_err(|e| AuthError::Rejected(format!("unexpected auth response: {}", e)))
    }

    async fn refresh(&self, refresh_token: &str) -> Result<AuthSession, AuthError> {
        let response = self
            .client
            .post(self.auth_url("token"))
            .query(&[("grant_type", "refresh_token")])
            .header("apikey", &self.anon_key)
            .json(&RefreshRequest { refresh_token })
            .send()
            .await
            .map_err(|e| AuthError::RequestFailed(e.to_string()))?;

        let session = Self::parse_session(response).await?;
        self.store_session(session).await
    }

    /// Attach the project key and the user's token to a PostgREST request
    async fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder, JournalError> {
        let session = self.session().await.ok_or(JournalError::NotAuthenticated)?;
        Ok(request
            .header("apikey", &self.anon_key)
            .bearer_auth(session.access_token))
    }

    async fn rows<T: DeserializeOwned>(request: RequestBuilder) -> Result<Vec<T>, JournalError> {
        let response = request
            .send()
            .await
            .map_err(|e| JournalError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(JournalError::NotAuthenticated);
        }
        if !status.is_success() {
            let message = response
                .json::<PostgrestError>()
                .await
                .ok()
                .and_then(|e| e.message)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_string());
            return Err(JournalError::Remote {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| JournalError::ParseError(e.to_string()))
    }

    async fn single<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, JournalError> {
        Self::rows(request)
            .await?
            .into_iter()
            .next()
            .ok_or(JournalError::NotFound)
    }
}

#[async_trait]
impl AuthService for SupabaseClient {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        let response = self
            .client
            .post(self.auth_url("token"))
            .query(&[("grant_type", "password")])
            .header("apikey", &self.anon_key)
            .json(&PasswordCredentials { email, password })
            .send()
            .await
            .map_err(|e| AuthError::RequestFailed(e.to_string()))?;

        let session = Self::parse_session(response).await?;
        debug!(user_id = %session.user_id(), "signed in");
        self.store_session(session).await
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<Option<AuthSession>, AuthError> {
        let response = self
            .client
            .post(self.auth_url("signup"))
            .header("apikey", &self.anon_key)
            .json(&SignUpRequest {
                email,
                password,
                data: SignUpMetadata { display_name },
            })
            .send()
            .await
            .map_err(|e| AuthError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::auth_error(response).await);
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AuthError::Rejected(format!("unexpected auth response: {}", e)))?;

        // Without auto-confirm only the user comes back
        if body.get("access_token").is_none() {
            debug!("sign-up pending email confirmation");
            return Ok(None);
        }

        let session: AuthSession = serde_json::from_value(body)
            .map_err(|e| AuthError::Rejected(format!("unexpected auth response: {}", e)))?;
        self.store_session(session).await.map(Some)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let previous = self.session.lock().await.take();
        self.persist(None).await?;

        let Some(session) = previous else {
            return Ok(());
        };

        let response = self
            .client
            .post(self.auth_url("logout"))
            .header("apikey", &self.anon_key)
            .bearer_auth(&session.access_token)
            .send()
            .await
            .map_err(|e| AuthError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::auth_error(response).await);
        }
        Ok(())
    }

    async fn session(&self) -> Option<AuthSession> {
        let cached = self.session.lock().await.clone()?;
        if !cached.is_expired_at(now_unix()) {
            return Some(cached);
        }

        debug!("session expired, refreshing");
        match self.refresh(&cached.refresh_token).await {
            Ok(session) => Some(session),
            Err(e) => {
                warn!(error = %e, "session refresh failed, signing out locally");
                *self.session.lock().await = None;
                if let Err(e) = self.persist(None).await {
                    warn!(error = %e, "could not remove stale session file");
                }
                None
            }
        }
    }
}

#[async_trait]
impl JournalStore for SupabaseClient {
    async fn profile(&self, user_id: &str) -> Result<Profile, JournalError> {
        let request = self
            .client
            .get(self.rest_url("profiles"))
            .query(&[("id", format!("eq.{}", user_id)), ("select", "*".to_string())]);
        Self::single(self.authorized(request).await?).await
    }

    async fn update_profile(&self, user_id: &str, update: &ProfileUpdate) -> Result<Profile, JournalError> {
        let request = self
            .client
            .patch(self.rest_url("profiles"))
            .query(&[("id", format!("eq.{}", user_id))])
            .header("Prefer", "return=representation")
            .json(update);
        Self::single(self.authorized(request).await?).await
    }

    async fn insert_dream(&self, dream: &NewDream) -> Result<Dream, JournalError> {
        let request = self
            .client
            .post(self.rest_url("dreams"))
            .header("Prefer", "return=representation")
            .json(dream);
        Self::rows::<Dream>(self.authorized(request).await?)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| JournalError::ParseError("insert returned no row".to_string()))
    }

    async fn update_dream(&self, id: &str, update: &DreamUpdate) -> Result<Dream, JournalError> {
        let request = self
            .client
            .patch(self.rest_url("dreams"))
            .query(&[("id", format!("eq.{}", id))])
            .header("Prefer", "return=representation")
            .json(update);
        Self::single(self.authorized(request).await?).await
    }

    async fn list_dreams(&self, user_id: &str) -> Result<Vec<Dream>, JournalError> {
        let request = self.client.get(self.rest_url("dreams")).query(&[
            ("user_id", format!("eq.{}", user_id)),
            ("select", "*".to_string()),
            ("order", "created_at.desc".to_string()),
        ]);
        Self::rows(self.authorized(request).await?).await
    }
}
