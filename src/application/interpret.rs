//! Interpret dream use case

use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::interpretation::{estimate_tokens, InterpretationResult};
use crate::domain::journal::{Dream, DreamUpdate, InputType, NewDream, ProfileUpdate};

use super::ports::{AuthService, InterpretationError, Interpreter, JournalError, JournalStore};

/// Errors from the interpret use case
#[derive(Debug, Error)]
pub enum InterpretDreamError {
    #[error(transparent)]
    Interpretation(#[from] InterpretationError),

    #[error(transparent)]
    Journal(#[from] JournalError),

    #[error("Dream journal is not configured. Set supabase_url and supabase_anon_key via 'dreamtalk config set'")]
    JournalUnavailable,

    #[error("Not signed in. Run 'dreamtalk account sign-in' first")]
    NotSignedIn,
}

/// Input parameters for the interpret use case
#[derive(Debug, Clone)]
pub struct InterpretInput {
    /// The dream as the user told it
    pub text: String,
    /// How the dream was captured
    pub input_type: InputType,
    /// Local recording that accompanies the text, if any
    pub audio_url: Option<String>,
    /// Whether to journal the dream
    pub save: bool,
}

impl InterpretInput {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            input_type: InputType::Text,
            audio_url: None,
            save: false,
        }
    }
}

/// Output from the interpret use case
#[derive(Debug, Clone)]
pub struct InterpretOutput {
    pub result: InterpretationResult,
    /// The journaled row when saving was requested
    pub dream: Option<Dream>,
    /// Rough prompt size of the dream text
    pub estimated_tokens: usize,
}

/// Callbacks for status updates
#[derive(Default)]
#[allow(clippy::type_complexity)]
pub struct InterpretCallbacks {
    /// Called when the interpretation request starts
    pub on_interpreting_start: Option<Box<dyn Fn() + Send + Sync>>,
    /// Called when the interpretation request ends, successful or not
    pub on_interpreting_end: Option<Box<dyn Fn() + Send + Sync>>,
}

/// Interpret a dream and optionally keep it in the journal
pub struct InterpretDreamUseCase<I, J>
where
    I: Interpreter,
    J: AuthService + JournalStore,
{
    interpreter: I,
    journal: Option<J>,
}

impl<I, J> InterpretDreamUseCase<I, J>
where
    I: Interpreter,
    J: AuthService + JournalStore,
{
    /// Create a new use case instance. `journal` is only needed for saving.
    pub fn new(interpreter: I, journal: Option<J>) -> Self {
        Self {
            interpreter,
            journal,
        }
    }

    /// Execute the workflow.
    ///
    /// Configuration and blank-text errors surface before anything is written.
    /// With `save`, a `processing` row is inserted first and then marked
    /// `completed` or `failed` depending on the interpretation outcome.
    pub async fn execute(
        &self,
        input: InterpretInput,
        callbacks: InterpretCallbacks,
    ) -> Result<InterpretOutput, InterpretDreamError> {
        if !self.interpreter.is_configured() {
            return Err(InterpretationError::Configuration(
                "OpenAI API key is missing. Set OPENAI_API_KEY or run 'dreamtalk config set openai_api_key <key>'"
                    .to_string(),
            )
            .into());
        }
        if input.text.trim().is_empty() {
            return Err(InterpretationError::Validation("Dream text cannot be empty".to_string()).into());
        }

        let estimated_tokens = estimate_tokens(&input.text);

        if !input.save {
            let result = self.interpret(&input.text, &callbacks).await?;
            return Ok(InterpretOutput {
                result,
                dream: None,
                estimated_tokens,
            });
        }

        let journal = self
            .journal
            .as_ref()
            .ok_or(InterpretDreamError::JournalUnavailable)?;
        let session = journal
            .session()
            .await
            .ok_or(InterpretDreamError::NotSignedIn)?;
        let user_id = session.user_id();

        let mut new_dream = NewDream::processing(user_id, input.text.as_str(), input.input_type);
        new_dream.audio_url = input.audio_url.clone();
        let row = journal.insert_dream(&new_dream).await?;
        debug!(dream_id = %row.id, "dream journaled as processing");

        match self.interpret(&input.text, &callbacks).await {
            Ok(result) => {
                let dream = journal
                    .update_dream(&row.id, &DreamUpdate::completed(&result))
                    .await?;
                Self::bump_dream_count(journal, user_id).await;
                Ok(InterpretOutput {
                    result,
                    dream: Some(dream),
                    estimated_tokens,
                })
            }
            Err(e) => {
                if let Err(mark_err) = journal.update_dream(&row.id, &DreamUpdate::failed()).await {
                    warn!(dream_id = %row.id, error = %mark_err, "could not mark dream as failed");
                }
                Err(e.into())
            }
        }
    }

    async fn interpret(
        &self,
        text: &str,
        callbacks: &InterpretCallbacks,
    ) -> Result<InterpretationResult, InterpretationError> {
        if let Some(ref cb) = callbacks.on_interpreting_start {
            cb();
        }
        let result = self.interpreter.interpret(text).await;
        if let Some(ref cb) = callbacks.on_interpreting_end {
            cb();
        }
        result
    }

    /// Counter on the profile; failures here do not undo the saved dream.
    async fn bump_dream_count(journal: &J, user_id: &str) {
        let profile = match journal.profile(user_id).await {
            Ok(profile) => profile,
            Err(e) => {
                warn!(error = %e, "could not read profile to update dream count");
                return;
            }
        };
        let update = ProfileUpdate {
            dream_count: Some(profile.dream_count.saturating_add(1)),
            ..Default::default()
        };
        if let Err(e) = journal.update_profile(user_id, &update).await {
            warn!(error = %e, "could not update dream count");
        }
    }
}
