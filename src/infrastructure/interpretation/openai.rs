//! OpenAI chat-completions interpreter adapter

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ports::{InterpretationError, Interpreter};
use crate::domain::config::DEFAULT_OPENAI_MODEL;
use crate::domain::interpretation::{
    InterpretationPrompt, InterpretationResult, DEFAULT_LANGUAGE, SYSTEM_MESSAGE,
};

/// OpenAI API base URL
pub const DEFAULT_API_BASE_URL: &str = "https://api.openai.com/v1";

const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 1500;

// Request types for the chat-completions API

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f32,
    max_tokens: u32,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

// Response types

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Option<Vec<Choice>>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: Option<String>,
}

/// OpenAI dream interpreter
pub struct OpenAiInterpreter {
    api_key: Option<String>,
    model: String,
    language: String,
    base_url: String,
    client: reqwest::Client,
}

impl OpenAiInterpreter {
    /// Create an interpreter. A missing or empty key leaves it unconfigured;
    /// calls then fail with a configuration error.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model: DEFAULT_OPENAI_MODEL.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            base_url: DEFAULT_API_BASE_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Language the analysis is written in
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Point at a different API root (proxies, tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn api_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn build_request(&self, text: &str) -> ChatCompletionRequest {
        let prompt = InterpretationPrompt::build(text, &self.language);
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                Message {
                    role: "system",
                    content: SYSTEM_MESSAGE.to_string(),
                },
                Message {
                    role: "user",
                    content: prompt.into_content(),
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            response_format: ResponseFormat {
                kind: "json_object",
            },
        }
    }

    /// Pull the completion text out of the response envelope
    fn extract_content(response: &ChatCompletionResponse) -> Option<&str> {
        response
            .choices
            .as_ref()?
            .first()?
            .message
            .as_ref()?
            .content
            .as_deref()
            .filter(|c| !c.trim().is_empty())
    }

    /// Decode the model's JSON and check the required fields
    fn parse_result(content: &str) -> Result<InterpretationResult, InterpretationError> {
        let result: InterpretationResult = serde_json::from_str(content)
            .map_err(|e| InterpretationError::Parse(e.to_string()))?;

        if !result.is_complete() {
            return Err(InterpretationError::Parse(
                "Invalid response format: missing interpretation or summary".to_string(),
            ));
        }
        Ok(result)
    }
}

#[async_trait]
impl Interpreter for OpenAiInterpreter {
    async fn interpret(&self, text: &str) -> Result<InterpretationResult, InterpretationError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            InterpretationError::Configuration("OpenAI API key not configured".to_string())
        })?;

        if text.trim().is_empty() {
            return Err(InterpretationError::Validation(
                "Dream text is required".to_string(),
            ));
        }

        let body = self.build_request(text);
        debug!(model = %self.model, chars = text.chars().count(), "requesting dream interpretation");

        let response = self
            .client
            .post(self.api_url())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| InterpretationError::Remote(e.to_string()))?;

        let status = response.status();

        if !status.is_success() {
            let upstream = response
                .json::<ErrorResponse>()
                .await
                .ok()
                .and_then(|body| body.error)
                .and_then(|error| error.message);
            let message = upstream.unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string()
            });
            return Err(InterpretationError::Remote(message));
        }

        let response: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| InterpretationError::Parse(e.to_string()))?;

        let content = Self::extract_content(&response).ok_or_else(|| {
            InterpretationError::Parse("No response received from OpenAI".to_string())
        })?;

        Self::parse_result(content)
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}
