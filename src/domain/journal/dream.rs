//! Dream journal rows

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::interpretation::InterpretationResult;

/// How the dream was captured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    Voice,
    Text,
}

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Voice => f.write_str("voice"),
            Self::Text => f.write_str("text"),
        }
    }
}

/// Interpretation progress of a journaled dream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DreamStatus {
    #[default]
    Processing,
    Completed,
    Failed,
}

impl fmt::Display for DreamStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Processing => f.write_str("processing"),
            Self::Completed => f.write_str("completed"),
            Self::Failed => f.write_str("failed"),
        }
    }
}

/// A row of the `dreams` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dream {
    pub id: String,
    pub user_id: String,
    #[serde(default)]
    pub title: Option<String>,
    pub content: String,
    pub input_type: InputType,
    pub status: DreamStatus,
    #[serde(default)]
    pub audio_url: Option<String>,
    #[serde(default)]
    pub interpretation: Option<String>,
    #[serde(default)]
    pub interpretation_summary: Option<String>,
    #[serde(default)]
    pub symbols_detected: Option<Value>,
    #[serde(default)]
    pub mood_analysis: Option<Value>,
    #[serde(default)]
    pub is_favorite: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Insert payload for a dream
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewDream {
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub content: String,
    pub input_type: InputType,
    pub status: DreamStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
}

impl NewDream {
    /// A freshly captured dream awaiting interpretation
    pub fn processing(user_id: impl Into<String>, content: impl Into<String>, input_type: InputType) -> Self {
        Self {
            user_id: user_id.into(),
            title: None,
            content: content.into(),
            input_type,
            status: DreamStatus::Processing,
            audio_url: None,
        }
    }
}

/// Partial update of a dream; unset fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DreamUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<DreamStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interpretation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interpretation_summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbols_detected: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood_analysis: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_favorite: Option<bool>,
}

impl DreamUpdate {
    /// Mark a dream completed with the interpretation's fields
    pub fn completed(result: &InterpretationResult) -> Self {
        Self {
            status: Some(DreamStatus::Completed),
            interpretation: Some(result.interpretation.clone()),
            interpretation_summary: Some(result.summary.clone()),
            symbols_detected: serde_json::to_value(&result.symbols).ok(),
            mood_analysis: serde_json::to_value(&result.mood).ok(),
            ..Default::default()
        }
    }

    pub fn failed() -> Self {
        Self {
            status: Some(DreamStatus::Failed),
            ..Default::default()
        }
    }
}
