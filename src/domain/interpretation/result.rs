//! Structured dream interpretation returned by the language model

use serde::{Deserialize, Serialize};

/// A symbol picked out of the dream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DreamSymbol {
    pub symbol: String,
    pub meaning: String,
    #[serde(default)]
    pub significance: String,
}

/// Emotional reading of the dream
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodAnalysis {
    #[serde(default)]
    pub primary: String,
    #[serde(default)]
    pub secondary: Vec<String>,
    #[serde(default)]
    pub emotional_tone: String,
}

/// Interpretation of one dream. Displayed as received, never mutated.
///
/// `interpretation` and `summary` are required; list fields tolerate being
/// absent from the model output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterpretationResult {
    pub interpretation: String,
    pub summary: String,
    #[serde(default)]
    pub symbols: Vec<DreamSymbol>,
    #[serde(default)]
    pub mood: MoodAnalysis,
    #[serde(default)]
    pub themes: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

impl InterpretationResult {
    /// Whether the required prose fields carry any text
    pub fn is_complete(&self) -> bool {
        !self.interpretation.trim().is_empty() && !self.summary.trim().is_empty()
    }
}
