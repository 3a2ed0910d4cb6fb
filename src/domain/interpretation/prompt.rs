//! Dream analysis prompt value object

/// Output language when none is configured
pub const DEFAULT_LANGUAGE: &str = "Turkish";

/// System message sent ahead of every analysis request
pub const SYSTEM_MESSAGE: &str =
    "You are a professional dream analyst. Respond only with valid JSON.";

const TEMPLATE: &str = r#"You are a professional dream analyst and psychologist. Analyze the following dream and provide a comprehensive interpretation in {language}.

Dream Description: {dream}

Please provide your analysis as a JSON object with the following structure:
{
  "interpretation": "Detailed interpretation of the dream (2-3 paragraphs in {language})",
  "summary": "Brief summary in 1-2 sentences (in {language})",
  "symbols": [
    {
      "symbol": "Symbol name",
      "meaning": "What this symbol represents",
      "significance": "Its significance in the dream context"
    }
  ],
  "mood": {
    "primary": "Main emotional tone",
    "secondary": ["Additional emotions"],
    "emotional_tone": "Overall emotional assessment"
  },
  "themes": ["Main themes identified in the dream"],
  "suggestions": ["Practical suggestions or insights"]
}

Guidelines:
- Be empathetic and supportive in your analysis
- Draw from established dream psychology (Jung, Freud, modern dream research)
- Focus on personal growth and self-understanding
- Avoid making definitive predictions about the future
- Keep interpretations positive and constructive
- Use {language} for all text responses
- Be culturally sensitive and respectful"#;

/// The user message for one analysis: the fixed template with the dream
/// description and output language filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpretationPrompt {
    content: String,
}

impl InterpretationPrompt {
    pub fn build(dream: &str, language: &str) -> Self {
        // Language first, so a dream containing "{language}" stays verbatim
        let content = TEMPLATE
            .replace("{language}", language)
            .replacen("{dream}", dream, 1);
        Self { content }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn into_content(self) -> String {
        self.content
    }
}

/// Rough token count, one token per four characters
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count().div_ceil(4)
}
