//! Dream interpretation domain module

mod prompt;
mod result;

pub use prompt::{estimate_tokens, InterpretationPrompt, DEFAULT_LANGUAGE, SYSTEM_MESSAGE};
pub use result::{DreamSymbol, InterpretationResult, MoodAnalysis};
