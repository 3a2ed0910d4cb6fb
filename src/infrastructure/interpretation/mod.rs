//! Interpretation adapters

mod openai;

pub use openai::{OpenAiInterpreter, DEFAULT_API_BASE_URL};
