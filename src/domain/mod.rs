//! Domain layer - Core business logic
//!
//! Contains value objects, entities, pure state machines and domain errors.
//! This layer has no dependencies on external systems.

pub mod config;
pub mod error;
pub mod gesture;
pub mod interaction;
pub mod interpretation;
pub mod journal;
pub mod permission;
pub mod recording;
pub mod symbols;

// Re-export common types
pub use config::AppConfig;
pub use error::*;
pub use gesture::{GestureEvent, GestureTrack, LockThreshold};
pub use interaction::{InteractionSession, InteractionState};
pub use interpretation::{InterpretationPrompt, InterpretationResult};
pub use permission::{PermissionResponse, PermissionStatus};
pub use recording::{Artifact, Duration, RecordingState};
pub use symbols::{CategoryFilter, LibrarySymbol, SymbolCategory};
