//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with external systems like the OpenAI API, Supabase,
//! and the host audio devices.

pub mod config;
pub mod haptics;
pub mod interpretation;
pub mod journal;
pub mod permission;
pub mod recording;

// Re-export adapters
pub use config::XdgConfigStore;
pub use haptics::{create_haptics, BellHaptics, NoOpHaptics};
pub use interpretation::OpenAiInterpreter;
pub use journal::SupabaseClient;
pub use permission::DevicePermission;
pub use recording::{create_recorder, CpalRecorder};
