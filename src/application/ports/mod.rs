//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod alerter;
pub mod config;
pub mod haptics;
pub mod interpreter;
pub mod journal;
pub mod permission;
pub mod recorder;

// Re-export common types
pub use alerter::{Alert, AlertKind, Alerter};
pub use config::ConfigStore;
pub use haptics::{HapticStyle, Haptics};
pub use interpreter::{InterpretationError, Interpreter};
pub use journal::{AuthError, AuthService, JournalError, JournalStore};
pub use permission::{MicrophonePermission, PermissionError};
pub use recorder::{PlatformRecorder, RecordingError};
