//! Application layer - Use cases and port interfaces
//!
//! Contains the core business operations and trait definitions
//! for external system interactions.

pub mod interaction;
pub mod interpret;
pub mod permission_gate;
pub mod ports;
pub mod recording_session;
pub mod ticker;

// Re-export use cases
pub use interaction::{InteractionCallbacks, InteractionConfig, InteractionMachine};
pub use interpret::{
    InterpretCallbacks, InterpretDreamError, InterpretDreamUseCase, InterpretInput,
    InterpretOutput,
};
pub use permission_gate::PermissionGate;
pub use recording_session::{RecordingSession, StartError, StopError};
pub use ticker::{TickTimer, TICK_PERIOD};
