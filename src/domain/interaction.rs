//! Record-button interaction state

use std::fmt;
use thiserror::Error;

/// What the record control is doing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Recording,
    Locked,
    Finalizing,
    Failed,
}

impl InteractionState {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Recording => "recording",
            Self::Locked => "locked",
            Self::Finalizing => "finalizing",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for InteractionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an invalid state transition is attempted
#[derive(Debug, Clone, Error)]
#[error("Invalid state transition: cannot {action} while {current_state}")]
pub struct InvalidStateTransition {
    pub current_state: InteractionState,
    pub action: &'static str,
}

/// Interaction state holder.
/// A single tagged state replaces the `isRecording`/`isLocked` flag pair, so
/// "locked but not recording" cannot be represented.
///
/// State machine:
///   IDLE -> RECORDING (begin)
///   RECORDING -> LOCKED (lock)
///   RECORDING | LOCKED -> FINALIZING (finalize)
///   FINALIZING -> IDLE (complete)
///   FINALIZING | RECORDING -> FAILED (fail)
///   FAILED -> IDLE (complete)
///   any -> IDLE (reset)
#[derive(Debug, Default)]
pub struct InteractionSession {
    state: InteractionState,
}

impl InteractionSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == InteractionState::Idle
    }

    pub fn is_locked(&self) -> bool {
        self.state == InteractionState::Locked
    }

    /// Recording, locked or not
    pub fn is_capturing(&self) -> bool {
        matches!(
            self.state,
            InteractionState::Recording | InteractionState::Locked
        )
    }

    fn transition(
        &mut self,
        allowed: &[InteractionState],
        next: InteractionState,
        action: &'static str,
    ) -> Result<(), InvalidStateTransition> {
        if !allowed.contains(&self.state) {
            return Err(InvalidStateTransition {
                current_state: self.state,
                action,
            });
        }
        self.state = next;
        Ok(())
    }

    pub fn begin(&mut self) -> Result<(), InvalidStateTransition> {
        self.transition(
            &[InteractionState::Idle],
            InteractionState::Recording,
            "start recording",
        )
    }

    pub fn lock(&mut self) -> Result<(), InvalidStateTransition> {
        self.transition(
            &[InteractionState::Recording],
            InteractionState::Locked,
            "lock",
        )
    }

    pub fn finalize(&mut self) -> Result<(), InvalidStateTransition> {
        self.transition(
            &[InteractionState::Recording, InteractionState::Locked],
            InteractionState::Finalizing,
            "stop recording",
        )
    }

    pub fn fail(&mut self) -> Result<(), InvalidStateTransition> {
        self.transition(
            &[InteractionState::Recording, InteractionState::Finalizing],
            InteractionState::Failed,
            "fail",
        )
    }

    pub fn complete(&mut self) -> Result<(), InvalidStateTransition> {
        self.transition(
            &[InteractionState::Finalizing, InteractionState::Failed],
            InteractionState::Idle,
            "complete",
        )
    }

    /// Hard reset, valid from anywhere
    pub fn reset(&mut self) {
        self.state = InteractionState::Idle;
    }
}
