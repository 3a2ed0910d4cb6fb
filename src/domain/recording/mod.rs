//! Recording domain module

mod artifact;
mod duration;
mod state;

pub use artifact::{format_elapsed, Artifact};
pub use duration::{Duration, DEFAULT_MAX_DURATION_SECS};
pub use state::RecordingState;
