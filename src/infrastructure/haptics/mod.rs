//! Haptic feedback adapters
//!
//! Desktop terminals have no vibration motor; the terminal bell stands in.

mod bell;
mod noop;

pub use bell::BellHaptics;
pub use noop::NoOpHaptics;

use crate::application::ports::Haptics;

/// Create a haptics adapter based on whether feedback is enabled
pub fn create_haptics(enabled: bool) -> Box<dyn Haptics> {
    if enabled {
        Box::new(BellHaptics::new())
    } else {
        Box::new(NoOpHaptics::new())
    }
}
