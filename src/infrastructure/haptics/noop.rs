//! No-op haptics adapter
//!
//! Used when haptic feedback is disabled.

use crate::application::ports::{HapticStyle, Haptics};

/// Haptics that do nothing
pub struct NoOpHaptics;

impl NoOpHaptics {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoOpHaptics {
    fn default() -> Self {
        Self::new()
    }
}

impl Haptics for NoOpHaptics {
    fn pulse(&self, _style: HapticStyle) {}
}
