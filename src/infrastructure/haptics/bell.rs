//! Terminal bell haptics adapter

use std::io::{self, Write};

use tracing::debug;

use crate::application::ports::{HapticStyle, Haptics};

const BELL: &str = "\x07";

/// Rings the terminal bell: once to start, twice to lock
pub struct BellHaptics;

impl BellHaptics {
    pub fn new() -> Self {
        Self
    }

    fn rings(style: HapticStyle) -> usize {
        match style {
            HapticStyle::Medium => 1,
            HapticStyle::Heavy => 2,
            HapticStyle::Selection => 0,
        }
    }
}

impl Default for BellHaptics {
    fn default() -> Self {
        Self::new()
    }
}

impl Haptics for BellHaptics {
    fn pulse(&self, style: HapticStyle) {
        let rings = Self::rings(style);
        if rings == 0 {
            return;
        }
        let mut stderr = io::stderr().lock();
        if let Err(e) = stderr
            .write_all(BELL.repeat(rings).as_bytes())
            .and_then(|()| stderr.flush())
        {
            debug!(error = %e, "terminal bell failed");
        }
    }
}
