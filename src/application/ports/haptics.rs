//! Haptic feedback port

/// Strength of a haptic pulse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HapticStyle {
    /// Recording started
    Medium,
    /// Recording locked
    Heavy,
    /// Light tick for selections
    Selection,
}

impl HapticStyle {
    /// Vibration length used where only a plain vibrator is available
    pub const fn vibration_ms(&self) -> u64 {
        match self {
            Self::Medium => 50,
            Self::Heavy => 100,
            Self::Selection => 10,
        }
    }
}

/// Port for haptic feedback. Fire-and-forget: a missing motor is not an error.
pub trait Haptics: Send + Sync {
    fn pulse(&self, style: HapticStyle);
}

impl Haptics for Box<dyn Haptics> {
    fn pulse(&self, style: HapticStyle) {
        self.as_ref().pulse(style)
    }
}
