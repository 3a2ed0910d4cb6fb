//! Slide-to-lock gesture interpretation
//!
//! A drag on the record button is reduced to a stream of vertical
//! displacements. [`GestureTrack::step`] folds one sample into the track and
//! yields at most one [`GestureEvent`]; it never touches the recorder, the
//! interaction machine decides what an event means.

use std::fmt;
use std::str::FromStr;

use crate::domain::error::LockThresholdError;

/// Default slide distance (points) that locks a recording
pub const DEFAULT_LOCK_THRESHOLD: f64 = 60.0;

/// Positive distance an upward drag must exceed to lock
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct LockThreshold(f64);

impl LockThreshold {
    pub fn new(points: f64) -> Result<Self, LockThresholdError> {
        if points.is_finite() && points > 0.0 {
            Ok(Self(points))
        } else {
            Err(LockThresholdError {
                input: points.to_string(),
            })
        }
    }

    pub const fn points(&self) -> f64 {
        self.0
    }
}

impl Default for LockThreshold {
    fn default() -> Self {
        Self(DEFAULT_LOCK_THRESHOLD)
    }
}

impl FromStr for LockThreshold {
    type Err = LockThresholdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let points: f64 = s.trim().parse().map_err(|_| LockThresholdError {
            input: s.to_string(),
        })?;
        Self::new(points).map_err(|_| LockThresholdError {
            input: s.to_string(),
        })
    }
}

impl fmt::Display for LockThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Discrete outcome of a drag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureEvent {
    /// The drag went above the threshold; fires once per track
    Lock,
    /// The drag ended without ever locking
    ReleaseWithoutLock,
}

/// Per-recording drag state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureTrack {
    threshold: LockThreshold,
    displacement: f64,
    locked: bool,
}

impl GestureTrack {
    pub fn new(threshold: LockThreshold) -> Self {
        Self {
            threshold,
            displacement: 0.0,
            locked: false,
        }
    }

    /// Fold one displacement sample (negative is upward) into the track.
    pub fn step(self, displacement: f64) -> (Self, Option<GestureEvent>) {
        let crossed = displacement < -self.threshold.points();
        let event = (crossed && !self.locked).then_some(GestureEvent::Lock);
        let next = Self {
            displacement,
            locked: self.locked || crossed,
            ..self
        };
        (next, event)
    }

    /// Close the drag. Yields `ReleaseWithoutLock` unless the track locked.
    pub fn finish(self) -> Option<GestureEvent> {
        (!self.locked).then_some(GestureEvent::ReleaseWithoutLock)
    }

    /// Fill fraction for the lock indicator, in `[0, 1]`
    pub fn progress(&self) -> f64 {
        (self.displacement.abs() / self.threshold.points()).clamp(0.0, 1.0)
    }

    pub fn displacement(&self) -> f64 {
        self.displacement
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn threshold(&self) -> LockThreshold {
        self.threshold
    }
}

impl Default for GestureTrack {
    fn default() -> Self {
        Self::new(LockThreshold::default())
    }
}
