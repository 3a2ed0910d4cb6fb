//! Duration value object used for recording limits

use std::fmt;
use std::str::FromStr;

use crate::domain::error::DurationParseError;

/// Default upper bound for a single dream recording (5 minutes)
pub const DEFAULT_MAX_DURATION_SECS: u64 = 300;

/// Whole-second duration, validated on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Duration {
    seconds: u64,
}

impl Duration {
    pub const fn from_secs(seconds: u64) -> Self {
        Self { seconds }
    }

    /// Default max recording duration (5 minutes)
    pub const fn default_max_duration() -> Self {
        Self::from_secs(DEFAULT_MAX_DURATION_SECS)
    }

    pub const fn as_secs(&self) -> u64 {
        self.seconds
    }
}

impl FromStr for Duration {
    type Err = DurationParseError;

    /// Accepts `30s`, `2m`, `2m30s` (case-insensitive, surrounding whitespace ignored).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DurationParseError {
            input: s.to_string(),
        };
        let input = s.trim().to_lowercase();

        let (minutes_part, rest) = match input.split_once('m') {
            Some((m, rest)) => (Some(m), rest),
            None => (None, input.as_str()),
        };
        let seconds_part = match rest {
            "" => None,
            r => Some(r.strip_suffix('s').ok_or_else(invalid)?),
        };

        if minutes_part.is_none() && seconds_part.is_none() {
            return Err(invalid());
        }

        let parse_number = |part: Option<&str>| -> Result<u64, DurationParseError> {
            match part {
                None => Ok(0),
                Some(digits) if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) => {
                    digits.parse().map_err(|_| invalid())
                }
                Some(_) => Err(invalid()),
            }
        };

        let minutes = parse_number(minutes_part)?;
        let seconds = parse_number(seconds_part)?;
        let total = minutes
            .checked_mul(60)
            .and_then(|m| m.checked_add(seconds))
            .ok_or_else(invalid)?;

        if total == 0 {
            return Err(invalid());
        }

        Ok(Self { seconds: total })
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.seconds / 60, self.seconds % 60) {
            (0, s) => write!(f, "{}s", s),
            (m, 0) => write!(f, "{}m", m),
            (m, s) => write!(f, "{}m{}s", m, s),
        }
    }
}

impl Default for Duration {
    fn default() -> Self {
        Self::default_max_duration()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_supported_forms() {
        assert_eq!("45s".parse::<Duration>().unwrap().as_secs(), 45);
        assert_eq!("3m".parse::<Duration>().unwrap().as_secs(), 180);
        assert_eq!("1m15s".parse::<Duration>().unwrap().as_secs(), 75);
        assert_eq!(" 2M ".parse::<Duration>().unwrap().as_secs(), 120);
    }

    #[test]
    fn rejects_zero_and_garbage() {
        for input in ["", "0s", "0m0s", "90", "m", "s", "1x", "1m2", "ms", "-5s"] {
            assert!(input.parse::<Duration>().is_err(), "accepted {input:?}");
        }
    }

    #[test]
    fn display_is_compact() {
        assert_eq!(Duration::from_secs(42).to_string(), "42s");
        assert_eq!(Duration::from_secs(300).to_string(), "5m");
        assert_eq!(Duration::from_secs(305).to_string(), "5m5s");
    }

    #[test]
    fn default_is_five_minutes() {
        assert_eq!(Duration::default().as_secs(), 300);
    }
}
