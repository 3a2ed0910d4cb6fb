//! Application configuration value object

use serde::{Deserialize, Serialize};

use crate::domain::gesture::LockThreshold;
use crate::domain::interpretation::DEFAULT_LANGUAGE;
use crate::domain::recording::Duration;

/// Default chat model for dream analysis
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub openai_api_key: Option<String>,
    pub openai_model: Option<String>,
    pub language: Option<String>,
    pub supabase_url: Option<String>,
    pub supabase_anon_key: Option<String>,
    pub lock_threshold: Option<f64>,
    pub max_duration: Option<String>,
    pub haptics: Option<bool>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            openai_api_key: None,
            openai_model: Some(DEFAULT_OPENAI_MODEL.to_string()),
            language: Some(DEFAULT_LANGUAGE.to_string()),
            supabase_url: None,
            supabase_anon_key: None,
            lock_threshold: Some(LockThreshold::default().points()),
            max_duration: Some(Duration::default_max_duration().to_string()),
            haptics: Some(true),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            openai_api_key: other.openai_api_key.or(self.openai_api_key),
            openai_model: other.openai_model.or(self.openai_model),
            language: other.language.or(self.language),
            supabase_url: other.supabase_url.or(self.supabase_url),
            supabase_anon_key: other.supabase_anon_key.or(self.supabase_anon_key),
            lock_threshold: other.lock_threshold.or(self.lock_threshold),
            max_duration: other.max_duration.or(self.max_duration),
            haptics: other.haptics.or(self.haptics),
        }
    }

    pub fn openai_model_or_default(&self) -> &str {
        self.openai_model.as_deref().unwrap_or(DEFAULT_OPENAI_MODEL)
    }

    pub fn language_or_default(&self) -> &str {
        self.language.as_deref().unwrap_or(DEFAULT_LANGUAGE)
    }

    /// Get lock_threshold as a validated threshold, or default if not set/invalid
    pub fn lock_threshold_or_default(&self) -> LockThreshold {
        self.lock_threshold
            .and_then(|points| LockThreshold::new(points).ok())
            .unwrap_or_default()
    }

    /// Get max_duration as parsed Duration, or default if not set/invalid
    pub fn max_duration_or_default(&self) -> Duration {
        self.max_duration
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(Duration::default_max_duration)
    }

    pub fn haptics_or_default(&self) -> bool {
        self.haptics.unwrap_or(true)
    }

    /// Both journal settings, if the backend is configured
    pub fn supabase(&self) -> Option<(&str, &str)> {
        match (self.supabase_url.as_deref(), self.supabase_anon_key.as_deref()) {
            (Some(url), Some(key)) if !url.is_empty() && !key.is_empty() => Some((url, key)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_expected_values() {
        let config = AppConfig::defaults();
        assert!(config.openai_api_key.is_none());
        assert_eq!(config.openai_model.as_deref(), Some("gpt-4o-mini"));
        assert_eq!(config.language.as_deref(), Some("Turkish"));
        assert_eq!(config.lock_threshold, Some(60.0));
        assert_eq!(config.max_duration.as_deref(), Some("5m"));
        assert_eq!(config.haptics, Some(true));
        assert!(config.supabase().is_none());
    }

    #[test]
    fn empty_has_all_none() {
        assert_eq!(
            AppConfig::empty(),
            AppConfig {
                openai_api_key: None,
                openai_model: None,
                language: None,
                supabase_url: None,
                supabase_anon_key: None,
                lock_threshold: None,
                max_duration: None,
                haptics: None,
            }
        );
    }

    #[test]
    fn merge_other_takes_precedence() {
        let base = AppConfig {
            openai_api_key: Some("file-key".to_string()),
            language: Some("English".to_string()),
            lock_threshold: Some(60.0),
            ..Default::default()
        };
        let other = AppConfig {
            openai_api_key: Some("env-key".to_string()),
            lock_threshold: None,
            ..Default::default()
        };

        let merged = base.merge(other);
        assert_eq!(merged.openai_api_key.as_deref(), Some("env-key"));
        assert_eq!(merged.language.as_deref(), Some("English"));
        assert_eq!(merged.lock_threshold, Some(60.0));
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = AppConfig {
            lock_threshold: Some(-3.0),
            max_duration: Some("forever".to_string()),
            ..Default::default()
        };
        assert_eq!(config.lock_threshold_or_default(), LockThreshold::default());
        assert_eq!(config.max_duration_or_default().as_secs(), 300);
    }

    #[test]
    fn parsed_values_are_used() {
        let config = AppConfig {
            lock_threshold: Some(90.0),
            max_duration: Some("45s".to_string()),
            haptics: Some(false),
            ..Default::default()
        };
        assert_eq!(config.lock_threshold_or_default().points(), 90.0);
        assert_eq!(config.max_duration_or_default().as_secs(), 45);
        assert!(!config.haptics_or_default());
    }

    #[test]
    fn supabase_requires_both_values() {
        let partial = AppConfig {
            supabase_url: Some("https://x.supabase.co".to_string()),
            ..Default::default()
        };
        assert!(partial.supabase().is_none());

        let full = AppConfig {
            supabase_anon_key: Some("anon".to_string()),
            ..partial
        };
        assert_eq!(full.supabase(), Some(("https://x.supabase.co", "anon")));
    }
}
