//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::error::ConfigError;
use crate::domain::gesture::LockThreshold;
use crate::domain::recording::Duration;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    ensure_known_key(key)?;
    validate_config_value(key, value)?;

    let mut config = store.load().await?;

    match key {
        "openai_api_key" => config.openai_api_key = Some(value.to_string()),
        "openai_model" => config.openai_model = Some(value.to_string()),
        "language" => config.language = Some(value.to_string()),
        "supabase_url" => config.supabase_url = Some(value.trim_end_matches('/').to_string()),
        "supabase_anon_key" => config.supabase_anon_key = Some(value.to_string()),
        "lock_threshold" => {
            config.lock_threshold = Some(parse_threshold(key, value)?.points());
        }
        "max_duration" => config.max_duration = Some(parse_duration(key, value)?.to_string()),
        "haptics" => config.haptics = Some(parse_bool_value(key, value)?),
        _ => unreachable!(), // Already validated
    }

    store.save(&config).await?;
    presenter.success(&format!("{} = {}", key, display_value(key, value)));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    ensure_known_key(key)?;

    let config = store.load().await?;

    let value = match key {
        "openai_api_key" => config.openai_api_key.map(|s| mask_api_key(&s)),
        "openai_model" => config.openai_model,
        "language" => config.language,
        "supabase_url" => config.supabase_url,
        "supabase_anon_key" => config.supabase_anon_key.map(|s| mask_api_key(&s)),
        "lock_threshold" => config.lock_threshold.map(|p| p.to_string()),
        "max_duration" => config.max_duration,
        "haptics" => config.haptics.map(|b| b.to_string()),
        _ => unreachable!(),
    };

    presenter.output(value.as_deref().unwrap_or(NOT_SET));

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    let rows = [
        ("openai_api_key", config.openai_api_key.map(|s| mask_api_key(&s))),
        ("openai_model", config.openai_model),
        ("language", config.language),
        ("supabase_url", config.supabase_url),
        (
            "supabase_anon_key",
            config.supabase_anon_key.map(|s| mask_api_key(&s)),
        ),
        ("lock_threshold", config.lock_threshold.map(|p| p.to_string())),
        ("max_duration", config.max_duration),
        ("haptics", config.haptics.map(|b| b.to_string())),
    ];

    for (key, value) in rows {
        presenter.key_value(key, value.as_deref().unwrap_or(NOT_SET));
    }

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

fn ensure_known_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        Ok(())
    } else {
        Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        })
    }
}

/// Validate a config value based on key type
fn validate_config_value(key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "max_duration" => {
            parse_duration(key, value)?;
        }
        "lock_threshold" => {
            parse_threshold(key, value)?;
        }
        "haptics" => {
            parse_bool_value(key, value)?;
        }
        "supabase_url" => {
            if !(value.starts_with("https://") || value.starts_with("http://")) {
                return Err(ConfigError::ValidationError {
                    key: key.to_string(),
                    message: "Value must be an http(s) URL".to_string(),
                });
            }
        }
        "openai_model" | "language" => {
            if value.trim().is_empty() {
                return Err(ConfigError::ValidationError {
                    key: key.to_string(),
                    message: "Value cannot be empty".to_string(),
                });
            }
        }
        _ => {} // keys accept any string
    }
    Ok(())
}

fn parse_duration(key: &str, value: &str) -> Result<Duration, ConfigError> {
    value
        .parse::<Duration>()
        .map_err(|e| ConfigError::ValidationError {
            key: key.to_string(),
            message: e.to_string(),
        })
}

fn parse_threshold(key: &str, value: &str) -> Result<LockThreshold, ConfigError> {
    value
        .parse::<LockThreshold>()
        .map_err(|e| ConfigError::ValidationError {
            key: key.to_string(),
            message: e.to_string(),
        })
}

fn parse_bool_value(key: &str, value: &str) -> Result<bool, ConfigError> {
    parse_bool(value).map_err(|_| ConfigError::ValidationError {
        key: key.to_string(),
        message: "Value must be 'true' or 'false'".to_string(),
    })
}

fn display_value(key: &str, value: &str) -> String {
    match key {
        "openai_api_key" | "supabase_anon_key" => mask_api_key(value),
        _ => value.to_string(),
    }
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ()> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(true),
        "false" | "no" | "0" | "off" => Ok(false),
        _ => Err(()),
    }
}

/// Mask a secret for display (show first 4 and last 4 chars)
fn mask_api_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        "*".repeat(chars.len())
    } else {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    }
}
