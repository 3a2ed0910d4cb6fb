//! CLI integration tests

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

fn dreamtalk_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_dreamtalk"))
}

/// Binary with config and data directories isolated under `home`
fn isolated_bin(home: &Path) -> Command {
    let mut cmd = dreamtalk_bin();
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("XDG_DATA_HOME", home.join("data"))
        .env_remove("OPENAI_API_KEY")
        .env_remove("OPENAI_BASE_URL")
        .env_remove("SUPABASE_URL")
        .env_remove("SUPABASE_ANON_KEY");
    cmd
}

#[test]
fn help_output() {
    let output = dreamtalk_bin()
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("interpret"));
    assert!(stdout.contains("record"));
    assert!(stdout.contains("account"));
    assert!(stdout.contains("history"));
    assert!(stdout.contains("symbols"));
    assert!(stdout.contains("config"));
}

#[test]
fn no_arguments_prints_help() {
    let output = dreamtalk_bin().output().expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"));
}

#[test]
fn version_output() {
    let output = dreamtalk_bin()
        .arg("--version")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("dreamtalk"));
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn record_help_lists_options() {
    let output = dreamtalk_bin()
        .args(["record", "--help"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--lock-threshold"));
    assert!(stdout.contains("--max-duration"));
    assert!(stdout.contains("--no-haptics"));
}

#[test]
fn config_path_command() {
    let home = TempDir::new().unwrap();
    let output = isolated_bin(home.path())
        .args(["config", "path"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("dreamtalk"));
    assert!(stdout.trim_end().ends_with("config.toml"));
}

#[test]
fn config_set_get_round_trip() {
    let home = TempDir::new().unwrap();

    let set = isolated_bin(home.path())
        .args(["config", "set", "language", "English"])
        .output()
        .expect("Failed to execute command");
    assert!(set.status.success());

    let get = isolated_bin(home.path())
        .args(["config", "get", "language"])
        .output()
        .expect("Failed to execute command");
    assert!(get.status.success());
    assert_eq!(String::from_utf8_lossy(&get.stdout).trim(), "English");
}

#[test]
fn config_secrets_are_masked() {
    let home = TempDir::new().unwrap();

    let set = isolated_bin(home.path())
        .args(["config", "set", "openai_api_key", "sk-test-0123456789"])
        .output()
        .expect("Failed to execute command");
    assert!(set.status.success());

    let list = isolated_bin(home.path())
        .args(["config", "list"])
        .output()
        .expect("Failed to execute command");
    let stdout = String::from_utf8_lossy(&list.stdout);
    assert!(stdout.contains("sk-t...6789"));
    assert!(!stdout.contains("sk-test-0123456789"));
}

#[test]
fn config_init_twice_fails() {
    let home = TempDir::new().unwrap();

    let first = isolated_bin(home.path())
        .args(["config", "init"])
        .output()
        .expect("Failed to execute command");
    assert!(first.status.success());

    let second = isolated_bin(home.path())
        .args(["config", "init"])
        .output()
        .expect("Failed to execute command");
    assert!(!second.status.success());
    assert!(String::from_utf8_lossy(&second.stderr).contains("already exists"));
}

#[test]
fn invalid_lock_threshold_is_usage_error() {
    let home = TempDir::new().unwrap();
    let output = isolated_bin(home.path())
        .args(["record", "--lock-threshold", "-4"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid lock threshold"),
        "Expected error about the lock threshold, got: {}",
        stderr
    );
}

#[test]
fn invalid_max_duration_is_usage_error() {
    let home = TempDir::new().unwrap();
    let output = isolated_bin(home.path())
        .args(["record", "--max-duration", "forever"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid duration"));
}

#[test]
fn audio_without_save_is_rejected() {
    let output = dreamtalk_bin()
        .args(["interpret", "a dream", "--audio", "dream.wav"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--save"));
}

// Note: a valid `record` invocation opens the microphone, so it is covered
// by unit tests against a mock recorder instead

#[test]
fn symbols_lists_the_catalogue() {
    let output = dreamtalk_bin()
        .arg("symbols")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for title in ["Moon", "Water", "Butterfly", "House", "Bird", "Flowers"] {
        assert!(stdout.contains(title), "missing {title}");
    }
}

#[test]
fn symbols_search_and_category_as_json() {
    let output = dreamtalk_bin()
        .args(["symbols", "--search", "GROWTH", "--category", "nature", "--json"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let found: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let found = found.as_array().unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["title"], "Flowers");
    assert_eq!(found[0]["category"], "nature");
    assert_eq!(found[0]["popularity"], 3);
}

#[test]
fn symbols_without_match_succeeds_quietly() {
    let output = dreamtalk_bin()
        .args(["symbols", "-s", "dragon"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("No symbols match"));
}

#[test]
fn symbols_unknown_category_is_usage_error() {
    let output = dreamtalk_bin()
        .args(["symbols", "--category", "people"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown symbol category"));
}
