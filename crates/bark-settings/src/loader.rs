//! Settings loading with deep merge and environment variable overrides.
//!
//! Loading flow:
//! 1. Start with compiled [`ClientSettings::default()`]
//! 2. If `~/.bark/settings.json` exists, deep-merge user values over defaults
//! 3. Apply environment variable overrides (highest priority)
//! 4. Validate the result
//!
//! Deep merge rules:
//! - Objects are merged recursively (source overrides target per-key)
//! - Arrays and primitives are replaced entirely by source
//! - Null values in source are skipped (preserving target)

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::{Result, SettingsError};
use crate::types::ClientSettings;

/// Env var overriding [`ClientSettings::server_address`].
pub const ENV_SERVER_ADDRESS: &str = "BARK_SERVER_ADDRESS";

/// Env var overriding [`ClientSettings::timeout_ms`].
pub const ENV_TIMEOUT_MS: &str = "BARK_TIMEOUT_MS";

const TIMEOUT_RANGE_MS: (u64, u64) = (100, 600_000);

/// Resolve the path to the settings file (`~/.bark/settings.json`).
pub fn settings_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home).join(".bark").join("settings.json")
}

/// Load settings from the default path with env var overrides.
pub fn load_settings() -> Result<ClientSettings> {
    load_settings_from_path(&settings_path())
}

/// Load settings from a specific path with env var overrides.
///
/// If the file does not exist, returns defaults. If the file contains
/// invalid JSON, returns an error.
pub fn load_settings_from_path(path: &Path) -> Result<ClientSettings> {
    load_with(path, |name| std::env::var(name).ok())
}

fn load_with(path: &Path, env: impl Fn(&str) -> Option<String>) -> Result<ClientSettings> {
    let defaults = serde_json::to_value(ClientSettings::default())?;

    let merged = if path.exists() {
        debug!(?path, "loading settings from file");
        let content = std::fs::read_to_string(path)?;
        let user: Value = serde_json::from_str(&content)?;
        deep_merge(defaults, user)
    } else {
        debug!(?path, "settings file not found, using defaults");
        defaults
    };

    let mut settings: ClientSettings = serde_json::from_value(merged)?;
    apply_overrides(&mut settings, env);
    validate(&settings)?;
    Ok(settings)
}

/// Recursive deep merge of two JSON values.
pub fn deep_merge(target: Value, source: Value) -> Value {
    match (target, source) {
        (Value::Object(mut target_map), Value::Object(source_map)) => {
            for (key, source_val) in source_map {
                if source_val.is_null() {
                    continue;
                }
                let merged = if let Some(target_val) = target_map.remove(&key) {
                    deep_merge(target_val, source_val)
                } else {
                    source_val
                };
                let _ = target_map.insert(key, merged);
            }
            Value::Object(target_map)
        }
        (_, source) => source,
    }
}

/// Apply overrides looked up through `env`.
///
/// Invalid values are ignored with a warning (fall back to file/default).
fn apply_overrides(settings: &mut ClientSettings, env: impl Fn(&str) -> Option<String>) {
    if let Some(v) = env(ENV_SERVER_ADDRESS).filter(|v| !v.is_empty()) {
        settings.server_address = v;
    }
    if let Some(v) = env(ENV_TIMEOUT_MS) {
        let (min, max) = TIMEOUT_RANGE_MS;
        match parse_u64_range(&v, min, max) {
            Some(ms) => settings.timeout_ms = ms,
            None => warn!(key = ENV_TIMEOUT_MS, value = %v, "invalid timeout env var, ignoring"),
        }
    }
}

fn validate(settings: &ClientSettings) -> Result<()> {
    if settings.server_address.trim().is_empty() {
        return Err(SettingsError::InvalidValue(
            "serverAddress must not be empty".to_string(),
        ));
    }
    if settings.timeout_ms == 0 {
        return Err(SettingsError::InvalidValue(
            "timeoutMs must be positive".to_string(),
        ));
    }
    Ok(())
}

/// Parse a string as a `u64` within a range.
pub fn parse_u64_range(val: &str, min: u64, max: u64) -> Option<u64> {
    let n: u64 = val.trim().parse().ok()?;
    (n >= min && n <= max).then_some(n)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::types::{DEFAULT_SERVER_ADDRESS, DEFAULT_TIMEOUT_MS};

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_with(&dir.path().join("settings.json"), no_env).unwrap();
        assert_eq!(settings, ClientSettings::default());
    }

    #[test]
    fn file_values_merge_over_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"serverAddress":"https://bark.example.com","userAgent":null}"#)
            .unwrap();

        let settings = load_with(&path, no_env).unwrap();
        assert_eq!(settings.server_address, "https://bark.example.com");
        assert_eq!(settings.timeout_ms, DEFAULT_TIMEOUT_MS);
        assert_eq!(settings.user_agent, ClientSettings::default().user_agent);
    }

    #[test]
    fn invalid_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = load_with(&path, no_env).unwrap_err();
        assert!(matches!(err, SettingsError::Json(_)));
    }

    #[test]
    fn env_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"serverAddress":"https://file.example.com","timeoutMs":5000}"#)
            .unwrap();

        let env = env_of(&[
            (ENV_SERVER_ADDRESS, "http://127.0.0.1:8080"),
            (ENV_TIMEOUT_MS, "2500"),
        ]);
        let settings = load_with(&path, env).unwrap();
        assert_eq!(settings.server_address, "http://127.0.0.1:8080");
        assert_eq!(settings.timeout_ms, 2500);
    }

    #[test]
    fn out_of_range_timeout_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let env = env_of(&[(ENV_TIMEOUT_MS, "5"), (ENV_SERVER_ADDRESS, "")]);
        let settings = load_with(&dir.path().join("none.json"), env).unwrap();
        assert_eq!(settings.timeout_ms, DEFAULT_TIMEOUT_MS);
        assert_eq!(settings.server_address, DEFAULT_SERVER_ADDRESS);
    }

    #[test]
    fn zero_timeout_in_file_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"timeoutMs":0}"#).unwrap();

        let err = load_with(&path, no_env).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidValue(_)));
    }

    #[test]
    fn deep_merge_nested() {
        let a = serde_json::json!({"x": {"y": 1, "z": 2}, "keep": true});
        let b = serde_json::json!({"x": {"y": 10}, "keep": null});
        let merged = deep_merge(a, b);
        assert_eq!(merged, serde_json::json!({"x": {"y": 10, "z": 2}, "keep": true}));
    }

    #[test]
    fn parse_u64_range_bounds() {
        assert_eq!(parse_u64_range("100", 100, 200), Some(100));
        assert_eq!(parse_u64_range(" 200 ", 100, 200), Some(200));
        assert_eq!(parse_u64_range("201", 100, 200), None);
        assert_eq!(parse_u64_range("abc", 100, 200), None);
    }
}
