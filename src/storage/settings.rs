//! Settings storage
//!
//! Loads the configuration once at startup: `settings.json` from the data
//! directory, then environment overrides, then validation.

use crate::storage::{get_data_dir, StorageError};
use crate::types::config::Settings;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Get the settings file path
fn get_settings_path() -> Result<PathBuf, StorageError> {
    Ok(get_data_dir()?.join("settings.json"))
}

/// Load settings from disk and the process environment
///
/// Returns default settings if the file doesn't exist or is corrupted
pub fn load_settings() -> Settings {
    let mut settings = match get_settings_path().and_then(|path| load_settings_from(&path)) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!("Failed to load settings, using defaults: {}", e);
            Settings::default()
        }
    };

    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
    settings.validate();
    settings
}

/// Load and validate settings from a specific file
pub fn load_settings_from(path: &Path) -> Result<Settings, StorageError> {
    if !path.exists() {
        tracing::info!("Settings file not found, using defaults");
        return Ok(Settings::default());
    }

    let json = fs::read_to_string(path)?;
    let mut settings: Settings = serde_json::from_str(&json)?;
    settings.validate();

    tracing::debug!("Loaded settings from {}", path.display());
    Ok(settings)
}

/// Save settings to the data directory
pub fn save_settings(settings: &Settings) -> Result<(), StorageError> {
    save_settings_to(&get_settings_path()?, settings)
}

pub fn save_settings_to(path: &Path, settings: &Settings) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json)?;

    tracing::debug!("Saved settings to {}", path.display());
    Ok(())
}

/// Overlay environment variables on top of loaded settings.
///
/// Values that fail to parse are logged and skipped.
pub fn apply_env_overrides<F>(settings: &mut Settings, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup("API_URL") {
        settings.api_url = url;
    }
    if let Some(model) = lookup("DEFAULT_MODEL") {
        settings.default_model = model;
    }
    if let Some(v) = parse_env(&lookup, "MAX_TOKENS") {
        settings.max_tokens = v;
    }
    if let Some(v) = parse_env(&lookup, "MAX_SEQ_LEN") {
        settings.max_seq_len = v;
    }
    if let Some(v) = parse_env(&lookup, "TEMPERATURE") {
        settings.temperature = v;
    }
    if let Some(v) = parse_env(&lookup, "TOP_P") {
        settings.top_p = v;
    }
    if let Some(v) = parse_env(&lookup, "NUM_GPUS") {
        settings.num_gpus = v;
    }
    if let Some(v) = parse_env(&lookup, "REQUEST_TIMEOUT_SECS") {
        settings.request_timeout_secs = Some(v);
    }
    if let Some(v) = parse_env(&lookup, "TOKEN_ENCODING") {
        settings.encoding = v;
    }
    if let Some(v) = parse_env(&lookup, "TRUNCATE_TURN_KEYWORDS") {
        settings.truncate_turn_keywords = v;
    }
    if let Some(v) = parse_env(&lookup, "CLEAN_WHITESPACE") {
        settings.clean_whitespace = v;
    }
}

fn parse_env<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            let error = StorageError::InvalidEnv {
                key: key.to_string(),
                value: raw,
            };
            tracing::warn!("Ignoring environment override: {}", error);
            None
        }
    }
}
