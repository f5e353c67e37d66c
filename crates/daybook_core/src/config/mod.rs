use crate::error::AppError;
use crate::storage::json_store::{self, STORE_ENV_VAR};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "config.json";
const CONFIG_ENV_VAR: &str = "DAYBOOK_CONFIG_PATH";
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Where store notices are delivered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NotificationMode {
    #[default]
    Console,
    Desktop,
    Off,
}

impl NotificationMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Console => "console",
            Self::Desktop => "desktop",
            Self::Off => "off",
        }
    }
}

impl fmt::Display for NotificationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn canonical_name(raw: &str) -> Option<String> {
    let mut cleaned = String::new();
    let mut previous_underscore = false;

    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() {
            cleaned.push(ch.to_ascii_lowercase());
            previous_underscore = false;
        } else if !previous_underscore && !cleaned.is_empty() {
            cleaned.push('_');
            previous_underscore = true;
        }
    }

    let trimmed = cleaned.trim_matches('_');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub fn parse_notification_mode(raw: &str) -> Result<NotificationMode, AppError> {
    match canonical_name(raw).as_deref() {
        None | Some("console") | Some("terminal") | Some("stdout") => Ok(NotificationMode::Console),
        Some("desktop") | Some("system") | Some("toast") => Ok(NotificationMode::Desktop),
        Some("off") | Some("none") | Some("quiet") | Some("disabled") => Ok(NotificationMode::Off),
        Some(other) => Err(AppError::invalid_input(format!(
            "unknown notification mode '{other}'"
        ))),
    }
}

pub fn parse_log_level(raw: &str) -> Result<String, AppError> {
    match canonical_name(raw).as_deref() {
        Some(level @ ("off" | "error" | "warn" | "info" | "debug" | "trace")) => {
            Ok(level.to_string())
        }
        Some("warning") => Ok("warn".to_string()),
        _ => Err(AppError::invalid_input(format!(
            "unknown log level '{}'",
            raw.trim()
        ))),
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store_path: Option<String>,
    #[serde(default)]
    pub notifications: Option<String>,
    #[serde(default)]
    pub log_level: Option<String>,
}

impl Config {
    pub fn notification_mode(&self) -> NotificationMode {
        self.notifications
            .as_deref()
            .and_then(|mode| parse_notification_mode(mode).ok())
            .unwrap_or_default()
    }

    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    /// `DAYBOOK_STORE_PATH` wins over the configured path, which wins over
    /// the per-user default.
    pub fn resolve_store_path(&self) -> Result<PathBuf, AppError> {
        if let Ok(path) = std::env::var(STORE_ENV_VAR)
            && !path.trim().is_empty()
        {
            return Ok(PathBuf::from(path));
        }

        match self.store_path.as_deref().map(str::trim) {
            Some(path) if !path.is_empty() => Ok(PathBuf::from(path)),
            _ => json_store::store_path(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: Config,
    pub error: Option<AppError>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub store_path: Option<String>,
    pub notifications: Option<NotificationMode>,
    pub log_level: Option<String>,
}

pub fn config_path() -> Result<PathBuf, AppError> {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR)
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    Ok(json_store::app_dir()?.join(CONFIG_FILE_NAME))
}

pub fn load_config_with_fallback() -> ConfigLoad {
    match config_path() {
        Ok(path) => load_config_with_fallback_from_path(&path),
        Err(err) => ConfigLoad {
            config: Config::default(),
            error: Some(err),
        },
    }
}

fn load_config_with_fallback_from_path(path: &Path) -> ConfigLoad {
    if !path.exists() {
        return ConfigLoad {
            config: Config::default(),
            error: None,
        };
    }

    match load_config_from_path(path) {
        Ok(config) => ConfigLoad {
            config,
            error: None,
        },
        Err(err) => ConfigLoad {
            config: Config::default(),
            error: Some(err),
        },
    }
}

fn load_config_from_path(path: &Path) -> Result<Config, AppError> {
    let content = std::fs::read_to_string(path)
        .map_err(|err| AppError::io(format!("{}: {}", path.display(), err)))?;
    let config: Config = serde_json::from_str(&content).map_err(|err| {
        AppError::invalid_data(format!("invalid JSON in {}: {}", path.display(), err))
    })?;
    normalize_config(config).map_err(|err| {
        AppError::invalid_data(format!("{}: {}", path.display(), err.message()))
    })
}

fn normalize_config(mut config: Config) -> Result<Config, AppError> {
    if let Some(mode) = config.notifications.as_deref() {
        config.notifications = Some(parse_notification_mode(mode)?.to_string());
    }
    if let Some(level) = config.log_level.as_deref() {
        config.log_level = Some(parse_log_level(level)?);
    }
    Ok(config)
}

pub fn merge_overrides(base: &Config, overrides: &ConfigOverrides) -> Config {
    let mut merged = base.clone();
    if let Some(store_path) = overrides.store_path.as_ref() {
        merged.store_path = Some(store_path.clone());
    }
    if let Some(mode) = overrides.notifications {
        merged.notifications = Some(mode.to_string());
    }
    if let Some(level) = overrides.log_level.as_ref() {
        merged.log_level = Some(level.clone());
    }
    merged
}
