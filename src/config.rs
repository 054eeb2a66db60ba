//! Persisted application settings stored as TOML in the `.mailtriage` folder.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::app_dirs;

/// Default filename used to store the app configuration.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Base URL used when neither the config file nor the environment supplies one.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Environment variable that overrides the configured base URL.
pub const API_URL_ENV_VAR: &str = "MAILTRIAGE_API_URL";

/// Application settings loaded from the TOML config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the classification service.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
        }
    }
}

impl AppConfig {
    /// Resolve the effective base URL, letting the environment win over the
    /// config file. Empty values are treated as absent.
    pub fn resolved_api_base_url(&self) -> String {
        resolve_api_base_url(&self.api_base_url, std::env::var(API_URL_ENV_VAR).ok())
    }
}

fn resolve_api_base_url(file_value: &str, env_value: Option<String>) -> String {
    if let Some(url) = env_value {
        let trimmed = url.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }
    let trimmed = file_value.trim();
    if trimmed.is_empty() {
        default_api_base_url()
    } else {
        trimmed.to_string()
    }
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

/// Errors that can occur while loading or saving the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The application directory could not be resolved or created.
    #[error(transparent)]
    AppDir(#[from] app_dirs::AppDirError),
    /// Failed to read the config file.
    #[error("Failed to read config at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The config file is not valid TOML.
    #[error("Failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    /// Failed to serialize or write the config file.
    #[error("Failed to write config at {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Path of the config file inside the application directory.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    Ok(app_dirs::app_root_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the configuration, falling back to defaults when the file is absent.
pub fn load_or_default() -> Result<AppConfig, ConfigError> {
    let path = config_file_path()?;
    load_from(&path)
}

fn load_from(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Persist the configuration to the application directory.
pub fn save(config: &AppConfig) -> Result<(), ConfigError> {
    let path = config_file_path()?;
    let raw = toml::to_string_pretty(config).unwrap_or_default();
    std::fs::write(&path, raw).map_err(|source| ConfigError::Write { path, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_dirs::test_support::OverrideGuard;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let cfg = load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(cfg.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn parses_base_url_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "api_base_url = \"https://classify.example.com\"\n").unwrap();
        let cfg = load_from(&path).unwrap();
        assert_eq!(cfg.api_base_url, "https://classify.example.com");
    }

    #[test]
    fn rejects_invalid_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "api_base_url = [not toml").unwrap();
        let err = load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn env_value_wins_over_file_value() {
        let resolved = resolve_api_base_url(
            "https://from-file.example.com",
            Some("https://from-env.example.com".to_string()),
        );
        assert_eq!(resolved, "https://from-env.example.com");
    }

    #[test]
    fn blank_env_value_falls_back_to_file() {
        let resolved =
            resolve_api_base_url("https://from-file.example.com", Some("  ".to_string()));
        assert_eq!(resolved, "https://from-file.example.com");
    }

    #[test]
    fn blank_everything_falls_back_to_default() {
        assert_eq!(resolve_api_base_url("", None), DEFAULT_API_BASE_URL);
    }

    #[test]
    fn save_then_load_round_trips() {
        let base = tempdir().unwrap();
        let _guard = OverrideGuard::set(base.path().to_path_buf());
        let cfg = AppConfig {
            api_base_url: "http://10.0.0.5:8000".to_string(),
        };
        save(&cfg).unwrap();
        let loaded = load_or_default().unwrap();
        assert_eq!(loaded.api_base_url, cfg.api_base_url);
    }
}
