//! Top-level application configuration.
//!
//! Configuration is stored in the platform config directory as
//! `config.yaml` and includes:
//! - Backend base URL
//! - Authentication token
//! - Request timeout
//!
//! UI preferences live in a separate `ui.yaml` beside it so a corrupt
//! preference file never blocks startup.

use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{PustakaError, Result};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Backend API base URL (default: local development server)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Authentication
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<AuthConfig>,

    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            auth: None,
            timeout_secs: default_timeout(),
        }
    }
}

/// Authentication configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    pub token: String,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token", &"[REDACTED]")
            .finish()
    }
}

fn config_dir() -> Result<PathBuf> {
    ProjectDirs::from("", "", "pustaka")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| PustakaError::Config("could not determine config directory".into()))
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        Ok(config_dir()?.join("config.yaml"))
    }

    /// Load configuration from the default location, or return defaults if
    /// the file does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            PustakaError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read config at {}: {}", path.display(), e),
            ))
        })?;
        let config: Config = serde_yaml_ng::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                PustakaError::Io(std::io::Error::new(
                    e.kind(),
                    format!(
                        "Failed to create directory for config at {}: {}",
                        parent.display(),
                        e
                    ),
                ))
            })?;
        }

        let content = serde_yaml_ng::to_string(self)?;
        fs::write(path, content).map_err(|e| {
            PustakaError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to write config at {}: {}", path.display(), e),
            ))
        })?;

        // Token lives in this file; owner read/write only.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(path, permissions).map_err(|e| {
                PustakaError::Io(std::io::Error::new(
                    e.kind(),
                    format!(
                        "Failed to set permissions on config at {}: {}",
                        path.display(),
                        e
                    ),
                ))
            })?;
        }

        Ok(())
    }

    /// Get the API token from the environment or the config file. The
    /// `PUSTAKA_TOKEN` variable wins when set and non-empty.
    pub fn token(&self) -> Option<String> {
        if let Ok(token) = env::var("PUSTAKA_TOKEN")
            && !token.is_empty()
        {
            return Some(token);
        }

        self.auth.as_ref().map(|a| a.token.clone())
    }

    pub fn set_token(&mut self, token: String) {
        self.auth = Some(AuthConfig { token });
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }
}

/// Cosmetic UI preferences, persisted separately from the main config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiPrefs {
    /// Whether the navigation sidebar starts expanded (default: true)
    #[serde(default = "default_sidebar_expanded")]
    pub sidebar_expanded: bool,
}

fn default_sidebar_expanded() -> bool {
    true
}

impl Default for UiPrefs {
    fn default() -> Self {
        Self {
            sidebar_expanded: default_sidebar_expanded(),
        }
    }
}

impl UiPrefs {
    pub fn prefs_path() -> Result<PathBuf> {
        Ok(config_dir()?.join("ui.yaml"))
    }

    /// Load preferences, falling back to defaults when the file is missing
    /// or unreadable. Preferences are cosmetic; a corrupt file must not
    /// fail startup.
    pub fn load() -> Self {
        match Self::prefs_path() {
            Ok(path) => Self::load_from(&path),
            Err(_) => Self::default(),
        }
    }

    pub fn load_from(path: &Path) -> Self {
        fs::read_to_string(path)
            .ok()
            .and_then(|content| serde_yaml_ng::from_str(&content).ok())
            .unwrap_or_default()
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_yaml_ng::to_string(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.base_url, "http://localhost:5000/api");
        assert!(config.auth.is_none());
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_config_serialization() {
        let mut config = Config::default();
        config.set_token("tok_test123".to_string());
        config.base_url = "https://api.example.com".to_string();

        let yaml = serde_yaml_ng::to_string(&config).unwrap();
        let parsed: Config = serde_yaml_ng::from_str(&yaml).unwrap();

        assert_eq!(parsed.base_url, "https://api.example.com");
        assert_eq!(parsed.auth.unwrap().token, "tok_test123");
    }

    #[test]
    fn test_config_missing_fields_use_defaults() {
        let yaml = "base_url: https://api.example.com\n";
        let config: Config = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(config.timeout_secs, 30);
        assert!(config.auth.is_none());
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("missing.yaml")).unwrap();
        assert_eq!(config.base_url, default_base_url());
    }

    #[test]
    fn test_load_rejects_invalid_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "base_url: [unterminated").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_token_redacted_in_debug() {
        let mut config = Config::default();
        config.set_token("tok_secret".to_string());
        let debug = format!("{config:?}");
        assert!(!debug.contains("tok_secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_ui_prefs_corrupt_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ui.yaml");
        fs::write(&path, "sidebar_expanded: {not a bool").unwrap();

        let prefs = UiPrefs::load_from(&path);
        assert_eq!(prefs, UiPrefs::default());
        assert!(prefs.sidebar_expanded);
    }

    #[test]
    fn test_ui_prefs_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ui.yaml");

        let prefs = UiPrefs {
            sidebar_expanded: false,
        };
        prefs.save_to(&path).unwrap();
        assert_eq!(UiPrefs::load_from(&path), prefs);
    }
}
