//! Configuration loading and config file resolution

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "CHARHOOK_CONFIG";

/// Service configuration
///
/// Every field has a default, so a partial (or absent) TOML file is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Address the HTTP server binds to
    pub host: String,
    /// Port the HTTP server listens on
    pub port: u16,
    /// JSON array log of received events
    pub event_log: PathBuf,
    /// Plain-text log written by the file channel
    pub notification_log: PathBuf,
    /// Remote badge lookup performed on every dispatch
    pub badge: BadgeConfig,
    /// How long shutdown waits for background jobs
    pub drain_timeout_secs: u64,
    /// Fallback tracing filter when RUST_LOG is unset
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            event_log: PathBuf::from("webhook_log.json"),
            notification_log: PathBuf::from("notifications.txt"),
            badge: BadgeConfig::default(),
            drain_timeout_secs: 10,
            log_level: "info".to_string(),
        }
    }
}

/// Remote badge lookup settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BadgeConfig {
    pub enabled: bool,
    /// Base URL of the service exposing `GET /notifier`
    ///
    /// Unset means this server's own listener, see [`ServiceConfig::badge_base_url`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    pub timeout_ms: u64,
}

impl Default for BadgeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: None,
            timeout_ms: 2000,
        }
    }
}

impl BadgeConfig {
    pub fn timeout(&self) -> Duration {
        crate::time::millis_to_duration(self.timeout_ms)
    }
}

impl ServiceConfig {
    /// Parse a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ServiceConfig =
            toml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from an optional file
    ///
    /// - `None`: compiled defaults
    /// - missing file: warning + compiled defaults
    /// - unreadable or malformed file: `Error::Config`
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        if !path.exists() {
            warn!(
                "Config file {} not found, using defaults",
                path.display()
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Socket address string for the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Badge lookup base URL
    ///
    /// An explicit `badge.base_url` wins. Otherwise the URL points at the
    /// resolved host and port, with wildcard bind addresses mapped to loopback.
    pub fn badge_base_url(&self) -> String {
        if let Some(url) = &self.badge.base_url {
            return url.clone();
        }
        let host = match self.host.as_str() {
            "0.0.0.0" | "" => "127.0.0.1",
            "::" | "[::]" => "[::1]",
            other => other,
        };
        if host.contains(':') && !host.starts_with('[') {
            format!("http://[{}]:{}", host, self.port)
        } else {
            format!("http://{}:{}", host, self.port)
        }
    }

    fn validate(&self) -> Result<()> {
        let blank_url = matches!(&self.badge.base_url, Some(url) if url.trim().is_empty());
        if self.badge.enabled && blank_url {
            return Err(Error::Config(
                "badge.base_url must not be empty when badge lookups are enabled".to_string(),
            ));
        }
        if self.badge.timeout_ms == 0 {
            return Err(Error::Config("badge.timeout_ms must be positive".to_string()));
        }
        Ok(())
    }
}

/// Config file resolution, highest priority first:
/// 1. Command-line argument
/// 2. `CHARHOOK_CONFIG` environment variable
/// 3. User config directory (`~/.config/charhook/config.toml` on Linux)
/// 4. `/etc/charhook/config.toml` (Linux only)
///
/// Explicit choices (1 and 2) are returned even if the file does not exist,
/// so [`ServiceConfig::load`] can warn about them. Returns `None` when no
/// candidate applies.
pub fn resolve_config_path(cli_arg: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = cli_arg {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    if let Some(user_config) = dirs::config_dir().map(|d| d.join("charhook").join("config.toml")) {
        if user_config.exists() {
            return Some(user_config);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/charhook/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}
