//! Configuration types for badge-dl

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default shields.io endpoint for static badges
pub const DEFAULT_BASE_URL: &str = "https://img.shields.io/badge";

/// HTTP fetch configuration
///
/// Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Badge service base URL (default: "https://img.shields.io/badge")
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout covering connect, redirects and body (default: 30s)
    #[serde(default = "default_timeout", with = "duration_serde")]
    pub timeout: Duration,

    /// User-Agent header sent with the request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

/// Filesystem persistence configuration
///
/// Modes are ignored on platforms without Unix permissions.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PersistenceConfig {
    /// Mode for directories created on the way to the output path (default: 0o777)
    #[serde(default = "default_dir_mode")]
    pub dir_mode: u32,

    /// Mode of the final badge file (default: 0o666)
    #[serde(default = "default_file_mode")]
    pub file_mode: u32,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            dir_mode: default_dir_mode(),
            file_mode: default_file_mode(),
        }
    }
}

/// How missing required inputs are reported
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// Report the first missing field (label, status, path order)
    #[default]
    FirstMissing,
    /// Report every missing field jointly
    AllMissing,
}

/// Main configuration for [`BadgeWriter`](crate::BadgeWriter)
///
/// Every field has a default, so an empty JSON object is a valid config file.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP fetch settings
    #[serde(default)]
    pub fetch: FetchConfig,

    /// File and directory permission settings
    #[serde(default)]
    pub persistence: PersistenceConfig,

    /// Missing-field reporting policy
    #[serde(default)]
    pub validation_mode: ValidationMode,
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check settings that serde cannot reject on its own
    pub fn validate(&self) -> Result<()> {
        let base = url::Url::parse(&self.fetch.base_url).map_err(|e| Error::Config {
            message: format!("invalid base URL '{}': {}", self.fetch.base_url, e),
            key: Some("base_url".to_string()),
        })?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(Error::Config {
                message: format!("base URL must be http or https, got '{}'", base.scheme()),
                key: Some("base_url".to_string()),
            });
        }
        if self.fetch.timeout.is_zero() {
            return Err(Error::Config {
                message: "timeout must be greater than zero".to_string(),
                key: Some("timeout".to_string()),
            });
        }
        Ok(())
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_user_agent() -> String {
    concat!("badge-dl/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_dir_mode() -> u32 {
    0o777
}

fn default_file_mode() -> u32 {
    0o666
}

mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
