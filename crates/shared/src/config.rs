//! Configuration management for the site data pipeline.
//!
//! This module handles loading and parsing configuration from a TOML file.
//! Only the `[bangumi]` section is required; every other section falls back
//! to defaults that match the public Bangumi API and the site's layout.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// User ids shipped in the site template. Accepted, but almost certainly a mistake.
const PLACEHOLDER_USER_IDS: &[&str] = &["your-bangumi-id", "your-user-id"];

/// Configuration problems that are not plain I/O or syntax errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("bangumi.user_id is missing or empty")]
    MissingUserId,
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Bangumi account settings
    pub bangumi: BangumiConfig,

    /// Anime category settings
    #[serde(default)]
    pub anime: CategoryConfig,

    /// Book category settings
    #[serde(default)]
    pub book: CategoryConfig,

    /// Game category settings
    #[serde(default)]
    pub game: CategoryConfig,

    /// Catalog API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Bangumi account configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BangumiConfig {
    /// Bangumi username or numeric user id
    #[serde(default)]
    pub user_id: String,
}

/// Where a category's data comes from.
///
/// `bangumi` means the category is fetched live; any other value keeps the
/// hand-authored data and skips the category during sync.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SourceMode {
    #[default]
    Bangumi,
    Other(String),
}

impl SourceMode {
    pub fn is_live(&self) -> bool {
        matches!(self, SourceMode::Bangumi)
    }
}

impl From<String> for SourceMode {
    fn from(value: String) -> Self {
        if value == "bangumi" {
            SourceMode::Bangumi
        } else {
            SourceMode::Other(value)
        }
    }
}

impl From<SourceMode> for String {
    fn from(mode: SourceMode) -> Self {
        mode.to_string()
    }
}

impl fmt::Display for SourceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceMode::Bangumi => write!(f, "bangumi"),
            SourceMode::Other(other) => write!(f, "{}", other),
        }
    }
}

/// Per-category configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryConfig {
    #[serde(default)]
    pub mode: SourceMode,
}

/// Catalog API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// API base URL
    pub base_url: String,

    /// User-Agent sent with every request (required by the Bangumi API)
    pub user_agent: String,

    /// Collection page size
    pub page_size: u32,

    /// Delay after each full collection page, in milliseconds
    pub page_delay_ms: u64,

    /// Delay after each subject detail request, in milliseconds
    pub detail_delay_ms: u64,

    /// Fetch subject details to recover summaries and production credits
    pub fetch_details: bool,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.bgm.tv".to_string(),
            user_agent: concat!("bangumi-sync/", env!("CARGO_PKG_VERSION")).to_string(),
            page_size: 50,
            page_delay_ms: 300,
            detail_delay_ms: 150,
            fetch_details: true,
            timeout_secs: 30,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the generated JSON files are written to
    pub dir: String,

    /// Directory holding the hand-authored fallback data
    pub local_dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: "src/data".to_string(),
            local_dir: "data/local".to_string(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log directory path
    pub log_dir: String,

    /// Default log level (trace, debug, info, warn, error)
    pub default_level: String,

    /// Enable console output
    pub console: bool,

    /// Enable file output
    pub file: bool,

    /// Enable JSON formatting for file logs
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: "logs".to_string(),
            default_level: "info".to_string(),
            console: true,
            file: false,
            json_format: false,
        }
    }
}

impl Config {
    /// Create a configuration with defaults for everything but the user id
    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self {
            bangumi: BangumiConfig {
                user_id: user_id.into(),
            },
            anime: CategoryConfig::default(),
            book: CategoryConfig::default(),
            game: CategoryConfig::default(),
            api: ApiConfig::default(),
            output: OutputConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    /// Load configuration from a TOML file
    ///
    /// Unlike most settings files this one is mandatory: without a user id
    /// there is nothing to sync, so a missing file is an error.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the settings that have no usable default
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.user_id().is_empty() {
            return Err(ConfigError::MissingUserId);
        }

        Ok(())
    }

    /// Whether the user id is still the one shipped in the site template.
    ///
    /// Accepted, but callers should warn once logging is up.
    pub fn has_placeholder_user_id(&self) -> bool {
        PLACEHOLDER_USER_IDS.contains(&self.user_id())
    }

    /// The configured user id, without surrounding whitespace
    pub fn user_id(&self) -> &str {
        self.bangumi.user_id.trim()
    }

    /// Directory generated JSON is written to
    pub fn output_dir(&self) -> PathBuf {
        PathBuf::from(&self.output.dir)
    }

    /// Directory holding hand-authored data
    pub fn local_dir(&self) -> PathBuf {
        PathBuf::from(&self.output.local_dir)
    }
}
