//! Application configuration.

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::infrastructure::image::cache::{ImageCacheConfig, Recompression};
use crate::infrastructure::image::http_fetcher::HttpImageFetcherConfig;

const APP_NAME: &str = "dessertbook";
const APP_QUALIFIER: &str = "com";
const APP_ORGANIZATION: &str = "linuxmobile";

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl LogLevel {
    /// Converts to tracing level.
    #[must_use]
    pub const fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Recipe API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the recipe API.
    #[serde(default = "default_api_base_url")]
    pub base_url: String,

    /// Per-request timeout for recipe endpoints, in seconds.
    #[serde(default = "default_api_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_base_url(),
            timeout_secs: default_api_timeout_secs(),
        }
    }
}

/// Image pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageConfig {
    /// Maximum cached images; `0` disables the bound.
    #[serde(default)]
    pub cache_capacity: usize,

    /// Whether fetched images are re-encoded before caching.
    #[serde(default = "default_true")]
    pub recompress: bool,

    /// JPEG quality factor on a 0.0-1.0 scale, used when `recompress` is on.
    #[serde(default = "default_recompression_quality")]
    pub recompression_quality: f32,

    /// Per-request timeout for image downloads, in seconds.
    #[serde(default = "default_image_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Whole-resource timeout for image downloads, in seconds.
    #[serde(default = "default_image_resource_timeout_secs")]
    pub resource_timeout_secs: u64,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            cache_capacity: 0,
            recompress: true,
            recompression_quality: default_recompression_quality(),
            request_timeout_secs: default_image_request_timeout_secs(),
            resource_timeout_secs: default_image_resource_timeout_secs(),
        }
    }
}

impl ImageConfig {
    /// Builds the cache configuration this config describes.
    #[must_use]
    pub fn cache_config(&self) -> ImageCacheConfig {
        let recompression = if self.recompress {
            Recompression::Jpeg {
                quality: self.recompression_quality,
            }
        } else {
            Recompression::Off
        };
        ImageCacheConfig::new()
            .with_capacity(NonZeroUsize::new(self.cache_capacity))
            .with_recompression(recompression)
    }

    /// Builds the fetcher timeouts this config describes.
    #[must_use]
    pub const fn fetcher_config(&self) -> HttpImageFetcherConfig {
        HttpImageFetcherConfig {
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            resource_timeout: Duration::from_secs(self.resource_timeout_secs),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Recipe API configuration.
    #[serde(default)]
    pub api: ApiConfig,

    /// Image pipeline configuration.
    #[serde(default)]
    pub image: ImageConfig,
}

impl AppConfig {
    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    /// Returns error if the TOML does not match the schema.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Loads configuration from a file.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Returns default config directory.
    #[must_use]
    pub fn default_config_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns default config file path.
    #[must_use]
    pub fn default_config_path() -> Option<PathBuf> {
        Self::default_config_dir().map(|dir| dir.join("config.toml"))
    }
}

fn default_api_base_url() -> String {
    "https://www.themealdb.com/api/json/v1/1".to_string()
}

fn default_api_timeout_secs() -> u64 {
    10
}

fn default_true() -> bool {
    true
}

fn default_recompression_quality() -> f32 {
    Recompression::DEFAULT_QUALITY
}

fn default_image_request_timeout_secs() -> u64 {
    30
}

fn default_image_resource_timeout_secs() -> u64 {
    60
}
