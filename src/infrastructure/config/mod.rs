//! Configuration management.

mod app_config;

pub use app_config::{ApiConfig, AppConfig, ConfigError, ImageConfig, LogLevel};
