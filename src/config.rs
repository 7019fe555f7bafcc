//! Configuration management for the `Meteobot` application
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::MeteoBotError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the `Meteobot` application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    /// Telegram Bot API configuration
    #[serde(default)]
    pub telegram: TelegramConfig,
    /// Weather API configuration
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Telegram Bot API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// Bot access token issued by `@BotFather`. Required.
    #[serde(default)]
    pub token: String,
    /// Base URL for the Bot API
    #[serde(default = "default_telegram_api_base")]
    pub api_base: String,
    /// Long-poll window in seconds for `getUpdates`
    #[serde(default = "default_poll_timeout")]
    pub poll_timeout_seconds: u32,
}

/// Weather API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Base URL for the geocoding API
    #[serde(default = "default_geocoding_base_url")]
    pub geocoding_base_url: String,
    /// Base URL for the forecast API
    #[serde(default = "default_forecast_base_url")]
    pub forecast_base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_weather_timeout")]
    pub timeout_seconds: u32,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_telegram_api_base() -> String {
    "https://api.telegram.org".to_string()
}

fn default_poll_timeout() -> u32 {
    50
}

fn default_geocoding_base_url() -> String {
    "https://geocoding-api.open-meteo.com".to_string()
}

fn default_forecast_base_url() -> String {
    "https://api.open-meteo.com".to_string()
}

fn default_weather_timeout() -> u32 {
    60
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            api_base: default_telegram_api_base(),
            poll_timeout_seconds: default_poll_timeout(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            geocoding_base_url: default_geocoding_base_url(),
            forecast_base_url: default_forecast_base_url(),
            timeout_seconds: default_weather_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            telegram: TelegramConfig::default(),
            weather: WeatherConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl BotConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file)
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Add environment variable overrides with METEOBOT_ prefix
        builder = builder.add_source(
            Environment::with_prefix("METEOBOT")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: BotConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        // The conventional token variable wins over file and prefixed values
        if let Ok(token) = std::env::var("TELEGRAM_TOKEN") {
            config.telegram.token = token;
        }

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("meteobot").join("config.toml"))
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_token()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate the bot access token
    pub fn validate_token(&self) -> Result<()> {
        if self.telegram.token.trim().is_empty() {
            return Err(MeteoBotError::config(
                "Telegram bot token is required. Set TELEGRAM_TOKEN or telegram.token in config.toml."
            ).into());
        }

        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.telegram.poll_timeout_seconds > 300 {
            return Err(
                MeteoBotError::config("Telegram poll timeout cannot exceed 300 seconds").into(),
            );
        }

        if self.weather.timeout_seconds == 0 {
            return Err(MeteoBotError::config("Weather API timeout cannot be zero").into());
        }

        if self.weather.timeout_seconds > 300 {
            return Err(
                MeteoBotError::config("Weather API timeout cannot exceed 300 seconds").into(),
            );
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(MeteoBotError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(MeteoBotError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        for (name, url) in [
            ("Telegram API base", &self.telegram.api_base),
            ("geocoding base", &self.weather.geocoding_base_url),
            ("forecast base", &self.weather.forecast_base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(MeteoBotError::config(format!(
                    "The {name} URL must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_token() -> BotConfig {
        let mut config = BotConfig::default();
        config.telegram.token = "123456:test-token".to_string();
        config
    }

    #[test]
    fn test_default_config() {
        let config = BotConfig::default();
        assert_eq!(config.telegram.api_base, "https://api.telegram.org");
        assert_eq!(config.telegram.poll_timeout_seconds, 50);
        assert_eq!(
            config.weather.geocoding_base_url,
            "https://geocoding-api.open-meteo.com"
        );
        assert_eq!(config.weather.forecast_base_url, "https://api.open-meteo.com");
        assert_eq!(config.weather.timeout_seconds, 60);
        assert_eq!(config.logging.level, "info");
        assert!(config.telegram.token.is_empty());
    }

    #[test]
    fn test_missing_token_fails_validation() {
        let config = BotConfig::default();
        let result = config.validate();
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("bot token is required")
        );
    }

    #[test]
    fn test_valid_config_passes_validation() {
        let config = config_with_token();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = config_with_token();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_invalid_log_format() {
        let mut config = config_with_token();
        config.logging.format = "xml".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log format"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = config_with_token();
        config.weather.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("cannot exceed"));

        let mut config = config_with_token();
        config.weather.timeout_seconds = 0;
        assert!(config.validate().is_err());

        let mut config = config_with_token();
        config.telegram.poll_timeout_seconds = 301;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_bad_base_url() {
        let mut config = config_with_token();
        config.weather.forecast_base_url = "ftp://api.open-meteo.com".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("HTTP or HTTPS"));
    }

    #[test]
    fn test_config_path_generation() {
        let path = BotConfig::get_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("meteobot"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }
}
