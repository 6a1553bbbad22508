use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.toml";
const APP_DIR: &str = "skycast";

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding config.toml and the session file
    #[serde(default)]
    pub config_dir: PathBuf,

    /// Weather provider settings
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Dashboard layout preferences
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Place shown when there is no saved place and no location fix
    #[serde(default = "default_place")]
    pub default_place: String,

    /// Base URL of the geocoding API (forward and reverse)
    #[serde(default = "default_geocoding_url")]
    pub geocoding_url: String,

    /// Base URL of the forecast API
    #[serde(default = "default_forecast_url")]
    pub forecast_url: String,

    /// Base URL of the air-quality API
    #[serde(default = "default_air_quality_url")]
    pub air_quality_url: String,

    /// Per-request HTTP timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Upper bound on waiting for a location fix at startup
    #[serde(default = "default_geolocation_timeout")]
    pub geolocation_timeout_secs: u64,

    /// Forecast horizon requested from the provider
    #[serde(default = "default_forecast_days")]
    pub forecast_days: u8,
}

fn default_place() -> String {
    "Mumbai".to_string()
}

fn default_geocoding_url() -> String {
    "https://geocoding-api.open-meteo.com".to_string()
}

fn default_forecast_url() -> String {
    "https://api.open-meteo.com".to_string()
}

fn default_air_quality_url() -> String {
    "https://air-quality-api.open-meteo.com".to_string()
}

fn default_request_timeout() -> u64 {
    10
}

fn default_geolocation_timeout() -> u64 {
    15
}

fn default_forecast_days() -> u8 {
    7
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            default_place: default_place(),
            geocoding_url: default_geocoding_url(),
            forecast_url: default_forecast_url(),
            air_quality_url: default_air_quality_url(),
            request_timeout_secs: default_request_timeout(),
            geolocation_timeout_secs: default_geolocation_timeout(),
            forecast_days: default_forecast_days(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Number of upcoming-day cards (today is never shown as a card)
    #[serde(default = "default_forecast_cards")]
    pub forecast_cards: usize,
}

fn default_forecast_cards() -> usize {
    5
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            forecast_cards: default_forecast_cards(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_dir: Self::default_dir(),
            weather: WeatherConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from the platform config directory, creating a
    /// default file if it doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_dir())
    }

    /// Load configuration from `dir`, creating a default file there if needed
    pub fn load_from(dir: &Path) -> Result<Self> {
        let config_path = dir.join(CONFIG_FILE);

        if !config_path.exists() {
            let config = Self {
                config_dir: dir.to_path_buf(),
                ..Self::default()
            };
            config.save()?;
            return Ok(config);
        }

        let contents =
            std::fs::read_to_string(&config_path).context("Failed to read config file")?;

        let mut config: Config = toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()))
            .context("Failed to parse config file")?;

        // The directory the file was found in wins over a stale stored value
        config.config_dir = dir.to_path_buf();

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Returns the config along with any validation warnings.
    /// Returns an error if validation fails with critical errors.
    pub fn load_validated(dir: Option<&Path>) -> Result<(Self, ValidationResult)> {
        let config = match dir {
            Some(dir) => Self::load_from(dir)?,
            None => Self::load()?,
        };
        let validation = config.validate();

        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()).into());
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    /// Validate the configuration
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        self.validate_url(&self.weather.geocoding_url, "weather.geocoding_url", &mut result);
        self.validate_url(&self.weather.forecast_url, "weather.forecast_url", &mut result);
        self.validate_url(
            &self.weather.air_quality_url,
            "weather.air_quality_url",
            &mut result,
        );

        if self.weather.default_place.trim().is_empty() {
            result.add_error("weather.default_place", "Default place must not be empty");
        }

        if self.weather.request_timeout_secs == 0 {
            result.add_error(
                "weather.request_timeout_secs",
                "Request timeout must be greater than 0",
            );
        } else if self.weather.request_timeout_secs > 120 {
            result.add_warning(
                "weather.request_timeout_secs",
                "Request timeout is unusually long (>120s)",
            );
        }

        if self.weather.geolocation_timeout_secs == 0 {
            result.add_warning(
                "weather.geolocation_timeout_secs",
                "Location detection disabled (0 seconds)",
            );
        }

        if !(1..=16).contains(&self.weather.forecast_days) {
            result.add_error(
                "weather.forecast_days",
                "Forecast days must be between 1 and 16",
            );
        } else if self.ui.forecast_cards >= usize::from(self.weather.forecast_days) {
            result.add_warning(
                "ui.forecast_cards",
                format!(
                    "Only {} upcoming days are fetched; extra cards stay empty",
                    self.weather.forecast_days - 1
                ),
            );
        }

        result
    }

    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    /// Save configuration to `<config_dir>/config.toml`
    pub fn save(&self) -> Result<()> {
        std::fs::create_dir_all(&self.config_dir)
            .context("Failed to create config directory")?;

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(self.config_dir.join(CONFIG_FILE), contents)
            .context("Failed to write config file")?;

        Ok(())
    }

    fn default_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }
}
