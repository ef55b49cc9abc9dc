//! Configuration management for the `TripPlanner` service
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::TripPlannerError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable that may point at an explicit config file
pub const CONFIG_PATH_ENV: &str = "TRIPPLANNER_CONFIG";

/// Environment variable holding the Gemini key when the config file has none
pub const GEMINI_KEY_ENV: &str = "GEMINI_API_KEY";

/// Root configuration structure for the `TripPlanner` service
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TripPlannerConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Generative model settings
    #[serde(default)]
    pub gemini: GeminiConfig,
    /// Photo lookup settings
    #[serde(default)]
    pub photos: PhotoConfig,
    /// Itinerary generation settings
    #[serde(default)]
    pub planner: PlannerConfig,
    /// Cache configuration
    #[serde(default)]
    pub cache: CacheConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory with a built front-end, served for non-API paths
    pub static_dir: Option<String>,
    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u32,
    /// Maximum accepted request body in KiB
    #[serde(default = "default_max_body_kb")]
    pub max_body_kb: u32,
    /// PEM certificate, only used with the `tls` feature
    pub tls_cert_path: Option<String>,
    /// PEM private key, only used with the `tls` feature
    pub tls_key_path: Option<String>,
}

/// Gemini `generateContent` settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API key; falls back to the `GEMINI_API_KEY` environment variable
    pub api_key: Option<String>,
    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,
    #[serde(default = "default_gemini_model")]
    pub model: String,
    #[serde(default = "default_gemini_temperature")]
    pub temperature: f32,
    /// Request timeout in seconds
    #[serde(default = "default_gemini_timeout")]
    pub timeout_seconds: u32,
}

/// Photo resolver settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoConfig {
    /// Upper bound for resolving one photo across the whole fallback chain
    #[serde(default = "default_photo_timeout")]
    pub timeout_seconds: u32,
    #[serde(default = "default_photo_user_agent")]
    pub user_agent: String,
    /// How long a resolved photo URL stays cached
    #[serde(default = "default_photo_cache_ttl")]
    pub cache_ttl_seconds: u64,
    /// Wikipedia origin; `{lang}` is replaced by the language code
    #[serde(default = "default_wikipedia_url")]
    pub wikipedia_url: String,
    #[serde(default = "default_commons_api_url")]
    pub commons_api_url: String,
    #[serde(default = "default_openverse_api_url")]
    pub openverse_api_url: String,
}

/// Itinerary generation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Longest trip, in days, that gets an itinerary
    #[serde(default = "default_max_trip_days")]
    pub max_trip_days: u32,
}

/// Cache configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_cache_enabled")]
    pub enabled: bool,
    /// Cache directory location
    #[serde(default = "default_cache_location")]
    pub location: String,
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
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_request_timeout() -> u32 {
    90
}

fn default_max_body_kb() -> u32 {
    256
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_gemini_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_gemini_temperature() -> f32 {
    0.6
}

fn default_gemini_timeout() -> u32 {
    60
}

fn default_photo_timeout() -> u32 {
    8
}

fn default_photo_user_agent() -> String {
    "TripPlanner/1.0 (+contact@example.com)".to_string()
}

fn default_photo_cache_ttl() -> u64 {
    3600
}

fn default_wikipedia_url() -> String {
    "https://{lang}.wikipedia.org".to_string()
}

fn default_commons_api_url() -> String {
    "https://commons.wikimedia.org/w/api.php".to_string()
}

fn default_openverse_api_url() -> String {
    "https://api.openverse.engineering/v1/images/".to_string()
}

fn default_max_trip_days() -> u32 {
    30
}

fn default_cache_enabled() -> bool {
    true
}

fn default_cache_location() -> String {
    dirs::cache_dir()
        .map(|dir| dir.join("tripplanner"))
        .unwrap_or_else(|| PathBuf::from(".cache/tripplanner"))
        .to_string_lossy()
        .into_owned()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: None,
            request_timeout_seconds: default_request_timeout(),
            max_body_kb: default_max_body_kb(),
            tls_cert_path: None,
            tls_key_path: None,
        }
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_gemini_base_url(),
            model: default_gemini_model(),
            temperature: default_gemini_temperature(),
            timeout_seconds: default_gemini_timeout(),
        }
    }
}

impl Default for PhotoConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_photo_timeout(),
            user_agent: default_photo_user_agent(),
            cache_ttl_seconds: default_photo_cache_ttl(),
            wikipedia_url: default_wikipedia_url(),
            commons_api_url: default_commons_api_url(),
            openverse_api_url: default_openverse_api_url(),
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_trip_days: default_max_trip_days(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_cache_enabled(),
            location: default_cache_location(),
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

impl TripPlannerConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        let explicit = std::env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from);
        Self::load_from_path(explicit)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // TRIPPLANNER__GEMINI__MODEL=... style overrides
        builder = builder.add_source(
            Environment::with_prefix("TRIPPLANNER")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: TripPlannerConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        if config.gemini.api_key.is_none() {
            config.gemini.api_key = std::env::var(GEMINI_KEY_ENV)
                .ok()
                .filter(|key| !key.trim().is_empty());
        }

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tripplanner").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.server.host.is_empty() {
            self.server.host = default_host();
        }
        if self.server.request_timeout_seconds == 0 {
            self.server.request_timeout_seconds = default_request_timeout();
        }
        if self.server.max_body_kb == 0 {
            self.server.max_body_kb = default_max_body_kb();
        }
        if self.gemini.base_url.is_empty() {
            self.gemini.base_url = default_gemini_base_url();
        }
        if self.gemini.model.is_empty() {
            self.gemini.model = default_gemini_model();
        }
        if self.gemini.timeout_seconds == 0 {
            self.gemini.timeout_seconds = default_gemini_timeout();
        }
        if self.photos.timeout_seconds == 0 {
            self.photos.timeout_seconds = default_photo_timeout();
        }
        if self.photos.user_agent.is_empty() {
            self.photos.user_agent = default_photo_user_agent();
        }
        if self.photos.wikipedia_url.is_empty() {
            self.photos.wikipedia_url = default_wikipedia_url();
        }
        if self.photos.commons_api_url.is_empty() {
            self.photos.commons_api_url = default_commons_api_url();
        }
        if self.photos.openverse_api_url.is_empty() {
            self.photos.openverse_api_url = default_openverse_api_url();
        }
        if self.planner.max_trip_days == 0 {
            self.planner.max_trip_days = default_max_trip_days();
        }
        if self.cache.location.is_empty() {
            self.cache.location = default_cache_location();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_keys()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate API keys and credentials.
    ///
    /// A missing key is allowed: the server starts and `/api/ai/plan`
    /// answers with a configuration error until one is provided.
    pub fn validate_api_keys(&self) -> Result<()> {
        if let Some(api_key) = &self.gemini.api_key {
            if api_key.trim().is_empty() {
                return Err(TripPlannerError::config(
                    "Gemini API key cannot be empty if provided. Either remove it or provide a valid key.",
                )
                .into());
            }

            if api_key.len() > 200 {
                return Err(TripPlannerError::config(
                    "Gemini API key appears to be invalid (too long). Please check your API key.",
                )
                .into());
            }
        }

        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.gemini.timeout_seconds > 300 {
            return Err(
                TripPlannerError::config("Gemini timeout cannot exceed 300 seconds").into(),
            );
        }

        if !(0.0..=2.0).contains(&self.gemini.temperature) {
            return Err(
                TripPlannerError::config("Gemini temperature must be between 0.0 and 2.0").into(),
            );
        }

        if self.photos.timeout_seconds > 60 {
            return Err(
                TripPlannerError::config("Photo timeout cannot exceed 60 seconds").into(),
            );
        }

        if self.photos.cache_ttl_seconds > 7 * 24 * 3600 {
            return Err(TripPlannerError::config(
                "Photo cache TTL cannot exceed 604800 seconds (1 week)",
            )
            .into());
        }

        if self.planner.max_trip_days > 90 {
            return Err(
                TripPlannerError::config("Maximum trip length cannot exceed 90 days").into(),
            );
        }

        if self.server.max_body_kb > 10 * 1024 {
            return Err(
                TripPlannerError::config("Maximum request body cannot exceed 10240 KiB").into(),
            );
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(TripPlannerError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(TripPlannerError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !self.gemini.base_url.starts_with("http://")
            && !self.gemini.base_url.starts_with("https://")
        {
            return Err(TripPlannerError::config(
                "Gemini base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        if self.server.tls_cert_path.is_some() != self.server.tls_key_path.is_some() {
            return Err(TripPlannerError::config(
                "TLS needs both tls_cert_path and tls_key_path",
            )
            .into());
        }

        Ok(())
    }
}
