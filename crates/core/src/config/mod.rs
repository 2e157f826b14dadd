//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (ZIPSCOUT_*)
//! 2. TOML config file (if ZIPSCOUT_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (ZIPSCOUT_*)
/// 2. TOML config file (if ZIPSCOUT_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// API key for the zipcode lookup service.
    ///
    /// Set via ZIPSCOUT_ZIP_API_KEY. Required only when a zipcode lookup
    /// actually has to go to the network.
    #[serde(default)]
    pub zip_api_key: Option<String>,

    /// Bearer token for the business search service.
    ///
    /// Set via ZIPSCOUT_BUSINESS_API_KEY. Required only when a business
    /// search actually has to go to the network.
    #[serde(default)]
    pub business_api_key: Option<String>,

    /// Path to the JSON response cache file.
    ///
    /// Set via ZIPSCOUT_CACHE_PATH.
    #[serde(default = "default_cache_path")]
    pub cache_path: PathBuf,

    /// Path to the SQLite mirror database.
    ///
    /// Set via ZIPSCOUT_DB_PATH.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// Base URL of the zipcode lookup service.
    #[serde(default = "default_zip_base_url")]
    pub zip_base_url: String,

    /// Base URL of the business search service.
    #[serde(default = "default_business_base_url")]
    pub business_base_url: String,

    /// User-Agent string for HTTP requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// HTTP request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_cache_path() -> PathBuf {
    PathBuf::from("./zipscout-cache.json")
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./zipscout.sqlite")
}

fn default_zip_base_url() -> String {
    "https://www.zipcodeapi.com/rest".into()
}

fn default_business_base_url() -> String {
    "https://api.yelp.com/v3".into()
}

fn default_user_agent() -> String {
    "zipscout/0.1".into()
}

fn default_timeout_ms() -> u64 {
    20_000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            zip_api_key: None,
            business_api_key: None,
            cache_path: default_cache_path(),
            db_path: default_db_path(),
            zip_base_url: default_zip_base_url(),
            business_base_url: default_business_base_url(),
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `ZIPSCOUT_`
    /// 2. TOML file from `ZIPSCOUT_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("ZIPSCOUT_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("ZIPSCOUT_")
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    /// Check that the zipcode service key is available (deferred validation).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if the key is not set.
    pub fn require_zip_api_key(&self) -> Result<&str, ConfigError> {
        self.zip_api_key.as_deref().ok_or_else(|| ConfigError::Missing {
            field: "zip_api_key".into(),
            hint: "Set ZIPSCOUT_ZIP_API_KEY environment variable".into(),
        })
    }

    /// Check that the business service token is available (deferred validation).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if the token is not set.
    pub fn require_business_api_key(&self) -> Result<&str, ConfigError> {
        self.business_api_key.as_deref().ok_or_else(|| ConfigError::Missing {
            field: "business_api_key".into(),
            hint: "Set ZIPSCOUT_BUSINESS_API_KEY environment variable".into(),
        })
    }
}
