use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Base URL of the recipe catalog API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// File backing the durable key/value storage
    #[serde(default = "default_storage_path")]
    pub storage_path: PathBuf,
    /// Storage key holding the favorites list
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            timeout: default_timeout(),
            storage_path: default_storage_path(),
            storage_key: default_storage_key(),
        }
    }
}

// Default value functions
fn default_api_base_url() -> String {
    "https://www.themealdb.com/api/json/v1/1".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_storage_path() -> PathBuf {
    PathBuf::from("meal-finder-storage.json")
}

fn default_storage_key() -> String {
    "recipeFavorites".to_string()
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with MEAL_FINDER__ prefix
    /// 2. meal-finder.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: MEAL_FINDER__STORAGE_PATH
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

/// Load configuration from file and environment variables.
///
/// See [`AppConfig::load`] for the precedence rules.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("meal-finder").required(false))
        .add_source(
            Environment::with_prefix("MEAL_FINDER")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
