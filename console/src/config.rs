//! Configuration management for the UMKM Directory console
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with the UMKM__ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::Language;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Directory presentation settings
    pub directory: DirectoryConfig,

    /// Date display settings
    pub display: DisplayConfig,

    /// Logging configuration
    pub log: LogConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DirectoryConfig {
    /// Brand shown in the navigation header
    pub brand_name: String,

    /// JSON file with the initial listings, if any
    pub seed_path: Option<String>,

    /// Language of error messages
    pub language: Language,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DisplayConfig {
    /// UTC offset used when rendering dates (WIB is +7)
    pub utc_offset_hours: i32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    /// Fallback filter when RUST_LOG is not set
    pub filter: String,

    /// Emit JSON log lines instead of plain text
    pub json: bool,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("UMKM_ENVIRONMENT").unwrap_or_else(|_| "development".into());
        Self::load_for(&environment)
    }

    /// Load configuration for a named environment
    pub fn load_for(environment: &str) -> Result<Self, ConfigError> {
        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment)?
            .set_default("directory.brand_name", "BRANIMULAI")?
            .set_default("directory.language", "indonesian")?
            .set_default("display.utc_offset_hours", 7)?
            .set_default("log.filter", "umkm_console=info,umkm_directory_console=info,shared=info")?
            .set_default("log.json", false)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (UMKM__ prefix)
            .add_source(
                Environment::with_prefix("UMKM")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
