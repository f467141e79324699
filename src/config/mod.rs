//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `HEALTH_ECON` prefix and nested values use double underscores as separators.
//! An optional TOML, JSON or YAML file can supply the same keys; environment
//! variables win over file values.
//!
//! # Example
//!
//! ```no_run
//! use health_econ::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Threshold: {}", config.analysis.threshold);
//! ```

mod analysis;
mod error;
mod logging;

pub use analysis::{AnalysisConfig, OutputFormat};
pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;

use serde::Deserialize;
use std::path::Path;

const ENV_PREFIX: &str = "HEALTH_ECON";

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a usable
/// configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Evaluation defaults (kind, threshold, iterations, resolution, output)
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Log filter and format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `HEALTH_ECON` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `HEALTH_ECON__ANALYSIS__THRESHOLD=30000` -> `analysis.threshold = 30000`
    /// - `HEALTH_ECON__LOGGING__JSON=true` -> `logging.json = true`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        Self::build(None)
    }

    /// Load configuration from a file, then overlay environment variables
    ///
    /// The file format follows the extension (`.toml`, `.json`, `.yaml`).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file is missing or malformed.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        Self::build(Some(path))
    }

    fn build(file: Option<&Path>) -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let mut builder = config::Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path));
        }

        let config = builder
            .add_source(
                config::Environment::default()
                    .prefix(ENV_PREFIX)
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.analysis.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
