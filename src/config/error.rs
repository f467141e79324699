//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Willingness-to-pay threshold must be finite and positive, got {0}")]
    InvalidThreshold(f64),

    #[error("PSA iterations must be between {min} and {max}, got {actual}")]
    IterationsOutOfRange { min: usize, max: usize, actual: usize },

    #[error("CEAC resolution must be between {min} and {max}, got {actual}")]
    ResolutionOutOfRange { min: usize, max: usize, actual: usize },

    #[error("Invalid log filter directive: {0}")]
    InvalidLogFilter(String),
}
