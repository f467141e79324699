//! Analysis configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::evaluation::{
    EvaluationKind, EvaluationSettings, CEAC_MAX_RESOLUTION, CEAC_MIN_RESOLUTION,
    DEFAULT_CEAC_RESOLUTION, DEFAULT_PSA_ITERATIONS, PSA_MAX_ITERATIONS, PSA_MIN_ITERATIONS,
};

/// Output format for exported reports
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

/// Defaults for evaluation runs
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    /// CEA (natural units) or CUA (QALYs)
    #[serde(default)]
    pub kind: EvaluationKind,

    /// Willingness-to-pay per unit of effect
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Monte Carlo iterations per comparator
    #[serde(default = "default_iterations")]
    pub iterations: usize,

    /// Number of CEAC thresholds
    #[serde(default = "default_resolution")]
    pub resolution: usize,

    /// Fixed seed for reproducible runs
    pub seed: Option<u64>,

    /// Export format
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Export destination (directory for CSV, file for JSON)
    #[serde(default = "default_output")]
    pub output: String,
}

impl AnalysisConfig {
    /// Settings for one evaluation run
    pub fn settings(&self) -> EvaluationSettings {
        EvaluationSettings {
            kind: self.kind,
            threshold: self.threshold,
            iterations: self.iterations,
            resolution: self.resolution,
            seed: self.seed,
        }
    }

    /// Validate analysis configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.threshold.is_finite() || self.threshold <= 0.0 {
            return Err(ValidationError::InvalidThreshold(self.threshold));
        }
        if !(PSA_MIN_ITERATIONS..=PSA_MAX_ITERATIONS).contains(&self.iterations) {
            return Err(ValidationError::IterationsOutOfRange {
                min: PSA_MIN_ITERATIONS,
                max: PSA_MAX_ITERATIONS,
                actual: self.iterations,
            });
        }
        if !(CEAC_MIN_RESOLUTION..=CEAC_MAX_RESOLUTION).contains(&self.resolution) {
            return Err(ValidationError::ResolutionOutOfRange {
                min: CEAC_MIN_RESOLUTION,
                max: CEAC_MAX_RESOLUTION,
                actual: self.resolution,
            });
        }
        if self.output.trim().is_empty() {
            return Err(ValidationError::MissingRequired("analysis.output"));
        }
        Ok(())
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            kind: EvaluationKind::default(),
            threshold: default_threshold(),
            iterations: default_iterations(),
            resolution: default_resolution(),
            seed: None,
            output_format: OutputFormat::default(),
            output: default_output(),
        }
    }
}

fn default_threshold() -> f64 {
    20000.0
}

fn default_iterations() -> usize {
    DEFAULT_PSA_ITERATIONS
}

fn default_resolution() -> usize {
    DEFAULT_CEAC_RESOLUTION
}

fn default_output() -> String {
    "evaluation".to_string()
}
