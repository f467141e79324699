//! Evaluation-specific error types.
//!
//! | Error | Meaning | Caller action |
//! |-------|---------|---------------|
//! | InsufficientData | fewer than two alternatives | informational, ask for more rows |
//! | InvalidInput | negative or non-finite value | re-prompt for the table |
//! | InvalidSettings | iteration count, resolution or threshold out of bounds | fix the setting |
//!
//! Undefined ratios are not errors; they travel through tables as
//! [`Ratio::Undefined`](super::Ratio::Undefined).

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Errors raised by the evaluation engine.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum EvaluationError {
    #[error("Incremental analysis needs at least 2 alternatives, found {found}")]
    InsufficientData { found: usize },

    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValidationError),

    #[error("Invalid setting '{setting}': {reason}")]
    InvalidSettings { setting: String, reason: String },
}

impl EvaluationError {
    pub fn insufficient_data(found: usize) -> Self {
        EvaluationError::InsufficientData { found }
    }

    pub fn invalid_settings(setting: impl Into<String>, reason: impl Into<String>) -> Self {
        EvaluationError::InvalidSettings {
            setting: setting.into(),
            reason: reason.into(),
        }
    }

    /// True for the informational "not enough rows" state.
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, EvaluationError::InsufficientData { .. })
    }
}

impl From<EvaluationError> for DomainError {
    fn from(err: EvaluationError) -> Self {
        match &err {
            EvaluationError::InsufficientData { found } => {
                DomainError::new(ErrorCode::InsufficientData, err.to_string())
                    .with_detail("found", found.to_string())
            }
            EvaluationError::InvalidInput(validation) => validation.clone().into(),
            EvaluationError::InvalidSettings { setting, .. } => {
                DomainError::new(ErrorCode::InvalidSettings, err.to_string())
                    .with_detail("setting", setting.clone())
            }
        }
    }
}
