//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers and error types that form the
//! vocabulary of the evaluation domain.

mod errors;
mod ids;
mod probability;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::EvaluationId;
pub use probability::Probability;
pub use timestamp::Timestamp;
