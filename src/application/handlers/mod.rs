//! Command handlers.

pub mod evaluation;

pub use evaluation::{EvaluationOutcome, RunEvaluationCommand, RunEvaluationHandler};
