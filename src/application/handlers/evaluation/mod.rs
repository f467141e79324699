//! Evaluation command handlers.

mod run_evaluation;

pub use run_evaluation::{EvaluationOutcome, RunEvaluationCommand, RunEvaluationHandler};
