//! RunEvaluationHandler - Command handler for a full incremental evaluation.
//!
//! Loads the alternatives table, runs the deterministic and probabilistic
//! branches, and hands the finished report to the exporter.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::evaluation::{evaluate, EvaluationError, EvaluationReport, EvaluationSettings};
use crate::domain::foundation::DomainError;
use crate::ports::{AlternativeSource, ReportExporter};

/// Command to run one evaluation.
#[derive(Debug, Clone, Default)]
pub struct RunEvaluationCommand {
    pub settings: EvaluationSettings,
}

impl RunEvaluationCommand {
    pub fn new(settings: EvaluationSettings) -> Self {
        Self { settings }
    }
}

/// How an evaluation run ended.
#[derive(Debug, Clone)]
pub enum EvaluationOutcome {
    /// Every stage ran and the report was exported.
    Completed(Box<EvaluationReport>),
    /// Too few alternatives to compare; nothing was exported.
    InsufficientData { found: usize },
}

impl EvaluationOutcome {
    pub fn report(&self) -> Option<&EvaluationReport> {
        match self {
            EvaluationOutcome::Completed(report) => Some(report.as_ref()),
            EvaluationOutcome::InsufficientData { .. } => None,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, EvaluationOutcome::Completed(_))
    }
}

/// Handler for evaluation runs.
pub struct RunEvaluationHandler {
    source: Arc<dyn AlternativeSource>,
    exporter: Arc<dyn ReportExporter>,
}

impl RunEvaluationHandler {
    pub fn new(source: Arc<dyn AlternativeSource>, exporter: Arc<dyn ReportExporter>) -> Self {
        Self { source, exporter }
    }

    pub fn handle(&self, cmd: RunEvaluationCommand) -> Result<EvaluationOutcome, DomainError> {
        // 1. Load and validate the table
        let table = self.source.load()?;
        info!(
            source = %self.source.describe(),
            alternatives = table.len(),
            kind = %cmd.settings.kind,
            threshold = cmd.settings.threshold,
            "Starting evaluation"
        );

        // 2. Run every stage
        let report = match evaluate(&table, cmd.settings) {
            Ok(report) => report,
            Err(EvaluationError::InsufficientData { found }) => {
                info!(found, "Not enough alternatives for incremental analysis");
                return Ok(EvaluationOutcome::InsufficientData { found });
            }
            Err(err) => return Err(err.into()),
        };

        // 3. Flag rows whose ratio is undefined
        let undefined = report.incremental().undefined_ratio_count();
        if undefined > 0 {
            warn!(
                evaluation_id = %report.id,
                undefined_ratios = undefined,
                "Some increments have no effect gain; their {} is undefined",
                report.kind().ratio_label()
            );
        }

        // 4. Export
        self.exporter.export(&report)?;

        info!(
            evaluation_id = %report.id,
            frontier = ?report.dominance.frontier_ids(),
            dominated = report.dominance.dominated.len(),
            seed = report.psa.seed,
            "Evaluation completed"
        );

        Ok(EvaluationOutcome::Completed(Box::new(report)))
    }
}
