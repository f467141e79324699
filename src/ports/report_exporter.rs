//! ReportExporter port for writing evaluation results

use crate::domain::evaluation::EvaluationReport;
use crate::domain::foundation::DomainError;

/// Writes a finished evaluation report somewhere.
pub trait ReportExporter: Send + Sync {
    /// Export the report.
    ///
    /// # Errors
    ///
    /// - `ExportFailed` if the destination cannot be written
    fn export(&self, report: &EvaluationReport) -> Result<(), DomainError>;
}
