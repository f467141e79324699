//! In-Memory Report Exporter
//!
//! Keeps exported reports in memory. Useful for testing.

use std::sync::{Arc, RwLock};

use crate::domain::evaluation::EvaluationReport;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::ReportExporter;

/// Collects every exported report.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReportExporter {
    reports: Arc<RwLock<Vec<EvaluationReport>>>,
}

impl InMemoryReportExporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all exported reports, oldest first.
    pub fn reports(&self) -> Vec<EvaluationReport> {
        self.reports
            .read()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    pub fn count(&self) -> usize {
        self.reports.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn last(&self) -> Option<EvaluationReport> {
        self.reports.read().ok().and_then(|r| r.last().cloned())
    }
}

impl ReportExporter for InMemoryReportExporter {
    fn export(&self, report: &EvaluationReport) -> Result<(), DomainError> {
        let mut reports = self
            .reports
            .write()
            .map_err(|_| DomainError::new(ErrorCode::InternalError, "Report store lock poisoned"))?;
        reports.push(report.clone());
        Ok(())
    }
}
