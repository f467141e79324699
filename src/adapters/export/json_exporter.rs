//! JSON Report Exporter
//!
//! Writes the whole report, including PSA samples, as one pretty-printed
//! JSON document.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::domain::evaluation::EvaluationReport;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::ReportExporter;

/// Exports a report to a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonReportExporter {
    path: PathBuf,
}

impl JsonReportExporter {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn export_error(&self, err: impl std::fmt::Display) -> DomainError {
        DomainError::new(
            ErrorCode::ExportFailed,
            format!("Failed to write {}: {}", self.path.display(), err),
        )
        .with_detail("path", self.path.display().to_string())
    }
}

impl ReportExporter for JsonReportExporter {
    fn export(&self, report: &EvaluationReport) -> Result<(), DomainError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.export_error(e))?;
        }

        let json = serde_json::to_string_pretty(report).map_err(|e| self.export_error(e))?;
        fs::write(&self.path, json).map_err(|e| self.export_error(e))?;

        info!(
            evaluation_id = %report.id,
            path = %self.path.display(),
            "Exported report as JSON"
        );
        Ok(())
    }
}
