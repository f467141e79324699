//! CSV Report Exporter
//!
//! Writes one CSV file per derived table into an output directory:
//!
//! | File | Columns |
//! |------|---------|
//! | `incremental_raw.csv` | alternative_id, cost, effect, delta_cost, delta_effect, ICER or ICUR |
//! | `incremental_strict.csv` | same |
//! | `incremental_extended.csv` | same |
//! | `dominated.csv` | alternative_id, kind, explanation |
//! | `plane.csv` | alternative_id, delta_effect, delta_cost, quadrant, cost_effective |
//! | `ceac.csv` | threshold, probability, best_alternative_id |
//!
//! Reference rows leave the delta and ratio cells empty. Undefined ratios are
//! written as `undefined`.

use std::fs;
use std::path::{Path, PathBuf};

use csv::{Writer, WriterBuilder};
use tracing::info;

use crate::domain::evaluation::{
    AcceptabilityCurve, DominatedAlternative, EvaluationKind, EvaluationReport, IncrementalTable,
    PlanePoint,
};
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::ReportExporter;

pub const RAW_FILE: &str = "incremental_raw.csv";
pub const STRICT_FILE: &str = "incremental_strict.csv";
pub const EXTENDED_FILE: &str = "incremental_extended.csv";
pub const DOMINATED_FILE: &str = "dominated.csv";
pub const PLANE_FILE: &str = "plane.csv";
pub const CEAC_FILE: &str = "ceac.csv";

/// Exports a report as a directory of CSV tables.
#[derive(Debug, Clone)]
pub struct CsvReportExporter {
    output_dir: PathBuf,
}

impl CsvReportExporter {
    pub fn new<P: AsRef<Path>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn open(&self, file: &str) -> Result<Writer<fs::File>, DomainError> {
        let path = self.output_dir.join(file);
        WriterBuilder::new()
            .has_headers(false)
            .from_path(&path)
            .map_err(|e| export_error(&path, e))
    }

    fn write_incremental(
        &self,
        file: &str,
        table: &IncrementalTable,
        kind: EvaluationKind,
    ) -> Result<(), DomainError> {
        let path = self.output_dir.join(file);
        let mut wtr = self.open(file)?;
        wtr.write_record([
            "alternative_id",
            "cost",
            "effect",
            "delta_cost",
            "delta_effect",
            kind.ratio_label(),
        ])
        .map_err(|e| export_error(&path, e))?;

        for row in table.rows() {
            let alternative = &row.alternative;
            wtr.write_record([
                alternative.id.clone(),
                alternative.cost.to_string(),
                alternative.effect.to_string(),
                optional_cell(row.delta_cost()),
                optional_cell(row.delta_effect()),
                row.ratio().map(|r| r.to_string()).unwrap_or_default(),
            ])
            .map_err(|e| export_error(&path, e))?;
        }

        wtr.flush().map_err(|e| export_error(&path, e))
    }

    fn write_dominated(&self, dominated: &[DominatedAlternative]) -> Result<(), DomainError> {
        let path = self.output_dir.join(DOMINATED_FILE);
        let mut wtr = self.open(DOMINATED_FILE)?;
        wtr.write_record(["alternative_id", "kind", "explanation"])
            .map_err(|e| export_error(&path, e))?;
        for d in dominated {
            wtr.write_record([d.alternative_id.as_str(), d.kind.label(), d.explanation.as_str()])
                .map_err(|e| export_error(&path, e))?;
        }
        wtr.flush().map_err(|e| export_error(&path, e))
    }

    fn write_plane(&self, plane: &[PlanePoint]) -> Result<(), DomainError> {
        let path = self.output_dir.join(PLANE_FILE);
        let mut wtr = self.open(PLANE_FILE)?;
        wtr.write_record([
            "alternative_id",
            "delta_effect",
            "delta_cost",
            "quadrant",
            "cost_effective",
        ])
        .map_err(|e| export_error(&path, e))?;
        for point in plane {
            wtr.write_record([
                point.alternative_id.clone(),
                point.delta_effect.to_string(),
                point.delta_cost.to_string(),
                point.quadrant.label().to_string(),
                point.cost_effective.to_string(),
            ])
            .map_err(|e| export_error(&path, e))?;
        }
        wtr.flush().map_err(|e| export_error(&path, e))
    }

    fn write_ceac(&self, curve: &AcceptabilityCurve) -> Result<(), DomainError> {
        let path = self.output_dir.join(CEAC_FILE);
        let mut wtr = self.open(CEAC_FILE)?;
        wtr.write_record(["threshold", "probability", "best_alternative_id"])
            .map_err(|e| export_error(&path, e))?;
        for point in curve.points() {
            wtr.write_record([
                point.threshold.to_string(),
                point.probability.value().to_string(),
                point.best_alternative_id.clone().unwrap_or_default(),
            ])
            .map_err(|e| export_error(&path, e))?;
        }
        wtr.flush().map_err(|e| export_error(&path, e))
    }
}

impl ReportExporter for CsvReportExporter {
    fn export(&self, report: &EvaluationReport) -> Result<(), DomainError> {
        fs::create_dir_all(&self.output_dir).map_err(|e| export_error(&self.output_dir, e))?;

        let kind = report.kind();
        let views = &report.dominance;
        self.write_incremental(RAW_FILE, &views.raw, kind)?;
        self.write_incremental(STRICT_FILE, &views.strict_pruned, kind)?;
        self.write_incremental(EXTENDED_FILE, &views.extended_pruned, kind)?;
        self.write_dominated(&views.dominated)?;
        self.write_plane(&report.plane)?;
        self.write_ceac(&report.ceac)?;

        info!(
            evaluation_id = %report.id,
            output_dir = %self.output_dir.display(),
            "Exported report as CSV"
        );
        Ok(())
    }
}

fn optional_cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn export_error(path: &Path, err: impl std::fmt::Display) -> DomainError {
    DomainError::new(
        ErrorCode::ExportFailed,
        format!("Failed to write {}: {}", path.display(), err),
    )
    .with_detail("path", path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::evaluation::{evaluate, AlternativeTable, EvaluationSettings};
    use tempfile::TempDir;

    fn report(kind: EvaluationKind) -> EvaluationReport {
        let table = AlternativeTable::builder()
            .alternative("A", 0.0, 0.0)
            .alternative("B", 10000.0, 0.4)
            .alternative("C", 22000.0, 0.55)
            .alternative("D", 15000.0, 0.3)
            .build()
            .unwrap();
        evaluate(
            &table,
            EvaluationSettings {
                kind,
                iterations: 100,
                resolution: 5,
                seed: Some(1),
                ..Default::default()
            },
        )
        .unwrap()
    }

    fn read(dir: &Path, file: &str) -> Vec<String> {
        fs::read_to_string(dir.join(file))
            .unwrap()
            .lines()
            .map(String::from)
            .collect()
    }

    #[test]
    fn writes_every_table() {
        let dir = TempDir::new().unwrap();
        CsvReportExporter::new(dir.path())
            .export(&report(EvaluationKind::CostEffectiveness))
            .unwrap();

        for file in [RAW_FILE, STRICT_FILE, EXTENDED_FILE, DOMINATED_FILE, PLANE_FILE, CEAC_FILE] {
            assert!(dir.path().join(file).exists(), "{} missing", file);
        }
    }

    #[test]
    fn header_carries_ratio_label() {
        let dir = TempDir::new().unwrap();
        CsvReportExporter::new(dir.path())
            .export(&report(EvaluationKind::CostUtility))
            .unwrap();

        let lines = read(dir.path(), RAW_FILE);
        assert_eq!(lines[0], "alternative_id,cost,effect,delta_cost,delta_effect,ICUR");
    }

    #[test]
    fn reference_row_is_blank_and_undefined_is_marked() {
        let dir = TempDir::new().unwrap();
        CsvReportExporter::new(dir.path())
            .export(&report(EvaluationKind::CostEffectiveness))
            .unwrap();

        let lines = read(dir.path(), RAW_FILE);
        assert_eq!(lines[1], "A,0,0,,,");
        // D follows B in cost order with less effect
        assert!(lines[3].starts_with("D,15000,0.3,5000,"));
        assert!(lines[3].ends_with(",undefined"));
    }

    #[test]
    fn dominated_rows_list_kind() {
        let dir = TempDir::new().unwrap();
        CsvReportExporter::new(dir.path())
            .export(&report(EvaluationKind::CostEffectiveness))
            .unwrap();

        let lines = read(dir.path(), DOMINATED_FILE);
        assert_eq!(lines[0], "alternative_id,kind,explanation");
        assert!(lines[1].starts_with("D,strict,"));
    }

    #[test]
    fn plane_rows_follow_header() {
        let dir = TempDir::new().unwrap();
        CsvReportExporter::new(dir.path())
            .export(&report(EvaluationKind::CostEffectiveness))
            .unwrap();

        let lines = read(dir.path(), PLANE_FILE);
        assert_eq!(
            lines[0],
            "alternative_id,delta_effect,delta_cost,quadrant,cost_effective"
        );
        assert_eq!(lines.len(), 1 + 3);
        assert!(lines[1].starts_with("B,0.4,10000,north_east,"));
    }

    #[test]
    fn ceac_has_one_row_per_threshold() {
        let dir = TempDir::new().unwrap();
        CsvReportExporter::new(dir.path())
            .export(&report(EvaluationKind::CostEffectiveness))
            .unwrap();

        let lines = read(dir.path(), CEAC_FILE);
        assert_eq!(lines.len(), 1 + 5);
        assert!(lines[1].starts_with("0,"));
    }

    #[test]
    fn creates_missing_output_dir() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        CsvReportExporter::new(&nested)
            .export(&report(EvaluationKind::CostEffectiveness))
            .unwrap();
        assert!(nested.join(CEAC_FILE).exists());
    }
}
