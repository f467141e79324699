//! File-based Alternative Source Adapter
//!
//! Reads the alternatives table from a JSON, YAML or CSV file. The format is
//! picked from the file extension.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::evaluation::{Alternative, AlternativeTable};
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::AlternativeSource;

/// Serialization format of a table file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Json,
    Yaml,
    Csv,
}

impl TableFormat {
    /// Picks the format from the extension; unknown extensions read as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => TableFormat::Yaml,
            Some("csv") => TableFormat::Csv,
            _ => TableFormat::Json,
        }
    }
}

/// Loads alternatives from a file on disk.
///
/// JSON and YAML files hold a list of objects with `id`, `cost`, `effect` and
/// optional `cost_sd`/`effect_sd`. CSV files use the same names as headers.
#[derive(Debug, Clone)]
pub struct FileAlternativeSource {
    path: PathBuf,
    format: TableFormat,
}

impl FileAlternativeSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let format = TableFormat::from_path(&path);
        Self { path, format }
    }

    /// Overrides the extension-based format.
    pub fn with_format(mut self, format: TableFormat) -> Self {
        self.format = format;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parse(&self, content: &str) -> Result<Vec<Alternative>, DomainError> {
        match self.format {
            TableFormat::Json => serde_json::from_str(content).map_err(|e| self.parse_error(e)),
            TableFormat::Yaml => serde_yaml::from_str(content).map_err(|e| self.parse_error(e)),
            TableFormat::Csv => {
                let mut reader = csv::ReaderBuilder::new()
                    .has_headers(true)
                    .trim(csv::Trim::All)
                    .from_reader(content.as_bytes());
                reader
                    .deserialize()
                    .collect::<Result<Vec<Alternative>, _>>()
                    .map_err(|e| self.parse_error(e))
            }
        }
    }

    fn parse_error(&self, err: impl std::fmt::Display) -> DomainError {
        DomainError::new(
            ErrorCode::ParseError,
            format!("Failed to parse alternatives table: {}", err),
        )
        .with_detail("path", self.path.display().to_string())
    }
}

impl AlternativeSource for FileAlternativeSource {
    fn load(&self) -> Result<AlternativeTable, DomainError> {
        let content = fs::read_to_string(&self.path).map_err(|e| {
            DomainError::new(
                ErrorCode::SourceUnavailable,
                format!("Failed to read alternatives table: {}", e),
            )
            .with_detail("path", self.path.display().to_string())
        })?;

        let alternatives = self.parse(&content)?;
        debug!(
            path = %self.path.display(),
            format = ?self.format,
            rows = alternatives.len(),
            "Read alternatives table"
        );

        Ok(AlternativeTable::new(alternatives)?)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Format detection
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn format_follows_extension() {
        assert_eq!(TableFormat::from_path(Path::new("t.json")), TableFormat::Json);
        assert_eq!(TableFormat::from_path(Path::new("t.YML")), TableFormat::Yaml);
        assert_eq!(TableFormat::from_path(Path::new("t.yaml")), TableFormat::Yaml);
        assert_eq!(TableFormat::from_path(Path::new("t.csv")), TableFormat::Csv);
        assert_eq!(TableFormat::from_path(Path::new("table")), TableFormat::Json);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Loading
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn loads_json_with_optional_sd() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "alts.json",
            r#"[
                {"id": "A", "cost": 0, "effect": 0},
                {"id": "B", "cost": 10000, "effect": 0.4, "cost_sd": 500, "effect_sd": 0.05}
            ]"#,
        );

        let table = FileAlternativeSource::new(&path).load().unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.alternatives()[0].cost_sd, 0.0);
        assert_eq!(table.alternatives()[1].effect_sd, 0.05);
    }

    #[test]
    fn loads_yaml_with_qaly_alias() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "alts.yaml",
            "- id: A\n  cost: 0\n  qalys: 1.0\n- id: B\n  cost: 500\n  qalys: 1.5\n  qaly_sd: 0.1\n",
        );

        let table = FileAlternativeSource::new(&path).load().unwrap();
        assert_eq!(table.alternatives()[1].effect, 1.5);
        assert_eq!(table.alternatives()[1].effect_sd, 0.1);
    }

    #[test]
    fn loads_csv_with_headers() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "alts.csv",
            "id,cost,effect,cost_sd,effect_sd\nA,0,0,0,0\nB, 10000 ,0.4,500,0.05\n",
        );

        let table = FileAlternativeSource::new(&path).load().unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.alternatives()[1].cost, 10000.0);
    }

    #[test]
    fn blank_csv_sd_cells_read_as_zero() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "alts.csv",
            "id,cost,cost_sd,effect,effect_sd\nA,0,,0,\nB,10000, ,0.4,0.05\n",
        );

        let table = FileAlternativeSource::new(&path).load().unwrap();
        assert!(table.alternatives()[0].is_point_estimate());
        assert_eq!(table.alternatives()[1].cost_sd, 0.0);
        assert_eq!(table.alternatives()[1].effect_sd, 0.05);
    }

    #[test]
    fn null_json_sd_reads_as_zero() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "alts.json",
            r#"[{"id": "A", "cost": 0, "effect": 0, "cost_sd": null, "effect_sd": null}]"#,
        );

        let table = FileAlternativeSource::new(&path).load().unwrap();
        assert_eq!(table.alternatives()[0].cost_sd, 0.0);
        assert_eq!(table.alternatives()[0].effect_sd, 0.0);
    }

    #[test]
    fn missing_file_is_source_unavailable() {
        let dir = TempDir::new().unwrap();
        let source = FileAlternativeSource::new(dir.path().join("nope.json"));
        let err = source.load().unwrap_err();
        assert_eq!(err.code, ErrorCode::SourceUnavailable);
    }

    #[test]
    fn malformed_content_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "alts.json", "{not json");
        let err = FileAlternativeSource::new(&path).load().unwrap_err();
        assert_eq!(err.code, ErrorCode::ParseError);
        assert!(err.details.contains_key("path"));
    }

    #[test]
    fn negative_values_fail_validation() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "alts.json", r#"[{"id": "A", "cost": -1, "effect": 0}]"#);
        let err = FileAlternativeSource::new(&path).load().unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.details.get("field").map(String::as_str), Some("cost"));
    }

    #[test]
    fn explicit_format_overrides_extension() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "alts.txt", "id,cost,effect\nA,1,1\n");
        let table = FileAlternativeSource::new(&path)
            .with_format(TableFormat::Csv)
            .load()
            .unwrap();
        assert_eq!(table.len(), 1);
    }
}
