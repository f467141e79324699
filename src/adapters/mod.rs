//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to the filesystem:
//! - `table` - Alternative table sources (JSON/YAML/CSV files, in-memory)
//! - `export` - Report exporters (CSV directory, JSON file, in-memory)

pub mod export;
pub mod table;

pub use export::{CsvReportExporter, InMemoryReportExporter, JsonReportExporter};
pub use table::{FileAlternativeSource, InMemoryAlternativeSource, TableFormat};
