//! Report exporters.

mod csv_exporter;
mod in_memory;
mod json_exporter;

pub use csv_exporter::{
    CsvReportExporter, CEAC_FILE, DOMINATED_FILE, EXTENDED_FILE, PLANE_FILE, RAW_FILE, STRICT_FILE,
};
pub use in_memory::InMemoryReportExporter;
pub use json_exporter::JsonReportExporter;
