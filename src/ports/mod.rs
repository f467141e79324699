//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `AlternativeSource` - Where the alternatives table comes from
//! - `ReportExporter` - Where a finished report goes

mod alternative_source;
mod report_exporter;

pub use alternative_source::AlternativeSource;
pub use report_exporter::ReportExporter;
