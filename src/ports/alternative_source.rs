//! AlternativeSource port for loading the alternatives table

use crate::domain::evaluation::AlternativeTable;
use crate::domain::foundation::DomainError;

/// Supplies the alternatives table for an evaluation run.
///
/// Implementations validate every row before returning: a table handed back
/// by `load` carries no negative or non-finite values.
pub trait AlternativeSource: Send + Sync {
    /// Load the table.
    ///
    /// # Errors
    ///
    /// - `SourceUnavailable` if the underlying storage cannot be read
    /// - `ParseError` if the content is malformed
    /// - `ValidationFailed` if a row holds a negative or non-finite value
    fn load(&self) -> Result<AlternativeTable, DomainError>;

    /// Human-readable origin, used in log fields.
    fn describe(&self) -> String;
}
