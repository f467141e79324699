//! In-Memory Alternative Source Adapter
//!
//! Hands out a fixed table. Useful for testing and embedding.

use crate::domain::evaluation::AlternativeTable;
use crate::domain::foundation::DomainError;
use crate::ports::AlternativeSource;

/// Source backed by an already validated table.
#[derive(Debug, Clone)]
pub struct InMemoryAlternativeSource {
    table: AlternativeTable,
}

impl InMemoryAlternativeSource {
    pub fn new(table: AlternativeTable) -> Self {
        Self { table }
    }
}

impl AlternativeSource for InMemoryAlternativeSource {
    fn load(&self) -> Result<AlternativeTable, DomainError> {
        Ok(self.table.clone())
    }

    fn describe(&self) -> String {
        format!("in-memory table ({} rows)", self.table.len())
    }
}
