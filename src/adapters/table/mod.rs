//! Alternative table sources.

mod file_source;
mod in_memory;

pub use file_source::{FileAlternativeSource, TableFormat};
pub use in_memory::InMemoryAlternativeSource;
