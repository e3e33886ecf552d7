//! File ingestion for logscope
//!
//! This crate discovers log files in a directory, parses each line
//! into a typed record, and loads the accepted records into the record
//! store in one atomic pass.

mod loader;
mod parser;

pub use loader::{IngestError, LoadSummary, LoadedBatch, Loader};
pub use parser::{FIELD_DELIMITER, LineParser, LineRejection};

// Re-export types used in our public API
pub use logscope_types::LogRecord;
