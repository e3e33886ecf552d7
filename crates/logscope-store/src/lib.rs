//! Record store for logscope
//!
//! This crate provides the in-memory, atomically replaceable
//! collection of parsed log records.

mod store;

pub use store::{LogStore, StoreSnapshot};

// Re-export types used in our public API
pub use logscope_types::{LogRecord, RecordId};
