//! Shared types for logscope
//!
//! This crate contains the record model and timestamp handling used
//! across the logscope crates.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ============================================================================
// Timestamps
// ============================================================================

/// Wire format for record timestamps: second precision, no timezone
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a timestamp in the wire format
///
/// Strict: trailing input after the seconds field is an error.
pub fn parse_timestamp(s: &str) -> chrono::ParseResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
}

/// Format a timestamp in the wire format
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

// ============================================================================
// Records
// ============================================================================

/// Process-unique record identifier
///
/// Minted from a random v4 UUID when a line is parsed. Identifiers are
/// not stable across reloads: loading the same files twice produces the
/// same content under fresh ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Mint a fresh identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identifier from its hyphenated string form
    pub fn parse(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(Self)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A single parsed log line
///
/// Immutable once created; the store only hands out clones.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogRecord {
    /// Process-unique identifier
    pub id: RecordId,

    /// Event time, second precision, no timezone
    pub timestamp: NaiveDateTime,

    /// Severity label, case-sensitive, not normalized
    pub level: String,

    /// Emitting subsystem
    pub component: String,

    /// Free-text remainder of the line, may be empty
    pub message: String,
}

impl LogRecord {
    /// Create a record with a freshly minted id
    pub fn new(
        timestamp: NaiveDateTime,
        level: String,
        component: String,
        message: String,
    ) -> Self {
        Self {
            id: RecordId::new(),
            timestamp,
            level,
            component,
            message,
        }
    }
}

/// Serialization-facing view of a record
///
/// All fields are strings; the timestamp is rendered in the wire
/// format.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RecordView {
    pub id: String,
    pub timestamp: String,
    pub level: String,
    pub component: String,
    pub message: String,
}

impl From<&LogRecord> for RecordView {
    fn from(record: &LogRecord) -> Self {
        Self {
            id: record.id.to_string(),
            timestamp: format_timestamp(&record.timestamp),
            level: record.level.clone(),
            component: record.component.clone(),
            message: record.message.clone(),
        }
    }
}
