use thiserror::Error;

use logscope_types::{LogRecord, parse_timestamp};

/// Field delimiter for input lines
pub const FIELD_DELIMITER: char = '\t';

/// Fields in a well-formed line: timestamp, level, component, message
const FIELD_COUNT: usize = 4;

/// Reason a line was rejected
///
/// Rejections never propagate past the loader; they are counted and
/// logged there.
#[derive(Debug, Error)]
pub enum LineRejection {
    #[error("expected 4 tab-separated fields, found {0}")]
    FieldCount(usize),

    #[error("empty {0} field")]
    EmptyField(&'static str),

    #[error("bad timestamp: {0}")]
    Timestamp(#[from] chrono::ParseError),
}

/// Line parser for the tab-delimited log format
pub struct LineParser;

impl LineParser {
    /// Parse one raw line into a record
    ///
    /// Lines are `TIMESTAMP\tLEVEL\tCOMPONENT\tMESSAGE` with the
    /// timestamp in `YYYY-MM-DD HH:MM:SS` form. Parsing is
    /// all-or-nothing: a rejected line produces no record. Each
    /// accepted line gets a freshly minted id.
    pub fn parse(line: &str) -> Result<LogRecord, LineRejection> {
        let fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();
        if fields.len() != FIELD_COUNT {
            return Err(LineRejection::FieldCount(fields.len()));
        }

        let timestamp = parse_timestamp(fields[0])?;
        if fields[1].is_empty() {
            return Err(LineRejection::EmptyField("level"));
        }
        if fields[2].is_empty() {
            return Err(LineRejection::EmptyField("component"));
        }

        Ok(LogRecord::new(
            timestamp,
            fields[1].to_string(),
            fields[2].to_string(),
            fields[3].to_string(),
        ))
    }
}
