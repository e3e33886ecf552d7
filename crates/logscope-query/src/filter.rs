use chrono::NaiveDateTime;

use logscope_types::{LogRecord, parse_timestamp};

use crate::QueryError;

/// Compiled filter for log records
///
/// Absent predicates impose no constraint; present ones compose with
/// logical AND. Level and component are exact, case-sensitive matches;
/// time bounds are inclusive on both ends.
#[derive(Clone, Debug, Default)]
pub struct RecordFilter {
    /// Exact level to match
    level: Option<String>,

    /// Exact component to match
    component: Option<String>,

    /// Lower timestamp bound, inclusive
    start: Option<NaiveDateTime>,

    /// Upper timestamp bound, inclusive
    end: Option<NaiveDateTime>,
}

impl RecordFilter {
    /// Filter with no constraints (matches everything)
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a filter from raw query parameters
    ///
    /// Time bounds are validated up front: a malformed bound fails the
    /// whole call before any filtering happens.
    pub fn from_params(
        level: Option<&str>,
        component: Option<&str>,
        start: Option<&str>,
        end: Option<&str>,
    ) -> Result<Self, QueryError> {
        let mut filter = Self::new();
        if let Some(level) = level {
            filter = filter.with_level(level);
        }
        if let Some(component) = component {
            filter = filter.with_component(component);
        }
        if let Some(start) = start {
            filter = filter.since(parse_bound(start)?);
        }
        if let Some(end) = end {
            filter = filter.until(parse_bound(end)?);
        }
        Ok(filter)
    }

    /// Require an exact level match
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    /// Require an exact component match
    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    /// Require `timestamp >= start`
    pub fn since(mut self, start: NaiveDateTime) -> Self {
        self.start = Some(start);
        self
    }

    /// Require `timestamp <= end`
    pub fn until(mut self, end: NaiveDateTime) -> Self {
        self.end = Some(end);
        self
    }

    /// Check if a record satisfies every present predicate
    pub fn matches(&self, record: &LogRecord) -> bool {
        if let Some(level) = &self.level {
            if record.level != *level {
                return false;
            }
        }
        if let Some(component) = &self.component {
            if record.component != *component {
                return false;
            }
        }
        if let Some(start) = self.start {
            if record.timestamp < start {
                return false;
            }
        }
        if let Some(end) = self.end {
            if record.timestamp > end {
                return false;
            }
        }
        true
    }

    /// Check if the filter is empty (matches everything)
    pub fn is_empty(&self) -> bool {
        self.level.is_none()
            && self.component.is_none()
            && self.start.is_none()
            && self.end.is_none()
    }
}

fn parse_bound(value: &str) -> Result<NaiveDateTime, QueryError> {
    parse_timestamp(value).map_err(|_| QueryError::InvalidTimeBound {
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(ts: &str, level: &str, component: &str) -> LogRecord {
        LogRecord::new(
            parse_timestamp(ts).unwrap(),
            level.to_string(),
            component.to_string(),
            String::new(),
        )
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = RecordFilter::new();
        assert!(filter.is_empty());
        assert!(filter.matches(&record("2024-01-01 10:00:00", "ERROR", "auth")));
    }

    #[test]
    fn test_level_match_is_exact_and_case_sensitive() {
        let filter = RecordFilter::new().with_level("ERROR");
        assert!(filter.matches(&record("2024-01-01 10:00:00", "ERROR", "auth")));
        assert!(!filter.matches(&record("2024-01-01 10:00:00", "error", "auth")));
        assert!(!filter.matches(&record("2024-01-01 10:00:00", "ERR", "auth")));
    }

    #[test]
    fn test_component_match_is_exact() {
        let filter = RecordFilter::new().with_component("auth");
        assert!(filter.matches(&record("2024-01-01 10:00:00", "INFO", "auth")));
        assert!(!filter.matches(&record("2024-01-01 10:00:00", "INFO", "db")));
    }

    #[test]
    fn test_time_bounds_are_inclusive() {
        let start = parse_timestamp("2024-01-01 10:00:00").unwrap();
        let end = parse_timestamp("2024-01-01 11:00:00").unwrap();
        let filter = RecordFilter::new().since(start).until(end);

        assert!(filter.matches(&record("2024-01-01 10:00:00", "INFO", "auth")));
        assert!(filter.matches(&record("2024-01-01 11:00:00", "INFO", "auth")));
        assert!(filter.matches(&record("2024-01-01 10:30:00", "INFO", "auth")));
        assert!(!filter.matches(&record("2024-01-01 09:59:59", "INFO", "auth")));
        assert!(!filter.matches(&record("2024-01-01 11:00:01", "INFO", "auth")));
    }

    #[test]
    fn test_predicates_compose_with_and() {
        let filter = RecordFilter::new()
            .with_level("ERROR")
            .with_component("auth");
        assert!(filter.matches(&record("2024-01-01 10:00:00", "ERROR", "auth")));
        assert!(!filter.matches(&record("2024-01-01 10:00:00", "ERROR", "db")));
        assert!(!filter.matches(&record("2024-01-01 10:00:00", "INFO", "auth")));
    }

    #[test]
    fn test_from_params_validates_time_bounds() {
        let err = RecordFilter::from_params(None, None, Some("yesterday"), None).unwrap_err();
        assert!(matches!(err, QueryError::InvalidTimeBound { value } if value == "yesterday"));

        let err =
            RecordFilter::from_params(None, None, None, Some("2024-01-01T10:00:00")).unwrap_err();
        assert!(matches!(err, QueryError::InvalidTimeBound { .. }));
    }

    #[test]
    fn test_from_params_builds_full_filter() {
        let filter = RecordFilter::from_params(
            Some("ERROR"),
            Some("auth"),
            Some("2024-01-01 10:00:00"),
            Some("2024-01-01 11:00:00"),
        )
        .unwrap();
        assert!(!filter.is_empty());
        assert!(filter.matches(&record("2024-01-01 10:30:00", "ERROR", "auth")));
        assert!(!filter.matches(&record("2024-01-01 12:00:00", "ERROR", "auth")));
    }
}
