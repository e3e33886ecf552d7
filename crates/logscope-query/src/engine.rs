use std::collections::HashMap;

use serde::Serialize;

use logscope_store::LogStore;
use logscope_types::{LogRecord, RecordId};

use crate::{QueryError, RecordFilter};

/// Aggregate counts over the current store contents
///
/// The maps cover exactly the distinct values present; absent
/// categories get no zero entries.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct LogStats {
    pub total_logs: usize,
    pub counts_per_level: HashMap<String, usize>,
    pub counts_per_component: HashMap<String, usize>,
}

/// Read-side query operations over a [`LogStore`]
#[derive(Clone)]
pub struct QueryEngine {
    store: LogStore,
}

impl QueryEngine {
    /// Create an engine over a store handle
    pub fn new(store: LogStore) -> Self {
        Self { store }
    }

    /// Records matching the filter, in store iteration order
    ///
    /// Each call scans one snapshot; a concurrent `replace` does not
    /// affect an in-flight query.
    pub fn filter(&self, filter: &RecordFilter) -> Vec<LogRecord> {
        self.store
            .snapshot()
            .records()
            .iter()
            .filter(|record| filter.matches(record))
            .cloned()
            .collect()
    }

    /// Aggregate counts, unfiltered
    pub fn stats(&self) -> LogStats {
        let snapshot = self.store.snapshot();
        let mut stats = LogStats {
            total_logs: snapshot.len(),
            ..LogStats::default()
        };
        for record in snapshot.records() {
            *stats
                .counts_per_level
                .entry(record.level.clone())
                .or_insert(0) += 1;
            *stats
                .counts_per_component
                .entry(record.component.clone())
                .or_insert(0) += 1;
        }
        stats
    }

    /// Point lookup by id string
    ///
    /// Ids are opaque at this boundary: a string that is not a valid
    /// identifier is treated the same as one that was never issued.
    pub fn find_by_id(&self, id: &str) -> Result<LogRecord, QueryError> {
        RecordId::parse(id)
            .and_then(|id| self.store.by_id(id))
            .ok_or_else(|| QueryError::NotFound { id: id.to_string() })
    }
}
