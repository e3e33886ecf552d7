use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use logscope_types::{LogRecord, RecordId};

/// Immutable view of the store contents at one point in time
///
/// Built once per `replace`; readers iterate a snapshot without holding
/// any lock, so a concurrent swap never tears an in-flight scan.
#[derive(Debug, Default)]
pub struct StoreSnapshot {
    /// Records in load order
    records: Vec<LogRecord>,

    /// Index from id to position in `records`
    by_id: HashMap<RecordId, usize>,
}

impl StoreSnapshot {
    fn new(records: Vec<LogRecord>) -> Self {
        let by_id = records
            .iter()
            .enumerate()
            .map(|(idx, record)| (record.id, idx))
            .collect();
        Self { records, by_id }
    }

    /// Records in load order
    pub fn records(&self) -> &[LogRecord] {
        &self.records
    }

    /// Look up a record by id
    pub fn get(&self, id: RecordId) -> Option<&LogRecord> {
        self.by_id.get(&id).map(|&idx| &self.records[idx])
    }

    /// Record count
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the snapshot is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Thread-safe record store
///
/// Cloning yields another handle to the same underlying store. Writes
/// go through [`LogStore::replace`], which publishes a complete new
/// snapshot: readers observe either the old set or the new one, never
/// a partial mix.
#[derive(Clone, Default)]
pub struct LogStore {
    current: Arc<RwLock<Arc<StoreSnapshot>>>,
}

impl LogStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically swap the entire contents
    pub fn replace(&self, records: Vec<LogRecord>) {
        let snapshot = Arc::new(StoreSnapshot::new(records));
        *self.current.write() = snapshot;
    }

    /// Current snapshot of the contents
    pub fn snapshot(&self) -> Arc<StoreSnapshot> {
        self.current.read().clone()
    }

    /// All records in load order (cloned for the caller)
    pub fn all(&self) -> Vec<LogRecord> {
        self.snapshot().records().to_vec()
    }

    /// Look up a record by id
    pub fn by_id(&self, id: RecordId) -> Option<LogRecord> {
        self.snapshot().get(id).cloned()
    }

    /// Total record count
    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }

    /// Drop all records
    pub fn clear(&self) {
        self.replace(Vec::new());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logscope_types::parse_timestamp;

    fn record(ts: &str, level: &str, component: &str, message: &str) -> LogRecord {
        LogRecord::new(
            parse_timestamp(ts).unwrap(),
            level.to_string(),
            component.to_string(),
            message.to_string(),
        )
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = LogStore::new();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
        assert!(store.all().is_empty());
    }

    #[test]
    fn test_replace_preserves_load_order() {
        let store = LogStore::new();
        let records = vec![
            record("2024-01-01 10:00:00", "ERROR", "auth", "login failed"),
            record("2024-01-01 09:00:00", "INFO", "db", "connected"),
            record("2024-01-01 11:00:00", "INFO", "auth", "login ok"),
        ];
        store.replace(records.clone());
        assert_eq!(store.all(), records);
    }

    #[test]
    fn test_by_id_hit_and_miss() {
        let store = LogStore::new();
        let rec = record("2024-01-01 10:00:00", "ERROR", "auth", "login failed");
        let id = rec.id;
        store.replace(vec![rec.clone()]);

        assert_eq!(store.by_id(id), Some(rec));
        assert_eq!(store.by_id(RecordId::new()), None);
    }

    #[test]
    fn test_replace_swaps_complete_contents() {
        let store = LogStore::new();
        let first = record("2024-01-01 10:00:00", "ERROR", "auth", "one");
        let first_id = first.id;
        store.replace(vec![first]);

        let second = record("2024-01-02 10:00:00", "INFO", "db", "two");
        let second_id = second.id;
        store.replace(vec![second]);

        assert_eq!(store.len(), 1);
        assert_eq!(store.by_id(first_id), None);
        assert!(store.by_id(second_id).is_some());
    }

    #[test]
    fn test_snapshot_is_isolated_from_replace() {
        let store = LogStore::new();
        store.replace(vec![record("2024-01-01 10:00:00", "ERROR", "auth", "one")]);

        let snapshot = store.snapshot();
        store.replace(Vec::new());

        // The reader that took the snapshot still sees the old set
        assert_eq!(snapshot.len(), 1);
        assert!(store.is_empty());
    }

    #[test]
    fn test_cloned_handle_shares_contents() {
        let store = LogStore::new();
        let other = store.clone();
        store.replace(vec![record("2024-01-01 10:00:00", "INFO", "auth", "ok")]);
        assert_eq!(other.len(), 1);
    }

    #[test]
    fn test_clear_empties_store() {
        let store = LogStore::new();
        store.replace(vec![record("2024-01-01 10:00:00", "INFO", "auth", "ok")]);
        store.clear();
        assert!(store.is_empty());
    }
}
