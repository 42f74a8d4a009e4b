use std::collections::HashMap;

use crate::lookup::normalize_identifier;
use crate::models::{ContactRecord, StoreMeta};

/// Reserved key of the fallback record
pub const DEFAULT_KEY: &str = "DEFAULT";

/// Identifier → record table with a fallback record
///
/// Immutable once built. Identifiers are kept both in a map for lookup and
/// in a sorted list that feeds the suggestion engine.
#[derive(Debug, Clone)]
pub struct RecordStore {
    records: HashMap<String, ContactRecord>,
    default_record: ContactRecord,
    meta: StoreMeta,
    ids: Vec<String>,
}

impl RecordStore {
    /// Build a store from raw `(identifier, record)` pairs.
    ///
    /// Identifiers are normalized; a later duplicate replaces an earlier one.
    /// `meta.total` is overwritten with the number of distinct identifiers.
    pub fn new<I>(records: I, default_record: ContactRecord, mut meta: StoreMeta) -> Self
    where
        I: IntoIterator<Item = (String, ContactRecord)>,
    {
        let mut map = HashMap::new();
        for (raw_id, record) in records {
            let id = normalize_identifier(&raw_id);
            if id.is_empty() || id == DEFAULT_KEY {
                tracing::warn!(identifier = %raw_id, "skipping reserved or empty identifier");
                continue;
            }
            if map.insert(id.clone(), record).is_some() {
                tracing::warn!(identifier = %id, "duplicate identifier in record data, keeping the last one");
            }
        }

        let mut ids: Vec<String> = map.keys().cloned().collect();
        ids.sort();
        meta.total = ids.len();

        Self { records: map, default_record, meta, ids }
    }

    /// Exact lookup by an already-normalized identifier
    pub fn get(&self, id: &str) -> Option<&ContactRecord> {
        self.records.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }

    pub fn default_record(&self) -> &ContactRecord {
        &self.default_record
    }

    pub fn meta(&self) -> &StoreMeta {
        &self.meta
    }

    /// All identifiers, sorted lexicographically
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
