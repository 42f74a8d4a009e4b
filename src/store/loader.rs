use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use serde_json::{Map, Value};

use super::record_store::{DEFAULT_KEY, RecordStore};
use crate::models::{ContactRecord, StoreMeta};
use crate::utils::validate_file_size;

const META_KEY: &str = "_meta";

/// Record data compiled into the binary, used when no data file is configured
const BUILTIN_DATA: &str = include_str!("../../data/vehicles.json");

impl RecordStore {
    /// Store built from the bundled data set
    pub fn builtin() -> Result<Self> {
        parse_store(BUILTIN_DATA).context("Bundled record data is invalid")
    }
}

/// Load a record data file from disk
///
/// # Errors
///
/// Returns an error if the file cannot be read, is larger than 10MB, is not a
/// JSON object, has no `DEFAULT` record, or contains a malformed record.
pub fn load_store(path: &Path) -> Result<RecordStore> {
    let mut file = File::open(path)
        .with_context(|| format!("Failed to open record data file: {}", path.display()))?;
    validate_file_size(&file, path)?;

    let mut content = String::new();
    file.read_to_string(&mut content)
        .with_context(|| format!("Failed to read record data file: {}", path.display()))?;

    let store = parse_store(&content)
        .with_context(|| format!("Invalid record data file: {}", path.display()))?;
    tracing::debug!(path = %path.display(), total = store.len(), "loaded record data");
    Ok(store)
}

/// Parse record data from a JSON string
pub fn parse_store(json: &str) -> Result<RecordStore> {
    let root: Map<String, Value> =
        serde_json::from_str(json).context("Record data must be a JSON object")?;

    let mut default_record = None;
    let mut meta = StoreMeta::default();
    let mut records = Vec::with_capacity(root.len());

    for (key, value) in root {
        if key == META_KEY {
            meta = serde_json::from_value(value).context("Failed to parse _meta block")?;
            continue;
        }
        if key.starts_with('_') {
            tracing::debug!(key = %key, "ignoring reserved key in record data");
            continue;
        }

        let record: ContactRecord = serde_json::from_value(value)
            .map_err(|e| anyhow!("Malformed record for '{}': {}", key, e))?;

        if key == DEFAULT_KEY {
            default_record = Some(record);
        } else {
            records.push((key, record));
        }
    }

    let Some(default_record) = default_record else {
        bail!("Record data has no {} record", DEFAULT_KEY);
    };

    Ok(RecordStore::new(records, default_record, meta))
}
