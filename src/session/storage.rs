use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::error::StorageError;

pub const SESSION_FILENAME: &str = "session.json";

/// String key-value storage (the `localStorage` contract)
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory store for tests and one-shot runs
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store persisted as a JSON object in `<state_dir>/session.json`
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Open (or create) the session file in `state_dir`.
    ///
    /// The file is re-read on every access, so writes from other processes
    /// (a CLI query while the interactive screen is open) are picked up. A
    /// corrupt session file is logged and replaced by an empty session on the
    /// next write.
    ///
    /// # Errors
    ///
    /// Returns an error if the state directory cannot be created or the session
    /// file exists but cannot be read.
    pub fn open(state_dir: &Path) -> Result<Self> {
        if !state_dir.exists() {
            fs::create_dir_all(state_dir).with_context(|| {
                format!("Failed to create state directory: {}", state_dir.display())
            })?;
        }

        let store = Self { path: state_dir.join(SESSION_FILENAME) };
        store
            .read_values()
            .with_context(|| format!("Failed to read session file: {}", store.path.display()))?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_values(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_str(&content) {
            Ok(values) => Ok(values),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "session file is corrupt, starting empty");
                Ok(BTreeMap::new())
            }
        }
    }

    /// Write the whole map atomically (temp file + rename)
    fn write_values(&self, values: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(values)
            .map_err(|source| StorageError::Encode { key: SESSION_FILENAME.to_string(), source })?;
        let temp = self.path.with_extension("json.tmp");
        fs::write(&temp, json)?;
        fs::rename(&temp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_values()?.remove(key))
    }

    /// Read-modify-write of the current file; keys written by other processes survive
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = self.read_values()?;
        values.insert(key.to_string(), value.to_string());
        self.write_values(&values)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_memory_store_get_set() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);

        store.set("k", "v1").unwrap();
        store.set("k", "v2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v2"));
    }

    #[test]
    fn test_file_store_persists_across_opens() {
        let dir = TempDir::new().unwrap();

        let mut store = FileStore::open(dir.path()).unwrap();
        store.set("last_vehicle_id", "A123B4").unwrap();
        drop(store);

        let reopened = FileStore::open(dir.path()).unwrap();
        assert_eq!(reopened.get("last_vehicle_id").unwrap().as_deref(), Some("A123B4"));
    }

    #[test]
    fn test_file_store_creates_missing_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");

        let mut store = FileStore::open(&nested).unwrap();
        store.set("k", "v").unwrap();

        assert!(nested.join(SESSION_FILENAME).exists());
        assert!(!nested.join("session.json.tmp").exists());
    }

    #[test]
    fn test_file_store_corrupt_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(SESSION_FILENAME), "{not json").unwrap();

        let mut store = FileStore::open(dir.path()).unwrap();
        assert_eq!(store.get("last_vehicle_id").unwrap(), None);

        // Next write replaces the corrupt content
        store.set("k", "v").unwrap();
        let content = fs::read_to_string(dir.path().join(SESSION_FILENAME)).unwrap();
        let parsed: BTreeMap<String, String> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.get("k").map(String::as_str), Some("v"));
    }

    #[test]
    fn test_file_store_sees_writes_from_another_handle() {
        let dir = TempDir::new().unwrap();
        let mut long_lived = FileStore::open(dir.path()).unwrap();
        let mut other = FileStore::open(dir.path()).unwrap();

        other.set("last_vehicle_id", "B777X8").unwrap();
        assert_eq!(long_lived.get("last_vehicle_id").unwrap().as_deref(), Some("B777X8"));

        // A write through one handle keeps keys written through the other
        other.set("query_history", "[]").unwrap();
        long_lived.set("last_vehicle_id", "C888D9").unwrap();
        assert_eq!(other.get("query_history").unwrap().as_deref(), Some("[]"));
        assert_eq!(other.get("last_vehicle_id").unwrap().as_deref(), Some("C888D9"));
    }
}
