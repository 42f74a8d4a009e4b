//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use scan_move::{
    MemoryStore, PanelView, QuerySystem, RecordStore, SessionPersistence, SystemOptions,
};
use serde_json::{Map, Value, json};
use tempfile::TempDir;

/// Fixed clock used by the in-memory systems: 2024-07-12 12:00:00
pub fn noon() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 7, 12).unwrap().and_hms_opt(12, 0, 0).unwrap()
}

/// Query system over the bundled data set and an in-memory session
pub fn memory_system(options: SystemOptions) -> QuerySystem<MemoryStore, PanelView> {
    QuerySystem::new(
        Arc::new(RecordStore::builtin().expect("bundled data set loads")),
        SessionPersistence::with_clock(MemoryStore::new(), noon),
        PanelView::new(),
        options,
    )
}

/// Builder for a temporary state directory plus an optional data file
pub struct WorkspaceBuilder {
    temp_dir: TempDir,
    records: Map<String, Value>,
    session: Option<String>,
}

impl WorkspaceBuilder {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir, records: Map::new(), session: None }
    }

    /// Add a record as `[phone1, phone2, owner, vehicle, note]`
    pub fn with_record(mut self, id: &str, fields: [&str; 5]) -> Self {
        self.records.insert(id.to_string(), json!(fields));
        self
    }

    pub fn with_default(self, fields: [&str; 5]) -> Self {
        self.with_record("DEFAULT", fields)
    }

    pub fn with_meta(mut self, version: &str, updated: &str) -> Self {
        self.records
            .insert("_meta".to_string(), json!({ "version": version, "updated": updated, "total": 0 }));
        self
    }

    /// Raw `session.json` content
    pub fn with_session(mut self, content: &str) -> Self {
        self.session = Some(content.to_string());
        self
    }

    pub fn build(self) -> Workspace {
        let state_dir = self.temp_dir.path().join("state");
        fs::create_dir_all(&state_dir).expect("Failed to create state dir");
        if let Some(content) = &self.session {
            fs::write(state_dir.join("session.json"), content).expect("Failed to write session");
        }

        let data_file = if self.records.is_empty() {
            None
        } else {
            let path = self.temp_dir.path().join("vehicles.json");
            let content = serde_json::to_string_pretty(&Value::Object(self.records))
                .expect("Failed to encode records");
            fs::write(&path, content).expect("Failed to write data file");
            Some(path)
        };

        Workspace { temp_dir: self.temp_dir, state_dir, data_file }
    }
}

impl Default for WorkspaceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Workspace {
    temp_dir: TempDir,
    pub state_dir: PathBuf,
    pub data_file: Option<PathBuf>,
}

impl Workspace {
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn session_file(&self) -> PathBuf {
        self.state_dir.join("session.json")
    }

    pub fn read_session(&self) -> Value {
        let content = fs::read_to_string(self.session_file()).expect("session file exists");
        serde_json::from_str(&content).expect("session file is JSON")
    }
}
