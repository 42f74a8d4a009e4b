//! Per-user session state: last identifier, query history and the shareable address
//!
//! Storage follows the browser `localStorage` model: a flat map of string keys
//! to string values behind [`KeyValueStore`]. [`FileStore`] keeps that map in
//! `session.json` inside the state directory and rewrites it atomically
//! (temp file + rename) on every change.
//!
//! Keys:
//! - `last_vehicle_id`: the most recently queried identifier
//! - `query_history`: JSON array of `{id, date, time}`, capped at 50 entries
//!
//! Reads never fail the caller: a missing or corrupt value is logged and
//! treated as empty.

pub mod address;
pub mod persistence;
pub mod storage;

pub use address::PageAddress;
pub use persistence::{
    Clock, HISTORY_KEY, LAST_ID_KEY, MAX_HISTORY, SessionPersistence, SystemClock,
};
pub use storage::{FileStore, KeyValueStore, MemoryStore, SESSION_FILENAME};
