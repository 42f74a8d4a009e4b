//! Data models for the vehicle lookup.
//!
//! - [`ContactRecord`] - one owner/vehicle entry, always a full 5-tuple
//! - [`StoreMeta`] - version block shipped with the record data file
//! - [`QueryHistoryEntry`] - one persisted query, as stored under `query_history`
//!
//! Records deserialize from the data file's positional array form
//! (`[phone1, phone2, owner, vehicle, note]`) and serialize as named fields.

pub mod history;
pub mod record;

pub use history::QueryHistoryEntry;
pub use record::{ContactRecord, StoreMeta};
