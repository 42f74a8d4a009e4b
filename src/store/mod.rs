//! Read-only record table loaded once at start-up
//!
//! # Data file format
//!
//! A JSON object mapping identifiers to positional records, plus two reserved keys:
//!
//! ```json
//! {
//!     "A123B4": ["13900000001", "13900000002", "Owner", "Black sedan", "Weekdays"],
//!     "DEFAULT": ["15305316666", "18753118888", "Admin", "Unknown car", "ID not registered"],
//!     "_meta": { "version": "2.0", "updated": "2024-07-12", "total": 0 }
//! }
//! ```
//!
//! - Identifiers are upper-cased on load, so lookups are case-insensitive
//! - `DEFAULT` is required and is returned for every unknown identifier
//! - Other keys starting with `_` are ignored
//! - `_meta.total` is recomputed from the records that were actually loaded

pub mod loader;
pub mod record_store;

pub use loader::{load_store, parse_store};
pub use record_store::{DEFAULT_KEY, RecordStore};
