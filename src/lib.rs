//! Scan-to-move - find who to call to move a parked vehicle
//!
//! A vehicle carries a code pointing at a page address with its identifier.
//! Looking the identifier up yields the owner's contact record, rendered as a
//! detail panel with dialable `tel:` targets. This library provides:
//!
//! - Loading the record data set (bundled, or a JSON file)
//! - Case-insensitive lookup with a `DEFAULT` fallback record
//! - Identifier suggestions while typing
//! - A display controller writing into an injected [`ViewPort`]
//! - Session persistence of the last identifier and a bounded query history
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use scan_move::{MemoryStore, PanelView, QuerySystem, RecordStore, SessionPersistence, SystemOptions};
//!
//! let store = Arc::new(RecordStore::builtin()?);
//! let session = SessionPersistence::new(MemoryStore::new());
//! let mut system = QuerySystem::new(store, session, PanelView::new(), SystemOptions::default());
//!
//! let outcome = system.query_now("test01")?;
//! assert_eq!(outcome.identifier, "TEST01");
//! assert_eq!(system.view().call_targets[0].uri, "tel:15555555555");
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod clipboard;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod lookup;
pub mod models;
pub mod session;
pub mod store;
pub mod suggest;
pub mod system;
pub mod tui;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use display::{CallTarget, DisplayController, PanelView, QueryState, ViewPort, format_phone};
pub use error::{AddressError, QueryError, StorageError, ViewError};
pub use lookup::{normalize_identifier, resolve};
pub use models::{ContactRecord, QueryHistoryEntry};
pub use session::{FileStore, KeyValueStore, MemoryStore, PageAddress, SessionPersistence};
pub use store::{RecordStore, load_store};
pub use suggest::{MatchMode, suggest};
pub use system::{QueryOutcome, QuerySystem, SystemOptions};
