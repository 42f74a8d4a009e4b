//! Rendering of query results into an injected [`ViewPort`]
//!
//! The controller never touches a concrete UI. It writes into named slots
//! (owner, vehicle, call targets, error region, ...) and logs, rather than
//! fails, when a slot is missing. [`PanelView`] is the in-memory view used by
//! the terminal UI, the CLI and the tests.

pub mod controller;
pub mod phone;
pub mod view;

pub use controller::{
    DEFAULT_QUERY_DELAY, DisplayController, NOTE_FALLBACK, PendingQuery, QueryState, QueryTicket,
    call_targets,
};
pub use phone::{format_phone, is_dialable, tel_uri};
pub use view::{CallTarget, PanelView, Stats, StatusLine, ViewPort};
