//! Query state machine and record rendering.
//!
//! ```text
//!            submit                 delay elapsed
//!   Idle ───────────▶ Loading ─────────────────────▶ Resolved
//!     ▲                 ▲  │ blank input                  │
//!     │ reset           │  ▼                              │
//!     └──────────── Errored ◀─────────────────────────────┘
//!                    (any state may submit again)
//! ```
//!
//! The simulated latency is modelled as a [`PendingQuery`] with a due instant.
//! Only one query can be pending: a new submission (or a reset) cancels the
//! previous ticket, so a slower, older query can never overwrite a newer result.

use std::time::{Duration, Instant};

use super::phone::{format_phone, is_dialable, tel_uri};
use super::view::{CallTarget, StatusLine, ViewPort};
use crate::error::{QueryError, ViewError};
use crate::lookup::normalize_identifier;
use crate::models::ContactRecord;

pub const DEFAULT_QUERY_DELAY: Duration = Duration::from_millis(300);

pub const BUTTON_LABEL: &str = "Query";
pub const BUSY_LABEL: &str = "Querying...";
pub const READY_HEADLINE: &str = "Scan-to-move ready";
pub const READY_DETAIL: &str = "Enter a vehicle ID and press Enter";
pub const RESET_HEADLINE: &str = "Enter a new vehicle ID";
pub const WAITING_HEADLINE: &str = "Waiting for a vehicle ID";
pub const NOTE_FALLBACK: &str = "Temporary parking, sorry for the inconvenience";
pub const OWNER_FALLBACK: &str = "Unknown";
pub const VEHICLE_FALLBACK: &str = "Unknown vehicle";
const OWNER_LABEL_FALLBACK: &str = "Owner";
const BACKUP_LABEL: &str = "Backup";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryState {
    Idle,
    Loading,
    Resolved,
    Errored,
}

/// Identifies one submission; later submissions get larger tickets
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QueryTicket(u64);

/// A submitted query waiting for its delay to elapse
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingQuery {
    pub ticket: QueryTicket,
    pub identifier: String,
    pub due: Instant,
}

/// Log a failed view write and carry on
fn paint(result: Result<(), ViewError>) {
    if let Err(e) = result {
        tracing::warn!(error = %e, "skipping render");
    }
}

fn or_fallback<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() { fallback } else { value }
}

/// Dialable numbers of a record in display order: primary, then backup
pub fn call_targets(record: &ContactRecord) -> Vec<CallTarget> {
    let owner_label = or_fallback(&record.owner_name, OWNER_LABEL_FALLBACK);
    [(owner_label, &record.primary_phone), (BACKUP_LABEL, &record.secondary_phone)]
        .into_iter()
        .filter(|(_, number)| is_dialable(number))
        .map(|(label, number)| {
            let number = number.trim();
            CallTarget {
                label: format!("{} - {}", label, format_phone(number)),
                number: number.to_string(),
                uri: tel_uri(number),
            }
        })
        .collect()
}

#[derive(Debug)]
pub struct DisplayController {
    state: QueryState,
    current_identifier: Option<String>,
    last_record: Option<ContactRecord>,
    suggestions_visible: bool,
    pending: Option<PendingQuery>,
    next_ticket: u64,
    delay: Duration,
}

impl DisplayController {
    pub fn new(delay: Duration) -> Self {
        Self {
            state: QueryState::Idle,
            current_identifier: None,
            last_record: None,
            suggestions_visible: false,
            pending: None,
            next_ticket: 0,
            delay,
        }
    }

    pub fn state(&self) -> QueryState {
        self.state
    }

    pub fn current_identifier(&self) -> Option<&str> {
        self.current_identifier.as_deref()
    }

    pub fn last_record(&self) -> Option<&ContactRecord> {
        self.last_record.as_ref()
    }

    pub fn suggestions_visible(&self) -> bool {
        self.suggestions_visible
    }

    pub fn pending(&self) -> Option<&PendingQuery> {
        self.pending.as_ref()
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Initial screen: ready message and an enabled query button
    pub fn show_ready(&mut self, view: &mut dyn ViewPort) {
        paint(view.set_status(StatusLine::online(READY_HEADLINE, Some(READY_DETAIL.to_string()))));
        paint(view.set_query_button(true, BUTTON_LABEL));
        paint(view.set_details_visible(false));
        paint(view.focus_input());
    }

    /// Validate input and schedule the lookup.
    ///
    /// Blank input moves to `Errored` without scheduling anything; it also
    /// cancels a query that is still pending so the error stays on screen.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::EmptyInput`] when `raw_input` is blank after trimming.
    pub fn submit_query(
        &mut self,
        raw_input: &str,
        now: Instant,
        view: &mut dyn ViewPort,
    ) -> Result<QueryTicket, QueryError> {
        let identifier = normalize_identifier(raw_input);
        if identifier.is_empty() {
            self.cancel_pending();
            paint(view.set_query_button(true, BUTTON_LABEL));
            self.show_error(&QueryError::EmptyInput.to_string(), view);
            paint(view.focus_input());
            return Err(QueryError::EmptyInput);
        }

        if let Some(previous) = self.pending.take() {
            tracing::debug!(identifier = %previous.identifier, "pending query superseded");
        }

        self.next_ticket += 1;
        let ticket = QueryTicket(self.next_ticket);
        self.pending = Some(PendingQuery { ticket, identifier, due: now + self.delay });
        self.state = QueryState::Loading;
        paint(view.set_query_button(false, BUSY_LABEL));

        Ok(ticket)
    }

    /// Remove and return the pending query once its delay has elapsed
    pub fn take_due(&mut self, now: Instant) -> Option<PendingQuery> {
        if self.pending.as_ref().is_some_and(|p| now >= p.due) { self.pending.take() } else { None }
    }

    /// Remove and return the pending query regardless of its delay
    pub fn take_pending(&mut self) -> Option<PendingQuery> {
        self.pending.take()
    }

    pub fn cancel_pending(&mut self) -> Option<QueryTicket> {
        let cancelled = self.pending.take().map(|p| p.ticket);
        if let Some(ticket) = cancelled {
            tracing::debug!(?ticket, "pending query cancelled");
        }
        cancelled
    }

    /// Finish a lookup: render the record and leave `Loading`
    pub fn complete(&mut self, identifier: &str, record: &ContactRecord, view: &mut dyn ViewPort) {
        self.render(identifier, record, view);
        self.state = QueryState::Resolved;
        paint(view.set_query_button(true, BUTTON_LABEL));
        self.hide_suggestions(view);
    }

    /// Write a record into the view
    pub fn render(&mut self, identifier: &str, record: &ContactRecord, view: &mut dyn ViewPort) {
        let note = or_fallback(&record.note, NOTE_FALLBACK);
        paint(view.clear_error());
        paint(view.set_status(StatusLine::online(
            format!("Current vehicle: {}", identifier),
            Some(note.to_string()),
        )));
        paint(view.pulse_status());

        paint(view.set_owner(or_fallback(&record.owner_name, OWNER_FALLBACK)));
        paint(view.set_vehicle(or_fallback(&record.vehicle_description, VEHICLE_FALLBACK)));
        paint(view.set_details_visible(true));

        paint(view.clear_call_targets());
        for target in call_targets(record) {
            paint(view.add_call_target(target));
        }

        self.current_identifier = Some(identifier.to_string());
        self.last_record = Some(record.clone());
    }

    /// Replace the error region content and re-trigger its attention effect
    pub fn show_error(&mut self, message: &str, view: &mut dyn ViewPort) {
        self.state = QueryState::Errored;
        paint(view.show_error(message));
        paint(view.set_error_attention(false));
        paint(view.set_error_attention(true));
        paint(view.set_status(StatusLine {
            online: false,
            headline: WAITING_HEADLINE.to_string(),
            detail: None,
        }));
        paint(view.clear_call_targets());
        paint(view.set_details_visible(false));
    }

    /// Back to `Idle`: input and detail panel cleared, pending query dropped
    pub fn reset(&mut self, view: &mut dyn ViewPort) {
        self.cancel_pending();
        self.state = QueryState::Idle;
        self.last_record = None;

        paint(view.set_input(""));
        paint(view.focus_input());
        paint(view.set_query_button(true, BUTTON_LABEL));
        paint(view.clear_error());
        paint(view.set_status(StatusLine::online(RESET_HEADLINE, None)));
        paint(view.set_owner(""));
        paint(view.set_vehicle(""));
        paint(view.set_details_visible(false));
        paint(view.clear_call_targets());
        self.hide_suggestions(view);
    }

    pub fn show_suggestions(&mut self, ids: &[String], view: &mut dyn ViewPort) {
        if ids.is_empty() {
            self.hide_suggestions(view);
        } else {
            self.suggestions_visible = true;
            paint(view.show_suggestions(ids));
        }
    }

    pub fn hide_suggestions(&mut self, view: &mut dyn ViewPort) {
        self.suggestions_visible = false;
        paint(view.hide_suggestions());
    }
}
