//! Plain-text and JSON rendering of query results for the terminal.
//!
//! Every string that came from the data file or the session file goes through
//! [`sanitize_for_terminal`] before it is printed.

use std::fmt::Write;

use serde::Serialize;

use crate::display::{CallTarget, PanelView};
use crate::models::QueryHistoryEntry;
use crate::system::QueryOutcome;
use crate::utils::sanitize_for_terminal;

/// Machine-readable form of a completed query (`query --json`)
#[derive(Debug, Serialize)]
pub struct QueryReport<'a> {
    pub id: &'a str,
    pub registered: bool,
    pub owner: &'a str,
    pub vehicle: &'a str,
    pub note: &'a str,
    pub call_targets: &'a [CallTarget],
    pub address: &'a str,
}

impl<'a> QueryReport<'a> {
    pub fn new(outcome: &'a QueryOutcome, view: &'a PanelView) -> Self {
        Self {
            id: &outcome.identifier,
            registered: outcome.registered,
            owner: &view.owner,
            vehicle: &view.vehicle,
            note: view.status.detail.as_deref().unwrap_or_default(),
            call_targets: &view.call_targets,
            address: &outcome.address,
        }
    }
}

/// Text rendering of the detail panel after a query
pub fn format_panel(view: &PanelView) -> String {
    let mut out = String::new();
    let clean = sanitize_for_terminal;

    let _ = writeln!(out, "{}", clean(&view.status.headline));
    if let Some(detail) = &view.status.detail {
        let _ = writeln!(out, "  {}", clean(detail));
    }

    if view.details_visible {
        let _ = writeln!(out);
        let _ = writeln!(out, "Owner:   {}", clean(&view.owner));
        let _ = writeln!(out, "Vehicle: {}", clean(&view.vehicle));
    }

    if !view.call_targets.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Call:");
        for (idx, target) in view.call_targets.iter().enumerate() {
            let _ = writeln!(out, "  [{}] {}  {}", idx + 1, clean(&target.label), clean(&target.uri));
        }
    } else if view.details_visible {
        let _ = writeln!(out);
        let _ = writeln!(out, "No dialable number on file");
    }

    if let Some(address) = &view.address {
        let _ = writeln!(out);
        let _ = writeln!(out, "Link: {}", clean(address));
    }

    out
}

/// Newest-first listing of at most `limit` history entries
pub fn format_history(history: &[QueryHistoryEntry], limit: usize) -> String {
    if history.is_empty() {
        return "No queries recorded\n".to_string();
    }

    let mut out = String::new();
    for entry in history.iter().rev().take(limit) {
        let _ = writeln!(
            out,
            "{} {}  {}",
            sanitize_for_terminal(&entry.queried_at_date),
            sanitize_for_terminal(&entry.queried_at_time),
            sanitize_for_terminal(&entry.identifier)
        );
    }
    out
}
