//! Application context tying the store, session and view together.
//!
//! [`QuerySystem`] is created once per run and receives every input event:
//! typing, submitting, picking a suggestion, resetting, and the periodic
//! [`QuerySystem::tick`] that completes a delayed query.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::display::{
    CallTarget, DEFAULT_QUERY_DELAY, DisplayController, QueryState, QueryTicket, Stats, ViewPort,
    call_targets,
};
use crate::error::QueryError;
use crate::lookup::resolve;
use crate::models::ContactRecord;
use crate::session::{KeyValueStore, PageAddress, SessionPersistence};
use crate::store::RecordStore;
use crate::suggest::{DEFAULT_SUGGESTION_LIMIT, MatchMode, suggest_with_mode};

/// Longest input accepted from the keyboard
const MAX_INPUT_CHARS: usize = 64;

/// Behavior knobs for a [`QuerySystem`]
#[derive(Debug, Clone)]
pub struct SystemOptions {
    pub delay: Duration,
    pub suggestion_limit: usize,
    pub match_mode: MatchMode,
    /// Query the initial identifier immediately instead of only pre-filling it
    pub auto_query: bool,
    /// Page address the session started from
    pub address: PageAddress,
}

impl Default for SystemOptions {
    fn default() -> Self {
        Self {
            delay: DEFAULT_QUERY_DELAY,
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
            match_mode: MatchMode::Symmetric,
            auto_query: false,
            address: PageAddress::parse(crate::config::DEFAULT_BASE_URL)
                .expect("default base URL is a valid page address"),
        }
    }
}

/// Outcome of a completed lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOutcome {
    pub ticket: QueryTicket,
    pub identifier: String,
    pub record: ContactRecord,
    /// False when the identifier is unknown and the `DEFAULT` record was used
    pub registered: bool,
    pub address: String,
}

pub struct QuerySystem<S, V> {
    store: Arc<RecordStore>,
    session: SessionPersistence<S>,
    view: V,
    controller: DisplayController,
    options: SystemOptions,
    input: String,
}

impl<S: KeyValueStore, V: ViewPort> QuerySystem<S, V> {
    pub fn new(
        store: Arc<RecordStore>,
        session: SessionPersistence<S>,
        view: V,
        options: SystemOptions,
    ) -> Self {
        let controller = DisplayController::new(options.delay);
        Self { store, session, view, controller, options, input: String::new() }
    }

    /// Page-ready wiring: stats, ready message, and the initial identifier.
    ///
    /// The identifier in the address wins over the last stored one. It is only
    /// pre-filled unless `auto_query` is set.
    pub fn bootstrap(&mut self, now: Instant) {
        self.refresh_stats();
        self.controller.show_ready(&mut self.view);

        let initial =
            self.options.address.identifier().or_else(|| self.session.load_last_identifier());
        if let Some(id) = initial {
            tracing::debug!(identifier = %id, "pre-filling initial identifier");
            self.set_input_silently(&id);
            if self.options.auto_query {
                let _ = self.submit(now);
            }
        }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn session(&self) -> &SessionPersistence<S> {
        &self.session
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn controller(&self) -> &DisplayController {
        &self.controller
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn state(&self) -> QueryState {
        self.controller.state()
    }

    pub fn current_identifier(&self) -> Option<&str> {
        self.controller.current_identifier()
    }

    /// Replace the input text and refresh suggestions
    pub fn set_input(&mut self, text: &str) {
        self.set_input_silently(text);
        self.refresh_suggestions();
    }

    pub fn push_char(&mut self, c: char) {
        if self.input.chars().count() < MAX_INPUT_CHARS {
            self.input.push(c);
            self.sync_input();
            self.refresh_suggestions();
        }
    }

    pub fn pop_char(&mut self) {
        if self.input.pop().is_some() {
            self.sync_input();
            self.refresh_suggestions();
        }
    }

    fn set_input_silently(&mut self, text: &str) {
        self.input = text.chars().take(MAX_INPUT_CHARS).collect();
        self.sync_input();
    }

    fn sync_input(&mut self) {
        if let Err(e) = self.view.set_input(&self.input) {
            tracing::warn!(error = %e, "skipping render");
        }
    }

    /// Suggestions for the current input
    pub fn suggestions(&self) -> Vec<String> {
        suggest_with_mode(
            &self.input,
            self.store.ids(),
            self.options.suggestion_limit,
            self.options.match_mode,
        )
    }

    fn refresh_suggestions(&mut self) {
        let matches = self.suggestions();
        self.controller.show_suggestions(&matches, &mut self.view);
    }

    /// Submit the current input
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::EmptyInput`] for blank input; the error is already
    /// shown in the view when this returns.
    pub fn submit(&mut self, now: Instant) -> Result<QueryTicket, QueryError> {
        let input = self.input.clone();
        self.controller.submit_query(&input, now, &mut self.view)
    }

    /// Put a suggested identifier in the input and submit it
    pub fn select_suggestion(&mut self, id: &str, now: Instant) -> Result<QueryTicket, QueryError> {
        self.set_input_silently(id);
        self.controller.hide_suggestions(&mut self.view);
        self.submit(now)
    }

    /// Complete the pending query if its delay has elapsed
    pub fn tick(&mut self, now: Instant) -> Option<QueryOutcome> {
        let pending = self.controller.take_due(now)?;
        Some(self.complete(pending.ticket, pending.identifier))
    }

    /// Complete the pending query without waiting for its delay
    pub fn flush(&mut self) -> Option<QueryOutcome> {
        let pending = self.controller.take_pending()?;
        Some(self.complete(pending.ticket, pending.identifier))
    }

    /// Submit `raw_input` and complete it immediately (one-shot use)
    pub fn query_now(&mut self, raw_input: &str) -> Result<QueryOutcome, QueryError> {
        self.set_input_silently(raw_input);
        self.submit(Instant::now())?;
        // submit() always leaves a pending query on success
        self.flush().ok_or(QueryError::EmptyInput)
    }

    /// When the pending query (if any) is due; lets an event loop sleep precisely
    pub fn next_deadline(&self) -> Option<Instant> {
        self.controller.pending().map(|p| p.due)
    }

    fn complete(&mut self, ticket: QueryTicket, identifier: String) -> QueryOutcome {
        let registered = self.store.contains(&identifier);
        let record = resolve(&self.store, &identifier).clone();
        self.controller.complete(&identifier, &record, &mut self.view);

        if let Err(e) = self.session.record_query(&identifier) {
            tracing::warn!(identifier = %identifier, error = %e, "failed to persist query");
        }

        let address = self.options.address.with_identifier(&identifier);
        self.options.address = address.clone();
        let address = address.to_string();
        if let Err(e) = self.view.set_address(&address) {
            tracing::warn!(error = %e, "skipping render");
        }
        self.refresh_stats();

        tracing::info!(identifier = %identifier, registered, "query resolved");
        QueryOutcome { ticket, identifier, record, registered, address }
    }

    /// Back to the initial state
    pub fn reset(&mut self) {
        self.input.clear();
        self.controller.reset(&mut self.view);
    }

    /// Activate the call target at `index`; returns it when there is a current vehicle
    pub fn activate_call(&mut self, index: usize) -> Option<CallTarget> {
        let Some(identifier) = self.controller.current_identifier().map(str::to_string) else {
            if let Err(e) = self.view.focus_input() {
                tracing::warn!(error = %e, "skipping render");
            }
            return None;
        };
        let record = self.controller.last_record()?;
        let target = call_targets(record).into_iter().nth(index)?;

        tracing::info!(identifier = %identifier, slot = index + 1, uri = %target.uri, "call placed");
        Some(target)
    }

    pub fn stats(&self) -> Stats {
        let meta = self.store.meta();
        Stats {
            version: meta.version.clone(),
            vehicle_count: meta.total,
            queries_today: self.session.count_queries_today(),
        }
    }

    fn refresh_stats(&mut self) {
        let stats = self.stats();
        if let Err(e) = self.view.set_stats(&stats) {
            tracing::warn!(error = %e, "skipping render");
        }
    }
}
