//! Interactive lookup screen state and event loop.
//!
//! [`App`] owns a [`QuerySystem`] rendering into a [`PanelView`] and drives it
//! from keyboard events. The loop wakes at least every 100ms, and earlier when
//! a delayed query is due, so [`QuerySystem::tick`] completes lookups on time.

use std::time::{Duration, Instant};

use anyhow::Result;
use ratatui::Terminal;
use ratatui::backend::Backend;

use super::events::{Action, poll_event};
use super::rendering::{RenderState, render_ui};
use crate::clipboard::{ClipboardProvider, copy_call_target, copy_to_clipboard};
use crate::display::{CallTarget, PanelView};
use crate::session::KeyValueStore;
use crate::system::QuerySystem;

/// Duration for success status messages (milliseconds)
const STATUS_SUCCESS_DURATION_MS: u64 = 3000;
/// Duration for error status messages (milliseconds)
const STATUS_ERROR_DURATION_MS: u64 = 5000;
/// Longest wait between redraws and event polls
const FRAME_INTERVAL: Duration = Duration::from_millis(100);

/// Type of status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Success,
    Error,
}

/// Transient status message with expiry
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub message_type: MessageType,
    pub expires_at: Instant,
}

pub struct App<S> {
    system: QuerySystem<S, PanelView>,
    selected_suggestion: Option<usize>,
    should_quit: bool,
    status_message: Option<StatusMessage>,
    /// Injected clipboard; the system clipboard is opened on demand when unset
    clipboard: Option<Box<dyn ClipboardProvider>>,
    needs_redraw: bool,
    last_draw_time: Instant,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(system: QuerySystem<S, PanelView>) -> Self {
        Self {
            system,
            selected_suggestion: None,
            should_quit: false,
            status_message: None,
            clipboard: None,
            needs_redraw: true,
            last_draw_time: Instant::now(),
        }
    }

    pub fn with_clipboard(mut self, clipboard: Box<dyn ClipboardProvider>) -> Self {
        self.clipboard = Some(clipboard);
        self
    }

    pub fn system(&self) -> &QuerySystem<S, PanelView> {
        &self.system
    }

    /// Set a transient status message with automatic expiry
    fn set_status(&mut self, text: impl Into<String>, message_type: MessageType, duration_ms: u64) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            message_type,
            expires_at: Instant::now() + Duration::from_millis(duration_ms),
        });
        self.needs_redraw = true;
    }

    fn clear_expired_status(&mut self, now: Instant) {
        if self.status_message.as_ref().is_some_and(|msg| now >= msg.expires_at) {
            self.status_message = None;
            self.needs_redraw = true;
        }
    }

    /// Complete a due query; true when one completed
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.system.tick(now) {
            Some(_) => {
                self.selected_suggestion = None;
                self.needs_redraw = true;
                true
            }
            None => false,
        }
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        self.system.bootstrap(Instant::now());

        while !self.should_quit {
            let now = Instant::now();
            self.tick(now);
            self.clear_expired_status(now);

            // Redraw periodically as well: pulse and attention effects fade with time
            if self.needs_redraw || now.duration_since(self.last_draw_time) >= FRAME_INTERVAL {
                terminal.draw(|f| {
                    let state = RenderState {
                        view: self.system.view(),
                        selected_suggestion: self.selected_suggestion,
                        status_message: self.status_message.as_ref(),
                        now,
                    };
                    render_ui(f, &state);
                })?;
                self.needs_redraw = false;
                self.last_draw_time = now;
            }

            let timeout = self
                .system
                .next_deadline()
                .map_or(FRAME_INTERVAL, |due| due.saturating_duration_since(now).min(FRAME_INTERVAL));
            let action = poll_event(timeout)?;
            self.handle_action(action, Instant::now());
        }

        Ok(())
    }

    fn visible_suggestions(&self) -> &[String] {
        let view = self.system.view();
        if view.suggestions_visible { &view.suggestions } else { &[] }
    }

    /// Handle a user action (extracted for testing)
    fn handle_action(&mut self, action: Action, now: Instant) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::Reset => {
                self.selected_suggestion = None;
                self.system.reset();
            }
            Action::Submit => {
                let selected = self
                    .selected_suggestion
                    .and_then(|idx| self.visible_suggestions().get(idx).cloned());
                self.selected_suggestion = None;
                // Blank input is reported in the view itself
                let _ = match selected {
                    Some(id) => self.system.select_suggestion(&id, now),
                    None => self.system.submit(now),
                };
            }
            Action::AcceptSuggestion => {
                let idx = self.selected_suggestion.unwrap_or(0);
                if let Some(id) = self.visible_suggestions().get(idx).cloned() {
                    self.selected_suggestion = None;
                    let _ = self.system.select_suggestion(&id, now);
                }
            }
            Action::MoveUp => {
                self.selected_suggestion = match self.selected_suggestion {
                    Some(0) | None => None,
                    Some(idx) => Some(idx - 1),
                };
            }
            Action::MoveDown => {
                let count = self.visible_suggestions().len();
                if count > 0 {
                    self.selected_suggestion = Some(match self.selected_suggestion {
                        None => 0,
                        Some(idx) => (idx + 1).min(count - 1),
                    });
                }
            }
            Action::Call(index) => self.call(index),
            Action::InsertChar(c) => {
                self.selected_suggestion = None;
                self.system.push_char(c);
            }
            Action::DeleteChar => {
                self.selected_suggestion = None;
                self.system.pop_char();
            }
            Action::None => return,
        }
        self.needs_redraw = true;
    }

    fn call(&mut self, index: usize) {
        let Some(target) = self.system.activate_call(index) else {
            self.set_status("No number to copy", MessageType::Error, STATUS_ERROR_DURATION_MS);
            return;
        };

        match self.copy_number(&target) {
            Ok(()) => self.set_status(
                format!("Copied {} ({})", target.number, target.uri),
                MessageType::Success,
                STATUS_SUCCESS_DURATION_MS,
            ),
            Err(e) => {
                tracing::warn!(error = %e, "clipboard copy failed");
                self.set_status(
                    format!("Dial {} ({})", target.number, e),
                    MessageType::Error,
                    STATUS_ERROR_DURATION_MS,
                );
            }
        }
    }

    fn copy_number(&mut self, target: &CallTarget) -> Result<()> {
        match self.clipboard.as_deref_mut() {
            Some(provider) => copy_call_target(target, provider),
            None => copy_to_clipboard(target),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::Arc;

    use chrono::{NaiveDate, NaiveDateTime};
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::display::QueryState;
    use crate::session::{MemoryStore, SessionPersistence};
    use crate::store::RecordStore;
    use crate::system::SystemOptions;

    #[derive(Clone, Default)]
    struct MockClipboard {
        copied: Rc<RefCell<Vec<String>>>,
    }

    impl ClipboardProvider for MockClipboard {
        fn set_text(&mut self, text: &str) -> Result<()> {
            self.copied.borrow_mut().push(text.to_string());
            Ok(())
        }
    }

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 7, 12).unwrap().and_hms_opt(12, 0, 0).unwrap()
    }

    fn app() -> (App<MemoryStore>, MockClipboard) {
        let system = QuerySystem::new(
            Arc::new(RecordStore::builtin().unwrap()),
            SessionPersistence::with_clock(MemoryStore::new(), noon),
            PanelView::new(),
            SystemOptions::default(),
        );
        let clipboard = MockClipboard::default();
        let app = App::new(system).with_clipboard(Box::new(clipboard.clone()));
        (app, clipboard)
    }

    fn type_text(app: &mut App<MemoryStore>, text: &str, now: Instant) {
        for c in text.chars() {
            app.handle_action(Action::InsertChar(c), now);
        }
    }

    #[test]
    fn test_submit_waits_for_delay() {
        let (mut app, _) = app();
        let now = Instant::now();

        type_text(&mut app, "test01", now);
        app.handle_action(Action::Submit, now);

        assert_eq!(app.system().state(), QueryState::Loading);
        assert!(!app.tick(now));
        assert!(app.tick(now + Duration::from_millis(300)));
        assert_eq!(app.system().state(), QueryState::Resolved);
        assert_eq!(app.system().view().owner, "测试用户");
    }

    #[test]
    fn test_second_submit_supersedes_first() {
        let (mut app, _) = app();
        let now = Instant::now();

        type_text(&mut app, "A123B4", now);
        app.handle_action(Action::Submit, now);
        for _ in 0..6 {
            app.handle_action(Action::DeleteChar, now);
        }
        type_text(&mut app, "B777X8", now);
        app.handle_action(Action::Submit, now + Duration::from_millis(100));

        assert!(!app.tick(now + Duration::from_millis(300)));
        assert!(app.tick(now + Duration::from_millis(400)));
        assert_eq!(app.system().current_identifier(), Some("B777X8"));
        assert_eq!(app.system().session().load_history().len(), 1);
    }

    #[test]
    fn test_arrow_selection_submits_suggestion() {
        let (mut app, _) = app();
        let now = Instant::now();

        type_text(&mut app, "7", now);
        assert_eq!(app.system().view().suggestions, vec!["B777X8", "E777F8"]);

        app.handle_action(Action::MoveDown, now);
        app.handle_action(Action::MoveDown, now);
        app.handle_action(Action::MoveDown, now);
        assert_eq!(app.selected_suggestion, Some(1));

        app.handle_action(Action::Submit, now);
        assert!(app.tick(now + Duration::from_secs(1)));
        assert_eq!(app.system().current_identifier(), Some("E777F8"));
        assert_eq!(app.system().input(), "E777F8");
    }

    #[test]
    fn test_move_up_clears_selection() {
        let (mut app, _) = app();
        let now = Instant::now();

        type_text(&mut app, "A", now);
        app.handle_action(Action::MoveDown, now);
        app.handle_action(Action::MoveUp, now);

        assert_eq!(app.selected_suggestion, None);
    }

    #[test]
    fn test_tab_accepts_first_suggestion() {
        let (mut app, _) = app();
        let now = Instant::now();

        type_text(&mut app, "c8", now);
        app.handle_action(Action::AcceptSuggestion, now);
        app.tick(now + Duration::from_secs(1));

        assert_eq!(app.system().current_identifier(), Some("C888D9"));
    }

    #[test]
    fn test_empty_submit_shows_error() {
        let (mut app, _) = app();
        let now = Instant::now();

        app.handle_action(Action::Submit, now);

        assert_eq!(app.system().state(), QueryState::Errored);
        assert_eq!(app.system().view().error.as_deref(), Some("Please enter a vehicle ID"));
        assert!(app.system().controller().pending().is_none());
    }

    #[test]
    fn test_call_copies_number() {
        let (mut app, clipboard) = app();
        let now = Instant::now();

        type_text(&mut app, "TEST01", now);
        app.handle_action(Action::Submit, now);
        app.tick(now + Duration::from_secs(1));
        app.handle_action(Action::Call(1), now);

        assert_eq!(clipboard.copied.borrow().as_slice(), ["16666666666"]);
        let message = app.status_message.as_ref().unwrap();
        assert_eq!(message.message_type, MessageType::Success);
        assert!(message.text.contains("tel:16666666666"));
    }

    #[test]
    fn test_call_without_vehicle_reports_error() {
        let (mut app, clipboard) = app();

        app.handle_action(Action::Call(0), Instant::now());

        assert!(clipboard.copied.borrow().is_empty());
        assert_eq!(app.status_message.as_ref().unwrap().message_type, MessageType::Error);
        assert!(app.system().view().input_focused);
    }

    #[test]
    fn test_reset_returns_to_idle() {
        let (mut app, _) = app();
        let now = Instant::now();

        type_text(&mut app, "A123B4", now);
        app.handle_action(Action::Submit, now);
        app.handle_action(Action::Reset, now);

        assert!(!app.tick(now + Duration::from_secs(1)));
        assert_eq!(app.system().state(), QueryState::Idle);
        assert_eq!(app.system().input(), "");
    }

    #[test]
    fn test_quit() {
        let (mut app, _) = app();
        app.handle_action(Action::Quit, Instant::now());
        assert!(app.should_quit);
    }

    #[test]
    fn test_expired_status_is_cleared() {
        let (mut app, _) = app();
        app.set_status("done", MessageType::Success, 10);

        app.clear_expired_status(Instant::now() + Duration::from_secs(1));

        assert!(app.status_message.is_none());
    }

    #[test]
    fn test_draw_after_query() {
        let (mut app, _) = app();
        let now = Instant::now();
        type_text(&mut app, "TEST01", now);
        app.handle_action(Action::Submit, now);
        app.tick(now + Duration::from_secs(1));

        let mut terminal = Terminal::new(TestBackend::new(120, 24)).unwrap();
        terminal
            .draw(|f| {
                let state = RenderState {
                    view: app.system().view(),
                    selected_suggestion: None,
                    status_message: None,
                    now,
                };
                render_ui(f, &state);
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content.iter().map(|cell| cell.symbol()).collect();
        assert!(text.contains("tel:15555555555"));
        assert!(text.contains("?id=TEST01"));
    }
}
