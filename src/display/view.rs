use std::collections::HashSet;
use std::time::Instant;

use serde::Serialize;

use crate::error::{Slot, ViewError};

/// One dialable contact shown for the current vehicle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallTarget {
    pub label: String,
    pub number: String,
    pub uri: String,
}

/// Headline plus optional secondary line of the status region
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusLine {
    pub online: bool,
    pub headline: String,
    pub detail: Option<String>,
}

impl StatusLine {
    pub fn online(headline: impl Into<String>, detail: Option<String>) -> Self {
        Self { online: true, headline: headline.into(), detail }
    }
}

/// Figures shown in the stats strip
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stats {
    pub version: String,
    pub vehicle_count: usize,
    pub queries_today: usize,
}

/// Named output slots the controller writes into.
///
/// Each call may fail with [`ViewError::MissingTarget`] when the slot does not
/// exist; callers log and carry on.
pub trait ViewPort {
    fn set_input(&mut self, text: &str) -> Result<(), ViewError>;
    fn focus_input(&mut self) -> Result<(), ViewError>;
    fn set_query_button(&mut self, enabled: bool, label: &str) -> Result<(), ViewError>;
    fn set_status(&mut self, status: StatusLine) -> Result<(), ViewError>;
    /// Brief highlight of the status region after a new result
    fn pulse_status(&mut self) -> Result<(), ViewError>;
    fn set_owner(&mut self, owner: &str) -> Result<(), ViewError>;
    fn set_vehicle(&mut self, vehicle: &str) -> Result<(), ViewError>;
    fn set_details_visible(&mut self, visible: bool) -> Result<(), ViewError>;
    fn clear_call_targets(&mut self) -> Result<(), ViewError>;
    fn add_call_target(&mut self, target: CallTarget) -> Result<(), ViewError>;
    fn show_error(&mut self, message: &str) -> Result<(), ViewError>;
    fn clear_error(&mut self) -> Result<(), ViewError>;
    fn set_error_attention(&mut self, on: bool) -> Result<(), ViewError>;
    fn show_suggestions(&mut self, ids: &[String]) -> Result<(), ViewError>;
    fn hide_suggestions(&mut self) -> Result<(), ViewError>;
    fn set_address(&mut self, address: &str) -> Result<(), ViewError>;
    fn set_stats(&mut self, stats: &Stats) -> Result<(), ViewError>;
}

/// In-memory view holding the rendered panel.
///
/// Drawn by the TUI, printed by the CLI and inspected by tests. Slots can be
/// removed with [`PanelView::without`] to exercise missing-target handling.
#[derive(Debug, Clone)]
pub struct PanelView {
    pub input: String,
    pub input_focused: bool,
    pub button_enabled: bool,
    pub button_label: String,
    pub status: StatusLine,
    pub status_pulsed_at: Option<Instant>,
    pub owner: String,
    pub vehicle: String,
    pub details_visible: bool,
    pub call_targets: Vec<CallTarget>,
    pub error: Option<String>,
    pub error_attention_since: Option<Instant>,
    pub error_attention_count: usize,
    pub suggestions: Vec<String>,
    pub suggestions_visible: bool,
    pub address: Option<String>,
    pub stats: Stats,
    missing: HashSet<Slot>,
}

impl Default for PanelView {
    fn default() -> Self {
        Self {
            input: String::new(),
            input_focused: false,
            button_enabled: true,
            button_label: String::new(),
            status: StatusLine::default(),
            status_pulsed_at: None,
            owner: String::new(),
            vehicle: String::new(),
            details_visible: false,
            call_targets: Vec::new(),
            error: None,
            error_attention_since: None,
            error_attention_count: 0,
            suggestions: Vec::new(),
            suggestions_visible: false,
            address: None,
            stats: Stats::default(),
            missing: HashSet::new(),
        }
    }
}

impl PanelView {
    pub fn new() -> Self {
        Self::default()
    }

    /// View lacking the given slots
    pub fn without(slots: &[Slot]) -> Self {
        Self { missing: slots.iter().copied().collect(), ..Self::default() }
    }

    fn require(&self, slot: Slot) -> Result<(), ViewError> {
        if self.missing.contains(&slot) { Err(ViewError::MissingTarget(slot)) } else { Ok(()) }
    }
}

impl ViewPort for PanelView {
    fn set_input(&mut self, text: &str) -> Result<(), ViewError> {
        self.require(Slot::Input)?;
        self.input = text.to_string();
        Ok(())
    }

    fn focus_input(&mut self) -> Result<(), ViewError> {
        self.require(Slot::Input)?;
        self.input_focused = true;
        Ok(())
    }

    fn set_query_button(&mut self, enabled: bool, label: &str) -> Result<(), ViewError> {
        self.require(Slot::QueryButton)?;
        self.button_enabled = enabled;
        self.button_label = label.to_string();
        Ok(())
    }

    fn set_status(&mut self, status: StatusLine) -> Result<(), ViewError> {
        self.require(Slot::Status)?;
        self.status = status;
        Ok(())
    }

    fn pulse_status(&mut self) -> Result<(), ViewError> {
        self.require(Slot::Status)?;
        self.status_pulsed_at = Some(Instant::now());
        Ok(())
    }

    fn set_owner(&mut self, owner: &str) -> Result<(), ViewError> {
        self.require(Slot::Details)?;
        self.owner = owner.to_string();
        Ok(())
    }

    fn set_vehicle(&mut self, vehicle: &str) -> Result<(), ViewError> {
        self.require(Slot::Details)?;
        self.vehicle = vehicle.to_string();
        Ok(())
    }

    fn set_details_visible(&mut self, visible: bool) -> Result<(), ViewError> {
        self.require(Slot::Details)?;
        self.details_visible = visible;
        Ok(())
    }

    fn clear_call_targets(&mut self) -> Result<(), ViewError> {
        self.require(Slot::CallTargets)?;
        self.call_targets.clear();
        Ok(())
    }

    fn add_call_target(&mut self, target: CallTarget) -> Result<(), ViewError> {
        self.require(Slot::CallTargets)?;
        self.call_targets.push(target);
        Ok(())
    }

    fn show_error(&mut self, message: &str) -> Result<(), ViewError> {
        self.require(Slot::Error)?;
        self.error = Some(message.to_string());
        Ok(())
    }

    fn clear_error(&mut self) -> Result<(), ViewError> {
        self.require(Slot::Error)?;
        self.error = None;
        self.error_attention_since = None;
        Ok(())
    }

    fn set_error_attention(&mut self, on: bool) -> Result<(), ViewError> {
        self.require(Slot::Error)?;
        if on {
            self.error_attention_since = Some(Instant::now());
            self.error_attention_count += 1;
        } else {
            self.error_attention_since = None;
        }
        Ok(())
    }

    fn show_suggestions(&mut self, ids: &[String]) -> Result<(), ViewError> {
        self.require(Slot::Suggestions)?;
        self.suggestions = ids.to_vec();
        self.suggestions_visible = true;
        Ok(())
    }

    fn hide_suggestions(&mut self) -> Result<(), ViewError> {
        self.require(Slot::Suggestions)?;
        self.suggestions.clear();
        self.suggestions_visible = false;
        Ok(())
    }

    fn set_address(&mut self, address: &str) -> Result<(), ViewError> {
        self.require(Slot::Address)?;
        self.address = Some(address.to_string());
        Ok(())
    }

    fn set_stats(&mut self, stats: &Stats) -> Result<(), ViewError> {
        self.require(Slot::Stats)?;
        self.stats = stats.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_view_records_writes() {
        let mut view = PanelView::new();

        view.set_owner("Owner").unwrap();
        view.add_call_target(CallTarget {
            label: "Owner - 139 5312 8666".to_string(),
            number: "13953128666".to_string(),
            uri: "tel:13953128666".to_string(),
        })
        .unwrap();
        view.show_suggestions(&["A123B4".to_string()]).unwrap();

        assert_eq!(view.owner, "Owner");
        assert_eq!(view.call_targets.len(), 1);
        assert!(view.suggestions_visible);

        view.hide_suggestions().unwrap();
        assert!(view.suggestions.is_empty());
        assert!(!view.suggestions_visible);
    }

    #[test]
    fn test_missing_slot_rejects_write() {
        let mut view = PanelView::without(&[Slot::Details]);

        assert_eq!(view.set_owner("Owner"), Err(ViewError::MissingTarget(Slot::Details)));
        assert_eq!(view.owner, "");
        assert!(view.set_status(StatusLine::online("ok", None)).is_ok());
    }

    #[test]
    fn test_error_attention_toggle_counts_triggers() {
        let mut view = PanelView::new();

        view.set_error_attention(false).unwrap();
        view.set_error_attention(true).unwrap();
        view.set_error_attention(false).unwrap();
        view.set_error_attention(true).unwrap();

        assert_eq!(view.error_attention_count, 2);
        assert!(view.error_attention_since.is_some());
    }
}
