use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Stacked single-column layout
pub struct AppLayout {
    pub status_area: Rect,
    pub input_area: Rect,
    pub suggestions_area: Rect,
    pub details_area: Rect,
    pub stats_area: Rect,
    pub help_area: Rect,
}

impl AppLayout {
    /// - Status panel: headline and note (4 rows with border)
    /// - Input box (3 rows with border)
    /// - Suggestions: 1 row
    /// - Details: remaining rows
    /// - Stats bar and help bar: 1 row each
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area);

        Self {
            status_area: chunks[0],
            input_area: chunks[1],
            suggestions_area: chunks[2],
            details_area: chunks[3],
            stats_area: chunks[4],
            help_area: chunks[5],
        }
    }
}
