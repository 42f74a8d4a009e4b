use std::time::{Duration, Instant};

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::app::{MessageType, StatusMessage};
use super::layout::AppLayout;
use crate::display::PanelView;
use crate::utils::sanitize_for_terminal;

/// How long the status border stays highlighted after a new result
const PULSE_DURATION: Duration = Duration::from_millis(500);
/// How long the error region stays emphasized after it is (re)triggered
const ATTENTION_DURATION: Duration = Duration::from_millis(600);

const TEXT: Color = Color::Rgb(250, 250, 250);
const MUTED: Color = Color::Rgb(113, 113, 122);
const ACCENT: Color = Color::Rgb(16, 185, 129);
const DANGER: Color = Color::Rgb(239, 68, 68);
const BAR_BG: Color = Color::Rgb(24, 24, 27);

pub struct RenderState<'a> {
    pub view: &'a PanelView,
    pub selected_suggestion: Option<usize>,
    pub status_message: Option<&'a StatusMessage>,
    pub now: Instant,
}

fn recent(at: Option<Instant>, now: Instant, window: Duration) -> bool {
    at.is_some_and(|at| now.saturating_duration_since(at) < window)
}

fn muted_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(MUTED))
        .title(title)
}

/// Render the entire UI
pub fn render_ui(frame: &mut Frame, state: &RenderState) {
    let layout = AppLayout::new(frame.area());

    render_status(frame, layout.status_area, state);
    render_input(frame, layout.input_area, state.view);
    render_suggestions(frame, layout.suggestions_area, state);
    render_details(frame, layout.details_area, state);
    render_stats_bar(frame, layout.stats_area, state.view);
    render_help_bar(frame, layout.help_area, state.status_message);
}

fn render_status(frame: &mut Frame, area: Rect, state: &RenderState) {
    let status = &state.view.status;
    let (dot, dot_color) = if status.online { ("●", ACCENT) } else { ("○", MUTED) };

    let mut lines = vec![Line::from(vec![
        Span::styled(format!("{} ", dot), Style::default().fg(dot_color)),
        Span::styled(
            sanitize_for_terminal(&status.headline),
            Style::default().fg(TEXT).add_modifier(Modifier::BOLD),
        ),
    ])];
    if let Some(detail) = &status.detail {
        lines.push(Line::from(Span::styled(
            format!("  {}", sanitize_for_terminal(detail)),
            Style::default().fg(MUTED),
        )));
    }

    let border = if recent(state.view.status_pulsed_at, state.now, PULSE_DURATION) {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(MUTED)
    };
    let block = Block::default().borders(Borders::ALL).border_style(border).title(" Scan to move ");

    frame.render_widget(Paragraph::new(Text::from(lines)).block(block), area);
}

fn render_input(frame: &mut Frame, area: Rect, view: &PanelView) {
    let title = format!(" Vehicle ID [{}] ", view.button_label);
    let border = if view.button_enabled { MUTED } else { ACCENT };
    let block =
        Block::default().borders(Borders::ALL).border_style(Style::default().fg(border)).title(title);

    // Display width, not char count: CJK plate prefixes take two cells
    let input = Line::from(sanitize_for_terminal(&view.input));
    let cursor_offset = u16::try_from(input.width()).unwrap_or(u16::MAX);
    frame.render_widget(Paragraph::new(input).style(Style::default().fg(TEXT)).block(block), area);

    if view.input_focused && area.width > 2 && area.height > 2 {
        let x = (area.x + 1 + cursor_offset).min(area.x + area.width - 2);
        frame.set_cursor_position(Position::new(x, area.y + 1));
    }
}

fn render_suggestions(frame: &mut Frame, area: Rect, state: &RenderState) {
    let view = state.view;
    if !view.suggestions_visible || view.suggestions.is_empty() {
        return;
    }

    let mut spans = vec![Span::styled(" Suggestions: ", Style::default().fg(MUTED))];
    for (idx, id) in view.suggestions.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::styled(" | ", Style::default().fg(MUTED)));
        }
        let style = if state.selected_suggestion == Some(idx) {
            Style::default().fg(TEXT).bg(ACCENT).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(TEXT)
        };
        spans.push(Span::styled(sanitize_for_terminal(id), style));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_details(frame: &mut Frame, area: Rect, state: &RenderState) {
    let view = state.view;

    if let Some(error) = &view.error {
        let mut style = Style::default().fg(DANGER);
        if recent(view.error_attention_since, state.now, ATTENTION_DURATION) {
            style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
        }
        let paragraph = Paragraph::new(Line::from(Span::styled(
            format!(" {} ", sanitize_for_terminal(error)),
            style,
        )))
        .block(muted_block(" Details "));
        frame.render_widget(paragraph, area);
        return;
    }

    let label = Style::default().fg(MUTED);
    let content = if view.details_visible {
        let mut lines = vec![
            Line::from(vec![
                Span::styled("Owner:   ", label),
                Span::raw(sanitize_for_terminal(&view.owner)),
            ]),
            Line::from(vec![
                Span::styled("Vehicle: ", label),
                Span::raw(sanitize_for_terminal(&view.vehicle)),
            ]),
            Line::from(""),
        ];

        if view.call_targets.is_empty() {
            lines.push(Line::from(Span::styled("No dialable number on file", label)));
        }
        for (idx, target) in view.call_targets.iter().enumerate() {
            lines.push(Line::from(vec![
                Span::styled(format!("[F{}] ", idx + 1), Style::default().fg(ACCENT)),
                Span::styled(
                    sanitize_for_terminal(&target.label),
                    Style::default().fg(TEXT).add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("  {}", sanitize_for_terminal(&target.uri)), label),
            ]));
        }
        Text::from(lines)
    } else {
        Text::from(Line::from(Span::styled("No vehicle selected", label)))
    };

    let paragraph = Paragraph::new(content).block(muted_block(" Details ")).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_stats_bar(frame: &mut Frame, area: Rect, view: &PanelView) {
    let stats = &view.stats;
    let mut parts = vec![
        format!("data v{}", sanitize_for_terminal(&stats.version)),
        format!("{} vehicles", stats.vehicle_count),
        format!("{} queries today", stats.queries_today),
    ];
    if let Some(address) = &view.address {
        parts.push(sanitize_for_terminal(address));
    }

    let paragraph = Paragraph::new(format!(" {} ", parts.join(" | ")))
        .style(Style::default().fg(MUTED).bg(BAR_BG));
    frame.render_widget(paragraph, area);
}

fn render_help_bar(frame: &mut Frame, area: Rect, message: Option<&StatusMessage>) {
    let (text, style) = match message {
        Some(msg) => {
            let fg = match msg.message_type {
                MessageType::Success => ACCENT,
                MessageType::Error => DANGER,
            };
            (format!(" {} ", sanitize_for_terminal(&msg.text)), Style::default().fg(fg).bg(BAR_BG))
        }
        None => (
            " Enter: query | Up/Down: suggestions | Tab: accept | F1/F2: copy number | Esc: reset | Ctrl+C: quit "
                .to_string(),
            Style::default().fg(TEXT).bg(BAR_BG),
        ),
    };

    frame.render_widget(Paragraph::new(text).style(style), area);
}
