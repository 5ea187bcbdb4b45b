//! Thin rendering shell over the message store.
//!
//! Layout per record: selection marker, timestamp column, right-aligned
//! username column, the wrapped message with a `| ` gutter per visual line,
//! and the toxicity flag cell. Toxic records get a red background across the
//! row, and the list renders latest-first.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::layout::{segment_message, FontStyle, MonospaceMeasure, Viewport};
use crate::models::{format_timestamp, ChatRecord};
use crate::ws::ConnectionState;

const GUTTER: &str = "| ";
const MARKER_WIDTH: usize = 2;
const TIMESTAMP_CELLS: usize = 9;
const USERNAME_CELLS: usize = 16;

pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(frame.area());

    draw_header(frame, app, chunks[0]);
    draw_chat_list(frame, app, chunks[1]);
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let line = Line::from(vec![
        Span::styled(
            format!("{} chat", app.channel),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        status_span(app.connection_state),
    ]);
    let header = Paragraph::new(line).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, area);
}

fn draw_chat_list(frame: &mut Frame, app: &App, area: Rect) {
    let records = app.display_records();
    let mut lines: Vec<Line<'static>> = Vec::new();
    for (idx, record) in records.iter().enumerate() {
        lines.extend(record_lines(record, &app.viewport, idx == app.selected));
    }
    frame.render_widget(Paragraph::new(Text::from(lines)), area);
}

/// Connectivity indicator for the header.
pub fn status_span(state: ConnectionState) -> Span<'static> {
    let style = match state {
        ConnectionState::Connected => Style::default().fg(Color::Green),
        ConnectionState::Connecting => Style::default().fg(Color::Yellow),
        ConnectionState::Disconnected => Style::default().fg(Color::Red),
    };
    Span::styled(format!("[{}]", state.label()), style)
}

/// Render one record as its visual lines.
///
/// The first line carries the fixed columns and the flag cell; continuation
/// lines repeat only the gutter under the message column.
pub fn record_lines(record: &ChatRecord, viewport: &Viewport, selected: bool) -> Vec<Line<'static>> {
    let style = FontStyle::default();
    let measure = MonospaceMeasure::terminal();
    let segments = segment_message(
        &record.chat_message,
        viewport.message_width(),
        &style,
        &measure,
    );
    let message_cells = viewport.message_width() as usize;

    let base = if record.is_toxic {
        Style::default().bg(Color::Red)
    } else {
        Style::default()
    };
    let accent = base.fg(Color::Green).add_modifier(Modifier::BOLD);
    let marker_style = if selected {
        base.add_modifier(Modifier::BOLD)
    } else {
        base
    };

    let marker = if selected { "> " } else { "  " };
    let username: String = record.username.chars().take(USERNAME_CELLS).collect();
    let flag = if record.is_toxic { "[Toxic]" } else { "[Not Toxic]" };

    let first_segment = segments.first().cloned().unwrap_or_default();
    let mut lines = vec![Line::from(vec![
        Span::styled(marker.to_string(), marker_style),
        Span::styled(
            format!("{:<width$}", format_timestamp(record.timestamp), width = TIMESTAMP_CELLS),
            accent,
        ),
        Span::styled(format!("{:>width$} ", username, width = USERNAME_CELLS), accent),
        Span::styled(GUTTER.to_string(), base),
        Span::styled(
            format!("{:<width$}", first_segment, width = message_cells),
            base,
        ),
        Span::styled(format!("{:>11}", flag), base),
    ])];

    let indent = MARKER_WIDTH + TIMESTAMP_CELLS + USERNAME_CELLS + 1;
    for segment in segments.iter().skip(1) {
        lines.push(Line::from(vec![
            Span::styled(" ".repeat(indent), base),
            Span::styled(GUTTER.to_string(), base),
            Span::styled(format!("{:<width$}", segment, width = message_cells), base),
        ]));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::ReservedColumns;
    use crate::models::ChatId;

    fn viewport(container: f64) -> Viewport {
        let mut viewport = Viewport::new(ReservedColumns::terminal());
        viewport.set_container_width(container);
        viewport
    }

    fn record(message: &str, is_toxic: bool) -> ChatRecord {
        ChatRecord {
            chat_id: ChatId::from("r"),
            timestamp: 1_700_000_000_000,
            username: "someone".to_string(),
            chat_message: message.to_string(),
            is_toxic,
        }
    }

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_short_message_renders_one_line() {
        let lines = record_lines(&record("hi there", false), &viewport(80.0), false);
        assert_eq!(lines.len(), 1);
        let text = line_text(&lines[0]);
        assert!(text.contains("| hi there"));
        assert!(text.contains("[Not Toxic]"));
        assert!(text.contains("someone"));
    }

    #[test]
    fn test_long_message_continuation_lines_keep_gutter() {
        // Terminal reservations total 42, so container 60 leaves 18 cells.
        let lines = record_lines(
            &record("alpha beta gamma delta epsilon zeta eta theta", false),
            &viewport(60.0),
            false,
        );
        assert!(lines.len() > 1);
        for line in lines.iter().skip(1) {
            let text = line_text(line);
            assert!(text.trim_start().starts_with('|'), "line {:?}", text);
            // Continuation lines carry no flag cell or username.
            assert!(!text.contains("Toxic"));
            assert!(!text.contains("someone"));
        }
    }

    #[test]
    fn test_toxic_record_gets_red_background() {
        let lines = record_lines(&record("bad words", true), &viewport(80.0), false);
        for span in &lines[0].spans {
            assert_eq!(span.style.bg, Some(Color::Red));
        }
        assert!(line_text(&lines[0]).contains("[Toxic]"));
    }

    #[test]
    fn test_clean_record_has_no_background() {
        let lines = record_lines(&record("fine", false), &viewport(80.0), false);
        for span in &lines[0].spans {
            assert_eq!(span.style.bg, None);
        }
    }

    #[test]
    fn test_selection_marker() {
        let selected = record_lines(&record("msg", false), &viewport(80.0), true);
        assert!(line_text(&selected[0]).starts_with("> "));

        let unselected = record_lines(&record("msg", false), &viewport(80.0), false);
        assert!(unselected[0].spans[0].content.as_ref() == "  ");
    }

    #[test]
    fn test_empty_message_still_renders_columns() {
        let lines = record_lines(&record("", false), &viewport(80.0), false);
        assert_eq!(lines.len(), 1);
        assert!(line_text(&lines[0]).contains("[Not Toxic]"));
    }

    #[test]
    fn test_long_username_is_truncated() {
        let mut r = record("msg", false);
        r.username = "a-very-long-username-indeed".to_string();
        let lines = record_lines(&r, &viewport(80.0), false);
        let text = line_text(&lines[0]);
        assert!(text.contains("a-very-long-user"));
        assert!(!text.contains("a-very-long-usern"));
    }

    #[test]
    fn test_status_span_labels() {
        assert_eq!(
            status_span(ConnectionState::Connected).content.as_ref(),
            "[connected]"
        );
        assert_eq!(
            status_span(ConnectionState::Disconnected).content.as_ref(),
            "[disconnected]"
        );
        assert_eq!(
            status_span(ConnectionState::Connecting).content.as_ref(),
            "[connecting]"
        );
    }
}
