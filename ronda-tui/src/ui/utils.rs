use crate::app::TextInput;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Helper function to create a centered rectangle
pub fn centered_rect(width: u16, height: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((r.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((r.height.saturating_sub(height)) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((r.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((r.width.saturating_sub(width)) / 2),
        ])
        .split(popup_layout[1])[1]
}

pub fn label_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

/// `Label: value` with a block cursor when focused.
pub fn input_line<'a>(label: &'a str, input: &'a TextInput, focused: bool) -> Line<'a> {
    let mut spans = vec![Span::styled(format!("{:<12}", label), label_style(focused))];
    if !focused {
        spans.push(Span::styled(input.value.as_str(), Style::default().fg(Color::White)));
        return Line::from(spans);
    }

    let (before, after) = input.split_at_cursor();
    let mut rest = after.chars();
    let under_cursor = rest.next().map(String::from).unwrap_or_else(|| " ".to_string());
    let value_style = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);

    spans.push(Span::styled(before, value_style));
    spans.push(Span::styled(
        under_cursor,
        value_style.add_modifier(Modifier::REVERSED),
    ));
    spans.push(Span::styled(rest.as_str(), value_style));
    Line::from(spans)
}

/// `Key: description` hint pairs for the footer.
pub fn key_hints<'a>(hints: &[(&'a str, &'a str)]) -> Line<'a> {
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (key, desc) in hints {
        spans.push(Span::styled(*key, Style::default().fg(Color::Yellow)));
        spans.push(Span::raw(format!(": {}  ", desc)));
    }
    Line::from(spans)
}
