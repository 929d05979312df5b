use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap},
    Frame,
};

use super::utils;

pub fn render_preview(frame: &mut Frame, app: &App) {
    let Some(preview) = &app.preview else {
        return;
    };

    let screen = frame.area();
    let area = utils::centered_rect(
        screen.width.saturating_sub(8).max(20),
        screen.height.saturating_sub(4).max(8),
        screen,
    );
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(Span::styled(
            format!(" {} ", preview.title),
            Style::default().fg(Color::Yellow),
        ))
        .padding(Padding::horizontal(2));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(2)])
        .split(inner);

    frame.render_widget(
        Paragraph::new(preview.body.as_str())
            .wrap(Wrap { trim: false })
            .scroll((preview.scroll, 0)),
        rows[0],
    );

    let link = preview.link.as_deref().unwrap_or("");
    frame.render_widget(
        Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(link, Style::default().fg(Color::DarkGray))),
        ]),
        rows[1],
    );
}
