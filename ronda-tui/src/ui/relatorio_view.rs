use crate::app::{App, ReportField};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph, Wrap},
    Frame,
};

use super::utils::{input_line, label_style};

pub fn render_relatorio_view(frame: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(5)])
        .split(area);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[0]);

    render_fields(frame, app, top[0]);
    render_suggestions(frame, app, top[1]);
    render_relato(frame, app, rows[1]);
}

fn render_fields(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focused_report_field;
    let vtr_focused = focused == ReportField::Vtr;
    let vtr = if app.vtr().is_empty() { "-" } else { app.vtr() };

    let lines = vec![
        input_line(
            ReportField::Data.label(),
            &app.data_input,
            focused == ReportField::Data,
        ),
        input_line(
            ReportField::Hora.label(),
            &app.hora_input,
            focused == ReportField::Hora,
        ),
        input_line(
            ReportField::Endereco.label(),
            &app.endereco_input,
            focused == ReportField::Endereco,
        ),
        input_line(
            ReportField::Colaborador.label(),
            &app.colaborador_input,
            focused == ReportField::Colaborador,
        ),
        Line::from(vec![
            Span::styled(
                format!("{:<12}", ReportField::Vtr.label()),
                label_style(vtr_focused),
            ),
            Span::styled(
                if vtr_focused {
                    format!("◀ {} ▶", vtr)
                } else {
                    vtr.to_string()
                },
                Style::default().fg(Color::White),
            ),
        ]),
    ];

    let title = if app.relatorio_limpo.is_some() {
        " Ocorrência (analisada) "
    } else {
        " Ocorrência "
    };
    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(title)
                .padding(Padding::horizontal(1)),
        ),
        area,
    );
}

fn render_suggestions(frame: &mut Frame, app: &App, area: Rect) {
    let title = match app.focused_report_field {
        ReportField::Endereco => " Logradouros ",
        ReportField::Colaborador => " Colaboradores ",
        _ => " Sugestões ",
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(label_style(!app.suggestions.is_empty()))
        .title(title);

    if app.suggestions.is_empty() {
        let hint = match app.focused_report_field.lookup() {
            Some(_) if app.pending_lookup.is_some() => "Buscando...",
            Some(_) => "Digite ao menos 2 letras",
            None => "",
        };
        frame.render_widget(
            Paragraph::new(Span::styled(hint, Style::default().fg(Color::DarkGray))).block(block),
            area,
        );
        return;
    }

    let items: Vec<ListItem> = app
        .suggestions
        .iter()
        .map(|s| ListItem::new(s.as_str()))
        .collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");
    let mut state = ListState::default().with_selected(Some(app.suggestion_index));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_relato(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focused_report_field == ReportField::RelatorioBruto;
    let text_style = Style::default().fg(Color::White);

    let lines: Vec<Line> = if focused {
        // Cursor is drawn inline; text may span several lines.
        let (before, after) = app.relatorio_input.split_at_cursor();
        let mut lines: Vec<Line> = Vec::new();
        let mut current: Vec<Span> = Vec::new();
        for (i, part) in before.split('\n').enumerate() {
            if i > 0 {
                lines.push(Line::from(std::mem::take(&mut current)));
            }
            current.push(Span::styled(part, text_style));
        }

        let mut rest = after.chars();
        match rest.next() {
            Some('\n') | None => {
                current.push(Span::styled(" ", text_style.add_modifier(Modifier::REVERSED)));
                if after.starts_with('\n') {
                    lines.push(Line::from(std::mem::take(&mut current)));
                }
            }
            Some(c) => current.push(Span::styled(
                c.to_string(),
                text_style.add_modifier(Modifier::REVERSED),
            )),
        }
        for (i, part) in rest.as_str().split('\n').enumerate() {
            if i > 0 {
                lines.push(Line::from(std::mem::take(&mut current)));
            }
            current.push(Span::styled(part, text_style));
        }
        lines.push(Line::from(current));
        lines
    } else if app.relatorio_input.is_blank() {
        vec![Line::from(Span::styled(
            "Descreva a ocorrência...",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        app.relatorio_input
            .value
            .split('\n')
            .map(|l| Line::from(Span::styled(l, text_style)))
            .collect()
    };

    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(label_style(focused))
                .title(" Relato (Enter: nova linha) ")
                .padding(Padding::horizontal(1)),
        ),
        area,
    );
}
