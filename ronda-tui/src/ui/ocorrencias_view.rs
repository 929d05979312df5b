use crate::app::{App, OcorrenciaField};
use crate::domain::{ocorrencia_titulo, relatorio_excerpt};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph},
    Frame,
};

use super::utils::{input_line, label_style};

pub fn render_ocorrencias_view(frame: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(5)])
        .split(area);

    render_filters(frame, app, rows[0]);
    render_list(frame, app, rows[1]);
}

fn render_filters(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focused_ocorrencia_field;
    let status_focused = focused == OcorrenciaField::Status;
    let status = app.status_filtro_label();

    let lines = vec![
        Line::from(vec![
            Span::styled(format!("{:<12}", "Status"), label_style(status_focused)),
            Span::styled(
                if status_focused {
                    format!("◀ {} ▶", status)
                } else {
                    status.to_string()
                },
                Style::default().fg(Color::White),
            ),
        ]),
        input_line(
            "Data início",
            &app.data_inicio_input,
            focused == OcorrenciaField::DataInicio,
        ),
        input_line(
            "Data fim",
            &app.data_fim_input,
            focused == OcorrenciaField::DataFim,
        ),
    ];

    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(" Filtros ")
                .padding(Padding::horizontal(1)),
        ),
        area,
    );
}

fn render_list(frame: &mut Frame, app: &App, area: Rect) {
    let title = format!(" Ocorrências ({}) ", app.ocorrencias.len());
    let block = Block::default().borders(Borders::ALL).title(title);

    if app.ocorrencias.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "Nenhuma ocorrência. ^F filtra, ^L limpa os filtros",
                Style::default().fg(Color::DarkGray),
            ))
            .block(block),
            area,
        );
        return;
    }

    let muted = Style::default().fg(Color::DarkGray);
    let items: Vec<ListItem> = app
        .ocorrencias
        .iter()
        .map(|o| {
            let mut lines = vec![
                Line::from(Span::styled(
                    ocorrencia_titulo(o),
                    Style::default().fg(Color::Cyan),
                )),
                Line::from(vec![
                    Span::styled("  Local: ", muted),
                    Span::raw(o.endereco_especifico.clone().unwrap_or_default()),
                    Span::styled("  Condomínio: ", muted),
                    Span::raw(o.condominio.clone().unwrap_or_default()),
                ]),
            ];
            lines.extend(
                relatorio_excerpt(o.relatorio())
                    .into_iter()
                    .map(|l| Line::from(format!("  {}", l))),
            );
            if !o.colaboradores.is_empty() {
                lines.push(Line::from(vec![
                    Span::styled("  Colaboradores: ", muted),
                    Span::raw(o.colaboradores.join(", ")),
                ]));
            }
            lines.push(Line::from(""));
            ListItem::new(lines)
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("▶ ");
    let mut state = ListState::default().with_selected(Some(app.ocorrencia_index));
    frame.render_stateful_widget(list, area, &mut state);
}
