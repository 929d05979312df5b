use crate::app::{App, PatrolField};
use crate::domain::{executada_linha, format_hora, hora_atual, PatrolState};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph},
    Frame,
};

use super::utils::{input_line, label_style};

pub fn render_ronda_view(frame: &mut Frame, app: &App, area: Rect) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Min(3),
            Constraint::Length(7),
        ])
        .split(cols[0]);

    render_inputs(frame, app, left[0]);
    render_suggestions(frame, app, left[1]);
    render_countdown(frame, app, left[2]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(9)])
        .split(cols[1]);

    render_session(frame, app, right[0]);
    render_pending(frame, app, right[1]);
}

fn render_inputs(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focused_patrol_field;
    let lines = vec![
        input_line(
            "Residencial",
            &app.residencial_input,
            focused == PatrolField::Residencial,
        ),
        input_line("Início", &app.inicio_input, focused == PatrolField::Inicio),
        input_line("Término", &app.termino_input, focused == PatrolField::Termino),
    ];

    let title = match app.resolved_condominio() {
        Some(_) => " Ronda (cadastrado) ",
        None => " Ronda ",
    };
    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(title)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(paragraph, area);
}

fn render_suggestions(frame: &mut Frame, app: &App, area: Rect) {
    let suggestions = app.visible_condominios();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(label_style(
            app.focused_patrol_field == PatrolField::Residencial && !suggestions.is_empty(),
        ))
        .title(" Condomínios ");

    if suggestions.is_empty() {
        let hint = if app.residencial_input.is_blank() {
            "Digite para buscar um condomínio"
        } else if app.resolved_condominio().is_some() {
            "Enter: verificar ronda em andamento"
        } else {
            "Nenhum condomínio encontrado"
        };
        frame.render_widget(
            Paragraph::new(Span::styled(hint, Style::default().fg(Color::DarkGray))).block(block),
            area,
        );
        return;
    }

    let items: Vec<ListItem> = suggestions
        .iter()
        .map(|c| ListItem::new(c.nome.as_str()))
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
    let mut state = ListState::default().with_selected(Some(app.condominio_index));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_countdown(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = Vec::new();

    match app.tracker.state() {
        PatrolState::Active { patrol, countdown } => {
            let color = if !countdown.is_running() {
                Color::DarkGray
            } else if countdown.is_warning() {
                Color::Red
            } else {
                Color::Green
            };
            lines.push(Line::from(Span::styled(
                countdown.format(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )));
            let elapsed = app
                .tracker
                .elapsed_minutes(hora_atual())
                .unwrap_or_default();
            lines.push(Line::from(format!(
                "{} desde {} ({} min)",
                patrol.residencial,
                format_hora(patrol.inicio),
                elapsed
            )));
            if patrol.id.is_none() {
                lines.push(Line::from(Span::styled(
                    "Somente local",
                    Style::default().fg(Color::DarkGray),
                )));
            }
            if countdown.is_expired() {
                lines.push(Line::from(Span::styled(
                    "Hora da próxima ronda! (^P reinicia)",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )));
            } else if !countdown.is_running() {
                lines.push(Line::from(Span::styled(
                    "Pausado (^P retoma)",
                    Style::default().fg(Color::DarkGray),
                )));
            }
        }
        PatrolState::Finished { patrol } => {
            lines.push(Line::from(Span::styled(
                "Nenhuma ronda em andamento",
                Style::default().fg(Color::DarkGray),
            )));
            lines.push(Line::from(format!(
                "Última: {} ({} min)",
                patrol.residencial,
                patrol.duracao.unwrap_or_default()
            )));
        }
        PatrolState::Idle => {
            lines.push(Line::from(Span::styled(
                "Nenhuma ronda em andamento",
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Próxima ronda "),
    );
    frame.render_widget(paragraph, area);
}

fn render_session(frame: &mut Frame, app: &App, area: Rect) {
    let session = app.tracker.session();
    let title = format!(" Rondas do plantão ({}) ", session.len());
    let block = Block::default().borders(Borders::ALL).title(title);

    if session.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "Nenhuma ronda finalizada",
                Style::default().fg(Color::DarkGray),
            ))
            .block(block),
            area,
        );
        return;
    }

    let items: Vec<ListItem> = session
        .iter()
        .map(|p| {
            let termino = p.termino.map(format_hora).unwrap_or_default();
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{} - {} ", format_hora(p.inicio), termino),
                    Style::default().fg(Color::Cyan),
                ),
                Span::styled(
                    format!("({:>3} min) ", p.duracao.unwrap_or_default()),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(p.residencial.as_str()),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("▶ ");
    let mut state = ListState::default().with_selected(app.selected_session_index);
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_pending(frame: &mut Frame, app: &App, area: Rect) {
    let muted = Style::default().fg(Color::DarkGray);
    let mut lines = vec![match &app.pending {
        None => Line::from(Span::styled(
            "^R confere as rondas salvas com o servidor",
            muted,
        )),
        Some(pending) if pending.is_empty() => Line::from(Span::styled(
            "Todas as rondas confirmadas",
            Style::default().fg(Color::Green),
        )),
        Some(pending) => Line::from(vec![
            Span::styled("Pendentes: ", Style::default().fg(Color::Red)),
            Span::raw(pending.join(", ")),
        ]),
    }];

    for ronda in &app.executed {
        let residencial = ronda
            .condominio_nome
            .clone()
            .unwrap_or_else(|| format!("#{}", ronda.condominio_id));
        lines.push(Line::from(vec![
            Span::styled("✅ ", Style::default().fg(Color::Green)),
            Span::styled(executada_linha(ronda), Style::default().fg(Color::Cyan)),
            Span::raw(format!(" {}", residencial)),
            Span::styled(format!(" | {}", ronda.escala_plantao), muted),
        ]));
    }

    let paragraph = Paragraph::new(lines)
        .wrap(ratatui::widgets::Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Conferência ({} executadas) ", app.executed.len())),
        );
    frame.render_widget(paragraph, area);
}
