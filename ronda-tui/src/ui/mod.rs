use crate::app::{App, View};
use crate::domain::format_data_br;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

mod ocorrencias_view;
mod preview;
mod relatorio_view;
mod ronda_view;
pub(super) mod utils;

pub fn render(frame: &mut Frame, app: &mut App) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(frame.area());

    render_header(frame, root[0], app);

    match app.current_view {
        View::Ronda => ronda_view::render_ronda_view(frame, app, root[1]),
        View::Relatorio => relatorio_view::render_relatorio_view(frame, app, root[1]),
        View::Ocorrencias => ocorrencias_view::render_ocorrencias_view(frame, app, root[1]),
    }

    render_footer(frame, root[2], app);

    if app.preview.is_some() {
        preview::render_preview(frame, app);
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &mut App) {
    const LABEL: &str = " Ronda";
    let title_width = 1 + LABEL.len() as u16 + 1;
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(title_width), Constraint::Min(0)])
        .split(area);

    // Throbber spins while a backend call is in flight.
    let throbber_area = Rect {
        x: cols[0].x + 1,
        y: cols[0].y,
        width: 1,
        height: 1,
    };
    let label_area = Rect {
        x: throbber_area.x + 1,
        y: cols[0].y,
        width: cols[0].width.saturating_sub(2),
        height: 1,
    };
    let throbber = throbber_widgets_tui::Throbber::default()
        .style(Style::default().fg(Color::Yellow))
        .throbber_style(Style::default().fg(Color::Yellow))
        .throbber_set(throbber_widgets_tui::BRAILLE_SIX)
        .use_type(if app.is_loading {
            throbber_widgets_tui::WhichUse::Spin
        } else {
            throbber_widgets_tui::WhichUse::Full
        });
    frame.render_stateful_widget(throbber, throbber_area, &mut app.throbber_state);
    frame.render_widget(
        Paragraph::new(Span::styled(LABEL, Style::default().fg(Color::Yellow))),
        label_area,
    );

    let muted = Style::default().fg(Color::DarkGray);
    let window = app.tracker.window();
    let line = Line::from(vec![
        Span::styled(" | ", muted),
        Span::styled("Plantão ", Style::default().fg(Color::Yellow)),
        Span::raw(format_data_br(app.tracker.data_plantao())),
        Span::styled(" | ", muted),
        Span::raw(format!("{} ({})", app.tracker.escala(), app.escala().turno())),
        Span::styled(
            format!("  {} → {}", window.inicio_formatado, window.fim_formatado),
            muted,
        ),
    ]);
    frame.render_widget(Paragraph::new(line), cols[1]);
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let status = match &app.status_message {
        Some(msg) => Line::from(Span::styled(msg.as_str(), Style::default().fg(Color::Cyan))),
        None => Line::from(""),
    };

    let hints: &[(&str, &str)] = if app.preview.is_some() {
        &[("Enter", "Abrir WhatsApp"), ("↑/↓", "Rolar"), ("Esc", "Fechar")]
    } else {
        match app.current_view {
            View::Ronda => &[
                ("^S", "Iniciar"),
                ("^F", "Finalizar"),
                ("^A", "Registrar"),
                ("^P", "Pausar"),
                ("^N", "Agora"),
                ("^D", "Remover"),
                ("^E", "Escala"),
                ("^R", "Conferir"),
                ("^K", "Consolidar"),
                ("^W", "WhatsApp"),
                ("^O", "Ocorrência"),
                ("^G", "Histórico"),
                ("^Q", "Sair"),
            ],
            View::Relatorio => &[
                ("Tab", "Campo"),
                ("^N", "Agora"),
                ("^A", "Analisar"),
                ("^W", "Compartilhar"),
                ("^L", "Limpar"),
                ("^G", "Histórico"),
                ("Esc", "Voltar"),
                ("^Q", "Sair"),
            ],
            View::Ocorrencias => &[
                ("Tab", "Filtro"),
                ("←/→", "Status"),
                ("↑/↓", "Selecionar"),
                ("Enter", "Detalhes"),
                ("^F", "Filtrar"),
                ("^L", "Limpar"),
                ("Esc", "Voltar"),
                ("^Q", "Sair"),
            ],
        }
    };

    frame.render_widget(Paragraph::new(vec![status, utils::key_hints(hints)]), area);
}
