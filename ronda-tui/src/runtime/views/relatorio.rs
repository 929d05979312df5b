use crate::app::{App, ReportField, View};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::super::action_queue::{Action, ActionTx};
use super::{ctrl, enqueue_action};

pub(super) fn handle_relatorio_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        handle_relatorio_command(key, app, action_tx);
        return;
    }

    let has_suggestions = !app.suggestions.is_empty();
    let on_vtr = app.focused_report_field == ReportField::Vtr;

    match key.code {
        KeyCode::Tab => app.focus_report_field(app.focused_report_field.next()),
        KeyCode::BackTab => app.focus_report_field(app.focused_report_field.previous()),
        KeyCode::Down if has_suggestions => app.suggestion_next(),
        KeyCode::Up if has_suggestions => app.suggestion_previous(),
        KeyCode::Enter if has_suggestions => {
            app.accept_suggestion();
        }
        KeyCode::Enter if app.focused_report_field == ReportField::RelatorioBruto => {
            app.report_input_char('\n');
        }
        KeyCode::Enter => app.focus_report_field(app.focused_report_field.next()),
        KeyCode::Esc if has_suggestions => app.suggestions.clear(),
        KeyCode::Esc => app.navigate_to(View::Ronda),
        KeyCode::Left if on_vtr => app.cycle_vtr(false),
        KeyCode::Right if on_vtr => app.cycle_vtr(true),
        KeyCode::Left => move_cursor(app, |input| input.move_left()),
        KeyCode::Right => move_cursor(app, |input| input.move_right()),
        KeyCode::Home => move_cursor(app, |input| input.home()),
        KeyCode::End => move_cursor(app, |input| input.end()),
        KeyCode::Backspace => app.report_input_backspace(),
        KeyCode::Char(c) => app.report_input_char(c),
        _ => {}
    }
}

fn move_cursor(app: &mut App, f: impl FnOnce(&mut crate::app::TextInput)) {
    if let Some(input) = app.focused_report_input() {
        f(input);
    }
}

fn handle_relatorio_command(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    if ctrl(&key, 'a') {
        enqueue_action(action_tx, Action::AnalyzeReport);
    } else if ctrl(&key, 'w') {
        match app.relatorio_limpo.clone() {
            Some(relatorio) => {
                let link = app.share_link(&relatorio);
                app.open_preview("Relatório de ocorrência", relatorio, Some(link));
            }
            None => app.set_status("Analise o relatório antes de compartilhar (Ctrl+A)".to_string()),
        }
    } else if ctrl(&key, 'l') {
        app.clear_form();
        app.set_status("Formulário limpo".to_string());
    } else if ctrl(&key, 'n') {
        app.fill_report_now();
    } else if ctrl(&key, 'r') {
        app.navigate_to(View::Ronda);
    }
}
