use crate::app::{App, OcorrenciaField, View};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::super::action_queue::{Action, ActionTx};
use super::{ctrl, enqueue_action};

pub(super) fn handle_ocorrencias_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        handle_ocorrencias_command(key, app, action_tx);
        return;
    }

    let on_status = app.focused_ocorrencia_field == OcorrenciaField::Status;

    match key.code {
        KeyCode::Tab => app.focused_ocorrencia_field = app.focused_ocorrencia_field.next(),
        KeyCode::BackTab => app.focused_ocorrencia_field = app.focused_ocorrencia_field.previous(),
        KeyCode::Down => app.ocorrencia_next(),
        KeyCode::Up => app.ocorrencia_previous(),
        KeyCode::Enter => match app.selected_ocorrencia() {
            Some(ocorrencia) => enqueue_action(action_tx, Action::OpenOcorrencia(ocorrencia.id)),
            None => enqueue_action(action_tx, Action::LoadOcorrencias),
        },
        KeyCode::Esc => app.close_ocorrencias(),
        KeyCode::Left if on_status => app.cycle_status_filtro(false),
        KeyCode::Right if on_status => app.cycle_status_filtro(true),
        KeyCode::Left => move_cursor(app, |input| input.move_left()),
        KeyCode::Right => move_cursor(app, |input| input.move_right()),
        KeyCode::Backspace => move_cursor(app, |input| input.backspace()),
        KeyCode::Char(c) if c.is_ascii_digit() || c == '/' => {
            move_cursor(app, |input| input.insert(c))
        }
        _ => {}
    }
}

fn move_cursor(app: &mut App, f: impl FnOnce(&mut crate::app::TextInput)) {
    if let Some(input) = app.focused_ocorrencia_input() {
        f(input);
    }
}

fn handle_ocorrencias_command(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    if ctrl(&key, 'f') {
        enqueue_action(action_tx, Action::LoadOcorrencias);
    } else if ctrl(&key, 'l') {
        app.clear_ocorrencia_filtros();
        enqueue_action(action_tx, Action::LoadOcorrencias);
    } else if ctrl(&key, 'r') {
        app.navigate_to(View::Ronda);
    } else if ctrl(&key, 'o') {
        app.navigate_to(View::Relatorio);
    }
}
