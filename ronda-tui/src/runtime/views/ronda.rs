use crate::app::{App, PatrolField, View};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::super::action_queue::{Action, ActionTx};
use super::{ctrl, enqueue_action};

pub(super) fn handle_ronda_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        handle_ronda_command(key, app, action_tx);
        return;
    }

    let on_residencial = app.focused_patrol_field == PatrolField::Residencial;
    let has_suggestions = on_residencial && !app.visible_condominios().is_empty();

    match key.code {
        KeyCode::Tab => app.focused_patrol_field = app.focused_patrol_field.next(),
        KeyCode::BackTab => app.focused_patrol_field = app.focused_patrol_field.previous(),
        KeyCode::Down if has_suggestions => app.condominio_next(),
        KeyCode::Up if has_suggestions => app.condominio_previous(),
        KeyCode::Down => app.session_next(),
        KeyCode::Up => app.session_previous(),
        KeyCode::Enter if has_suggestions => {
            if app.accept_condominio().is_some() {
                app.focused_patrol_field = PatrolField::Inicio;
                enqueue_action(action_tx, Action::CheckActivePatrol);
            }
        }
        KeyCode::Enter if on_residencial && app.resolved_condominio().is_some() => {
            app.focused_patrol_field = PatrolField::Inicio;
            enqueue_action(action_tx, Action::CheckActivePatrol);
        }
        KeyCode::Enter => app.focused_patrol_field = app.focused_patrol_field.next(),
        KeyCode::PageUp => app.shift_date_by(-1),
        KeyCode::PageDown => app.shift_date_by(1),
        KeyCode::Left => app.focused_patrol_input().move_left(),
        KeyCode::Right => app.focused_patrol_input().move_right(),
        KeyCode::Home => app.focused_patrol_input().home(),
        KeyCode::End => app.focused_patrol_input().end(),
        KeyCode::Backspace => app.patrol_input_backspace(),
        KeyCode::Esc => app.clear_status(),
        KeyCode::Char(c) => app.patrol_input_char(c),
        _ => {}
    }
}

fn handle_ronda_command(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    if ctrl(&key, 's') {
        enqueue_action(action_tx, Action::StartPatrol);
    } else if ctrl(&key, 'f') {
        enqueue_action(action_tx, Action::FinishPatrol);
    } else if ctrl(&key, 'a') {
        enqueue_action(action_tx, Action::SaveCompletePatrol);
    } else if ctrl(&key, 'r') {
        enqueue_action(action_tx, Action::Reconcile);
    } else if ctrl(&key, 'k') {
        enqueue_action(action_tx, Action::Consolidate);
    } else if ctrl(&key, 'p') {
        match app.tracker.toggle_countdown() {
            Ok(true) => app.set_status("Contagem retomada".to_string()),
            Ok(false) => app.set_status("Contagem pausada".to_string()),
            Err(e) => app.set_status(e.to_string()),
        }
    } else if ctrl(&key, 'd') {
        match app.remove_selected_patrol() {
            Some(patrol) => app.set_status(format!("Ronda removida: {}", patrol.residencial)),
            None => app.set_status("Selecione uma ronda da lista (↑/↓)".to_string()),
        }
    } else if ctrl(&key, 'e') {
        app.toggle_escala();
    } else if ctrl(&key, 'n') {
        app.fill_now();
    } else if ctrl(&key, 'w') {
        let texto = app.whatsapp_report();
        let link = app.share_link(&texto);
        app.open_preview("Relatório do plantão", texto, Some(link));
    } else if ctrl(&key, 'o') {
        app.navigate_to(View::Relatorio);
    } else if ctrl(&key, 'u') {
        app.residencial_input.clear();
        app.filter_condominios();
    }
}
