use crate::app::{App, View};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::action_queue::{Action, ActionTx};

mod ocorrencias;
mod preview;
mod relatorio;
mod ronda;

fn enqueue_action(action_tx: &ActionTx, action: Action) {
    let _ = action_tx.send(action);
}

fn ctrl(key: &KeyEvent, c: char) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char(c)
}

pub(super) fn handle_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    if key.kind == KeyEventKind::Release {
        return;
    }
    if ctrl(&key, 'c') || ctrl(&key, 'q') {
        app.quit();
        return;
    }
    if app.preview.is_some() {
        preview::handle_preview_key(key, app);
        return;
    }

    if ctrl(&key, 'g') && app.current_view != View::Ocorrencias {
        app.open_ocorrencias();
        enqueue_action(action_tx, Action::LoadOcorrencias);
        return;
    }

    match app.current_view {
        View::Ronda => ronda::handle_ronda_key(key, app, action_tx),
        View::Relatorio => relatorio::handle_relatorio_key(key, app, action_tx),
        View::Ocorrencias => ocorrencias::handle_ocorrencias_key(key, app, action_tx),
    }
}
