use crate::app::App;
use crate::browser;
use crossterm::event::{KeyCode, KeyEvent};

use super::ctrl;

pub(super) fn handle_preview_key(key: KeyEvent, app: &mut App) {
    if key.code == KeyCode::Enter || ctrl(&key, 'w') {
        let Some(link) = app.preview.as_ref().and_then(|p| p.link.clone()) else {
            return;
        };
        match browser::open(&link) {
            Ok(()) => app.set_status("Abrindo WhatsApp no navegador...".to_string()),
            Err(e) => {
                tracing::warn!("could not open browser: {:#}", e);
                app.set_status(format!("Não foi possível abrir o navegador. Link: {}", link));
            }
        }
        return;
    }

    let Some(preview) = app.preview.as_mut() else {
        return;
    };
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.close_preview(),
        KeyCode::Down | KeyCode::Char('j') => preview.scroll = preview.scroll.saturating_add(1),
        KeyCode::Up | KeyCode::Char('k') => preview.scroll = preview.scroll.saturating_sub(1),
        KeyCode::PageDown => preview.scroll = preview.scroll.saturating_add(10),
        KeyCode::PageUp => preview.scroll = preview.scroll.saturating_sub(10),
        _ => {}
    }
}
