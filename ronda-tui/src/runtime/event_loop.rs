use crate::api::ApiClient;
use crate::app::App;
use crate::ui;
use anyhow::Result;
use crossterm::event::{self, Event};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};

use super::action_queue::{channel, Action};
use super::actions::run_action;
use super::views::handle_key;

const POLL_INTERVAL: Duration = Duration::from_millis(100);
const TICK: Duration = Duration::from_secs(1);

pub async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    client: &ApiClient,
) -> Result<()> {
    let (action_tx, mut action_rx) = channel();
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                handle_key(key, app, &action_tx);
            }
        }

        while last_tick.elapsed() >= TICK {
            last_tick += TICK;
            if app.tracker.tick() {
                app.set_status("⏰ Tempo esgotado: hora da próxima ronda!".to_string());
            }
        }

        if let Some(lookup) = app.take_due_lookup(Instant::now()) {
            let _ = action_tx.send(Action::Lookup {
                kind: lookup.kind,
                query: lookup.query,
            });
        }

        let mut last_action: Option<Action> = None;
        while let Ok(action) = action_rx.try_recv() {
            // Repeated triggers queued in the same frame run once.
            if last_action.as_ref() == Some(&action) {
                continue;
            }
            last_action = Some(action.clone());

            app.is_loading = true;
            app.throbber_state.calc_next();
            terminal.draw(|f| ui::render(f, app))?;

            let is_submission = action.is_submission();
            run_action(action, app, client).await?;
            app.is_loading = false;

            // Keys pressed while the request was in flight are dropped.
            if is_submission {
                while event::poll(Duration::ZERO)? {
                    event::read()?;
                }
            }
        }

        if !app.running {
            break;
        }
    }

    Ok(())
}
