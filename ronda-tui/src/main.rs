mod api;
mod app;
mod bootstrap;
mod browser;
mod cli;
mod config;
mod domain;
mod logging;
mod login;
mod runtime;
mod session_store;
mod ui;

use anyhow::{Context, Result};
use api::ApiClient;
use app::App;
use clap::Parser;
use cli::{Cli, Commands};
use config::RondaConfig;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use domain::form_state::{FormStore, MemoryFormStore};
use ratatui::{backend::CrosstermBackend, Terminal};
use session_store::FileFormStore;
use std::io;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let _log_guard = match session_store::root_path().and_then(|dir| logging::init(&dir.join("logs")))
    {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: logging disabled: {:#}", e);
            None
        }
    };

    match cli.command {
        Commands::Run => {
            let cfg = RondaConfig::load()?;
            let token = session_store::load_token()?
                .context("Not logged in. Run `ronda-tui login` first.")?;
            let client = ApiClient::new(&cfg.api_url, &token)?;
            let store = FileFormStore::in_config_dir()?;
            run_tui(&cfg, client, Box::new(store)).await
        }
        Commands::Dev => {
            let cfg = RondaConfig::load()?;
            let client = ApiClient::dev()?;
            run_tui(&cfg, client, Box::new(MemoryFormStore::default())).await
        }
        Commands::Login => {
            let cfg = RondaConfig::load()?;
            login::run_login(&cfg.api_url).await
        }
        Commands::Logout => {
            session_store::clear_token()?;
            println!("Sessão removida.");
            Ok(())
        }
        Commands::ConfigPath => {
            let path = RondaConfig::ensure_exists()?;
            println!("{}", path.display());
            Ok(())
        }
    }
}

async fn run_tui(cfg: &RondaConfig, client: ApiClient, store: Box<dyn FormStore>) -> Result<()> {
    let mut app = App::new(cfg, store);
    bootstrap::initialize_app_state(&mut app, &client).await;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = runtime::run_app(&mut terminal, &mut app, &client).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        tracing::error!("ronda-tui exited with error: {:#}", err);
    }
    res
}
