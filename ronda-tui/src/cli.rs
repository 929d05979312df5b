use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "ronda-tui")]
#[command(about = "Terminal client for patrol rounds and occurrence reports")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run against the reporting backend
    Run,
    /// Run in dev mode with local in-memory data
    Dev,
    /// Log in with e-mail and password
    Login,
    /// Remove the local session token
    Logout,
    /// Print config path and create default file if missing
    ConfigPath,
}
