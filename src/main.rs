pub mod api;
pub mod app;
pub mod cache;
pub mod cli;
pub mod command;
pub mod config;
pub mod content;
pub mod event;
pub mod nav;
pub mod projects;
pub mod store;
pub mod theme;
pub mod ui;

use app::App;
use clap::Parser;
use cli::{Cli, CliCommand};

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    // Initialize tracing (logs to stderr if RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        // No subcommand or explicit `tui` → launch the interactive TUI.
        None | Some(CliCommand::Tui) => run_tui(cli.location).await,
        // All other subcommands → non-interactive JSONL output.
        Some(cmd) => cli::run_command(cmd).await,
    }
}

/// Launch the interactive TUI, optionally deep-linked to a location.
async fn run_tui(location: Option<String>) -> color_eyre::Result<()> {
    let (service, store) = cli::build_content_service();

    let terminal = ratatui::init();
    let result = App::new(service, store, location.as_deref().unwrap_or(""))
        .run(terminal)
        .await;
    ratatui::restore();
    result
}
