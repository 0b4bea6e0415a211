mod api;
mod app;
mod browse;
mod components;
mod config;
mod error;
mod event;
mod handler;
mod theme;
mod tui;
mod ui;

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use tracing::info;

use crate::api::client::StorageClient;
use crate::app::{App, ViewMode};
use crate::config::{AppConfig, ServerConfig, ThemeConfig, UiConfig};
use crate::event::{Event, EventHandler};
use crate::tui::{install_panic_hook, Tui};

/// A terminal browser for a PDF invoice storage server.
#[derive(Parser, Debug)]
#[command(name = "invb", version, about)]
struct Cli {
    /// Base URL of the storage server (e.g. http://localhost:8080)
    server: Option<String>,

    /// Start in the column (Miller) view instead of the tree view
    #[arg(long)]
    columns: bool,

    /// Path to a config file (overrides the default search)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Use plain ASCII markers instead of nerd font icons
    #[arg(long)]
    no_icons: bool,

    /// Append structured logs to this file (disabled when absent)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// Express the CLI flags as a partial config for the merge chain.
    fn overrides(&self) -> AppConfig {
        AppConfig {
            server: ServerConfig {
                url: self.server.clone(),
                ..ServerConfig::default()
            },
            ui: UiConfig {
                view: self.columns.then(|| "columns".to_string()),
                use_icons: self.no_icons.then_some(false),
                ..UiConfig::default()
            },
            theme: ThemeConfig::default(),
        }
    }
}

fn setup_tracing(log_file: Option<&PathBuf>) -> error::Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> error::Result<()> {
    let cli = Cli::parse();
    setup_tracing(cli.log_file.as_ref())?;

    let overrides = cli.overrides();
    let cfg = AppConfig::load(cli.config.as_deref(), Some(&overrides));

    let client = StorageClient::new(cfg.server_url(), Duration::from_secs(cfg.timeout_secs()))?;
    let view = if cfg.view() == "columns" {
        ViewMode::Columns
    } else {
        ViewMode::Tree
    };
    let colors = theme::resolve_theme(&cfg.theme);

    info!(server = %cfg.server_url(), ?view, "starting invoice browser");

    install_panic_hook();

    let mut tui = Tui::new()?;
    let mut app = App::new(
        client,
        cfg.root_segment(),
        view,
        cfg.use_icons(),
        cfg.confirm_delete(),
        colors,
    );
    let mut events = EventHandler::new(Duration::from_millis(16));
    let event_tx = events.sender();

    // Initial fetch for whichever variant is mounted first.
    match app.view {
        ViewMode::Tree => handler::spawn_tree_refresh(&mut app, &event_tx),
        ViewMode::Columns => {
            let request = app.columns.begin();
            handler::spawn_column_fetch(&app, request, &event_tx);
        }
    }

    loop {
        tui.terminal_mut().draw(|frame| {
            ui::render(&mut app, frame);
        })?;

        match events.next().await? {
            Event::Key(key) => handler::handle_key_event(&mut app, key, &event_tx),
            Event::Tick => app.clear_expired_status(),
            Event::Resize(_, _) => {}
            Event::TreeLoaded(result) => app.handle_tree_loaded(result),
            Event::ColumnLoaded { request, result } => app.handle_column_loaded(request, result),
            Event::MutationComplete { kind, result } => {
                // Successful mutations resynchronize by refetching the tree.
                if app.handle_mutation_complete(&kind, result) {
                    handler::spawn_tree_refresh(&mut app, &event_tx);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    tui.restore()?;
    Ok(())
}
