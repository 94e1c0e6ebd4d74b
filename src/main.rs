use std::io;
use std::time::Duration;

use anyhow::Context;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use opsdesk::config::AppConfig;
use opsdesk::tui::app::AppState;
use opsdesk::tui::services::Services;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Config first: logging writes under the configured data directory.
    let config = AppConfig::load();
    let _log_guard = opsdesk::core::logging::init(&config.data_dir());
    log::info!(
        "{} v{} starting as {} ({})",
        opsdesk::NAME,
        opsdesk::VERSION,
        config.session.name,
        config.session.role
    );

    // Setup terminal
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    if config.tui.mouse_enabled {
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    } else {
        execute!(stdout, EnterAlternateScreen)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let services = Services::new(&config, event_tx);
    let mut app = AppState::new(&config, services, event_rx);
    let tick_rate = Duration::from_millis(config.tui.tick_rate_ms);
    let result = app.run(&mut terminal, tick_rate).await;

    // Restore terminal
    disable_raw_mode()?;
    if config.tui.mouse_enabled {
        execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    } else {
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    }
    terminal.show_cursor()?;

    if let Err(e) = result {
        log::error!("Event loop exited with error: {e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    log::info!("Shutting down cleanly");
    Ok(())
}
