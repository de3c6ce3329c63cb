//! Trainify terminal user interface
//!
//! Admin screens (overview and the four management pages) sit next to a
//! collapsible sidebar; members get a single dashboard with their meals.

pub mod app;
pub mod components;
pub mod entities;
pub mod operations;
pub mod screens;
pub mod traits;
pub mod ui;

pub use app::{App, Screen};

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tracing::info;

use crate::config::Config;
use crate::session::AuthSession;

/// Take over the terminal and run the dashboard until the user quits
pub async fn run_tui(config: Config, session: AuthSession) -> Result<()> {
    info!("Starting TUI interface");

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config, session);
    let result = app.run(&mut terminal).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}
