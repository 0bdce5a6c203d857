//! Terminal user interface
//!
//! A three-view ratatui app: a trip form with interactive destination
//! selectors, a chat pane for conversational revisions, and an itinerary
//! view whose day cards are re-derived from the session bundle on every
//! frame. Mouse capture is enabled so the selector's pointer contract
//! (hover to highlight, click to commit, click-away to close) works.

mod app;
mod events;
mod runner;
pub mod selector;
pub mod state;
mod views;

pub use app::App;
pub use events::{Event, EventHandler};
pub use runner::TuiRunner;
pub use selector::{CANDIDATE_CAP, PlaceSelector, SelectorEvent, SelectorState};
pub use state::{AppState, View};

use std::io::{self, Stdout};
use std::sync::Arc;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use eyre::{Context, Result};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::client::HttpPlannerClient;
use crate::config::Config;

/// Terminal type alias
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal for TUI mode
pub fn init() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode
pub fn restore() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}

/// Run the TUI application.
///
/// This is the main entry point for `wp tui`.
pub async fn run(config: &Config) -> Result<()> {
    let client = HttpPlannerClient::from_config(&config.service).context("Failed to create planner client")?;

    let terminal = init()?;

    // Restore the terminal even on early return or error.
    struct TerminalGuard;
    impl Drop for TerminalGuard {
        fn drop(&mut self) {
            let _ = restore();
        }
    }
    let _guard = TerminalGuard;

    let app = App::new(AppState::new(config));
    let mut runner = TuiRunner::new(terminal, Arc::new(client), app);
    runner.run().await
}
