//! Interactive terminal chart viewer.
//!
//! Feature-gated behind `tui`. Launch with `--tui` on the CLI.

mod controls;
mod layout;
/// Viewer application state.
pub mod runtime;
mod style;

use std::io;

use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use thiserror::Error;
use tracing::debug;

use crate::config::ChartConfig;
use crate::series::PointSeries;
use runtime::App;

type ChartTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Failure to start or keep running the viewer.
#[derive(Debug, Error)]
pub enum TuiError {
    #[error("cannot build a chart from this configuration")]
    NoChart,
    #[error("failed to set up the terminal: {0}")]
    Setup(#[source] io::Error),
    #[error("viewer stopped: {0}")]
    EventLoop(#[source] io::Error),
}

/// Runs the viewer until the user quits.
///
/// The terminal is restored on every exit path once raw mode is on.
///
/// # Errors
///
/// Returns a [`TuiError`] if no chart can be built or terminal I/O fails.
pub fn run(name: &str, config: ChartConfig, series: Option<PointSeries>) -> Result<(), TuiError> {
    let mut app = App::new(name, config, series).ok_or(TuiError::NoChart)?;

    enable_raw_mode().map_err(TuiError::Setup)?;
    let mut terminal = match enter() {
        Ok(terminal) => terminal,
        Err(e) => {
            let _ = disable_raw_mode();
            return Err(TuiError::Setup(e));
        }
    };

    let result = event_loop(&mut terminal, &mut app);
    leave(&mut terminal);
    debug!(preset = %app.preset_name, zoom = app.state().zoom(), "viewer closed");
    result.map_err(TuiError::EventLoop)
}

fn enter() -> io::Result<ChartTerminal> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

fn leave(terminal: &mut ChartTerminal) {
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();
}

/// Draw, then block on the next key.
fn event_loop(terminal: &mut ChartTerminal, app: &mut App) -> io::Result<()> {
    while !app.quit {
        terminal.draw(|frame| {
            app.width = f64::from(frame.area().width.max(1));
            layout::render(frame, app);
        })?;

        if let Event::Key(key) = event::read()? {
            controls::handle_key(app, key);
        }
    }
    Ok(())
}
