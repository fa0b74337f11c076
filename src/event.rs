use std::io::Stdout;

use crossterm::event;
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::app::App;
use crate::error::Result;
use crate::ui;

/// Single-threaded event pump: draw, then block on the next terminal event
/// and run it to completion.
pub fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;
        if app.needs_full_clear {
            app.needs_full_clear = false;
            terminal.clear()?;
            terminal.draw(|f| ui::draw(f, app))?;
        }

        if app.should_quit {
            return Ok(());
        }

        app.handle_event(event::read()?);
    }
}
