//! Terminal front end for the outbreak simulation.
//!
//! [`renderer::WorldWidget`] scales a `WorldSnapshot` into terminal cells,
//! one glyph per person with trails, glow and infection flashes blended into
//! the cell backgrounds. The [`views`] module holds the surrounding panels:
//! `StatusWidget` for the population counts,
//! `SparklinesWidget` for the infected and immune histories,
//! `ChronicleWidget` for the outbreak log, `ControlPanel` for the clickable
//! parameter buttons and `HelpOverlay` for the key reference. [`Tui`] owns
//! the crossterm terminal session they are drawn into.

pub mod renderer;
pub mod views;

use anyhow::Result;
use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout};

/// Terminal session: alternate screen, raw mode and mouse capture.
///
/// The terminal is also restored on drop, so an early `?` return out of the
/// app loop still leaves a usable shell.
pub struct Tui {
    pub terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl Tui {
    pub fn new() -> Result<Self> {
        let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        Ok(Self { terminal })
    }

    pub fn init(&mut self) -> Result<()> {
        execute!(
            io::stdout(),
            EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;
        enable_raw_mode()?;
        self.terminal.clear()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        disable_raw_mode()?;
        execute!(
            io::stdout(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            cursor::Show
        )?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            io::stdout(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            cursor::Show
        );
    }
}
