//! Terminal rendering and event loop for tern.
//!
//! Handles setup/teardown of raw mode and the alternate screen, redraws,
//! and delivery of key and resize events to the app.

use crate::app::{AppState, KeypressResult};
use crate::ui;
use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use std::{io, time::Duration};

/// Poll interval of the event loop. Fuzzy enumeration advances once per elapsed poll.
const TICK: Duration = Duration::from_millis(16);

/// Initializes the terminal in raw mode and alternate screen and runs the main event loop.
///
/// Blocks until quit. Returns an error if terminal setup or teardown fails.
pub fn run_terminal(app: &mut AppState) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Hide)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = event_loop(&mut terminal, app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, Show)?;
    result
}

/// Draws, polls and dispatches until the app asks to quit.
///
/// Every event is fully handled before the next frame is painted.
fn event_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut AppState) -> io::Result<()>
where
    io::Error: From<<B as Backend>::Error>,
{
    terminal.draw(|f| ui::render(f, app))?;

    loop {
        if app.tick() {
            terminal.draw(|f| ui::render(f, app))?;
        }

        if !event::poll(TICK)? {
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if let KeypressResult::Quit = app.handle_keypress(key) {
                    log::info!("quit requested");
                    break;
                }
                terminal.draw(|f| ui::render(f, app))?;
            }
            Event::Resize(_, _) => {
                terminal.draw(|f| ui::render(f, app))?;
            }
            _ => {}
        }
    }
    Ok(())
}
