//! Terminal user interface.
//!
//! This module contains the main TUI loop and the widgets that draw an
//! [`AppState`] with Ratatui. The terminal plays the part of the page host:
//! it feeds key events and the clock into the state and renders whatever the
//! document currently holds.

// Allow intentional type casts for terminal coordinates
#![allow(clippy::cast_possible_truncation)]

pub mod chrome;
pub mod page_view;
pub mod status_bar;
pub mod theme;

use std::io;
use std::time::Instant;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};

use crate::app::AppState;
use chrome::{Footer, NavBar};
use page_view::PageView;
use status_bar::StatusBar;
pub use theme::Theme;

const SPINNER: [char; 4] = ['◐', '◓', '◑', '◒'];

/// Initialize terminal for TUI
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restore terminal to normal state
pub fn restore_terminal(mut terminal: Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Main event loop
///
/// Time is measured from `start`; every iteration advances the state's clock
/// so timers fire even while no key is pressed.
pub fn run_tui<B: Backend>(
    state: &mut AppState,
    terminal: &mut Terminal<B>,
    start: Instant,
) -> Result<()> {
    let tick_rate = state.config().tick_rate();

    loop {
        state.tick(start.elapsed());

        terminal
            .draw(|f| render(f, state))
            .context("Failed to draw frame")?;

        // Resize and other events just trigger a redraw on the next loop
        if event::poll(tick_rate).context("Failed to poll terminal events")? {
            if let Event::Key(key) = event::read().context("Failed to read terminal event")? {
                state.handle_key_event(key, start.elapsed());
            }
        }

        if state.should_quit() {
            break;
        }
    }

    Ok(())
}

/// Render the UI from current state
pub fn render(f: &mut Frame, state: &AppState) {
    let theme = Theme::from_marker(state.is_dark());

    // Fill entire screen with theme background color first
    let full_bg = Block::default().style(Style::default().bg(theme.background));
    f.render_widget(full_bg, f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Navbar
            Constraint::Min(5),    // Main content
            Constraint::Length(2), // Footer
            Constraint::Length(3), // Status bar
        ])
        .split(f.area());

    NavBar::render(f, chunks[0], state, &theme);
    PageView::render(f, chunks[1], state, &theme);
    Footer::render(f, chunks[2], state, &theme);
    StatusBar::render(f, chunks[3], state, &theme);

    if state.overlay().is_busy() {
        render_loading_overlay(f, state, &theme);
    }
}

/// Render the loading box on top of everything while a transition runs
fn render_loading_overlay(f: &mut Frame, state: &AppState, theme: &Theme) {
    let area = centered_box(20, 3, f.area());

    // Clear the background area first
    f.render_widget(Clear, area);

    let frame = (state.now().as_millis() / 100) as usize % SPINNER.len();
    let text = Line::from(vec![
        Span::styled(
            SPINNER[frame].to_string(),
            Style::default().fg(theme.primary),
        ),
        Span::styled(
            " Loading...",
            Style::default()
                .fg(theme.text)
                .add_modifier(Modifier::BOLD),
        ),
    ]);

    let widget = Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.primary))
            .style(Style::default().bg(theme.surface)),
    );
    f.render_widget(widget, area);
}

/// A fixed-size rectangle centered in `r`, shrunk to fit.
fn centered_box(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    Rect {
        x: r.x + (r.width - width) / 2,
        y: r.y + (r.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::contact::SimulatedSubmitter;
    use crate::storage::MemoryStorage;
    use ratatui::backend::TestBackend;
    use std::time::Duration;

    fn screen_text(state: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| render(f, state)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn app() -> AppState {
        AppState::new(
            Config::default(),
            Box::new(MemoryStorage::new()),
            Box::new(SimulatedSubmitter::default()),
            "/",
            Duration::ZERO,
        )
    }

    #[test]
    fn test_loading_overlay_drawn_while_busy() {
        let mut state = app();
        assert!(screen_text(&state).contains("Loading..."));
        state.tick(Duration::from_millis(500));
        assert!(!screen_text(&state).contains("Loading..."));
    }

    #[test]
    fn test_page_and_chrome_drawn() {
        let mut state = app();
        state.tick(Duration::from_millis(600));
        let text = screen_text(&state);
        assert!(text.contains("Projects"));
        assert!(text.contains("All rights reserved."));
        assert!(text.contains("Alt + T"));
        // the live region is visually hidden
        assert!(!text.contains("Navigated to"));
    }

    #[test]
    fn test_centered_box_fits_small_area() {
        let area = Rect::new(0, 0, 10, 2);
        let rect = centered_box(20, 3, area);
        assert_eq!(rect, Rect::new(0, 0, 10, 2));

        let rect = centered_box(20, 3, Rect::new(0, 0, 40, 11));
        assert_eq!(rect, Rect::new(10, 4, 20, 3));
    }
}
