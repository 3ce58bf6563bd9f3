//! Shared fixtures for the integration tests.
#![allow(dead_code)] // not every test file uses every fixture

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use folio::app::AppState;
use folio::config::Config;
use folio::contact::SimulatedSubmitter;
use folio::dom::ElementId;
use folio::storage::{MemoryStorage, PreferenceStorage};
use std::time::Duration;

/// Milliseconds since application start.
pub fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

/// App mounted at `path` at time zero with in-memory storage.
pub fn app_at(path: &str) -> AppState {
    app_with(Config::default(), Box::new(MemoryStorage::new()), path)
}

/// App mounted at `path` at time zero.
pub fn app_with(config: Config, storage: Box<dyn PreferenceStorage>, path: &str) -> AppState {
    AppState::new(
        config,
        storage,
        Box::new(SimulatedSubmitter::default()),
        path,
        Duration::ZERO,
    )
}

/// Presses a key at time `now`.
pub fn press(app: &mut AppState, code: KeyCode, modifiers: KeyModifiers, now: Duration) {
    app.handle_key_event(KeyEvent::new(code, modifiers), now);
}

/// Presses Alt+`letter` at time `now`.
pub fn alt(app: &mut AppState, letter: char, now: Duration) {
    press(app, KeyCode::Char(letter), KeyModifiers::ALT, now);
}

/// Types text at the current time.
pub fn type_text(app: &mut AppState, text: &str) {
    for c in text.chars() {
        let now = app.now();
        press(app, KeyCode::Char(c), KeyModifiers::NONE, now);
    }
}

/// Presses Tab until `matches` holds for the focused element, at most `limit` times.
pub fn tab_until(app: &mut AppState, limit: usize, matches: impl Fn(&AppState, ElementId) -> bool) -> bool {
    for _ in 0..limit {
        let now = app.now();
        press(app, KeyCode::Tab, KeyModifiers::NONE, now);
        if let Some(active) = app.document().active_element() {
            if matches(app, active) {
                return true;
            }
        }
    }
    false
}

/// Text of the live-region nodes currently in the document.
pub fn live_regions(app: &AppState) -> Vec<String> {
    app.document()
        .status_nodes()
        .map(|node| node.text.clone())
        .collect()
}
