//! Startup: pick the preference storage, build the state, run the terminal UI.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;

use super::AppState;
use crate::config::Config;
use crate::contact::SimulatedSubmitter;
use crate::storage::{FileStorage, MemoryStorage, PreferenceStorage};
use crate::tui;

/// Where the theme preference lives for this session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageChoice {
    /// Nothing survives the session
    Ephemeral,
    /// JSON file at the given path
    File(PathBuf),
}

impl StorageChoice {
    /// Resolves the storage location.
    ///
    /// An explicit path wins over `[storage] path` in the config, which wins
    /// over the default file. If no default location can be determined the
    /// session runs without persistence.
    pub fn resolve(ephemeral: bool, explicit: Option<PathBuf>, config: &Config) -> Self {
        if ephemeral {
            return Self::Ephemeral;
        }
        if let Some(path) = explicit.or_else(|| config.storage.path.clone()) {
            return Self::File(path);
        }
        match FileStorage::default_path() {
            Ok(path) => Self::File(path),
            Err(e) => {
                tracing::warn!("no storage location, preferences will not persist: {e:#}");
                Self::Ephemeral
            }
        }
    }

    /// Opens the backend.
    pub fn open(&self) -> Box<dyn PreferenceStorage> {
        match self {
            Self::Ephemeral => Box::new(MemoryStorage::new()),
            Self::File(path) => Box::new(FileStorage::new(path.clone())),
        }
    }
}

/// Everything needed to start a session.
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    /// Loaded configuration
    pub config: Config,
    /// Preference storage
    pub storage: StorageChoice,
    /// First location to show
    pub initial_path: String,
}

/// Builds the application state at time zero.
pub fn build_state(options: &LaunchOptions) -> AppState {
    let submitter = SimulatedSubmitter::new(options.config.submit_delay());
    AppState::new(
        options.config.clone(),
        options.storage.open(),
        Box::new(submitter),
        &options.initial_path,
        std::time::Duration::ZERO,
    )
}

/// Runs a full session in the terminal.
pub fn launch(options: LaunchOptions) -> Result<()> {
    tracing::info!(path = %options.initial_path, storage = ?options.storage, "starting session");

    let start = Instant::now();
    let mut app_state = build_state(&options);

    // Initialize TUI
    let mut terminal = tui::setup_terminal()?;

    // Run main TUI loop
    let result = tui::run_tui(&mut app_state, &mut terminal, start);

    // Restore terminal
    tui::restore_terminal(terminal)?;

    app_state.unmount();
    tracing::info!("session ended");

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_storage_choice_precedence() {
        let mut config = Config::new();
        config.storage.path = Some(PathBuf::from("/from/config.json"));

        assert_eq!(
            StorageChoice::resolve(true, Some(PathBuf::from("/x.json")), &config),
            StorageChoice::Ephemeral
        );
        assert_eq!(
            StorageChoice::resolve(false, Some(PathBuf::from("/x.json")), &config),
            StorageChoice::File(PathBuf::from("/x.json"))
        );
        assert_eq!(
            StorageChoice::resolve(false, None, &config),
            StorageChoice::File(PathBuf::from("/from/config.json"))
        );
    }

    #[test]
    fn test_build_state_uses_options() {
        let temp_dir = TempDir::new().unwrap();
        let options = LaunchOptions {
            config: Config::new(),
            storage: StorageChoice::File(temp_dir.path().join("storage.json")),
            initial_path: "/about".to_string(),
        };
        let state = build_state(&options);
        assert_eq!(state.router().location(), "/about");
        assert!(state.preferences().is_persistent());
        // the initial preference is written through on load
        assert!(temp_dir.path().join("storage.json").exists());
    }
}
