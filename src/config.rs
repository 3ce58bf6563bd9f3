//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{
    ANNOUNCEMENT_DURATION, APP_NAME, ENTER_ANIMATION_DURATION, OVERLAY_DURATION,
    SIMULATED_SUBMIT_DELAY,
};
use crate::dispatcher::TabBoundary;
use crate::pages::SiteInfo;
use crate::preference::ThemePreference;
use crate::transition::TransitionTimings;

/// Theme used when nothing has been stored yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FirstRunTheme {
    /// Always start light
    #[default]
    Light,
    /// Follow the OS setting, light if it cannot be detected
    System,
}

impl FirstRunTheme {
    /// Resolves to a concrete preference.
    #[must_use]
    pub fn resolve(self) -> ThemePreference {
        match self {
            Self::Light => ThemePreference::Light,
            Self::System => match dark_light::detect() {
                Ok(dark_light::Mode::Dark) => ThemePreference::Dark,
                Ok(dark_light::Mode::Light | dark_light::Mode::Unspecified) | Err(_) => {
                    ThemePreference::Light
                }
            },
        }
    }
}

/// UI preferences configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Tab behavior when the roving order runs out
    pub tab_boundary: TabBoundary,
    /// Skip the slide-in offset of new pages
    pub reduced_motion: bool,
    /// Event poll interval in milliseconds
    pub tick_rate_ms: u64,
    /// Fallback theme for a fresh session
    pub first_run_theme: FirstRunTheme,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tab_boundary: TabBoundary::default(),
            reduced_motion: false,
            tick_rate_ms: 50,
            first_run_theme: FirstRunTheme::default(),
        }
    }
}

/// Durations of the transient UI pieces, in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Loading overlay
    pub overlay_ms: u64,
    /// Lifetime of a route announcement
    pub announcement_ms: u64,
    /// Slide-in of new page content
    pub enter_animation_ms: u64,
}

#[allow(clippy::cast_possible_truncation)]
const fn millis(duration: Duration) -> u64 {
    duration.as_millis() as u64
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            overlay_ms: millis(OVERLAY_DURATION),
            announcement_ms: millis(ANNOUNCEMENT_DURATION),
            enter_animation_ms: millis(ENTER_ANIMATION_DURATION),
        }
    }
}

impl TimingConfig {
    /// Timings for the page transition sequencer.
    #[must_use]
    pub const fn transition(&self) -> TransitionTimings {
        TransitionTimings {
            overlay: Duration::from_millis(self.overlay_ms),
            enter_animation: Duration::from_millis(self.enter_animation_ms),
        }
    }

    /// Lifetime of a route announcement.
    #[must_use]
    pub const fn announcement(&self) -> Duration {
        Duration::from_millis(self.announcement_ms)
    }
}

/// Contact form settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    /// Delay of the simulated submission
    pub submit_delay_ms: u64,
    /// Address shown in `mailto:` links
    pub email: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            submit_delay_ms: millis(SIMULATED_SUBMIT_DELAY),
            email: SiteInfo::default().contact_email,
        }
    }
}

/// Where the theme preference is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StorageConfig {
    /// Override of the storage file (default: `storage.json` in the config dir)
    pub path: Option<PathBuf>,
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/Folio/config.toml`
/// - macOS: `~/Library/Application Support/Folio/config.toml`
/// - Windows: `%APPDATA%\Folio\config.toml`
///
/// # Validation
///
/// - `tick_rate_ms` must be within 10..=1000
/// - `overlay_ms` and `enter_animation_ms` must be non-zero
/// - `email` must not be empty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// UI behavior
    pub ui: UiConfig,
    /// Transient UI durations
    pub timing: TimingConfig,
    /// Contact form
    pub contact: ContactConfig,
    /// Preference storage
    pub storage: StorageConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks if the config file exists on disk.
    #[must_use]
    pub fn exists() -> bool {
        Self::config_file_path()
            .map(|path| path.exists())
            .unwrap_or(false)
    }

    /// Gets the platform-specific config directory path.
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(APP_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Loads configuration from `path`.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        Ok(config)
    }

    /// Saves configuration to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Saves configuration to `path` using atomic write.
    ///
    /// Uses temp file + rename pattern for atomic writes.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).with_context(|| {
                format!("Failed to create config directory: {}", dir.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        let temp_path = path.with_extension("toml.tmp");

        fs::write(&temp_path, content).with_context(|| {
            format!("Failed to write temp config file: {}", temp_path.display())
        })?;

        fs::rename(&temp_path, path).with_context(|| {
            format!("Failed to rename temp config file to: {}", path.display())
        })?;

        Ok(())
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        if !(10..=1000).contains(&self.ui.tick_rate_ms) {
            anyhow::bail!(
                "ui.tick_rate_ms must be between 10 and 1000, got {}",
                self.ui.tick_rate_ms
            );
        }
        if self.timing.overlay_ms == 0 {
            anyhow::bail!("timing.overlay_ms must be greater than 0");
        }
        if self.timing.enter_animation_ms == 0 {
            anyhow::bail!("timing.enter_animation_ms must be greater than 0");
        }
        if self.contact.email.trim().is_empty() {
            anyhow::bail!("contact.email must not be empty");
        }

        Ok(())
    }

    /// Event poll interval.
    #[must_use]
    pub const fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.ui.tick_rate_ms)
    }

    /// Delay of the simulated contact submission.
    #[must_use]
    pub const fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.contact.submit_delay_ms)
    }

    /// Site facts derived from the config.
    #[must_use]
    pub fn site_info(&self) -> SiteInfo {
        SiteInfo {
            contact_email: self.contact.email.clone(),
            ..SiteInfo::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_new() {
        let config = Config::new();
        assert_eq!(config.ui.tab_boundary, TabBoundary::Native);
        assert!(!config.ui.reduced_motion);
        assert_eq!(config.ui.first_run_theme, FirstRunTheme::Light);
        assert_eq!(config.tick_rate(), Duration::from_millis(50));
        assert_eq!(config.timing.transition().overlay, Duration::from_millis(500));
        assert_eq!(config.timing.announcement(), Duration::from_millis(1000));
        assert_eq!(config.submit_delay(), Duration::from_millis(1000));
        assert!(config.storage.path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validate_ranges() {
        let mut config = Config::new();
        config.ui.tick_rate_ms = 5;
        assert!(config.validate().is_err());
        config.ui.tick_rate_ms = 1000;
        assert!(config.validate().is_ok());

        config.timing.overlay_ms = 0;
        assert!(config.validate().is_err());
        config.timing.overlay_ms = 500;

        config.contact.email = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::new();
        config.ui.tab_boundary = TabBoundary::Trap;
        config.ui.reduced_motion = true;
        config.contact.email = "me@example.org".to_string();

        config.save_to(&config_file).unwrap();
        assert!(!config_file.with_extension("toml.tmp").exists());

        let loaded = Config::load_from(&config_file).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.site_info().contact_email, "me@example.org");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        fs::write(&config_file, "[ui]\ntab_boundary = \"trap\"\n").unwrap();

        let loaded = Config::load_from(&config_file).unwrap();
        assert_eq!(loaded.ui.tab_boundary, TabBoundary::Trap);
        assert_eq!(loaded.ui.tick_rate_ms, 50);
        assert_eq!(loaded.timing, TimingConfig::default());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let loaded = Config::load_from(&temp_dir.path().join("absent.toml")).unwrap();
        assert_eq!(loaded, Config::new());
    }

    #[test]
    fn test_invalid_values_rejected_on_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        fs::write(&config_file, "[ui]\ntick_rate_ms = 0\n").unwrap();
        assert!(Config::load_from(&config_file).is_err());

        fs::write(&config_file, "[ui]\ntab_boundary = \"wrap\"\n").unwrap();
        assert!(Config::load_from(&config_file).is_err());
    }
}
