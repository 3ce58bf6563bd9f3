//! Folio - keyboard-first personal portfolio in the terminal
//!
//! Parses the command line, sets up file logging, loads the configuration
//! and hands over to the terminal UI.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio::app::launch::{self, LaunchOptions, StorageChoice};
use folio::config::Config;
use folio::constants::{APP_BINARY_NAME, APP_NAME};

/// Folio - keyboard-first personal portfolio in the terminal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Location to open, e.g. /about
    #[arg(long, value_name = "PATH", default_value = "/")]
    path: String,

    /// Config file to use instead of the default one
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// File holding the saved theme preference
    #[arg(long, value_name = "FILE", conflicts_with = "ephemeral")]
    storage: Option<PathBuf>,

    /// Keep the theme preference in memory only
    #[arg(long)]
    ephemeral: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Write a default config file and exit
    #[arg(long)]
    init_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::config_file_path()?,
    };

    if cli.init_config {
        return init_config(&config_path);
    }

    init_logging(cli.verbose);

    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("using default configuration: {e:#}");
            eprintln!("Warning: {e:#}");
            eprintln!("Continuing with the default configuration.");
            Config::default()
        }
    };

    let storage = StorageChoice::resolve(cli.ephemeral, cli.storage, &config);

    launch::launch(LaunchOptions {
        config,
        storage,
        initial_path: cli.path,
    })
}

fn init_config(path: &Path) -> Result<()> {
    if path.exists() {
        println!("Config file already exists: {}", path.display());
        println!("Remove it first to regenerate the defaults.");
        return Ok(());
    }
    Config::default().save_to(path)?;
    println!("{} config written to: {}", APP_NAME, path.display());
    println!();
    println!("Start the site with:");
    println!("  {APP_BINARY_NAME}");
    Ok(())
}

/// Logs go to `folio.log` in the config directory; the terminal belongs to the UI.
fn init_logging(verbose: bool) {
    let file = match open_log_file() {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Warning: logging disabled: {e:#}");
            return;
        }
    };

    let filter = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
}

fn open_log_file() -> Result<File> {
    let dir = Config::config_dir()?;
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;
    let path = dir.join(format!("{APP_BINARY_NAME}.log"));
    File::options()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))
}
