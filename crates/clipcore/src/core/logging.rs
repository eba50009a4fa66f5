//! Logging initialization and configuration checking
//!
//! This module provides:
//! - Logger initialization (console + file)
//! - Startup diagnostics for the download settings

use anyhow::Result;
use std::fs::File;
use std::sync::Mutex;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::core::config;

/// Default filter when RUST_LOG is not set
const DEFAULT_FILTER: &str = "info";

/// Initialize logger for both console and file output
///
/// `RUST_LOG` overrides the default `info` level. Records emitted through the
/// `log` facade (teloxide uses it) are forwarded into the same subscriber.
///
/// # Arguments
/// * `log_file_path` - Path to the log file
///
/// # Returns
/// * `Ok(())` - Logger initialized successfully
/// * `Err(anyhow::Error)` - Failed to create the file or a global logger is already set
pub fn init_logger(log_file_path: &str) -> Result<()> {
    let log_file = File::create(log_file_path).map_err(|e| anyhow::anyhow!("Failed to create log file: {}", e))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(log_file)))
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;

    Ok(())
}

/// Logs the download configuration at application startup
///
/// Reports the yt-dlp binary, the output directory and whether it exists yet,
/// the ffmpeg location and the cleanup policy.
pub fn log_startup_configuration() {
    tracing::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    tracing::info!("Download configuration");
    tracing::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    tracing::info!("YTDL_BIN: {}", config::YTDL_BIN.as_str());

    let folder = config::DOWNLOAD_FOLDER.as_path();
    if folder.is_dir() {
        tracing::info!("DOWNLOAD_FOLDER: {}", folder.display());
    } else {
        tracing::info!("DOWNLOAD_FOLDER: {} (will be created)", folder.display());
    }

    match config::FFMPEG_LOCATION.as_deref() {
        Some(location) => tracing::info!("FFMPEG_LOCATION: {}", location),
        None => tracing::info!("FFMPEG_LOCATION: not set, yt-dlp will look in PATH"),
    }

    if *config::KEEP_DOWNLOADS {
        tracing::info!("KEEP_DOWNLOADS: on, delivered files stay on disk");
    } else {
        tracing::info!("KEEP_DOWNLOADS: off, delivered files are removed after upload");
    }

    if config::BOT_TOKEN.is_none() {
        tracing::error!("BOT_TOKEN is not set - the bot will not be able to start");
    }
}
