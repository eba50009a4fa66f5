use thiserror::Error;

use crate::download::DownloadError;

/// Centralized error types for the application
///
/// Every layer converts into this enum so handlers can report failures in one place.
///
/// # Example
///
/// ```no_run
/// use clipcore::AppError;
///
/// fn handle_error(err: AppError) {
///     eprintln!("Error: {}", err);
/// }
/// ```
#[derive(Error, Debug)]
pub enum AppError {
    /// Missing or malformed configuration (bot token, paths)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Telegram API errors
    #[cfg(feature = "telegram")]
    #[error("Telegram error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    /// Download/yt-dlp errors
    #[error("Download error: {0}")]
    Download(#[from] DownloadError),

    /// Failures of a chat transport that is not Telegram (tests, CLI)
    #[error("Transport error: {0}")]
    Transport(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;
