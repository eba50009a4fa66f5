//! Configuration for the bot.
//!
//! Every value is read once from the environment on first access. `main`
//! loads `.env` before touching any of these.

use once_cell::sync::Lazy;
use secrecy::{ExposeSecret, SecretString};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::core::error::{AppError, AppResult};

/// Bot token
/// Read from BOT_TOKEN or TELOXIDE_TOKEN environment variable
/// Empty values count as unset
pub static BOT_TOKEN: Lazy<Option<SecretString>> = Lazy::new(|| {
    env::var("BOT_TOKEN")
        .or_else(|_| env::var("TELOXIDE_TOKEN"))
        .ok()
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
        .map(SecretString::from)
});

/// Custom Bot API server URL (local telegram-bot-api for large uploads)
/// Read from BOT_API_URL environment variable
pub static BOT_API_URL: Lazy<Option<String>> = Lazy::new(|| non_empty_var("BOT_API_URL"));

/// Cached yt-dlp binary path
/// Read once at startup from YTDL_BIN environment variable or defaults to "yt-dlp"
pub static YTDL_BIN: Lazy<String> = Lazy::new(|| non_empty_var("YTDL_BIN").unwrap_or_else(|| "yt-dlp".to_string()));

/// Directory holding ffmpeg/ffprobe, passed to yt-dlp as --ffmpeg-location
/// Read from FFMPEG_LOCATION environment variable
pub static FFMPEG_LOCATION: Lazy<Option<String>> = Lazy::new(|| non_empty_var("FFMPEG_LOCATION"));

/// Download folder path
/// Read from DOWNLOAD_FOLDER environment variable, defaults to ./downloads
/// Supports tilde (~) expansion for home directory
pub static DOWNLOAD_FOLDER: Lazy<PathBuf> = Lazy::new(|| {
    let raw = non_empty_var("DOWNLOAD_FOLDER").unwrap_or_else(|| "downloads".to_string());
    PathBuf::from(shellexpand::tilde(&raw).into_owned())
});

/// Keep delivered files on disk instead of deleting them after upload
/// Read from KEEP_DOWNLOADS environment variable (1/true/yes/on)
pub static KEEP_DOWNLOADS: Lazy<bool> =
    Lazy::new(|| env::var("KEEP_DOWNLOADS").map(|raw| parse_flag(&raw)).unwrap_or(false));

/// Log file path
/// Read from LOG_FILE_PATH environment variable
/// Default: app.log
pub static LOG_FILE_PATH: Lazy<String> =
    Lazy::new(|| non_empty_var("LOG_FILE_PATH").unwrap_or_else(|| "app.log".to_string()));

/// Download configuration
pub mod download {
    /// Target bitrate for transcoded audio (kbps)
    pub const AUDIO_QUALITY_KBPS: u32 = 192;

    /// Container yt-dlp merges separate video and audio streams into
    pub const MERGE_OUTPUT_FORMAT: &str = "mp4";

    /// yt-dlp output template, relative to the download folder
    pub const OUTPUT_TEMPLATE: &str = "%(title)s.%(ext)s";
}

/// Network configuration
pub mod network {
    use super::Duration;

    /// Request timeout for HTTP requests (in seconds)
    /// Large video uploads to the Bot API can take several minutes
    pub const REQUEST_TIMEOUT_SECS: u64 = 900; // 15 minutes

    /// Request timeout duration
    pub fn timeout() -> Duration {
        Duration::from_secs(REQUEST_TIMEOUT_SECS)
    }
}

/// Returns the configured bot token, or a fatal configuration error.
///
/// # Errors
/// `AppError::Config` when neither BOT_TOKEN nor TELOXIDE_TOKEN is set, or
/// when the value does not look like a Telegram bot token.
pub fn bot_token() -> AppResult<&'static SecretString> {
    let token = BOT_TOKEN
        .as_ref()
        .ok_or_else(|| AppError::Config("BOT_TOKEN (or TELOXIDE_TOKEN) environment variable not set".to_string()))?;
    validate_token_format(token.expose_secret())?;
    Ok(token)
}

/// Checks the `<bot id>:<secret>` shape of a Telegram bot token.
pub fn validate_token_format(token: &str) -> AppResult<()> {
    if lazy_regex::regex_is_match!(r"^\d+:[A-Za-z0-9_-]{20,}$", token) {
        Ok(())
    } else {
        Err(AppError::Config(
            "BOT_TOKEN is malformed (expected <bot id>:<secret>)".to_string(),
        ))
    }
}

/// Parses a boolean-ish environment flag.
pub fn parse_flag(raw: &str) -> bool {
    matches!(raw.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
