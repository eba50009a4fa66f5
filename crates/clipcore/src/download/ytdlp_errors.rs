//! yt-dlp error analysis
//!
//! Pulls the user-visible detail out of yt-dlp's stderr and classifies it for logs.
//! The detail itself is shown to the user verbatim.

use strum::AsRefStr;

/// Types of yt-dlp errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum YtDlpErrorType {
    /// No extractor handles the URL
    UnsupportedUrl,
    /// Media is private, removed, geo-blocked or otherwise unavailable
    MediaUnavailable,
    /// Timeouts, DNS, connection resets
    NetworkError,
    /// ffmpeg/ffprobe missing or the post-processor failed
    PostprocessingError,
    /// Anything else
    Unknown,
}

/// Analyzes yt-dlp stderr and determines the error type
pub fn analyze_ytdlp_error(stderr: &str) -> YtDlpErrorType {
    let stderr_lower = stderr.to_lowercase();

    if stderr_lower.contains("unsupported url") || stderr_lower.contains("is not a valid url") {
        return YtDlpErrorType::UnsupportedUrl;
    }

    if stderr_lower.contains("private video")
        || stderr_lower.contains("video unavailable")
        || stderr_lower.contains("this video is not available")
        || stderr_lower.contains("has been removed")
        || stderr_lower.contains("does not exist")
        || stderr_lower.contains("http error 404")
        || stderr_lower.contains("not available in your country")
    {
        return YtDlpErrorType::MediaUnavailable;
    }

    if stderr_lower.contains("ffmpeg")
        || stderr_lower.contains("ffprobe")
        || stderr_lower.contains("postprocessing")
    {
        return YtDlpErrorType::PostprocessingError;
    }

    if stderr_lower.contains("timed out")
        || stderr_lower.contains("timeout")
        || stderr_lower.contains("connection")
        || stderr_lower.contains("network")
        || stderr_lower.contains("name resolution")
        || stderr_lower.contains("failed to connect")
    {
        return YtDlpErrorType::NetworkError;
    }

    YtDlpErrorType::Unknown
}

/// Extracts the error detail shown to the user.
///
/// Prefers the last `ERROR:` line (prefix stripped), then the last non-empty
/// line, and returns `None` for empty stderr.
pub fn extract_error_detail(stderr: &str) -> Option<String> {
    let lines: Vec<&str> = stderr.lines().map(str::trim).filter(|line| !line.is_empty()).collect();

    lines
        .iter()
        .rev()
        .find_map(|line| line.strip_prefix("ERROR:"))
        .map(|detail| detail.trim().to_string())
        .or_else(|| lines.last().map(|line| line.to_string()))
}
