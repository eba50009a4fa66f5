use std::path::Path;

/// Telegram rejects text messages longer than this many characters
pub const TELEGRAM_MESSAGE_LIMIT: usize = 4096;

/// Truncates `text` to at most `max_chars` characters, appending an ellipsis when cut.
///
/// Counts chars, not bytes, so multi-byte titles and error details never split mid-character.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(1);
    let mut result: String = text.chars().take(keep).collect();
    result.push('…');
    result
}

/// Removes a delivered file, logging instead of failing.
///
/// Returns `true` if the file is gone afterwards.
pub async fn remove_file_logged(path: &Path) -> bool {
    match fs_err::tokio::remove_file(path).await {
        Ok(()) => {
            tracing::debug!("Removed delivered file {}", path.display());
            true
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => true,
        Err(e) => {
            tracing::warn!("Failed to remove {}: {}", path.display(), e);
            false
        }
    }
}
