use std::path::PathBuf;
use thiserror::Error;

/// Structured error type for download operations.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// The extractor failed (network, unsupported site, unavailable media, missing binary).
    /// Carries the extractor's own error detail.
    #[error("{0}")]
    Extraction(String),
    /// Extraction reported success but the expected file is not on disk
    /// (typically a transcode step that silently produced nothing)
    #[error("expected output file is missing: {}", .0.display())]
    MissingOutput(PathBuf),
    /// The download task ended without reporting a result
    #[error("download task ended unexpectedly")]
    Aborted,
}

impl DownloadError {
    /// Returns subcategory for logs
    pub fn subcategory(&self) -> &'static str {
        match self {
            DownloadError::Extraction(_) => "extraction",
            DownloadError::MissingOutput(_) => "missing_output",
            DownloadError::Aborted => "aborted",
        }
    }

    /// Text shown to the user in the chat
    pub fn user_message(&self) -> String {
        match self {
            DownloadError::Extraction(detail) => format!("An error occurred: {}", detail),
            DownloadError::MissingOutput(_) | DownloadError::Aborted => "Download failed. Please try again.".to_string(),
        }
    }
}
