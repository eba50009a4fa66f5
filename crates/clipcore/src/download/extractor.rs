//! Extractor adapter abstraction.
//!
//! The extractor is an opaque collaborator: it receives a `DownloadRequest`
//! and either reports the path it wrote or fails with its own error detail.
//! `YtDlpExtractor` is the production implementation; tests plug in mocks.

use async_trait::async_trait;
use std::path::PathBuf;

use crate::download::error::DownloadError;
use crate::download::request::DownloadRequest;

/// File reported by the extractor after a nominally successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedFile {
    /// Path as reported by the extractor (may carry an intermediate extension)
    pub reported_path: PathBuf,
}

/// Trait for extractor implementations.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Human-readable name of this extractor (e.g., "yt-dlp")
    fn name(&self) -> &str;

    /// Download (and transcode, if requested) the media described by `request`.
    ///
    /// Long-running and blocking from the caller's point of view; the pipeline
    /// runs it on its own task.
    async fn extract(&self, request: &DownloadRequest) -> Result<ExtractedFile, DownloadError>;
}
