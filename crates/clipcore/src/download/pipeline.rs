//! Download pipeline: extractor run, final path fix-up, output check.

use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::oneshot;

use crate::download::error::DownloadError;
use crate::download::extractor::Extractor;
use crate::download::request::DownloadRequest;

/// Path of the produced file, or why there is none.
pub type DownloadResult = Result<PathBuf, DownloadError>;

/// Runs one download to completion.
///
/// The extractor's reported path is corrected to the chosen audio extension,
/// and a missing or non-regular file after a successful run is a
/// post-processing failure.
pub async fn run_download(extractor: &dyn Extractor, request: &DownloadRequest) -> DownloadResult {
    let extracted = extractor.extract(request).await?;
    let path = request.finalize_path(&extracted.reported_path);

    match fs_err::tokio::metadata(&path).await {
        Ok(metadata) if metadata.is_file() => {
            tracing::info!(
                extractor = extractor.name(),
                size = metadata.len(),
                "Download ready: {}",
                path.display()
            );
            Ok(path)
        }
        Ok(_) => {
            tracing::warn!("Extractor output is not a regular file: {}", path.display());
            Err(DownloadError::MissingOutput(path))
        }
        Err(e) => {
            tracing::warn!("Extractor output is missing: {}", e);
            Err(DownloadError::MissingOutput(path))
        }
    }
}

/// Runs the download on its own task and returns the completion channel.
///
/// A task that dies without reporting closes the channel; see [`await_download`].
pub fn spawn_download(extractor: Arc<dyn Extractor>, request: DownloadRequest) -> oneshot::Receiver<DownloadResult> {
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let result = run_download(extractor.as_ref(), &request).await;
        if tx.send(result).is_err() {
            tracing::warn!("Download finished but nobody is waiting for it: {}", request.url());
        }
    });

    rx
}

/// Waits for a spawned download; a closed channel counts as [`DownloadError::Aborted`].
pub async fn await_download(rx: oneshot::Receiver<DownloadResult>) -> DownloadResult {
    rx.await.unwrap_or(Err(DownloadError::Aborted))
}
