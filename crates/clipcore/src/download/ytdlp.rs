//! yt-dlp extractor: the production `Extractor`, backed by the yt-dlp binary.
//!
//! yt-dlp does the actual work: stream selection, merging, and the audio
//! transcode through ffmpeg. We only build the command line, wait for the
//! process, and read back the final file path it prints.

use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;

use crate::core::config;
use crate::core::error::AppError;
use crate::download::error::DownloadError;
use crate::download::extractor::{ExtractedFile, Extractor};
use crate::download::request::DownloadRequest;
use crate::download::ytdlp_errors::{analyze_ytdlp_error, extract_error_detail};

/// Extractor that shells out to yt-dlp.
#[derive(Debug, Clone)]
pub struct YtDlpExtractor {
    bin: String,
    ffmpeg_location: Option<String>,
}

impl YtDlpExtractor {
    pub fn new(bin: impl Into<String>, ffmpeg_location: Option<String>) -> Self {
        Self {
            bin: bin.into(),
            ffmpeg_location,
        }
    }

    /// Extractor configured from YTDL_BIN / FFMPEG_LOCATION.
    pub fn from_config() -> Self {
        Self::new(config::YTDL_BIN.as_str(), config::FFMPEG_LOCATION.clone())
    }

    /// Command-line arguments for one request.
    ///
    /// `--print after_move:filepath` reports the path after merging and
    /// post-processing; `--no-simulate` is required because `--print` implies
    /// a dry run otherwise.
    pub fn build_args(&self, request: &DownloadRequest) -> Vec<String> {
        let mut args: Vec<String> = vec![
            "--no-playlist".into(),
            "--no-progress".into(),
            "-f".into(),
            request.format_spec().into(),
            "-o".into(),
            request.output_template().into(),
        ];

        if let Some(container) = request.merge_output_format() {
            args.push("--merge-output-format".into());
            args.push(container.into());
        }

        if let Some(post) = request.postprocess() {
            args.push("--extract-audio".into());
            args.push("--audio-format".into());
            args.push(post.format.codec().into());
            args.push("--audio-quality".into());
            args.push(format!("{}K", post.quality_kbps));
        }

        if let Some(location) = &self.ffmpeg_location {
            args.push("--ffmpeg-location".into());
            args.push(location.clone());
        }

        args.push("--print".into());
        args.push("after_move:filepath".into());
        args.push("--no-simulate".into());
        args.push("--".into());
        args.push(request.url().to_string());
        args
    }
}

#[async_trait]
impl Extractor for YtDlpExtractor {
    fn name(&self) -> &str {
        "yt-dlp"
    }

    async fn extract(&self, request: &DownloadRequest) -> Result<ExtractedFile, DownloadError> {
        let args = self.build_args(request);
        tracing::info!(
            url = %request.url(),
            format = request.format_spec(),
            "Starting yt-dlp download"
        );
        tracing::debug!("{} {}", self.bin, args.join(" "));

        let output = Command::new(&self.bin)
            .args(&args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| DownloadError::Extraction(format!("failed to run {}: {}", self.bin, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let error_type = analyze_ytdlp_error(&stderr);
            let detail =
                extract_error_detail(&stderr).unwrap_or_else(|| format!("yt-dlp exited with {}", output.status));
            tracing::warn!(
                url = %request.url(),
                error_type = error_type.as_ref(),
                "yt-dlp failed: {}",
                detail
            );
            return Err(DownloadError::Extraction(detail));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let reported_path = parse_printed_path(&stdout)
            .ok_or_else(|| DownloadError::Extraction("yt-dlp did not report an output file".to_string()))?;

        tracing::info!(url = %request.url(), "yt-dlp finished: {}", reported_path.display());
        Ok(ExtractedFile { reported_path })
    }
}

/// Reads the path printed by `--print after_move:filepath` (last non-empty stdout line).
pub fn parse_printed_path(stdout: &str) -> Option<PathBuf> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .last()
        .map(PathBuf::from)
}

/// Returns the installed yt-dlp version string.
pub async fn ytdlp_version(bin: &str) -> Result<String, AppError> {
    let output = Command::new(bin).arg("--version").stdin(Stdio::null()).output().await?;
    if !output.status.success() {
        return Err(AppError::Validation(format!(
            "{} --version exited with {}",
            bin, output.status
        )));
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Logs the yt-dlp version at startup. A missing binary is logged, not fatal:
/// every download will then fail with the spawn error as its detail.
pub async fn log_ytdlp_version(bin: &str) {
    match ytdlp_version(bin).await {
        Ok(version) => tracing::info!("Current yt-dlp version: {}", version),
        Err(e) => tracing::error!("yt-dlp is not usable ({}): {}", bin, e),
    }
}
