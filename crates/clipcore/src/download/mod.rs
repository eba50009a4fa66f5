//! Download module: format policy, requests, the extractor adapter and pipeline

pub mod error;
pub mod extractor;
pub mod format;
pub mod inflight;
pub mod pipeline;
pub mod request;
pub mod ytdlp;
pub mod ytdlp_errors;

pub use error::DownloadError;
pub use extractor::{ExtractedFile, Extractor};
pub use format::{AudioFormat, Mode, Selection, VideoQuality};
pub use inflight::{InflightDownloads, InflightGuard};
pub use pipeline::{await_download, run_download, spawn_download, DownloadResult};
pub use request::{AudioPostprocess, DownloadRequest, DownloadRequestBuilder, DownloadSettings};
pub use ytdlp::{log_ytdlp_version, ytdlp_version, YtDlpExtractor};
