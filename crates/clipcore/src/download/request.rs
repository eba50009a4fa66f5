//! Download requests and the builder that derives them from a finished dialogue.
//!
//! A `DownloadRequest` can only come out of a `CompletedSession`, which in turn
//! only exists once a valid link and exactly one of quality/format were collected.

use std::path::{Path, PathBuf};
use url::Url;

use crate::conversation::CompletedSession;
use crate::core::config;
use crate::download::format::{AudioFormat, Mode, Selection};

/// Audio transcode step applied after the download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioPostprocess {
    pub format: AudioFormat,
    pub quality_kbps: u32,
}

/// Everything the extractor needs for one download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    url: Url,
    selection: Selection,
    output_template: String,
    postprocess: Option<AudioPostprocess>,
    merge_output_format: Option<String>,
}

impl DownloadRequest {
    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn mode(&self) -> Mode {
        self.selection.mode()
    }

    /// yt-dlp format selector
    pub fn format_spec(&self) -> &'static str {
        self.selection.format_spec()
    }

    /// Output path template, e.g. `downloads/%(title)s.%(ext)s`
    pub fn output_template(&self) -> &str {
        &self.output_template
    }

    pub fn postprocess(&self) -> Option<AudioPostprocess> {
        self.postprocess
    }

    /// Container for merged video+audio downloads
    pub fn merge_output_format(&self) -> Option<&str> {
        self.merge_output_format.as_deref()
    }

    /// Final location of the produced file given the path the extractor reported.
    ///
    /// The extractor may report the intermediate container (`.webm`, `.opus`) of
    /// an audio download, so the chosen format's extension is forced.
    pub fn finalize_path(&self, reported: &Path) -> PathBuf {
        match self.postprocess {
            Some(post) => reported.with_extension(post.format.extension()),
            None => reported.to_path_buf(),
        }
    }

    /// Key identifying requests that may write the same file.
    ///
    /// Output names depend only on the media title, so every selection for one
    /// URL can land on the same path (all video qualities merge into
    /// `<title>.mp4`; audio formats share the downloaded `<title>.webm`).
    pub fn dedup_key(&self) -> String {
        self.url.to_string()
    }
}

/// Builder for constructing download requests.
///
/// # Example
///
/// ```ignore
/// let request = DownloadRequestBuilder::new(session)
///     .output_dir("/srv/downloads")
///     .audio_quality(192)
///     .build();
/// ```
pub struct DownloadRequestBuilder {
    session: CompletedSession,
    output_dir: PathBuf,
    audio_quality_kbps: u32,
    merge_output_format: String,
}

impl DownloadRequestBuilder {
    /// Create a new builder for a finished dialogue.
    pub fn new(session: CompletedSession) -> Self {
        Self {
            session,
            output_dir: config::DOWNLOAD_FOLDER.clone(),
            audio_quality_kbps: config::download::AUDIO_QUALITY_KBPS,
            merge_output_format: config::download::MERGE_OUTPUT_FORMAT.to_string(),
        }
    }

    /// Directory the file is written to.
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Target bitrate for transcoded audio (kbps).
    pub fn audio_quality(mut self, kbps: u32) -> Self {
        self.audio_quality_kbps = kbps;
        self
    }

    /// Container for merged video downloads (e.g. "mp4", "mkv").
    pub fn merge_output_format(mut self, format: &str) -> Self {
        self.merge_output_format = format.to_string();
        self
    }

    /// Build the `DownloadRequest`.
    pub fn build(self) -> DownloadRequest {
        let output_template = self
            .output_dir
            .join(config::download::OUTPUT_TEMPLATE)
            .to_string_lossy()
            .into_owned();

        let (postprocess, merge_output_format) = match self.session.selection {
            Selection::Video(_) => (None, Some(self.merge_output_format)),
            Selection::Audio(format) => (
                Some(AudioPostprocess {
                    format,
                    quality_kbps: self.audio_quality_kbps,
                }),
                None,
            ),
        };

        DownloadRequest {
            url: self.session.link.into_url(),
            selection: self.session.selection,
            output_template,
            postprocess,
            merge_output_format,
        }
    }
}

/// Process-wide download settings, read once at startup.
#[derive(Debug, Clone)]
pub struct DownloadSettings {
    pub output_dir: PathBuf,
    pub audio_quality_kbps: u32,
    pub merge_output_format: String,
    /// Keep delivered files instead of removing them after upload
    pub keep_files: bool,
}

impl DownloadSettings {
    /// Settings with default quality targets writing into `output_dir`.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            audio_quality_kbps: config::download::AUDIO_QUALITY_KBPS,
            merge_output_format: config::download::MERGE_OUTPUT_FORMAT.to_string(),
            keep_files: false,
        }
    }

    /// Settings from the environment (DOWNLOAD_FOLDER, KEEP_DOWNLOADS).
    pub fn from_config() -> Self {
        Self {
            keep_files: *config::KEEP_DOWNLOADS,
            ..Self::new(config::DOWNLOAD_FOLDER.clone())
        }
    }

    pub fn keep_files(mut self, keep: bool) -> Self {
        self.keep_files = keep;
        self
    }

    /// Derive the request for a finished dialogue.
    pub fn request_for(&self, session: CompletedSession) -> DownloadRequest {
        DownloadRequestBuilder::new(session)
            .output_dir(self.output_dir.clone())
            .audio_quality(self.audio_quality_kbps)
            .merge_output_format(&self.merge_output_format)
            .build()
    }
}
