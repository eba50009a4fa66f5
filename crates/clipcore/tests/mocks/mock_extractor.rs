//! Mock extractor
//!
//! Stands in for yt-dlp: writes a small file where yt-dlp would, or fails the
//! way yt-dlp does, and remembers every request it was given.

#![allow(dead_code)]

use async_trait::async_trait;
use clipcore::download::{DownloadError, DownloadRequest, ExtractedFile, Extractor};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// How the mock answers a request.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Write `<title>.<ext>` into the output directory and report it.
    /// Audio reports an intermediate `.webm` like the real tool does.
    Succeed { title: String },
    /// Fail with the given detail
    Fail(String),
    /// Report success without writing anything (transcode produced nothing)
    NoOutput { title: String },
}

pub struct MockExtractor {
    behavior: MockBehavior,
    delay: Duration,
    requests: Mutex<Vec<DownloadRequest>>,
    active: AtomicUsize,
    max_active: AtomicUsize,
}

impl MockExtractor {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            delay: Duration::ZERO,
            requests: Mutex::new(Vec::new()),
            active: AtomicUsize::new(0),
            max_active: AtomicUsize::new(0),
        }
    }

    pub fn succeeding(title: &str) -> Self {
        Self::new(MockBehavior::Succeed { title: title.to_string() })
    }

    pub fn failing(detail: &str) -> Self {
        Self::new(MockBehavior::Fail(detail.to_string()))
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn requests(&self) -> Vec<DownloadRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Highest number of extractions that ran at the same time
    pub fn max_concurrent(&self) -> usize {
        self.max_active.load(Ordering::SeqCst)
    }

    fn output_dir(request: &DownloadRequest) -> PathBuf {
        Path::new(request.output_template())
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default()
    }

    fn reported_path(request: &DownloadRequest, title: &str) -> PathBuf {
        let ext = match request.merge_output_format() {
            Some(container) => container,
            None => "webm",
        };
        Self::output_dir(request).join(format!("{}.{}", title, ext))
    }
}

#[async_trait]
impl Extractor for MockExtractor {
    fn name(&self) -> &str {
        "mock"
    }

    async fn extract(&self, request: &DownloadRequest) -> Result<ExtractedFile, DownloadError> {
        self.requests.lock().unwrap().push(request.clone());
        let now_active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active.fetch_max(now_active, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.active.fetch_sub(1, Ordering::SeqCst);

        match &self.behavior {
            MockBehavior::Succeed { title } => {
                let reported_path = Self::reported_path(request, title);
                let written = request.finalize_path(&reported_path);
                std::fs::create_dir_all(Self::output_dir(request)).unwrap();
                std::fs::write(&written, b"media bytes").unwrap();
                Ok(ExtractedFile { reported_path })
            }
            MockBehavior::Fail(detail) => Err(DownloadError::Extraction(detail.clone())),
            MockBehavior::NoOutput { title } => Ok(ExtractedFile {
                reported_path: Self::reported_path(request, title),
            }),
        }
    }
}
