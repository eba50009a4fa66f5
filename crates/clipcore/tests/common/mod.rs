//! Common test utilities
//!
//! Shared across the integration tests of this crate.

#![allow(dead_code)]

use async_trait::async_trait;
use clipcore::conversation::ChoiceOption;
use clipcore::{AppError, AppResult, ChatTransport, Mode};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// One outbound call made through the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Text(String),
    Choices { text: String, data: Vec<String> },
    Ack(String),
    Media { path: PathBuf, kind: Mode, existed: bool },
}

/// Transport that records every call instead of talking to a chat service.
#[derive(Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<Sent>>,
    fail_media: bool,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `send_media` call fails (after being recorded)
    pub fn failing_uploads() -> Self {
        Self {
            fail_media: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Text(text) => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn media(&self) -> Vec<(PathBuf, Mode)> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Media { path, kind, .. } => Some((path, kind)),
                _ => None,
            })
            .collect()
    }

    /// Whether every uploaded file was still on disk when it was sent
    pub fn uploads_found_files(&self) -> bool {
        self.sent()
            .iter()
            .all(|s| !matches!(s, Sent::Media { existed: false, .. }))
    }

    fn record(&self, sent: Sent) {
        self.sent.lock().unwrap().push(sent);
    }
}

#[async_trait]
impl ChatTransport for RecordingTransport {
    async fn send_text(&self, text: &str) -> AppResult<()> {
        self.record(Sent::Text(text.to_string()));
        Ok(())
    }

    async fn send_choices(&self, text: &str, options: &[ChoiceOption]) -> AppResult<()> {
        self.record(Sent::Choices {
            text: text.to_string(),
            data: options.iter().map(|o| o.data.clone()).collect(),
        });
        Ok(())
    }

    async fn acknowledge(&self, text: &str) -> AppResult<()> {
        self.record(Sent::Ack(text.to_string()));
        Ok(())
    }

    async fn send_media(&self, path: &Path, kind: Mode) -> AppResult<()> {
        self.record(Sent::Media {
            path: path.to_path_buf(),
            kind,
            existed: path.is_file(),
        });
        if self.fail_media {
            return Err(AppError::Transport("file is too big".to_string()));
        }
        Ok(())
    }
}
