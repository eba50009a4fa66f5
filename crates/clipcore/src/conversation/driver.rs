//! Executes dialogue effects against a chat transport.
//!
//! The driver owns everything a download needs (extractor, settings, the
//! in-flight registry) and turns every pipeline outcome into exactly one
//! outbound message. Nothing below `execute` propagates an error.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::conversation::choice::ChoiceOption;
use crate::conversation::machine::{self, Effect, Transition};
use crate::conversation::messages;
use crate::conversation::state::{CompletedSession, DialogueEvent, DialogueState};
use crate::core::error::AppResult;
use crate::core::utils::{remove_file_logged, truncate_chars, TELEGRAM_MESSAGE_LIMIT};
use crate::download::{await_download, spawn_download, DownloadError, DownloadSettings, Extractor, InflightDownloads, Mode};

/// Outbound side of one chat.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send_text(&self, text: &str) -> AppResult<()>;

    /// Message with one button per option
    async fn send_choices(&self, text: &str, options: &[ChoiceOption]) -> AppResult<()>;

    /// Replaces the message that carried the pressed button
    async fn acknowledge(&self, text: &str) -> AppResult<()>;

    async fn send_media(&self, path: &Path, kind: Mode) -> AppResult<()>;
}

/// What happened to a download effect.
#[derive(Debug)]
pub enum DeliveryOutcome {
    /// File uploaded; `removed` tells whether the local copy was deleted
    Delivered { path: PathBuf, removed: bool },
    /// Extraction or post-processing failed, nothing was uploaded
    DownloadFailed(DownloadError),
    /// The file exists but the upload failed; it stays on disk
    SendFailed { path: PathBuf, detail: String },
}

impl DeliveryOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, DeliveryOutcome::Delivered { .. })
    }
}

#[derive(Clone)]
pub struct DialogueDriver {
    extractor: Arc<dyn Extractor>,
    settings: DownloadSettings,
    inflight: Arc<InflightDownloads>,
}

impl DialogueDriver {
    pub fn new(extractor: Arc<dyn Extractor>, settings: DownloadSettings) -> Self {
        Self {
            extractor,
            settings,
            inflight: Arc::new(InflightDownloads::new()),
        }
    }

    pub fn step(&self, state: DialogueState, event: DialogueEvent) -> Transition {
        machine::step(state, event)
    }

    /// Performs `effects` in order.
    ///
    /// Returns the outcome of the download effect if there was one. Transport
    /// failures on plain replies are logged and skipped.
    pub async fn execute(&self, effects: Vec<Effect>, transport: &dyn ChatTransport) -> Option<DeliveryOutcome> {
        let mut outcome = None;

        for effect in effects {
            match effect {
                Effect::Reply(text) => log_failure("reply", transport.send_text(&text).await),
                Effect::Prompt { text, options } => log_failure("prompt", transport.send_choices(&text, &options).await),
                Effect::Acknowledge(text) => log_failure("acknowledge", transport.acknowledge(&text).await),
                Effect::Download(session) => outcome = Some(self.download_and_deliver(session, transport).await),
            }
        }

        outcome
    }

    async fn download_and_deliver(&self, session: CompletedSession, transport: &dyn ChatTransport) -> DeliveryOutcome {
        let request = self.settings.request_for(session);
        let mode = request.mode();

        // Held through the upload: another request for the same URL could overwrite or delete the file.
        let _inflight = self.inflight.acquire(request.dedup_key()).await;

        tracing::info!(url = %request.url(), selection = %request.selection(), "Download requested");
        let result = await_download(spawn_download(Arc::clone(&self.extractor), request)).await;

        let path = match result {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!(error_kind = e.subcategory(), "Download failed: {}", e);
                let text = truncate_chars(&e.user_message(), TELEGRAM_MESSAGE_LIMIT);
                log_failure("failure notice", transport.send_text(&text).await);
                return DeliveryOutcome::DownloadFailed(e);
            }
        };

        if let Err(e) = transport.send_media(&path, mode).await {
            let detail = e.to_string();
            tracing::error!("Failed to send {}: {}", path.display(), detail);
            let text = truncate_chars(&messages::send_failed(&detail), TELEGRAM_MESSAGE_LIMIT);
            log_failure("send failure notice", transport.send_text(&text).await);
            return DeliveryOutcome::SendFailed { path, detail };
        }

        log_failure("delivery notice", transport.send_text(messages::FILE_DELIVERED).await);

        let removed = if self.settings.keep_files {
            false
        } else {
            remove_file_logged(&path).await
        };
        DeliveryOutcome::Delivered { path, removed }
    }
}

fn log_failure(what: &str, result: AppResult<()>) {
    if let Err(e) = result {
        tracing::warn!("Failed to send {}: {}", what, e);
    }
}
