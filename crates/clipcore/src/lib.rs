//! clipcore - guided media download dialogue without the Telegram plumbing
//!
//! A user pastes a link, picks video or audio, picks a quality or an audio
//! format, and gets the file back. This crate holds everything except the
//! messaging transport itself.
//!
//! # Module Structure
//!
//! - `core`: configuration, errors, logging, small utilities
//! - `download`: format policy, download requests, the yt-dlp adapter and pipeline
//! - `conversation`: the dialogue state machine and the driver that executes its effects

pub mod conversation;
pub mod core;
pub mod download;

// Re-export commonly used types for convenience
pub use conversation::{
    ChatTransport, ChoiceOption, CompletedSession, DeliveryOutcome, DialogueDriver, DialogueEvent, DialogueState, Effect,
    MediaLink, Transition,
};
pub use crate::core::{config, AppError, AppResult};
pub use download::{DownloadError, DownloadRequest, DownloadSettings, Extractor, Mode, Selection, YtDlpExtractor};
