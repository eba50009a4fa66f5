use crate::conversation::link::MediaLink;
use crate::download::format::{Mode, Selection};

/// Where a chat is in the guided dialogue.
///
/// Answers collected so far live inside the variants, so a state can never
/// claim a step is done without carrying its answer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DialogueState {
    /// No active dialogue
    #[default]
    Idle,
    AwaitingLink,
    AwaitingModeChoice {
        link: MediaLink,
    },
    AwaitingQualityOrFormat {
        link: MediaLink,
        mode: Mode,
    },
}

impl DialogueState {
    pub fn is_idle(&self) -> bool {
        matches!(self, DialogueState::Idle)
    }

    /// Link collected so far, if any
    pub fn link(&self) -> Option<&MediaLink> {
        match self {
            DialogueState::AwaitingModeChoice { link } | DialogueState::AwaitingQualityOrFormat { link, .. } => Some(link),
            DialogueState::Idle | DialogueState::AwaitingLink => None,
        }
    }
}

/// Inbound chat event, already stripped of transport details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogueEvent {
    Start,
    Cancel,
    Text(String),
    /// Raw callback data of a pressed button
    Button(String),
}

/// A fully answered dialogue, ready to become a download request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedSession {
    pub link: MediaLink,
    pub selection: Selection,
}
