//! Handler types and dependencies

use std::sync::Arc;

use clipcore::{DialogueDriver, DialogueState};
use teloxide::dispatching::dialogue::{Dialogue, InMemStorage};

/// Error type for handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Per-chat dialogue handle
pub type ClipDialogue = Dialogue<DialogueState, InMemStorage<DialogueState>>;

/// Dependencies required by handlers
#[derive(Clone)]
pub struct HandlerDeps {
    pub driver: Arc<DialogueDriver>,
}

impl HandlerDeps {
    pub fn new(driver: Arc<DialogueDriver>) -> Self {
        Self { driver }
    }
}
