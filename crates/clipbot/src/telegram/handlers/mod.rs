//! Telegram bot handler tree configuration
//!
//! Builds the dispatcher schema. `advance` and the event mappers are public
//! so the dialogue storage handling can be exercised without a live bot.

mod schema;
mod types;

pub use schema::{advance, command_event, schema, text_event};
pub use types::{ClipDialogue, HandlerDeps, HandlerError};
