//! clipbot - Telegram front end for the clipcore download dialogue
//!
//! A user sends `/start`, pastes a link, picks Video or Audio, then a quality
//! or an audio format, and gets the file back in the chat.
//!
//! # Module Structure
//!
//! - `cli`: command line interface
//! - `telegram`: bot setup, dispatcher schema, the Telegram chat transport

pub mod cli;
pub mod telegram;

pub use telegram::{create_bot, schema, setup_bot_commands, Command, HandlerDeps, HandlerError, TelegramChat};
