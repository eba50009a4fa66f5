//! Telegram front end: bot setup, handler tree, chat transport

pub mod bot;
pub mod handlers;
pub mod keyboard;
pub mod transport;

pub use bot::{create_bot, setup_bot_commands, Command};
pub use handlers::{schema, HandlerDeps, HandlerError};
pub use transport::TelegramChat;
