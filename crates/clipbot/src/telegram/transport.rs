//! Telegram side of the chat transport.

use async_trait::async_trait;
use std::path::Path;
use teloxide::prelude::*;
use teloxide::types::{InputFile, MessageId};

use clipcore::{AppResult, ChatTransport, ChoiceOption, Mode};

use crate::telegram::keyboard::choices_keyboard;

/// One chat, plus the message whose keyboard was just pressed (if any).
pub struct TelegramChat {
    bot: Bot,
    chat_id: ChatId,
    keyboard_message: Option<MessageId>,
}

impl TelegramChat {
    pub fn new(bot: Bot, chat_id: ChatId) -> Self {
        Self {
            bot,
            chat_id,
            keyboard_message: None,
        }
    }

    /// Chat reached through a button press on `message_id`.
    pub fn for_keyboard(bot: Bot, chat_id: ChatId, message_id: Option<MessageId>) -> Self {
        Self {
            bot,
            chat_id,
            keyboard_message: message_id,
        }
    }
}

#[async_trait]
impl ChatTransport for TelegramChat {
    async fn send_text(&self, text: &str) -> AppResult<()> {
        self.bot.send_message(self.chat_id, text).await?;
        Ok(())
    }

    async fn send_choices(&self, text: &str, options: &[ChoiceOption]) -> AppResult<()> {
        self.bot
            .send_message(self.chat_id, text)
            .reply_markup(choices_keyboard(options))
            .await?;
        Ok(())
    }

    async fn acknowledge(&self, text: &str) -> AppResult<()> {
        match self.keyboard_message {
            Some(message_id) => {
                self.bot.edit_message_text(self.chat_id, message_id, text).await?;
            }
            // Message too old to edit or unknown; fall back to a new message
            None => {
                self.bot.send_message(self.chat_id, text).await?;
            }
        }
        Ok(())
    }

    async fn send_media(&self, path: &Path, kind: Mode) -> AppResult<()> {
        let file = InputFile::file(path.to_path_buf());
        tracing::info!(chat_id = self.chat_id.0, kind = %kind, "Uploading {}", path.display());

        match kind {
            Mode::Video => {
                self.bot.send_video(self.chat_id, file).await?;
            }
            Mode::Audio => {
                self.bot.send_audio(self.chat_id, file).await?;
            }
        }
        Ok(())
    }
}
