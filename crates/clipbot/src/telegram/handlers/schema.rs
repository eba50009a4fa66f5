//! Dispatcher schema and handler chain builders

use teloxide::dispatching::dialogue::InMemStorage;
use teloxide::dispatching::{UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::Message;

use clipcore::conversation::messages;
use clipcore::{ChatTransport, DeliveryOutcome, DialogueDriver, DialogueEvent, DialogueState};

use super::types::{ClipDialogue, HandlerDeps, HandlerError};
use crate::telegram::bot::Command;
use crate::telegram::transport::TelegramChat;

/// Creates the main dispatcher schema for the Telegram bot.
///
/// Commands, free text and button presses all enter the per-chat dialogue
/// stored in `InMemStorage<DialogueState>`, which must be registered as a
/// dispatcher dependency.
pub fn schema(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    let deps_commands = deps.clone();
    let deps_messages = deps.clone();
    let deps_callback = deps;

    dptree::entry()
        .branch(command_handler(deps_commands))
        .branch(message_handler(deps_messages))
        .branch(callback_handler(deps_callback))
}

fn command_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message()
        .filter_command::<Command>()
        .enter_dialogue::<Message, InMemStorage<DialogueState>, DialogueState>()
        .endpoint(move |bot: Bot, msg: Message, cmd: Command, dialogue: ClipDialogue| {
            let deps = deps.clone();
            async move { handle_command(deps, bot, msg, cmd, dialogue).await }
        })
}

fn message_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message()
        .filter(|msg: Message| msg.text().is_some())
        .enter_dialogue::<Message, InMemStorage<DialogueState>, DialogueState>()
        .endpoint(move |bot: Bot, msg: Message, dialogue: ClipDialogue| {
            let deps = deps.clone();
            async move { handle_text(deps, bot, msg, dialogue).await }
        })
}

fn callback_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_callback_query()
        .enter_dialogue::<CallbackQuery, InMemStorage<DialogueState>, DialogueState>()
        .endpoint(move |bot: Bot, q: CallbackQuery, dialogue: ClipDialogue| {
            let deps = deps.clone();
            async move { handle_callback(deps, bot, q, dialogue).await }
        })
}

async fn handle_command(
    deps: HandlerDeps,
    bot: Bot,
    msg: Message,
    cmd: Command,
    dialogue: ClipDialogue,
) -> Result<(), HandlerError> {
    tracing::info!("Received command {:?} from chat {}", cmd, msg.chat.id);

    let Some(event) = command_event(&cmd) else {
        bot.send_message(msg.chat.id, messages::HELP).await?;
        return Ok(());
    };

    let chat = TelegramChat::new(bot, msg.chat.id);
    advance(&deps.driver, &dialogue, event, &chat).await?;
    Ok(())
}

async fn handle_text(deps: HandlerDeps, bot: Bot, msg: Message, dialogue: ClipDialogue) -> Result<(), HandlerError> {
    let Some(text) = msg.text() else {
        return Ok(());
    };

    let Some(event) = text_event(text) else {
        tracing::debug!("Ignoring unknown command {:?} from chat {}", text, msg.chat.id);
        return Ok(());
    };

    let chat = TelegramChat::new(bot, msg.chat.id);
    advance(&deps.driver, &dialogue, event, &chat).await?;
    Ok(())
}

async fn handle_callback(
    deps: HandlerDeps,
    bot: Bot,
    q: CallbackQuery,
    dialogue: ClipDialogue,
) -> Result<(), HandlerError> {
    // Answer right away so the client stops its spinner even if the download takes minutes.
    if let Err(e) = bot.answer_callback_query(q.id.clone()).await {
        tracing::warn!("Failed to answer callback query: {}", e);
    }

    let Some(data) = q.data else {
        return Ok(());
    };
    let message_id = q.message.as_ref().map(|message| message.id());

    let chat = TelegramChat::for_keyboard(bot, dialogue.chat_id(), message_id);
    advance(&deps.driver, &dialogue, DialogueEvent::Button(data), &chat).await?;
    Ok(())
}

/// Dialogue event for a bot command; `None` for commands answered outside the dialogue.
pub fn command_event(cmd: &Command) -> Option<DialogueEvent> {
    match cmd {
        Command::Start => Some(DialogueEvent::Start),
        Command::Cancel => Some(DialogueEvent::Cancel),
        Command::Help => None,
    }
}

/// Dialogue event for a plain text message.
///
/// Unknown commands are not links and never reach the dialogue.
pub fn text_event(text: &str) -> Option<DialogueEvent> {
    if text.starts_with('/') {
        return None;
    }
    Some(DialogueEvent::Text(text.to_string()))
}

/// Steps the chat's dialogue, stores the new state, then performs the effects.
///
/// The state is stored before a download starts, so the chat is already idle
/// while its file is being fetched.
pub async fn advance(
    driver: &DialogueDriver,
    dialogue: &ClipDialogue,
    event: DialogueEvent,
    chat: &dyn ChatTransport,
) -> Result<Option<DeliveryOutcome>, HandlerError> {
    let state = dialogue.get_or_default().await?;
    let transition = driver.step(state, event);

    if transition.next.is_idle() {
        dialogue.exit().await?;
    } else {
        dialogue.update(transition.next).await?;
    }

    let outcome = driver.execute(transition.effects, chat).await;
    let chat_id = dialogue.chat_id().0;
    match &outcome {
        Some(DeliveryOutcome::Delivered { path, removed }) => {
            tracing::info!(chat_id, removed, "Delivered {}", path.display());
        }
        Some(DeliveryOutcome::DownloadFailed(e)) => {
            tracing::warn!(chat_id, error_kind = e.subcategory(), "Download failed: {}", e);
        }
        Some(DeliveryOutcome::SendFailed { path, detail }) => {
            tracing::error!(chat_id, "Could not deliver {}: {}", path.display(), detail);
        }
        None => {}
    }

    Ok(outcome)
}
