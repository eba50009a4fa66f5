use anyhow::Result;
use std::sync::Arc;
use teloxide::dispatching::dialogue::InMemStorage;
use teloxide::prelude::*;

use clipbot::cli::{run_download_command, selection_from_flags, Cli, Commands};
use clipbot::telegram::{create_bot, schema, setup_bot_commands, HandlerDeps};
use clipcore::core::{init_logger, log_startup_configuration};
use clipcore::download::{log_ytdlp_version, ytdlp_version};
use clipcore::{config, DialogueDriver, DialogueState, DownloadSettings, YtDlpExtractor};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env before any config value is read
    let _ = dotenvy::dotenv();

    let cli = Cli::parse_args();

    // Initialize logger (console + file)
    init_logger(&config::LOG_FILE_PATH)?;

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_bot().await,
        Commands::Download {
            url,
            video,
            audio,
            output,
        } => {
            let selection = selection_from_flags(video, audio)
                .ok_or_else(|| anyhow::anyhow!("exactly one of --video or --audio is required"))?;
            let path = run_download_command(&url, selection, output).await?;
            println!("{}", path.display());
            Ok(())
        }
        Commands::CheckYtdlp => {
            let version = ytdlp_version(&config::YTDL_BIN).await?;
            println!("{} {}", config::YTDL_BIN.as_str(), version);
            Ok(())
        }
    }
}

async fn run_bot() -> Result<()> {
    tracing::info!("Starting bot...");

    let token = config::bot_token()?;
    let bot = create_bot(token)?;

    // A token Telegram does not accept is fatal
    let me = bot
        .get_me()
        .await
        .map_err(|e| anyhow::anyhow!("Telegram rejected the bot token: {}", e))?;
    tracing::info!("Bot username: @{}", me.username());

    log_startup_configuration();
    fs_err::tokio::create_dir_all(config::DOWNLOAD_FOLDER.as_path()).await?;
    log_ytdlp_version(&config::YTDL_BIN).await;

    if let Err(e) = setup_bot_commands(&bot).await {
        tracing::warn!("Failed to register bot commands: {}", e);
    }

    let driver = DialogueDriver::new(Arc::new(YtDlpExtractor::from_config()), DownloadSettings::from_config());
    let handler = schema(HandlerDeps::new(Arc::new(driver)));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![InMemStorage::<DialogueState>::new()])
        .default_handler(|upd| async move {
            tracing::debug!("Unhandled update: {:?}", upd.kind);
        })
        .error_handler(LoggingErrorHandler::with_custom_text("An error has occurred in the dispatcher"))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    tracing::info!("Dispatcher shutdown gracefully");
    Ok(())
}
