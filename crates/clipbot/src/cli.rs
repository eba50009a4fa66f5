use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

use clipcore::conversation::{CompletedSession, MediaLink};
use clipcore::download::{run_download, AudioFormat, Selection, VideoQuality};
use clipcore::{DownloadSettings, YtDlpExtractor};

#[derive(Parser)]
#[command(name = "clipbot")]
#[command(author, version, about = "Telegram bot that downloads video or audio from a pasted link", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the bot (default)
    Run,

    /// Download one link without Telegram, using the same format policy as the bot
    #[command(group(ArgGroup::new("selection").required(true).args(["video", "audio"])))]
    Download {
        /// Media page URL
        url: String,

        /// Video quality: low, medium or high
        #[arg(long)]
        video: Option<VideoQuality>,

        /// Audio format: mp3, m4a or aac
        #[arg(long)]
        audio: Option<AudioFormat>,

        /// Output directory (defaults to DOWNLOAD_FOLDER)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the installed yt-dlp version
    CheckYtdlp,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// The selection encoded by `--video` / `--audio`.
pub fn selection_from_flags(video: Option<VideoQuality>, audio: Option<AudioFormat>) -> Option<Selection> {
    match (video, audio) {
        (Some(quality), None) => Some(Selection::Video(quality)),
        (None, Some(format)) => Some(Selection::Audio(format)),
        _ => None,
    }
}

/// Runs the download pipeline for one link and returns the produced file.
pub async fn run_download_command(url: &str, selection: Selection, output: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    let link = MediaLink::parse(url)?;
    let settings = match output {
        Some(dir) => DownloadSettings::new(dir),
        None => DownloadSettings::from_config(),
    };
    fs_err::tokio::create_dir_all(&settings.output_dir).await?;

    let request = settings.request_for(CompletedSession { link, selection });
    let extractor = YtDlpExtractor::from_config();
    let path = run_download(&extractor, &request).await?;
    Ok(path)
}
