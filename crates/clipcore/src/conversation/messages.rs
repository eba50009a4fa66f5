//! User-facing texts of the dialogue.

use indoc::indoc;

use crate::download::format::{AudioFormat, VideoQuality};

pub const WELCOME: &str = "Welcome! Please send me a video link (YouTube, Instagram, TikTok, Twitter, etc.)";
pub const INVALID_LINK: &str = "That doesn't look like a valid link. Please send a proper video link.";
pub const CHOOSE_MODE: &str = "Do you want to download Video or Audio?";

pub const SELECT_QUALITY: &str = "Select video quality:";
pub const CHOOSE_QUALITY: &str = "Choose video quality:";
pub const SELECT_FORMAT: &str = "Select audio format:";
pub const CHOOSE_FORMAT: &str = "Choose audio format:";

pub const INVALID_CHOICE: &str = "Invalid choice. Please start over.";
pub const CANCELLED: &str = "Operation cancelled.";

pub const USE_BUTTONS: &str = "Please use the buttons above, or send /cancel to stop.";
pub const SEND_LINK_FIRST: &str = "Please send a link first.";
pub const NOT_STARTED: &str = "Send /start to download a video or audio file.";

pub const FILE_DELIVERED: &str = "Here is your file!";

pub const HELP: &str = indoc! {"
    I download videos and audio from YouTube, Instagram, TikTok, Twitter and many other sites.

    /start - begin: send a link, then choose Video or Audio
    /cancel - stop the current dialogue
    /help - show this message

    Video comes in Low, Medium (up to 480p) or High quality.
    Audio is converted to MP3, M4A or AAC at 192 kbps.
"};

pub fn quality_selected(quality: VideoQuality) -> String {
    format!("You selected {} quality video. Downloading now...", quality)
}

pub fn format_selected(format: AudioFormat) -> String {
    format!("You selected {} audio format. Downloading now...", format)
}

pub fn send_failed(detail: &str) -> String {
    format!("Error sending file: {}", detail)
}
