//! Download mode and the fixed format policy.
//!
//! Every user choice maps to exactly one yt-dlp format selector. There is no
//! probing of available formats: the extractor resolves the selector itself.

use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// Format selector used for every audio download; the codec is chosen by post-processing.
pub const AUDIO_FORMAT_SPEC: &str = "bestaudio/best";

/// What the user wants out of the link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, AsRefStr, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Mode {
    Video,
    Audio,
}

impl Mode {
    /// Button label
    pub fn label(self) -> &'static str {
        match self {
            Mode::Video => "Video",
            Mode::Audio => "Audio",
        }
    }
}

/// Video quality tiers offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, AsRefStr, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum VideoQuality {
    Low,
    Medium,
    High,
}

impl VideoQuality {
    /// Button label
    pub fn label(self) -> &'static str {
        match self {
            VideoQuality::Low => "Low Quality",
            VideoQuality::Medium => "Medium Quality",
            VideoQuality::High => "High Quality",
        }
    }

    /// yt-dlp format selector for this tier.
    ///
    /// - Low: worst video stream plus best audio, falling back to the worst muxed file
    /// - Medium: best muxed file no taller than 480 px
    /// - High: best video plus best audio, falling back to the best muxed file
    pub fn format_spec(self) -> &'static str {
        match self {
            VideoQuality::Low => "worstvideo+bestaudio/worst",
            VideoQuality::Medium => "best[height<=480]",
            VideoQuality::High => "bestvideo+bestaudio/best",
        }
    }
}

/// Audio containers the extractor transcodes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, AsRefStr, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum AudioFormat {
    Mp3,
    M4a,
    Aac,
}

impl AudioFormat {
    /// Button label
    pub fn label(self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "MP3",
            AudioFormat::M4a => "M4A",
            AudioFormat::Aac => "AAC",
        }
    }

    /// Codec name handed to the audio post-processor (`--audio-format`)
    pub fn codec(self) -> &'static str {
        self.into()
    }

    /// Extension of the final file; identical to the codec name for all supported formats
    pub fn extension(self) -> &'static str {
        self.codec()
    }
}

/// A fully answered mode question: exactly one of quality or format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selection {
    Video(VideoQuality),
    Audio(AudioFormat),
}

impl Selection {
    pub fn mode(&self) -> Mode {
        match self {
            Selection::Video(_) => Mode::Video,
            Selection::Audio(_) => Mode::Audio,
        }
    }

    /// yt-dlp format selector for this selection
    pub fn format_spec(&self) -> &'static str {
        match self {
            Selection::Video(quality) => quality.format_spec(),
            Selection::Audio(_) => AUDIO_FORMAT_SPEC,
        }
    }

    /// Target audio format when the download must be transcoded
    pub fn audio_format(&self) -> Option<AudioFormat> {
        match self {
            Selection::Video(_) => None,
            Selection::Audio(format) => Some(*format),
        }
    }
}

impl std::fmt::Display for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Selection::Video(quality) => write!(f, "{} quality video", quality),
            Selection::Audio(format) => write!(f, "{} audio", format),
        }
    }
}
