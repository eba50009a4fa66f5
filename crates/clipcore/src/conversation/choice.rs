//! Button payloads.
//!
//! Callback data is `<kind>:<value>`, e.g. `mode:video`, `quality:high`,
//! `format:m4a`. The kind prefix lets a stale keyboard from an earlier step be
//! told apart from a valid answer to the current one.

use std::fmt;
use std::str::FromStr;
use strum::IntoEnumIterator;

use crate::conversation::link::DialogueError;
use crate::download::format::{AudioFormat, Mode, VideoQuality};

/// A parsed button press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Choice {
    Mode(Mode),
    Quality(VideoQuality),
    Format(AudioFormat),
}

impl Choice {
    pub fn parse(data: &str) -> Result<Self, DialogueError> {
        let invalid = || DialogueError::InvalidChoice(data.to_string());
        let (kind, value) = data.split_once(':').ok_or_else(invalid)?;

        match kind {
            "mode" => Mode::from_str(value).map(Choice::Mode).map_err(|_| invalid()),
            "quality" => VideoQuality::from_str(value).map(Choice::Quality).map_err(|_| invalid()),
            "format" => AudioFormat::from_str(value).map(Choice::Format).map_err(|_| invalid()),
            _ => Err(invalid()),
        }
    }

    pub fn callback_data(&self) -> String {
        self.to_string()
    }

    pub fn label(&self) -> &'static str {
        match self {
            Choice::Mode(mode) => mode.label(),
            Choice::Quality(quality) => quality.label(),
            Choice::Format(format) => format.label(),
        }
    }

    pub fn option(self) -> ChoiceOption {
        ChoiceOption {
            label: self.label().to_string(),
            data: self.callback_data(),
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Choice::Mode(mode) => write!(f, "mode:{}", mode),
            Choice::Quality(quality) => write!(f, "quality:{}", quality),
            Choice::Format(format) => write!(f, "format:{}", format),
        }
    }
}

/// One labeled button of a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceOption {
    pub label: String,
    pub data: String,
}

/// Video / Audio
pub fn mode_options() -> Vec<ChoiceOption> {
    Mode::iter().map(|mode| Choice::Mode(mode).option()).collect()
}

/// Low / Medium / High
pub fn quality_options() -> Vec<ChoiceOption> {
    VideoQuality::iter().map(|quality| Choice::Quality(quality).option()).collect()
}

/// MP3 / M4A / AAC
pub fn format_options() -> Vec<ChoiceOption> {
    AudioFormat::iter().map(|format| Choice::Format(format).option()).collect()
}
