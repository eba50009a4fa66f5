//! Link validation and dialogue input errors.

use std::fmt;
use thiserror::Error;
use url::Url;

/// Input the dialogue could not accept.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DialogueError {
    /// Free text at the link step without a usable http(s) URL
    #[error("not a valid media link: {0}")]
    InvalidLink(String),
    /// Button payload that does not fit the current step
    #[error("invalid choice: {0}")]
    InvalidChoice(String),
}

/// An http(s) URL with a host, found in user text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaLink(Url);

impl MediaLink {
    /// Finds the first `http://` or `https://` token in `text`.
    ///
    /// The link may be surrounded by other words ("look at https://... lol").
    /// Only the first token is tried.
    pub fn parse(text: &str) -> Result<Self, DialogueError> {
        let invalid = || DialogueError::InvalidLink(text.trim().to_string());

        let candidate = lazy_regex::regex_find!(r"(?i)https?://\S+", text).ok_or_else(invalid)?;
        let url = Url::parse(candidate).map_err(|_| invalid())?;

        match url.host_str() {
            Some(host) if !host.is_empty() => Ok(Self(url)),
            _ => Err(invalid()),
        }
    }

    pub fn as_url(&self) -> &Url {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn into_url(self) -> Url {
        self.0
    }
}

impl fmt::Display for MediaLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_links() {
        assert_eq!(MediaLink::parse("https://example.com/v1").unwrap().as_str(), "https://example.com/v1");
        assert_eq!(
            MediaLink::parse("http://youtu.be/dQw4w9WgXcQ").unwrap().as_url().host_str(),
            Some("youtu.be")
        );
    }

    #[test]
    fn test_link_inside_text() {
        let link = MediaLink::parse("check this out https://www.tiktok.com/@user/video/123 nice").unwrap();
        assert_eq!(link.as_str(), "https://www.tiktok.com/@user/video/123");
    }

    #[test]
    fn test_rejects_non_links() {
        for text in ["not a link", "", "   ", "http", "www.example.com", "ftp://example.com/file", "https://"] {
            assert_eq!(
                MediaLink::parse(text),
                Err(DialogueError::InvalidLink(text.trim().to_string())),
                "accepted {:?}",
                text
            );
        }
    }

    #[test]
    fn test_display_is_the_url() {
        let link = MediaLink::parse("https://example.com/a1").unwrap();
        assert_eq!(link.to_string(), "https://example.com/a1");
        assert_eq!(link.into_url().path(), "/a1");
    }
}
