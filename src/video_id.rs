/// Video id extraction from sharing URLs
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use url::Url;

/// First `v=` (or `vi=`) parameter of a query string and the id run after it
static ID_PARAM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|&)vi?=([A-Za-z0-9_-]*)").expect("video id pattern compiles")
});

/// A video identifier made only of `[A-Za-z0-9_-]`
///
/// The restricted alphabet means an id can be appended to a URL path as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoId(String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidVideoId {
    #[error("video id is empty")]
    Empty,
    #[error("video id contains invalid character {0:?}")]
    InvalidChar(char),
}

impl VideoId {
    /// Validate an id typed (or edited) by the user.
    ///
    /// Surrounding whitespace is ignored.
    pub fn parse(raw: &str) -> Result<VideoId, InvalidVideoId> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(InvalidVideoId::Empty);
        }
        match trimmed.chars().find(|c| !is_id_char(*c)) {
            Some(c) => Err(InvalidVideoId::InvalidChar(c)),
            None => Ok(VideoId(trimmed.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VideoId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<VideoId> for String {
    fn from(id: VideoId) -> String {
        id.0
    }
}

fn is_id_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Extract the video id from a URL's query string
///
/// Algorithm:
/// 1. Parse the URL; anything that is not an absolute URL has no id
/// 2. Look only at the query component (path and fragment are ignored)
/// 3. Find the first `v=` or `vi=` parameter
/// 4. Take the longest run of `[A-Za-z0-9_-]` after the `=`
/// 5. An empty run means no id, even if a later parameter has one
///
/// Examples:
/// - https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42 → dQw4w9WgXcQ
/// - https://www.youtube.com/watch?feature=share&v=dQw4w9WgXcQ → dQw4w9WgXcQ
/// - https://www.youtube.com/feed/trending → none
/// - https://x.test/v=notinquery → none
pub fn extract_video_id(url: &str) -> Option<VideoId> {
    let parsed = Url::parse(url.trim()).ok()?;
    let query = parsed.query()?;
    let run = ID_PARAM.captures(query)?.get(1)?.as_str();

    if run.is_empty() {
        None
    } else {
        Some(VideoId(run.to_string()))
    }
}
