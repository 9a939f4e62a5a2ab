/// Popup configuration: analysis endpoint and fixed UI strings
use serde::{Deserialize, Serialize};

/// Route served by the local analysis backend
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000/analysis/";

/// Shown when the backend has nothing for the requested video
pub const DEFAULT_NO_RESULT_MESSAGE: &str = "No analysis available for this video yet.";

/// Bundled image shown when a report carries no word cloud
pub const DEFAULT_PLACEHOLDER_IMAGE: &str = "images/placeholder.png";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopupConfig {
    pub base_url: String,
    pub placeholder_image: String,
    pub no_result_message: String,
}

impl PopupConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        PopupConfig {
            base_url: base_url.into(),
            ..PopupConfig::default()
        }
    }

    /// Configuration baked in at build time.
    ///
    /// `EMOTIONAL_YOUTUBE_BASE_URL` overrides the endpoint when set and non-blank.
    pub fn from_build_env() -> Self {
        match option_env!("EMOTIONAL_YOUTUBE_BASE_URL").map(str::trim) {
            Some(url) if !url.is_empty() => PopupConfig::new(url),
            _ => PopupConfig::default(),
        }
    }
}

impl Default for PopupConfig {
    fn default() -> Self {
        PopupConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.to_string(),
            no_result_message: DEFAULT_NO_RESULT_MESSAGE.to_string(),
        }
    }
}
