/// Analysis report returned by the backend
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Deserializer, Serialize};

/// Sentiment analysis of a video's comments
///
/// Every field is optional on the wire. A payload of `{}` parses into the
/// empty report, which renders the same as a failed request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Report {
    #[serde(deserialize_with = "null_as_default")]
    pub attitude: String,
    #[serde(deserialize_with = "null_as_default")]
    pub emoji: String,
    /// Base64 encoded word cloud image
    pub wcloud: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_title: Option<String>,
}

// The backend sends `null` for videos without tags
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Report {
    /// Parse a response body. `null` yields `None`.
    pub fn from_json(body: &str) -> Result<Option<Report>, serde_json::Error> {
        serde_json::from_str(body)
    }

    /// True when there is no analysis to show; a title alone is not one
    pub fn is_empty(&self) -> bool {
        self.attitude.trim().is_empty()
            && self.emoji.trim().is_empty()
            && self.tags.is_empty()
            && blank(self.wcloud.as_deref())
    }

    /// Attitude followed directly by its emoji
    pub fn headline(&self) -> String {
        format!("{}{}", self.attitude, self.emoji)
    }

    /// Decoded word cloud bytes, if present and valid base64
    pub fn wcloud_bytes(&self) -> Option<Vec<u8>> {
        let encoded = self.encoded_wcloud()?;
        match STANDARD.decode(&encoded) {
            Ok(bytes) if !bytes.is_empty() => Some(bytes),
            Ok(_) => None,
            Err(e) => {
                log::warn!("Ignoring undecodable word cloud: {}", e);
                None
            }
        }
    }

    /// Word cloud as a `data:` URI suitable for an image source
    pub fn wcloud_data_uri(&self) -> Option<String> {
        let bytes = self.wcloud_bytes()?;
        Some(format!(
            "data:{};base64,{}",
            image_mime(&bytes),
            STANDARD.encode(&bytes)
        ))
    }

    // Line-wrapped base64 is common; strip all whitespace before decoding
    fn encoded_wcloud(&self) -> Option<String> {
        let raw = self.wcloud.as_deref()?;
        let encoded: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
        if encoded.is_empty() { None } else { Some(encoded) }
    }
}

fn blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

/// Sniff the image type from magic bytes, PNG when unknown
fn image_mime(bytes: &[u8]) -> &'static str {
    if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
        "image/png"
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        "image/jpeg"
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        "image/gif"
    } else if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        "image/webp"
    } else {
        "image/png"
    }
}
