//! Self-describing embedded payloads.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// MIME type of generated images.
pub const IMAGE_MIME: &str = "image/png";

/// MIME type of synthesized speech.
pub const AUDIO_MIME: &str = "audio/mpeg";

/// Encode `bytes` as a `data:` URL.
///
/// ```
/// use moodcomic_panels::data_url;
///
/// assert_eq!(data_url("image/png", b"hi"), "data:image/png;base64,aGk=");
/// ```
pub fn data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}
