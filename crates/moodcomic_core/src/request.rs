//! Generation request.

use crate::{Style, VoiceGender};
use serde::{Deserialize, Serialize};

/// A single comic generation request.
///
/// `mood` defaults to an empty string when absent from the wire payload so that
/// a missing mood and a blank mood are rejected by the same validation path.
///
/// # Examples
///
/// ```
/// use moodcomic_core::{GenerationRequest, VoiceGender};
///
/// let request = GenerationRequest::new("地鐵奇遇")
///     .with_style("healing".to_string())
///     .with_voice_gender(VoiceGender::Female);
///
/// assert_eq!(request.mood, "地鐵奇遇");
/// assert_eq!(request.style.as_deref(), Some("healing"));
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, derive_setters::Setters,
)]
#[serde(rename_all = "camelCase")]
#[setters(prefix = "with_", strip_option)]
pub struct GenerationRequest {
    /// Free-text mood or topic
    #[serde(default)]
    pub mood: String,
    /// Style tag; unknown tags are kept and echoed back
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    /// Narrator gender; audio is only produced when this is present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_gender: Option<VoiceGender>,
    /// Legacy situational context, echoed in the response metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl GenerationRequest {
    /// Create a request for the given mood with no options.
    pub fn new(mood: impl Into<String>) -> Self {
        Self {
            mood: mood.into(),
            ..Default::default()
        }
    }

    /// The mood with surrounding whitespace removed.
    pub fn trimmed_mood(&self) -> &str {
        self.mood.trim()
    }

    /// The style tag parsed into the closed set, if it is a known tag.
    pub fn known_style(&self) -> Option<Style> {
        self.style.as_deref().and_then(Style::from_tag)
    }
}
