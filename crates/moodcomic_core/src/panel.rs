//! Panel types.

use serde::{Deserialize, Serialize};

/// One validated story beat produced by the story generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryPanel {
    /// Position in the comic, 0..=3
    pub index: usize,
    /// Short panel title
    pub title: String,
    /// Narrator text
    pub narration: String,
    /// Character dialogue, possibly empty
    #[serde(default)]
    pub dialogue: String,
    /// Prompt handed to the image model
    pub visual_prompt: String,
    /// Suggested playback time in seconds
    pub duration_sec: f64,
    /// Optional sound cue
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sfx: Option<String>,
}

/// A story panel with whatever media could be synthesized for it.
///
/// Missing media is a valid degraded state, not an error.
///
/// # Examples
///
/// ```
/// use moodcomic_core::{EnrichedPanel, StoryPanel};
///
/// let panel = StoryPanel {
///     index: 0,
///     title: "Platform".into(),
///     narration: "The last train hums into the station.".into(),
///     dialogue: String::new(),
///     visual_prompt: "empty subway platform at midnight".into(),
///     duration_sec: 6.0,
///     sfx: None,
/// };
/// let enriched = EnrichedPanel::text_only(panel);
/// assert!(enriched.is_degraded());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedPanel {
    /// The underlying story panel
    #[serde(flatten)]
    pub panel: StoryPanel,
    /// `data:image/png;base64,...`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_b64: Option<String>,
    /// `data:audio/mpeg;base64,...` narration audio
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_b64: Option<String>,
    /// `data:audio/mpeg;base64,...` sound-effect clip
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sfx_audio_b64: Option<String>,
}

impl EnrichedPanel {
    /// Wrap a panel with no media attached.
    pub fn text_only(panel: StoryPanel) -> Self {
        Self {
            panel,
            image_b64: None,
            audio_b64: None,
            sfx_audio_b64: None,
        }
    }

    /// Panel index, 0..=3.
    pub fn index(&self) -> usize {
        self.panel.index
    }

    /// True when the panel has no image.
    pub fn is_degraded(&self) -> bool {
        self.image_b64.is_none()
    }
}
