//! Synthesis settings.

use derive_getters::Getters;
use moodcomic_core::VoiceStyle;
use serde::{Deserialize, Serialize};

/// Image and audio synthesis settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, derive_setters::Setters)]
#[setters(prefix = "with_")]
pub struct SynthesisSettings {
    /// Hard deadline for one image attempt, generation plus download (seconds)
    #[serde(default = "default_image_timeout_secs")]
    image_timeout_secs: u64,

    /// Hard deadline for one speech synthesis call (seconds)
    #[serde(default = "default_speech_timeout_secs")]
    speech_timeout_secs: u64,

    /// Appended to every image prompt
    #[serde(default = "default_image_style_suffix")]
    image_style_suffix: String,

    /// Produce narration audio when the request names a voice gender
    #[serde(default = "default_true")]
    voice_enabled: bool,

    /// Narration delivery style
    #[serde(default)]
    voice_style: VoiceStyle,

    /// Produce a sound-effect clip for panels with an sfx cue
    #[serde(default = "default_true")]
    sfx_enabled: bool,

    /// Playback speed for sound-effect clips
    #[serde(default = "default_sfx_speed")]
    sfx_speed: f32,

    /// Append the mood to narration text
    #[serde(default)]
    narrate_mood: bool,
}

fn default_image_timeout_secs() -> u64 {
    15
}

fn default_speech_timeout_secs() -> u64 {
    15
}

fn default_image_style_suffix() -> String {
    ", surreal art, avant-garde, striking colors, dramatic lighting, trending on artstation"
        .to_string()
}

fn default_true() -> bool {
    true
}

fn default_sfx_speed() -> f32 {
    0.8
}

impl Default for SynthesisSettings {
    fn default() -> Self {
        Self {
            image_timeout_secs: default_image_timeout_secs(),
            speech_timeout_secs: default_speech_timeout_secs(),
            image_style_suffix: default_image_style_suffix(),
            voice_enabled: true,
            voice_style: VoiceStyle::default(),
            sfx_enabled: true,
            sfx_speed: default_sfx_speed(),
            narrate_mood: false,
        }
    }
}
