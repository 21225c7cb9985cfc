//! Story generation settings.

use crate::validate::MIN_NARRATION_CHARS;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Sampling parameters and validation thresholds for story generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, derive_setters::Setters)]
#[setters(prefix = "with_")]
pub struct StorySettings {
    /// Sampling temperature
    #[serde(default = "default_temperature")]
    temperature: f32,

    /// Completion token limit
    #[serde(default = "default_max_tokens")]
    max_tokens: u32,

    /// Presence penalty
    #[serde(default = "default_penalty")]
    presence_penalty: f32,

    /// Frequency penalty
    #[serde(default = "default_penalty")]
    frequency_penalty: f32,

    /// Narration shorter than this is treated as truncated
    #[serde(default = "default_min_narration_chars")]
    min_narration_chars: usize,
}

fn default_temperature() -> f32 {
    0.9
}

fn default_max_tokens() -> u32 {
    1000
}

fn default_penalty() -> f32 {
    0.3
}

fn default_min_narration_chars() -> usize {
    MIN_NARRATION_CHARS
}

impl Default for StorySettings {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            presence_penalty: default_penalty(),
            frequency_penalty: default_penalty(),
            min_narration_chars: default_min_narration_chars(),
        }
    }
}
