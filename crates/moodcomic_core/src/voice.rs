//! Narrator voice options.

use serde::{Deserialize, Serialize};

/// Narrator gender.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum VoiceGender {
    /// Male narrator
    #[default]
    Male,
    /// Female narrator
    Female,
}

/// Delivery style requested for narration.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum VoiceStyle {
    /// Deep, resonant delivery
    #[default]
    Magnetic,
    /// Warm delivery
    Warm,
    /// Upbeat delivery
    Energetic,
    /// Calm delivery
    Calm,
    /// Neutral narrator
    Narrator,
}

/// The two voice buckets the speech model distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum VoiceBucket {
    /// Magnetic voices
    Magnetic,
    /// Every other style
    Professional,
}

impl VoiceStyle {
    /// Collapse the style into its voice bucket.
    ///
    /// ```
    /// use moodcomic_core::{VoiceBucket, VoiceStyle};
    ///
    /// assert_eq!(VoiceStyle::Magnetic.bucket(), VoiceBucket::Magnetic);
    /// assert_eq!(VoiceStyle::Calm.bucket(), VoiceBucket::Professional);
    /// ```
    pub fn bucket(self) -> VoiceBucket {
        match self {
            VoiceStyle::Magnetic => VoiceBucket::Magnetic,
            VoiceStyle::Warm | VoiceStyle::Energetic | VoiceStyle::Calm | VoiceStyle::Narrator => {
                VoiceBucket::Professional
            }
        }
    }
}
