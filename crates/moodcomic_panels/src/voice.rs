//! Voice selection.

use moodcomic_core::{VoiceBucket, VoiceGender, VoiceStyle};

/// Provider voice for narration.
pub fn narration_voice(gender: VoiceGender, style: VoiceStyle) -> &'static str {
    match (gender, style.bucket()) {
        (VoiceGender::Female, VoiceBucket::Magnetic) => "nova",
        (VoiceGender::Female, VoiceBucket::Professional) => "alloy",
        (VoiceGender::Male, VoiceBucket::Magnetic) => "echo",
        (VoiceGender::Male, VoiceBucket::Professional) => "onyx",
    }
}

/// Provider voice for sound-effect clips.
pub fn sfx_voice(gender: VoiceGender) -> &'static str {
    match gender {
        VoiceGender::Female => "nova",
        VoiceGender::Male => "alloy",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voice_table() {
        assert_eq!(narration_voice(VoiceGender::Female, VoiceStyle::Magnetic), "nova");
        assert_eq!(narration_voice(VoiceGender::Female, VoiceStyle::Calm), "alloy");
        assert_eq!(narration_voice(VoiceGender::Male, VoiceStyle::Magnetic), "echo");
        assert_eq!(narration_voice(VoiceGender::Male, VoiceStyle::Narrator), "onyx");
        assert_eq!(sfx_voice(VoiceGender::Male), "alloy");
    }
}
