//! Closed set of tonal styles.

use serde::{Deserialize, Serialize};

/// Tonal/thematic framing for a comic.
///
/// Wire tags are kebab-case (`avant-garde`, `healing`, ...).
///
/// # Examples
///
/// ```
/// use moodcomic_core::Style;
///
/// assert_eq!(Style::from_tag("Avant-Garde"), Some(Style::AvantGarde));
/// assert_eq!(Style::AvantGarde.as_ref(), "avant-garde");
/// assert_eq!(Style::from_tag("noir"), None);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumString,
    strum::Display,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Style {
    /// Comfort and recovery
    Healing,
    /// Comedy
    Funny,
    /// Strong emotion and conflict
    Passion,
    /// Secrets and suspense
    Mystery,
    /// Sweet and gentle
    Cute,
    /// Theatrical tension
    Dramatic,
    /// Playful fantasy
    Whimsical,
    /// Refined and graceful
    Elegant,
    /// Unfiltered and honest
    Raw,
    /// Soft and otherworldly
    Dreamy,
    /// Uplifting
    Positive,
    /// Dark and intense
    Negative,
    /// Classic storytelling
    Traditional,
    /// Surreal, logic-defying
    AvantGarde,
    /// Balanced blend
    Neutral,
    /// Love and tenderness
    Romantic,
    /// Enigmatic atmosphere
    Mysterious,
    /// Journeys and quests
    Adventurous,
    /// Reflective questions
    Philosophical,
    /// Dream logic
    Surreal,
}

impl Style {
    /// Parse a wire tag, ignoring case and surrounding whitespace.
    pub fn from_tag(tag: &str) -> Option<Self> {
        tag.trim().to_lowercase().parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_every_style_round_trips_through_its_tag() {
        let mut count = 0;
        for style in Style::iter() {
            assert_eq!(Style::from_tag(style.as_ref()), Some(style));
            count += 1;
        }
        assert_eq!(count, 20);
    }

    #[test]
    fn test_serde_uses_kebab_case() {
        let json = serde_json::to_string(&Style::AvantGarde).unwrap();
        assert_eq!(json, "\"avant-garde\"");
    }
}
