//! Parsing and validation of repaired story JSON.

use moodcomic_core::{PANEL_COUNT, StoryPanel};
use moodcomic_error::{StoryError, StoryErrorKind, StoryResult};
use serde::Deserialize;
use serde_json::Value;

/// Default minimum narration length, in characters.
pub const MIN_NARRATION_CHARS: usize = 10;

#[derive(Debug, Deserialize)]
struct RawStory {
    panels: Vec<RawPanel>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawPanel {
    title: Option<String>,
    narration: Option<String>,
    dialogue: Option<String>,
    visual_prompt: Option<String>,
    duration_sec: Option<Value>,
    sfx: Option<String>,
}

/// Parse repaired JSON into exactly four validated panels.
///
/// Indices are assigned by position. Any missing field fails the whole batch.
///
/// # Errors
///
/// - [`StoryErrorKind::Malformed`] if the text is not a `{"panels": [...]}` object
/// - [`StoryErrorKind::PanelCount`] unless there are exactly four panels
/// - [`StoryErrorKind::IncompletePanel`] for an empty title, narration or
///   visual prompt, or a missing/non-positive duration
/// - [`StoryErrorKind::TruncatedNarration`] for narration under `min_narration_chars`
pub fn parse_panels(json: &str, min_narration_chars: usize) -> StoryResult<Vec<StoryPanel>> {
    let story: RawStory = serde_json::from_str(json)
        .map_err(|e| StoryError::new(StoryErrorKind::Malformed(e.to_string())))?;

    if story.panels.len() != PANEL_COUNT {
        return Err(StoryError::new(StoryErrorKind::PanelCount {
            expected: PANEL_COUNT,
            actual: story.panels.len(),
        }));
    }

    story
        .panels
        .into_iter()
        .enumerate()
        .map(|(index, raw)| validate_panel(index, raw, min_narration_chars))
        .collect()
}

fn validate_panel(index: usize, raw: RawPanel, min_narration_chars: usize) -> StoryResult<StoryPanel> {
    let panel = index + 1;
    let incomplete = |field| StoryError::new(StoryErrorKind::IncompletePanel { panel, field });

    let title = non_empty(raw.title).ok_or_else(|| incomplete("title"))?;
    let narration = non_empty(raw.narration).ok_or_else(|| incomplete("narration"))?;
    let visual_prompt = non_empty(raw.visual_prompt).ok_or_else(|| incomplete("visual_prompt"))?;
    let duration_sec = raw
        .duration_sec
        .as_ref()
        .and_then(positive_seconds)
        .ok_or_else(|| incomplete("duration_sec"))?;

    let length = narration.chars().count();
    if length < min_narration_chars {
        return Err(StoryError::new(StoryErrorKind::TruncatedNarration { panel, length }));
    }

    Ok(StoryPanel {
        index,
        title,
        narration,
        dialogue: raw.dialogue.map(|d| d.trim().to_string()).unwrap_or_default(),
        visual_prompt,
        duration_sec,
        sfx: non_empty(raw.sfx),
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Accept numbers and numeric strings ("6", "6.5s").
fn positive_seconds(value: &Value) -> Option<f64> {
    let seconds = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches('s').trim().parse().ok(),
        _ => None,
    }?;
    (seconds.is_finite() && seconds > 0.0).then_some(seconds)
}

/// Log a warning for panels whose text never mentions the mood.
///
/// This is advisory only; it never rejects a story.
pub fn warn_off_topic(mood: &str, panels: &[StoryPanel]) -> usize {
    let needle = mood.trim().to_lowercase();
    if needle.is_empty() {
        return 0;
    }

    let mut off_topic = 0;
    for panel in panels {
        let haystack = format!(
            "{} {} {} {}",
            panel.title, panel.narration, panel.dialogue, panel.visual_prompt
        )
        .to_lowercase();
        if !haystack.contains(&needle) {
            off_topic += 1;
            tracing::warn!(panel = panel.index + 1, mood, "Panel does not reference the mood");
        }
    }
    off_topic
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn panel_json(title: &str) -> Value {
        json!({
            "title": title,
            "narration": "The rain keeps falling on the quiet street.",
            "dialogue": "",
            "visual_prompt": "rainy street at night",
            "duration_sec": 6
        })
    }

    fn story_json(panels: Vec<Value>) -> String {
        json!({ "panels": panels }).to_string()
    }

    #[test]
    fn test_valid_story_assigns_indices_by_position() {
        let json = story_json((0..4).map(|i| panel_json(&format!("T{i}"))).collect());
        let panels = parse_panels(&json, MIN_NARRATION_CHARS).unwrap();
        assert_eq!(panels.len(), 4);
        for (i, panel) in panels.iter().enumerate() {
            assert_eq!(panel.index, i);
            assert_eq!(panel.title, format!("T{i}"));
            assert_eq!(panel.duration_sec, 6.0);
        }
    }

    #[test]
    fn test_wrong_panel_count() {
        let json = story_json(vec![panel_json("a"), panel_json("b"), panel_json("c")]);
        let err = parse_panels(&json, MIN_NARRATION_CHARS).unwrap_err();
        assert_eq!(err.kind, StoryErrorKind::PanelCount { expected: 4, actual: 3 });
    }

    #[test]
    fn test_missing_visual_prompt_fails_whole_batch() {
        let mut panels: Vec<Value> = (0..4).map(|_| panel_json("t")).collect();
        panels[2]["visual_prompt"] = json!("  ");
        let err = parse_panels(&story_json(panels), MIN_NARRATION_CHARS).unwrap_err();
        assert_eq!(
            err.kind,
            StoryErrorKind::IncompletePanel { panel: 3, field: "visual_prompt" }
        );
    }

    #[test]
    fn test_non_positive_duration_is_incomplete() {
        let mut panels: Vec<Value> = (0..4).map(|_| panel_json("t")).collect();
        panels[0]["duration_sec"] = json!(0);
        let err = parse_panels(&story_json(panels), MIN_NARRATION_CHARS).unwrap_err();
        assert_eq!(
            err.kind,
            StoryErrorKind::IncompletePanel { panel: 1, field: "duration_sec" }
        );
    }

    #[test]
    fn test_string_duration_is_accepted() {
        let mut panels: Vec<Value> = (0..4).map(|_| panel_json("t")).collect();
        panels[1]["duration_sec"] = json!("5.5s");
        let parsed = parse_panels(&story_json(panels), MIN_NARRATION_CHARS).unwrap();
        assert_eq!(parsed[1].duration_sec, 5.5);
    }

    #[test]
    fn test_short_narration_is_truncation() {
        let mut panels: Vec<Value> = (0..4).map(|_| panel_json("t")).collect();
        panels[3]["narration"] = json!("Then");
        let err = parse_panels(&story_json(panels), MIN_NARRATION_CHARS).unwrap_err();
        assert_eq!(
            err.kind,
            StoryErrorKind::TruncatedNarration { panel: 4, length: 4 }
        );
    }

    #[test]
    fn test_not_an_object_is_malformed() {
        let err = parse_panels("[1, 2, 3]", MIN_NARRATION_CHARS).unwrap_err();
        assert!(matches!(err.kind, StoryErrorKind::Malformed(_)));
    }

    #[test]
    fn test_off_topic_panels_are_counted_not_rejected() {
        let json = story_json((0..4).map(|_| panel_json("t")).collect());
        let panels = parse_panels(&json, MIN_NARRATION_CHARS).unwrap();
        assert_eq!(warn_off_topic("rain", &panels), 0);
        assert_eq!(warn_off_topic("volcano", &panels), 4);
    }
}
