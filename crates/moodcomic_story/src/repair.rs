//! Cleanup of raw model output into parseable JSON.
//!
//! Each pass is a pure, idempotent `&str -> String` function. [`repair`]
//! chains them; the quote normalization only runs when the text does not
//! already parse, since it can damage apostrophes inside valid strings.

use regex::Regex;
use std::sync::LazyLock;

static OPENING_FENCE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^```[A-Za-z0-9_-]*[ \t]*\r?\n?").ok());

static CLOSING_FENCE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\s*```$").ok());

static SINGLE_QUOTED: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r#"'([^'"\\]*)'(\s*[,}\]:])"#).ok());

/// Run the full repair chain.
pub fn repair(raw: &str) -> String {
    let text = strip_control_chars(&extract_json_object(&strip_code_fences(raw)));
    if serde_json::from_str::<serde_json::Value>(&text).is_ok() {
        return text;
    }
    let normalized = normalize_single_quotes(&text);
    tracing::debug!(
        changed = normalized != text,
        "Applied single-quote normalization"
    );
    normalized
}

/// Remove a surrounding Markdown code fence (```` ```json ... ``` ````).
pub fn strip_code_fences(text: &str) -> String {
    let trimmed = text.trim();
    if !trimmed.starts_with("```") {
        return trimmed.to_string();
    }

    let without_open = match OPENING_FENCE.as_ref() {
        Some(re) => re.replace(trimmed, "").into_owned(),
        None => trimmed.trim_start_matches('`').to_string(),
    };
    let without_close = match CLOSING_FENCE.as_ref() {
        Some(re) => re.replace(&without_open, "").into_owned(),
        None => without_open.trim_end_matches('`').to_string(),
    };
    without_close.trim().to_string()
}

/// Keep only the span from the first `{` to the last `}`.
///
/// Text with no braces is returned trimmed.
pub fn extract_json_object(text: &str) -> String {
    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => text[start..=end].to_string(),
        _ => text.trim().to_string(),
    }
}

/// Convert single-quoted keys and values to double-quoted ones.
///
/// Only quotes that close right before `,` `}` `]` or `:` are rewritten.
pub fn normalize_single_quotes(text: &str) -> String {
    match SINGLE_QUOTED.as_ref() {
        Some(re) => re.replace_all(text, "\"$1\"$2").into_owned(),
        None => text.to_string(),
    }
}

/// Replace line breaks and tabs with spaces and drop other control characters.
pub fn strip_control_chars(text: &str) -> String {
    text.chars()
        .filter_map(|c| match c {
            '\n' | '\r' | '\t' => Some(' '),
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect()
}
