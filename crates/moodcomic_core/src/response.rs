//! Generation response.

use crate::EnrichedPanel;
use serde::{Deserialize, Serialize};

/// Metadata returned alongside the panels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationMeta {
    /// Echoed mood
    pub mood: String,
    /// Echoed legacy context
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    /// Echoed style tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    /// Text model identifier
    pub model_text: String,
    /// Image model identifier
    pub model_image: String,
    /// Speech model identifier, present when narration audio was requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_tts: Option<String>,
    /// Estimated provider cost in USD
    pub cost_estimate_usd: f64,
    /// Images served from the cache
    pub cached_hits: u32,
    /// Wall-clock time of the panel fan-out phase
    pub generation_time_ms: u64,
}

/// The full comic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// Panels in story order
    pub panels: Vec<EnrichedPanel>,
    /// Request metadata and metrics
    pub meta: GenerationMeta,
}
