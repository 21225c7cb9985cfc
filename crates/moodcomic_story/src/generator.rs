//! Story generator.

use crate::{StorySettings, prompts, repair, validate};
use moodcomic_core::StoryPanel;
use moodcomic_error::{ModelsErrorKind, StoryError, StoryErrorKind, StoryResult};
use moodcomic_models::{ChatMessage, ChatRequest, ChatRequestBuilder, TextModel};
use moodcomic_rate_limit::RetryPolicy;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Generates four-panel stories from a mood.
///
/// # Example
///
/// ```rust,ignore
/// let generator = StoryGenerator::new(text_model, RetryPolicy::default(), StorySettings::default());
/// let panels = generator.generate("地鐵奇遇", Some("healing")).await?;
/// assert_eq!(panels.len(), 4);
/// ```
#[derive(Clone)]
pub struct StoryGenerator {
    model: Arc<dyn TextModel>,
    retry: RetryPolicy,
    settings: StorySettings,
}

impl std::fmt::Debug for StoryGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoryGenerator")
            .field("model", &self.model.model_name())
            .field("retry", &self.retry)
            .field("settings", &self.settings)
            .finish()
    }
}

impl StoryGenerator {
    /// Create a generator over `model`.
    pub fn new(model: Arc<dyn TextModel>, retry: RetryPolicy, settings: StorySettings) -> Self {
        Self {
            model,
            retry,
            settings,
        }
    }

    /// Identifier of the underlying text model.
    pub fn model_name(&self) -> &str {
        self.model.model_name()
    }

    /// Generate exactly four panels for `mood`.
    ///
    /// Never falls back to a canned story: any model, parse or validation
    /// failure is returned.
    #[instrument(skip(self), fields(model = %self.model.model_name()))]
    pub async fn generate(&self, mood: &str, style: Option<&str>) -> StoryResult<Vec<StoryPanel>> {
        let request = self.build_request(mood, style)?;

        let raw = self
            .retry
            .with_retry(|| self.model.complete(&request))
            .await
            .map_err(|e| match e.kind {
                ModelsErrorKind::EmptyResponse => StoryError::new(StoryErrorKind::EmptyResponse),
                _ => StoryError::from(e),
            })?;

        if raw.trim().is_empty() {
            return Err(StoryError::new(StoryErrorKind::EmptyResponse));
        }
        debug!(chars = raw.len(), "Received story completion");

        let repaired = repair::repair(&raw);
        let panels = validate::parse_panels(&repaired, *self.settings.min_narration_chars())?;

        let off_topic = validate::warn_off_topic(mood, &panels);
        info!(panels = panels.len(), off_topic, "Story generated");
        Ok(panels)
    }

    fn build_request(&self, mood: &str, style: Option<&str>) -> StoryResult<ChatRequest> {
        let language = prompts::PromptLanguage::detect(mood);
        let nonce = prompts::nonce();

        ChatRequestBuilder::default()
            .messages(vec![
                ChatMessage::system(prompts::system_prompt(language)),
                ChatMessage::user(prompts::user_prompt(mood, style, &nonce)),
            ])
            .temperature(*self.settings.temperature())
            .max_tokens(*self.settings.max_tokens())
            .presence_penalty(*self.settings.presence_penalty())
            .frequency_penalty(*self.settings.frequency_penalty())
            .build()
            .map_err(|e| StoryError::new(StoryErrorKind::Malformed(e.to_string())))
    }
}
