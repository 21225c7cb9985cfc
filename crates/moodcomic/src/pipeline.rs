//! Request orchestration: story, then four panels in parallel.

use crate::AppConfig;
use futures::future::join_all;
use moodcomic_cache::SynthesisCache;
use moodcomic_core::{
    CostModel, GenerationMeta, GenerationRequest, GenerationResponse, StoryPanel,
};
use moodcomic_error::{MoodcomicResult, RequestError, RequestErrorKind};
use moodcomic_models::OpenAiClient;
use moodcomic_panels::{EnrichOptions, PanelSynthesizer};
use moodcomic_story::StoryGenerator;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{error, info, instrument};

/// Turns a [`GenerationRequest`] into a four-panel comic.
///
/// Holds the story generator and panel synthesizer; both share one cache
/// and retry policy built from [`AppConfig`].
#[derive(Debug, Clone)]
pub struct ComicPipeline {
    story: StoryGenerator,
    panels: PanelSynthesizer,
    cost: CostModel,
    request_timeout: Option<Duration>,
}

impl ComicPipeline {
    /// Assemble a pipeline from its parts.
    pub fn new(
        story: StoryGenerator,
        panels: PanelSynthesizer,
        cost: CostModel,
        request_timeout: Option<Duration>,
    ) -> Self {
        Self {
            story,
            panels,
            cost,
            request_timeout,
        }
    }

    /// Build a pipeline backed by the OpenAI provider.
    ///
    /// # Errors
    ///
    /// Returns an error if no API key is configured.
    #[instrument(skip(config))]
    pub fn from_config(config: &AppConfig) -> MoodcomicResult<Self> {
        let client = Arc::new(OpenAiClient::new(config.provider().clone())?);
        let cache = Arc::new(SynthesisCache::new(config.cache().clone()));

        let story = StoryGenerator::new(
            client.clone(),
            config.retry().clone(),
            config.story().clone(),
        );
        let panels = PanelSynthesizer::new(
            client.clone(),
            Some(client),
            cache,
            config.retry().clone(),
            config.synthesis().clone(),
        );

        info!(
            text = story.model_name(),
            image = panels.image_model_name(),
            "Pipeline ready"
        );
        Ok(Self::new(
            story,
            panels,
            *config.cost(),
            config.request_timeout(),
        ))
    }

    /// Generate a comic.
    ///
    /// Story failures abort the request. Panel media failures never do: the
    /// affected panel is returned without that media.
    ///
    /// # Errors
    ///
    /// Returns a [`RequestError`] whose kind fixes the HTTP status.
    #[instrument(skip(self, request), fields(mood = %request.mood, style = ?request.style))]
    pub async fn handle(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, RequestError> {
        if request.trimmed_mood().is_empty() {
            return Err(RequestError::new(RequestErrorKind::Validation(
                "mood is empty".to_string(),
            )));
        }

        let mood = request.trimmed_mood();
        let style = request.style.as_deref();
        let story = self.write_story(mood, style).await?;

        let started = Instant::now();
        let options = EnrichOptions {
            style,
            voice: request.voice_gender,
            mood: Some(mood),
        };
        let outcomes = join_all(
            story
                .into_iter()
                .map(|panel| self.panels.enrich(panel, options)),
        )
        .await;

        let cached_hits = outcomes
            .iter()
            .filter(|outcome| outcome.image_cache_hit)
            .count() as u32;
        let cost_estimate_usd = self.cost.estimate(cached_hits);
        let panels: Vec<_> = outcomes.into_iter().map(|outcome| outcome.panel).collect();
        let generation_time_ms = started.elapsed().as_millis() as u64;

        let degraded = panels.iter().filter(|panel| panel.is_degraded()).count();
        info!(
            cached_hits,
            degraded, generation_time_ms, cost_estimate_usd, "Comic generated"
        );

        let model_tts = request
            .voice_gender
            .filter(|_| self.panels.audio_enabled())
            .and(self.panels.speech_model_name())
            .map(str::to_string);

        Ok(GenerationResponse {
            panels,
            meta: GenerationMeta {
                mood: request.mood.clone(),
                context: request.context.clone(),
                style: request.style.clone(),
                model_text: self.story.model_name().to_string(),
                model_image: self.panels.image_model_name().to_string(),
                model_tts,
                cost_estimate_usd,
                cached_hits,
                generation_time_ms,
            },
        })
    }

    /// Story stage under the request deadline.
    ///
    /// Panel synthesis is not covered: every media call carries its own
    /// timeout and degrades its panel instead of failing the request.
    async fn write_story(
        &self,
        mood: &str,
        style: Option<&str>,
    ) -> Result<Vec<StoryPanel>, RequestError> {
        let Some(deadline) = self.request_timeout else {
            return Ok(self.story.generate(mood, style).await?);
        };

        match tokio::time::timeout(deadline, self.story.generate(mood, style)).await {
            Ok(story) => Ok(story?),
            Err(_) => {
                error!(timeout_secs = deadline.as_secs(), "Story generation timed out");
                Err(RequestError::new(RequestErrorKind::UpstreamUnavailable(
                    format!("story generation exceeded {}s", deadline.as_secs()),
                )))
            }
        }
    }
}
