//! Panel synthesizer.

use crate::payload::{AUDIO_MIME, IMAGE_MIME, data_url};
use crate::voice::{narration_voice, sfx_voice};
use crate::SynthesisSettings;
use moodcomic_cache::SynthesisCache;
use moodcomic_core::{EnrichedPanel, StoryPanel, VoiceGender, VoiceStyle};
use moodcomic_error::{
    ModelsError, ModelsErrorKind, SynthesisError, SynthesisErrorKind, SynthesisResult,
};
use moodcomic_models::{ImageModel, SpeechModel, SpeechRequest};
use moodcomic_rate_limit::RetryPolicy;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// A synthesized payload and whether it came from the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Synthesized {
    /// `data:` URL payload
    pub payload: String,
    /// True when served from the cache
    pub cache_hit: bool,
}

/// Per-request options for [`PanelSynthesizer::enrich`].
#[derive(Debug, Clone, Copy, Default)]
pub struct EnrichOptions<'a> {
    /// Style tag, part of the image fingerprint
    pub style: Option<&'a str>,
    /// Narration voice; `None` disables audio for this request
    pub voice: Option<VoiceGender>,
    /// Mood appended to narration when configured
    pub mood: Option<&'a str>,
}

/// Result of enriching one panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelOutcome {
    /// The panel with whatever media succeeded
    pub panel: EnrichedPanel,
    /// True when the image came from the cache
    pub image_cache_hit: bool,
}

/// Narration text for a panel.
///
/// `"{title}. {narration}  {dialogue} (Sound cue: {sfx})"` with empty parts
/// omitted, followed by ` 基於主題：{mood}` when a mood is given.
///
/// ```
/// use moodcomic_panels::narration_text;
///
/// assert_eq!(
///     narration_text("Dawn", "The city wakes.", "", Some("birdsong"), None),
///     "Dawn. The city wakes. (Sound cue: birdsong)"
/// );
/// ```
pub fn narration_text(
    title: &str,
    narration: &str,
    dialogue: &str,
    sfx: Option<&str>,
    mood: Option<&str>,
) -> String {
    let mut text = String::new();
    if !title.is_empty() {
        text.push_str(title);
        text.push_str(". ");
    }
    text.push_str(narration);
    if !dialogue.is_empty() {
        text.push_str("  ");
        text.push_str(dialogue);
    }
    if let Some(sfx) = sfx.filter(|s| !s.is_empty()) {
        text.push_str(" (Sound cue: ");
        text.push_str(sfx);
        text.push(')');
    }
    if let Some(mood) = mood.filter(|m| !m.is_empty()) {
        text.push_str(" 基於主題：");
        text.push_str(mood);
    }
    text
}

/// Synthesizes panel images and audio through the model seams.
#[derive(Clone)]
pub struct PanelSynthesizer {
    image: Arc<dyn ImageModel>,
    speech: Option<Arc<dyn SpeechModel>>,
    cache: Arc<SynthesisCache>,
    retry: RetryPolicy,
    settings: SynthesisSettings,
}

impl std::fmt::Debug for PanelSynthesizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PanelSynthesizer")
            .field("image", &self.image.model_name())
            .field("speech", &self.speech.as_ref().map(|s| s.model_name().to_string()))
            .field("retry", &self.retry)
            .field("settings", &self.settings)
            .finish()
    }
}

impl PanelSynthesizer {
    /// Create a synthesizer. Audio is unavailable when `speech` is `None`.
    pub fn new(
        image: Arc<dyn ImageModel>,
        speech: Option<Arc<dyn SpeechModel>>,
        cache: Arc<SynthesisCache>,
        retry: RetryPolicy,
        settings: SynthesisSettings,
    ) -> Self {
        Self {
            image,
            speech,
            cache,
            retry,
            settings,
        }
    }

    /// Image model identifier.
    pub fn image_model_name(&self) -> &str {
        self.image.model_name()
    }

    /// Speech model identifier, if audio is configured.
    pub fn speech_model_name(&self) -> Option<&str> {
        self.speech.as_ref().map(|s| s.model_name())
    }

    /// True when narration will be produced for a request naming a voice.
    pub fn audio_enabled(&self) -> bool {
        self.speech.is_some() && *self.settings.voice_enabled()
    }

    /// Synthesis settings.
    pub fn settings(&self) -> &SynthesisSettings {
        &self.settings
    }

    /// Generate (or fetch from cache) the image for `visual_prompt`.
    ///
    /// Each attempt (generation plus download) races a hard timer; elapsing
    /// is a failure that is not retried.
    #[instrument(skip(self, visual_prompt), fields(prompt_len = visual_prompt.len()))]
    pub async fn synthesize_image(
        &self,
        visual_prompt: &str,
        style: Option<&str>,
    ) -> SynthesisResult<Synthesized> {
        let key = SynthesisCache::key(visual_prompt, style.unwrap_or_default());
        if let Some(payload) = self.cache.get(&key) {
            debug!("Image cache hit");
            return Ok(Synthesized {
                payload,
                cache_hit: true,
            });
        }

        let prompt = format!("{}{}", visual_prompt, self.settings.image_style_suffix());
        let timeout = Duration::from_secs(*self.settings.image_timeout_secs());

        let bytes = self
            .retry
            .with_retry(|| self.generate_and_fetch(&prompt, timeout))
            .await?;

        if bytes.is_empty() {
            return Err(SynthesisError::new(SynthesisErrorKind::EmptyPayload("image")));
        }

        let payload = data_url(IMAGE_MIME, &bytes);
        self.cache.put(&key, payload.clone());
        Ok(Synthesized {
            payload,
            cache_hit: false,
        })
    }

    async fn generate_and_fetch(&self, prompt: &str, timeout: Duration) -> Result<Vec<u8>, ModelsError> {
        let attempt = async {
            let url = self.image.generate_image(prompt).await?;
            self.image.fetch_image(&url).await
        };
        within(timeout, attempt, "image").await
    }

    /// Generate (or fetch from cache) narration audio for a panel.
    #[instrument(skip(self, panel), fields(panel = panel.index))]
    pub async fn synthesize_audio(
        &self,
        panel: &StoryPanel,
        gender: VoiceGender,
        voice_style: VoiceStyle,
        mood: Option<&str>,
    ) -> SynthesisResult<Synthesized> {
        let text = narration_text(
            &panel.title,
            &panel.narration,
            &panel.dialogue,
            panel.sfx.as_deref(),
            mood,
        );
        let params = format!("{}-{}", gender, voice_style.bucket());
        let request = SpeechRequest::new(text, narration_voice(gender, voice_style));
        self.speak(request, &params, "audio").await
    }

    /// Generate (or fetch from cache) a sound-effect clip for `sfx`.
    #[instrument(skip(self))]
    pub async fn synthesize_sfx(&self, sfx: &str, gender: VoiceGender) -> SynthesisResult<Synthesized> {
        let params = format!("{}-sfx", gender);
        let request =
            SpeechRequest::new(sfx, sfx_voice(gender)).with_speed(*self.settings.sfx_speed());
        self.speak(request, &params, "sfx").await
    }

    async fn speak(
        &self,
        request: SpeechRequest,
        params: &str,
        what: &'static str,
    ) -> SynthesisResult<Synthesized> {
        let speech = self
            .speech
            .as_ref()
            .ok_or_else(|| SynthesisError::new(SynthesisErrorKind::SpeechUnavailable))?;

        let key = SynthesisCache::key(request.input(), params);
        if let Some(payload) = self.cache.get(&key) {
            debug!(what, "Audio cache hit");
            return Ok(Synthesized {
                payload,
                cache_hit: true,
            });
        }

        let timeout = Duration::from_secs(*self.settings.speech_timeout_secs());
        let bytes = self
            .retry
            .with_retry(|| within(timeout, speech.synthesize(&request), what))
            .await?;

        if bytes.is_empty() {
            return Err(SynthesisError::new(SynthesisErrorKind::EmptyPayload(what)));
        }

        let payload = data_url(AUDIO_MIME, &bytes);
        self.cache.put(&key, payload.clone());
        Ok(Synthesized {
            payload,
            cache_hit: false,
        })
    }

    /// Enrich one panel with every requested media type.
    ///
    /// Image and audio run concurrently and fail independently; a failure
    /// leaves that field empty and is logged.
    #[instrument(skip(self, panel, options), fields(panel = panel.index))]
    pub async fn enrich(&self, panel: StoryPanel, options: EnrichOptions<'_>) -> PanelOutcome {
        let voice = options.voice.filter(|_| self.audio_enabled());
        let mood = options.mood.filter(|_| *self.settings.narrate_mood());
        let sfx_cue = panel
            .sfx
            .as_deref()
            .filter(|_| voice.is_some() && *self.settings.sfx_enabled());

        let image = self.synthesize_image(&panel.visual_prompt, options.style);
        let audio = async {
            match voice {
                Some(gender) => Some(
                    self.synthesize_audio(&panel, gender, *self.settings.voice_style(), mood)
                        .await,
                ),
                None => None,
            }
        };
        let sfx = async {
            match (sfx_cue, voice) {
                (Some(cue), Some(gender)) => Some(self.synthesize_sfx(cue, gender).await),
                _ => None,
            }
        };

        let (image, audio, sfx) = tokio::join!(image, audio, sfx);

        let image_cache_hit = matches!(&image, Ok(synth) if synth.cache_hit);
        let image_b64 = keep(image, panel.index, "image");
        let audio_b64 = audio.and_then(|result| keep(result, panel.index, "audio"));
        let sfx_audio_b64 = sfx.and_then(|result| keep(result, panel.index, "sfx"));

        PanelOutcome {
            panel: EnrichedPanel {
                panel,
                image_b64,
                audio_b64,
                sfx_audio_b64,
            },
            image_cache_hit,
        }
    }
}

async fn within<T>(
    timeout: Duration,
    call: impl Future<Output = Result<T, ModelsError>>,
    what: &'static str,
) -> Result<T, ModelsError> {
    let timeout_ms = timeout.as_millis() as u64;
    tokio::time::timeout(timeout, call).await.unwrap_or_else(|_| {
        warn!(what, timeout_ms, "Model call timed out");
        Err(ModelsError::new(ModelsErrorKind::Timeout(timeout_ms)))
    })
}

fn keep(result: SynthesisResult<Synthesized>, index: usize, what: &'static str) -> Option<String> {
    match result {
        Ok(synth) => Some(synth.payload),
        Err(e) => {
            warn!(panel = index + 1, what, error = %e, "Panel synthesis failed, degrading panel");
            None
        }
    }
}
