//! Trait seams for model providers.

use crate::{ChatRequest, SpeechRequest};
use async_trait::async_trait;
use moodcomic_error::ModelsResult;

/// Chat-completion model used for story text.
#[async_trait]
pub trait TextModel: Send + Sync {
    /// Run a chat completion and return the first choice's text.
    async fn complete(&self, request: &ChatRequest) -> ModelsResult<String>;

    /// Model identifier (e.g., "gpt-4o-mini").
    fn model_name(&self) -> &str;
}

/// Image generation model.
///
/// Generation returns a resource URL; the bytes are fetched separately so the
/// caller can re-encode them into a self-contained payload.
#[async_trait]
pub trait ImageModel: Send + Sync {
    /// Generate one image for `prompt` and return its URL.
    async fn generate_image(&self, prompt: &str) -> ModelsResult<String>;

    /// Download the image at `url`.
    async fn fetch_image(&self, url: &str) -> ModelsResult<Vec<u8>>;

    /// Model identifier (e.g., "dall-e-2").
    fn model_name(&self) -> &str;
}

/// Text-to-speech model.
#[async_trait]
pub trait SpeechModel: Send + Sync {
    /// Synthesize speech and return the encoded audio (mp3).
    async fn synthesize(&self, request: &SpeechRequest) -> ModelsResult<Vec<u8>>;

    /// Model identifier (e.g., "tts-1").
    fn model_name(&self) -> &str;
}
