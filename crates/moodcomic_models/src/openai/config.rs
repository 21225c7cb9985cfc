//! OpenAI provider configuration.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Connection and model settings for the OpenAI provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct OpenAiConfig {
    /// API key; falls back to `OPENAI_API_KEY` when unset
    #[serde(default, skip_serializing)]
    api_key: Option<String>,

    /// Base URL without the `/v1` suffix
    #[serde(default = "default_base_url")]
    base_url: String,

    /// Chat completion model
    #[serde(default = "default_text_model")]
    text_model: String,

    /// Image generation model
    #[serde(default = "default_image_model")]
    image_model: String,

    /// Image dimensions, e.g. "256x256"
    #[serde(default = "default_image_size")]
    image_size: String,

    /// Speech model
    #[serde(default = "default_speech_model")]
    speech_model: String,
}

fn default_base_url() -> String {
    "https://api.openai.com".to_string()
}

fn default_text_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_image_model() -> String {
    "dall-e-2".to_string()
}

fn default_image_size() -> String {
    "256x256".to_string()
}

fn default_speech_model() -> String {
    "tts-1".to_string()
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            text_model: default_text_model(),
            image_model: default_image_model(),
            image_size: default_image_size(),
            speech_model: default_speech_model(),
        }
    }
}

impl OpenAiConfig {
    /// Set the API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Resolve the API key from config, then from `OPENAI_API_KEY`.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .filter(|key| !key.trim().is_empty())
    }
}
