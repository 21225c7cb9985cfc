//! OpenAI client implementing the text, image and speech seams.

use super::OpenAiConfig;
use super::wire::{
    ChatCompletionBody, ChatCompletionResponse, ImageGenerationBody, ImageGenerationResponse,
    SpeechBody,
};
use crate::{ChatRequest, ImageModel, SpeechModel, SpeechRequest, TextModel};
use async_trait::async_trait;
use moodcomic_error::{ModelsError, ModelsErrorKind, ModelsResult};
use serde::Serialize;
use tracing::instrument;

/// Client for the OpenAI chat, image and speech endpoints.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    config: OpenAiConfig,
    api_key: String,
    client: reqwest::Client,
}

impl OpenAiClient {
    /// Create a new client.
    ///
    /// # Errors
    ///
    /// Returns [`ModelsErrorKind::MissingApiKey`] if neither the config nor
    /// `OPENAI_API_KEY` provides a key.
    #[instrument(skip(config), fields(base_url = %config.base_url()))]
    pub fn new(config: OpenAiConfig) -> ModelsResult<Self> {
        let api_key = config
            .resolve_api_key()
            .ok_or_else(|| ModelsError::new(ModelsErrorKind::MissingApiKey("openai".into())))?;

        let client = reqwest::Client::builder()
            .gzip(true)
            .build()
            .map_err(|e| ModelsError::new(ModelsErrorKind::Http(e.to_string())))?;

        tracing::debug!("Creating OpenAI client");
        Ok(Self {
            config,
            api_key,
            client,
        })
    }

    /// Get the client configuration
    pub fn config(&self) -> &OpenAiConfig {
        &self.config
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/v1/{}", self.config.base_url().trim_end_matches('/'), path)
    }

    async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ModelsResult<reqwest::Response> {
        let url = self.endpoint(path);
        tracing::debug!("Sending request to {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Request failed: {}", e);
                ModelsError::new(ModelsErrorKind::Http(format!("Request failed: {}", e)))
            })?;

        check_status(response).await
    }
}

/// Turn a non-success response into an `Api` error carrying the body text.
async fn check_status(response: reqwest::Response) -> ModelsResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .text()
        .await
        .unwrap_or_else(|e| format!("<unreadable body: {}>", e));
    tracing::error!(status = status.as_u16(), "Provider returned error");
    Err(ModelsError::new(ModelsErrorKind::Api {
        status_code: status.as_u16(),
        message,
    }))
}

#[async_trait]
impl TextModel for OpenAiClient {
    #[instrument(
        skip(self, request),
        fields(model = %self.config.text_model(), messages = request.messages().len())
    )]
    async fn complete(&self, request: &ChatRequest) -> ModelsResult<String> {
        let body = ChatCompletionBody {
            model: self.config.text_model(),
            messages: request.messages(),
            temperature: *request.temperature(),
            max_tokens: *request.max_tokens(),
            presence_penalty: *request.presence_penalty(),
            frequency_penalty: *request.frequency_penalty(),
        };

        let response: ChatCompletionResponse = self
            .post("chat/completions", &body)
            .await?
            .json()
            .await
            .map_err(|e| {
                tracing::error!("Failed to parse response: {}", e);
                ModelsError::new(ModelsErrorKind::Parse(e.to_string()))
            })?;

        let text = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| ModelsError::new(ModelsErrorKind::EmptyResponse))?;

        tracing::debug!(chars = text.len(), "Chat completion successful");
        Ok(text)
    }

    fn model_name(&self) -> &str {
        self.config.text_model()
    }
}

#[async_trait]
impl ImageModel for OpenAiClient {
    #[instrument(skip(self, prompt), fields(model = %self.config.image_model(), prompt_len = prompt.len()))]
    async fn generate_image(&self, prompt: &str) -> ModelsResult<String> {
        let body = ImageGenerationBody {
            model: self.config.image_model(),
            prompt,
            n: 1,
            size: self.config.image_size(),
            response_format: "url",
        };

        let response: ImageGenerationResponse = self
            .post("images/generations", &body)
            .await?
            .json()
            .await
            .map_err(|e| ModelsError::new(ModelsErrorKind::Parse(e.to_string())))?;

        response
            .data
            .into_iter()
            .next()
            .and_then(|image| image.url)
            .ok_or_else(|| ModelsError::new(ModelsErrorKind::EmptyResponse))
    }

    #[instrument(skip(self, url))]
    async fn fetch_image(&self, url: &str) -> ModelsResult<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ModelsError::new(ModelsErrorKind::Http(format!("Download failed: {}", e))))?;

        let bytes = check_status(response)
            .await?
            .bytes()
            .await
            .map_err(|e| ModelsError::new(ModelsErrorKind::Http(e.to_string())))?;

        if bytes.is_empty() {
            return Err(ModelsError::new(ModelsErrorKind::EmptyResponse));
        }
        tracing::debug!(bytes = bytes.len(), "Downloaded image");
        Ok(bytes.to_vec())
    }

    fn model_name(&self) -> &str {
        self.config.image_model()
    }
}

#[async_trait]
impl SpeechModel for OpenAiClient {
    #[instrument(
        skip(self, request),
        fields(model = %self.config.speech_model(), voice = %request.voice(), chars = request.input().len())
    )]
    async fn synthesize(&self, request: &SpeechRequest) -> ModelsResult<Vec<u8>> {
        let body = SpeechBody {
            model: self.config.speech_model(),
            input: request.input(),
            voice: request.voice(),
            speed: *request.speed(),
            response_format: "mp3",
        };

        let bytes = self
            .post("audio/speech", &body)
            .await?
            .bytes()
            .await
            .map_err(|e| ModelsError::new(ModelsErrorKind::Http(e.to_string())))?;

        if bytes.is_empty() {
            return Err(ModelsError::new(ModelsErrorKind::EmptyResponse));
        }
        Ok(bytes.to_vec())
    }

    fn model_name(&self) -> &str {
        self.config.speech_model()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_base_url() {
        let config = OpenAiConfig::default()
            .with_api_key("sk-test")
            .with_base_url("http://localhost:9000/");
        let client = OpenAiClient::new(config).unwrap();
        assert_eq!(
            client.endpoint("chat/completions"),
            "http://localhost:9000/v1/chat/completions"
        );
    }

    #[test]
    fn test_model_names_come_from_config() {
        let client = OpenAiClient::new(OpenAiConfig::default().with_api_key("sk-test")).unwrap();
        assert_eq!(TextModel::model_name(&client), "gpt-4o-mini");
        assert_eq!(ImageModel::model_name(&client), "dall-e-2");
        assert_eq!(SpeechModel::model_name(&client), "tts-1");
    }
}
