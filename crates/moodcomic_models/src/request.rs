//! Provider-neutral request types.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Chat participant role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// Instructions for the model
    System,
    /// End-user content
    User,
    /// Prior model output
    Assistant,
}

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Sender role
    pub role: ChatRole,
    /// Text content
    pub content: String,
}

impl ChatMessage {
    /// System message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    /// User message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// Chat completion request with sampling parameters.
///
/// # Examples
///
/// ```
/// use moodcomic_models::{ChatMessage, ChatRequestBuilder};
///
/// let request = ChatRequestBuilder::default()
///     .messages(vec![ChatMessage::user("Tell me a story")])
///     .temperature(0.9)
///     .build()
///     .unwrap();
///
/// assert_eq!(*request.temperature(), 0.9);
/// assert_eq!(*request.max_tokens(), 1000);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct ChatRequest {
    /// Conversation so far
    messages: Vec<ChatMessage>,
    /// Sampling temperature
    #[builder(default = "0.9")]
    temperature: f32,
    /// Completion token limit
    #[builder(default = "1000")]
    max_tokens: u32,
    /// Penalty for tokens already present
    #[builder(default = "0.0")]
    presence_penalty: f32,
    /// Penalty proportional to token frequency
    #[builder(default = "0.0")]
    frequency_penalty: f32,
}

/// Text-to-speech request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct SpeechRequest {
    /// Text to speak
    input: String,
    /// Provider voice identifier
    voice: String,
    /// Playback speed multiplier
    #[builder(default = "1.0")]
    speed: f32,
}

impl SpeechRequest {
    /// Request speech for `input` with `voice` at normal speed.
    pub fn new(input: impl Into<String>, voice: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            voice: voice.into(),
            speed: 1.0,
        }
    }

    /// Same request with a different speed.
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }
}
