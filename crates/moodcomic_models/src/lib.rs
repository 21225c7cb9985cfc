//! Model provider seams and clients.
//!
//! The pipeline only talks to the three traits in this crate:
//!
//! - [`TextModel`] for chat completion (story text)
//! - [`ImageModel`] for image generation and download
//! - [`SpeechModel`] for text-to-speech
//!
//! [`OpenAiClient`] implements all three against the OpenAI HTTP API. Mock
//! implementations with call counters and fault injection live in [`mock`]
//! behind the `testing` feature.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod openai;
mod request;
mod traits;

#[cfg(any(test, feature = "testing"))]
pub mod mock;

pub use openai::{OpenAiClient, OpenAiConfig};
pub use request::{
    ChatMessage, ChatRequest, ChatRequestBuilder, ChatRole, SpeechRequest, SpeechRequestBuilder,
};
pub use traits::{ImageModel, SpeechModel, TextModel};
