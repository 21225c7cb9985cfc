//! Mock model clients for testing.
//!
//! Each mock counts its calls and supports fault injection so tests can drive
//! retry, timeout and partial-failure paths without network access.

use crate::{ChatRequest, ImageModel, SpeechModel, SpeechRequest, TextModel};
use async_trait::async_trait;
use moodcomic_error::{ModelsError, ModelsErrorKind, ModelsResult};
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Behavior configuration for mock text responses.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Always return success with the given text
    Success(String),
    /// Always return the specified error
    Error(ModelsErrorKind),
    /// Fail N times with the error, then succeed with the text
    FailThenSucceed {
        /// Number of leading failures
        fail_count: usize,
        /// Error returned while failing
        error: ModelsErrorKind,
        /// Text returned afterwards
        success_text: String,
    },
    /// Return a sequence of responses; the last one repeats
    Sequence(Vec<MockResponse>),
}

/// A single mock response (success or error).
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Successful completion text
    Success(String),
    /// Failure
    Error(ModelsErrorKind),
}

/// Mock chat-completion model.
#[derive(Debug, Clone)]
pub struct MockTextModel {
    behavior: MockBehavior,
    delay: Option<Duration>,
    call_count: Arc<AtomicUsize>,
    model_name: String,
}

impl MockTextModel {
    /// Create a mock that always succeeds with the given text.
    pub fn new_success(text: impl Into<String>) -> Self {
        Self::new_with_behavior(MockBehavior::Success(text.into()))
    }

    /// Create a mock that always fails with the given error.
    pub fn new_error(error: ModelsErrorKind) -> Self {
        Self::new_with_behavior(MockBehavior::Error(error))
    }

    /// Create a mock that fails N times, then succeeds.
    pub fn new_fail_then_succeed(
        fail_count: usize,
        error: ModelsErrorKind,
        success_text: impl Into<String>,
    ) -> Self {
        Self::new_with_behavior(MockBehavior::FailThenSucceed {
            fail_count,
            error,
            success_text: success_text.into(),
        })
    }

    /// Create a mock with a sequence of responses.
    pub fn new_sequence(responses: Vec<MockResponse>) -> Self {
        Self::new_with_behavior(MockBehavior::Sequence(responses))
    }

    /// Create a mock with custom behavior.
    pub fn new_with_behavior(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            delay: None,
            call_count: Arc::new(AtomicUsize::new(0)),
            model_name: "mock-text".to_string(),
        }
    }

    /// Sleep before answering each completion.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of times `complete` was called.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    fn next_response(&self) -> ModelsResult<String> {
        let current = self.call_count.fetch_add(1, Ordering::SeqCst);

        match &self.behavior {
            MockBehavior::Success(text) => Ok(text.clone()),
            MockBehavior::Error(kind) => Err(ModelsError::new(kind.clone())),
            MockBehavior::FailThenSucceed {
                fail_count,
                error,
                success_text,
            } => {
                if current < *fail_count {
                    Err(ModelsError::new(error.clone()))
                } else {
                    Ok(success_text.clone())
                }
            }
            MockBehavior::Sequence(responses) => {
                match responses.get(current).or_else(|| responses.last()) {
                    Some(MockResponse::Success(text)) => Ok(text.clone()),
                    Some(MockResponse::Error(kind)) => Err(ModelsError::new(kind.clone())),
                    None => Err(ModelsError::new(ModelsErrorKind::EmptyResponse)),
                }
            }
        }
    }
}

#[async_trait]
impl TextModel for MockTextModel {
    async fn complete(&self, _request: &ChatRequest) -> ModelsResult<String> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.next_response()
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

/// Mock image model.
///
/// Prompts containing a configured marker fail with the configured error;
/// everything else yields a fixed PNG signature.
#[derive(Debug, Clone)]
pub struct MockImageModel {
    fail_marker: Option<(String, ModelsErrorKind)>,
    delay: Option<Duration>,
    fetch_delay: Option<Duration>,
    generate_count: Arc<AtomicUsize>,
    fetch_count: Arc<AtomicUsize>,
    model_name: String,
}

/// Bytes returned by [`MockImageModel::fetch_image`].
pub const MOCK_PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

impl Default for MockImageModel {
    fn default() -> Self {
        Self::new()
    }
}

impl MockImageModel {
    /// Create a mock that always succeeds.
    pub fn new() -> Self {
        Self {
            fail_marker: None,
            delay: None,
            fetch_delay: None,
            generate_count: Arc::new(AtomicUsize::new(0)),
            fetch_count: Arc::new(AtomicUsize::new(0)),
            model_name: "mock-image".to_string(),
        }
    }

    /// Fail generation for prompts containing `marker`.
    pub fn failing_on(mut self, marker: impl Into<String>, error: ModelsErrorKind) -> Self {
        self.fail_marker = Some((marker.into(), error));
        self
    }

    /// Sleep before answering each generation call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Sleep before answering each download.
    pub fn with_fetch_delay(mut self, delay: Duration) -> Self {
        self.fetch_delay = Some(delay);
        self
    }

    /// Number of generation calls.
    pub fn generate_count(&self) -> usize {
        self.generate_count.load(Ordering::SeqCst)
    }

    /// Number of downloads.
    pub fn fetch_count(&self) -> usize {
        self.fetch_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageModel for MockImageModel {
    async fn generate_image(&self, prompt: &str) -> ModelsResult<String> {
        let n = self.generate_count.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some((marker, error)) = &self.fail_marker
            && prompt.contains(marker.as_str())
        {
            return Err(ModelsError::new(error.clone()));
        }
        Ok(format!("https://images.invalid/mock/{n}.png"))
    }

    async fn fetch_image(&self, _url: &str) -> ModelsResult<Vec<u8>> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.fetch_delay {
            tokio::time::sleep(delay).await;
        }
        Ok(MOCK_PNG.to_vec())
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

/// Mock speech model returning a fixed byte payload.
#[derive(Debug, Clone)]
pub struct MockSpeechModel {
    fail_marker: Option<(String, ModelsErrorKind)>,
    stall_marker: Option<(String, Duration)>,
    call_count: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<(String, f32)>>>,
    model_name: String,
}

/// Bytes returned by [`MockSpeechModel::synthesize`].
pub const MOCK_MP3: &[u8] = &[b'I', b'D', b'3', 0x04, 0x00];

impl Default for MockSpeechModel {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSpeechModel {
    /// Create a mock that always succeeds.
    pub fn new() -> Self {
        Self {
            fail_marker: None,
            stall_marker: None,
            call_count: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
            model_name: "mock-tts".to_string(),
        }
    }

    /// Fail synthesis for inputs containing `marker`.
    pub fn failing_on(mut self, marker: impl Into<String>, error: ModelsErrorKind) -> Self {
        self.fail_marker = Some((marker.into(), error));
        self
    }

    /// Sleep for `delay` before answering inputs containing `marker`.
    pub fn stalling_on(mut self, marker: impl Into<String>, delay: Duration) -> Self {
        self.stall_marker = Some((marker.into(), delay));
        self
    }

    /// Number of synthesis calls.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Voice and speed of every request seen so far, in call order.
    pub fn requests(&self) -> Vec<(String, f32)> {
        self.requests
            .lock()
            .map(|seen| seen.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl SpeechModel for MockSpeechModel {
    async fn synthesize(&self, request: &SpeechRequest) -> ModelsResult<Vec<u8>> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut seen) = self.requests.lock() {
            seen.push((request.voice().clone(), *request.speed()));
        }
        if let Some((marker, delay)) = &self.stall_marker
            && request.input().contains(marker.as_str())
        {
            tokio::time::sleep(*delay).await;
        }
        if let Some((marker, error)) = &self.fail_marker
            && request.input().contains(marker.as_str())
        {
            return Err(ModelsError::new(error.clone()));
        }
        Ok(MOCK_MP3.to_vec())
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}
