//! Model provider errors.

use crate::RetryableError;

/// Model provider error conditions (text, image and speech endpoints).
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ModelsErrorKind {
    /// Transport-level failure (connection refused, DNS, TLS)
    #[display("HTTP request failed: {}", _0)]
    Http(String),

    /// Provider answered with a non-success status
    #[display("HTTP {} error: {}", status_code, message)]
    Api {
        /// HTTP status code
        status_code: u16,
        /// Response body or provider message
        message: String,
    },

    /// Response body did not match the expected shape
    #[display("Failed to parse response: {}", _0)]
    Parse(String),

    /// Provider returned no choices, no image, or an empty body
    #[display("Provider returned an empty response")]
    EmptyResponse,

    /// Call exceeded its hard deadline
    #[display("Request timed out after {}ms", _0)]
    Timeout(u64),

    /// No credentials configured for the provider
    #[display("Missing API key for {}", _0)]
    MissingApiKey(String),
}

impl ModelsErrorKind {
    /// True for the HTTP 429 rate-limit signal.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, ModelsErrorKind::Api { status_code: 429, .. })
    }

    /// True when the provider refused the prompt under its content rules.
    pub fn is_content_policy(&self) -> bool {
        match self {
            ModelsErrorKind::Api {
                status_code: 400,
                message,
            } => {
                let lower = message.to_lowercase();
                lower.contains("content_policy") || lower.contains("safety")
            }
            _ => false,
        }
    }
}

/// Model provider error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Models Error: {} at {}:{}", kind, file, line)]
pub struct ModelsError {
    /// The specific error kind
    pub kind: ModelsErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// Source file where error occurred
    pub file: &'static str,
}

impl ModelsError {
    /// Create a new models error.
    #[track_caller]
    pub fn new(kind: ModelsErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl RetryableError for ModelsError {
    fn is_retryable(&self) -> bool {
        self.kind.is_rate_limited()
    }
}

/// Result type for model operations.
pub type ModelsResult<T> = Result<T, ModelsError>;
