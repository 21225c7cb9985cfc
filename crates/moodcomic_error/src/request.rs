//! Caller-facing request errors.

use crate::{ModelsErrorKind, StoryError, StoryErrorKind};

/// Error categories surfaced to the caller of a generation request.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum RequestErrorKind {
    /// Mood missing or blank
    #[display("Validation failed: {}", _0)]
    Validation(String),

    /// Request body is not a valid generation request
    #[display("Invalid request body: {}", _0)]
    InvalidBody(String),

    /// Upstream model refused the prompt under its content rules
    #[display("Content policy rejection: {}", _0)]
    ContentPolicy(String),

    /// Story response could not be parsed or validated
    #[display("Story generation failed: {}", _0)]
    StoryGeneration(String),

    /// Provider outage, exhausted rate-limit retries, or request timeout
    #[display("Upstream unavailable: {}", _0)]
    UpstreamUnavailable(String),

    /// Anything else
    #[display("Unclassified error: {}", _0)]
    Unclassified(String),
}

impl RequestErrorKind {
    /// HTTP status code for this category.
    pub fn status_code(&self) -> u16 {
        match self {
            RequestErrorKind::Validation(_)
            | RequestErrorKind::InvalidBody(_)
            | RequestErrorKind::ContentPolicy(_)
            | RequestErrorKind::StoryGeneration(_) => 400,
            RequestErrorKind::UpstreamUnavailable(_) => 503,
            RequestErrorKind::Unclassified(_) => 500,
        }
    }

    /// Human-readable message safe to show to end users.
    ///
    /// Internal detail stays in the kind's payload and the server log.
    pub fn user_message(&self) -> &'static str {
        match self {
            RequestErrorKind::Validation(_) => "Mood is required",
            RequestErrorKind::InvalidBody(_) => "Invalid request body",
            RequestErrorKind::ContentPolicy(_) => {
                "This topic was declined by the content filter. Please rephrase it and try again."
            }
            RequestErrorKind::StoryGeneration(_) => {
                "We could not build a story from this topic. Please try a different topic."
            }
            RequestErrorKind::UpstreamUnavailable(_) => {
                "The service is temporarily unavailable. Please try again shortly."
            }
            RequestErrorKind::Unclassified(_) => "Internal server error",
        }
    }
}

/// Request error with location tracking.
///
/// # Examples
///
/// ```
/// use moodcomic_error::{RequestError, RequestErrorKind};
///
/// let err = RequestError::new(RequestErrorKind::Validation("mood is empty".into()));
/// assert_eq!(err.status_code(), 400);
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Request Error: {} at line {} in {}", kind, line, file)]
pub struct RequestError {
    /// The error kind
    pub kind: RequestErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// File where error occurred
    pub file: &'static str,
}

impl RequestError {
    /// Create a new RequestError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: RequestErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    /// Message safe to return to the caller.
    pub fn user_message(&self) -> &'static str {
        self.kind.user_message()
    }
}

impl From<StoryError> for RequestError {
    #[track_caller]
    fn from(err: StoryError) -> Self {
        let detail = err.kind.to_string();
        let kind = match &err.kind {
            StoryErrorKind::Model(model) if model.is_content_policy() => {
                RequestErrorKind::ContentPolicy(detail)
            }
            StoryErrorKind::Model(ModelsErrorKind::MissingApiKey(_)) => {
                RequestErrorKind::Unclassified(detail)
            }
            StoryErrorKind::Model(_) => RequestErrorKind::UpstreamUnavailable(detail),
            StoryErrorKind::Malformed(_)
            | StoryErrorKind::PanelCount { .. }
            | StoryErrorKind::IncompletePanel { .. }
            | StoryErrorKind::TruncatedNarration { .. }
            | StoryErrorKind::EmptyResponse => RequestErrorKind::StoryGeneration(detail),
        };
        Self::new(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn story_model_error(status_code: u16, message: &str) -> StoryError {
        StoryError::new(StoryErrorKind::Model(ModelsErrorKind::Api {
            status_code,
            message: message.to_string(),
        }))
    }

    #[test]
    fn test_story_errors_map_to_taxonomy() {
        let malformed = RequestError::from(StoryError::new(StoryErrorKind::Malformed(
            "expected value".into(),
        )));
        assert!(matches!(malformed.kind, RequestErrorKind::StoryGeneration(_)));
        assert_eq!(malformed.status_code(), 400);

        let refused = RequestError::from(story_model_error(400, "content_policy_violation"));
        assert!(matches!(refused.kind, RequestErrorKind::ContentPolicy(_)));
        assert_eq!(refused.status_code(), 400);

        let outage = RequestError::from(story_model_error(502, "bad gateway"));
        assert!(matches!(outage.kind, RequestErrorKind::UpstreamUnavailable(_)));
        assert_eq!(outage.status_code(), 503);

        let exhausted = RequestError::from(story_model_error(429, "rate limited"));
        assert_eq!(exhausted.status_code(), 503);
    }

    #[test]
    fn test_invalid_body_has_its_own_message() {
        let err = RequestError::new(RequestErrorKind::InvalidBody("expected value".into()));
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.user_message(), "Invalid request body");
        assert_ne!(
            err.user_message(),
            RequestErrorKind::Validation(String::new()).user_message()
        );
    }

    #[test]
    fn test_missing_key_is_unclassified() {
        let err = RequestError::from(StoryError::new(StoryErrorKind::Model(
            ModelsErrorKind::MissingApiKey("openai".into()),
        )));
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.user_message(), "Internal server error");
    }
}
