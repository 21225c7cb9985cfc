//! Story generation errors.

use crate::{ModelsError, ModelsErrorKind, RetryableError};

/// Story generation error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum StoryErrorKind {
    /// The text model call itself failed
    #[display("Text model failed: {}", _0)]
    Model(ModelsErrorKind),

    /// Response could not be parsed even after repair
    #[display("Malformed story response: {}", _0)]
    Malformed(String),

    /// Model returned the wrong number of panels
    #[display("Invalid panel count: expected {}, got {}", expected, actual)]
    PanelCount {
        /// Required panel count
        expected: usize,
        /// Panel count in the response
        actual: usize,
    },

    /// A required panel field is missing or empty
    #[display("Panel {} is incomplete: missing {}", panel, field)]
    IncompletePanel {
        /// One-based panel number
        panel: usize,
        /// Name of the offending field
        field: &'static str,
    },

    /// Narration is below the minimum length
    #[display("Panel {} narration is too short ({} chars), likely truncated", panel, length)]
    TruncatedNarration {
        /// One-based panel number
        panel: usize,
        /// Character count of the narration
        length: usize,
    },

    /// Model returned no content at all
    #[display("Text model returned an empty response")]
    EmptyResponse,
}

/// Story generation error with location tracking.
///
/// # Examples
///
/// ```
/// use moodcomic_error::{StoryError, StoryErrorKind};
///
/// let err = StoryError::new(StoryErrorKind::PanelCount { expected: 4, actual: 3 });
/// assert!(format!("{}", err).contains("expected 4, got 3"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Story Error: {} at line {} in {}", kind, line, file)]
pub struct StoryError {
    /// The kind of error that occurred
    pub kind: StoryErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StoryError {
    /// Create a new StoryError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StoryErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// True when the failure came from the text model rather than its output.
    pub fn is_model_failure(&self) -> bool {
        matches!(self.kind, StoryErrorKind::Model(_))
    }
}

impl From<ModelsError> for StoryError {
    #[track_caller]
    fn from(err: ModelsError) -> Self {
        Self::new(StoryErrorKind::Model(err.kind))
    }
}

impl RetryableError for StoryError {
    fn is_retryable(&self) -> bool {
        matches!(&self.kind, StoryErrorKind::Model(kind) if kind.is_rate_limited())
    }
}

/// Result type for story generation.
pub type StoryResult<T> = Result<T, StoryError>;
