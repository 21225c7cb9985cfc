//! Top-level error wrapper types.

use crate::{ConfigError, ModelsError, RequestError, ServerError, StoryError, SynthesisError};

/// Every error the workspace can produce, by concern.
///
/// # Examples
///
/// ```
/// use moodcomic_error::{ConfigError, MoodcomicError};
///
/// let err: MoodcomicError = ConfigError::new("missing provider.base_url").into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum MoodcomicErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Model provider error
    #[from(ModelsError)]
    Models(ModelsError),
    /// Story generation error
    #[from(StoryError)]
    Story(StoryError),
    /// Panel synthesis error
    #[from(SynthesisError)]
    Synthesis(SynthesisError),
    /// Request-level error
    #[from(RequestError)]
    Request(RequestError),
    /// HTTP server error
    #[from(ServerError)]
    Server(ServerError),
}

/// Moodcomic error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Moodcomic Error: {}", _0)]
pub struct MoodcomicError(Box<MoodcomicErrorKind>);

impl MoodcomicError {
    /// Create a new error from a kind.
    pub fn new(kind: MoodcomicErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &MoodcomicErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to MoodcomicErrorKind
impl<T> From<T> for MoodcomicError
where
    T: Into<MoodcomicErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for moodcomic operations.
pub type MoodcomicResult<T> = std::result::Result<T, MoodcomicError>;
