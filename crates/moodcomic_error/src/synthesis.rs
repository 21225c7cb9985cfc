//! Panel synthesis errors.
//!
//! These never reach the caller; the orchestrator logs them and degrades the
//! affected panel.

use crate::{ModelsError, ModelsErrorKind, RetryableError};

/// Panel synthesis error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum SynthesisErrorKind {
    /// Image or speech model call failed
    #[display("Model call failed: {}", _0)]
    Model(ModelsErrorKind),

    /// Model answered but the payload had no bytes
    #[display("Synthesized {} payload was empty", _0)]
    EmptyPayload(&'static str),

    /// Audio was requested but no speech model is configured
    #[display("No speech model configured")]
    SpeechUnavailable,
}

/// Synthesis error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Synthesis Error: {} at line {} in {}", kind, line, file)]
pub struct SynthesisError {
    /// The error kind
    pub kind: SynthesisErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// File where error occurred
    pub file: &'static str,
}

impl SynthesisError {
    /// Create a new SynthesisError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: SynthesisErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

impl From<ModelsError> for SynthesisError {
    #[track_caller]
    fn from(err: ModelsError) -> Self {
        Self::new(SynthesisErrorKind::Model(err.kind))
    }
}

impl RetryableError for SynthesisError {
    fn is_retryable(&self) -> bool {
        matches!(&self.kind, SynthesisErrorKind::Model(kind) if kind.is_rate_limited())
    }
}

/// Result type for synthesis operations.
pub type SynthesisResult<T> = Result<T, SynthesisError>;
