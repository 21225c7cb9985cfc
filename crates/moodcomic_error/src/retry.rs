//! Retry classification.

/// Trait for errors that support retry logic.
///
/// The retry wrapper only inspects this flag; it has no knowledge of what
/// the failed operation was.
///
/// # Examples
///
/// ```
/// use moodcomic_error::{ModelsError, ModelsErrorKind, RetryableError};
///
/// let err = ModelsError::new(ModelsErrorKind::Api {
///     status_code: 401,
///     message: "bad key".to_string(),
/// });
/// assert!(!err.is_retryable());
/// ```
pub trait RetryableError {
    /// Returns true if this error should trigger a backoff and another attempt.
    ///
    /// Only rate-limit signals (HTTP 429) qualify. Timeouts, server errors and
    /// client errors are returned to the caller immediately.
    fn is_retryable(&self) -> bool;
}
