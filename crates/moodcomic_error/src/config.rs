//! Configuration loading errors.

/// A layered configuration source could not be read or deserialized.
///
/// Raised while merging the bundled `moodcomic.toml`, user overrides and
/// `MOODCOMIC__*` environment variables. The message names the failing
/// layer or field.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", message, line, file)]
pub struct ConfigError {
    /// What failed, including the offending key when known
    pub message: String,
    /// Line that raised the error
    pub line: u32,
    /// File that raised the error
    pub file: &'static str,
}

impl ConfigError {
    /// Record a configuration failure at the caller's location.
    ///
    /// ```
    /// use moodcomic_error::ConfigError;
    ///
    /// let err = ConfigError::new("synthesis.image_timeout_secs: invalid type: string \"soon\"");
    /// assert!(err.message.starts_with("synthesis."));
    /// assert!(err.to_string().contains("Configuration Error"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let caller = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: caller.line(),
            file: caller.file(),
        }
    }
}
