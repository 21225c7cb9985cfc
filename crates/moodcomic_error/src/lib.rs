//! Error types for the moodcomic pipeline.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! [`RequestError`] is the caller-facing taxonomy: every failure that reaches
//! the HTTP surface is collapsed into one of its kinds, each with a fixed
//! status code and user message.
//!
//! # Examples
//!
//! ```
//! use moodcomic_error::{ModelsError, ModelsErrorKind, RetryableError};
//!
//! let err = ModelsError::new(ModelsErrorKind::Api {
//!     status_code: 429,
//!     message: "Rate limit reached".to_string(),
//! });
//! assert!(err.is_retryable());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod models;
mod request;
mod retry;
mod server;
mod story;
mod synthesis;

pub use config::ConfigError;
pub use error::{MoodcomicError, MoodcomicErrorKind, MoodcomicResult};
pub use models::{ModelsError, ModelsErrorKind, ModelsResult};
pub use request::{RequestError, RequestErrorKind};
pub use retry::RetryableError;
pub use server::{ServerError, ServerErrorKind};
pub use story::{StoryError, StoryErrorKind, StoryResult};
pub use synthesis::{SynthesisError, SynthesisErrorKind, SynthesisResult};
