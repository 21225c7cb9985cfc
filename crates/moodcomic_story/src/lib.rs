//! Story generation for moodcomic.
//!
//! Turns a mood (and optional style tag) into exactly four validated
//! [`StoryPanel`](moodcomic_core::StoryPanel)s:
//!
//! 1. [`prompts`] builds a language-matched prompt with a style directive and
//!    a uniqueness nonce.
//! 2. The text model is called under the retry policy.
//! 3. [`repair`] cleans the raw completion into parseable JSON.
//! 4. [`validate`] checks panel count and required fields.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod generator;
pub mod prompts;
pub mod repair;
mod settings;
pub mod validate;

pub use generator::StoryGenerator;
pub use settings::StorySettings;
