//! Core data types for moodcomic.
//!
//! This crate holds the request/response contract of the generation pipeline
//! and the small closed vocabularies (styles, voices) shared by the story and
//! panel crates. It performs no I/O.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod budget;
mod panel;
mod request;
mod response;
mod style;
mod voice;

pub use budget::CostModel;
pub use panel::{EnrichedPanel, StoryPanel};
pub use request::GenerationRequest;
pub use response::{GenerationMeta, GenerationResponse};
pub use style::Style;
pub use voice::{VoiceBucket, VoiceGender, VoiceStyle};

/// Number of panels in every comic.
pub const PANEL_COUNT: usize = 4;
