//! Panel media synthesis.
//!
//! [`PanelSynthesizer`] turns a [`StoryPanel`](moodcomic_core::StoryPanel)
//! into an [`EnrichedPanel`](moodcomic_core::EnrichedPanel) by generating an
//! image and, optionally, narration and sound-effect audio. Every payload is
//! cached by a fingerprint of its exact input. Failures degrade the panel
//! instead of failing the request.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod payload;
mod settings;
mod synthesizer;
mod voice;

pub use payload::{AUDIO_MIME, IMAGE_MIME, data_url};
pub use settings::SynthesisSettings;
pub use synthesizer::{EnrichOptions, PanelOutcome, PanelSynthesizer, Synthesized, narration_text};
pub use voice::{narration_voice, sfx_voice};
