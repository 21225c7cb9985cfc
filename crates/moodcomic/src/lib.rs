//! Mood-to-comic generation.
//!
//! A request names a mood; the pipeline writes a four-panel story with a
//! text model, then illustrates and optionally narrates every panel in
//! parallel. Media failures degrade a single panel and never fail the
//! request.
//!
//! # Example
//!
//! ```rust,ignore
//! use moodcomic::{AppConfig, ComicPipeline};
//! use moodcomic_core::GenerationRequest;
//!
//! let config = AppConfig::load(None)?;
//! let pipeline = ComicPipeline::from_config(&config)?;
//! let comic = pipeline
//!     .handle(GenerationRequest::new("地鐵奇遇").with_style("healing".to_string()))
//!     .await?;
//! assert_eq!(comic.panels.len(), 4);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod api;
mod cli;
mod config;
mod observability;
mod pipeline;

pub use api::{AppState, create_router, serve};
pub use cli::{Cli, Commands};
pub use config::{AppConfig, ServerSettings};
pub use observability::init_tracing;
pub use pipeline::ComicPipeline;
