//! Synthesis result caching with TTL support.
//!
//! Generated images and narration clips are expensive, so identical synthesis
//! inputs are served from an in-process cache for a bounded time.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod cache;

pub use cache::{CacheConfig, CacheConfigBuilder, CacheEntry, SynthesisCache};
