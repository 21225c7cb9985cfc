//! Cost estimation for a generated comic.

use crate::PANEL_COUNT;
use serde::{Deserialize, Serialize};

/// Flat cost model: a fixed base plus one charge per image not served from cache.
///
/// # Examples
///
/// ```
/// use moodcomic_core::CostModel;
///
/// let cost = CostModel::default();
/// assert_eq!(*cost.base_usd(), 0.15);
/// assert_eq!(cost.estimate(4), 0.15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(deny_unknown_fields)]
pub struct CostModel {
    /// Per-request base cost in USD (story generation and overhead).
    #[serde(default = "default_base_usd")]
    base_usd: f64,

    /// Cost of one generated image in USD.
    #[serde(default = "default_per_image_usd")]
    per_image_usd: f64,
}

fn default_base_usd() -> f64 {
    0.15
}

fn default_per_image_usd() -> f64 {
    0.04
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            base_usd: default_base_usd(),
            per_image_usd: default_per_image_usd(),
        }
    }
}

impl CostModel {
    /// Create a cost model with explicit prices.
    pub fn new(base_usd: f64, per_image_usd: f64) -> Self {
        Self {
            base_usd,
            per_image_usd,
        }
    }

    /// Estimate the cost of a comic given how many images were cache hits.
    ///
    /// Hits beyond the panel count are clamped.
    pub fn estimate(&self, cached_hits: u32) -> f64 {
        let panels = PANEL_COUNT as u32;
        let billed = panels - cached_hits.min(panels);
        self.base_usd + f64::from(billed) * self.per_image_usd
    }
}
