//! Tunable thresholds and offsets for the page behaviors.
//!
//! Defaults reproduce the shipped site. A host page may boot with overrides
//! through `start_with_config`, passing a JSON object with camelCase keys.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::error::Result;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct SiteConfig {
    /// Header gains `scrolled` strictly above this offset.
    pub header_scroll_threshold: f64,
    /// Gap kept between the header's bottom edge and a smooth-scroll target.
    pub scroll_buffer: f64,
    /// Extra lead applied before a section counts as current.
    pub section_activation_offset: f64,
    /// Hero cutoff used when the page has no sections at all.
    pub hero_fallback_scroll: f64,
    pub reveal_threshold: f64,
    pub stagger_threshold: f64,
    pub stagger_step_seconds: f64,
    /// One factor per blob, in `.blob1`..`.blob3` order.
    pub parallax_factors: [f64; 3],
    pub storage_key: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            header_scroll_threshold: 30.0,
            scroll_buffer: 20.0,
            section_activation_offset: 60.0,
            hero_fallback_scroll: 50.0,
            reveal_threshold: 0.08,
            stagger_threshold: 0.05,
            stagger_step_seconds: 0.12,
            parallax_factors: [0.05, 0.03, 0.07],
            storage_key: "theme".to_owned(),
        }
    }
}

impl SiteConfig {
    /// Parse overrides; missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns `SiteError::Config` for malformed JSON or unknown keys.
    pub fn from_json(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(trimmed)?)
    }
}
