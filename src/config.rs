//! Tuning constants for the page effects, loadable from TOML.
//!
//! Every field has a default matching the portfolio page's stylesheet, so an
//! empty file (or no file) gives the stock behavior.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::FxError;

/// Effect configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FxConfig {
    /// An element reveals once its top is this far above the viewport bottom.
    pub reveal_margin: i32,
    /// Sticky-nav height added to the scroll offset for active-link detection.
    pub nav_offset: i32,
    /// Per-index delay for staggered card reveals.
    pub stagger_ms: u64,
    /// Visible fraction at which the intersection observer reports a card.
    pub observer_threshold: f64,
    /// Scroll offset above which the scroll-to-top control shows.
    pub scroll_top_threshold: i32,
    /// How long the contact success banner stays up.
    pub success_hide_ms: u64,
    /// How long a ripple span lives before removal.
    pub ripple_lifetime_ms: u64,
    /// Delay before the hero title animates in.
    pub title_delay_ms: u64,
    /// Delay before the hero glass card animates in.
    pub glass_delay_ms: u64,
    /// Length of one animation frame.
    pub frame_ms: u64,
    /// Fill percentage for progress bars without `data-percent`.
    pub default_percent: String,
    /// File the resume button downloads.
    pub resume_file: String,
}

impl Default for FxConfig {
    fn default() -> Self {
        Self {
            reveal_margin: 60,
            nav_offset: 120,
            stagger_ms: 120,
            observer_threshold: 0.2,
            scroll_top_threshold: 300,
            success_hide_ms: 5000,
            ripple_lifetime_ms: 900,
            title_delay_ms: 120,
            glass_delay_ms: 300,
            frame_ms: 16,
            default_percent: "60".to_owned(),
            resume_file: "resume_harsh.pdf".to_owned(),
        }
    }
}

impl FxConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, FxError> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a TOML file.
    pub fn load_from_path(path: &Path) -> Result<Self, FxError> {
        let text = fs::read_to_string(path).map_err(|source| FxError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Set the stagger delay (builder).
    pub fn with_stagger_ms(mut self, stagger_ms: u64) -> Self {
        self.stagger_ms = stagger_ms;
        self
    }

    /// Set the reveal margin (builder).
    pub fn with_reveal_margin(mut self, margin: i32) -> Self {
        self.reveal_margin = margin;
        self
    }

    /// Set the scroll-to-top threshold (builder).
    pub fn with_scroll_top_threshold(mut self, threshold: i32) -> Self {
        self.scroll_top_threshold = threshold;
        self
    }

    /// Set the resume file name (builder).
    pub fn with_resume_file(mut self, file: impl Into<String>) -> Self {
        self.resume_file = file.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults() {
        let config = FxConfig::new();
        assert_eq!(config.reveal_margin, 60);
        assert_eq!(config.nav_offset, 120);
        assert_eq!(config.stagger_ms, 120);
        assert_eq!(config.scroll_top_threshold, 300);
        assert_eq!(config.resume_file, "resume_harsh.pdf");
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(FxConfig::from_toml_str("").unwrap(), FxConfig::default());
    }

    #[test]
    fn partial_toml_overrides() {
        let config = FxConfig::from_toml_str("stagger_ms = 50\nresume_file = \"cv.pdf\"\n").unwrap();
        assert_eq!(config.stagger_ms, 50);
        assert_eq!(config.resume_file, "cv.pdf");
        assert_eq!(config.reveal_margin, 60);
    }

    #[test]
    fn invalid_toml_is_parse_error() {
        let err = FxConfig::from_toml_str("stagger_ms = \"soon\"").unwrap_err();
        assert!(matches!(err, FxError::ConfigParse(_)));
    }

    #[test]
    fn missing_file_is_read_error() {
        let path = std::env::temp_dir().join("folio-fx-does-not-exist.toml");
        let err = FxConfig::load_from_path(&path).unwrap_err();
        assert!(matches!(err, FxError::ConfigRead { .. }));
    }

    #[test]
    fn builder() {
        let config = FxConfig::new()
            .with_stagger_ms(200)
            .with_reveal_margin(0)
            .with_scroll_top_threshold(10)
            .with_resume_file("me.pdf");
        assert_eq!(config.stagger_ms, 200);
        assert_eq!(config.reveal_margin, 0);
        assert_eq!(config.scroll_top_threshold, 10);
        assert_eq!(config.resume_file, "me.pdf");
    }
}
