//! Builder for `ExtractionConfig`
//!
//! Every path that produces a config (defaults, JSON, programmatic) ends in
//! `build()`, which validates values and compiles locator selectors once.

use scraper::Selector;

use super::types::{ExtractionConfig, NoiseLexicon};
use crate::errors::{PageCopyError, PageCopyResult};

#[derive(Debug, Clone, Default)]
pub struct ExtractionConfigBuilder {
    config: ExtractionConfig,
}

impl ExtractionConfigBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing (for example deserialized) config
    #[must_use]
    pub fn from_config(config: ExtractionConfig) -> Self {
        Self { config }
    }

    /// Replace the locator selector list
    #[must_use]
    pub fn locator_selectors<I, S>(mut self, selectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.locator.selectors = selectors.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn min_candidate_text_len(mut self, len: usize) -> Self {
        self.config.locator.min_text_len = len;
        self
    }

    #[must_use]
    pub fn landmark_override(mut self, ratio: f64, min_len: usize) -> Self {
        self.config.locator.landmark_ratio = ratio;
        self.config.locator.landmark_min_len = min_len;
        self
    }

    #[must_use]
    pub fn lexicon(mut self, lexicon: NoiseLexicon) -> Self {
        self.config.lexicon = lexicon;
        self
    }

    /// Add chrome button prefixes on top of the defaults
    #[must_use]
    pub fn extra_button_noise<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config
            .lexicon
            .button_noise_prefixes
            .extend(prefixes.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn settle_delay_ms(mut self, ms: u64) -> Self {
        self.config.settle_delay_ms = ms;
        self
    }

    #[must_use]
    pub fn file_delay_ms(mut self, ms: u64) -> Self {
        self.config.file_delay_ms = ms;
        self
    }

    #[must_use]
    pub fn request_timeout_secs(mut self, secs: u64) -> Self {
        self.config.request_timeout_secs = secs;
        self
    }

    /// Validate and compile.
    ///
    /// # Errors
    ///
    /// Returns `PageCopyError::Config` for an unparsable locator selector,
    /// an empty selector list, a landmark ratio below 1.0, or a zero timeout.
    pub fn build(mut self) -> PageCopyResult<ExtractionConfig> {
        let locator = &mut self.config.locator;
        if locator.selectors.is_empty() {
            return Err(PageCopyError::Config(
                "locator selector list must not be empty".to_string(),
            ));
        }
        if locator.landmark_ratio.is_nan() || locator.landmark_ratio < 1.0 {
            return Err(PageCopyError::Config(format!(
                "landmark ratio must be >= 1.0, got {}",
                locator.landmark_ratio
            )));
        }
        if self.config.request_timeout_secs == 0 {
            return Err(PageCopyError::Config(
                "request timeout must be at least one second".to_string(),
            ));
        }

        locator.compiled = locator
            .selectors
            .iter()
            .map(|css| {
                Selector::parse(css)
                    .map_err(|e| PageCopyError::Config(format!("invalid selector '{css}': {e}")))
            })
            .collect::<PageCopyResult<Vec<_>>>()?;

        Ok(self.config)
    }
}

impl ExtractionConfig {
    #[must_use]
    pub fn builder() -> ExtractionConfigBuilder {
        ExtractionConfigBuilder::new()
    }

    /// Default configuration, compiled
    ///
    /// # Errors
    ///
    /// Only fails if the built-in selector list is broken.
    pub fn standard() -> PageCopyResult<Self> {
        ExtractionConfigBuilder::new().build()
    }

    /// Load a JSON config. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns a JSON error for malformed input and a config error for
    /// invalid values.
    pub fn from_json(json: &str) -> PageCopyResult<Self> {
        let config: ExtractionConfig = serde_json::from_str(json)?;
        ExtractionConfigBuilder::from_config(config).build()
    }
}
