//! Core configuration types for page extraction
//!
//! The heuristics here are best-effort by nature: new sites bring new
//! chrome buttons, new automation ids and new math renderers. Every list is
//! plain data so it can be extended from a JSON config without touching the
//! extractors.

use scraper::Selector;
use serde::{Deserialize, Serialize};

use crate::utils::{
    DEFAULT_FILE_DELAY_MS, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SETTLE_DELAY_MS,
    LANDMARK_OVERRIDE_MIN_LEN, LANDMARK_OVERRIDE_RATIO, MIN_CANDIDATE_TEXT_LEN,
};

/// Main content locator selectors, most specific first
pub const DEFAULT_LOCATOR_SELECTORS: &[&str] = &[
    r#"[data-automation-id="applyFlowPage"]"#,
    r#"[data-automation-id="jobPostingPage"]"#,
    r#"article[class*="content"]"#,
    r#"article[class*="post"]"#,
    r#"article[class*="article"]"#,
    "main article",
    "article",
    r#"[role="article"]"#,
    "main",
    r#"[role="main"]"#,
    "#content",
    "#main-content",
    "#article",
    "#post-content",
    ".post-content",
    ".article-content",
    ".entry-content",
    ".content-area",
    ".markdown-body",
    ".prose",
    ".rich-text",
    r#"[class*="lesson-content"]"#,
    r#"[class*="page-content"]"#,
    r#"[itemprop="articleBody"]"#,
];

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

/// Settings for the main content locator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocatorConfig {
    pub(crate) selectors: Vec<String>,
    pub(crate) min_text_len: usize,
    pub(crate) landmark_ratio: f64,
    pub(crate) landmark_min_len: usize,

    /// Parsed `selectors`, filled in by the builder
    #[serde(skip)]
    pub(crate) compiled: Vec<Selector>,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            selectors: strings(DEFAULT_LOCATOR_SELECTORS),
            min_text_len: MIN_CANDIDATE_TEXT_LEN,
            landmark_ratio: LANDMARK_OVERRIDE_RATIO,
            landmark_min_len: LANDMARK_OVERRIDE_MIN_LEN,
            compiled: Vec::new(),
        }
    }
}

/// UI-noise vocabulary used by the renderer and the extractors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseLexicon {
    /// Button labels starting with one of these are page chrome
    pub button_noise_prefixes: Vec<String>,
    /// `data-automation-id` prefixes of chrome regions to drop entirely
    pub suppressed_automation_prefixes: Vec<String>,
    /// `data-automation-id` prefix of form-field containers
    pub field_container_prefix: String,
    /// Transcript text fragments starting with these are picker/button noise
    pub transcript_boilerplate_prefixes: Vec<String>,
    /// Classes marking a math-library container holding TeX
    pub math_container_classes: Vec<String>,
    /// Classes marking display (block) math
    pub math_display_classes: Vec<String>,
    /// Classes of duplicate renderings emitted by math libraries
    pub math_artifact_classes: Vec<String>,
}

impl Default for NoiseLexicon {
    fn default() -> Self {
        Self {
            button_noise_prefixes: strings(&[
                "Jump to ", "Show ", "Hide ", "Close ", "Toggle ", "Skip", "×", "✕", "Save",
                "Enter ", "Exit ", "Restore",
            ]),
            suppressed_automation_prefixes: strings(&[
                "progressBar",
                "file-upload-drop-zone",
                "legalNotice",
                "footerContainer",
                "utilityButtonBar",
            ]),
            field_container_prefix: "formField-".to_string(),
            transcript_boilerplate_prefixes: strings(&[
                "Jump to ",
                "Select transcript",
                "Close transcript",
                "English",
                "Português",
                "Español",
            ]),
            math_container_classes: strings(&[
                "katex",
                "katex-display",
                "MathJax",
                "MathJax_Display",
                "math",
                "math-inline",
                "math-display",
            ]),
            math_display_classes: strings(&[
                "katex-display",
                "MathJax_Display",
                "math-display",
                "display",
            ]),
            math_artifact_classes: strings(&[
                "katex-html",
                "katex-mathml",
                "MathJax_Preview",
                "MJXp-display",
            ]),
        }
    }
}

impl NoiseLexicon {
    #[must_use]
    pub fn is_noise_button(&self, label: &str) -> bool {
        self.button_noise_prefixes
            .iter()
            .any(|prefix| label.starts_with(prefix.as_str()))
    }

    #[must_use]
    pub fn is_suppressed_automation_id(&self, id: &str) -> bool {
        self.suppressed_automation_prefixes
            .iter()
            .any(|prefix| id.starts_with(prefix.as_str()))
    }

    #[must_use]
    pub fn is_field_container(&self, id: &str) -> bool {
        !self.field_container_prefix.is_empty() && id.starts_with(&self.field_container_prefix)
    }

    #[must_use]
    pub fn is_transcript_boilerplate(&self, text: &str) -> bool {
        self.transcript_boilerplate_prefixes
            .iter()
            .any(|prefix| text.starts_with(prefix.as_str()))
    }
}

/// Main configuration struct for extraction actions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    pub(crate) locator: LocatorConfig,
    pub(crate) lexicon: NoiseLexicon,

    /// Wait after the expansion operation before rendering
    pub(crate) settle_delay_ms: u64,

    /// Fixed gap between sequential notebook file downloads
    pub(crate) file_delay_ms: u64,

    /// Per-request timeout for the notebook contents API
    pub(crate) request_timeout_secs: u64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            locator: LocatorConfig::default(),
            lexicon: NoiseLexicon::default(),
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
            file_delay_ms: DEFAULT_FILE_DELAY_MS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl ExtractionConfig {
    #[must_use]
    pub fn locator(&self) -> &LocatorConfig {
        &self.locator
    }

    #[must_use]
    pub fn lexicon(&self) -> &NoiseLexicon {
        &self.lexicon
    }

    #[must_use]
    pub fn settle_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.settle_delay_ms)
    }

    #[must_use]
    pub fn file_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.file_delay_ms)
    }

    #[must_use]
    pub fn request_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.request_timeout_secs)
    }
}
