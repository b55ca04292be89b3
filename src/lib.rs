pub mod actions;
pub mod config;
pub mod content_locator;
pub mod document;
pub mod errors;
pub mod expand;
pub mod extractors;
pub mod markdown_converter;
pub mod notebook;
pub mod page;
pub mod utils;

pub use actions::{Action, ActionInput, ActionOutcome, ActionRunner};
pub use config::{ExtractionConfig, ExtractionConfigBuilder, LocatorConfig, NoiseLexicon};
pub use content_locator::ContentLocator;
pub use document::{BlockKind, ContentBlock, DocumentAssembler};
pub use errors::{PageCopyError, PageCopyResult};
pub use expand::{ExpandedMarkup, expand_collapsed};
pub use extractors::{CodeBlock, FormBlock, FormField, TranscriptResult, TranscriptSegment};
pub use markdown_converter::MarkdownRenderer;
pub use notebook::{NotebookClient, NotebookLocation};
pub use page::Page;

/// Convert a page to the full Markdown document without network access.
#[must_use]
pub fn page_to_markdown(html: &str, url: Option<url::Url>, config: &ExtractionConfig) -> String {
    let page = Page::parse(html, url);
    DocumentAssembler::new(config).assemble(&page)
}
