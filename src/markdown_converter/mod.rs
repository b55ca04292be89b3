//! Markdown conversion for page content
//!
//! `MarkdownRenderer` maps a content tree to Markdown in a single recursive
//! walk. Each element kind owns its own blank-line padding; the only global
//! whitespace pass is the fragment-level newline collapse in
//! [`MarkdownRenderer::render`].
//!
//! # Example
//!
//! ```
//! use kodegen_tools_pagecopy::config::NoiseLexicon;
//! use kodegen_tools_pagecopy::markdown_converter::MarkdownRenderer;
//! use kodegen_tools_pagecopy::page::Page;
//!
//! let page = Page::parse("<body><h2>Setup</h2><p>Run <code>make</code>.</p></body>", None);
//! let lexicon = NoiseLexicon::default();
//! let markdown = MarkdownRenderer::new(page.url(), &lexicon).render(page.body());
//! assert_eq!(markdown, "## Setup\n\n\nRun `make`.");
//! ```

pub mod context;
mod dom_walker;
pub mod element_handler;

pub use context::RenderContext;

use scraper::ElementRef;
use url::Url;

use crate::config::NoiseLexicon;
use crate::utils::collapse_newline_runs;

/// Tree-to-Markdown renderer.
///
/// Holds only borrowed, read-only inputs; rendering is a pure function of
/// the tree and the context at call time.
#[derive(Debug, Clone, Copy)]
pub struct MarkdownRenderer<'a> {
    pub(crate) base_url: Option<&'a Url>,
    pub(crate) lexicon: &'a NoiseLexicon,
}

impl<'a> MarkdownRenderer<'a> {
    #[must_use]
    pub fn new(base_url: Option<&'a Url>, lexicon: &'a NoiseLexicon) -> Self {
        Self { base_url, lexicon }
    }

    /// Render a fragment rooted at `root` with a fresh context.
    ///
    /// Runs of four or more newlines collapse to three and the result is
    /// trimmed.
    #[must_use]
    pub fn render(&self, root: ElementRef<'_>) -> String {
        let raw = self.render_node(*root, RenderContext::default());
        collapse_newline_runs(&raw, "\n\n\n").trim().to_string()
    }

    /// Render `root` with an explicit starting context, without the
    /// fragment-level normalization.
    #[must_use]
    pub fn render_with(&self, root: ElementRef<'_>, ctx: RenderContext) -> String {
        self.render_node(*root, ctx)
    }
}
