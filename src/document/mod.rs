//! Document assembly and the other output modes
//!
//! The assembler runs every section extractor against one page snapshot
//! and joins the non-empty sections in a fixed order:
//! metadata, navigation, content, media, embeds, code, transcript, forms.

mod clean_html;
mod plain_text;
mod selection;

pub use clean_html::clean_html;
pub use plain_text::plain_text;
pub use selection::extract_selection;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::config::ExtractionConfig;
use crate::content_locator::ContentLocator;
use crate::extractors::{
    EmbeddedFrame, FormBlock, breadcrumb_markdown, extract_breadcrumb, extract_code_blocks,
    extract_embeds, extract_forms, extract_media, extract_metadata, extract_nav_links,
    extract_transcript,
};
use crate::markdown_converter::MarkdownRenderer;
use crate::notebook::NotebookClient;
use crate::page::Page;
use crate::utils::{collapse_newline_runs, slugify_url};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BlockKind {
    Metadata,
    Navigation,
    Content,
    Media,
    Embeds,
    Code,
    Transcript,
    Forms,
}

/// One rendered section of the assembled document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentBlock {
    pub kind: BlockKind,
    pub markdown: String,
}

impl ContentBlock {
    fn new(kind: BlockKind, markdown: String) -> Self {
        Self { kind, markdown }
    }
}

/// `## Heading` followed by a body, or nothing when the body is empty
fn section(kind: BlockKind, heading: &str, body: String) -> Option<ContentBlock> {
    (!body.trim().is_empty())
        .then(|| ContentBlock::new(kind, format!("## {heading}\n\n{}\n", body.trim_end())))
}

/// Join blocks with a blank line, collapse newline runs to one blank line,
/// trim, and end with exactly one newline.
#[must_use]
pub fn finalize(blocks: &[ContentBlock]) -> String {
    let joined = blocks
        .iter()
        .map(|b| b.markdown.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    format!("{}\n", collapse_newline_runs(&joined, "\n\n").trim())
}

/// File name for a saved document: the page location slug, `.md`
#[must_use]
pub fn document_file_name(page: &Page) -> String {
    page.url()
        .map_or_else(|| "page.md".to_string(), |url| slugify_url(url, "md"))
}

/// Builds the full Markdown document for a page.
pub struct DocumentAssembler<'c> {
    config: &'c ExtractionConfig,
    captured_at: DateTime<Local>,
}

impl<'c> DocumentAssembler<'c> {
    #[must_use]
    pub fn new(config: &'c ExtractionConfig) -> Self {
        Self {
            config,
            captured_at: Local::now(),
        }
    }

    /// Fix the capture timestamp shown in the metadata header
    #[must_use]
    pub fn captured_at(mut self, at: DateTime<Local>) -> Self {
        self.captured_at = at;
        self
    }

    /// Every non-empty section in document order, with embeds left as
    /// plain links.
    #[must_use]
    pub fn blocks(&self, page: &Page) -> Vec<ContentBlock> {
        self.blocks_with_embeds(page, extract_embeds(page))
    }

    /// Assemble without any network access.
    #[must_use]
    pub fn assemble(&self, page: &Page) -> String {
        finalize(&self.blocks(page))
    }

    /// Assemble the full page. With a client, notebook iframes get their
    /// cells fetched; a failed fetch leaves the iframe as a link.
    pub async fn extract_full_page(&self, page: &Page, client: Option<&NotebookClient>) -> String {
        let mut embeds = extract_embeds(page);
        if let Some(client) = client {
            for frame in &mut embeds {
                frame.attach_notebook(client).await;
            }
        }
        finalize(&self.blocks_with_embeds(page, embeds))
    }

    fn blocks_with_embeds(&self, page: &Page, embeds: Vec<EmbeddedFrame>) -> Vec<ContentBlock> {
        let lexicon = self.config.lexicon();
        let mut blocks = vec![ContentBlock::new(
            BlockKind::Metadata,
            extract_metadata(page, self.captured_at).to_markdown(),
        )];

        let mut nav = Vec::new();
        let crumbs = extract_breadcrumb(page);
        if !crumbs.is_empty() {
            nav.push(format!("**Path:** {}\n", breadcrumb_markdown(&crumbs)));
        }
        let links = extract_nav_links(page);
        if !links.is_empty() {
            let list: Vec<String> = links.iter().map(|l| l.to_markdown()).collect();
            nav.push(format!("## Navigation\n\n{}\n", list.join("\n")));
        }
        if !nav.is_empty() {
            blocks.push(ContentBlock::new(BlockKind::Navigation, nav.join("\n")));
        }

        let root = ContentLocator::new(self.config.locator()).locate_or_body(page);
        let content = MarkdownRenderer::new(page.url(), lexicon).render(root);
        blocks.extend(section(BlockKind::Content, "Content", content));

        let media: Vec<String> = extract_media(page).iter().map(|m| m.to_markdown()).collect();
        blocks.extend(section(BlockKind::Media, "Media", media.join("\n")));

        let frames: Vec<String> = embeds.iter().map(EmbeddedFrame::to_markdown).collect();
        blocks.extend(section(BlockKind::Embeds, "Embedded Content", frames.join("\n")));

        let code: Vec<String> = extract_code_blocks(page)
            .iter()
            .enumerate()
            .map(|(i, block)| block.to_markdown(i + 1))
            .collect();
        blocks.extend(section(BlockKind::Code, "Code", code.join("\n")));

        if let Some(transcript) = extract_transcript(page, lexicon) {
            blocks.extend(section(BlockKind::Transcript, "Transcript", transcript.to_markdown()));
        }

        let forms: Vec<String> = extract_forms(page, lexicon)
            .iter()
            .map(FormBlock::to_markdown)
            .collect();
        blocks.extend(section(BlockKind::Forms, "Forms / Quizzes", forms.join("\n\n")));

        blocks
    }
}
