//! Paragraph-level blocks

use scraper::ElementRef;

use super::super::MarkdownRenderer;
use super::super::context::RenderContext;
use crate::utils::collapse_paragraph_breaks;

pub(super) fn paragraph_handler(
    renderer: &MarkdownRenderer<'_>,
    el: ElementRef<'_>,
    ctx: RenderContext,
) -> String {
    format!("\n\n{}\n\n", renderer.render_children(el, ctx))
}

/// Every line of the quoted content gets a `> ` prefix.
pub(super) fn blockquote_handler(
    renderer: &MarkdownRenderer<'_>,
    el: ElementRef<'_>,
    ctx: RenderContext,
) -> String {
    let inner = renderer.render_children(el, ctx);
    let quoted = collapse_paragraph_breaks(inner.trim(), "\n\n")
        .lines()
        .map(|line| format!("> {line}").trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n");
    format!("\n\n{quoted}\n\n")
}
