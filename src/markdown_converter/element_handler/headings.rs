//! Handler for heading elements (h1-h6)

use scraper::ElementRef;

use super::super::MarkdownRenderer;
use super::super::context::RenderContext;

pub(super) fn heading_handler(
    renderer: &MarkdownRenderer<'_>,
    el: ElementRef<'_>,
    ctx: RenderContext,
    level: usize,
) -> String {
    let content = renderer.render_children(el, ctx);
    format!("\n\n{} {}\n\n", "#".repeat(level), content.trim())
}
