//! Handler for anchor elements

use scraper::ElementRef;

use super::super::MarkdownRenderer;
use super::super::context::RenderContext;
use crate::page::dom::attr;
use crate::utils::{is_placeholder_href, resolve_url};

/// `[text](absolute-href)`. Links without text vanish; links that point
/// nowhere keep their text.
pub(super) fn anchor_handler(
    renderer: &MarkdownRenderer<'_>,
    el: ElementRef<'_>,
    ctx: RenderContext,
) -> String {
    let text = renderer.render_children(el, ctx);
    let text = text.trim();
    if text.is_empty() {
        return String::new();
    }

    let href = attr(&el, "href").unwrap_or("").trim();
    if is_placeholder_href(href) {
        return text.to_string();
    }

    format!("[{text}]({})", resolve_url(renderer.base_url, href))
}
