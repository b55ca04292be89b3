//! Definition lists

use scraper::ElementRef;

use super::super::MarkdownRenderer;
use super::super::context::RenderContext;

pub(super) fn dl_handler(
    renderer: &MarkdownRenderer<'_>,
    el: ElementRef<'_>,
    ctx: RenderContext,
) -> String {
    format!("\n{}\n", renderer.render_children(el, ctx))
}

pub(super) fn dt_handler(
    renderer: &MarkdownRenderer<'_>,
    el: ElementRef<'_>,
    ctx: RenderContext,
) -> String {
    format!("\n**{}**\n", renderer.render_children(el, ctx).trim())
}

pub(super) fn dd_handler(
    renderer: &MarkdownRenderer<'_>,
    el: ElementRef<'_>,
    ctx: RenderContext,
) -> String {
    format!(": {}\n", renderer.render_children(el, ctx).trim())
}

#[cfg(test)]
mod tests {
    use crate::markdown_converter::test_support::render_html;

    #[test]
    fn terms_and_definitions() {
        let html = "<dl><dt>Term</dt><dd>Meaning</dd><dt>Other</dt><dd>More</dd></dl>";
        assert_eq!(render_html(html), "**Term**\n: Meaning\n\n**Other**\n: More");
    }
}
