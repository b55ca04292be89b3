//! Collapsible sections
//!
//! Markdown has no disclosure widget, so `<details>` is kept as HTML with
//! the summary as its visible label and the rest rendered as Markdown.

use scraper::{ElementRef, Node};

use super::super::MarkdownRenderer;
use super::super::context::RenderContext;
use crate::page::dom::squash_text;
use crate::static_selector;

static_selector!(SUMMARY_SELECTOR, "summary");

pub(super) fn details_handler(
    renderer: &MarkdownRenderer<'_>,
    el: ElementRef<'_>,
    ctx: RenderContext,
) -> String {
    let summary = el
        .select(&SUMMARY_SELECTOR)
        .next()
        .map(|s| squash_text(&s))
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "Details".to_string());

    let body: String = el
        .children()
        .filter(|child| !matches!(child.value(), Node::Element(e) if e.name() == "summary"))
        .map(|child| renderer.render_node(child, ctx))
        .collect();

    format!(
        "\n\n<details><summary>{summary}</summary>\n\n{}\n\n</details>\n\n",
        body.trim()
    )
}

#[cfg(test)]
mod tests {
    use crate::markdown_converter::test_support::render_html;

    #[test]
    fn summary_becomes_label() {
        let html = "<details><summary>More info</summary><p>Hidden <b>body</b></p></details>";
        assert_eq!(
            render_html(html),
            "<details><summary>More info</summary>\n\nHidden **body**\n\n</details>"
        );
    }

    #[test]
    fn default_label() {
        let html = "<details><p>Body</p></details>";
        assert_eq!(
            render_html(html),
            "<details><summary>Details</summary>\n\nBody\n\n</details>"
        );
    }

    #[test]
    fn stray_summary_is_dropped() {
        assert_eq!(render_html("<div><summary>Orphan</summary>text</div>"), "text");
    }
}
