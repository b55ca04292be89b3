//! Ordered and unordered lists

use scraper::ElementRef;

use super::super::MarkdownRenderer;
use super::super::context::RenderContext;
use crate::page::dom::{child_elements, tag};
use crate::utils::collapse_paragraph_breaks;

/// Only direct `li` children are items; anything else between them is
/// ignored and does not advance the counter.
pub(super) fn list_handler(
    renderer: &MarkdownRenderer<'_>,
    el: ElementRef<'_>,
    ctx: RenderContext,
    ordered: bool,
) -> String {
    let item_ctx = ctx.nested_list();
    let indent = "  ".repeat(ctx.list_depth);

    let mut items = String::new();
    for (idx, item) in child_elements(&el).filter(|c| tag(c) == "li").enumerate() {
        let bullet = if ordered {
            format!("{}. ", idx + 1)
        } else {
            "- ".to_string()
        };
        let content = renderer.render_children(item, item_ctx);
        let content = collapse_paragraph_breaks(content.trim(), "\n");
        items.push_str(&format!("{indent}{bullet}{content}\n"));
    }

    format!("\n{items}\n")
}

#[cfg(test)]
mod tests {
    use crate::markdown_converter::test_support::render_html;

    #[test]
    fn ordered_list_counts_only_items() {
        let html = "<ol><li>one</li><li>two</li><div>stray</div><li>three</li></ol>";
        assert_eq!(render_html(html), "1. one\n2. two\n3. three");
    }

    #[test]
    fn nested_lists_indent_by_depth() {
        let html = "<ul><li>a<ul><li>b<ol><li>c</li></ol></li></ul></li><li>d</li></ul>";
        assert_eq!(render_html(html), "- a\n  - b\n    1. c\n- d");
    }

    #[test]
    fn depth_does_not_leak_to_siblings() {
        let html = "<ul><li>x<ul><li>y</li></ul></li></ul><ul><li>z</li></ul>";
        assert_eq!(render_html(html), "- x\n  - y\n\n\n- z");
    }

    #[test]
    fn paragraphs_inside_items_collapse() {
        let html = "<ul><li><p>first</p><p>second</p></li></ul>";
        assert_eq!(render_html(html), "- first\nsecond");
    }
}
