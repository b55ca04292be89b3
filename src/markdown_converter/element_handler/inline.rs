//! Inline formatting wrappers

use scraper::ElementRef;

use super::super::MarkdownRenderer;
use super::super::context::RenderContext;
use crate::page::dom::attr;

/// Inline tags that wrap their content in a fixed open/close pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineWrapper {
    Strong,
    Emphasis,
    Underline,
    Strike,
    Highlight,
    Superscript,
    Subscript,
    Keyboard,
}

impl InlineWrapper {
    /// Markdown has no underline, superscript, subscript or key syntax;
    /// those fall back to inline HTML.
    fn delimiters(self) -> (&'static str, &'static str) {
        match self {
            Self::Strong => ("**", "**"),
            Self::Emphasis => ("*", "*"),
            Self::Underline => ("<u>", "</u>"),
            Self::Strike => ("~~", "~~"),
            Self::Highlight => ("==", "=="),
            Self::Superscript => ("<sup>", "</sup>"),
            Self::Subscript => ("<sub>", "</sub>"),
            Self::Keyboard => ("<kbd>", "</kbd>"),
        }
    }
}

pub(super) fn inline_handler(
    renderer: &MarkdownRenderer<'_>,
    el: ElementRef<'_>,
    ctx: RenderContext,
    wrapper: InlineWrapper,
) -> String {
    let (open, close) = wrapper.delimiters();
    format!("{open}{}{close}", renderer.render_children(el, ctx))
}

pub(super) fn abbr_handler(
    renderer: &MarkdownRenderer<'_>,
    el: ElementRef<'_>,
    ctx: RenderContext,
) -> String {
    let title = html_escape::encode_double_quoted_attribute(attr(&el, "title").unwrap_or(""));
    format!(
        "<abbr title=\"{title}\">{}</abbr>",
        renderer.render_children(el, ctx)
    )
}

#[cfg(test)]
mod tests {
    use crate::markdown_converter::test_support::render_html;

    #[test]
    fn wrappers() {
        assert_eq!(
            render_html("<p><b>bold</b> <i>it</i> <del>gone</del> <mark>hi</mark></p>"),
            "**bold** *it* ~~gone~~ ==hi=="
        );
        assert_eq!(
            render_html("<p>H<sub>2</sub>O x<sup>2</sup> <kbd>Ctrl</kbd> <u>u</u></p>"),
            "H<sub>2</sub>O x<sup>2</sup> <kbd>Ctrl</kbd> <u>u</u>"
        );
    }

    #[test]
    fn abbr_title_is_escaped() {
        assert_eq!(
            render_html(r#"<p><abbr title="Say &quot;hi&quot;">SH</abbr></p>"#),
            "<abbr title=\"Say &quot;hi&quot;\">SH</abbr>"
        );
    }
}
