//! MathML and math-library (KaTeX, MathJax) containers
//!
//! Libraries render every formula several times (visual HTML, hidden
//! MathML, preview). The container carries the TeX source; the inner
//! renderings are dropped so a formula is emitted once.

use scraper::ElementRef;

use super::super::MarkdownRenderer;
use crate::page::dom::{attr, closest, has_class, text_content};
use crate::static_selector;

static_selector!(TEX_ANNOTATION_SELECTOR, r#"annotation[encoding="application/x-tex"]"#);
static_selector!(MATH_LIBRARY_ROOT_SELECTOR, ".katex, .MathJax");

fn tex_annotation(el: &ElementRef<'_>) -> Option<String> {
    el.select(&TEX_ANNOTATION_SELECTOR)
        .next()
        .map(|ann| text_content(&ann))
        .filter(|tex| !tex.is_empty())
}

/// Native `<math>`: TeX annotation when present, else its text
pub(super) fn math_handler(el: ElementRef<'_>) -> String {
    let tex = tex_annotation(&el).unwrap_or_else(|| text_content(&el));
    format!("${tex}$")
}

fn has_any_class(el: &ElementRef<'_>, classes: &[String]) -> bool {
    classes.iter().any(|class| has_class(el, class))
}

/// `$tex$` or `$$tex$$` for a recognised library container that exposes its
/// TeX source. `None` lets the element render normally.
pub(super) fn library_container_handler(
    renderer: &MarkdownRenderer<'_>,
    el: ElementRef<'_>,
) -> Option<String> {
    let lexicon = renderer.lexicon;
    if !has_any_class(&el, &lexicon.math_container_classes) {
        return None;
    }
    let tex = tex_annotation(&el)
        .or_else(|| attr(&el, "data-latex").filter(|t| !t.is_empty()).map(str::to_string))?;

    if has_any_class(&el, &lexicon.math_display_classes) {
        Some(format!("$${tex}$$"))
    } else {
        Some(format!("${tex}$"))
    }
}

/// Duplicate renderings inside a math library container
pub(super) fn is_library_artifact(renderer: &MarkdownRenderer<'_>, el: ElementRef<'_>) -> bool {
    has_any_class(&el, &renderer.lexicon.math_artifact_classes)
        || (attr(&el, "aria-hidden") == Some("true")
            && closest(&el, &MATH_LIBRARY_ROOT_SELECTOR).is_some())
}

#[cfg(test)]
mod tests {
    use crate::markdown_converter::test_support::render_html;

    #[test]
    fn inline_katex() {
        let html = r#"<p>Area <span class="katex"><span class="katex-mathml"><math><semantics><mrow><mi>x</mi></mrow><annotation encoding="application/x-tex">x^2</annotation></semantics></math></span><span class="katex-html" aria-hidden="true">x2</span></span> here</p>"#;
        assert_eq!(render_html(html), "Area $x^2$ here");
    }

    #[test]
    fn display_variant() {
        let html = r#"<div class="katex-display"><span class="katex"><annotation encoding="application/x-tex">x^2</annotation></span></div>"#;
        assert_eq!(render_html(html), "$$x^2$$");
    }

    #[test]
    fn data_latex_fallback() {
        assert_eq!(
            render_html(r#"<p><span class="math math-display" data-latex="\sum_i i"></span></p>"#),
            "$$\\sum_i i$$"
        );
    }

    #[test]
    fn native_mathml() {
        assert_eq!(render_html("<p><math><mi>y</mi></math></p>"), "$y$");
    }

    #[test]
    fn preview_artifacts_are_dropped() {
        let html = r#"<p><span class="MathJax_Preview">x2</span><span class="MathJax" data-latex="x^2"><span aria-hidden="true">x2</span></span></p>"#;
        assert_eq!(render_html(html), "$x^2$");
    }
}
