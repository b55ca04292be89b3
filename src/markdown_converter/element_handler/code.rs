//! Inline code and fenced code blocks

use regex::Regex;
use scraper::ElementRef;
use std::sync::LazyLock;

use super::super::MarkdownRenderer;
use super::super::context::RenderContext;
use crate::page::dom::{class_attr, text_content};
use crate::static_selector;

static_selector!(CODE_SELECTOR, "code");

static LANGUAGE_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\blang(?:uage)?-(\w+)").expect("BUG: hardcoded language class regex is invalid")
});

/// Language from a `language-xxx` / `lang-xxx` class token.
#[must_use]
pub fn language_from_class(class: &str) -> Option<String> {
    LANGUAGE_CLASS
        .captures(class)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Inline code. Code inside `pre` never reaches here: the fenced block
/// renders its body directly.
pub(super) fn code_handler(el: ElementRef<'_>) -> String {
    format!("`{}`", text_content(&el).trim().replace('`', "\\`"))
}

/// Fenced block. The body is walked in preformatted mode so its text is
/// kept byte-for-byte apart from trailing whitespace at the very end.
pub(super) fn pre_handler(
    renderer: &MarkdownRenderer<'_>,
    el: ElementRef<'_>,
    ctx: RenderContext,
) -> String {
    let code = el.select(&CODE_SELECTOR).next();
    let body_root = code.unwrap_or(el);
    let body = renderer.render_children(body_root, ctx.preformatted());

    let class = match code {
        Some(code) if !class_attr(&code).is_empty() => class_attr(&code),
        _ => class_attr(&el),
    };
    let lang = language_from_class(class).unwrap_or_default();

    format!("\n\n```{lang}\n{}\n```\n\n", body.trim_end())
}
