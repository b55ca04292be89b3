//! Images, pictures and figures

use scraper::ElementRef;

use super::super::MarkdownRenderer;
use crate::page::dom::{non_empty_attr, squash_text};
use crate::static_selector;
use crate::utils::resolve_url;

static_selector!(IMG_SELECTOR, "img");
static_selector!(FIGCAPTION_SELECTOR, "figcaption");

/// Resolved source, falling back to the lazy-loading `data-src`
fn image_source(renderer: &MarkdownRenderer<'_>, img: &ElementRef<'_>) -> Option<String> {
    non_empty_attr(img, "src")
        .or_else(|| non_empty_attr(img, "data-src"))
        .map(|src| resolve_url(renderer.base_url, src.trim()))
}

fn image_markdown(renderer: &MarkdownRenderer<'_>, img: &ElementRef<'_>, default_alt: &str) -> String {
    let Some(src) = image_source(renderer, img) else {
        return String::new();
    };
    let alt = non_empty_attr(img, "alt")
        .or_else(|| non_empty_attr(img, "title"))
        .unwrap_or(default_alt);
    format!("![{}]({src})", alt.trim())
}

pub(super) fn img_handler(renderer: &MarkdownRenderer<'_>, el: ElementRef<'_>) -> String {
    image_markdown(renderer, &el, "image")
}

pub(super) fn picture_handler(renderer: &MarkdownRenderer<'_>, el: ElementRef<'_>) -> String {
    el.select(&IMG_SELECTOR)
        .next()
        .map(|img| image_markdown(renderer, &img, "image"))
        .unwrap_or_default()
}

/// Primary image plus an italic caption line
pub(super) fn figure_handler(renderer: &MarkdownRenderer<'_>, el: ElementRef<'_>) -> String {
    let mut md = el
        .select(&IMG_SELECTOR)
        .next()
        .map(|img| image_markdown(renderer, &img, ""))
        .unwrap_or_default();
    if let Some(caption) = el.select(&FIGCAPTION_SELECTOR).next() {
        let caption = squash_text(&caption);
        if !caption.is_empty() {
            md.push_str(&format!("\n*{caption}*"));
        }
    }
    format!("\n\n{md}\n\n")
}
