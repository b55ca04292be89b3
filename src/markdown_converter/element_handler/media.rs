//! Video, audio and iframe embeds

use scraper::ElementRef;

use super::super::MarkdownRenderer;
use crate::page::dom::{child_elements, non_empty_attr, tag};
use crate::utils::{is_ephemeral_source, resolve_url};

/// Own `src`, else the first `<source>` child's
fn media_source(renderer: &MarkdownRenderer<'_>, el: &ElementRef<'_>) -> Option<String> {
    non_empty_attr(el, "src")
        .or_else(|| {
            child_elements(el)
                .filter(|c| tag(c) == "source")
                .find_map(|source| non_empty_attr(&source, "src"))
        })
        .map(|src| resolve_url(renderer.base_url, src.trim()))
        .filter(|src| !is_ephemeral_source(src))
}

pub(super) fn video_handler(renderer: &MarkdownRenderer<'_>, el: ElementRef<'_>) -> String {
    let Some(src) = media_source(renderer, &el) else {
        return String::new();
    };
    match non_empty_attr(&el, "poster") {
        Some(poster) => format!(
            "\n\n🎥 Video: {src} (poster: {})\n\n",
            resolve_url(renderer.base_url, poster.trim())
        ),
        None => format!("\n\n🎥 Video: {src}\n\n"),
    }
}

pub(super) fn audio_handler(renderer: &MarkdownRenderer<'_>, el: ElementRef<'_>) -> String {
    media_source(renderer, &el)
        .map(|src| format!("\n\n🔊 Audio: {src}\n\n"))
        .unwrap_or_default()
}

pub(super) fn iframe_handler(renderer: &MarkdownRenderer<'_>, el: ElementRef<'_>) -> String {
    let Some(raw) = non_empty_attr(&el, "src").map(str::trim) else {
        return String::new();
    };
    if raw == "about:blank" || raw.to_ascii_lowercase().starts_with("javascript:") {
        return String::new();
    }
    let src = resolve_url(renderer.base_url, raw);
    let label = non_empty_attr(&el, "title").map_or(src.as_str(), str::trim);
    format!("\n\n📎 Embedded: [{label}]({src})\n\n")
}

#[cfg(test)]
mod tests {
    use crate::markdown_converter::test_support::{render_html, render_html_at};

    #[test]
    fn durable_video_with_poster() {
        assert_eq!(
            render_html_at(
                r#"<video src="/v.mp4" poster="/p.jpg"></video>"#,
                Some("https://m.io/watch/")
            ),
            "🎥 Video: https://m.io/v.mp4 (poster: https://m.io/p.jpg)"
        );
        assert_eq!(
            render_html(r#"<video><source src="clip.webm"></video>"#),
            "🎥 Video: clip.webm"
        );
    }

    #[test]
    fn blob_sources_are_omitted() {
        assert_eq!(render_html(r#"<p>x</p><video src="blob:https://m.io/abc"></video>"#), "x");
        assert_eq!(render_html(r#"<p>x</p><audio src="blob:1"></audio>"#), "x");
    }

    #[test]
    fn audio_line() {
        assert_eq!(render_html(r#"<audio src="a.mp3"></audio>"#), "🔊 Audio: a.mp3");
    }

    #[test]
    fn iframe_links() {
        assert_eq!(
            render_html(r#"<iframe src="https://e.com/x" title="Demo"></iframe>"#),
            "📎 Embedded: [Demo](https://e.com/x)"
        );
        assert_eq!(
            render_html(r#"<iframe src="https://e.com/y"></iframe>"#),
            "📎 Embedded: [https://e.com/y](https://e.com/y)"
        );
        assert_eq!(render_html(r#"<p>x</p><iframe src="about:blank"></iframe>"#), "x");
    }
}
