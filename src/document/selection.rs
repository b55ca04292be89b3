//! Selection output: one chosen fragment rendered on its own

use scraper::Selector;

use crate::config::NoiseLexicon;
use crate::errors::{PageCopyError, PageCopyResult};
use crate::markdown_converter::MarkdownRenderer;
use crate::page::Page;

const NO_SELECTION: &str = "No text selected";

/// Render the first element matching `selector` as
/// `# Selection from <location>`. A missing, invalid or unmatched selector
/// means there is nothing selected.
pub fn extract_selection(
    page: &Page,
    selector: Option<&str>,
    lexicon: &NoiseLexicon,
) -> PageCopyResult<String> {
    let selector = selector
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| PageCopyError::Unsupported(NO_SELECTION.to_string()))?;
    let parsed = Selector::parse(selector).map_err(|e| {
        tracing::warn!("Invalid selection selector '{selector}': {e}");
        PageCopyError::Unsupported(NO_SELECTION.to_string())
    })?;
    let fragment = page
        .select_first(&parsed)
        .ok_or_else(|| PageCopyError::Unsupported(NO_SELECTION.to_string()))?;

    let markdown = MarkdownRenderer::new(page.url(), lexicon).render(fragment);
    Ok(format!("# Selection from {}\n\n{markdown}\n", page.location()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_matched_fragment() {
        let page = Page::parse(
            "<p>skip</p><div id=\"pick\"><p>Chosen <b>text</b></p></div>",
            Some("https://example.com/a".parse().unwrap()),
        );
        let out = extract_selection(&page, Some("#pick"), &NoiseLexicon::default()).unwrap();
        assert_eq!(out, "# Selection from https://example.com/a\n\nChosen **text**\n");
    }

    #[test]
    fn nothing_selected() {
        let page = Page::parse("<p>x</p>", None);
        let lexicon = NoiseLexicon::default();
        for selector in [None, Some(""), Some("#missing"), Some("[[bad")] {
            let err = extract_selection(&page, selector, &lexicon).unwrap_err();
            assert_eq!(err.to_string(), "No text selected");
        }
    }
}
