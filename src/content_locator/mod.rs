//! Main content detection
//!
//! Picks the element most likely to hold the page's primary content by
//! walking an ordered selector list, then double-checks the pick against the
//! `<main>` landmark so a small overlay `<article>` cannot outrank the real
//! content.

use scraper::{ElementRef, Selector};
use std::borrow::Cow;

use crate::config::LocatorConfig;
use crate::page::Page;
use crate::page::dom::{contains, text_len};
use crate::static_selector;

static_selector!(MAIN_SELECTOR, "main");

pub struct ContentLocator<'c> {
    config: &'c LocatorConfig,
    selectors: Cow<'c, [Selector]>,
}

impl<'c> ContentLocator<'c> {
    #[must_use]
    pub fn new(config: &'c LocatorConfig) -> Self {
        let selectors = if config.compiled.is_empty() {
            // Uncompiled (Default) configs parse on first use; bad entries are skipped.
            Cow::Owned(
                config
                    .selectors
                    .iter()
                    .filter_map(|css| match Selector::parse(css) {
                        Ok(sel) => Some(sel),
                        Err(e) => {
                            tracing::warn!(selector = %css, error = %e, "Skipping invalid locator selector");
                            None
                        }
                    })
                    .collect(),
            )
        } else {
            Cow::Borrowed(config.compiled.as_slice())
        };
        Self { config, selectors }
    }

    /// Locate the main content element.
    ///
    /// Returns `None` when no selector yields an element with enough text;
    /// callers then render the whole body.
    #[must_use]
    pub fn locate<'a>(&self, page: &'a Page) -> Option<ElementRef<'a>> {
        let candidate = self.selectors.iter().find_map(|sel| {
            page.select_first(sel)
                .filter(|el| text_len(el) > self.config.min_text_len)
        })?;

        if let Some(main) = page.select_first(&MAIN_SELECTOR)
            && main.id() != candidate.id()
            && !contains(&main, &candidate)
        {
            let main_len = text_len(&main);
            let cand_len = text_len(&candidate);
            #[allow(clippy::cast_precision_loss)]
            let outweighs = main_len as f64 > cand_len as f64 * self.config.landmark_ratio;
            if outweighs && main_len > self.config.landmark_min_len {
                tracing::debug!(
                    main_len,
                    cand_len,
                    "Main landmark outweighs locator candidate; using <main>"
                );
                return Some(main);
            }
        }

        Some(candidate)
    }

    /// Located element, or the body when nothing qualifies
    #[must_use]
    pub fn locate_or_body<'a>(&self, page: &'a Page) -> ElementRef<'a> {
        self.locate(page).unwrap_or_else(|| page.body())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::dom::tag;

    fn locate_tag(html: &str) -> Option<String> {
        let page = Page::parse(html, None);
        let config = LocatorConfig::default();
        ContentLocator::new(&config)
            .locate(&page)
            .map(|el| tag(&el).to_string())
    }

    #[test]
    fn prefers_article_with_enough_text() {
        let body = "word ".repeat(30);
        let html = format!("<body><div id=\"content\">{body}</div><article>{body}</article></body>");
        assert_eq!(locate_tag(&html).as_deref(), Some("article"));
    }

    #[test]
    fn skips_short_candidates() {
        let html = "<body><article>tiny</article><div class=\"prose\">".to_string()
            + &"text ".repeat(40)
            + "</div></body>";
        assert_eq!(locate_tag(&html).as_deref(), Some("div"));
    }

    #[test]
    fn main_landmark_outranks_small_overlay_article() {
        let article = "a".repeat(100);
        let main = "m".repeat(1000);
        let html = format!("<body><article>{article}</article><main><p>{main}</p></main></body>");
        assert_eq!(locate_tag(&html).as_deref(), Some("main"));
    }

    #[test]
    fn article_inside_main_is_kept() {
        let article = "a".repeat(200);
        let extra = "m".repeat(1000);
        let html = format!("<body><main><article>{article}</article><p>{extra}</p></main></body>");
        assert_eq!(locate_tag(&html).as_deref(), Some("article"));
    }

    #[test]
    fn nothing_qualifies() {
        assert_eq!(locate_tag("<body><p>hello</p></body>"), None);
    }
}
