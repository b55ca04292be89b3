//! Parsed page snapshot
//!
//! A `Page` is the content tree every extractor reads from: the parsed
//! document plus the location used to resolve relative links. It is built
//! fresh for each action and never mutated.

pub mod dom;

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::static_selector;

static_selector!(BODY_SELECTOR, "body");

/// One parsed snapshot of a page's markup
pub struct Page {
    document: Html,
    url: Option<Url>,
}

impl Page {
    /// Parse serialized markup. Malformed markup is repaired by the HTML5
    /// tree builder rather than rejected.
    #[must_use]
    pub fn parse(html: &str, url: Option<Url>) -> Self {
        Self {
            document: Html::parse_document(html),
            url,
        }
    }

    #[must_use]
    pub fn document(&self) -> &Html {
        &self.document
    }

    /// Base location for href/src resolution
    #[must_use]
    pub fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }

    /// Page location as shown in document headers
    #[must_use]
    pub fn location(&self) -> String {
        self.url
            .as_ref()
            .map_or_else(|| "(local document)".to_string(), ToString::to_string)
    }

    /// The `<body>` element, or the root element for fragments without one
    #[must_use]
    pub fn body(&self) -> ElementRef<'_> {
        self.document
            .select(&BODY_SELECTOR)
            .next()
            .unwrap_or_else(|| self.document.root_element())
    }

    /// First element in document order matching `selector`
    #[must_use]
    pub fn select_first(&self, selector: &Selector) -> Option<ElementRef<'_>> {
        self.document.select(selector).next()
    }

    /// All elements in document order matching `selector`
    pub fn select_all<'a>(&'a self, selector: &'a Selector) -> impl Iterator<Item = ElementRef<'a>> {
        self.document.select(selector)
    }
}
