//! Page title, source, capture time and meta tags

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::page::Page;
use crate::page::dom::{non_empty_attr, trimmed_text};
use crate::static_selector;

static_selector!(ARTICLE_H1, "article h1");
static_selector!(MAIN_H1, "main h1");
static_selector!(ROLE_MAIN_H1, r#"[role="main"] h1"#);
static_selector!(TITLE_CLASS_H1, r#"[class*="title"] h1"#);
static_selector!(CONTENT_H1, ".content h1");
static_selector!(ANY_H1, "h1");
static_selector!(OG_TITLE_SELECTOR, r#"meta[property="og:title"]"#);
static_selector!(TITLE_SELECTOR, "title");
static_selector!(
    DESCRIPTION_SELECTOR,
    r#"meta[name="description"], meta[property="og:description"]"#
);
static_selector!(
    AUTHOR_SELECTOR,
    r#"meta[name="author"], meta[property="article:author"], [rel="author"]"#
);

/// Fallback title when the page carries none
pub const UNTITLED: &str = "Untitled";

/// Heading `h1` lookups, most specific first so sidebar titles lose to the
/// article's own.
fn heading_title(page: &Page) -> Option<String> {
    [
        &*ARTICLE_H1,
        &*MAIN_H1,
        &*ROLE_MAIN_H1,
        &*TITLE_CLASS_H1,
        &*CONTENT_H1,
        &*ANY_H1,
    ]
    .into_iter()
    .filter_map(|selector| page.select_first(selector))
    .map(|h1| trimmed_text(&h1))
    .find(|text| text.chars().count() > 1)
}

/// Resolve the page title: heading, then `og:title`, then `<title>`.
#[must_use]
pub fn page_title(page: &Page) -> String {
    heading_title(page)
        .or_else(|| {
            page.select_first(&OG_TITLE_SELECTOR)
                .and_then(|og| non_empty_attr(&og, "content").map(str::to_string))
        })
        .or_else(|| {
            page.select_first(&TITLE_SELECTOR)
                .map(|t| trimmed_text(&t))
                .filter(|t| !t.is_empty())
        })
        .unwrap_or_else(|| UNTITLED.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMetadata {
    pub title: String,
    pub source: String,
    pub captured: String,
    pub description: Option<String>,
    pub author: Option<String>,
}

impl PageMetadata {
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut out = format!(
            "# {}\n\n> **Source:** {}  \n> **Captured:** {}  \n",
            self.title, self.source, self.captured
        );
        if let Some(description) = &self.description {
            out.push_str(&format!("> **Description:** {description}  \n"));
        }
        if let Some(author) = &self.author {
            out.push_str(&format!("> **Author:** {author}  \n"));
        }
        out.push_str("\n---\n");
        out
    }
}

#[must_use]
pub fn extract_metadata(page: &Page, captured_at: DateTime<Local>) -> PageMetadata {
    let description = page
        .select_first(&DESCRIPTION_SELECTOR)
        .and_then(|meta| non_empty_attr(&meta, "content").map(str::to_string));

    // `rel="author"` links carry the name as text, meta tags as content.
    let author = page.select_first(&AUTHOR_SELECTOR).and_then(|el| {
        non_empty_attr(&el, "content")
            .map(str::to_string)
            .or_else(|| Some(trimmed_text(&el)))
            .filter(|a| !a.is_empty())
    });

    PageMetadata {
        title: page_title(page),
        source: page.location(),
        captured: captured_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        description,
        author,
    }
}
