//! Breadcrumb trail and sidebar/TOC links

use serde::Serialize;
use std::collections::HashSet;

use crate::page::Page;
use crate::page::dom::{attr, has_class, non_empty_attr, tag, trimmed_text};
use crate::static_selector;
use crate::utils::{MAX_NAV_LABEL_CHARS, MAX_NAV_LINKS, resolve_url, safe_truncate_chars};

static_selector!(
    BREADCRUMB_SELECTOR,
    r#"nav[aria-label*="readcrumb"], nav[aria-label*="Breadcrumb"], ol[class*="breadcrumb"], ul[class*="breadcrumb"], nav[class*="breadcrumb"], div[class*="breadcrumb"]"#
);
static_selector!(CRUMB_ITEM_SELECTOR, "a, span, li");
static_selector!(
    NAV_LINK_SELECTOR,
    r#"nav a, aside a, [class*="sidebar"] a, [class*="menu"] a, [class*="toc"] a, [role="navigation"] a, a[href*="/lesson/"]"#
);

const MIN_CRUMBS: usize = 2;
const MAX_CRUMBS: usize = 8;
const MAX_CRUMB_CHARS: usize = 80;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Crumb {
    pub text: String,
    pub href: Option<String>,
}

/// Trail from the first explicit breadcrumb container holding 2 to 8
/// usable items.
#[must_use]
pub fn extract_breadcrumb(page: &Page) -> Vec<Crumb> {
    for container in page.select_all(&BREADCRUMB_SELECTOR) {
        let crumbs: Vec<Crumb> = container
            .select(&CRUMB_ITEM_SELECTOR)
            .filter_map(|item| {
                let text = trimmed_text(&item);
                if text.is_empty() || text.chars().count() >= MAX_CRUMB_CHARS {
                    return None;
                }
                let href = (tag(&item) == "a")
                    .then(|| non_empty_attr(&item, "href"))
                    .flatten()
                    .map(|href| resolve_url(page.url(), href));
                Some(Crumb { text, href })
            })
            .collect();
        if (MIN_CRUMBS..=MAX_CRUMBS).contains(&crumbs.len()) {
            return crumbs;
        }
    }
    Vec::new()
}

#[must_use]
pub fn breadcrumb_markdown(crumbs: &[Crumb]) -> String {
    crumbs
        .iter()
        .map(|c| match &c.href {
            Some(href) => format!("[{}]({href})", c.text),
            None => c.text.clone(),
        })
        .collect::<Vec<_>>()
        .join(" > ")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub text: String,
    pub href: String,
    pub active: bool,
}

impl NavLink {
    #[must_use]
    pub fn to_markdown(&self) -> String {
        format!(
            "- [{}]({}){}",
            self.text,
            self.href,
            if self.active { " ◀" } else { "" }
        )
    }
}

/// Sidebar, menu and TOC links deduplicated by resolved href. More than
/// [`MAX_NAV_LINKS`] means full site navigation, which yields nothing.
#[must_use]
pub fn extract_nav_links(page: &Page) -> Vec<NavLink> {
    let current_path = page.url().map(|u| u.path()).filter(|p| *p != "/");
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for anchor in page.select_all(&NAV_LINK_SELECTOR) {
        let Some(raw_href) = attr(&anchor, "href") else {
            continue;
        };
        let full_text = trimmed_text(&anchor);
        let text = safe_truncate_chars(&full_text, MAX_NAV_LABEL_CHARS).to_string();
        if text.chars().count() < 2 {
            continue;
        }
        let href = resolve_url(page.url(), raw_href);
        if !seen.insert(href.clone()) {
            continue;
        }
        let active = current_path.is_some_and(|path| href.contains(path))
            || has_class(&anchor, "active")
            || attr(&anchor, "aria-current") == Some("page");
        links.push(NavLink { text, href, active });
    }

    if links.len() > MAX_NAV_LINKS {
        tracing::debug!(count = links.len(), "Navigation looks site-wide, skipping");
        return Vec::new();
    }
    links
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_at(html: &str, url: &str) -> Page {
        Page::parse(html, Some(url.parse().unwrap()))
    }

    #[test]
    fn breadcrumb_resolves_links() {
        let p = page_at(
            r#"<nav aria-label="Breadcrumb"><a href="/">Home</a><a href="/docs">Docs</a></nav>"#,
            "https://example.com/docs/intro",
        );
        let crumbs = extract_breadcrumb(&p);
        assert_eq!(
            breadcrumb_markdown(&crumbs),
            "[Home](https://example.com/) > [Docs](https://example.com/docs)"
        );
    }

    #[test]
    fn single_crumb_is_not_a_trail() {
        let p = page_at(
            r#"<div class="breadcrumbs"><span>Only</span></div>"#,
            "https://example.com/",
        );
        assert!(extract_breadcrumb(&p).is_empty());
    }

    #[test]
    fn nav_links_dedupe_and_mark_active() {
        let p = page_at(
            r#"<aside>
                <a href="/course/lesson/1">Lesson 1</a>
                <a href="/course/lesson/2">Lesson 2</a>
                <a href="/course/lesson/1">Lesson 1 again</a>
                <a href="/x">x</a>
                <a>No href</a>
            </aside>"#,
            "https://example.com/course/lesson/2",
        );
        let links = extract_nav_links(&p);
        assert_eq!(links.len(), 2);
        assert!(!links[0].active);
        assert!(links[1].active);
        assert_eq!(
            links[1].to_markdown(),
            "- [Lesson 2](https://example.com/course/lesson/2) ◀"
        );
    }

    #[test]
    fn site_wide_nav_is_dropped() {
        let anchors: String = (0..31)
            .map(|i| format!(r#"<a href="/p{i}">Page {i}</a>"#))
            .collect();
        let p = page_at(&format!("<nav>{anchors}</nav>"), "https://example.com/");
        assert!(extract_nav_links(&p).is_empty());
    }
}
