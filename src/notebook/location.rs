//! Finding the notebook behind a page

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

use crate::page::Page;
use crate::page::dom::{attr, text_content};
use crate::static_selector;
use crate::utils::resolve_url;

static_selector!(IFRAME_SRC_SELECTOR, "iframe[src]");
static_selector!(NEXT_DATA_SELECTOR, "script#__NEXT_DATA__");
static_selector!(INLINE_SCRIPT_SELECTOR, "script:not([src])");

static NOTEBOOK_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)/notebooks/.*\.ipynb").expect("BUG: hardcoded notebook path regex is invalid")
});
static NOTEBOOK_URL_IN_SCRIPT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(https?://[^"'\s]+/notebooks/[^"'\s]+\.ipynb[^"'\s]*)"#)
        .expect("BUG: hardcoded notebook url regex is invalid")
});

const NOTEBOOKS_SEGMENT: &str = "/notebooks/";

/// Server base, access token and file path of a notebook
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotebookLocation {
    /// Origin plus any path prefix before `/notebooks/` (hub user prefixes)
    pub base_url: String,
    pub token: Option<String>,
    /// Decoded path relative to the server's contents root
    pub path: String,
}

impl NotebookLocation {
    /// Parse a `.../notebooks/<path>.ipynb` URL
    #[must_use]
    pub fn from_url(url: &Url) -> Option<Self> {
        let full_path = url.path();
        if !NOTEBOOK_PATH.is_match(full_path) {
            return None;
        }
        let split = full_path.find(NOTEBOOKS_SEGMENT)?;
        let prefix = &full_path[..split];
        let encoded = &full_path[split + NOTEBOOKS_SEGMENT.len()..];
        let path = urlencoding::decode(encoded)
            .map(|p| p.into_owned())
            .unwrap_or_else(|_| encoded.to_string());
        let token = url
            .query_pairs()
            .find(|(key, _)| key == "token")
            .map(|(_, value)| value.into_owned())
            .filter(|t| !t.is_empty());
        Some(Self {
            base_url: format!("{}{prefix}", url.origin().ascii_serialization()),
            token,
            path,
        })
    }

    /// Look for a notebook in order: the page itself, an embedding iframe,
    /// then notebook URLs mentioned in inline scripts.
    #[must_use]
    pub fn detect(page: &Page) -> Option<Self> {
        if let Some(found) = page.url().and_then(Self::from_url) {
            return Some(found);
        }

        let from_iframe = page.select_all(&IFRAME_SRC_SELECTOR).find_map(|frame| {
            let src = resolve_url(page.url(), attr(&frame, "src").unwrap_or(""));
            Url::parse(&src).ok().and_then(|url| Self::from_url(&url))
        });
        if from_iframe.is_some() {
            return from_iframe;
        }

        page.select_all(&NEXT_DATA_SELECTOR)
            .chain(page.select_all(&INLINE_SCRIPT_SELECTOR))
            .find_map(|script| {
                let body = text_content(&script);
                let hit = NOTEBOOK_URL_IN_SCRIPT.captures(&body)?.get(1)?;
                Url::parse(hit.as_str())
                    .ok()
                    .and_then(|url| Self::from_url(&url))
            })
    }

    /// Contents API URL for `file_path`, each segment percent-encoded
    #[must_use]
    pub fn api_url(&self, file_path: &str) -> String {
        let encoded = file_path
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/");
        match &self.token {
            Some(token) => format!("{}/api/contents/{encoded}?token={token}", self.base_url),
            None => format!("{}/api/contents/{encoded}", self.base_url),
        }
    }

    /// Last path segment, used as the saved file name
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.path
            .rsplit('/')
            .next()
            .filter(|name| !name.is_empty())
            .unwrap_or("notebook.ipynb")
    }

    /// Directory holding the notebook, empty at the contents root
    #[must_use]
    pub fn directory(&self) -> &str {
        self.path.rfind('/').map_or("", |i| &self.path[..i])
    }
}
