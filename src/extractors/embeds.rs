//! Embedded iframes, with notebook cells pulled in when the frame is one

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use crate::notebook::{NotebookClient, NotebookSnapshot};
use crate::page::Page;
use crate::page::dom::{attr, non_empty_attr};
use crate::static_selector;
use crate::utils::resolve_url;

static_selector!(IFRAME_SRC_SELECTOR, "iframe[src]");

static IPYNB: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.ipynb").expect("BUG: hardcoded ipynb regex is invalid"));
static NOTEBOOK_TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)notebook").expect("BUG: hardcoded notebook title regex is invalid")
});

const DEFAULT_NOTEBOOK_TITLE: &str = "Jupyter Notebook";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbeddedFrame {
    pub src: String,
    pub title: Option<String>,
    pub notebook: Option<NotebookSnapshot>,
}

impl EmbeddedFrame {
    /// A `.ipynb` source or a title mentioning a notebook
    #[must_use]
    pub fn is_notebook_candidate(&self) -> bool {
        IPYNB.is_match(&self.src) || self.title.as_deref().is_some_and(|t| NOTEBOOK_TITLE.is_match(t))
    }

    /// Contents API URL guessed from the frame's notebook URL
    #[must_use]
    pub fn notebook_api_url(&self) -> String {
        self.src.replacen("/notebooks/", "/api/contents/", 1)
    }

    /// Fetch cells for notebook frames. Failures leave the frame as a
    /// plain link.
    pub async fn attach_notebook(&mut self, client: &NotebookClient) {
        if !self.is_notebook_candidate() {
            return;
        }
        match client.fetch_cells(&self.notebook_api_url()).await {
            Ok(Some(snapshot)) => {
                if self.title.is_none() {
                    self.title = Some(
                        snapshot
                            .name
                            .clone()
                            .unwrap_or_else(|| DEFAULT_NOTEBOOK_TITLE.to_string()),
                    );
                }
                self.notebook = Some(snapshot);
            }
            Ok(None) => {}
            Err(e) => tracing::debug!(src = %self.src, error = %e, "Notebook cells unavailable"),
        }
    }

    #[must_use]
    pub fn to_markdown(&self) -> String {
        let label = self.title.as_deref().unwrap_or(&self.src);
        let mut out = format!("- **iframe:** [{label}]({})", self.src);
        if let Some(notebook) = &self.notebook {
            out.push_str("\n\n### Notebook Cells\n\n");
            let cells: Vec<String> = notebook
                .cells
                .iter()
                .map(|cell| cell.to_markdown())
                .filter(|md| !md.is_empty())
                .collect();
            out.push_str(&cells.join("\n"));
        }
        out
    }
}

/// Iframes with a real source, in document order
#[must_use]
pub fn extract_embeds(page: &Page) -> Vec<EmbeddedFrame> {
    page.select_all(&IFRAME_SRC_SELECTOR)
        .filter_map(|frame| {
            let raw = non_empty_attr(&frame, "src")?;
            let src = resolve_url(page.url(), raw);
            if src == "about:blank" || src.starts_with("javascript:") {
                return None;
            }
            Some(EmbeddedFrame {
                src,
                title: attr(&frame, "title")
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(str::to_string),
                notebook: None,
            })
        })
        .collect()
}
