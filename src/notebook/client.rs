//! HTTP access to the contents API

use reqwest::Client;
use reqwest::header::ACCEPT;
use std::time::Duration;

use super::{ContentsEntry, NotebookSnapshot};
use crate::config::ExtractionConfig;
use crate::errors::{PageCopyError, PageCopyResult};
use crate::utils::USER_AGENT;

/// Contents API client: one request at a time, no retries.
#[derive(Debug, Clone)]
pub struct NotebookClient {
    http: Client,
    file_delay: Duration,
}

impl NotebookClient {
    /// Build a client bounded by the configured request timeout
    pub fn new(config: &ExtractionConfig) -> PageCopyResult<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            http,
            file_delay: config.file_delay(),
        })
    }

    /// Pause between sequential file downloads
    #[must_use]
    pub fn file_delay(&self) -> Duration {
        self.file_delay
    }

    /// GET one contents entry. Non-2xx statuses are transport failures.
    pub async fn fetch_contents(&self, url: &str) -> PageCopyResult<ContentsEntry> {
        log::debug!("Fetching notebook contents: {url}");
        let response = self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PageCopyError::Transport {
                url: url.to_string(),
                message: format!("contents request failed with status {status}"),
            });
        }
        Ok(response.json::<ContentsEntry>().await?)
    }

    /// Cells of the notebook at `api_url`, `None` when the payload has no
    /// cells.
    pub async fn fetch_cells(&self, api_url: &str) -> PageCopyResult<Option<NotebookSnapshot>> {
        let entry = self.fetch_contents(api_url).await?;
        if entry.content.get("cells").is_none() {
            log::debug!("Contents at {api_url} carry no cells");
            return Ok(None);
        }
        Ok(Some(NotebookSnapshot {
            name: Some(entry.name.clone()).filter(|n| !n.is_empty()),
            cells: entry.cells(),
        }))
    }
}
