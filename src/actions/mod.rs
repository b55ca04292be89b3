//! User-triggered actions and their error boundary
//!
//! Each action parses its own page snapshot, runs to completion and returns
//! either its whole output or one error. Actions are single-flight: a
//! second action started while one is running fails with
//! [`PageCopyError::Busy`] instead of queueing.

use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use url::Url;

use crate::config::ExtractionConfig;
use crate::content_locator::ContentLocator;
use crate::document::{
    DocumentAssembler, clean_html, document_file_name, extract_selection, plain_text,
};
use crate::errors::{PageCopyError, PageCopyResult};
use crate::expand::expand_collapsed;
use crate::notebook::{NotebookClient, NotebookLocation, download_all_files, download_notebook};
use crate::page::Page;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Action {
    /// Full assembled Markdown document
    Markdown,
    /// Plain text of the body
    Text,
    /// Clean HTML of the content root
    Html,
    /// One fragment chosen by a CSS selector
    Selection,
    /// Expand collapsed UI, settle, then the full document
    ExpandAndCopy,
    /// Save the full document as `<slug>.md`
    DownloadMarkdown,
    /// Save the page's notebook as `.ipynb`
    DownloadNotebook,
    /// Save every file next to the page's notebook
    DownloadNotebookFiles,
}

impl Action {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::Text => "text",
            Self::Html => "html",
            Self::Selection => "selection",
            Self::ExpandAndCopy => "expand",
            Self::DownloadMarkdown => "download-md",
            Self::DownloadNotebook => "download-ipynb",
            Self::DownloadNotebookFiles => "download-nb-all",
        }
    }
}

/// Result of a completed action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Text for the clipboard or stdout
    Text(String),
    /// Files written to the output directory
    Files(Vec<PathBuf>),
}

/// Input snapshot for one action
#[derive(Debug, Clone, Copy)]
pub struct ActionInput<'a> {
    pub html: &'a str,
    pub url: Option<&'a Url>,
    /// CSS selector for [`Action::Selection`]
    pub selector: Option<&'a str>,
}

impl<'a> ActionInput<'a> {
    #[must_use]
    pub fn new(html: &'a str, url: Option<&'a Url>) -> Self {
        Self {
            html,
            url,
            selector: None,
        }
    }

    #[must_use]
    pub fn with_selector(mut self, selector: Option<&'a str>) -> Self {
        self.selector = selector;
        self
    }

    fn parse(&self) -> Page {
        Page::parse(self.html, self.url.cloned())
    }
}

/// Clears the busy flag when the running action finishes, however it ends.
struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> PageCopyResult<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| Self(flag))
            .map_err(|_| PageCopyError::Busy)
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct ActionRunner {
    config: ExtractionConfig,
    client: Option<NotebookClient>,
    out_dir: PathBuf,
    busy: AtomicBool,
}

impl ActionRunner {
    /// Runner with network access for notebook actions
    pub fn new(config: ExtractionConfig, out_dir: impl Into<PathBuf>) -> PageCopyResult<Self> {
        let client = NotebookClient::new(&config)?;
        Ok(Self {
            config,
            client: Some(client),
            out_dir: out_dir.into(),
            busy: AtomicBool::new(false),
        })
    }

    /// Runner that never touches the network; notebook actions are
    /// unsupported and embedded notebooks stay links.
    #[must_use]
    pub fn offline(config: ExtractionConfig, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            config,
            client: None,
            out_dir: out_dir.into(),
            busy: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    #[must_use]
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// True while an action is running
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Run one action to completion.
    pub async fn run(&self, action: Action, input: ActionInput<'_>) -> PageCopyResult<ActionOutcome> {
        let _guard = BusyGuard::acquire(&self.busy)?;
        tracing::debug!(action = action.name(), "Running action");

        let result = match action {
            Action::Markdown => self.markdown(input.html, input.url).await.map(ActionOutcome::Text),
            Action::Text => self.text(&input),
            Action::Html => self.html(&input),
            Action::Selection => {
                let page = input.parse();
                extract_selection(&page, input.selector, self.config.lexicon()).map(ActionOutcome::Text)
            }
            Action::ExpandAndCopy => self.expand_and_copy(&input).await.map(ActionOutcome::Text),
            Action::DownloadMarkdown => self.download_markdown(&input).await,
            Action::DownloadNotebook => self.download_notebook(&input).await,
            Action::DownloadNotebookFiles => self.download_notebook_files(&input).await,
        };

        if let Err(e) = &result {
            tracing::warn!(action = action.name(), indicator = e.indicator(), "Action failed: {e}");
        }
        result
    }

    async fn markdown(&self, html: &str, url: Option<&Url>) -> PageCopyResult<String> {
        let page = Page::parse(html, url.cloned());
        Ok(DocumentAssembler::new(&self.config)
            .extract_full_page(&page, self.client.as_ref())
            .await)
    }

    fn text(&self, input: &ActionInput<'_>) -> PageCopyResult<ActionOutcome> {
        let page = input.parse();
        let text = plain_text(page.body());
        if text.is_empty() {
            return Err(PageCopyError::NothingExtracted("page has no visible text".to_string()));
        }
        Ok(ActionOutcome::Text(text))
    }

    fn html(&self, input: &ActionInput<'_>) -> PageCopyResult<ActionOutcome> {
        let page = input.parse();
        let root = ContentLocator::new(self.config.locator()).locate_or_body(&page);
        let html = clean_html(root);
        if html.trim().is_empty() {
            return Err(PageCopyError::NothingExtracted("content root is empty".to_string()));
        }
        Ok(ActionOutcome::Text(html))
    }

    async fn expand_and_copy(&self, input: &ActionInput<'_>) -> PageCopyResult<String> {
        let expanded = expand_collapsed(input.html)?;
        tracing::info!(
            "Expanded {} elements, waiting {:?}",
            expanded.expanded,
            self.config.settle_delay()
        );
        tokio::time::sleep(self.config.settle_delay()).await;
        self.markdown(&expanded.html, input.url).await
    }

    async fn download_markdown(&self, input: &ActionInput<'_>) -> PageCopyResult<ActionOutcome> {
        let document = self.markdown(input.html, input.url).await?;
        let name = document_file_name(&input.parse());
        tokio::fs::create_dir_all(&self.out_dir).await?;
        let path = self.out_dir.join(name);
        tokio::fs::write(&path, document).await?;
        Ok(ActionOutcome::Files(vec![path]))
    }

    fn notebook_target(&self, input: &ActionInput<'_>) -> PageCopyResult<(&NotebookClient, NotebookLocation)> {
        let location = NotebookLocation::detect(&input.parse()).ok_or_else(|| {
            PageCopyError::Unsupported("No Jupyter notebook found on this page".to_string())
        })?;
        let client = self.client.as_ref().ok_or_else(|| {
            PageCopyError::Unsupported("Notebook downloads need network access".to_string())
        })?;
        Ok((client, location))
    }

    async fn download_notebook(&self, input: &ActionInput<'_>) -> PageCopyResult<ActionOutcome> {
        let (client, location) = self.notebook_target(input)?;
        let path = download_notebook(client, &location, &self.out_dir).await?;
        Ok(ActionOutcome::Files(vec![path]))
    }

    async fn download_notebook_files(&self, input: &ActionInput<'_>) -> PageCopyResult<ActionOutcome> {
        let (client, location) = self.notebook_target(input)?;
        let paths = download_all_files(client, &location, &self.out_dir).await?;
        Ok(ActionOutcome::Files(paths))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runner(dir: &Path) -> ActionRunner {
        let config = ExtractionConfig::builder()
            .settle_delay_ms(0)
            .build()
            .unwrap();
        ActionRunner::offline(config, dir)
    }

    #[tokio::test]
    async fn second_action_fails_while_busy() {
        let dir = tempfile::tempdir().unwrap();
        let runner = runner(dir.path());
        let guard = BusyGuard::acquire(&runner.busy).unwrap();
        let err = runner
            .run(Action::Text, ActionInput::new("<p>x</p>", None))
            .await
            .unwrap_err();
        assert!(matches!(err, PageCopyError::Busy));
        drop(guard);
        assert!(!runner.is_busy());
        assert!(runner.run(Action::Text, ActionInput::new("<p>x</p>", None)).await.is_ok());
    }

    #[tokio::test]
    async fn flag_is_released_after_failure() {
        let dir = tempfile::tempdir().unwrap();
        let runner = runner(dir.path());
        let err = runner
            .run(Action::Selection, ActionInput::new("<p>x</p>", None))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "No text selected");
        assert!(!runner.is_busy());
    }

    #[tokio::test]
    async fn expand_discloses_details_before_rendering() {
        let dir = tempfile::tempdir().unwrap();
        let runner = runner(dir.path());
        let html = r#"<body><div hidden id="more">Hidden notes</div>
            <button aria-expanded="false" aria-controls="more">Show</button></body>"#;
        let ActionOutcome::Text(doc) = runner
            .run(Action::ExpandAndCopy, ActionInput::new(html, None))
            .await
            .unwrap()
        else {
            panic!("expected text");
        };
        assert!(doc.contains("Hidden notes"));

        let ActionOutcome::Text(plain) = runner
            .run(Action::Markdown, ActionInput::new(html, None))
            .await
            .unwrap()
        else {
            panic!("expected text");
        };
        assert!(!plain.contains("Hidden notes"));
    }

    #[tokio::test]
    async fn download_markdown_writes_slug_file() {
        let dir = tempfile::tempdir().unwrap();
        let runner = runner(dir.path());
        let url: Url = "https://example.com/docs/page".parse().unwrap();
        let outcome = runner
            .run(Action::DownloadMarkdown, ActionInput::new("<p>Saved body</p>", Some(&url)))
            .await
            .unwrap();
        let ActionOutcome::Files(paths) = outcome else {
            panic!("expected files");
        };
        assert_eq!(paths[0], dir.path().join("example-com-docs-page.md"));
        let saved = std::fs::read_to_string(&paths[0]).unwrap();
        assert!(saved.contains("Saved body"));
    }

    #[tokio::test]
    async fn notebook_actions_need_a_notebook() {
        let dir = tempfile::tempdir().unwrap();
        let runner = runner(dir.path());
        let err = runner
            .run(Action::DownloadNotebook, ActionInput::new("<p>x</p>", None))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "No Jupyter notebook found on this page");
    }
}
