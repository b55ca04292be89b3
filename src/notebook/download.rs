//! Saving notebooks and their sibling files

use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use super::{ContentsEntry, FilePayload, NotebookClient, NotebookLocation};
use super::export::{export_payload, pretty_notebook_json};
use crate::errors::{PageCopyError, PageCopyResult};

static SKIPPED_FILE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\.|__pycache__|node_modules|\.ipynb_checkpoints)")
        .expect("BUG: hardcoded skip regex is invalid")
});

/// Hidden files and tool caches are never downloaded.
#[must_use]
pub fn is_skipped_file(name: &str) -> bool {
    SKIPPED_FILE.is_match(name)
}

async fn write_file(out_dir: &Path, name: &str, payload: FilePayload) -> PageCopyResult<PathBuf> {
    let target = out_dir.join(sanitize_filename::sanitize(name));
    tokio::fs::create_dir_all(out_dir).await?;
    tokio::fs::write(&target, payload.into_bytes()).await?;
    Ok(target)
}

/// Save the located notebook as `.ipynb` JSON under `out_dir`.
pub async fn download_notebook(
    client: &NotebookClient,
    location: &NotebookLocation,
    out_dir: &Path,
) -> PageCopyResult<PathBuf> {
    let entry = client.fetch_contents(&location.api_url(&location.path)).await?;
    let json = pretty_notebook_json(&entry.content)?;
    let path = write_file(out_dir, location.file_name(), FilePayload::Text(json)).await?;
    log::info!("Saved notebook to {}", path.display());
    Ok(path)
}

/// Save every downloadable file next to the notebook, one request at a
/// time with the client's file delay in between. A file that fails is
/// logged and skipped; the listing itself failing fails the action.
pub async fn download_all_files(
    client: &NotebookClient,
    location: &NotebookLocation,
    out_dir: &Path,
) -> PageCopyResult<Vec<PathBuf>> {
    let listing = client
        .fetch_contents(&location.api_url(location.directory()))
        .await?;
    let Some(items) = listing.content.as_array() else {
        return Err(PageCopyError::Unsupported(
            "Not a directory listing".to_string(),
        ));
    };

    let files: Vec<ContentsEntry> = items
        .iter()
        .filter_map(|item| serde_json::from_value::<ContentsEntry>(item.clone()).ok())
        .filter(|entry| !entry.is_directory() && !is_skipped_file(&entry.name))
        .collect();
    if files.is_empty() {
        return Err(PageCopyError::NothingExtracted(
            "No downloadable files found".to_string(),
        ));
    }
    log::info!("Downloading {} notebook files", files.len());

    let mut saved = Vec::with_capacity(files.len());
    for file in &files {
        match download_one(client, location, file, out_dir).await {
            Ok(path) => saved.push(path),
            Err(e) => log::warn!("Skipping {}: {e}", file.name),
        }
        tokio::time::sleep(client.file_delay()).await;
    }
    Ok(saved)
}

async fn download_one(
    client: &NotebookClient,
    location: &NotebookLocation,
    file: &ContentsEntry,
    out_dir: &Path,
) -> PageCopyResult<PathBuf> {
    let entry = client.fetch_contents(&location.api_url(&file.path)).await?;
    let payload = export_payload(&entry, &file.name)?;
    write_file(out_dir, &file.name, payload).await
}
