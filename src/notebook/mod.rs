//! Notebook collaborator
//!
//! Talks to a Jupyter-style contents API (`<base>/api/contents/<path>`) to
//! read cells for the embed section and to save notebooks and their sibling
//! files. Every call is bounded by the configured request timeout and a
//! failure only affects the action that made it.

mod client;
mod download;
mod export;
mod location;

pub use client::NotebookClient;
pub use download::{download_all_files, download_notebook, is_skipped_file};
pub use export::{FilePayload, export_payload, pretty_notebook_json};
pub use location::NotebookLocation;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One entry returned by the contents API, either a file or a directory
#[derive(Debug, Clone, Deserialize)]
pub struct ContentsEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub path: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub content: Value,
}

impl ContentsEntry {
    #[must_use]
    pub fn is_directory(&self) -> bool {
        self.kind == "directory"
    }

    #[must_use]
    pub fn is_notebook(&self) -> bool {
        self.kind == "notebook"
    }

    /// Cells of a notebook entry; empty for anything else
    #[must_use]
    pub fn cells(&self) -> Vec<NotebookCell> {
        self.content
            .get("cells")
            .and_then(Value::as_array)
            .map(|cells| cells.iter().map(NotebookCell::from_json).collect())
            .unwrap_or_default()
    }
}

/// Notebook sources and outputs are either a string or a list of lines.
pub(crate) fn joined_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(lines)) => lines.iter().filter_map(Value::as_str).collect(),
        _ => String::new(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotebookCell {
    pub cell_type: String,
    pub source: String,
    /// Text outputs, empty ones dropped
    pub outputs: Vec<String>,
}

impl NotebookCell {
    #[must_use]
    pub fn from_json(cell: &Value) -> Self {
        let outputs = cell
            .get("outputs")
            .and_then(Value::as_array)
            .map(|outputs| {
                outputs
                    .iter()
                    .map(|output| {
                        let text = joined_text(output.get("text"));
                        if text.is_empty() {
                            joined_text(output.pointer("/data/text~1plain"))
                        } else {
                            text
                        }
                    })
                    .filter(|text| !text.is_empty())
                    .collect()
            })
            .unwrap_or_default();
        Self {
            cell_type: cell
                .get("cell_type")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            source: joined_text(cell.get("source")),
            outputs,
        }
    }

    /// Markdown cells verbatim, code cells fenced as python with a
    /// collapsible output block. Other cell types render nothing.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        match self.cell_type.as_str() {
            "markdown" => format!("{}\n", self.source),
            "code" => {
                let mut out = format!("```python\n{}\n```\n", self.source);
                if !self.outputs.is_empty() {
                    out.push_str(&format!(
                        "<details><summary>Output</summary>\n\n```\n{}\n```\n\n</details>\n",
                        self.outputs.join("\n")
                    ));
                }
                out
            }
            _ => String::new(),
        }
    }
}

/// Cells fetched for an embedded notebook
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotebookSnapshot {
    pub name: Option<String>,
    pub cells: Vec<NotebookCell>,
}
