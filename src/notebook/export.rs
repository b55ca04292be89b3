//! Turning contents API payloads into file bytes

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;
use serde_json::Value;
use serde_json::ser::PrettyFormatter;

use super::{ContentsEntry, joined_text};
use crate::errors::PageCopyResult;

/// What gets written to disk for one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilePayload {
    Text(String),
    Bytes(Vec<u8>),
}

impl FilePayload {
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Text(text) => text.into_bytes(),
            Self::Bytes(bytes) => bytes,
        }
    }
}

/// Notebook JSON with a one-space indent
pub fn pretty_notebook_json(content: &Value) -> PageCopyResult<String> {
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b" "));
    content.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Jupytext scripts come back as notebooks; rebuild the script with
/// non-code cells turned into `# ` comments.
fn jupytext_source(content: &Value) -> String {
    content
        .get("cells")
        .and_then(Value::as_array)
        .map(|cells| {
            cells
                .iter()
                .map(|cell| {
                    let source = joined_text(cell.get("source"));
                    if cell.get("cell_type").and_then(Value::as_str) == Some("code") {
                        source
                    } else {
                        format!("# {}", source.replace('\n', "\n# "))
                    }
                })
                .collect::<Vec<_>>()
                .join("\n\n")
        })
        .unwrap_or_default()
}

/// Choose the payload for `file_name` by the entry's `type` and `format`.
pub fn export_payload(entry: &ContentsEntry, file_name: &str) -> PageCopyResult<FilePayload> {
    if entry.is_notebook() && file_name.ends_with(".ipynb") {
        return Ok(FilePayload::Text(pretty_notebook_json(&entry.content)?));
    }
    if entry.is_notebook() {
        return Ok(FilePayload::Text(jupytext_source(&entry.content)));
    }
    if entry.format.as_deref() == Some("base64") {
        let encoded: String = entry
            .content
            .as_str()
            .unwrap_or_default()
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();
        return Ok(FilePayload::Bytes(STANDARD.decode(encoded)?));
    }
    Ok(FilePayload::Text(match &entry.content {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(value: Value) -> ContentsEntry {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn ipynb_is_one_space_pretty_json() {
        let e = entry(json!({"type": "notebook", "content": {"nbformat": 4}}));
        assert_eq!(
            export_payload(&e, "a.ipynb").unwrap(),
            FilePayload::Text("{\n \"nbformat\": 4\n}".to_string())
        );
    }

    #[test]
    fn jupytext_comments_non_code_cells() {
        let e = entry(json!({"type": "notebook", "content": {"cells": [
            {"cell_type": "markdown", "source": "Title\nmore"},
            {"cell_type": "code", "source": ["x = 1\n", "print(x)"]}
        ]}}));
        assert_eq!(
            export_payload(&e, "script.py").unwrap(),
            FilePayload::Text("# Title\n# more\n\nx = 1\nprint(x)".to_string())
        );
    }

    #[test]
    fn base64_and_text_files() {
        let e = entry(json!({"type": "file", "format": "base64", "content": "aGVs\nbG8="}));
        assert_eq!(
            export_payload(&e, "data.bin").unwrap(),
            FilePayload::Bytes(b"hello".to_vec())
        );
        let e = entry(json!({"type": "file", "format": "text", "content": "a,b\n"}));
        assert_eq!(
            export_payload(&e, "data.csv").unwrap(),
            FilePayload::Text("a,b\n".to_string())
        );
    }

    #[test]
    fn bad_base64_is_an_error() {
        let e = entry(json!({"type": "file", "format": "base64", "content": "!!"}));
        assert!(export_payload(&e, "x").is_err());
    }
}
