//! Form and quiz extraction
//!
//! Two mutually exclusive modes. Pages carrying the application-flow
//! marker (`data-automation-id="applyFlowPage"`) are read field by field
//! through the platform's automation ids; every other page falls back to a
//! generic walk over forms and quiz containers.

mod generic;
mod platform;

use serde::Serialize;

use crate::config::NoiseLexicon;
use crate::page::Page;
use crate::static_selector;

static_selector!(APPLY_FLOW_SELECTOR, r#"[data-automation-id="applyFlowPage"]"#);

/// Placeholder for a field with no resolvable value
pub const EMPTY_VALUE: &str = "(empty)";

/// Placeholder for a choice field with nothing picked
pub const NOT_SELECTED: &str = "(not selected)";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormField {
    pub label: String,
    pub value: String,
}

impl FormField {
    /// Missing values become [`EMPTY_VALUE`].
    #[must_use]
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: label.into(),
            value: if value.is_empty() {
                EMPTY_VALUE.to_string()
            } else {
                value
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum FormLine {
    /// Sub-section heading inside a platform form
    Heading(String),
    Field(FormField),
    /// Numbered question text in a quiz
    Question { number: usize, text: String },
    /// Radio/checkbox option under a question
    Choice { label: String, checked: bool },
}

impl FormLine {
    #[must_use]
    pub fn to_markdown(&self) -> String {
        match self {
            Self::Heading(text) => format!("\n**{text}**"),
            Self::Field(field) => format!("**{}:** {}", field.label, field.value),
            Self::Question { number, text } => format!("**Q{number}:** {text}"),
            Self::Choice { label, checked } => {
                format!("  - {label}{}", if *checked { " ✅" } else { "" })
            }
        }
    }
}

/// One form (or the whole platform application) as ordered lines
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormBlock {
    pub lines: Vec<FormLine>,
}

impl FormBlock {
    #[must_use]
    pub fn to_markdown(&self) -> String {
        self.lines
            .iter()
            .map(FormLine::to_markdown)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Every field in the block, in order
    pub fn fields(&self) -> impl Iterator<Item = &FormField> {
        self.lines.iter().filter_map(|line| match line {
            FormLine::Field(field) => Some(field),
            _ => None,
        })
    }
}

/// Extract form content. Empty when the page has no forms.
#[must_use]
pub fn extract_forms(page: &Page, lexicon: &NoiseLexicon) -> Vec<FormBlock> {
    let blocks = match page.select_first(&APPLY_FLOW_SELECTOR) {
        Some(flow_root) => platform::extract(flow_root, lexicon)
            .into_iter()
            .collect(),
        None => generic::extract(page),
    };
    if blocks.is_empty() {
        tracing::debug!("No form content found");
    }
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_value_sentinel() {
        let field = FormField::new("Phone", "");
        assert_eq!(field.value, EMPTY_VALUE);
        assert_eq!(FormLine::Field(field).to_markdown(), "**Phone:** (empty)");
    }

    #[test]
    fn line_rendering() {
        let block = FormBlock {
            lines: vec![
                FormLine::Question {
                    number: 1,
                    text: "Pick one".to_string(),
                },
                FormLine::Choice {
                    label: "A".to_string(),
                    checked: true,
                },
                FormLine::Choice {
                    label: "B".to_string(),
                    checked: false,
                },
            ],
        };
        assert_eq!(block.to_markdown(), "**Q1:** Pick one\n  - A ✅\n  - B");
    }
}
