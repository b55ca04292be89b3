//! Code block extraction across editor families
//!
//! Scanners run in a fixed order (notebook cells, CodeMirror, Monaco,
//! generic highlighted blocks) and share one seen-set keyed by the exact
//! code text, so a block found by an earlier family is never repeated.

use regex::Regex;
use scraper::ElementRef;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::LazyLock;

use crate::markdown_converter::element_handler::language_from_class;
use crate::page::Page;
use crate::page::dom::{class_attr, closest, parent_element, text_content};
use crate::static_selector;
use crate::utils::MIN_CODE_BLOCK_LEN;

static_selector!(
    NOTEBOOK_CELL_SELECTOR,
    r#".jp-Cell, .cell, .jupyter-cell, [class*="code_cell"], [class*="code-cell"]"#
);
static_selector!(
    CELL_INPUT_SELECTOR,
    r#".jp-InputArea, .input_area, .jp-Editor, .CodeMirror, .cm-content, [class*="code-input"], pre code"#
);
static_selector!(
    CELL_OUTPUT_SELECTOR,
    r#".jp-OutputArea, .output_area, .jp-OutputArea-output, [class*="output"]"#
);
static_selector!(EDITOR_SELECTOR, ".CodeMirror, .cm-editor");
static_selector!(
    EDITOR_CELL_SELECTOR,
    r#".jp-Cell, .cell, .jupyter-cell, [class*="code_cell"]"#
);
static_selector!(CM6_CONTENT_SELECTOR, ".cm-content");
static_selector!(CM5_CODE_SELECTOR, ".CodeMirror-code");
static_selector!(MONACO_SELECTOR, ".monaco-editor");
static_selector!(MONACO_LINE_SELECTOR, ".view-line");
static_selector!(GENERIC_CODE_SELECTOR, "pre code, pre.highlight, .highlight pre");
static_selector!(
    GENERIC_EXCLUDE_SELECTOR,
    ".jp-Cell, .cell, .jupyter-cell, .CodeMirror, .cm-editor"
);

static JAVASCRIPT_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(javascript|js)\b").expect("BUG: hardcoded javascript class regex is invalid")
});
static R_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(r|rlang)\b").expect("BUG: hardcoded R class regex is invalid")
});
static JULIA_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bjulia\b").expect("BUG: hardcoded julia class regex is invalid")
});

/// Default language of notebook cells without a recognised class token
pub const NOTEBOOK_DEFAULT_LANGUAGE: &str = "python";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeBlock {
    pub code: String,
    pub output: Option<String>,
    pub language: Option<String>,
}

impl CodeBlock {
    /// `### Cell N (lang)` section with fenced code and a collapsible
    /// output when one was captured. `number` is 1-based.
    #[must_use]
    pub fn to_markdown(&self, number: usize) -> String {
        let lang = self.language.as_deref().unwrap_or("");
        let heading = match &self.language {
            Some(lang) => format!("### Cell {number} ({lang})"),
            None => format!("### Cell {number}"),
        };
        let mut out = format!("{heading}\n\n```{lang}\n{}\n```\n", self.code);
        if let Some(output) = &self.output {
            out.push_str(&format!(
                "\n<details><summary>Output</summary>\n\n```\n{output}\n```\n\n</details>\n"
            ));
        }
        out
    }
}

/// Accumulates blocks in discovery order, dropping short and repeated code.
#[derive(Default)]
struct CodeCollector {
    seen: HashSet<String>,
    blocks: Vec<CodeBlock>,
}

impl CodeCollector {
    fn push(&mut self, code: String, output: Option<String>, language: Option<String>) {
        if code.chars().count() < MIN_CODE_BLOCK_LEN || self.seen.contains(&code) {
            return;
        }
        self.seen.insert(code.clone());
        self.blocks.push(CodeBlock {
            code,
            output,
            language,
        });
    }
}

type Scanner = fn(&Page, &mut CodeCollector);

const SCANNERS: &[Scanner] = &[
    scan_notebook_cells,
    scan_codemirror,
    scan_monaco,
    scan_generic_blocks,
];

/// All code blocks on the page, de-duplicated, in scanner order.
#[must_use]
pub fn extract_code_blocks(page: &Page) -> Vec<CodeBlock> {
    let mut collector = CodeCollector::default();
    for scanner in SCANNERS {
        scanner(page, &mut collector);
    }
    if collector.blocks.is_empty() {
        tracing::debug!("No code blocks found");
    }
    collector.blocks
}

fn notebook_language(cell: &ElementRef<'_>, input: &ElementRef<'_>) -> String {
    let classes = format!("{} {}", class_attr(cell), class_attr(input));
    if JAVASCRIPT_CLASS.is_match(&classes) {
        "javascript".to_string()
    } else if R_CLASS.is_match(&classes) {
        "r".to_string()
    } else if JULIA_CLASS.is_match(&classes) {
        "julia".to_string()
    } else {
        NOTEBOOK_DEFAULT_LANGUAGE.to_string()
    }
}

fn scan_notebook_cells(page: &Page, out: &mut CodeCollector) {
    for cell in page.select_all(&NOTEBOOK_CELL_SELECTOR) {
        let Some(input) = cell.select(&CELL_INPUT_SELECTOR).next() else {
            continue;
        };
        let code = text_content(&input).trim().to_string();
        let output = cell
            .select(&CELL_OUTPUT_SELECTOR)
            .next()
            .map(|o| text_content(&o).trim().to_string())
            .filter(|o| !o.is_empty());
        let language = notebook_language(&cell, &input);
        out.push(code, output, Some(language));
    }
}

fn scan_codemirror(page: &Page, out: &mut CodeCollector) {
    for editor in page.select_all(&EDITOR_SELECTOR) {
        if closest(&editor, &EDITOR_CELL_SELECTOR).is_some() {
            continue;
        }
        let source = editor
            .select(&CM6_CONTENT_SELECTOR)
            .next()
            .or_else(|| editor.select(&CM5_CODE_SELECTOR).next())
            .unwrap_or(editor);
        out.push(text_content(&source).trim().to_string(), None, None);
    }
}

fn scan_monaco(page: &Page, out: &mut CodeCollector) {
    for editor in page.select_all(&MONACO_SELECTOR) {
        let code = editor
            .select(&MONACO_LINE_SELECTOR)
            .map(|line| text_content(&line))
            .collect::<Vec<_>>()
            .join("\n");
        out.push(code.trim().to_string(), None, None);
    }
}

fn scan_generic_blocks(page: &Page, out: &mut CodeCollector) {
    for block in page.select_all(&GENERIC_CODE_SELECTOR) {
        if closest(&block, &GENERIC_EXCLUDE_SELECTOR).is_some() {
            continue;
        }
        let own_class = class_attr(&block);
        let class = if own_class.is_empty() {
            parent_element(&block).map_or("", |p| class_attr(&p))
        } else {
            own_class
        };
        out.push(
            text_content(&block).trim().to_string(),
            None,
            language_from_class(class),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blocks(html: &str) -> Vec<CodeBlock> {
        extract_code_blocks(&Page::parse(html, None))
    }

    #[test]
    fn notebook_cells_capture_output_and_language() {
        let html = r#"<div class="jp-Cell"><div class="jp-InputArea">print("hi")</div>
                      <div class="jp-OutputArea">hi</div></div>
                      <div class="cell julia"><pre><code>x = 1 + 1</code></pre></div>"#;
        let found = blocks(html);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].code, "print(\"hi\")");
        assert_eq!(found[0].output.as_deref(), Some("hi"));
        assert_eq!(found[0].language.as_deref(), Some("python"));
        assert_eq!(found[1].language.as_deref(), Some("julia"));
        assert_eq!(found[1].output, None);
    }

    #[test]
    fn duplicates_across_families_keep_first() {
        let html = r#"<div class="cell"><pre><code>let a = 1;</code></pre></div>
                      <pre><code class="language-js">let a = 1;</code></pre>
                      <pre><code class="language-js">let b = 2;</code></pre>"#;
        let found = blocks(html);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].language.as_deref(), Some("python"));
        assert_eq!(found[1].code, "let b = 2;");
        assert_eq!(found[1].language.as_deref(), Some("js"));
    }

    #[test]
    fn editors() {
        let html = r#"<div class="cm-editor"><div class="cm-content">SELECT 1;</div></div>
                      <div class="monaco-editor"><div class="view-line">fn a() {</div><div class="view-line">}</div></div>"#;
        let found = blocks(html);
        assert_eq!(found[0].code, "SELECT 1;");
        assert_eq!(found[1].code, "fn a() {\n}");
    }

    #[test]
    fn generic_language_from_parent() {
        let html = r#"<div class="highlight lang-toml"><pre>[a]
b = 1</pre></div><pre><code>ok</code></pre>"#;
        let found = blocks(html);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].language.as_deref(), Some("toml"));
    }

    #[test]
    fn cell_section_markdown() {
        let block = CodeBlock {
            code: "print(1)".to_string(),
            output: Some("1".to_string()),
            language: Some("python".to_string()),
        };
        assert_eq!(
            block.to_markdown(2),
            "### Cell 2 (python)\n\n```python\nprint(1)\n```\n\n<details><summary>Output</summary>\n\n```\n1\n```\n\n</details>\n"
        );
    }
}
