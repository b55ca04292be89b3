//! Handler for table elements.
//!
//! Converts HTML tables to Markdown tables using the pipe syntax:
//! ```text
//! | Header1 | Header2 |
//! | --- | --- |
//! | Cell1 | Cell2 |
//! ```
//!
//! The first row with cells becomes the header. Uneven rows pass through
//! as-is; no column reconciliation is attempted.

use scraper::ElementRef;

use super::super::MarkdownRenderer;
use super::super::context::RenderContext;
use crate::page::dom::{child_elements, tag};
use crate::utils::{collapse_paragraph_breaks, collapse_whitespace};

/// Rows owned by this table: direct `tr` children plus those of its
/// `thead`/`tbody`/`tfoot` sections. Rows of nested tables are excluded.
fn table_rows<'a>(table: &ElementRef<'a>) -> Vec<ElementRef<'a>> {
    let mut rows = Vec::new();
    for child in child_elements(table) {
        match tag(&child) {
            "tr" => rows.push(child),
            "thead" | "tbody" | "tfoot" => {
                rows.extend(child_elements(&child).filter(|row| tag(row) == "tr"));
            }
            _ => {}
        }
    }
    rows
}

fn row_cells<'a>(row: &ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    child_elements(row).filter(|cell| matches!(tag(cell), "th" | "td"))
}

/// Render one cell and flatten it to a single pipe-safe line.
fn cell_text(renderer: &MarkdownRenderer<'_>, cell: ElementRef<'_>) -> String {
    let rendered = renderer.render_node(*cell, RenderContext::table_cell());
    collapse_paragraph_breaks(&rendered, " ")
        .replace('|', "\\|")
        .replace('\n', " ")
        .trim()
        .to_string()
}

pub(super) fn table_handler(
    renderer: &MarkdownRenderer<'_>,
    el: ElementRef<'_>,
    ctx: RenderContext,
) -> String {
    if ctx.in_table {
        return nested_table_text(renderer, el);
    }

    let mut lines: Vec<String> = Vec::new();
    for row in table_rows(&el) {
        let cells: Vec<String> = row_cells(&row)
            .map(|cell| cell_text(renderer, cell))
            .collect();
        if cells.is_empty() {
            continue;
        }
        lines.push(format!("| {} |", cells.join(" | ")));
        if lines.len() == 1 {
            lines.push(format!("| {} |", vec!["---"; cells.len()].join(" | ")));
        }
    }

    if lines.is_empty() {
        return String::new();
    }
    format!("\n\n{}\n\n", lines.join("\n"))
}

/// A table inside a table cell cannot become a second pipe table; its cells
/// are emitted inline, space separated.
fn nested_table_text(renderer: &MarkdownRenderer<'_>, el: ElementRef<'_>) -> String {
    let parts: Vec<String> = table_rows(&el)
        .iter()
        .flat_map(|row| row_cells(row).collect::<Vec<_>>())
        .map(|cell| cell_text(renderer, cell))
        .filter(|text| !text.is_empty())
        .collect();
    collapse_whitespace(&format!(" {} ", parts.join(" ")))
}
