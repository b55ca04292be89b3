//! Plain text output, roughly what a browser's rendered text gives:
//! inert and hidden nodes skipped, block boundaries turned into newlines.

use scraper::{ElementRef, Node};

use crate::markdown_converter::element_handler::{BLOCK_CONTAINER_TAGS, INERT_TAGS};
use crate::page::dom::{is_hidden, tag};
use crate::utils::{collapse_paragraph_breaks, collapse_whitespace};

const TEXT_BLOCK_TAGS: &[&str] = &[
    "p", "h1", "h2", "h3", "h4", "h5", "h6", "li", "ul", "ol", "dl", "dt", "dd", "tr", "table",
    "blockquote", "pre", "figure", "figcaption", "summary", "hr",
];

fn is_block(name: &str) -> bool {
    TEXT_BLOCK_TAGS.contains(&name) || BLOCK_CONTAINER_TAGS.contains(&name)
}

fn walk(el: ElementRef<'_>, preformatted: bool, out: &mut String) {
    for child in el.children() {
        match child.value() {
            Node::Text(text) if preformatted => out.push_str(text),
            Node::Text(text) => out.push_str(&collapse_whitespace(text)),
            Node::Element(_) => {
                let Some(child_el) = ElementRef::wrap(child) else {
                    continue;
                };
                let name = tag(&child_el);
                if INERT_TAGS.contains(&name) || is_hidden(&child_el) {
                    continue;
                }
                match name {
                    "br" => out.push('\n'),
                    "td" | "th" => {
                        walk(child_el, preformatted, out);
                        out.push('\t');
                    }
                    _ if is_block(name) => {
                        out.push('\n');
                        walk(child_el, preformatted || name == "pre", out);
                        out.push('\n');
                    }
                    _ => walk(child_el, preformatted, out),
                }
            }
            _ => {}
        }
    }
}

/// Text of `root` with one line per block and at most one blank line
/// between blocks
#[must_use]
pub fn plain_text(root: ElementRef<'_>) -> String {
    let mut raw = String::new();
    walk(root, false, &mut raw);
    let lines: Vec<&str> = raw.lines().map(str::trim).collect();
    collapse_paragraph_breaks(&lines.join("\n"), "\n\n")
        .trim()
        .to_string()
}
